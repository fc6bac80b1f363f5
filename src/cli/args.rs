//! Argument definitions and matches extraction

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use std::ffi::OsString;
use std::sync::Arc;

use super::parser::FieldValueParser;
use crate::error::{Result, ValidationError};
use crate::field::FieldDescriptor;
use crate::instance::Hyperparams;
use crate::schema::Schema;
use crate::value::HpValue;

/// Help prefix of a boolean field's disabling flag
const DISABLE_PREFIX: &str = "Disable: ";

/// Id of the disabling flag; hyphens never occur in field names
fn negated_id(field: &FieldDescriptor) -> String {
    format!("no-{}", field.name)
}

fn group_id(field: &FieldDescriptor) -> String {
    format!("{}-switch", field.name)
}

fn long_name(field: &FieldDescriptor) -> String {
    field.name.replace('_', "-")
}

/// Append one argument (or switch pair) per field, in declaration order
pub fn add_arguments(schema: &Schema, cmd: Command) -> Command {
    schema.fields().iter().fold(cmd, |cmd, field| {
        if field.is_bool() {
            add_switch_pair(cmd, field)
        } else {
            cmd.arg(value_arg(field))
        }
    })
}

/// Fresh command named after the schema, carrying its arguments
pub fn command(schema: &Schema) -> Command {
    add_arguments(schema, Command::new(schema.name().to_string()))
}

fn value_arg(field: &FieldDescriptor) -> Arg {
    let mut arg = Arg::new(field.name.clone())
        .long(long_name(field))
        .value_name(field.name.to_uppercase())
        .help(field.description.clone())
        .action(ArgAction::Set)
        .value_parser(FieldValueParser::for_field(field))
        .required(field.required());
    if let Some(default) = field.default.as_ref().filter(|d| !d.is_null()) {
        arg = arg.default_value(default.to_string());
    }
    // A bare `--name` sets a nullable field to null
    if field.field_type.nullable {
        arg = arg.num_args(0..=1);
    }
    arg
}

fn add_switch_pair(cmd: Command, field: &FieldDescriptor) -> Command {
    let enable = Arg::new(field.name.clone())
        .long(long_name(field))
        .help(field.description.clone())
        .action(ArgAction::SetTrue);
    let disable = Arg::new(negated_id(field))
        .long(format!("no-{}", long_name(field)))
        .help(format!("{DISABLE_PREFIX}{}", field.description))
        .action(ArgAction::SetTrue);
    // Each flag stays optional; the group rejects both at once and, without
    // a default, demands one of them.
    let group = ArgGroup::new(group_id(field))
        .args([field.name.clone(), negated_id(field)])
        .multiple(false)
        .required(field.required());
    cmd.arg(enable).arg(disable).group(group)
}

fn flag_set(matches: &ArgMatches, id: &str) -> bool {
    matches.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false)
}

fn parsed_value(field: &FieldDescriptor, matches: &ArgMatches) -> Option<HpValue> {
    if field.is_bool() {
        if flag_set(matches, &field.name) {
            Some(HpValue::Bool(true))
        } else if flag_set(matches, &negated_id(field)) {
            Some(HpValue::Bool(false))
        } else {
            field.default.clone()
        }
    } else {
        match matches.try_get_one::<HpValue>(&field.name).ok().flatten() {
            Some(value) => Some(value.clone()),
            None if field.field_type.nullable
                && matches.value_source(&field.name) == Some(ValueSource::CommandLine) =>
            {
                Some(HpValue::Null)
            }
            None => None,
        }
    }
}

/// Build a validated instance from parsed matches, then `overrides` on top
pub fn from_arguments<I, K, V>(
    schema: &Arc<Schema>,
    matches: &ArgMatches,
    overrides: I,
) -> std::result::Result<Hyperparams, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<HpValue>,
{
    let parsed = schema
        .fields()
        .iter()
        .filter_map(|f| parsed_value(f, matches).map(|v| (f.name.clone(), v)));
    let overrides = overrides.into_iter().map(|(k, v)| (k.into(), v.into()));
    Hyperparams::new(schema, parsed.chain(overrides))
}

/// Parse `args` (program name first) against `cmd` extended with the schema
pub fn parse_from<I, T>(schema: &Arc<Schema>, cmd: Command, args: I) -> Result<Hyperparams>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = add_arguments(schema, cmd).try_get_matches_from(args)?;
    Ok(from_arguments(schema, &matches, Vec::<(String, HpValue)>::new())?)
}

impl Hyperparams {
    /// Command-line tokens that reproduce this instance
    ///
    /// A null in a nullable field is written as the bare flag, unless null
    /// is already the default. Other nulls are left out.
    pub fn to_arguments(&self) -> Vec<String> {
        self.schema()
            .fields()
            .iter()
            .zip(self.iter())
            .filter_map(|(field, (_, value))| match value {
                HpValue::Null if field.field_type.nullable && !field.default_is_null() => {
                    Some(field.flag())
                }
                HpValue::Null => None,
                HpValue::Bool(true) if field.is_bool() => Some(field.flag()),
                HpValue::Bool(false) if field.is_bool() => Some(field.negated_flag()),
                other => Some(format!("{}={other}", field.flag())),
            })
            .collect()
    }
}
