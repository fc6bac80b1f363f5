//! Typed value parser for schema fields

use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Arg, Command};
use std::ffi::OsStr;

use crate::field::FieldDescriptor;
use crate::value::{HpType, HpValue};

/// Parses one field's command-line value into an [`HpValue`]
///
/// Rejects tokens that do not parse as the field's kind and, when the field
/// declares choices, values outside them. Both surface as clap usage errors.
#[derive(Debug, Clone)]
pub struct FieldValueParser {
    kind: HpType,
    choices: Option<Vec<HpValue>>,
}

impl FieldValueParser {
    pub fn new(kind: HpType, choices: Option<Vec<HpValue>>) -> Self {
        Self { kind, choices }
    }

    pub fn for_field(field: &FieldDescriptor) -> Self {
        Self::new(field.field_type.kind, field.choices.clone())
    }
}

impl TypedValueParser for FieldValueParser {
    type Value = HpValue;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let raw = value
            .to_str()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;
        let arg_name = arg.map_or_else(|| "...".to_string(), ToString::to_string);

        let parsed = self.kind.parse(raw).ok_or_else(|| {
            clap::Error::raw(
                ErrorKind::InvalidValue,
                format!("argument {arg_name}: invalid {} value: '{raw}'\n", self.kind),
            )
            .with_cmd(cmd)
        })?;

        if let Some(choices) = &self.choices {
            if !choices.contains(&parsed) {
                let listed: Vec<String> = choices.iter().map(ToString::to_string).collect();
                return Err(clap::Error::raw(
                    ErrorKind::InvalidValue,
                    format!(
                        "argument {arg_name}: invalid choice: '{raw}' (choose from {})\n",
                        listed.join(", ")
                    ),
                )
                .with_cmd(cmd));
            }
        }

        Ok(parsed)
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        let choices = self.choices.as_ref()?;
        Some(Box::new(choices.iter().map(|c| PossibleValue::new(c.to_string()))))
    }
}
