//! Hyperparams demo CLI
//!
//! Builds a training configuration from the command line and prints it,
//! a variant with overrides, their diff and the exported search space.
//!
//! # Usage
//!
//! ```bash
//! hyperparams --do-train
//! hyperparams --no-do-train --lr 0.5 --mode custom --save params.yaml
//! RUST_LOG=debug hyperparams --do-train
//! ```

use clap::{CommandFactory, FromArgMatches, Parser};
use hyperparams::{cli, io, HpValue, Hyperparam, Schema, SearchSpace, SearchSpaceExport};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, LazyLock};
use tracing_subscriber::EnvFilter;

fn check_epochs(value: &HpValue) -> Result<(), String> {
    match value.as_int() {
        Some(v) if v > 10 => Err(format!("Epochs {v} is too big!")),
        _ => Ok(()),
    }
}

static MY_TEST: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("MyTest")
        .field::<f64>(
            "lr",
            Hyperparam::new("Learning Rate")
                .default(0.1)
                .search_space(SearchSpace::LogUniform { low: 1e-2, high: 1e4 }),
        )
        .field::<i64>(
            "epochs",
            Hyperparam::new("Number of epochs").default(7).check(check_epochs),
        )
        .field::<String>(
            "mode",
            Hyperparam::new("Training mode")
                .default("backprop")
                .choices(["backprop", "sazil", "custom"]),
        )
        .field::<bool>("do_train", Hyperparam::new("Whether should train the model"))
        .field::<bool>(
            "delete_model",
            Hyperparam::new("Delete the model after training").default(false),
        )
        .build()
        .expect("MyTest schema declaration is valid")
});

#[derive(Parser, Debug)]
#[command(name = "hyperparams", version, about = "Hyperparameter schema demo")]
struct Cli {
    /// Write the parsed configuration to this YAML or JSON file
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &clap::ArgMatches, args: Cli) -> hyperparams::Result<()> {
    let schema = &*MY_TEST;
    let p1 = cli::from_arguments(schema, matches, Vec::<(String, HpValue)>::new())?;
    let p2 = cli::from_arguments(
        schema,
        matches,
        [("lr", HpValue::from(0.8)), ("mode", HpValue::from("sazil"))],
    )?;

    println!("{}", p1.to_json()?);
    println!("{}", p2.to_json_with_indent(0)?);

    let diff = p1.diff(&p2);
    for field in schema.fields() {
        if let Some((old, new)) = diff.get(&field.name) {
            let show = |v: &Option<HpValue>| v.as_ref().map_or("<absent>".to_string(), HpValue::to_string);
            println!("{}: {} -> {}", field.name, show(old), show(new));
        }
    }

    println!("{}", p1.param_space(false).to_json()?);

    if let Some(path) = &args.save {
        io::save(&p1, path)?;
        eprintln!("Saved {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let matches = cli::add_arguments(&MY_TEST, Cli::command()).get_matches();
    let args = match Cli::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    match run(&matches, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
