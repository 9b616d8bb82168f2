use std::fmt::Debug;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

use modis_meta::{extract, parse, read_attribute, read_text};

mod args;
use args::{MetaCliArgs, OutputFormat};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = MetaCliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: MetaCliArgs) -> Result<()> {
    let file = args
        .file
        .canonicalize()
        .with_context(|| format!("cannot resolve {}", args.file.display()))?;

    let text = if args.text {
        read_text(&file).with_context(|| format!("reading {}", file.display()))?
    } else {
        read_attribute(&file, &args.attribute)
            .with_context(|| format!("reading {} from {}", args.attribute, file.display()))?
    };
    let tree = parse(&text).with_context(|| format!("parsing metadata of {}", file.display()))?;

    eprintln!("header for {}", file.display());
    if args.tree {
        print_out(&tree, args.format)?;
    }
    if !args.tree || args.proj {
        let meta = extract(&tree).context("extracting granule summary")?;
        if !args.tree {
            print_out(&meta, args.format)?;
        }
        if args.proj {
            println!("{}", meta.laea_proj4());
        }
    }
    Ok(())
}

fn print_out<T: Serialize + Debug>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Debug => println!("{:#?}", value),
    }
    Ok(())
}
