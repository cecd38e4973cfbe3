//! Binary entrypoint for scorepmetadata2json.
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use fairmeta_cli::{init_logging, metadata_json, parse_file, schema_json};
use fairmeta_core::{AbsentFields, Generation, GenerationSelect, ParseConfig};

/// Grammar generation of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GenerationArg {
    Auto,
    V1,
    V2,
}

impl From<GenerationArg> for GenerationSelect {
    fn from(arg: GenerationArg) -> Self {
        match arg {
            GenerationArg::Auto => GenerationSelect::Auto,
            GenerationArg::V1 => GenerationSelect::Fixed(Generation::V1),
            GenerationArg::V2 => GenerationSelect::Fixed(Generation::V2),
        }
    }
}

/// JSON shape of list fields missing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AbsentArg {
    /// `[""]`, as older consumers expect
    Sentinel,
    /// `null`
    Null,
}

impl From<AbsentArg> for AbsentFields {
    fn from(arg: AbsentArg) -> Self {
        match arg {
            AbsentArg::Sentinel => AbsentFields::Sentinel,
            AbsentArg::Null => AbsentFields::Null,
        }
    }
}

/// Parse a Score-P Metadata File (scorep.fair) into a JSON format.
#[derive(Parser)]
#[command(name = "scorepmetadata2json", version, about)]
struct Cli {
    /// The file to parse.
    #[arg(required_unless_present = "schema", conflicts_with = "schema")]
    file: Option<PathBuf>,

    /// Print the schema to stdout.
    #[arg(long)]
    schema: bool,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,

    /// Grammar generation of the input
    #[arg(long, value_enum, default_value = "auto", env = "FAIRMETA_GENERATION")]
    generation: GenerationArg,

    /// Representation of absent list fields
    #[arg(long, value_enum, default_value = "sentinel", env = "FAIRMETA_ABSENT_FIELDS")]
    absent_fields: AbsentArg,
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    if cli.schema {
        return schema_json();
    }

    let config = ParseConfig {
        generation: cli.generation.into(),
        absent_fields: cli.absent_fields.into(),
    };
    let Some(file) = cli.file.as_deref() else {
        anyhow::bail!("no metadata file given");
    };
    metadata_json(&parse_file(file, &config)?)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(&cli) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
