mod args;
mod config;
mod global;
mod handlers;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use args::{ConfigAction, DecodeArgs, DetectArgs, EncodeArgs, RowArgs};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "fragdb-codec")]
#[command(version)]
#[command(about = "Decode and encode the structured sub-fields of FragDB rows across schema versions", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a field to JSON
    Decode(DecodeArgs),

    /// Encode a JSON value to the canonical field form
    Encode(EncodeArgs),

    /// List the grammars a field fits, best first
    Detect(DetectArgs),

    /// Decode the structured columns of a header + row pair
    Row(RowArgs),

    /// Inspect kinds, column mappings and reference tables
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing(global: &GlobalArgs) {
    let default_level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(!global.no_color)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(&cli.global);
    if cli.global.no_color {
        fragdb_codec::disable_color();
    }

    // Load reference tables with user overrides
    let registry = config::load_registry(cli.global.references.as_deref())?;

    match cli.command {
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &registry),
        Commands::Encode(args) => handlers::encode::handle(args, &cli.global),
        Commands::Detect(args) => handlers::detect::handle(args, &cli.global, &registry),
        Commands::Row(args) => handlers::row::handle(args, &cli.global, &registry),
        Commands::Config { action } => handlers::config::handle(action, &cli.global, &registry),
    }
}
