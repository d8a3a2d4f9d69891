use clap::{Args, Subcommand, ValueEnum};

/// Arguments for decoding a field
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Field kind (accords, notes_pyramid, rating, brand, ...)
    pub kind: String,

    /// Field text or file (reads from stdin if not provided)
    pub input: Option<String>,

    /// Schema version the row was written with (v1, v2, v3, unknown)
    #[arg(short = 's', long, value_name = "VERSION")]
    pub schema: Option<String>,

    /// Fail if any token had to be replaced with a default
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print JSON output
    #[arg(short = 'p', long)]
    pub pretty: bool,
}

/// Arguments for encoding a field
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Field kind (accords, notes_pyramid, rating, brand, ...)
    pub kind: String,

    /// JSON value or file (reads from stdin if not provided)
    pub input: Option<String>,
}

/// Arguments for listing the grammars a field fits
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Field kind (accords, notes_pyramid, rating, brand, ...)
    pub kind: String,

    /// Field text or file (reads from stdin if not provided)
    pub input: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for decoding a whole row
#[derive(Args, Debug)]
pub struct RowArgs {
    /// Header line and value line, or a file holding them (reads from stdin if not provided)
    pub input: Option<String>,

    /// Schema version the row was written with (v1, v2, v3, unknown)
    #[arg(short = 's', long, value_name = "VERSION")]
    pub schema: Option<String>,

    /// Pretty-print JSON output
    #[arg(short = 'p', long)]
    pub pretty: bool,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List available options
    List {
        /// What to list: kinds, columns, accords, notes
        #[arg(value_name = "TYPE")]
        category: Option<ConfigCategory>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the grammars of a field kind
    Show {
        /// Field kind name
        kind: String,
    },
}

/// Categories for config list command
#[derive(Clone, ValueEnum, Debug)]
pub enum ConfigCategory {
    Kinds,
    Columns,
    Accords,
    Notes,
}
