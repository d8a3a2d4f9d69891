use clap::Args;

/// Global arguments that apply to all subcommands
#[derive(Args)]
pub struct GlobalArgs {
    /// Suppress informational notices
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log grammar probing to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Extra reference tables, merged over the built-in and user ones
    #[arg(long, global = true, value_name = "FILE")]
    pub references: Option<String>,

    /// Maximum input size in bytes (0 = unlimited)
    #[arg(long, global = true, default_value = "104857600")]
    pub max_size: usize,

    /// Process files exceeding --max-size limit
    #[arg(long, global = true)]
    pub force: bool,
}
