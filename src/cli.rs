use clap::{Parser, ValueEnum};

use color_sanitizer::OutputFormat;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Colors to parse (default: read one color per line from stdin)
    pub colors: Vec<String>,

    /// Notation to print parsed colors in
    #[arg(short, long, value_enum, default_value_t)]
    pub output: CliOutputFormat,

    /// Print the sanitized rgb() value instead (ignores --output)
    #[arg(short, long)]
    pub sanitize: bool,

    /// Print full results as JSON, one object per line
    #[arg(long)]
    pub json: bool,

    /// Program used for colors no built-in parser understands.
    ///
    /// It receives the color on stdin and must answer with an rgb() or rgba()
    /// color on the first line of stdout.
    #[arg(long, value_name = "PROGRAM")]
    pub resolver: Option<String>,

    /// Argument passed to the resolver program (repeatable)
    #[arg(
        long = "resolver-arg",
        value_name = "ARG",
        requires = "resolver",
        allow_hyphen_values = true
    )]
    pub resolver_args: Vec<String>,

    /// Log detection and fallback decisions to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Default, Clone, Copy, strum::Display)]
#[clap(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CliOutputFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Oklch,
    Oklab,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(value: CliOutputFormat) -> Self {
        match value {
            CliOutputFormat::Hex => OutputFormat::Hex,
            CliOutputFormat::Rgb => OutputFormat::Rgb,
            CliOutputFormat::Hsl => OutputFormat::Hsl,
            CliOutputFormat::Oklch => OutputFormat::Oklch,
            CliOutputFormat::Oklab => OutputFormat::Oklab,
        }
    }
}
