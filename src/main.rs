use std::{
    io::{self, BufRead},
    process::ExitCode,
};

use clap::Parser as _;
use cli::Cli;
use color_sanitizer::{
    ColorError, ColorParser, ColorResolver, CommandResolver, OutputFormat, ProbeResolver,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Serialize)]
struct Report<'a, T> {
    ok: bool,
    #[serde(flatten)]
    body: &'a T,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn read_stdin_colors() -> io::Result<Vec<String>> {
    io::stdin()
        .lock()
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .collect()
}

fn report_error(err: &ColorError) {
    eprintln!("Invalid color '{}': {}", err.input, err.message);
    if let Some(suggestion) = &err.suggestion {
        eprintln!("  {suggestion}");
    }
}

fn print_json<T: Serialize>(ok: bool, body: &T) -> bool {
    match serde_json::to_string(&Report { ok, body }) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(err) => {
            eprintln!("Couldn't serialize result: {err}");
            false
        }
    }
}

/// Handles one color, returns whether it succeeded.
fn run<R: ColorResolver>(parser: &ColorParser<R>, cli: &Cli, color: &str) -> bool {
    let output = OutputFormat::from(cli.output);

    if cli.sanitize {
        return match parser.sanitize(color) {
            Ok(sanitized) if cli.json => print_json(true, &sanitized),
            Ok(sanitized) => {
                println!("{}", sanitized.value);
                true
            }
            Err(err) => {
                if cli.json {
                    print_json(false, &err);
                } else {
                    report_error(&err);
                }
                false
            }
        };
    }

    match parser.parse(color) {
        Ok(parsed) if cli.json => print_json(true, &parsed),
        Ok(parsed) => {
            println!("{}", parsed.format_as(output));
            true
        }
        Err(err) => {
            if cli.json {
                print_json(false, &err);
            } else {
                report_error(&err);
            }
            false
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let colors = if cli.colors.is_empty() {
        match read_stdin_colors() {
            Ok(colors) => colors,
            Err(err) => {
                eprintln!("Couldn't read colors from stdin: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        cli.colors.clone()
    };

    let resolver = cli
        .resolver
        .as_ref()
        .map(|program| ProbeResolver::new(CommandResolver::new(program, cli.resolver_args.clone())));
    let parser = ColorParser::from_optional(resolver);

    let mut all_ok = true;
    for color in &colors {
        all_ok &= run(&parser, &cli, color);
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
