//! Sigil CLI entry point.

use std::env;
use std::io;
use std::process::ExitCode;

use sigil_runtime::{Repl, ReplConfig, Session};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    commands: Vec<String>,
    show_help: bool,
    show_version: bool,
    no_banner: bool,
    no_prefix: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--no-banner" => config.no_banner = true,
            "--no-prefix" => config.no_prefix = true,
            "-c" | "--command" => {
                let command = args.next().ok_or("--command requires a value")?;
                config.commands.push(command);
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(true);
    }

    if cli.show_version {
        println!("sigil {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    let mut config = ReplConfig::default().with_banner(!cli.no_banner);
    if cli.no_prefix {
        config = config.with_prefix(None);
    }

    // Batch mode: run each command against one world, then exit
    if !cli.commands.is_empty() {
        let session = Session::new(&config)?;
        let mut repl = Repl::with_editor(NoInput, session, config);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut all_ok = true;
        for command in &cli.commands {
            all_ok &= repl.eval_line(command, &mut out)?;
        }
        return Ok(all_ok);
    }

    Repl::new(config)?.run()?;
    Ok(true)
}

/// Editor for batch mode, which never reads.
struct NoInput;

impl sigil_runtime::LineEditor for NoInput {
    fn read_line(&mut self, _prompt: &str) -> sigil_runtime::Result<sigil_runtime::ReadResult> {
        Ok(sigil_runtime::ReadResult::Eof)
    }

    fn add_history(&mut self, _line: &str) {}
}

fn print_help() {
    println!(
        "\
Sigil - command dispatcher playground

USAGE:
    sigil [OPTIONS]

OPTIONS:
    -c, --command <CMD>    Run CMD and exit (repeatable)
        --no-banner        Don't print the welcome banner
        --no-prefix        Don't strip a leading '/' from input
    -h, --help             Print help
    -V, --version          Print version

Set RUST_LOG (e.g. RUST_LOG=sigil_dispatch=trace) to see parser logs."
    );
}
