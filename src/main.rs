//! macrun CLI — macro-expanding command runner.

use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "macrun",
    version,
    about = "Macro-expanding command runner — variant-aware macros, env interpolation, interactive dispatch"
)]
struct Cli {
    /// Log macro expansion and the final command line
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: macrun::cli::Commands,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::INFO } else { Level::WARN })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = macrun::cli::dispatch(cli.command, cli.verbose) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
