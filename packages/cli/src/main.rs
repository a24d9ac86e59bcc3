mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    build, components, init, render, BuildArgs, ComponentsArgs, InitArgs, RenderArgs,
};
use tracing_subscriber::EnvFilter;

/// Sitecraft CLI - build pages from components and render them to HTML
#[derive(Parser, Debug)]
#[command(name = "sitecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Sitecraft project
    Init(InitArgs),

    /// Render saved pages to static HTML
    Render(RenderArgs),

    /// Replay a mutation list into a page document
    Build(BuildArgs),

    /// List the available components
    Components(ComponentsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Build(args) => build(args, &cwd),
        Command::Components(args) => components(args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
