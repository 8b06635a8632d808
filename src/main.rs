use bundle_diff::cmd;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::process;

/// Structural diff engine for bundler build snapshots
///
/// bundle-diff compares two captured webpack/rspack build snapshots and
/// reports which assets, modules, and packages appeared, disappeared, or
/// changed, and by how much.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff two build snapshots
    Diff {
        /// Baseline snapshot JSON file
        baseline: String,

        /// Current snapshot JSON file
        current: String,

        /// Output the full report as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,

        /// Only show packages whose name contains this substring
        #[arg(short, long)]
        filter: Option<String>,

        /// Only show changed/new/deleted modules
        #[arg(long)]
        changed_only: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Diff {
            baseline,
            current,
            json,
            filter,
            changed_only,
        }) => cmd::cmd_diff(baseline, current, *json, filter.as_deref(), *changed_only),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("bundle-diff v{}", env!("CARGO_PKG_VERSION"));
            println!("Structural diff engine for bundler build snapshots\n");
            println!("Usage: bundle-diff <COMMAND>\n");
            println!("Commands:");
            println!("  diff         Diff two build snapshots");
            println!("  completions  Generate shell completions");
            println!("\nRun 'bundle-diff <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use bundle_diff::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
