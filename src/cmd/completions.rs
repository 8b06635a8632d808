//! Completions command implementation
//!
//! Handles the `bundle-diff completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// bundle-diff completions bash > /etc/bash_completion.d/bundle-diff
///
/// # Zsh
/// bundle-diff completions zsh > ~/.zfunc/_bundle-diff
///
/// # Fish
/// bundle-diff completions fish > ~/.config/fish/completions/bundle-diff.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    // We need to re-create the command structure here since Cli is in main.rs
    use clap::{Arg, ArgAction, Command};

    let mut cmd = Command::new("bundle-diff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Structural diff engine for bundler build snapshots")
        .arg(
            Arg::new("no-emoji")
                .long("no-emoji")
                .help("Disable emoji output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("diff").about("Diff two build snapshots"))
        .subcommand(Command::new("completions").about("Generate shell completions"));

    let bin_name = "bundle-diff".to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
