//! Giftdesk CLI - redemption code tools.
//!
//! # Usage
//!
//! ```bash
//! # Generate one code
//! gd-cli generate
//!
//! # Generate a batch of codes
//! gd-cli generate --count 20
//!
//! # Check a code's format
//! gd-cli check ABCD-EFGH-JKLM-NPQR
//! ```
//!
//! # Commands
//!
//! - `generate` - Print freshly generated codes
//! - `check` - Exit non-zero unless the code is in the generated format

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gd-cli")]
#[command(author, version, about = "Giftdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate redemption codes
    Generate {
        /// Number of codes to print
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Check that a code is in the generated format
    Check {
        /// Code to check, e.g. ABCD-EFGH-JKLM-NPQR
        code: String,
    },
}

fn main() {
    // Logs go to stderr so generated codes can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::codes::CodeError> {
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Generate { count } => commands::codes::generate(count, &mut stdout)?,
        Commands::Check { code } => commands::codes::check(&code, &mut stdout)?,
    }
    Ok(())
}
