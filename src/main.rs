use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use soupnazi::{AddOutcome, JwtSyntax, LicenseStore, PathResolver};
use tracing_subscriber::EnvFilter;

/// Manage the per-user license file.
#[derive(Parser, Debug)]
#[command(name = "soupnazi", about = "Manage the per-user license store", version)]
struct Cli {
    /// License file to use instead of the resolved location.
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Log each step to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Print the license file location.
    Path,
    /// Create an empty license file if none exists.
    Init,
    /// Print stored licenses, one per line.
    List {
        /// Print a JSON array instead.
        #[arg(long)]
        json: bool,
    },
    /// Add a license unless it is already stored.
    Add {
        /// The license token (a compact JWT).
        token: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| PathResolver::system().resolve());
    let store = LicenseStore::new(path, JwtSyntax);

    match cli.command {
        Command::Path => println!("{}", store.path().display()),
        Command::Init => {
            let created = store
                .init()
                .with_context(|| format!("Failed to initialize {}", store.path().display()))?;
            if created {
                println!("Created {}", store.path().display());
            } else {
                println!("{} already exists", store.path().display());
            }
        }
        Command::List { json } => {
            let licenses = store.list().context("Failed to list licenses")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&licenses)?);
            } else {
                for license in licenses {
                    println!("{license}");
                }
            }
        }
        Command::Add { token } => {
            let outcome = store.add(&token).context("Failed to add license")?;
            match outcome {
                AddOutcome::Added => println!("Added license to {}", store.path().display()),
                AddOutcome::AlreadyPresent => println!("License already present"),
            }
        }
    }

    Ok(())
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
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_global_file() {
        let cli = Cli::try_parse_from(["soupnazi", "add", "a.b.c", "--file", "/tmp/x"])
            .expect("parse should succeed");
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x")));
        assert_eq!(
            cli.command,
            Command::Add {
                token: "a.b.c".to_string()
            }
        );
    }

    #[test]
    fn parses_list_json() {
        let cli = Cli::try_parse_from(["soupnazi", "list", "--json"]).expect("parse should succeed");
        assert_eq!(cli.command, Command::List { json: true });
        assert!(!cli.verbose);
    }

    #[test]
    fn requires_subcommand() {
        assert!(Cli::try_parse_from(["soupnazi"]).is_err());
    }
}
