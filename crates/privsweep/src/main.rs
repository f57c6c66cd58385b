//! Privsweep - local privilege escalation audit tool.

use clap::{Parser, Subcommand};
use privsweep_common::Error;
use privsweep_gpp_creds::CheckReport;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "privsweep")]
#[command(
    author,
    version,
    about = "Audit a machine for locally recoverable credentials"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text)
    #[arg(long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the cached Group Policy history for recoverable credentials
    GppCreds {
        /// Policy-cache root to scan (defaults to the machine's Group
        /// Policy history folder)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    match cli.command {
        Commands::GppCreds { root } => {
            let root = match root {
                Some(root) => root,
                None => default_policy_cache_root()?,
            };
            info!("Scanning policy cache at {:?}", root);

            let report = privsweep_gpp_creds::run(&root);
            render(&report, &cli.format)?;
        }
    }

    Ok(())
}

/// Default scan root: the machine-wide Group Policy history folder.
///
/// Pre-Vista machines keep ALLUSERSPROFILE under "Documents and Settings"
/// with the cache nested one level down in "Application Data"; ProgramData
/// layouts hold it directly.
fn default_policy_cache_root() -> Result<PathBuf, Error> {
    let all_users = std::env::var("ALLUSERSPROFILE")
        .map_err(|_| Error::EnvironmentUnavailable("ALLUSERSPROFILE is not set".to_string()))?;

    let mut root = PathBuf::from(&all_users);
    if !all_users.contains("ProgramData") {
        root.push("Application Data");
    }
    root.push("Microsoft");
    root.push("Group Policy");
    root.push("History");
    Ok(root)
}

fn render(report: &CheckReport, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        _ => {
            println!("=== {} ===", report.name);
            if report.vulnerable {
                println!("Vulnerable: yes");
                for line in &report.details {
                    println!("  {}", line);
                }
            } else {
                println!("Vulnerable: no");
            }
            println!(
                "Scanned {} candidate file(s), {} credential record(s)",
                report.files_considered,
                report.findings.len()
            );
        }
    }
    Ok(())
}
