use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use hubspot_report::HubspotClient;
use hubspot_report::auth::token_store;
use hubspot_report::config::load_config;
use hubspot_report::export::{OutputFormat, write_rows};
use hubspot_report::report::run_report;

#[derive(Parser)]
#[command(name = "hubspot_report")]
#[command(about = "Marketing email stats, one row per distribution list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch emails and print report rows
    Run {
        /// Output format (defaults to the config file, then csv)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only emails created after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<String>,
    },

    /// Store the API bearer token in keyring
    SetToken,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::SetToken => {
            eprintln!("Paste API token (end with Ctrl-D):");
            let mut token = String::new();
            io::stdin().read_to_string(&mut token)?;
            let token = token.trim();
            if token.is_empty() {
                return Err(anyhow!("Empty token, nothing saved"));
            }
            token_store::save_api_token(token)?;
            println!("Saved API token");
            Ok(())
        }

        Command::Run {
            format,
            output,
            since,
        } => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            let settings = cfg.report_settings(since.as_deref())?;
            let token = token_store::resolve_api_token()?;
            let client = HubspotClient::new(cfg.api_base(), &token)?;

            let report = run_report(&client, &settings);
            for failure in &report.failures {
                error!("{failure}");
            }
            if report.is_unusable() {
                return Err(anyhow!(
                    "Listing failed before any rows were built; nothing written"
                ));
            }

            let format = format.unwrap_or_else(|| cfg.output_format());
            match output {
                Some(path) => {
                    let mut file = BufWriter::new(File::create(&path)?);
                    write_rows(&report.rows, format, &mut file)?;
                    file.flush()?;
                    info!("Wrote {} rows to {}", report.rows.len(), path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut lock = stdout.lock();
                    write_rows(&report.rows, format, &mut lock)?;
                    lock.flush()?;
                }
            }

            if !report.failures.is_empty() {
                eprintln!(
                    "{} of {} emails had problems ({} failures); see log for details",
                    report
                        .failures
                        .iter()
                        .filter_map(|f| f.email_id.as_deref())
                        .collect::<std::collections::BTreeSet<_>>()
                        .len(),
                    report.emails_seen,
                    report.failures.len()
                );
            }
            Ok(())
        }
    }
}
