use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use common::money::is_known_currency;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::config::AppConfig;

pub mod commands;

use commands::{StrategyChoice, process, project, serve, simulate};

#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Recurring transaction projection and debt payoff planning")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "FINTRACK_CONFIG")]
        config: Option<PathBuf>,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,

        /// Ledger snapshot to serve
        #[arg(short, long)]
        data_file: Option<PathBuf>,
    },
    /// Print the due dates of a recurring rule
    Project {
        /// YAML or JSON file holding one recurring rule
        #[arg(short, long)]
        rule: PathBuf,

        /// Last date to include (defaults to today)
        #[arg(short, long)]
        as_of: Option<NaiveDate>,

        /// Currency used to format amounts (defaults to the configured one)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Simulate paying off a list of debts
    Simulate {
        /// YAML or JSON file holding a list of debts
        #[arg(short, long)]
        debts: PathBuf,

        /// Monthly amount on top of the minimum payments
        #[arg(short, long, default_value = "0")]
        extra_payment: Decimal,

        #[arg(short, long, value_enum, default_value_t = StrategyChoice::Both)]
        strategy: StrategyChoice,

        /// First simulated month (defaults to today)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Currency used to format amounts (defaults to the configured one)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Book every due recurring occurrence in a ledger file
    Process {
        /// Ledger snapshot (YAML or JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Book occurrences due on or before this date (defaults to today)
        #[arg(short, long)]
        as_of: Option<NaiveDate>,

        /// Write the updated ledger back to the data file
        #[arg(short, long)]
        write: bool,

        /// Currency used to format amounts (defaults to the configured one)
        #[arg(long)]
        currency: Option<String>,
    },
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Picks the `--currency` flag when given, the configured currency otherwise.
fn resolve_currency(currency: Option<String>) -> Result<String> {
    match currency {
        Some(code) if is_known_currency(&code) => Ok(code),
        Some(code) => bail!("Unknown currency code '{}'", code),
        None => Ok(AppConfig::load(None)?.currency_code),
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                config,
                bind_address,
                data_file,
            } => {
                serve(config.as_deref(), bind_address, data_file).await?;
            }
            Commands::Project { rule, as_of, currency } => {
                let currency = resolve_currency(currency)?;
                let output = project(&rule, as_of.unwrap_or_else(today), &currency)?;
                print!("{}", output);
            }
            Commands::Simulate {
                debts,
                extra_payment,
                strategy,
                start_date,
                currency,
            } => {
                let currency = resolve_currency(currency)?;
                let output = simulate(
                    &debts,
                    extra_payment,
                    strategy,
                    start_date.unwrap_or_else(today),
                    &currency,
                )?;
                print!("{}", output);
            }
            Commands::Process {
                data,
                as_of,
                write,
                currency,
            } => {
                let currency = resolve_currency(currency)?;
                let output = process(&data, as_of.unwrap_or_else(today), write, &currency)?;
                print!("{}", output);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_flag_wins_over_config() {
        assert_eq!(resolve_currency(Some("EUR".to_string())).unwrap(), "EUR");
    }

    #[test]
    fn test_unknown_currency_flag_is_rejected() {
        let err = resolve_currency(Some("XYZQ".to_string())).unwrap_err();
        assert!(err.to_string().contains("XYZQ"));
    }

    #[test]
    fn test_currency_falls_back_to_config() {
        let currency = resolve_currency(None).unwrap();
        assert!(is_known_currency(&currency));
    }

    #[test]
    fn test_parse_project_without_currency() {
        let cli = Cli::try_parse_from(["fintrack", "project", "--rule", "rent.yaml"]).unwrap();
        match cli.command {
            Commands::Project { currency, .. } => assert_eq!(currency, None),
            _ => panic!("expected the project command"),
        }
    }
}
