//! rusty-curs CLI - convert between currencies at the official BNM rates
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert 100 EUR to USD and remember it
//! rusty-curs convert 100 eur usd --save
//!
//! # Unit rate only
//! rusty-curs rate usd mdl
//!
//! # Rates straight from the published file
//! rusty-curs --url https://example.org/rates.json currencies
//!
//! # Saved conversions
//! rusty-curs history list
//! rusty-curs history remove 0
//! rusty-curs history clear
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rusty_curs::config::Config;
use rusty_curs::converter;
use rusty_curs::currency::CurrencyCode;
use rusty_curs::format::NumberLocale;
use rusty_curs::rates::{FileRateSource, HttpRateSource};
use rusty_curs::session::{ConversionDisplay, Session};
use rusty_curs::storage::FileStore;
use std::path::PathBuf;
use std::process;

/// rusty-curs: currency converter over official BNM rates
#[derive(Parser)]
#[command(name = "rusty-curs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Currency converter over official BNM exchange rates", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Local rates.json to read
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Remote rates.json to fetch (overrides --rates)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Number format for results (plain, ro-md)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount, as typed
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,

        /// Source currency (default from config)
        #[arg(value_name = "FROM")]
        from: Option<String>,

        /// Target currency (default from config)
        #[arg(value_name = "TO")]
        to: Option<String>,

        /// Exchange FROM and TO before converting
        #[arg(long)]
        swap: bool,

        /// Record the conversion in history
        #[arg(short = 's', long)]
        save: bool,
    },

    /// Show the unit exchange rate between two currencies
    Rate {
        #[arg(value_name = "FROM")]
        from: String,

        #[arg(value_name = "TO")]
        to: String,
    },

    /// List currencies with a usable rate
    Currencies,

    /// Manage saved conversions
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved conversions, most recent first
    List,

    /// Delete one saved conversion
    Remove {
        /// Position as shown by `history list` (0 = most recent)
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Delete all saved conversions
    Clear,
}

enum CliRateSource {
    File(FileRateSource),
    Http(HttpRateSource),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref());
    config
        .ensure_dirs()
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;

    let locale = match cli.locale.as_deref() {
        Some(name) => NumberLocale::from_name(name)
            .with_context(|| format!("Unknown locale: {}", name))?,
        None => config.locale,
    };

    if cli.verbose {
        println!(
            "{} v{}",
            "rusty-curs".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!("Data dir: {}", config.data_dir.display().to_string().dimmed());
    }

    let mut session = Session::new(FileStore::new(&config.data_dir), locale);

    match cli.command {
        Commands::Convert {
            amount,
            from,
            to,
            swap,
            save,
        } => {
            let source = rate_source(&cli.rates, &cli.url, &config)?;
            load_rates(&mut session, &source).await;

            let mut from = from.unwrap_or_else(|| config.default_from.clone());
            let mut to = to.unwrap_or_else(|| config.default_to.clone());
            if swap {
                std::mem::swap(&mut from, &mut to);
            }
            convert(&mut session, &amount, &from, &to, save)
        }

        Commands::Rate { from, to } => {
            let source = rate_source(&cli.rates, &cli.url, &config)?;
            load_rates(&mut session, &source).await;
            show_rate(&session, &from, &to)
        }

        Commands::Currencies => {
            let source = rate_source(&cli.rates, &cli.url, &config)?;
            load_rates(&mut session, &source).await;
            list_currencies(&session)
        }

        Commands::History { action } => handle_history_action(&mut session, action),
    }
}

fn rate_source(
    rates: &Option<PathBuf>,
    url: &Option<String>,
    config: &Config,
) -> Result<CliRateSource> {
    if let Some(url) = url.as_ref().or(config.rates_url.as_ref()) {
        let source = HttpRateSource::with_timeout(url.clone(), config.timeout())
            .context("Failed to set up rate download")?;
        return Ok(CliRateSource::Http(source));
    }

    let path = rates.clone().unwrap_or_else(|| config.rates_path.clone());
    Ok(CliRateSource::File(FileRateSource::new(path)))
}

/// Failures leave the session without a table; commands render that state
async fn load_rates(session: &mut Session<FileStore>, source: &CliRateSource) {
    let loaded = match source {
        CliRateSource::File(s) => session.load_rates(s).await.map(|_| ()),
        CliRateSource::Http(s) => session.load_rates(s).await.map(|_| ()),
    };
    if let Err(e) = loaded {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }
}

fn convert(
    session: &mut Session<FileStore>,
    amount: &str,
    from: &str,
    to: &str,
    save: bool,
) -> Result<()> {
    let display = session.display(amount, from, to);
    print_display(&display);

    if let Some(notice) = session.notice() {
        println!("{}", notice.dimmed());
    }

    if save {
        match session.save(amount, from, to) {
            Ok(true) => println!("{} Saved to history", "✓".green().bold()),
            Ok(false) => println!("{} Already the latest history entry", "✓".green()),
            Err(e) => {
                let shown = ConversionDisplay::from(e);
                anyhow::bail!("Nothing saved (result: {})", shown.result);
            }
        }
    }

    Ok(())
}

fn show_rate(session: &Session<FileStore>, from: &str, to: &str) -> Result<()> {
    let table = session.rates().require_table()?;
    let from = CurrencyCode::new(from)?;
    let to = CurrencyCode::new(to)?;
    let rate = converter::unit_rate(table, &from, &to)?;
    println!("{}", rusty_curs::format::format_unit_rate(rate, &from, &to).bold());
    if let Some(notice) = session.notice() {
        println!("{}", notice.dimmed());
    }
    Ok(())
}

fn list_currencies(session: &Session<FileStore>) -> Result<()> {
    let table = session.rates().require_table()?;

    println!("{}", "Available Currencies".cyan().bold());
    println!("{}", "====================".cyan());
    for code in table.currencies() {
        let rate = table.rate(&code).unwrap_or_default();
        println!(
            "  {:<5} {:<4} {:>12.4} {}",
            code.display_code().bold(),
            code.symbol().unwrap_or(""),
            rate,
            CurrencyCode::base().display_code().dimmed()
        );
    }
    if let Some(notice) = session.notice() {
        println!();
        println!("{}", notice.dimmed());
    }
    Ok(())
}

fn handle_history_action(session: &mut Session<FileStore>, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            let history = session.history();
            if history.is_empty() {
                println!("{}", "No saved conversions".dimmed());
                return Ok(());
            }

            println!("{}", "Saved Conversions".cyan().bold());
            println!("{}", "=================".cyan());
            for (index, entry) in history.iter().enumerate() {
                println!(
                    "  {:>2}. {} {} = {} {}  {}",
                    index,
                    entry.amount,
                    entry.from,
                    entry.result.bold(),
                    entry.to,
                    entry.timestamp.dimmed()
                );
            }
        }

        HistoryAction::Remove { index } => {
            let removed = session.remove_history(index)?;
            println!(
                "{} Removed {} {} = {} {}",
                "✓".green().bold(),
                removed.amount,
                removed.from,
                removed.result,
                removed.to
            );
        }

        HistoryAction::Clear => {
            session.clear_history();
            println!("{} History cleared", "✓".green().bold());
        }
    }

    Ok(())
}

fn print_display(display: &ConversionDisplay) {
    println!("{}", display.result.bright_green().bold());
    if let Some(rate_info) = &display.rate_info {
        println!("{}", rate_info);
    }
}
