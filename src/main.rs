mod api;
mod chart;
mod config;
mod error;
mod loader;
mod reward;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use crate::api::{ApiClient, FuelType, ReportRow, SaleRecord};
use crate::chart::{bar_chart, register_style, ChartStyle};
use crate::config::{config_dir, config_file, load_config, CONFIG_TEMPLATE};
use crate::error::{DashError, Result};
use crate::loader::{LoadState, Loader, ReportFilter, ReportQuery};
use crate::reward::{RewardFlow, RewardState};

#[derive(Parser)]
#[command(name = "fueldash")]
#[command(version, about = "Fuel station sales and loyalty dashboard", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.fueldash or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template file
    Init,

    /// Show the resolved configuration
    Status,

    /// Record a sale on the backend
    LogSale {
        /// Fuel product sold
        #[arg(short, long, value_enum)]
        fuel_type: FuelType,

        /// Quantity sold (litres)
        #[arg(short, long)]
        quantity: f64,

        /// Price for this sale
        #[arg(short, long)]
        price: f64,

        /// Sale date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Register a new loyalty customer
    AddCustomer {
        /// Customer name
        #[arg(short, long)]
        name: String,
    },

    /// Credit loyalty points to a customer
    Reward {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Points to credit
        #[arg(short, long)]
        points: u32,

        /// Create the customer without prompting when the backend does
        /// not know them
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Aggregated quantity and revenue per fuel type
    Report {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Bar chart of quantity sold per fuel type
    ChartByType {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Bar chart of sales totals per day
    ChartOverTime {
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Args)]
struct RangeArgs {
    /// Reporting window
    #[arg(short, long, value_enum, default_value_t = ReportFilter::AllTime)]
    filter: ReportFilter,

    /// Range start (YYYY-MM-DD), used with --filter custom
    #[arg(long)]
    start_date: Option<String>,

    /// Range end (YYYY-MM-DD), used with --filter custom
    #[arg(long)]
    end_date: Option<String>,
}

impl RangeArgs {
    /// Parse the CLI strings into a query. Presence and ordering of the
    /// dates is the loader's concern, not clap's, so the canonical
    /// messages surface for missing or inverted ranges.
    fn to_query(&self) -> Result<ReportQuery> {
        let start_date = self.start_date.as_deref().map(parse_date).transpose()?;
        let end_date = self.end_date.as_deref().map(parse_date).transpose()?;
        Ok(ReportQuery {
            filter: self.filter,
            start_date,
            end_date,
        })
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::LogSale {
            fuel_type,
            quantity,
            price,
            date,
        } => cmd_log_sale(&cfg_dir, fuel_type, quantity, price, date),
        Commands::AddCustomer { name } => cmd_add_customer(&cfg_dir, &name),
        Commands::Reward { name, points, yes } => cmd_reward(&cfg_dir, &name, points, yes),
        Commands::Report { range } => cmd_report(&cfg_dir, &range),
        Commands::ChartByType { range } => cmd_chart_by_type(&cfg_dir, &range),
        Commands::ChartOverTime { range } => cmd_chart_over_time(&cfg_dir, &range),
    }
}

/// Initialize config directory with a template file
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(DashError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(config_file(cfg_dir), CONFIG_TEMPLATE)?;

    println!("Initialized fueldash config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point the dashboard at your backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Check the connection details:         fueldash status");
    println!();
    println!("Then record your first sale:");
    println!("  fueldash log-sale --fuel-type petrol --quantity 40 --price 250");

    Ok(())
}

/// Show the resolved configuration
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;

    println!("Dashboard Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    if !config_file(cfg_dir).exists() {
        println!("Config file:      none (using defaults, run 'fueldash init')");
    }
    println!("Backend API:      {}", config.api.base_url);
    println!("Timeout:          {}s", config.api.timeout_secs);
    println!("Currency:         {}", config.display.currency_symbol);

    Ok(())
}

/// Record a sale on the backend
fn cmd_log_sale(
    cfg_dir: &Path,
    fuel_type: FuelType,
    quantity: f64,
    price: f64,
    date: Option<String>,
) -> Result<()> {
    if quantity <= 0.0 {
        return Err(DashError::InvalidQuantity);
    }
    if price <= 0.0 {
        return Err(DashError::InvalidPrice);
    }

    let date = match date {
        Some(s) => parse_date(&s)?,
        None => today(),
    };

    let config = load_config(cfg_dir)?;
    let api = ApiClient::from_config(&config);

    let sale = SaleRecord {
        fuel_type,
        quantity,
        price,
        date,
    };
    api.log_sale(&sale)
        .map_err(|e| DashError::Operation(e.user_message("Failed to log sale")))?;

    let symbol = &config.display.currency_symbol;
    println!("Sale logged successfully!");
    println!("  Fuel:     {fuel_type}");
    println!("  Quantity: {quantity}");
    println!("  Price:    {symbol}{price:.2}");
    println!("  Date:     {date}");

    Ok(())
}

/// Register a new loyalty customer
fn cmd_add_customer(cfg_dir: &Path, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DashError::MissingCustomerName);
    }

    let config = load_config(cfg_dir)?;
    let api = ApiClient::from_config(&config);

    api.add_customer(name.trim())
        .map_err(|e| DashError::Operation(e.user_message("Failed to add customer")))?;

    println!("Customer added successfully!");
    Ok(())
}

/// Credit loyalty points to a customer
fn cmd_reward(cfg_dir: &Path, name: &str, points: u32, yes: bool) -> Result<()> {
    if name.trim().is_empty() || points == 0 {
        return Err(DashError::MissingRewardFields);
    }

    let config = load_config(cfg_dir)?;
    let api = ApiClient::from_config(&config);

    let mut flow = RewardFlow::new(name.trim(), points);
    flow.submit(|n, p| api.reward_points(n, p));

    if let RewardState::ConfirmingRecovery(message) = flow.state().clone() {
        let accepted = yes || confirm_recovery(&message)?;
        flow.resolve(
            accepted,
            |n| api.add_customer(n),
            |n, p| api.reward_points(n, p),
        );
        if accepted && *flow.state() == RewardState::Done {
            println!("Customer added successfully!");
        }
    }

    match flow.state() {
        RewardState::Done => {
            println!("Points rewarded successfully!");
            Ok(())
        }
        RewardState::Error(message) => Err(DashError::Operation(message.clone())),
        // submit/resolve always settle into Done or Error
        _ => Ok(()),
    }
}

/// Ask whether the unknown customer should be created. Declining (or a
/// closed stdin) leaves the original failure in place.
fn confirm_recovery(message: &str) -> Result<bool> {
    print!("{message}. Would you like to add them? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[derive(Tabled)]
struct ReportTableRow {
    #[tabled(rename = "FUEL TYPE")]
    fuel_type: String,
    #[tabled(rename = "QUANTITY")]
    quantity: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
}

/// Aggregated quantity and revenue per fuel type
fn cmd_report(cfg_dir: &Path, range: &RangeArgs) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let api = ApiClient::from_config(&config);
    let query = range.to_query()?;

    let loader: Loader<ReportRow> = Loader::new();
    let state = loader.load_with(&query, today(), |q| api.reports(q));

    let rows = match take_rows(state)? {
        Some(rows) => rows,
        None => return Ok(()),
    };

    let symbol = &config.display.currency_symbol;
    let table_rows: Vec<ReportTableRow> = rows
        .iter()
        .map(|row| ReportTableRow {
            fuel_type: row.fuel_type.clone(),
            quantity: row.total_quantity.to_string(),
            revenue: format!("{symbol}{:.2}", row.total_revenue),
        })
        .collect();

    let table = Table::new(table_rows).with(Style::rounded()).to_string();
    println!("{table}");

    let total_revenue: f64 = rows.iter().map(|row| row.total_revenue).sum();
    println!();
    println!(
        "Total: {} fuel type(s), {symbol}{total_revenue:.2} revenue",
        rows.len()
    );

    Ok(())
}

/// Bar chart of quantity sold per fuel type
fn cmd_chart_by_type(cfg_dir: &Path, range: &RangeArgs) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let api = ApiClient::from_config(&config);
    let query = range.to_query()?;

    register_style(ChartStyle::default());

    let loader = Loader::new();
    let state = loader.load_with(&query, today(), |q| api.sales_by_type(q));

    let rows = match take_rows(state)? {
        Some(rows) => rows,
        None => return Ok(()),
    };

    let series: Vec<(String, f64)> = rows
        .into_iter()
        .map(|row| (row.fuel_type, row.total_quantity))
        .collect();
    print!("{}", bar_chart("Sales by Fuel Type", &series));

    Ok(())
}

/// Bar chart of sales totals per day
fn cmd_chart_over_time(cfg_dir: &Path, range: &RangeArgs) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let api = ApiClient::from_config(&config);
    let query = range.to_query()?;

    register_style(ChartStyle::default());

    let loader = Loader::new();
    let state = loader.load_with(&query, today(), |q| api.sales_over_time(q));

    let rows = match take_rows(state)? {
        Some(rows) => rows,
        None => return Ok(()),
    };

    let series: Vec<(String, f64)> = rows
        .into_iter()
        .map(|row| (row.date, row.total_sales))
        .collect();
    print!("{}", bar_chart("Sales Over Time", &series));

    Ok(())
}

/// Unwrap a finished load. Ready yields the rows; Empty prints the fixed
/// no-data line and yields nothing; Error propagates its message.
fn take_rows<R>(state: LoadState<Vec<R>>) -> Result<Option<Vec<R>>> {
    match state {
        LoadState::Ready(rows) => Ok(Some(rows)),
        LoadState::Empty => {
            println!("No data available for selected period");
            Ok(None)
        }
        LoadState::Error(message) => Err(DashError::Operation(message)),
        // a finished load never settles in Idle or Loading
        LoadState::Idle | LoadState::Loading => Ok(None),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DashError::InvalidDate(s.to_string()))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
