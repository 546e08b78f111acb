//! Sales dashboard command-line front end
//!
//! Loads the sales export, applies the dropdown-style filters given on the
//! command line and prints the dashboard, writes reports or emits chart hints.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use sales_dashboard::config::{Config, FileConfig};
use sales_dashboard::constants;
use sales_dashboard::{loader, reports, DashboardSession, DashboardView, FilterCriteria};

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard")]
#[command(about = "Sales reporting dashboard: filters, metrics, charts and rankings")]
struct Args {
    /// Sales CSV export (overrides dashboard.toml)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file
    #[arg(short, long, default_value = constants::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Dropdown selections; "Todos" means no constraint
#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Salesperson
    #[arg(long, default_value = constants::ALL_SENTINEL, global = true)]
    vendedor: String,

    /// Month (1-12)
    #[arg(long, default_value = constants::ALL_SENTINEL, global = true)]
    mes: String,

    /// Year
    #[arg(long, default_value = constants::ALL_SENTINEL, global = true)]
    ano: String,

    /// Invoice status
    #[arg(long, default_value = constants::ALL_SENTINEL, global = true)]
    situacao: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print metrics, chart series and the customer ranking (default)
    Summary,

    /// Write CSV reports and chart hints to the output directory
    Report {
        /// Output directory (overrides dashboard.toml)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List the values available for each filter
    Options,

    /// Print chart data and rendering hints as JSON
    Charts,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let command = args.command.unwrap_or(Command::Summary);
    let output_override = match &command {
        Command::Report { output_dir } => output_dir.clone(),
        _ => None,
    };

    let file_config = FileConfig::load_or_default(&args.config)?;
    let config = Config::from_file(&file_config, args.data, output_override)?;

    let table = loader::load_from_csv(&config.sales_csv).with_context(|| {
        format!(
            "Failed to load sales data from '{}'.\n\
             Pass --data <file.csv> or set data.sales_csv in {}.",
            config.sales_csv.display(),
            args.config.display()
        )
    })?;
    if table.is_empty() {
        tracing::warn!(path = %config.sales_csv.display(), "Sales export has no rows");
    }

    let session = DashboardSession::new(table, config.display.clone());

    match command {
        Command::Options => print_options(&session),
        Command::Summary => reports::print_summary(&render(&session, &args.filters)?),
        Command::Report { .. } => {
            let view = render(&session, &args.filters)?;
            println!("Generating reports in {}...\n", config.output_dir.display());
            reports::generate_all_reports(&config.output_dir, &view)?;
            println!("\nDone. Filters: {}", view.criteria.describe());
        }
        Command::Charts => {
            let view = render(&session, &args.filters)?;
            println!("{}", reports::chart_hints_json(&view)?);
        }
    }

    Ok(())
}

/// Parse the filter flags and run one render pass
fn render(session: &DashboardSession, filters: &FilterArgs) -> Result<DashboardView> {
    let criteria = FilterCriteria::from_selections(&filters.vendedor, &filters.mes, &filters.ano, &filters.situacao)
        .context("Invalid filter selection")?;
    Ok(session.render(&criteria))
}

/// Print dropdown options, one filter per line
fn print_options(session: &DashboardSession) {
    let options = session.options();
    println!("Vendedor:  {}", options.salespeople.join(" | "));
    println!("Mes:       {}", options.months.join(" | "));
    println!("Ano:       {}", options.years.join(" | "));
    println!("Situacao:  {}", options.statuses.join(" | "));
    println!("\n{} customer(s) in {} row(s)", options.customers.len() - 1, session.table().len());
}
