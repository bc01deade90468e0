//! # skycal
//!
//! Terminal calendar of astronomical events for one year: USNO moon phases,
//! seasons and solar eclipses merged with the bundled event catalog.
//!
//! Subcommands print the month grid, the month list, one day's detail, or the
//! raw year sequence as JSON; `interactive` runs a navigation loop on stdin.
//!
//! Configuration layers built-in defaults, `skycal.conf` (JSON), environment
//! variables (`SKYCAL_*`, `.env` honoured) and flags, last one winning.

mod config;
mod render;
mod session;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use config::{Config, load_config, today};
use lib_skycal::aggregate::EventAggregator;
use lib_skycal::calendar::{CalendarView, MonthCursor};
use lib_skycal::events::without_quarter_phases;
use lib_skycal::loggers::setup_logging;
use lib_skycal::sources::{EventCatalog, UsnoClient};
use std::sync::Arc;
use tracing::{debug, info};

type UsnoAggregator = EventAggregator<UsnoClient, EventCatalog>;

#[derive(Parser, Debug)]
#[command(name = "skycal", version, about = "Astronomical event calendar")]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Mirror log records to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Month grid with the agenda of busy days.
    Month(MonthArgs),
    /// The month's events as a list.
    List(MonthArgs),
    /// Every event of one day.
    Day {
        /// Day of month.
        day: u32,
        #[command(flatten)]
        month: MonthArgs,
    },
    /// The year's full sequence as JSON.
    Events {
        /// Year (default: current).
        #[arg(long)]
        year: Option<i32>,
    },
    /// Navigate months interactively.
    Interactive(MonthArgs),
}

#[derive(Args, Debug, Clone, Copy)]
struct MonthArgs {
    /// Year (default: current).
    #[arg(long)]
    year: Option<i32>,
    /// Month 1-12 (default: current).
    #[arg(long)]
    month: Option<u32>,
}

impl MonthArgs {
    fn cursor(&self, today: NaiveDate) -> Result<MonthCursor> {
        let year = self.year.unwrap_or(today.year());
        let month = self.month.unwrap_or(today.month());
        if !(1..=12).contains(&month) {
            bail!("month must be 1-12, got {}", month);
        }
        match MonthCursor::new(year, month) {
            Some(cursor) => Ok(cursor),
            None => bail!("year {} is outside the supported calendar range", year),
        }
    }
}

fn build_aggregator(config: &Config) -> Result<UsnoAggregator> {
    let settings = config.source_settings();
    let aggregator = match &config.catalog_path {
        Some(path) => EventAggregator::usno_with_catalog_file(&settings, path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => EventAggregator::usno(&settings)?,
    };
    Ok(aggregator)
}

async fn load_view(aggregator: &UsnoAggregator, cursor: MonthCursor) -> CalendarView {
    let mut view = CalendarView::new(cursor);
    let events = aggregator.get_events(cursor.year()).await;
    view.set_events(cursor.year(), without_quarter_phases(events));
    view
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config).context("loading configuration")?;

    let _guard = setup_logging(&config.log_dir(), "skycal", config.log_level(), cli.verbose)?;
    debug!(?config, "configuration loaded");

    let zone = config.zone()?;
    let today = today(zone);
    let aggregator = build_aggregator(&config)?;

    match cli.command {
        Command::Month(args) => {
            let view = load_view(&aggregator, args.cursor(today)?).await;
            print!("{}", render::month(&view.month_grid(today)));
        }
        Command::List(args) => {
            let view = load_view(&aggregator, args.cursor(today)?).await;
            print!("{}", render::list(&view.cursor().label(), &view.list_rows()));
        }
        Command::Day { day, month } => {
            let cursor = month.cursor(today)?;
            if cursor.date(day).is_none() {
                bail!("{} has no day {}", cursor.label(), day);
            }
            let view = load_view(&aggregator, cursor).await;
            match view.day_detail(day) {
                Some(detail) => print!("{}", render::detail(&detail)),
                None => println!("No events on {}.", cursor.day_key(day).unwrap_or_default()),
            }
        }
        Command::Events { year } => {
            let year = year.unwrap_or(today.year());
            if MonthCursor::new(year, 1).is_none() {
                bail!("year {} is outside the supported calendar range", year);
            }
            let events = aggregator.get_events(year).await;
            info!(year, count = events.len(), "exporting events");
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        Command::Interactive(args) => {
            session::run(Arc::new(aggregator), args.cursor(today)?, zone).await?;
        }
    }

    Ok(())
}
