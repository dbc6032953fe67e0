use egostrategy_querygen::config::{QueryConfig, DEFAULT_DATA_ROOT, DEFAULT_FROM_DATE, DEFAULT_TO_DATE};
use egostrategy_querygen::data_provider::QueryDataProvider;
use egostrategy_querygen::models::trading_data::TradingData;
use egostrategy_querygen::services::query_service;
use egostrategy_querygen::util::{self, arrow_utils, json_utils};

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::{info, warn};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("days", matches)) => run_days(matches),
        Some(("generate", matches)) => run_generate(matches),
        Some(("inspect", matches)) => run_inspect(matches),
        _ => {
            info!("No command specified. Use --help for usage information.");
            Ok(())
        }
    }
}

fn build_cli() -> Command<'static> {
    Command::new("QueryGen")
        .version("1.0.0")
        .author("DataHub Team")
        .about("Trading data query list generator")
        .subcommand(
            Command::new("days")
                .about("Print the day list for a date range")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("DATE")
                        .help("First day (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value(DEFAULT_FROM_DATE),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("DATE")
                        .help("Last day, inclusive (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value(DEFAULT_TO_DATE),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate the query list for an exchange")
                .arg(
                    Arg::new("exchange")
                        .short('e')
                        .long("exchange")
                        .value_name("EXCHANGE")
                        .help("Exchange identifier attached to every record")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("DATE")
                        .help("First day (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value(DEFAULT_FROM_DATE),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("DATE")
                        .help("Last day, inclusive (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value(DEFAULT_TO_DATE),
                )
                .arg(
                    Arg::new("symbols")
                        .short('s')
                        .long("symbols")
                        .value_name("SYMBOLS")
                        .help("Comma separated symbols, e.g. ETH/USDT,BTC/USDT")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("intervals")
                        .short('i')
                        .long("intervals")
                        .value_name("INTERVALS")
                        .help("Comma separated time intervals, e.g. 5m,15m")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("root")
                        .short('r')
                        .long("root")
                        .value_name("PATH")
                        .help("Storage root written into every record")
                        .takes_value(true)
                        .default_value(DEFAULT_DATA_ROOT),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write records to FILE instead of stdout")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output file format")
                        .takes_value(true)
                        .possible_values(["json", "arrow"])
                        .requires_if("arrow", "output")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect a query list saved as Arrow")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_name("FILE")
                        .help("Arrow file written by `generate --format arrow`")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::new("symbol")
                        .short('s')
                        .long("symbol")
                        .value_name("SYMBOL")
                        .help("Only show records for this symbol")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("limit")
                        .short('l')
                        .long("limit")
                        .value_name("LIMIT")
                        .help("Limit the number of records to display")
                        .takes_value(true)
                        .default_value("10"),
                ),
        )
}

fn run_days(matches: &ArgMatches) -> Result<()> {
    let from = matches.value_of("from").unwrap_or(DEFAULT_FROM_DATE);
    let to = matches.value_of("to").unwrap_or(DEFAULT_TO_DATE);

    let days = util::build_day_list(from, to)
        .with_context(|| format!("Failed to build day list {} -> {}", from, to))?;

    for day in &days {
        println!("{}", day);
    }
    info!("{} days", days.len());

    Ok(())
}

fn run_generate(matches: &ArgMatches) -> Result<()> {
    let exchange = matches.value_of("exchange").context("--exchange is required")?;
    let from = matches.value_of("from").unwrap_or(DEFAULT_FROM_DATE);
    let to = matches.value_of("to").unwrap_or(DEFAULT_TO_DATE);
    let root = matches.value_of("root").unwrap_or(DEFAULT_DATA_ROOT);

    let mut config = QueryConfig::new()
        .with_date_range(from, to)
        .with_data_root(root);

    if let Some(symbols) = matches.value_of("symbols") {
        config = config.with_symbols(util::parse_list(symbols));
    }
    if let Some(intervals) = matches.value_of("intervals") {
        config = config.with_time_intervals(util::parse_list(intervals));
    }

    config.validate().context("Invalid query configuration")?;

    if config.symbols.is_empty() || config.time_intervals.is_empty() {
        warn!("No symbols or intervals configured, the query list will be empty");
    }

    let data_list = query_service::build_query_data_list_with(&config, exchange)?;

    match matches.value_of("output") {
        Some(path) => match matches.value_of("format").unwrap_or("json") {
            "arrow" => arrow_utils::save_trading_data_to_arrow(&data_list, path)
                .with_context(|| format!("Failed to write {}", path))?,
            _ => json_utils::save_trading_data_to_json(&data_list, path)
                .with_context(|| format!("Failed to write {}", path))?,
        },
        None => println!("{}", serde_json::to_string_pretty(&data_list)?),
    }

    Ok(())
}

fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let input = matches.value_of("input").context("--input is required")?;
    let limit = matches
        .value_of("limit")
        .unwrap_or("10")
        .parse::<usize>()
        .unwrap_or(10);

    let provider = QueryDataProvider::load_from_file(input)
        .with_context(|| format!("Failed to load {}", input))?;

    info!("Found {} query records", provider.len());
    info!("Symbols: {}", provider.symbols().join(", "));

    let days = provider.days();
    if let (Some(first), Some(last)) = (days.first(), days.last()) {
        info!("Days: {} -> {} ({} days)", first, last, days.len());
    }

    let records: Vec<&TradingData> = match matches.value_of("symbol") {
        Some(symbol) => provider.get_records_by_symbol(symbol),
        None => provider.get_all_records().iter().collect(),
    };

    info!("{:-<80}", "");
    info!("{:<10} {:<12} {:<8} {:<20} {}", "Exchange", "Symbol", "Interval", "Timestamp", "Root");
    info!("{:-<80}", "");

    for record in records.iter().take(limit) {
        info!(
            "{:<10} {:<12} {:<8} {:<20} {}",
            record.exchange(),
            record.symbol(),
            record.time_interval(),
            record.timestamp(),
            record.data_root()
        );
    }

    if records.len() > limit {
        info!("... and {} more records", records.len() - limit);
    } else if records.is_empty() {
        info!("No records matched");
    }

    Ok(())
}
