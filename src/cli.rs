//! CLI definition and dispatch.

use chrono::Days;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_record_adapter::write_records;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig};
use crate::domain::config_validation::{parse_date, validate_backtest_config};
use crate::domain::error::RibbonError;
use crate::domain::metrics::Metrics;
use crate::domain::recorder::MemoryRecorder;
use crate::domain::screen::ScreenParams;
use crate::domain::series::CodeSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

/// Calendar days of extra history fetched before the start date so the
/// ribbon and the snapshots are warm from the first session.
const LOOKBACK_DAYS: u64 = 60;

#[derive(Parser, Debug)]
#[command(name = "ribbontrader", about = "Moving-average ribbon long/short backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Where to write the daily observation CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List codes available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_cmd(&config, output.as_ref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = RibbonError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, RibbonError> {
    let start_date = parse_date(
        adapter.get_string("backtest", "start_date").as_deref(),
        "start_date",
    )?;
    let end_date = parse_date(
        adapter.get_string("backtest", "end_date").as_deref(),
        "end_date",
    )?;
    let benchmark = adapter
        .get_string("strategy", "benchmark")
        .ok_or_else(|| RibbonError::ConfigMissing {
            section: "strategy".into(),
            key: "benchmark".into(),
        })?
        .trim()
        .to_uppercase();

    Ok(BacktestConfig {
        start_date,
        end_date,
        initial_capital: adapter.get_double("backtest", "initial_capital", 100_000.0),
        benchmark,
        screen: build_screen_params(adapter),
    })
}

pub fn build_screen_params(adapter: &dyn ConfigPort) -> ScreenParams {
    let defaults = ScreenParams::default();
    ScreenParams {
        min_market_cap: adapter.get_double("screen", "min_market_cap", defaults.min_market_cap),
        min_price: adapter.get_double("screen", "min_price", defaults.min_price),
        max_price: adapter.get_double("screen", "max_price", defaults.max_price),
        min_volume: adapter.get_int("screen", "min_volume", defaults.min_volume),
    }
}

pub fn resolve_codes(config: &dyn ConfigPort) -> Vec<String> {
    config
        .get_string("strategy", "codes")
        .map(|codes| {
            codes
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn run_backtest_cmd(config_path: &PathBuf, output: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let codes = resolve_codes(&adapter);
    let data_dir = match adapter.get_string("backtest", "data_dir") {
        Some(d) => d,
        None => {
            let e = RibbonError::ConfigMissing {
                section: "backtest".into(),
                key: "data_dir".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = CsvDataAdapter::new(PathBuf::from(data_dir));

    // Reach back before the start date so the first sessions have history.
    let fetch_start = bt_config
        .start_date
        .checked_sub_days(Days::new(LOOKBACK_DAYS))
        .unwrap_or(bt_config.start_date);

    let mut series = Vec::with_capacity(codes.len() + 1);
    match data_port.fetch_bars(&bt_config.benchmark, fetch_start, bt_config.end_date) {
        Ok(bars) if !bars.is_empty() => {
            series.push(CodeSeries::new(bt_config.benchmark.clone(), bars));
        }
        Ok(_) => {
            let e = RibbonError::NoData {
                code: bt_config.benchmark.clone(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let mut loaded = 0usize;
    for code in &codes {
        if *code == bt_config.benchmark {
            continue;
        }
        match data_port.fetch_bars(code, fetch_start, bt_config.end_date) {
            Ok(bars) if !bars.is_empty() => {
                eprintln!("  {}: {} bars", code, bars.len());
                series.push(CodeSeries::new(code.clone(), bars));
                loaded += 1;
            }
            Ok(_) => eprintln!("warning: skipping {} (no data found)", code),
            Err(e) => eprintln!("warning: skipping {} ({})", code, e),
        }
    }

    if loaded == 0 {
        let e = RibbonError::Data {
            reason: "no tradable codes with data".into(),
        };
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!(
        "Running backtest: {} codes, {} to {}",
        loaded, bt_config.start_date, bt_config.end_date
    );

    let mut recorder = MemoryRecorder::new();
    let result = match run_backtest(&series, &bt_config, &mut recorder) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let metrics = Metrics::compute(&result.portfolio);
    eprintln!("\n=== Results ===");
    eprintln!("Sessions:         {}", result.days);
    eprintln!("Total Return:     {:.2}%", metrics.total_return * 100.0);
    eprintln!("Annualized:       {:.2}%", metrics.annualized_return * 100.0);
    eprintln!("Max Drawdown:     -{:.1}%", metrics.max_drawdown * 100.0);
    eprintln!("Open Positions:   {}", result.portfolio.position_count());

    let output = output
        .cloned()
        .or_else(|| adapter.get_string("record", "output").map(PathBuf::from));
    if let Some(path) = output {
        match write_records(&path, &recorder.records) {
            Ok(()) => eprintln!("\nDaily records written to: {}", path.display()),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nBacktest:");
    eprintln!("  {} to {}", bt_config.start_date, bt_config.end_date);
    eprintln!("  initial capital: {}", bt_config.initial_capital);
    eprintln!("  benchmark: {}", bt_config.benchmark);

    eprintln!("\nScreen:");
    eprintln!("  min market cap: {}", bt_config.screen.min_market_cap);
    eprintln!(
        "  price range: {} to {}",
        bt_config.screen.min_price, bt_config.screen.max_price
    );
    eprintln!("  min volume: {}", bt_config.screen.min_volume);

    eprintln!("\nUniverse:");
    eprintln!("  codes: {}", resolve_codes(&adapter).join(", "));

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_backtest_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_dir = match adapter.get_string("backtest", "data_dir") {
        Some(d) => d,
        None => {
            let e = RibbonError::ConfigMissing {
                section: "backtest".into(),
                key: "data_dir".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvDataAdapter::new(PathBuf::from(data_dir));
    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}
