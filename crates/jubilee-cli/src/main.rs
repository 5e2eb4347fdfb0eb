//! jubilee CLI tool
//!
//! Counts blocks and prints Jubilee events.
//!
//! Usage:
//!   jubilee count <chain> [times]
//!   jubilee scenario
//!   jubilee schedule [len]
//!   jubilee monitor [rounds]

use jubilee_core::{JubileeCounter, JubileeSchedule};
use jubilee_monitor::{JubileeConfig, Monitor, MonitorHandle, SimulatedSource};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default number of terms in a printed schedule.
const DEFAULT_SCHEDULE_LEN: usize = 15;

/// Default number of simulated monitoring rounds.
const DEFAULT_ROUNDS: u32 = 3;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Count { chain: String, times: u64 },
    Scenario,
    Schedule { len: usize },
    Monitor { rounds: u32 },
    Help,
}

fn print_usage() {
    eprintln!("jubilee - Fibonacci Jubilee block counter");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  jubilee count <chain> [times]   Count blocks on a chain (default 1)");
    eprintln!("  jubilee scenario                Count 13 blocks on ethereum and summarize");
    eprintln!("  jubilee schedule [len]          Print scheduling windows (default 15 terms)");
    eprintln!("  jubilee monitor [rounds]        Run simulated monitoring rounds (default 3)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  JUBILEE_RESET_THRESHOLD  Term that resets a counter (default: 13)");
    eprintln!("  JUBILEE_CHAINS           Comma separated chains for monitor");
    eprintln!("  JUBILEE_SEED             Seed for simulated heights (default: 42)");
    eprintln!("  RUST_LOG                 Log filter (default: jubilee=info)");
}

fn parse_number<T: std::str::FromStr>(arg: Option<&String>, name: &str, default: T) -> Result<T, String> {
    match arg {
        Some(s) => s
            .parse()
            .map_err(|_| format!("Error: {} must be a non-negative integer, got {:?}", name, s)),
        None => Ok(default),
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(cmd) = args.get(1) else {
        return Err("Error: missing command".to_string());
    };

    match cmd.as_str() {
        "count" => {
            let chain = args
                .get(2)
                .ok_or_else(|| "Error: count requires a chain argument".to_string())?
                .clone();
            let times = parse_number(args.get(3), "times", 1)?;
            Ok(Command::Count { chain, times })
        }
        "scenario" => Ok(Command::Scenario),
        "schedule" => Ok(Command::Schedule {
            len: parse_number(args.get(2), "len", DEFAULT_SCHEDULE_LEN)?,
        }),
        "monitor" => Ok(Command::Monitor {
            rounds: parse_number(args.get(2), "rounds", DEFAULT_ROUNDS)?,
        }),
        "-h" | "--help" | "help" => Ok(Command::Help),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn run_count(config: &JubileeConfig, chain: &str, times: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut counter = JubileeCounter::with_policy(config.policy);
    for _ in 0..times {
        let result = counter.count_block(chain)?;
        print_json(&result, false)?;
    }
    Ok(())
}

fn run_scenario(config: &JubileeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut counter = JubileeCounter::with_policy(config.policy);
    let mut jubilees = Vec::new();
    let mut plain = Vec::new();

    for _ in 0..13 {
        let result = counter.count_block("ethereum")?;
        if result.jubilee {
            jubilees.push(result.count);
        } else {
            plain.push(result.count);
        }
    }

    println!("Jubilee scenario (ethereum, 13 blocks)");
    println!("======================================");
    println!("  Jubilee counts:  {:?}", jubilees);
    println!("  Plain counts:    {:?}", plain);
    println!("  Counter now:     {}", counter.count("ethereum"));
    println!("  Events recorded: {}", counter.jubilee_count());
    Ok(())
}

async fn run_monitor(config: &JubileeConfig, rounds: u32) -> Result<(), Box<dyn std::error::Error>> {
    let handle = MonitorHandle::new(Monitor::from_config(config));
    let mut source = SimulatedSource::new(config.seed);

    for round in 1..=rounds {
        let reports = handle.monitor_all(&mut source).await?;
        let fired: usize = reports.values().map(|r| r.new_jubilees.len()).sum();
        tracing::info!(round, chains = reports.len(), jubilees = fired, "monitoring round complete");
    }

    print_json(&handle.global_status().await, true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jubilee=info,jubilee_core=info,jubilee_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let config = JubileeConfig::from_env()?;

    match command {
        Command::Count { chain, times } => run_count(&config, &chain, times)?,
        Command::Scenario => run_scenario(&config)?,
        Command::Schedule { len } => print_json(&JubileeSchedule::build(len), true)?,
        Command::Monitor { rounds } => run_monitor(&config, rounds).await?,
        Command::Help => print_usage(),
    }

    Ok(())
}
