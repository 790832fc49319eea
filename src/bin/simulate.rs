//! Battle balance simulator CLI.
//!
//! Run Monte Carlo simulations of a single map node to analyze balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # 1000 normal fights on floor 1
//!   cargo run --bin simulate -- -n 200 --boss        # 200 boss fights
//!   cargo run --bin simulate -- --floor-boss --loop 3 --pressure 20
//!   cargo run --bin simulate -- --seed 42            # Reproducible run

use autofighter::rooms::RoomType;
use autofighter::simulator::{run_simulation, SimConfig};
use std::env;

#[tokio::main]
async fn main() -> autofighter::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              AUTOFIGHTER BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Party:          {}", config.party.join(", "));
    println!("  Room:           {:?}", config.node.room_type);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config).await?;
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json()?)?;
        println!("JSON report saved to: {}", filename);
    }
    Ok(())
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        let next = args.get(i + 1);
        let mut consumed = true;
        match (args[i].as_str(), next) {
            ("-n" | "--runs", Some(v)) => config.num_runs = v.parse().unwrap_or(1000),
            ("-s" | "--seed", Some(v)) => config.seed = v.parse().ok(),
            ("--floor", Some(v)) => config.node.floor = v.parse().unwrap_or(1),
            ("--index", Some(v)) => config.node.index = v.parse().unwrap_or(1),
            ("--loop", Some(v)) => config.node.loop_count = v.parse().unwrap_or(1),
            ("--pressure", Some(v)) => config.node.pressure = v.parse().unwrap_or(0),
            ("--party", Some(v)) => {
                config.party = v.split(',').map(str::to_string).collect();
            }
            (flag, _) => {
                consumed = false;
                match flag {
                    "--boss" => config.node.room_type = RoomType::BattleBoss,
                    "--floor-boss" => config.node.room_type = RoomType::BattleBossFloor,
                    "-v" | "--verbose" => config.verbosity = 2,
                    "-h" | "--help" => {
                        print_help();
                        std::process::exit(0);
                    }
                    "--quick" => config = SimConfig::boss_check(config.node.floor),
                    _ => {}
                }
            }
        }
        if consumed {
            i += 1;
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Autofighter Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of encounters (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --floor <N>         Floor number (default: 1)");
    println!("    --index <N>         Room index (default: 1)");
    println!("    --loop <N>          Loop count (default: 1)");
    println!("    --pressure <N>      Pressure level (default: 0)");
    println!("    --party <IDS>       Comma separated player ids (default: player)");
    println!("    --boss              Simulate a boss room");
    println!("    --floor-boss        Simulate a floor boss room");
    println!("    -v, --verbose       Print every run");
    println!("    --json              Save JSON report");
    println!("    --quick             100 boss fights on the current floor");
    println!("    -h, --help          Show this help");
}
