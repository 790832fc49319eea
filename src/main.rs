//! Autofighter - resolves a single room and prints the result as JSON.

use autofighter::build_info;
use autofighter::character::Party;
use autofighter::combat::{BattleConfig, NoProgress, ProgressSink, TriggerRegistry};
use autofighter::error::{AutofighterError, Result};
use autofighter::plugins::damage_types::DamageTypeRegistry;
use autofighter::plugins::players::player_stats;
use autofighter::rooms::{
    BattleContext, BattleRoom, ChatRoom, MapNode, Purchase, RestRoom, RoomType, ShopRoom,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::warn;

#[derive(Debug)]
struct Options {
    node: MapNode,
    party: Vec<String>,
    relics: Vec<String>,
    cards: Vec<String>,
    gold: u64,
    seed: Option<u64>,
    pace_ms: Option<u64>,
    serve: Option<u16>,
    buy: Option<Purchase>,
    message: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            node: MapNode::default(),
            party: vec!["player".to_string()],
            relics: Vec::new(),
            cards: Vec::new(),
            gold: 0,
            seed: None,
            pace_ms: None,
            serve: None,
            buy: None,
            message: String::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'autofighter --help' for usage.");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let members = options
        .party
        .iter()
        .map(|id| player_stats(id))
        .collect::<Result<Vec<_>>>()?;
    let mut party = Party::new(members);
    party.relics = options.relics.clone();
    party.cards = options.cards.clone();
    party.gold = options.gold;

    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut triggers = TriggerRegistry::new();

    let json = match options.node.room_type {
        RoomType::Shop => serde_json::to_string_pretty(&ShopRoom.resolve(
            &mut party,
            options.buy.clone(),
            &mut triggers,
        ))?,
        RoomType::Rest => {
            serde_json::to_string_pretty(&RestRoom.resolve(&mut party, &mut triggers))?
        }
        RoomType::Chat => serde_json::to_string_pretty(&ChatRoom.resolve(
            &mut party,
            &options.message,
            &mut triggers,
        ))?,
        RoomType::Start => {
            return Err(AutofighterError::InvalidConfig(
                "the start room has nothing to resolve".into(),
            ))
        }
        _ => {
            let room = BattleRoom::for_node(options.node).ok_or_else(|| {
                AutofighterError::InvalidConfig("not a battle room".into())
            })?;
            let config = match (options.pace_ms, options.serve) {
                (Some(ms), _) => BattleConfig::paced(Duration::from_millis(ms)),
                (None, Some(_)) => BattleConfig::default(),
                (None, None) => BattleConfig::instant(),
            };
            let damage_types = DamageTypeRegistry::with_builtins();
            let mut progress = progress_sink(options.serve);
            let result = room
                .resolve(
                    &mut party,
                    None,
                    BattleContext {
                        config: &config,
                        damage_types: &damage_types,
                        triggers: &mut triggers,
                        progress: progress.as_mut(),
                    },
                    &mut rng,
                )
                .await;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{}", json);
    Ok(())
}

#[cfg(feature = "web")]
fn progress_sink(serve: Option<u16>) -> Box<dyn ProgressSink> {
    use autofighter::web::{start_web_server, WebServer};
    use std::sync::Arc;

    let Some(port) = serve else {
        return Box::new(NoProgress);
    };
    let server = Arc::new(WebServer::new());
    let sink = server.sink();
    tokio::spawn(async move {
        if let Err(err) = start_web_server(port, server).await {
            warn!(error = %err, "web server stopped");
        }
    });
    Box::new(sink)
}

#[cfg(not(feature = "web"))]
fn progress_sink(serve: Option<u16>) -> Box<dyn ProgressSink> {
    if serve.is_some() {
        warn!("built without the `web` feature, ignoring --serve");
    }
    Box::new(NoProgress)
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match flag {
            "--floor" => options.node.floor = parse_num(flag, &value()?)?,
            "--index" => options.node.index = parse_num(flag, &value()?)?,
            "--loop" => options.node.loop_count = parse_num(flag, &value()?)?,
            "--pressure" => options.node.pressure = parse_num(flag, &value()?)?,
            "--room" => options.node.room_type = parse_room(&value()?)?,
            "--boss" => options.node.room_type = RoomType::BattleBoss,
            "--floor-boss" => options.node.room_type = RoomType::BattleBossFloor,
            "--party" => {
                options.party = value()?.split(',').map(str::to_string).collect();
            }
            "--relic" => options.relics.push(value()?),
            "--card" => options.cards.push(value()?),
            "--gold" => options.gold = parse_num(flag, &value()?)?,
            "--buy" => {
                let raw = value()?;
                let (relic, cost) = raw
                    .split_once(':')
                    .ok_or_else(|| format!("--buy expects <relic>:<cost>, got {}", raw))?;
                options.buy = Some(Purchase {
                    relic: Some(relic.to_string()),
                    cost: parse_num(flag, cost)?,
                });
            }
            "--message" => options.message = value()?,
            "-s" | "--seed" => options.seed = Some(parse_num(flag, &value()?)?),
            "--pace-ms" => options.pace_ms = Some(parse_num(flag, &value()?)?),
            "--serve" => options.serve = Some(3000),
            s if s.starts_with("--serve=") => {
                options.serve = Some(parse_num("--serve", &s["--serve=".len()..])?);
            }
            "--version" | "-v" => {
                println!(
                    "autofighter {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn parse_num<T: std::str::FromStr>(flag: &str, raw: &str) -> std::result::Result<T, String> {
    raw.parse()
        .map_err(|_| format!("{} expects a number, got {}", flag, raw))
}

fn parse_room(raw: &str) -> std::result::Result<RoomType, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unknown room type: {}", raw))
}

fn print_help() {
    println!("Autofighter - turn-based autobattler rooms\n");
    println!("USAGE:");
    println!("    autofighter [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --floor <N>          Floor number (default: 1)");
    println!("    --index <N>          Room index on the floor (default: 1)");
    println!("    --loop <N>           Loop count (default: 1)");
    println!("    --pressure <N>       Pressure level (default: 0)");
    println!("    --room <TYPE>        battle-normal, battle-boss, battle-boss-floor,");
    println!("                         shop, rest or chat (default: battle-normal)");
    println!("    --boss               Shorthand for --room battle-boss");
    println!("    --floor-boss         Shorthand for --room battle-boss-floor");
    println!("    --party <IDS>        Comma separated player ids (default: player)");
    println!("    --relic <ID>         Add a relic (repeatable)");
    println!("    --card <ID>          Add a card (repeatable)");
    println!("    --gold <N>           Starting gold");
    println!("    --buy <ID>:<COST>    Relic to buy in a shop");
    println!("    --message <TEXT>     Chat room message");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    --pace-ms <MS>       Delay between turns");
    println!("    --serve[=PORT]       Stream the battle over WebSocket (feature `web`)");
    println!("    -v, --version        Show version information");
    println!("    -h, --help           Show this help");
}
