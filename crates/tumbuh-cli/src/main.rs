use std::io::Read;
use std::path::Path;

use eyre::Result;
use tumbuh_cli::config::{self, TumbuhConfig};
use tumbuh_cli::logging;
use tumbuh_cli::engine::Engine;
use tumbuh_cli::request::{Request, dispatch};

const USAGE: &str = "usage: tumbuh [--json] <assess <file|-> | screenings | config [init]>";

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json_flag = take_flag(&mut args, "--json");

    let mut config = logging::during_startup(json_flag, std::io::stderr, config::load_config)?;
    config.json_logs |= json_flag;
    logging::init(&config)?;

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["assess", source] => assess(&config, source),
        ["screenings"] => screenings(&config),
        ["config"] => {
            let path = config::config_path()?;
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ["config", "init"] => {
            config::save_config(&TumbuhConfig::default())?;
            println!("{}", config::config_path()?.display());
            Ok(())
        }
        _ => Err(eyre::eyre!(USAGE)),
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

fn assess(config: &TumbuhConfig, source: &str) -> Result<()> {
    let input = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(Path::new(source))
            .map_err(|e| eyre::eyre!("failed to read {source}: {e}"))?
    };

    let request: Request = serde_json::from_str(&input)?;
    let engine = Engine::new(config)?;
    let outcome = dispatch(&engine, &request)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn screenings(config: &TumbuhConfig) -> Result<()> {
    let engine = Engine::new(config)?;
    for screening in engine.screenings() {
        eprintln!("{}", screening.describe_tiers());
    }
    println!("{}", serde_json::to_string_pretty(&engine.summaries())?);
    Ok(())
}
