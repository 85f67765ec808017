use anyhow::Context;
use clap::{value_parser, Arg, Command};
use ecoroute::config::ConfigManager;
use ecoroute::server;
use ecoroute::store::MapStore;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("ecoroute")
        .about("Cheapest-route search service over stored road maps")
        .arg(
            Arg::new("config")
                .long("config")
                .help("(Optional) Path to a TOML config file")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .help("(Optional) Override the listen port")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .help("(Optional) Override the map database file")
                .value_parser(value_parser!(String)),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let manager = ConfigManager::new();
    if let Some(path) = matches.get_one::<String>("config") {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading config from {}", path))?;
    }
    let mut config = manager.get();
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    if let Some(db) = matches.get_one::<String>("db") {
        config.server.db_path = db.into();
    }

    log::info!("using map database at {}", config.server.db_path.display());
    let store = Arc::new(MapStore::new(&config.server.db_path));

    server::serve(store, config.search, config.server.port).await;
    Ok(())
}
