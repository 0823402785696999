mod api;
mod app;
mod config;
mod error;
mod events;
mod logger;
mod session;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::{crate_version, App as Cli, Arg};
use config::Config;
use log::LevelFilter;
use logger::{CustomLogger, LogBuffer};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("items-tui")
        .version(crate_version!())
        .about("Terminal client for a token-authenticated items API")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml and the session file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .short("u")
                .long("api-url")
                .value_name("URL")
                .help("Base URL of the items API, overriding the config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log debug output to the log pane"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(api_url) = matches.value_of("api-url") {
        config.set_api_url(api_url)?;
    }

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };
    let log = LogBuffer::default();
    CustomLogger::new(level, log.clone()).init()?;

    App::start(config, log).await?;
    Ok(())
}
