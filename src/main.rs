use std::{error::Error, path::PathBuf};

use prestation_schedule::{
    api::client::ScheduleClient,
    config::Config,
    logger::init_logger,
    session::Session,
    timing::{
        overrides::{venue_now, Availability},
        schedule::ScheduleMap,
    },
};
use tracing::{error, info};

const USAGE: &str = "\
Usage: prestation-schedule --session <FILE> [--config <FILE>] [--prestation <ID>]

Replays an editing session and prints the resulting schedule. With --prestation
and an `api` section in the config, the session starts from the schedule stored
by the backend and the result is submitted back.";

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{}", USAGE);
        return Ok(());
    }
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config")?;
    let session_path: PathBuf = args.value_from_str("--session")?;
    let prestation: Option<String> = args.opt_value_from_str("--prestation")?;

    let config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    init_logger(&config.log_level);

    let session = Session::from_file(&session_path)?;

    let remote = match (prestation, &config.api) {
        (Some(prestation), Some(api)) => Some((ScheduleClient::new(api)?, prestation)),
        (Some(_), None) => {
            info!("No api section configured, working offline");
            None
        }
        _ => None,
    };

    let initial = match &remote {
        Some((client, prestation)) => {
            client
                .fetch_schedule_or_empty(prestation, config.locale)
                .await?
        }
        None => ScheduleMap::new(),
    };

    let payload = session.replay(config.editor_options(), initial)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);

    let availability = Availability::new(payload.schedule().clone());
    let now = venue_now(config.timezone()?);
    info!(open = availability.is_open(now), at = %now, "Venue status");

    if let Some((client, prestation)) = &remote {
        let response = client.submit_schedule(prestation, &payload).await?;
        info!(message = %response.message, "Schedule accepted");
    }
    Ok(())
}
