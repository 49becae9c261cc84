use std::time::Duration;

use taximeter_clock::Clock;
use taximeter_ports::Odometer;
use taximeter_runner::{Session, config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            config::load_config(path)?
        }
        None => config::load_default_config()?,
    };

    let session = Session::build(&config)?;
    let meter = session.meter.clone();

    meter.start_journey()?;
    let driver = tokio::spawn(session.driver(&config).run());

    let deadline = tokio::time::sleep(Duration::from_secs(config.duration_secs));
    tokio::pin!(deadline);
    let mut report = tokio::time::interval(Duration::from_secs(1));
    let mut last = None;

    loop {
        tokio::select! {
            _ = &mut deadline => {
                log::info!("Journey time is up");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, ending journey");
                break;
            }
            _ = report.tick() => {
                let fare = meter.current_fare();
                if fare != last {
                    if let Some(fare) = &fare {
                        log::info!("Fare {} at {}", fare, session.clock.now());
                    }
                    last = fare;
                }
            }
        }
    }

    driver.abort();
    let ending = meter.clone();
    tokio::task::spawn_blocking(move || ending.end_journey()).await??;

    if let (Some(fare), Some(journey)) = (meter.current_fare(), meter.journey()) {
        log::info!(
            "Final fare {} for {}m over {}s",
            fare,
            session.odometer.distance()?,
            journey.duration().unwrap_or_default()
        );
    }
    log::info!("Poller stats: {:?}", meter.poller_stats());
    Ok(())
}
