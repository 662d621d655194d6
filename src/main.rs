use anyhow::Result;
use epex_monitor::config::Config;
use epex_monitor::logging::init_logging;
use epex_monitor::pricing::SlotTable;
use epex_monitor::{PriceCell, PriceMonitor, PriceSensor};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Optional explicit config path as the first argument
    let mut config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e))?,
        None => Config::load()?,
    };
    config.apply_env_overrides();
    config.validate()?;

    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;
    info!(
        "EPEX Monitor {} starting up (area {})",
        env!("APP_VERSION"),
        config.entsoe.in_domain
    );

    let cell = PriceCell::new();
    let sensor = PriceSensor::new(&config.sensor, cell.clone());
    let mut monitor = PriceMonitor::new(&config, cell.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create monitor: {}", e))?;
    monitor.add_sensor(sensor.clone());
    let slots = monitor.slot_table();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor_task = tokio::spawn(async move { monitor.run(shutdown_rx).await });

    let web_task = spawn_web(&config, cell, slots, sensor);

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    let _ = shutdown_tx.send(true);
    if let Some(task) = web_task {
        task.abort();
    }

    match monitor_task.await? {
        Ok(()) => {
            info!("Monitor shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Monitor failed with error: {}", e);
            Err(anyhow::anyhow!("Monitor error: {}", e))
        }
    }
}

#[cfg(feature = "web")]
fn spawn_web(
    config: &Config,
    cell: PriceCell,
    slots: SlotTable,
    sensor: PriceSensor,
) -> Option<JoinHandle<()>> {
    if !config.web.enabled {
        return None;
    }
    let state = epex_monitor::web::AppState {
        cell,
        slots,
        sensor,
    };
    let host = config.web.host.clone();
    let port = config.web.port;
    Some(tokio::spawn(async move {
        if let Err(e) = epex_monitor::web::serve(state, &host, port).await {
            error!("Web server error: {}", e);
        }
    }))
}

#[cfg(not(feature = "web"))]
fn spawn_web(
    _config: &Config,
    _cell: PriceCell,
    _slots: SlotTable,
    _sensor: PriceSensor,
) -> Option<JoinHandle<()>> {
    None
}
