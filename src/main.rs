use std::{error::Error, sync::Arc};
use tokio::sync::watch;
use tracing::{info, warn};
use wbnode::config::run_options::get_args;
use wbnode::config::Config;
use wbnode::hub::{MqttLink, NodeLink};
use wbnode::poller::Poller;
use wbnode::provider::WeatherClient;
use wbnode::utils::start_log;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    start_log();

    info!("Starting WeatherBit node server");
    let config = Config::load(get_args())?;

    let link = Arc::new(MqttLink::connect(&config.hub));

    let notices = config.validate();
    if !notices.is_empty() {
        for notice in &notices {
            warn!("configuration: {}", notice.text);
            link.send_notice(&notice.key, &notice.text).await?;
        }
        // The notices only reach the hub once the link is flushed.
        link.disconnect().await?;
        return Err("node server is not configured".into());
    }
    link.clear_notices().await?;

    let client = WeatherClient::new(&config.provider, config.site.units);
    let poller = Poller::new(client, link.clone(), config.site, config.poll);
    poller.register_nodes().await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poll_task = tokio::spawn(async move { poller.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    info!("Stopping node server");
    let _ = shutdown_tx.send(true);
    let _ = poll_task.await;
    link.disconnect().await?;
    Ok(())
}
