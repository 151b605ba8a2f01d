use cafe_dashboard::page::SummaryField;
use cafe_dashboard::storage::LocalStore;
use cafe_dashboard::theme::{remember_scheme, stored_scheme};
use cafe_dashboard::{App, ClientConfig, NotificationCenter, Page};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = ClientConfig::from_env()?;
    let mut store = LocalStore::open(&config.store_path).await;
    let (_scheme_tx, scheme_rx) = watch::channel(stored_scheme(&store));

    let page = if config.start_path == "/" {
        Page::dashboard()
    } else {
        Page::new(config.start_path.clone())
    };

    let notifications = Arc::new(NotificationCenter::new());
    let mut app = App::initialize(&config, page, scheme_rx, notifications.clone()).await?;

    info!("press Ctrl-C to stop");
    let page = app.page();
    let card_log = app.reporter().spawn("card-log", async move {
        let mut last = String::new();
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            let current = {
                let page = page.lock().await;
                SummaryField::ALL
                    .iter()
                    .filter_map(|field| {
                        page.summary()
                            .text(*field)
                            .map(|text| format!("{}: {text}", field.label()))
                    })
                    .collect::<Vec<_>>()
                    .join(" | ")
            };
            if current != last {
                info!("{current}");
                last = current;
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    card_log.abort();
    remember_scheme(&mut store, &*app.page().lock().await).await;
    app.teardown();
    info!(pending_notifications = notifications.len(), "shut down");

    Ok(())
}
