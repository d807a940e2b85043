#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use class_schedule_ics::{ColumnLayout, http_api};
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("SCHEDULE_ICS_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let layout = match std::env::var("SCHEDULE_ICS_LAYOUT") {
        Ok(path) => {
            let layout = ColumnLayout::load_json(&path)?;
            info!(%path, "loaded column layout");
            layout
        }
        Err(_) => ColumnLayout::default(),
    };

    info!("class-schedule-ics HTTP API listening on http://{addr}");
    http_api::serve(addr, layout).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
