use anyhow::Result;
use phishfeed::{config::Config, fetch, pipeline, store::MongoStore};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) resolve config before any I/O ────────────────────────────
    let cfg = Config::from_env()?;
    info!(feed = %cfg.feed_url, "configured");

    // ─── 3) connect the store ────────────────────────────────────────
    let store = MongoStore::connect(&cfg).await?;

    // ─── 4) fetch the feed in full ───────────────────────────────────
    let client = Client::new();
    let body = fetch::download_feed(&client, &cfg.feed_url).await?;
    info!(bytes = body.len(), "feed downloaded");

    // ─── 5) parse, validate, upsert row by row ───────────────────────
    let summary = pipeline::run(&store, &body, cfg.max_rows).await;

    // machine-readable summary for whatever invoked us
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
