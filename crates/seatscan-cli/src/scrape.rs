//! Local-run scrape command: the same pipeline the server exposes, wired to
//! stdout for debugging vendor adapters against live pages.

use anyhow::Context;
use clap::Args;

use seatscan_browser::BrowserLaunchConfig;
use seatscan_core::AppConfig;
use seatscan_scraper::{vendors, ArtifactSink, SessionOptions};

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Listing page URL to scrape.
    #[arg(long)]
    pub event_url: String,

    /// Adapter name; detected from the URL's host when omitted.
    #[arg(long)]
    pub vendor: Option<String>,

    /// Run with a visible browser window for debugging.
    #[arg(long)]
    pub headful: bool,

    /// Upload a failure screenshot to the configured artifact bucket.
    #[arg(long)]
    pub upload_artifacts: bool,
}

pub async fn run(config: &AppConfig, args: ScrapeArgs) -> anyhow::Result<()> {
    let adapter = match args.vendor.as_deref() {
        Some(name) => vendors::by_name(name)
            .with_context(|| format!("unknown vendor \"{name}\"; try the vendors command"))?,
        None => vendors::for_event_url(&args.event_url)
            .context("no vendor adapter matches the given event URL")?,
    };
    tracing::info!(vendor = adapter.name, "using adapter");

    let mut launch = BrowserLaunchConfig::from_app_config(config, adapter.stealth);
    if args.headful {
        launch.headless = false;
    }

    let sink = if args.upload_artifacts {
        match (&config.artifact_bucket, &config.artifact_region) {
            (Some(bucket), Some(region)) => Some(
                seatscan_artifact::S3ArtifactStore::new(bucket.clone(), region.clone()).await,
            ),
            _ => {
                anyhow::bail!(
                    "artifact upload requested but SEATSCAN_ARTIFACT_BUCKET/REGION are not set"
                );
            }
        }
    } else {
        None
    };
    let options = SessionOptions {
        artifact_sink: sink.as_ref().map(|s| s as &dyn ArtifactSink),
        screenshot_dir: config.screenshot_dir.clone(),
    };

    let records = seatscan_browser::scrape_event(&launch, adapter, &args.event_url, &options)
        .await
        .context("scrape failed")?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    eprintln!("{} listings", records.len());
    Ok(())
}
