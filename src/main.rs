use openaq_ingest::assembler;
use openaq_ingest::config::{Config, Mode};
use openaq_ingest::fetcher::Fetcher;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,openaq_ingest=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("OpenAQ ingestion pipeline starting...");

    // Load configuration
    let config = Config::load("config/config.yaml").map_err(|e| {
        anyhow::anyhow!(
            "Failed to load configuration: {}\n\n\
             Make sure:\n\
             1. config/config.yaml exists\n\
             2. All required environment variables are set (check .env.example)\n\
             3. Create a .env file if needed",
            e
        )
    })?;
    info!("Configuration loaded");

    // Maintenance mode gates the whole run; the pipeline itself never
    // sees the flag.
    if config.mode == Mode::Maintenance {
        warn!("Site is in maintenance mode, skipping pipeline run");
        return Ok(());
    }

    let region = config.region()?;
    let fetcher = Fetcher::new(&config.source)?;
    let readings = fetcher.fetch_latest_or_empty().await;

    // First pass without a pollutant selection to discover the options,
    // then one fresh pipeline run per pollutant, the way the dashboard
    // re-runs the pipeline on every selection.
    let overview = assembler::assemble(&readings, region, None);

    if overview.used_fallback {
        warn!("Upstream returned no usable data, showing fallback dataset");
    }

    println!(
        "Air quality — {} ({} records, map center {:.4},{:.4} zoom {:.1})",
        overview.region,
        overview.records.len(),
        overview.map_view.latitude,
        overview.map_view.longitude,
        overview.map_view.zoom
    );

    for pollutant in &overview.pollutant_options {
        let view = assembler::assemble(&readings, region, Some(pollutant.as_str()));
        let selected = match view.selected {
            Some(selected) => selected,
            None => continue,
        };

        let unit = selected.series.unit.clone().unwrap_or_default();
        println!(
            "\n{} — {} records across {} cities [{}]",
            selected.pollutant, selected.summary.records, selected.summary.cities, unit
        );

        for classified in &selected.classified {
            println!(
                "  {:<16} {:>8.1} {:<8} {}",
                classified.record.city, classified.record.value, classified.record.unit,
                classified.status
            );
        }

        for (status, count) in &selected.summary.status_counts {
            info!("{}: {} station(s) {}", selected.pollutant, count, status);
        }
    }

    info!("Pipeline run completed");
    Ok(())
}
