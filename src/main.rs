use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use asyncimage::application::FetchImageUseCase;
use asyncimage::domain::{ImageCachePort, LoadingState};
use asyncimage::infrastructure::{
    AppConfig, CliArgs, ConfigStore, HttpImageFetcher, RasterImageDecoder, SessionImageCache,
};
use asyncimage::presentation::ImageViewModel;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let store = ConfigStore::new()?;
    let mut config = store.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(
        version = asyncimage::VERSION,
        policy = %config.caching_policy,
        "Starting asyncimage"
    );

    let cache = SessionImageCache::shared();

    let fetcher = HttpImageFetcher::with_config(&config.network.to_fetcher_config())?;
    let use_case = FetchImageUseCase::new(
        Arc::new(fetcher),
        cache.clone(),
        Arc::new(RasterImageDecoder::new()),
    );

    let mut failures = 0_usize;
    for round in 0..args.repeat {
        if round > 0 && args.clear_cache {
            debug!(round, "Clearing session cache");
            cache.remove_all_cached_images();
        }

        for url in &args.urls {
            let view_model = Arc::new(ImageViewModel::new(use_case.clone()));
            let mut task = view_model.spawn_fetch(config.caching_policy, Some(url.clone()));

            match task.finished().await {
                Some(LoadingState::Success(image)) => {
                    let (width, height) = image.dimensions();
                    println!("ok {url} {width}x{height} ({})", image.source);
                }
                Some(LoadingState::Failure(error)) => {
                    failures += 1;
                    println!("error {url}: {error}");
                }
                Some(LoadingState::Loading) | None => {
                    failures += 1;
                    warn!(url = %url, "Fetch did not complete");
                }
            }
        }
    }

    info!(stats = %cache.stats(), failures, "Finished");

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
