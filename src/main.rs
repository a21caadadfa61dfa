use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

use ultah_rs::{
    carousel::{BookPhase, CarouselConfig, CarouselController, CarouselState, CelebrationPolicy, TracingObserver},
    constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_PAGE_URL, DEFAULT_TIMEZONE, LOG_DIRECTIVE},
    handlers::{download_current, save_photo, share_current},
    models::Error,
    services::{BirthdayService, HttpBirthdaySource},
    utils::{
        message_formatter::{format_card, format_empty_state},
        timezone::{TimezoneError, parse_timezone},
    },
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Load configuration from environment
    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let source = match HttpBirthdaySource::new(&config.api_url, config.fetch_timeout) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to create birthday source: {}", e);
            std::process::exit(1);
        }
    };
    info!("Loading birthdays from {}", source.url());

    let service = BirthdayService::new(source, config.timezone);
    let carousel_config = CarouselConfig {
        celebration_policy: config.celebration_policy,
        ..Default::default()
    };
    let controller = CarouselController::new(carousel_config, Arc::new(TracingObserver));
    let mut updates = controller.subscribe();

    controller.load(async move { service.todays_birthdays().await });

    if let Err(e) = run_presentation(&controller, &mut updates, &config).await {
        error!("Presentation error: {}", e);
        std::process::exit(1);
    }

    controller.shutdown();
}

/// Configuration loaded from environment variables
struct Config {
    api_url: String,
    timezone: Tz,
    page_url: String,
    celebration_policy: CelebrationPolicy,
    photo_dir: Option<PathBuf>,
    fetch_timeout: Duration,
}

#[derive(Debug, Error)]
enum ConfigError {
    #[error("API_URL environment variable not set. Set it with: export API_URL=https://your-api-host")]
    MissingApiUrl,

    #[error(transparent)]
    Timezone(#[from] TimezoneError),

    #[error("Invalid CELEBRATION_POLICY: {0}")]
    CelebrationPolicy(String),

    #[error("Invalid FETCH_TIMEOUT_SECS '{0}', expected a whole number of seconds")]
    FetchTimeout(String),
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config, ConfigError> {
    let api_url = std::env::var("API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConfigError::MissingApiUrl)?;

    let timezone = parse_timezone(
        &std::env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
    )?;

    let page_url = std::env::var("PAGE_URL").unwrap_or_else(|_| DEFAULT_PAGE_URL.to_string());

    let celebration_policy = match std::env::var("CELEBRATION_POLICY") {
        Ok(value) => value
            .parse::<CelebrationPolicy>()
            .map_err(ConfigError::CelebrationPolicy)?,
        Err(_) => CelebrationPolicy::EveryChange,
    };

    let fetch_timeout = match std::env::var("FETCH_TIMEOUT_SECS") {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::FetchTimeout(value))?,
        Err(_) => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
    };

    // Optional: directory to save each shown photo into
    let photo_dir = std::env::var("PHOTO_DIR").ok().map(PathBuf::from);

    if let Some(dir) = &photo_dir {
        info!("Photos will be saved to {}", dir.display());
    }

    Ok(Config {
        api_url,
        timezone,
        page_url,
        celebration_policy,
        photo_dir,
        fetch_timeout,
    })
}

/// Wait for the book to open, then page through every birthday
async fn run_presentation(
    controller: &CarouselController,
    updates: &mut watch::Receiver<CarouselState>,
    config: &Config,
) -> Result<(), Error> {
    updates
        .wait_for(|state| state.book_phase == BookPhase::Open)
        .await?;

    loop {
        let state = controller.snapshot();
        let Some(person) = state.current() else {
            println!("{}", format_empty_state());
            return Ok(());
        };

        println!("\n{}\n", format_card(person, state.current_index, state.len()));

        if let Some(payload) = share_current(controller, &config.page_url) {
            info!("Share: {} | {} | {}", payload.title, payload.text, payload.url);
        }

        if let (Some(dir), Some(download)) = (&config.photo_dir, download_current(controller)) {
            if let Err(e) = save_photo(&download, dir).await {
                warn!("Failed to save photo for {}: {}", person.name, e);
            }
        }

        if !controller.go_next() {
            info!("Reached the last page");
            return Ok(());
        }

        updates.wait_for(|state| !state.is_animating).await?;
    }
}
