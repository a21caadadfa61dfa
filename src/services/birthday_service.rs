/// Birthday service - fetches student records and keeps today's birthdays
use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::BIRTHDAY_ENDPOINT;
use crate::models::PersonRecord;
use crate::utils::datetime::is_birthday_on;
use crate::utils::timezone::today_in;

/// Errors raised while loading birthday data
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to birthday endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Birthday endpoint answered with status {0}")]
    Status(u16),
}

/// Anything that can hand out the full list of student records
pub trait BirthdaySource: Send + Sync + 'static {
    /// Fetch every record the source knows about
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<PersonRecord>, FetchError>> + Send;
}

/// Reads records from the public birthday endpoint
#[derive(Debug, Clone)]
pub struct HttpBirthdaySource {
    client: reqwest::Client,
    url: String,
}

impl HttpBirthdaySource {
    /// Create a source for `{base_url}/api/public/ultah`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url: endpoint_url(base_url),
        })
    }

    /// The full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl BirthdaySource for HttpBirthdaySource {
    async fn fetch_records(&self) -> Result<Vec<PersonRecord>, FetchError> {
        debug!("Fetching birthday data from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(parse_records(body))
    }
}

/// Join a base URL and the birthday endpoint path
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), BIRTHDAY_ENDPOINT)
}

/// Leniently decode the endpoint body.
///
/// A body that is not an array yields no records; array entries that do not
/// decode are skipped.
pub fn parse_records(body: Value) -> Vec<PersonRecord> {
    let Value::Array(entries) = body else {
        warn!("Birthday endpoint did not return an array, treating as empty");
        return Vec::new();
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            serde_json::from_value::<PersonRecord>(entry)
                .map_err(|e| debug!("Skipping record {}: {}", idx, e))
                .ok()
        })
        .collect()
}

/// Keep only records whose birth date falls on `today`
pub fn filter_todays_birthdays(records: Vec<PersonRecord>, today: NaiveDate) -> Vec<PersonRecord> {
    records
        .into_iter()
        .filter(|record| is_birthday_on(&record.birth_date, today))
        .collect()
}

/// Service for birthday-related operations
#[derive(Debug)]
pub struct BirthdayService<S> {
    source: S,
    timezone: Tz,
}

impl<S: BirthdaySource> BirthdayService<S> {
    /// Create a new birthday service
    pub fn new(source: S, timezone: Tz) -> Self {
        Self { source, timezone }
    }

    /// Get all people with birthdays today in the service's timezone
    pub async fn todays_birthdays(&self) -> Result<Vec<PersonRecord>, FetchError> {
        self.birthdays_on(today_in(&self.timezone)).await
    }

    /// Get all people with birthdays on the given day
    pub async fn birthdays_on(&self, today: NaiveDate) -> Result<Vec<PersonRecord>, FetchError> {
        let records = self.source.fetch_records().await?;
        let total = records.len();
        let todays = filter_todays_birthdays(records, today);

        info!("Found {} birthday(s) today out of {} record(s)", todays.len(), total);
        Ok(todays)
    }
}
