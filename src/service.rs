// Search orchestration: fetch -> extract -> filter -> assemble
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::MonitorConfig;
use crate::envelope::{assemble, assemble_error, SearchWindow};
use crate::extract::Extractor;
use crate::filter::filter_by_price;
use crate::flight::ResultEnvelope;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Client error: {0}")]
    Client(String),
}

// Raw page as handed over by a fetcher; non-200 statuses are not errors here
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(FetchedPage { status, body })
    }
}

pub struct FlightsService<F> {
    fetcher: F,
    extractor: Extractor,
    config: MonitorConfig,
}

impl FlightsService<HttpFetcher> {
    pub fn with_http(config: MonitorConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetcher> FlightsService<F> {
    pub fn new(fetcher: F, config: MonitorConfig) -> Self {
        let extractor = Extractor::new(config.selectors.clone());
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    // Searches today + configured window
    pub async fn get_flights(&self) -> ResultEnvelope {
        let window = SearchWindow::today(self.config.window_days);
        self.get_flights_for(&window).await
    }

    pub async fn get_flights_for(&self, window: &SearchWindow) -> ResultEnvelope {
        let url = self.config.search_url(window);

        match self.fetcher.fetch(&url).await {
            Ok(page) => {
                info!(status = page.status, bytes = page.body.len(), "fetched results page");
                self.process(page, window, &url)
            }
            Err(err) => assemble_error(&err, window, &url),
        }
    }

    // Synchronous part of the pipeline for an already fetched page
    pub fn process(&self, page: FetchedPage, window: &SearchWindow, source: &str) -> ResultEnvelope {
        if page.status != 200 {
            return assemble(page.status, Vec::new(), window, source);
        }

        let offers = self.extractor.extract(&page.body);
        let found = offers.len();
        let cheap = filter_by_price(offers, self.config.price_limit);
        info!(
            found,
            kept = cheap.len(),
            limit = self.config.price_limit,
            "filtered offers by price"
        );

        assemble(page.status, cheap, window, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    const SAMPLE_PAGE: &str = include_str!("../samples/search_results.html");

    // Replays one canned result and remembers the requested URL
    struct MockFetcher {
        result: Mutex<Option<Result<FetchedPage, FetchError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn replying(result: Result<FetchedPage, FetchError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn page(status: u16, body: &str) -> Self {
            Self::replying(Ok(FetchedPage {
                status,
                body: body.to_string(),
            }))
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(FetchError::Network("no more replies".to_string())))
        }
    }

    fn window() -> SearchWindow {
        SearchWindow::starting(NaiveDate::from_ymd_opt(2025, 8, 18).unwrap(), 90)
    }

    fn config_with_limit(limit: f64) -> MonitorConfig {
        MonitorConfig {
            price_limit: limit,
            ..MonitorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_successful_search_filters_by_limit() {
        let service = FlightsService::new(MockFetcher::page(200, SAMPLE_PAGE), config_with_limit(200.0));
        let envelope = service.get_flights_for(&window()).await;

        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.message, "Success");
        assert_eq!(envelope.offers.len(), 1);
        assert_eq!(envelope.offers[0].price_text, "189 zł");
        assert_eq!(envelope.start_date, "18.8.2025");
        assert_eq!(envelope.end_date, "16.11.2025");
        assert!(envelope.source.contains("depdate=18.8.2025&arrdate=16.11.2025"));
    }

    #[tokio::test]
    async fn test_default_limit_keeps_both_sample_offers() {
        let service = FlightsService::new(MockFetcher::page(200, SAMPLE_PAGE), MonitorConfig::default());
        let envelope = service.get_flights_for(&window()).await;
        let prices: Vec<f64> = envelope.offers.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![245.5, 189.0]);
    }

    #[tokio::test]
    async fn test_requests_generated_url() {
        let fetcher = MockFetcher::page(200, "");
        let service = FlightsService::new(fetcher, MonitorConfig::default());
        let envelope = service.get_flights_for(&window()).await;

        let requested = service.fetcher.requested.lock().unwrap().clone();
        assert_eq!(requested, vec![envelope.source.clone()]);
        assert!(envelope.offers.is_empty());
        assert_eq!(envelope.status, 200);
    }

    #[tokio::test]
    async fn test_non_200_status_gives_empty_offers() {
        let service = FlightsService::new(MockFetcher::page(503, SAMPLE_PAGE), MonitorConfig::default());
        let envelope = service.get_flights_for(&window()).await;

        assert_eq!(envelope.status, 503);
        assert_eq!(envelope.message, "Failed to fetch flights data");
        assert!(envelope.offers.is_empty());
        assert_eq!(envelope.start_date, "18.8.2025");
    }

    #[tokio::test]
    async fn test_transport_failure_gives_500() {
        let fetcher = MockFetcher::replying(Err(FetchError::Network("dns lookup failed".to_string())));
        let service = FlightsService::new(fetcher, MonitorConfig::default());
        let envelope = service.get_flights_for(&window()).await;

        assert_eq!(envelope.status, 500);
        assert_eq!(envelope.message, "Error: Network error: dns lookup failed");
        assert!(envelope.offers.is_empty());
        assert_eq!(envelope.end_date, "16.11.2025");
    }

    #[test]
    fn test_get_flights_uses_todays_window() {
        let service = FlightsService::new(MockFetcher::page(200, SAMPLE_PAGE), MonitorConfig::default());
        let envelope = tokio_test::block_on(service.get_flights());
        let expected = SearchWindow::today(90);

        assert_eq!(envelope.start_date, expected.start);
        assert_eq!(envelope.end_date, expected.end);
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(crate::config::USER_AGENT).is_ok());
        let service = FlightsService::with_http(MonitorConfig::default()).unwrap();
        assert_eq!(service.config().price_limit, 300.0);
    }
}
