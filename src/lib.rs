// Flight deal monitor: turns a search results page into cheap offers

// Core pipeline
pub mod config;
pub mod envelope;
pub mod extract;
pub mod filter;
pub mod flight;
pub mod markup;

// Collaborator seams
pub mod report;
pub mod service;

use thiserror::Error;

// Re-export key types for convenience
pub use config::{ConfigError, MonitorConfig, NodeSpec, SelectorConfig};
pub use envelope::{assemble, assemble_error, SearchWindow};
pub use extract::{parse_price, BlockParseError, Extraction, Extractor};
pub use filter::{destinations, filter_by_price};
pub use flight::{Leg, LegKind, Offer, ResultEnvelope, Stop};
pub use markup::{Document, MarkupNode};
pub use report::render_report;
pub use service::{FetchError, FetchedPage, Fetcher, FlightsService, HttpFetcher};

// Failures that stop a run before a result envelope exists
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
