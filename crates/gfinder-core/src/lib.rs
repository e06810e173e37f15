//! Shared domain types, error taxonomy and configuration for G-Finder.
//!
//! Every other crate in the workspace depends on this one. It has no I/O of
//! its own apart from reading environment variables in [`load_app_config`].

pub mod app_config;
pub mod config;
pub mod error;
pub mod query;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{
    ConfigError, DetailUnavailable, ErrorKind, GeocodeError, PipelineError, SearchError,
};
pub use query::{Query, SearchRequest, MAX_DESIRED_COUNT, MAX_SELECTION};
pub use types::{CandidatePlace, Coordinates, EnrichedContact, PlaceDetail, NO_PHONE_AVAILABLE};
