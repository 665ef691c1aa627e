pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod table;

pub use api::{router, ApiError, ApiResponse, AppState};
pub use client::{ClientError, HttpRequestStore, RequestStoreClient};
pub use config::{load_config, load_or_default, AppConfig};
pub use db::{Database, DatabaseError, DatabaseLocation, SharedDatabase};
pub use error::{ConfigError, RequisitionError, Result};
pub use form::{FormError, RequestForm, SubmitOutcome};
pub use logging::{init_logging, LogFormat};
pub use model::{LookupEntry, LookupKind, RequestAction, RequestPayload, RequestRow};
pub use table::{Record, TableState};
