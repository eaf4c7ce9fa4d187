// Holiday search: query state, fetching and paginated display of public holidays

pub mod commands;
pub mod config;
pub mod filters;
pub mod holiday;
pub mod pagination;
pub mod query_client;
pub mod render;
pub mod search_view;

// Re-export key types for convenience
pub use config::{Config, ConfigError};
pub use filters::{FilterSelection, HolidayQuery, HolidayType, Month};
pub use holiday::{HolidayKind, HolidayRecord};
pub use pagination::{PageMarker, PAGE_SIZE};
pub use query_client::{ApiError, ClientConfig, ClientError, ClientStats, HolidayApi, QueryClient};
pub use search_view::{reduce, Action, Effect, HolidaySearchView, SearchState};
