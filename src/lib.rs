//! asset-inventory - asset aggregation for a service-desk REST API
//!
//! This library fetches asset records from a remote paginated REST API,
//! enriches each record with related entities (department, location, user,
//! hardware components) and caches low-churn lookups on disk to cut down
//! on redundant network calls.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): component reconciliation and the
//!   location hierarchy - pure logic, no I/O
//! - **Application Layer** (`application`): use cases and DTOs
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common error types
//!
//! # Example
//!
//! ```no_run
//! use asset_inventory::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let http = HttpRemoteClient::new("https://acme.example.com/api/v2", "key")?;
//! let cache = TtlCache::new(".cache", std::time::Duration::from_secs(24 * 3600))?;
//! let client = CachingRemoteClient::new(http, cache, vec!["assets".to_string()]);
//! let reporter = StderrProgressReporter::new();
//!
//! let use_case = AggregateAssetsUseCase::new(&client, &reporter);
//! let request = AggregateRequest::new(
//!     vec![143, 144],
//!     EnrichmentOptions {
//!         department: true,
//!         location: true,
//!         ..Default::default()
//!     },
//! );
//! let results = use_case.execute(&request);
//! println!("{}", serde_json::to_string_pretty(&results)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{CacheScope, TtlCache};
    pub use crate::adapters::outbound::network::{CachingRemoteClient, HttpRemoteClient};
    pub use crate::application::dto::{AggregateRequest, EnrichmentOptions};
    pub use crate::application::use_cases::{
        AggregateAssetsUseCase, ListDepartmentsUseCase, ListLocationsUseCase, SearchAssetsUseCase,
    };
    pub use crate::inventory::domain::{build_forest, render_forest, ComponentKind, LocationNode};
    pub use crate::inventory::services::{reconcile, ReconcileOptions};
    pub use crate::ports::outbound::{paginated_field_name, ProgressReporter, RemoteClient};
    pub use crate::shared::{InventoryError, Result};
}
