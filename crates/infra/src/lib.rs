//! Infrastructure layer: in-memory repositories, snapshots, config, service wiring.

pub mod config;
pub mod repository;
pub mod services;
pub mod snapshot;


pub use config::{ConfigError, Settings};
pub use repository::{InMemoryAttributeRepository, InMemoryEntityStore, InMemoryProductRepository};
pub use services::{CatalogServices, CatalogValidator, build_services, build_services_from_snapshot};
pub use snapshot::{CatalogSnapshot, SnapshotError};
