//! JSON catalog snapshots used to seed the in-memory repositories.
//!
//! ```json
//! {
//!   "attributes": [{ "attribute_id": 23, "attribute_code": "color" }],
//!   "products": [{ "id": 4, "sku": "RED", "type": "simple", "attributes": { "color": "red" } }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalog_core::DomainError;
use catalog_products::{AttributeMetadata, Product, ProductStore};

use crate::repository::{InMemoryAttributeRepository, InMemoryProductRepository};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to seed repositories: {0}")]
    Seed(#[from] DomainError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load every attribute and product into the given repositories.
    ///
    /// Products are written straight to the store, bypassing save hooks.
    pub fn seed(
        &self,
        attributes: &InMemoryAttributeRepository,
        products: &InMemoryProductRepository,
    ) -> Result<(), SnapshotError> {
        for metadata in &self.attributes {
            attributes.upsert(metadata.clone())?;
        }
        for product in &self.products {
            products.save(product.clone())?;
        }

        tracing::debug!(
            attributes = self.attributes.len(),
            products = self.products.len(),
            "catalog snapshot seeded"
        );
        Ok(())
    }
}
