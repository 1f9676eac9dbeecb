//! Collaborator contracts consumed by the variant validator and save pipeline.
//!
//! Storage is owned elsewhere; these traits are the narrow read/write seams.

use std::sync::Arc;

use catalog_core::{AttributeId, DomainResult, ProductId};

use crate::product::{AttributeMetadata, Product};

/// Resolves attribute metadata by id.
pub trait AttributeLookup: Send + Sync {
    /// Fails with `DomainError::NotFound` when the id is unknown.
    fn get(&self, attribute_id: AttributeId) -> DomainResult<AttributeMetadata>;
}

/// Loads product snapshots by id.
pub trait ProductLookup: Send + Sync {
    /// Fails with `DomainError::NotFound` when the id is unknown.
    fn get_by_id(&self, product_id: ProductId) -> DomainResult<Product>;
}

/// Persists products at the end of the save pipeline.
pub trait ProductStore: Send + Sync {
    fn save(&self, product: Product) -> DomainResult<Product>;
}

impl<S> AttributeLookup for Arc<S>
where
    S: AttributeLookup + ?Sized,
{
    fn get(&self, attribute_id: AttributeId) -> DomainResult<AttributeMetadata> {
        (**self).get(attribute_id)
    }
}

impl<S> AttributeLookup for &S
where
    S: AttributeLookup + ?Sized,
{
    fn get(&self, attribute_id: AttributeId) -> DomainResult<AttributeMetadata> {
        (**self).get(attribute_id)
    }
}

impl<S> ProductLookup for Arc<S>
where
    S: ProductLookup + ?Sized,
{
    fn get_by_id(&self, product_id: ProductId) -> DomainResult<Product> {
        (**self).get_by_id(product_id)
    }
}

impl<S> ProductLookup for &S
where
    S: ProductLookup + ?Sized,
{
    fn get_by_id(&self, product_id: ProductId) -> DomainResult<Product> {
        (**self).get_by_id(product_id)
    }
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn save(&self, product: Product) -> DomainResult<Product> {
        (**self).save(product)
    }
}
