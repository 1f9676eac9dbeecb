//! Deterministic stub collaborators for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use catalog_core::{AttributeId, DomainError, DomainResult, ProductId};

use crate::lookup::{AttributeLookup, ProductLookup, ProductStore};
use crate::product::{AttributeMetadata, Product};

#[derive(Debug, Default)]
pub(crate) struct StubAttributes {
    by_id: HashMap<AttributeId, AttributeMetadata>,
    calls: AtomicUsize,
}

impl StubAttributes {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, id: u32, code: &str) -> Self {
        let id = AttributeId::new(id);
        self.by_id.insert(id, AttributeMetadata::new(id, code));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AttributeLookup for StubAttributes {
    fn get(&self, attribute_id: AttributeId) -> DomainResult<AttributeMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.by_id
            .get(&attribute_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("attribute", attribute_id))
    }
}

/// Product lookup that records every requested id, in call order.
#[derive(Debug, Default)]
pub(crate) struct StubProducts {
    by_id: HashMap<ProductId, Product>,
    /// Returned for any id not registered explicitly.
    fallback: Option<Product>,
    fetched: Mutex<Vec<ProductId>>,
}

impl StubProducts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answers every id with a copy of `product`.
    pub(crate) fn always(product: Product) -> Self {
        Self {
            fallback: Some(product),
            ..Self::default()
        }
    }

    pub(crate) fn with(mut self, product: Product) -> Self {
        self.by_id.insert(product.id_typed(), product);
        self
    }

    pub(crate) fn fetched(&self) -> Vec<ProductId> {
        self.fetched.lock().unwrap().clone()
    }
}

impl ProductLookup for StubProducts {
    fn get_by_id(&self, product_id: ProductId) -> DomainResult<Product> {
        self.fetched.lock().unwrap().push(product_id);
        self.by_id
            .get(&product_id)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| DomainError::not_found("product", product_id))
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    saved: Mutex<Vec<Product>>,
    fail_with: Option<DomainError>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(err: DomainError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    pub(crate) fn saved(&self) -> Vec<Product> {
        self.saved.lock().unwrap().clone()
    }
}

impl ProductStore for RecordingStore {
    fn save(&self, product: Product) -> DomainResult<Product> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.saved.lock().unwrap().push(product.clone());
        Ok(product)
    }
}

pub(crate) fn pid(id: u64) -> ProductId {
    ProductId::new(id)
}
