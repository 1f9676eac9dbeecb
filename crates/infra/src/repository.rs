//! In-memory attribute and product repositories.
//!
//! Intended for tests/dev. They back the lookup and store traits consumed by
//! the variant validator and the save pipeline.

use std::collections::HashMap;
use std::sync::RwLock;

use catalog_core::{AttributeId, DomainError, DomainResult, Entity, ProductId};
use catalog_products::{AttributeLookup, AttributeMetadata, Product, ProductLookup, ProductStore};

fn poisoned() -> DomainError {
    DomainError::unavailable("lock poisoned")
}

/// In-memory entity map keyed by [`Entity::id`].
///
/// Every accessor reports a poisoned lock as `DomainError::Unavailable`.
#[derive(Debug)]
pub struct InMemoryEntityStore<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<E> InMemoryEntityStore<E>
where
    E: Entity + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record with the same id.
    pub fn upsert(&self, entity: E) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(entity.id().clone(), entity);
        Ok(())
    }

    pub fn get(&self, id: &E::Id) -> DomainResult<Option<E>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }

    pub fn len(&self) -> DomainResult<usize> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn values(&self) -> DomainResult<Vec<E>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }
}

/// In-memory attribute metadata keyed by attribute id.
#[derive(Debug, Default)]
pub struct InMemoryAttributeRepository {
    store: InMemoryEntityStore<AttributeMetadata>,
}

impl InMemoryAttributeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, metadata: AttributeMetadata) -> DomainResult<()> {
        self.store.upsert(metadata)
    }

    pub fn len(&self) -> DomainResult<usize> {
        self.store.len()
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        self.store.is_empty()
    }
}

impl AttributeLookup for InMemoryAttributeRepository {
    fn get(&self, attribute_id: AttributeId) -> DomainResult<AttributeMetadata> {
        self.store
            .get(&attribute_id)?
            .ok_or_else(|| DomainError::not_found("attribute", attribute_id))
    }
}

/// In-memory product snapshots keyed by product id.
///
/// `save` overwrites any previous snapshot with the same id.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    store: InMemoryEntityStore<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> DomainResult<usize> {
        self.store.len()
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        self.store.is_empty()
    }

    /// All stored products, ordered by id.
    pub fn list(&self) -> DomainResult<Vec<Product>> {
        let mut products = self.store.values()?;
        products.sort_by_key(|p| p.id_typed());
        Ok(products)
    }
}

impl ProductLookup for InMemoryProductRepository {
    fn get_by_id(&self, product_id: ProductId) -> DomainResult<Product> {
        self.store
            .get(&product_id)?
            .ok_or_else(|| DomainError::not_found("product", product_id))
    }
}

impl ProductStore for InMemoryProductRepository {
    fn save(&self, product: Product) -> DomainResult<Product> {
        self.store.upsert(product.clone())?;
        Ok(product)
    }
}
