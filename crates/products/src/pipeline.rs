//! Product save pipeline with pre-save hooks.
//!
//! ```text
//! Product
//!   ↓
//! 1. Run every before-save hook in registration order (first rejection aborts)
//!   ↓
//! 2. Persist through the ProductStore
//! ```
//!
//! Hooks never write. A rejected product never reaches the store.

use std::sync::Arc;

use thiserror::Error;

use catalog_core::DomainError;

use crate::error::ProductValidationError;
use crate::lookup::{AttributeLookup, ProductLookup, ProductStore};
use crate::product::Product;
use crate::validator::VariantUniquenessValidator;

/// Runs before a product is persisted; returns the product to save or rejects it.
pub trait BeforeSaveHook: Send + Sync {
    fn before_save(&self, product: Product) -> Result<Product, ProductValidationError>;
}

impl<A, P> BeforeSaveHook for VariantUniquenessValidator<A, P>
where
    A: AttributeLookup,
    P: ProductLookup,
{
    fn before_save(&self, product: Product) -> Result<Product, ProductValidationError> {
        self.validate(product)
    }
}

impl<H> BeforeSaveHook for Arc<H>
where
    H: BeforeSaveHook + ?Sized,
{
    fn before_save(&self, product: Product) -> Result<Product, ProductValidationError> {
        (**self).before_save(product)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// A before-save hook rejected the product; nothing was persisted.
    #[error("save rejected: {0}")]
    Rejected(#[from] ProductValidationError),

    #[error("store failure: {0}")]
    Store(#[from] DomainError),
}

/// Composes before-save hooks with a [`ProductStore`].
pub struct SavePipeline<S> {
    store: S,
    hooks: Vec<Box<dyn BeforeSaveHook>>,
    hooks_enabled: bool,
}

impl<S> SavePipeline<S>
where
    S: ProductStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            hooks: Vec::new(),
            hooks_enabled: true,
        }
    }

    pub fn with_hook(mut self, hook: impl BeforeSaveHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// When disabled, products go straight to the store.
    pub fn with_hooks_enabled(mut self, enabled: bool) -> Self {
        self.hooks_enabled = enabled;
        self
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&self, product: Product) -> Result<Product, SaveError> {
        let product_id = product.id_typed();

        let mut product = product;
        if self.hooks_enabled {
            for hook in &self.hooks {
                product = hook.before_save(product).map_err(|err| {
                    tracing::warn!(%product_id, error = %err, "product save rejected");
                    SaveError::Rejected(err)
                })?;
            }
        }

        let saved = self.store.save(product)?;
        tracing::info!(%product_id, product_type = %saved.type_id(), "product saved");
        Ok(saved)
    }
}

impl<S> core::fmt::Debug for SavePipeline<S>
where
    S: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SavePipeline")
            .field("store", &self.store)
            .field("hooks", &self.hooks.len())
            .field("hooks_enabled", &self.hooks_enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use catalog_core::{AttributeId, Entity};

    use crate::product::{ConfigurableExtension, ConfigurableOption};
    use crate::testing::{RecordingStore, StubAttributes, StubProducts, pid};

    fn duplicate_configurable() -> Product {
        Product::configurable(
            pid(1),
            "PARENT",
            ConfigurableExtension::new(
                vec![ConfigurableOption::new(AttributeId::new(23))],
                vec![pid(4), pid(5)],
            ),
        )
    }

    fn validator_with_duplicates() -> VariantUniquenessValidator<StubAttributes, StubProducts> {
        VariantUniquenessValidator::new(
            StubAttributes::new().with(23, "color"),
            StubProducts::always(Product::simple(pid(99), "CHILD").with_attribute("color", "red")),
        )
    }

    #[derive(Default)]
    struct CountingHook {
        calls: AtomicUsize,
    }

    impl BeforeSaveHook for CountingHook {
        fn before_save(&self, product: Product) -> Result<Product, ProductValidationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(product)
        }
    }

    #[test]
    fn valid_product_is_persisted_unchanged() {
        let pipeline = SavePipeline::new(RecordingStore::new()).with_hook(validator_with_duplicates());
        let product = Product::simple(pid(7), "SIMPLE");

        let saved = pipeline.save(product.clone()).unwrap();

        assert_eq!(saved, product);
        assert_eq!(pipeline.store().saved(), vec![product]);
    }

    #[test]
    fn rejected_product_never_reaches_the_store() {
        let pipeline = SavePipeline::new(RecordingStore::new()).with_hook(validator_with_duplicates());

        let err = pipeline.save(duplicate_configurable()).unwrap_err();

        assert_eq!(
            err,
            SaveError::Rejected(ProductValidationError::DuplicateVariant {
                product_id: pid(5),
                duplicate_of: pid(4),
            })
        );
        assert!(pipeline.store().saved().is_empty());
    }

    #[test]
    fn first_rejection_stops_later_hooks() {
        let counter = Arc::new(CountingHook::default());
        let pipeline = SavePipeline::new(RecordingStore::new())
            .with_hook(validator_with_duplicates())
            .with_hook(Arc::clone(&counter));

        assert!(pipeline.save(duplicate_configurable()).is_err());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.hook_count(), 2);
    }

    #[test]
    fn disabled_hooks_are_skipped() {
        let counter = Arc::new(CountingHook::default());
        let pipeline = SavePipeline::new(RecordingStore::new())
            .with_hook(validator_with_duplicates())
            .with_hook(Arc::clone(&counter))
            .with_hooks_enabled(false);

        let saved = pipeline.save(duplicate_configurable()).unwrap();

        assert_eq!(*saved.id(), pid(1));
        assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn store_failure_is_surfaced() {
        let pipeline = SavePipeline::new(RecordingStore::failing(DomainError::unavailable("db down")));

        let err = pipeline.save(Product::simple(pid(7), "SIMPLE")).unwrap_err();

        assert_eq!(err, SaveError::Store(DomainError::unavailable("db down")));
        assert_eq!(err.to_string(), "store failure: unavailable: db down");
    }

    #[test]
    fn rejection_message_wraps_validation_message() {
        let err = SaveError::from(ProductValidationError::MissingAttributeValue {
            product_id: pid(4),
            attribute_code: "color".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "save rejected: Product with id \"4\" does not contain required attribute \"color\"."
        );
    }
}
