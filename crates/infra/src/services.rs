//! In-memory service wiring (dev/test): repositories + validator + save pipeline.

use std::sync::Arc;

use anyhow::Context;

use catalog_products::{Product, SaveError, SavePipeline, VariantUniquenessValidator};

use crate::config::Settings;
use crate::repository::{InMemoryAttributeRepository, InMemoryProductRepository};
use crate::snapshot::CatalogSnapshot;

pub type CatalogValidator =
    VariantUniquenessValidator<Arc<InMemoryAttributeRepository>, Arc<InMemoryProductRepository>>;

/// Shared repositories plus a save pipeline guarded by the variant validator.
#[derive(Debug)]
pub struct CatalogServices {
    pub attributes: Arc<InMemoryAttributeRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub pipeline: SavePipeline<Arc<InMemoryProductRepository>>,
}

impl CatalogServices {
    /// Validate (unless disabled) and persist a product.
    pub fn save_product(&self, product: Product) -> Result<Product, SaveError> {
        self.pipeline.save(product)
    }

    /// A standalone validator over the same repositories.
    pub fn validator(&self) -> CatalogValidator {
        VariantUniquenessValidator::new(Arc::clone(&self.attributes), Arc::clone(&self.products))
    }
}

/// Wire in-memory services from settings, seeding from the configured snapshot if any.
pub fn build_services(settings: &Settings) -> anyhow::Result<CatalogServices> {
    let snapshot = match &settings.snapshot_path {
        Some(path) => CatalogSnapshot::from_path(path)
            .with_context(|| format!("loading catalog snapshot from {}", path.display()))?,
        None => CatalogSnapshot::default(),
    };

    build_services_from_snapshot(settings, &snapshot)
}

pub fn build_services_from_snapshot(
    settings: &Settings,
    snapshot: &CatalogSnapshot,
) -> anyhow::Result<CatalogServices> {
    let attributes = Arc::new(InMemoryAttributeRepository::new());
    let products = Arc::new(InMemoryProductRepository::new());

    snapshot
        .seed(&attributes, &products)
        .context("seeding in-memory repositories")?;

    let validator =
        VariantUniquenessValidator::new(Arc::clone(&attributes), Arc::clone(&products));
    let pipeline = SavePipeline::new(Arc::clone(&products))
        .with_hook(validator)
        .with_hooks_enabled(settings.validation_enabled);

    if !settings.validation_enabled {
        tracing::warn!("variant validation disabled; configurable products are saved unchecked");
    }

    Ok(CatalogServices {
        attributes,
        products,
        pipeline,
    })
}
