//! Variant uniqueness rules for configurable products.
//!
//! A configurable product declares options (attributes that distinguish its
//! variants) and links to child products. Before such a product is saved:
//!
//! - every option attribute must resolve to attribute metadata,
//! - every linked child must carry a value for every option attribute,
//! - no two linked children may share the same combination of values.
//!
//! Collaborator calls are sequential: attribute codes are resolved first, then
//! each child is fetched and checked in link order. The first failure stops the
//! scan. Nothing is cached between calls.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use catalog_core::ProductId;

use crate::error::ProductValidationError;
use crate::lookup::{AttributeLookup, ProductLookup};
use crate::product::{ConfigurableOption, Product};

/// Ordered `(attribute code, canonical value)` pairs identifying one variant.
///
/// Codes appear in the same order for every child within one validation run.
/// Values compare by their canonical text, so `23` and `"23"` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantSignature(Vec<(String, String)>);

impl VariantSignature {
    /// Build the signature of `child` over `codes`.
    ///
    /// Fails on the first code (in `codes` order) without a present value.
    pub fn for_variant(
        product_id: ProductId,
        child: &Product,
        codes: &[String],
    ) -> Result<Self, ProductValidationError> {
        let mut pairs = Vec::with_capacity(codes.len());
        for code in codes {
            let value = child.present_value(code).ok_or_else(|| {
                ProductValidationError::MissingAttributeValue {
                    product_id,
                    attribute_code: code.clone(),
                }
            })?;
            pairs.push((code.clone(), value.canonical()));
        }
        Ok(Self(pairs))
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl core::fmt::Display for VariantSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (code, value) in &self.0 {
            write!(f, "{code}:{value};")?;
        }
        Ok(())
    }
}

/// Pre-save validator for configurable products.
#[derive(Debug, Clone)]
pub struct VariantUniquenessValidator<A, P> {
    attributes: A,
    products: P,
}

impl<A, P> VariantUniquenessValidator<A, P>
where
    A: AttributeLookup,
    P: ProductLookup,
{
    pub fn new(attributes: A, products: P) -> Self {
        Self {
            attributes,
            products,
        }
    }

    /// Validate `product` and hand it back unchanged on success.
    pub fn validate(&self, product: Product) -> Result<Product, ProductValidationError> {
        self.check(&product)?;
        Ok(product)
    }

    /// Same checks as [`validate`](Self::validate), by reference.
    pub fn check(&self, product: &Product) -> Result<(), ProductValidationError> {
        if !product.is_configurable() {
            tracing::debug!(
                product_id = %product.id_typed(),
                product_type = %product.type_id(),
                "skipping variant validation for non-configurable product"
            );
            return Ok(());
        }

        let Some(extension) = product.extension() else {
            tracing::debug!(product_id = %product.id_typed(), "configurable product has no extension block");
            return Ok(());
        };
        if extension.is_empty() {
            return Ok(());
        }

        let codes = self.required_attribute_codes(&extension.options)?;
        tracing::debug!(
            product_id = %product.id_typed(),
            codes = ?codes,
            links = extension.links.len(),
            "validating configurable product variants"
        );

        self.check_links(&codes, &extension.links)
    }

    /// Resolve option attribute ids to codes, de-duplicated, in option order.
    fn required_attribute_codes(
        &self,
        options: &[ConfigurableOption],
    ) -> Result<Vec<String>, ProductValidationError> {
        let mut resolved_ids = HashSet::with_capacity(options.len());
        let mut codes: Vec<String> = Vec::with_capacity(options.len());

        for option in options {
            if !resolved_ids.insert(option.attribute_id) {
                continue;
            }
            let metadata = self
                .attributes
                .get(option.attribute_id)
                .map_err(ProductValidationError::AttributeResolution)?;
            if !codes.contains(&metadata.attribute_code) {
                codes.push(metadata.attribute_code);
            }
        }

        Ok(codes)
    }

    fn check_links(&self, codes: &[String], links: &[ProductId]) -> Result<(), ProductValidationError> {
        let mut seen: HashMap<VariantSignature, ProductId> = HashMap::with_capacity(links.len());

        // One lookup per occurrence, even for repeated ids.
        for &link in links {
            let child = self
                .products
                .get_by_id(link)
                .map_err(ProductValidationError::VariantLookup)?;
            let signature = VariantSignature::for_variant(link, &child, codes)?;

            match seen.entry(signature) {
                Entry::Occupied(earlier) => {
                    return Err(ProductValidationError::DuplicateVariant {
                        product_id: link,
                        duplicate_of: *earlier.get(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(link);
                }
            }
        }

        Ok(())
    }
}
