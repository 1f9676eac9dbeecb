//! Validation failures raised before a product is saved.

use thiserror::Error;

use catalog_core::{DomainError, ProductId};

/// Why a configurable product was rejected.
///
/// Every variant is terminal for the save; the first failure in scan order wins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// An option's attribute id could not be resolved.
    #[error(transparent)]
    AttributeResolution(DomainError),

    /// A linked child product could not be loaded.
    #[error(transparent)]
    VariantLookup(DomainError),

    #[error("Product with id \"{product_id}\" does not contain required attribute \"{attribute_code}\".")]
    MissingAttributeValue {
        product_id: ProductId,
        attribute_code: String,
    },

    /// `product_id` is the later link, `duplicate_of` the earlier one.
    #[error("Products \"{product_id}\" and \"{duplicate_of}\" have the same set of attribute values.")]
    DuplicateVariant {
        product_id: ProductId,
        duplicate_of: ProductId,
    },
}
