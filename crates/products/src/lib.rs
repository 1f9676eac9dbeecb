//! Products domain module: catalog product model and pre-save variant validation.
//!
//! This crate contains the rules that guard configurable products, implemented as
//! deterministic domain logic over injected lookups (no IO, no HTTP, no storage).

pub mod error;
pub mod lookup;
pub mod pipeline;
pub mod product;
pub mod validator;

#[cfg(test)]
mod testing;

pub use error::ProductValidationError;
pub use lookup::{AttributeLookup, ProductLookup, ProductStore};
pub use pipeline::{BeforeSaveHook, SaveError, SavePipeline};
pub use product::{
    AttributeMetadata, AttributeValue, ConfigurableExtension, ConfigurableOption, Product,
    ProductType,
};
pub use validator::{VariantSignature, VariantUniquenessValidator};
