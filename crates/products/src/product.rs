use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use catalog_core::{AttributeId, Entity, ProductId};

/// Product type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Simple,
    Virtual,
    Configurable,
    Bundle,
    Grouped,
    Downloadable,
}

impl ProductType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Simple => "simple",
            ProductType::Virtual => "virtual",
            ProductType::Configurable => "configurable",
            ProductType::Bundle => "bundle",
            ProductType::Grouped => "grouped",
            ProductType::Downloadable => "downloadable",
        }
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar value stored under an attribute code.
///
/// Decimal numbers are kept as their text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged, from = "RawAttributeValue")]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawAttributeValue> for AttributeValue {
    fn from(raw: RawAttributeValue) -> Self {
        match raw {
            RawAttributeValue::Bool(b) => AttributeValue::Bool(b),
            RawAttributeValue::Int(i) => AttributeValue::Int(i),
            RawAttributeValue::Float(f) => AttributeValue::Text(f.to_string()),
            RawAttributeValue::Text(s) => AttributeValue::Text(s),
        }
    }
}

/// `null` entries mean "unset" and are dropped.
fn deserialize_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, AttributeValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<AttributeValue>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(code, value)| value.map(|v| (code, v)))
        .collect())
}

impl AttributeValue {
    /// `false` and the empty string count as "not set".
    pub fn is_present(&self) -> bool {
        match self {
            AttributeValue::Bool(b) => *b,
            AttributeValue::Int(_) => true,
            AttributeValue::Text(s) => !s.is_empty(),
        }
    }

    /// Text used when comparing variants: `23` and `"23"` are the same value.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl core::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// Declares which attribute distinguishes the variants of a configurable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurableOption {
    pub attribute_id: AttributeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl ConfigurableOption {
    pub fn new(attribute_id: AttributeId) -> Self {
        Self {
            attribute_id,
            label: None,
            position: 0,
        }
    }
}

/// Extension block carried by configurable products.
///
/// Missing lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurableExtension {
    #[serde(default)]
    pub options: Vec<ConfigurableOption>,
    #[serde(default)]
    pub links: Vec<ProductId>,
}

impl ConfigurableExtension {
    pub fn new(options: Vec<ConfigurableOption>, links: Vec<ProductId>) -> Self {
        Self { options, links }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.links.is_empty()
    }
}

/// Attribute metadata resolved from an [`AttributeId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMetadata {
    pub attribute_id: AttributeId,
    /// Stable key used to read values off a [`Product`].
    pub attribute_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_label: Option<String>,
}

impl Entity for AttributeMetadata {
    type Id = AttributeId;

    fn id(&self) -> &Self::Id {
        &self.attribute_id
    }
}

impl AttributeMetadata {
    pub fn new(attribute_id: AttributeId, attribute_code: impl Into<String>) -> Self {
        Self {
            attribute_id,
            attribute_code: attribute_code.into(),
            frontend_label: None,
        }
    }
}

/// Catalog product snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    #[serde(default)]
    sku: String,
    #[serde(rename = "type")]
    type_id: ProductType,
    #[serde(default, deserialize_with = "deserialize_attributes")]
    attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extension: Option<ConfigurableExtension>,
}

impl Product {
    pub fn new(id: ProductId, sku: impl Into<String>, type_id: ProductType) -> Self {
        Self {
            id,
            sku: sku.into(),
            type_id,
            attributes: BTreeMap::new(),
            extension: None,
        }
    }

    pub fn simple(id: ProductId, sku: impl Into<String>) -> Self {
        Self::new(id, sku, ProductType::Simple)
    }

    pub fn configurable(id: ProductId, sku: impl Into<String>, extension: ConfigurableExtension) -> Self {
        Self::new(id, sku, ProductType::Configurable).with_extension(extension)
    }

    pub fn with_attribute(mut self, code: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(code.into(), value.into());
        self
    }

    pub fn with_extension(mut self, extension: ConfigurableExtension) -> Self {
        self.extension = Some(extension);
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn type_id(&self) -> ProductType {
        self.type_id
    }

    pub fn is_configurable(&self) -> bool {
        self.type_id == ProductType::Configurable
    }

    /// Raw value stored under `code`, if any.
    pub fn data(&self, code: &str) -> Option<&AttributeValue> {
        self.attributes.get(code)
    }

    /// Value under `code` only when it counts as set (see [`AttributeValue::is_present`]).
    pub fn present_value(&self, code: &str) -> Option<&AttributeValue> {
        self.data(code).filter(|v| v.is_present())
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    pub fn extension(&self) -> Option<&ConfigurableExtension> {
        self.extension.as_ref()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
