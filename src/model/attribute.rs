//! Shared attribute traits, the extended-properties bag and list layers.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields a record carries beyond its typed schema.
///
/// Keyed by field name; values keep whatever JSON shape they arrived in.
/// Comparison is order-insensitive.
pub type ExtendedProperties = BTreeMap<String, Value>;

/// Anything that carries an extended-properties bag.
pub trait BaseAttribute {
    /// Fields not captured by the typed schema.
    fn extended_properties(&self) -> &ExtendedProperties;
}

/// An annotation covering the half-open character range
/// `[start_offset, end_offset)` of its text.
///
/// Offsets are stored as given; nothing checks that `start <= end` or that
/// they fall inside the text.
pub trait Attribute: BaseAttribute {
    fn start_offset(&self) -> usize;

    fn end_offset(&self) -> usize;

    /// Number of characters covered, zero for an inverted span.
    fn length(&self) -> usize {
        self.end_offset().saturating_sub(self.start_offset())
    }
}

/// Implements [`BaseAttribute`] and [`Attribute`] for structs with
/// `start_offset`, `end_offset` and `extended_properties` fields.
macro_rules! impl_attribute {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::model::attribute::BaseAttribute for $ty {
                fn extended_properties(&self) -> &$crate::model::attribute::ExtendedProperties {
                    &self.extended_properties
                }
            }

            impl $crate::model::attribute::Attribute for $ty {
                fn start_offset(&self) -> usize {
                    self.start_offset
                }

                fn end_offset(&self) -> usize {
                    self.end_offset
                }
            }
        )+
    };
}

pub(crate) use impl_attribute;

/// Feed an extended-properties bag into a hasher.
///
/// `serde_json::Value` has no `Hash` impl, so each value is hashed through
/// its compact JSON text. Map iteration is key-ordered, which keeps this
/// consistent with the map's equality.
pub fn hash_extended_properties<H: Hasher>(properties: &ExtendedProperties, state: &mut H) {
    properties.len().hash(state);
    for (key, value) in properties {
        key.hash(state);
        value.to_string().hash(state);
    }
}

/// One whole annotation layer: an ordered run of items plus a bag of its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttribute<T> {
    items: Vec<T>,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

impl<T> ListAttribute<T> {
    /// Create a layer from its items, with an empty bag.
    pub fn new(items: Vec<T>) -> Self {
        ListAttribute {
            items,
            extended_properties: ExtendedProperties::new(),
        }
    }

    /// Start building a layer.
    pub fn builder() -> ListAttributeBuilder<T> {
        ListAttributeBuilder::new()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> ListAttribute<T> {
    /// A builder seeded with a copy of this layer.
    pub fn to_builder(&self) -> ListAttributeBuilder<T> {
        ListAttributeBuilder {
            items: self.items.clone(),
            extended_properties: self.extended_properties.clone(),
        }
    }
}

impl<T> BaseAttribute for ListAttribute<T> {
    fn extended_properties(&self) -> &ExtendedProperties {
        &self.extended_properties
    }
}

impl<'a, T> IntoIterator for &'a ListAttribute<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for ListAttribute<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ListAttribute::new(iter.into_iter().collect())
    }
}

/// Builder for [`ListAttribute`].
#[derive(Debug)]
pub struct ListAttributeBuilder<T> {
    items: Vec<T>,
    extended_properties: ExtendedProperties,
}

impl<T> ListAttributeBuilder<T> {
    pub fn new() -> Self {
        ListAttributeBuilder {
            items: Vec::new(),
            extended_properties: ExtendedProperties::new(),
        }
    }

    /// Append one item.
    pub fn add(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    /// Append several items, keeping their order.
    pub fn add_all<I: IntoIterator<Item = T>>(mut self, items: I) -> Self {
        self.items.extend(items);
        self
    }

    /// Set one entry of the layer's own bag, replacing any previous value.
    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extended_properties.insert(key.into(), value);
        self
    }

    pub fn build(self) -> ListAttribute<T> {
        ListAttribute {
            items: self.items,
            extended_properties: self.extended_properties,
        }
    }
}

impl<T> Default for ListAttributeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
