//! JSON -> model.
//!
//! Decoding is lenient: unknown keys, `null` values and values whose JSON
//! type does not fit the declared property type are skipped, leaving the
//! property at its default. None of these are errors.

use serde_json::Value;

use super::Mapper;
use crate::field::{json_type_name, DecodeCx};
use crate::kind::{Model, ModelKind};
use crate::list::{ListItem, ModelList};
use crate::JsonMap;

impl<'r> Mapper<'r> {
    /// Builds a `T` from a JSON object.
    pub fn decode<T: Model>(&self, map: &JsonMap) -> T {
        self.decode_at(map, 0)
    }

    /// Builds a `T` from any JSON value; non-objects give `T::default()`.
    pub fn decode_value<T: Model>(&self, value: &Value) -> T {
        match value {
            Value::Object(map) => self.decode(map),
            other => {
                log::debug!(
                    "{}: expected an object, got {}",
                    T::kind(),
                    json_type_name(other)
                );
                T::default()
            }
        }
    }

    /// The decode-list step for the list property behind `json_key` on
    /// `owner`: object elements are decoded with the element model from the
    /// owner's decoder map, everything else is kept as raw JSON.
    pub fn decode_list(&self, owner: &'static ModelKind, json_key: &str, values: &[Value]) -> ModelList {
        let config = self.registry.snapshot(owner);
        let property = config.property_name(json_key);
        self.decode_list_at(values, config.decoder(&property), 0)
    }

    /// Decodes a bare JSON array, using `decoder` for object elements.
    pub fn decode_list_with(&self, values: &[Value], decoder: Option<&'static ModelKind>) -> ModelList {
        self.decode_list_at(values, decoder, 0)
    }

    pub(crate) fn decode_list_at(
        &self,
        values: &[Value],
        decoder: Option<&'static ModelKind>,
        depth: usize,
    ) -> ModelList {
        let element_depth = depth + 1;
        values
            .iter()
            .map(|value| match (decoder, value) {
                (Some(kind), Value::Object(map)) if self.within_depth(element_depth) => {
                    ListItem::Model(kind.decode_at(self, map, element_depth))
                }
                (Some(kind), Value::Object(_)) => {
                    log::warn!("{kind}: list element past depth limit kept as raw JSON");
                    ListItem::Raw(value.clone())
                }
                _ => ListItem::Raw(value.clone()),
            })
            .collect()
    }

    /// Decodes a nested model, or `None` when `depth` is past the limit.
    pub(crate) fn decode_nested<T: Model>(&self, map: &JsonMap, depth: usize) -> Option<T> {
        if !self.within_depth(depth) {
            log::warn!(
                "{}: nesting depth {depth} exceeds limit {}, left at default",
                T::kind(),
                self.options.max_depth
            );
            return None;
        }
        Some(self.decode_at(map, depth))
    }

    pub(crate) fn decode_at<T: Model>(&self, map: &JsonMap, depth: usize) -> T {
        let kind = T::kind();
        let config = self.registry.snapshot(kind);
        let properties = T::properties();
        let mut model = T::default();

        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            let name = config.property_name(key);
            let Some(property) = properties.iter().find(|p| p.name() == name) else {
                log::trace!("{kind}: skipping unknown key `{key}`");
                continue;
            };
            let cx = DecodeCx {
                mapper: self,
                owner: Some(kind),
                property: property.name(),
                depth,
            };
            if !property.assign(&mut model, value, &cx) {
                log::debug!(
                    "{kind}.{}: {} value does not fit {} property, left at default",
                    property.name(),
                    json_type_name(value),
                    property.shape().as_str()
                );
            }
        }
        model
    }
}
