//! The mapping engine.
//!
//! [`Mapper`] borrows a [`Registry`] and converts between JSON maps and
//! model instances in both directions. It holds no state of its own beyond
//! its options, so one registry can back any number of mappers.

mod decode;
mod encode;

use serde_json::Value;

use crate::error::EncodeError;
use crate::field::{EncodeCx, JsonField};
use crate::registry::Registry;

/// Default limit on model nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling a [`Mapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// Deepest model nesting level processed. Encoding past it fails with
    /// [`EncodeError::DepthExceeded`]; decoding past it leaves the nested
    /// property at its default.
    pub max_depth: usize,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Mapper<'r> {
    registry: &'r Registry,
    options: MapperOptions,
}

impl<'r> Mapper<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_options(registry, MapperOptions::default())
    }

    pub fn with_options(registry: &'r Registry, options: MapperOptions) -> Self {
        Self { registry, options }
    }

    /// A mapper over the process-wide registry.
    pub fn global() -> Mapper<'static> {
        Mapper::new(Registry::global())
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Encodes any serializable value: a model, a sequence, a mapping or a
    /// scalar.
    pub fn serialize<F: JsonField>(&self, value: &F) -> Result<Value, EncodeError> {
        let cx = EncodeCx {
            mapper: self,
            property: "",
            depth: 0,
        };
        value.encode_field(&cx)
    }

    fn within_depth(&self, depth: usize) -> bool {
        depth <= self.options.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Model;
    use crate::list::ModelList;
    use serde_json::json;

    crate::json_model! {
        struct Node {
            label: String,
            child: Option<Box<Node>>,
        }
    }

    crate::json_model! {
        struct Leaf {
            id: u32,
        }
    }

    crate::json_model! {
        struct Bag {
            items: ModelList,
        }
    }

    fn chain(depth: usize) -> Node {
        let mut node = Node {
            label: "0".to_string(),
            child: None,
        };
        for i in 1..=depth {
            node = Node {
                label: i.to_string(),
                child: Some(Box::new(node)),
            };
        }
        node
    }

    #[test]
    fn recursive_models_round_trip() {
        let registry = Registry::new();
        let mapper = Mapper::new(&registry);
        let node = chain(3);
        let map = mapper.encode(&node).unwrap();
        assert_eq!(map["child"]["child"]["label"], json!("1"));
        assert_eq!(mapper.decode::<Node>(&map), node);
    }

    #[test]
    fn encode_fails_past_depth_limit() {
        let registry = Registry::new();
        let mapper = Mapper::with_options(&registry, MapperOptions { max_depth: 2 });
        assert!(mapper.encode(&chain(2)).is_ok());
        assert_eq!(
            mapper.encode(&chain(3)),
            Err(EncodeError::DepthExceeded { limit: 2 })
        );
    }

    #[test]
    fn decode_stops_at_depth_limit() {
        let registry = Registry::new();
        let deep = Mapper::new(&registry).encode(&chain(3)).unwrap();
        let mapper = Mapper::with_options(&registry, MapperOptions { max_depth: 1 });
        let node = mapper.decode::<Node>(&deep);
        assert_eq!(node.label, "3");
        let child = node.child.expect("depth 1 is decoded");
        assert_eq!(child.label, "2");
        assert!(child.child.is_none());
    }

    #[test]
    fn list_elements_past_depth_limit_stay_raw() {
        let registry = Registry::new();
        registry.set_decoders(Bag::kind(), [("items", Leaf::kind())]);
        let mapper = Mapper::with_options(&registry, MapperOptions { max_depth: 0 });
        let bag = mapper.decode::<Bag>(json!({"items": [{"id": 1}]}).as_object().unwrap());
        assert_eq!(bag.items.len(), 1);
        assert_eq!(bag.items.raw(0), Some(&json!({"id": 1})));
    }

    #[test]
    fn serialize_accepts_any_field() {
        let registry = Registry::new();
        let mapper = Mapper::new(&registry);
        assert_eq!(mapper.serialize(&"x".to_string()).unwrap(), json!("x"));
        assert_eq!(
            mapper.serialize(&vec![Leaf { id: 1 }, Leaf { id: 2 }]).unwrap(),
            json!([{"id": 1}, {"id": 2}])
        );
    }
}
