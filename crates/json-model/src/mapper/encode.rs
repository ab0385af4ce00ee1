//! Model -> JSON.

use super::Mapper;
use crate::error::EncodeError;
use crate::field::EncodeCx;
use crate::kind::{AnyModel, Model};
use crate::JsonMap;

impl<'r> Mapper<'r> {
    /// Encodes `model` into a JSON object.
    ///
    /// Properties are written in declaration order (inherited ones first),
    /// under their renamed keys, skipping ignored ones.
    pub fn encode<T: Model>(&self, model: &T) -> Result<JsonMap, EncodeError> {
        self.encode_at(model, 0)
    }

    /// Encodes a model whose concrete type is only known at runtime.
    pub fn encode_dyn(&self, model: &dyn AnyModel) -> Result<JsonMap, EncodeError> {
        model.encode_at(self, 0)
    }

    pub(crate) fn encode_at<T: Model>(&self, model: &T, depth: usize) -> Result<JsonMap, EncodeError> {
        if !self.within_depth(depth) {
            log::warn!("{}: nesting depth {depth} exceeds limit", T::kind());
            return Err(EncodeError::DepthExceeded {
                limit: self.options.max_depth,
            });
        }
        let config = self.registry.snapshot(T::kind());
        let mut out = JsonMap::new();
        for property in T::properties() {
            if config.is_ignored(property.name()) {
                continue;
            }
            let cx = EncodeCx {
                mapper: self,
                property: property.name(),
                depth,
            };
            let value = property.read(model, &cx)?;
            out.insert(config.json_key(property.name()).into_owned(), value);
        }
        Ok(out)
    }
}
