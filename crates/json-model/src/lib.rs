//! json-model - object/JSON mapping for strongly-typed models.
//!
//! Models are plain structs with a static property list, usually declared
//! with [`json_model!`]. A [`Registry`] holds per-model schema
//! configuration:
//!
//! - a rename map (JSON key ↔ property name),
//! - an ignore set (properties left out when encoding),
//! - a decoder map (list property → element model).
//!
//! A [`Mapper`] walks models against that configuration in both directions.
//! Decoding is lenient: unknown keys, `null`s and type mismatches are skipped
//! and the affected property keeps its default.
//!
//! ```
//! use json_model::{json_model, Mapper, Model, Registry};
//! use serde_json::json;
//!
//! json_model! {
//!     pub struct Account {
//!         pub username: String,
//!         pub password: String,
//!     }
//! }
//!
//! let registry = Registry::new();
//! registry.set_ignore(Account::kind(), ["password"]);
//! let mapper = Mapper::new(&registry);
//!
//! let account = Account {
//!     username: "bob".into(),
//!     password: "secret".into(),
//! };
//! let encoded = mapper.encode(&account).unwrap();
//! assert_eq!(serde_json::Value::Object(encoded), json!({"username": "bob"}));
//! ```

mod error;
mod kind;
mod macros;

pub mod field;
pub mod list;
pub mod mapper;
pub mod property;
pub mod registry;

pub use error::EncodeError;
pub use field::{DecodeCx, EncodeCx, JsonField, Shape};
pub use kind::{AnyModel, Model, ModelKind};
pub use list::{ListItem, ModelList};
pub use mapper::{Mapper, MapperOptions};
pub use property::Property;
pub use registry::{Registry, RenameMap, SchemaConfig};

pub use serde_json::Value;

/// A JSON object: the encoded form of a model.
pub type JsonMap = serde_json::Map<String, Value>;
