//! Property value types.
//!
//! [`JsonField`] is the serialization capability: every type a model
//! property can hold implements it. Decoding is lenient, so
//! `decode_field` returns `None` on a shape or range mismatch and the caller
//! keeps the property's default.
//!
//! Implement `JsonField` for your own leaf types (enums stored as strings,
//! timestamps, ...) to use them as model properties.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Number, Value};

use crate::error::EncodeError;
use crate::kind::{Model, ModelKind};
use crate::mapper::Mapper;

/// The declared semantic type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// String, number or boolean.
    Scalar,
    /// A nested model.
    Model,
    /// An ordered sequence.
    List,
    /// A string-keyed mapping.
    Map,
    /// An untyped JSON value.
    Any,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Scalar => "scalar",
            Shape::Model => "model",
            Shape::List => "list",
            Shape::Map => "map",
            Shape::Any => "any",
        }
    }
}

/// State threaded through one encode pass.
#[derive(Debug, Clone, Copy)]
pub struct EncodeCx<'a> {
    pub(crate) mapper: &'a Mapper<'a>,
    pub(crate) property: &'a str,
    pub(crate) depth: usize,
}

impl<'a> EncodeCx<'a> {
    pub fn mapper(&self) -> &'a Mapper<'a> {
        self.mapper
    }

    /// Name of the property being encoded (empty at the top level).
    pub fn property(&self) -> &'a str {
        self.property
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Encodes a nested model one level below the current one.
    pub fn encode_model<M: Model>(&self, model: &M) -> Result<Value, EncodeError> {
        self.mapper
            .encode_at(model, self.depth + 1)
            .map(Value::Object)
    }

    pub fn non_finite(&self) -> EncodeError {
        EncodeError::NonFiniteNumber {
            property: self.property.to_string(),
        }
    }
}

/// State threaded through one decode pass.
#[derive(Debug, Clone, Copy)]
pub struct DecodeCx<'a> {
    pub(crate) mapper: &'a Mapper<'a>,
    pub(crate) owner: Option<&'static ModelKind>,
    pub(crate) property: &'a str,
    pub(crate) depth: usize,
}

impl<'a> DecodeCx<'a> {
    pub fn mapper(&self) -> &'a Mapper<'a> {
        self.mapper
    }

    /// The model type that declares the property being decoded.
    pub fn owner(&self) -> Option<&'static ModelKind> {
        self.owner
    }

    pub fn property(&self) -> &'a str {
        self.property
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Decodes a nested model one level below the current one.
    ///
    /// `None` for non-object input or when the depth limit is reached.
    pub fn decode_model<M: Model>(&self, value: &Value) -> Option<M> {
        let map = value.as_object()?;
        self.mapper.decode_nested::<M>(map, self.depth + 1)
    }
}

/// Conversion between a property value and its JSON form.
pub trait JsonField: Sized {
    const SHAPE: Shape;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError>;

    fn decode_field(value: &Value, cx: &DecodeCx<'_>) -> Option<Self>;
}

impl JsonField for String {
    const SHAPE: Shape = Shape::Scalar;

    fn encode_field(&self, _cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        Ok(Value::String(self.clone()))
    }

    fn decode_field(value: &Value, _cx: &DecodeCx<'_>) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }
}

impl JsonField for bool {
    const SHAPE: Shape = Shape::Scalar;

    fn encode_field(&self, _cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }

    fn decode_field(value: &Value, _cx: &DecodeCx<'_>) -> Option<Self> {
        value.as_bool()
    }
}

macro_rules! signed_field {
    ($($ty:ty),*) => {$(
        impl JsonField for $ty {
            const SHAPE: Shape = Shape::Scalar;

            fn encode_field(&self, _cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
                Ok(Value::from(*self))
            }

            fn decode_field(value: &Value, _cx: &DecodeCx<'_>) -> Option<Self> {
                value.as_i64().and_then(|n| <$ty>::try_from(n).ok())
            }
        }
    )*};
}

macro_rules! unsigned_field {
    ($($ty:ty),*) => {$(
        impl JsonField for $ty {
            const SHAPE: Shape = Shape::Scalar;

            fn encode_field(&self, _cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
                Ok(Value::from(*self))
            }

            fn decode_field(value: &Value, _cx: &DecodeCx<'_>) -> Option<Self> {
                value.as_u64().and_then(|n| <$ty>::try_from(n).ok())
            }
        }
    )*};
}

signed_field!(i8, i16, i32, i64, isize);
unsigned_field!(u8, u16, u32, u64, usize);

impl JsonField for f64 {
    const SHAPE: Shape = Shape::Scalar;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| cx.non_finite())
    }

    fn decode_field(value: &Value, _cx: &DecodeCx<'_>) -> Option<Self> {
        value.as_f64()
    }
}

impl JsonField for f32 {
    const SHAPE: Shape = Shape::Scalar;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        f64::from(*self).encode_field(cx)
    }

    fn decode_field(value: &Value, _cx: &DecodeCx<'_>) -> Option<Self> {
        // Out-of-range numbers would narrow to infinity.
        value
            .as_f64()
            .map(|n| n as f32)
            .filter(|n| n.is_finite())
    }
}

impl JsonField for Value {
    const SHAPE: Shape = Shape::Any;

    fn encode_field(&self, _cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        Ok(self.clone())
    }

    fn decode_field(value: &Value, _cx: &DecodeCx<'_>) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: JsonField> JsonField for Option<T> {
    const SHAPE: Shape = T::SHAPE;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        match self {
            Some(inner) => inner.encode_field(cx),
            None => Ok(Value::Null),
        }
    }

    fn decode_field(value: &Value, cx: &DecodeCx<'_>) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::decode_field(value, cx).map(Some)
    }
}

impl<T: JsonField> JsonField for Box<T> {
    const SHAPE: Shape = T::SHAPE;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        (**self).encode_field(cx)
    }

    fn decode_field(value: &Value, cx: &DecodeCx<'_>) -> Option<Self> {
        T::decode_field(value, cx).map(Box::new)
    }
}

/// Typed sequences decode element by element; one mismatched element leaves
/// the whole property at its default.
impl<T: JsonField> JsonField for Vec<T> {
    const SHAPE: Shape = Shape::List;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        self.iter()
            .map(|item| item.encode_field(cx))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn decode_field(value: &Value, cx: &DecodeCx<'_>) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| T::decode_field(item, cx))
            .collect()
    }
}

impl<T: JsonField> JsonField for HashMap<String, T> {
    const SHAPE: Shape = Shape::Map;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        encode_entries(self.iter(), cx)
    }

    fn decode_field(value: &Value, cx: &DecodeCx<'_>) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(key, item)| T::decode_field(item, cx).map(|item| (key.clone(), item)))
            .collect()
    }
}

impl<T: JsonField> JsonField for BTreeMap<String, T> {
    const SHAPE: Shape = Shape::Map;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        encode_entries(self.iter(), cx)
    }

    fn decode_field(value: &Value, cx: &DecodeCx<'_>) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(key, item)| T::decode_field(item, cx).map(|item| (key.clone(), item)))
            .collect()
    }
}

fn encode_entries<'m, T, I>(entries: I, cx: &EncodeCx<'_>) -> Result<Value, EncodeError>
where
    T: JsonField + 'm,
    I: Iterator<Item = (&'m String, &'m T)>,
{
    let mut out = serde_json::Map::new();
    for (key, item) in entries {
        out.insert(key.clone(), item.encode_field(cx)?);
    }
    Ok(Value::Object(out))
}

/// Human-readable JSON type name, for diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
