//! Property descriptors: the `(name, shape, accessor, mutator)` entries a
//! model's schema is made of.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::EncodeError;
use crate::field::{DecodeCx, EncodeCx, JsonField, Shape};

type Getter<T> = Arc<dyn Fn(&T, &EncodeCx<'_>) -> Result<Value, EncodeError> + Send + Sync>;
type Setter<T> = Arc<dyn Fn(&mut T, &Value, &DecodeCx<'_>) -> bool + Send + Sync>;

fn getter<T, G>(get: G) -> Getter<T>
where
    G: Fn(&T, &EncodeCx<'_>) -> Result<Value, EncodeError> + Send + Sync + 'static,
{
    Arc::new(get)
}

fn setter<T, S>(set: S) -> Setter<T>
where
    S: Fn(&mut T, &Value, &DecodeCx<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(set)
}

/// One declared property of model type `T`.
pub struct Property<T> {
    name: &'static str,
    shape: Shape,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T: 'static> Property<T> {
    /// A property stored directly in a field of `T`.
    pub fn field<F: JsonField + 'static>(
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        Self {
            name,
            shape: F::SHAPE,
            get: getter(move |model: &T, cx: &EncodeCx<'_>| get(model).encode_field(cx)),
            set: setter(move |model: &mut T, value: &Value, cx: &DecodeCx<'_>| {
                match F::decode_field(value, cx) {
                    Some(decoded) => {
                        *get_mut(model) = decoded;
                        true
                    }
                    None => false,
                }
            }),
        }
    }

    /// Re-targets a property of an embedded parent model `P` onto `T`.
    pub fn inherit<P: 'static>(
        parent: &Property<P>,
        project: fn(&T) -> &P,
        project_mut: fn(&mut T) -> &mut P,
    ) -> Self {
        let get = Arc::clone(&parent.get);
        let set = Arc::clone(&parent.set);
        Self {
            name: parent.name,
            shape: parent.shape,
            get: getter(move |model: &T, cx: &EncodeCx<'_>| get(project(model), cx)),
            set: setter(move |model: &mut T, value: &Value, cx: &DecodeCx<'_>| {
                set(project_mut(model), value, cx)
            }),
        }
    }
}

impl<T> Property<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Encodes the current value of this property on `model`.
    pub fn read(&self, model: &T, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        (self.get)(model, cx)
    }

    /// Decodes `value` into this property. Returns `false` (leaving the
    /// property untouched) when the value does not fit the declared type.
    pub fn assign(&self, model: &mut T, value: &Value, cx: &DecodeCx<'_>) -> bool {
        (self.set)(model, value, cx)
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}
