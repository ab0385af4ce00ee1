//! Model types and their runtime descriptors.
//!
//! A [`Model`] is a plain struct with a static property list. Every model
//! also owns a `'static` [`ModelKind`], which is what the registry keys its
//! configuration on and what a decoder map points at.

use std::any::{Any, TypeId};
use std::fmt;

use crate::error::EncodeError;
use crate::mapper::Mapper;
use crate::property::Property;
use crate::JsonMap;

/// A record type that participates in JSON mapping.
///
/// Usually implemented through [`json_model!`](crate::json_model), which
/// builds the property list once per type.
pub trait Model: Default + fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// The runtime descriptor of this type.
    fn kind() -> &'static ModelKind;

    /// Declared properties, inherited ones first.
    fn properties() -> &'static [Property<Self>];
}

type DecodeFn = fn(&Mapper<'_>, &JsonMap, usize) -> Box<dyn AnyModel>;

/// Runtime descriptor of a model type.
pub struct ModelKind {
    name: &'static str,
    type_id: fn() -> TypeId,
    parent: Option<fn() -> &'static ModelKind>,
    decode: DecodeFn,
}

impl ModelKind {
    /// Describes `M`. `parent` is the kind of the model `M` extends, if any.
    pub const fn of<M: Model>(name: &'static str, parent: Option<fn() -> &'static ModelKind>) -> Self {
        Self {
            name,
            type_id: TypeId::of::<M>,
            parent,
            decode: decode_boxed::<M>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub fn parent(&self) -> Option<&'static ModelKind> {
        self.parent.map(|parent| parent())
    }

    /// This kind followed by each of its ancestors, nearest first.
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static ModelKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    /// Whether `self` is `other` or extends it (directly or transitively).
    pub fn extends(&'static self, other: &ModelKind) -> bool {
        self.ancestry().any(|kind| kind == other)
    }

    /// Decodes a boxed instance of the described type.
    pub fn decode(&self, mapper: &Mapper<'_>, map: &JsonMap) -> Box<dyn AnyModel> {
        (self.decode)(mapper, map, 0)
    }

    pub(crate) fn decode_at(&self, mapper: &Mapper<'_>, map: &JsonMap, depth: usize) -> Box<dyn AnyModel> {
        (self.decode)(mapper, map, depth)
    }
}

impl PartialEq for ModelKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for ModelKind {}

impl fmt::Debug for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelKind")
            .field("name", &self.name)
            .field("parent", &self.parent().map(ModelKind::name))
            .finish()
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn decode_boxed<M: Model>(mapper: &Mapper<'_>, map: &JsonMap, depth: usize) -> Box<dyn AnyModel> {
    Box::new(mapper.decode_at::<M>(map, depth))
}

/// Object-safe view of any [`Model`], used where the concrete type is only
/// known at runtime (decoder-map driven lists).
pub trait AnyModel: fmt::Debug + Send + Sync {
    fn model_kind(&self) -> &'static ModelKind;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn clone_model(&self) -> Box<dyn AnyModel>;

    fn eq_model(&self, other: &dyn AnyModel) -> bool;

    #[doc(hidden)]
    fn encode_at(&self, mapper: &Mapper<'_>, depth: usize) -> Result<JsonMap, EncodeError>;
}

impl<M: Model> AnyModel for M {
    fn model_kind(&self) -> &'static ModelKind {
        M::kind()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_model(&self) -> Box<dyn AnyModel> {
        Box::new(self.clone())
    }

    fn eq_model(&self, other: &dyn AnyModel) -> bool {
        other.as_any().downcast_ref::<M>() == Some(self)
    }

    fn encode_at(&self, mapper: &Mapper<'_>, depth: usize) -> Result<JsonMap, EncodeError> {
        mapper.encode_at(self, depth)
    }
}

impl dyn AnyModel {
    pub fn is<M: Model>(&self) -> bool {
        self.as_any().is::<M>()
    }

    pub fn downcast_ref<M: Model>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }

    pub fn downcast_mut<M: Model>(&mut self) -> Option<&mut M> {
        self.as_any_mut().downcast_mut::<M>()
    }
}

impl Clone for Box<dyn AnyModel> {
    fn clone(&self) -> Self {
        (**self).clone_model()
    }
}

impl PartialEq for Box<dyn AnyModel> {
    fn eq(&self, other: &Self) -> bool {
        (**self).eq_model(&**other)
    }
}
