//! Decoder-map driven lists.
//!
//! A [`ModelList`] property holds a sequence whose element type is chosen at
//! runtime by the owning model's decoder map. Without a decoder entry every
//! element stays raw JSON; with one, object elements become boxed models.

use serde_json::Value;

use crate::error::EncodeError;
use crate::field::{DecodeCx, EncodeCx, JsonField, Shape};
use crate::kind::{AnyModel, Model};

#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Raw(Value),
    Model(Box<dyn AnyModel>),
}

impl ListItem {
    pub fn model<M: Model>(model: M) -> Self {
        ListItem::Model(Box::new(model))
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            ListItem::Raw(value) => Some(value),
            ListItem::Model(_) => None,
        }
    }

    pub fn as_model(&self) -> Option<&(dyn AnyModel + 'static)> {
        match self {
            ListItem::Model(model) => Some(model.as_ref()),
            ListItem::Raw(_) => None,
        }
    }

    pub fn downcast_ref<M: Model>(&self) -> Option<&M> {
        self.as_model().and_then(|model| model.downcast_ref::<M>())
    }
}

impl From<Value> for ListItem {
    fn from(value: Value) -> Self {
        ListItem::Raw(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelList {
    items: Vec<ListItem>,
}

impl ModelList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ListItem) {
        self.items.push(item);
    }

    pub fn push_model<M: Model>(&mut self, model: M) {
        self.items.push(ListItem::model(model));
    }

    pub fn push_raw(&mut self, value: Value) {
        self.items.push(ListItem::Raw(value));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    pub fn raw(&self, index: usize) -> Option<&Value> {
        self.get(index).and_then(ListItem::as_raw)
    }

    pub fn model<M: Model>(&self, index: usize) -> Option<&M> {
        self.get(index).and_then(ListItem::downcast_ref::<M>)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListItem> {
        self.items.iter()
    }

    /// Every element that decoded to an `M`, in order.
    pub fn models<M: Model>(&self) -> impl Iterator<Item = &M> + '_ {
        self.items.iter().filter_map(ListItem::downcast_ref::<M>)
    }

    pub fn into_items(self) -> Vec<ListItem> {
        self.items
    }
}

impl FromIterator<ListItem> for ModelList {
    fn from_iter<I: IntoIterator<Item = ListItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ListItem>> for ModelList {
    fn from(items: Vec<ListItem>) -> Self {
        Self { items }
    }
}

impl IntoIterator for ModelList {
    type Item = ListItem;
    type IntoIter = std::vec::IntoIter<ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModelList {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl JsonField for ModelList {
    const SHAPE: Shape = Shape::List;

    fn encode_field(&self, cx: &EncodeCx<'_>) -> Result<Value, EncodeError> {
        self.items
            .iter()
            .map(|item| match item {
                ListItem::Raw(value) => Ok(value.clone()),
                ListItem::Model(model) => model.encode_at(cx.mapper, cx.depth + 1).map(Value::Object),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn decode_field(value: &Value, cx: &DecodeCx<'_>) -> Option<Self> {
        let values = value.as_array()?;
        let decoder = cx
            .owner
            .and_then(|owner| cx.mapper.registry().decoder(owner, cx.property));
        Some(cx.mapper.decode_list_at(values, decoder, cx.depth))
    }
}
