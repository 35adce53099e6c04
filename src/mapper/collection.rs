//! Collection wrappers
//!
//! A collection wrapper re-wraps the list of mapped objects produced for a
//! `Type[]` property into a caller-defined container. The wrapper is chosen
//! once at the root construction and propagated to every nested one.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::object::MappedObject;

/// Container built from an ordered list of mapped objects.
pub trait Collection: fmt::Debug + Send + Sync {
    /// The wrapped objects, in input order
    fn items(&self) -> &[MappedObject];

    /// Name the wrapper was registered under
    fn type_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn len(&self) -> usize {
        self.items().len()
    }

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Builds a collection from the list as its sole argument.
pub type CollectionFactory = fn(Vec<MappedObject>) -> Arc<dyn Collection>;

/// A registered wrapper, resolved by name once per root construction.
#[derive(Clone)]
pub struct CollectionWrapper {
    name: Arc<str>,
    factory: CollectionFactory,
}

impl CollectionWrapper {
    pub(crate) fn new(name: &str, factory: CollectionFactory) -> Self {
        Self {
            name: Arc::from(name),
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrap(&self, items: Vec<MappedObject>) -> Arc<dyn Collection> {
        (self.factory)(items)
    }
}

impl fmt::Debug for CollectionWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollectionWrapper").field(&self.name).finish()
    }
}

/// Stock wrapper holding the objects as-is.
#[derive(Debug, Clone)]
pub struct ObjectCollection {
    items: Vec<MappedObject>,
}

impl ObjectCollection {
    pub const NAME: &'static str = "ObjectCollection";

    pub fn new(items: Vec<MappedObject>) -> Self {
        Self { items }
    }

    /// Factory suitable for `TypeRegistry::register_wrapper`
    pub fn factory(items: Vec<MappedObject>) -> Arc<dyn Collection> {
        Arc::new(Self::new(items))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappedObject> {
        self.items.iter()
    }
}

impl Collection for ObjectCollection {
    fn items(&self) -> &[MappedObject] {
        &self.items
    }

    fn type_name(&self) -> &str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<'a> IntoIterator for &'a ObjectCollection {
    type Item = &'a MappedObject;
    type IntoIter = std::slice::Iter<'a, MappedObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
