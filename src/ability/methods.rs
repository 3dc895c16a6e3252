use std::borrow::Cow;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::strategy::OverrideStrategy;

/// Resource action methods that are checked against the resource type instead of a model.
pub const DEFAULT_METHODS_WITHOUT_MODELS: [&str; 3] = ["index", "create", "store"];

/// Ordered set of resource action method names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceMethods(IndexSet<Cow<'static, str>>);

impl ResourceMethods {
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    pub fn defaults_without_models() -> Self {
        DEFAULT_METHODS_WITHOUT_MODELS.into_iter().collect()
    }

    pub fn insert(&mut self, method: impl Into<Cow<'static, str>>) -> bool {
        self.0.insert(method.into())
    }

    pub fn with(mut self, method: impl Into<Cow<'static, str>>) -> Self {
        self.insert(method);
        self
    }

    pub fn contains(&self, method: &str) -> bool {
        self.0.contains(method)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(AsRef::as_ref)
    }

    pub fn union(mut self, other: &ResourceMethods) -> Self {
        self.0.extend(other.0.iter().cloned());
        self
    }
}

impl<M> FromIterator<M> for ResourceMethods
where
    M: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Resolves the methods that do not receive a model, following the same rules as
/// [`resource_ability_map`](super::resource_ability_map).
pub fn resource_methods_without_models(
    extended: &ResourceMethods,
    strategy: OverrideStrategy,
) -> ResourceMethods {
    if extended.is_empty() {
        return ResourceMethods::defaults_without_models();
    }

    match strategy {
        OverrideStrategy::Replace => extended.clone(),
        OverrideStrategy::Merge => ResourceMethods::defaults_without_models().union(extended),
    }
}
