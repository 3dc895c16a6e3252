use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::strategy::OverrideStrategy;

/// Resource action methods and the abilities they are checked against.
pub const DEFAULT_RESOURCE_ABILITIES: [(&str, &str); 6] = [
    ("show", "view"),
    ("create", "create"),
    ("store", "create"),
    ("edit", "update"),
    ("update", "update"),
    ("destroy", "delete"),
];

/// Ordered mapping from resource action method to ability name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityMap(IndexMap<Cow<'static, str>, Cow<'static, str>>);

impl AbilityMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn defaults() -> Self {
        DEFAULT_RESOURCE_ABILITIES.into_iter().collect()
    }

    /// Inserts or replaces the ability of `method`. A replaced method keeps its position.
    pub fn insert(
        &mut self,
        method: impl Into<Cow<'static, str>>,
        ability: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        self.0.insert(method.into(), ability.into());
        self
    }

    pub fn with(
        mut self,
        method: impl Into<Cow<'static, str>>,
        ability: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.insert(method, ability);
        self
    }

    pub fn get(&self, method: &str) -> Option<&str> {
        self.0.get(method).map(AsRef::as_ref)
    }

    pub fn contains(&self, method: &str) -> bool {
        self.0.contains_key(method)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(method, ability)| (method.as_ref(), ability.as_ref()))
    }

    /// Layers `overrides` on top of `self`.
    pub fn merged(mut self, overrides: &AbilityMap) -> Self {
        for (method, ability) in overrides.0.iter() {
            self.0.insert(method.clone(), ability.clone());
        }

        self
    }
}

impl<M, A> FromIterator<(M, A)> for AbilityMap
where
    M: Into<Cow<'static, str>>,
    A: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (M, A)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(method, ability)| (method.into(), ability.into()))
                .collect(),
        )
    }
}

/// Resolves the ability map used for resource authorization.
///
/// An empty `extended` map yields the defaults. Otherwise `strategy` decides whether `extended` replaces
/// the defaults or is merged on top of them.
pub fn resource_ability_map(extended: &AbilityMap, strategy: OverrideStrategy) -> AbilityMap {
    if extended.is_empty() {
        return AbilityMap::defaults();
    }

    match strategy {
        OverrideStrategy::Replace => extended.clone(),
        OverrideStrategy::Merge => AbilityMap::defaults().merged(extended),
    }
}
