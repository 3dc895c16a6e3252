use serde::{Deserialize, Serialize};

use crate::ability::{
    resource_ability_map, resource_methods_without_models, AbilityMap, OverrideStrategy,
    ResourceMethods,
};

/// Application wide overrides of the resource abilities.
///
/// ```json
/// {
///     "abilities": { "publish": "update" },
///     "methods_without_models": ["index", "search"],
///     "strategy": "merge"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizerConfig {
    pub abilities: AbilityMap,
    pub methods_without_models: ResourceMethods,
    pub strategy: OverrideStrategy,
}

impl AuthorizerConfig {
    pub fn ability_map(&self) -> AbilityMap {
        resource_ability_map(&self.abilities, self.strategy)
    }

    pub fn methods_without_models(&self) -> ResourceMethods {
        resource_methods_without_models(&self.methods_without_models, self.strategy)
    }
}
