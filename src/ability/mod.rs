mod ability_map;
mod guess;
mod methods;
mod strategy;

pub use ability_map::{resource_ability_map, AbilityMap, DEFAULT_RESOURCE_ABILITIES};
pub use guess::{
    is_plain_identifier, normalize_guessed_ability_name, parse_ability_and_arguments,
    AbilityOrSubject,
};
pub use methods::{
    resource_methods_without_models, ResourceMethods, DEFAULT_METHODS_WITHOUT_MODELS,
};
pub use strategy::OverrideStrategy;
