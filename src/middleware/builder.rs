use std::borrow::Cow;

use indexmap::IndexMap;

use crate::{
    ability::{
        resource_ability_map, resource_methods_without_models, AbilityMap, OverrideStrategy,
        ResourceMethods,
    },
    resource::{Resource, ResourceType},
};

use super::{
    binding::MiddlewareBinding, options::MiddlewareOptions, registrar::MiddlewareRegistrar,
};

/// Builds the `can` middleware that authorizes every action method of a resource controller.
#[derive(Debug, Clone)]
pub struct ResourceBindingBuilder {
    resource_type: ResourceType,
    parameter: Option<Cow<'static, str>>,
    options: MiddlewareOptions,
    abilities: AbilityMap,
    methods_without_models: ResourceMethods,
    strategy: OverrideStrategy,
}

impl ResourceBindingBuilder {
    pub fn new(resource_type: impl Into<ResourceType>) -> Self {
        Self {
            resource_type: resource_type.into(),
            parameter: None,
            options: MiddlewareOptions::new(),
            abilities: AbilityMap::new(),
            methods_without_models: ResourceMethods::new(),
            strategy: OverrideStrategy::default(),
        }
    }

    pub fn for_resource<R>() -> Self
    where
        R: Resource + ?Sized,
    {
        Self::new(ResourceType::of::<R>())
    }

    /// Names the route parameter holding the model. Defaults to the snake cased type basename.
    pub fn with_parameter(mut self, parameter: impl Into<Cow<'static, str>>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn with_options(mut self, options: MiddlewareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_abilities(mut self, abilities: AbilityMap) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_methods_without_models(mut self, methods: ResourceMethods) -> Self {
        self.methods_without_models = methods;
        self
    }

    pub fn with_strategy(mut self, strategy: OverrideStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    pub fn parameter_name(&self) -> String {
        match self.parameter.as_deref() {
            Some(parameter) if !parameter.is_empty() => parameter.to_owned(),
            _ => self.resource_type.parameter_name(),
        }
    }

    /// The builder's abilities if any, else the resource type's extended abilities, resolved against the defaults.
    pub fn effective_ability_map(&self) -> AbilityMap {
        let extended = if self.abilities.is_empty() {
            self.resource_type.extended_abilities()
        } else {
            &self.abilities
        };

        resource_ability_map(extended, self.strategy)
    }

    pub fn effective_methods_without_models(&self) -> ResourceMethods {
        let extended = if self.methods_without_models.is_empty() {
            self.resource_type.extended_methods_without_models()
        } else {
            &self.methods_without_models
        };

        resource_methods_without_models(extended, self.strategy)
    }

    /// One binding per distinct `(ability, subject)` pair, in the order the pairs first appear in the ability map.
    pub fn bindings(&self) -> Vec<MiddlewareBinding> {
        let parameter = self.parameter_name();
        let methods_without_models = self.effective_methods_without_models();
        let ability_map = self.effective_ability_map();

        let mut grouped: IndexMap<(&str, &str), MiddlewareBinding> = IndexMap::new();

        for (method, ability) in ability_map.iter() {
            let subject = if methods_without_models.contains(method) {
                self.resource_type.name()
            } else {
                parameter.as_str()
            };

            let binding = grouped
                .entry((ability, subject))
                .or_insert_with(|| MiddlewareBinding::new(ability, subject));

            binding.methods.push(method.to_owned());
        }

        grouped.into_values().collect()
    }

    /// Registers every binding, restricted to its own methods, on top of the builder's options.
    #[tracing::instrument(skip_all, fields(resource = %self.resource_type))]
    pub fn register<R>(&self, registrar: &mut R)
    where
        R: MiddlewareRegistrar + ?Sized,
    {
        for binding in self.bindings() {
            tracing::debug!(middleware = %binding, methods = ?binding.methods, "Registering resource middleware");

            let options = self.options.clone().only(binding.methods.iter().cloned());

            registrar.register(binding.to_string(), options);
        }
    }
}
