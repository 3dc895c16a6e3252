use std::{borrow::Cow, fmt};

use crate::ability::{AbilityMap, ResourceMethods};

use super::name::{basename, snake_case};

/// A type that can be authorized as a resource.
///
/// Implementors may extend the resource abilities and the methods that do not receive a model.
/// These extensions are used whenever a [`ResourceBindingBuilder`](crate::middleware::ResourceBindingBuilder)
/// is not given its own overrides.
pub trait Resource {
    fn resource_name() -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    fn extended_abilities() -> AbilityMap {
        AbilityMap::new()
    }

    fn extended_methods_without_models() -> ResourceMethods {
        ResourceMethods::new()
    }
}

/// Identifies a resource type by its (possibly qualified) name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    name: Cow<'static, str>,
    extended_abilities: AbilityMap,
    extended_methods_without_models: ResourceMethods,
}

impl ResourceType {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            extended_abilities: AbilityMap::new(),
            extended_methods_without_models: ResourceMethods::new(),
        }
    }

    pub fn of<R>() -> Self
    where
        R: Resource + ?Sized,
    {
        Self::new(R::resource_name())
            .with_extended_abilities(R::extended_abilities())
            .with_extended_methods_without_models(R::extended_methods_without_models())
    }

    pub fn with_extended_abilities(mut self, abilities: AbilityMap) -> Self {
        self.extended_abilities = abilities;
        self
    }

    pub fn with_extended_methods_without_models(mut self, methods: ResourceMethods) -> Self {
        self.extended_methods_without_models = methods;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn basename(&self) -> &str {
        basename(&self.name)
    }

    /// The route parameter name derived from the type name, e.g. `blog_post` for `app::models::BlogPost`.
    pub fn parameter_name(&self) -> String {
        snake_case(self.basename())
    }

    pub fn extended_abilities(&self) -> &AbilityMap {
        &self.extended_abilities
    }

    pub fn extended_methods_without_models(&self) -> &ResourceMethods {
        &self.extended_methods_without_models
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&'static str> for ResourceType {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BlogPost;

    impl Resource for BlogPost {}

    struct Versioned<T>(std::marker::PhantomData<T>);

    impl<T> Resource for Versioned<T> {}

    struct Invoice;

    impl Resource for Invoice {
        fn resource_name() -> Cow<'static, str> {
            Cow::Borrowed("billing::Invoice")
        }

        fn extended_abilities() -> AbilityMap {
            AbilityMap::from_iter([("archive", "remove")])
        }

        fn extended_methods_without_models() -> ResourceMethods {
            ResourceMethods::from_iter(["search"])
        }
    }

    #[test]
    fn parameter_name_is_derived_from_the_basename() {
        assert_eq!(ResourceType::new("Post").parameter_name(), "post");
        assert_eq!(ResourceType::new("App\\Models\\BlogPost").parameter_name(), "blog_post");
    }

    #[test]
    fn resource_type_of_uses_the_rust_type_name() {
        let resource_type = ResourceType::of::<BlogPost>();

        assert!(resource_type.name().ends_with("::BlogPost"));
        assert_eq!(resource_type.basename(), "BlogPost");
        assert_eq!(resource_type.parameter_name(), "blog_post");
        assert!(resource_type.extended_abilities().is_empty());
    }

    #[test]
    fn generic_resource_types_derive_the_outer_name() {
        let resource_type = ResourceType::of::<Versioned<BlogPost>>();

        assert!(resource_type.name().contains("::Versioned<"));
        assert_eq!(resource_type.basename(), "Versioned");
        assert_eq!(resource_type.parameter_name(), "versioned");
    }

    #[test]
    fn resource_type_of_carries_extensions() {
        let resource_type = ResourceType::of::<Invoice>();

        assert_eq!(resource_type.name(), "billing::Invoice");
        assert_eq!(resource_type.extended_abilities().get("archive"), Some("remove"));
        assert!(resource_type.extended_methods_without_models().contains("search"));
    }
}
