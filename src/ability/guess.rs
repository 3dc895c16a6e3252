use std::borrow::Cow;

use crate::{
    caller::Caller,
    gate::{Arguments, Subject},
    resource::ResourceType,
};

use super::ability_map::AbilityMap;

/// Either an explicit ability name or the subject of a check whose ability has to be guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityOrSubject {
    Ability(Cow<'static, str>),
    Subject(Subject),
}

impl AbilityOrSubject {
    /// Plain identifiers become abilities, qualified type names become [`Subject::Type`] subjects.
    pub fn parse(value: impl Into<Cow<'static, str>>) -> Self {
        let value = value.into();

        if is_plain_identifier(&value) {
            return Self::Ability(value);
        }

        Self::Subject(Subject::Type(ResourceType::new(value)))
    }
}

impl From<&'static str> for AbilityOrSubject {
    fn from(value: &'static str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for AbilityOrSubject {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl From<Subject> for AbilityOrSubject {
    fn from(value: Subject) -> Self {
        Self::Subject(value)
    }
}

impl From<ResourceType> for AbilityOrSubject {
    fn from(value: ResourceType) -> Self {
        Self::Subject(Subject::Type(value))
    }
}

/// `true` if `value` carries no namespace separator.
pub fn is_plain_identifier(value: &str) -> bool {
    !value.contains('\\') && !value.contains("::")
}

pub fn normalize_guessed_ability_name(method: &str, ability_map: &AbilityMap) -> Cow<'static, str> {
    Cow::Owned(ability_map.get(method).unwrap_or(method).to_owned())
}

/// Resolves the ability to check and the arguments to check it with.
///
/// Explicit abilities keep their `arguments`. For a subject, the ability is guessed from the method name
/// recorded by `caller` and the subject replaces the arguments.
pub fn parse_ability_and_arguments(
    ability: AbilityOrSubject,
    arguments: Arguments,
    caller: &Caller,
    ability_map: &AbilityMap,
) -> (Cow<'static, str>, Arguments) {
    match ability {
        AbilityOrSubject::Ability(ability) => (ability, arguments),
        AbilityOrSubject::Subject(subject) => {
            let ability = normalize_guessed_ability_name(caller.method(), ability_map);

            tracing::debug!(caller = %caller, %ability, %subject, "Guessed ability");

            (ability, Arguments::from(subject))
        }
    }
}
