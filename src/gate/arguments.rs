use std::{borrow::Cow, fmt};

use crate::resource::ResourceType;

/// What an ability is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// The resource type itself, used by actions that have no model yet.
    Type(ResourceType),
    /// A single model of a resource type, identified by its key.
    Model {
        resource: ResourceType,
        key: Cow<'static, str>,
    },
}

impl Subject {
    pub fn model(resource: impl Into<ResourceType>, key: impl Into<Cow<'static, str>>) -> Self {
        Self::Model {
            resource: resource.into(),
            key: key.into(),
        }
    }

    pub fn resource_type(&self) -> &ResourceType {
        match self {
            Subject::Type(resource) | Subject::Model { resource, .. } => resource,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Type(resource) => write!(f, "{resource}"),
            Subject::Model { resource, key } => write!(f, "{resource}:{key}"),
        }
    }
}

impl From<ResourceType> for Subject {
    fn from(value: ResourceType) -> Self {
        Self::Type(value)
    }
}

/// Ordered arguments handed to the gate with an ability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(Vec<Subject>);

impl Arguments {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, subject: impl Into<Subject>) -> Self {
        self.0.push(subject.into());
        self
    }

    pub fn first(&self) -> Option<&Subject> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Subject> {
        self.0
    }
}

impl From<Subject> for Arguments {
    fn from(value: Subject) -> Self {
        Self(vec![value])
    }
}

impl From<ResourceType> for Arguments {
    fn from(value: ResourceType) -> Self {
        Self(vec![Subject::Type(value)])
    }
}

impl From<Vec<Subject>> for Arguments {
    fn from(value: Vec<Subject>) -> Self {
        Self(value)
    }
}

impl From<()> for Arguments {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl FromIterator<Subject> for Arguments {
    fn from_iter<I: IntoIterator<Item = Subject>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
