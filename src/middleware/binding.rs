use std::fmt;

/// A `can` middleware checking `ability` against `subject` for a group of resource action methods.
///
/// `subject` is either the resource type name or the name of the route parameter holding the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddlewareBinding {
    pub ability: String,
    pub subject: String,
    pub methods: Vec<String>,
}

impl MiddlewareBinding {
    pub fn new(ability: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            ability: ability.into(),
            subject: subject.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }
}

/// Renders the middleware name, `can:<ability>,<subject>`.
impl fmt::Display for MiddlewareBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "can:{},{}", self.ability, self.subject)
    }
}
