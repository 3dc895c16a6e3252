mod name;
mod resource_type;

pub use name::{basename, snake_case};
pub use resource_type::{Resource, ResourceType};
