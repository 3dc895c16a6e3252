use serde::{Deserialize, Serialize};

/// How caller supplied resource abilities or methods combine with the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideStrategy {
    /// A non-empty override is used as is and the defaults are dropped.
    #[default]
    Replace,
    /// A non-empty override is layered on top of the defaults. Overriding values win.
    Merge,
}
