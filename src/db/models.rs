use serde::{Deserialize, Serialize};

/// A stored how-to: what to do, the line that does it, and where it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    /// Assigned by the store on save. `None` until then.
    pub id: Option<i64>,
    pub how_to: String,
    pub line: String,
    pub platform: String,
}

impl Command {
    pub fn new(
        how_to: impl Into<String>,
        line: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Command {
            id: None,
            how_to: how_to.into(),
            line: line.into(),
            platform: platform.into(),
        }
    }
}
