//! JSON Patch (RFC 6902) documents restricted to the fields of [`CommandUpdateDto`].
//!
//! A document is parsed into typed operations up front, so a bad path, value or op is
//! reported before anything is touched. [`PatchDocument::apply_to`] then works on a copy
//! and only writes back when every operation succeeded.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::dto::CommandUpdateDto;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("malformed patch document: {0}")]
    Malformed(String),

    #[error("operation {index}: unknown op '{op}'")]
    UnknownOp { index: usize, op: String },

    #[error("operation {index}: '{op}' is not allowed, {reason}")]
    UnsupportedOp {
        index: usize,
        op: String,
        reason: &'static str,
    },

    #[error("operation {index}: path '{path}' does not name a command field")]
    UnknownPath { index: usize, path: String },

    #[error("operation {index}: value for '{path}' must be a string")]
    InvalidValue { index: usize, path: String },

    #[error("operation {index}: '{op}' requires a 'from' path")]
    MissingFrom { index: usize, op: String },

    #[error("operation {index}: test failed, '{path}' does not hold the expected value")]
    TestFailed { index: usize, path: String },
}

/// A patchable field of the update projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandField {
    HowTo,
    Line,
    Platform,
}

impl CommandField {
    pub const ALL: [CommandField; 3] = [
        CommandField::HowTo,
        CommandField::Line,
        CommandField::Platform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandField::HowTo => "howTo",
            CommandField::Line => "line",
            CommandField::Platform => "platform",
        }
    }

    /// Resolve a JSON Pointer such as `/line`. Field names match case-insensitively.
    pub fn from_path(path: &str) -> Option<Self> {
        let name = path.strip_prefix('/')?;
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    fn get(self, dto: &CommandUpdateDto) -> &str {
        match self {
            CommandField::HowTo => &dto.how_to,
            CommandField::Line => &dto.line,
            CommandField::Platform => &dto.platform,
        }
    }

    fn slot(self, dto: &mut CommandUpdateDto) -> &mut String {
        match self {
            CommandField::HowTo => &mut dto.how_to,
            CommandField::Line => &mut dto.line,
            CommandField::Platform => &mut dto.platform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOperation {
    /// `replace`, or `add` on a field that always exists.
    Set { field: CommandField, value: String },
    Test { field: CommandField, value: String },
    Copy { from: CommandField, to: CommandField },
}

#[derive(Debug, Deserialize)]
struct RawOperation {
    op: String,
    path: String,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    from: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchDocument {
    operations: Vec<PatchOperation>,
}

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        PatchDocument { operations }
    }

    /// Parse and validate a JSON Patch array. Nothing is applied here.
    pub fn parse(document: Value) -> Result<Self, PatchError> {
        let raw: Vec<RawOperation> =
            serde_json::from_value(document).map_err(|e| PatchError::Malformed(e.to_string()))?;

        let operations = raw
            .into_iter()
            .enumerate()
            .map(|(index, op)| parse_operation(index, op))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PatchDocument { operations })
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply every operation to `target`, or none of them.
    pub fn apply_to(&self, target: &mut CommandUpdateDto) -> Result<(), PatchError> {
        let mut working = target.clone();

        for (index, operation) in self.operations.iter().enumerate() {
            match operation {
                PatchOperation::Set { field, value } => {
                    *field.slot(&mut working) = value.clone();
                }
                PatchOperation::Test { field, value } => {
                    if field.get(&working) != value.as_str() {
                        return Err(PatchError::TestFailed {
                            index,
                            path: format!("/{}", field.name()),
                        });
                    }
                }
                PatchOperation::Copy { from, to } => {
                    let value = from.get(&working).to_string();
                    *to.slot(&mut working) = value;
                }
            }
        }

        *target = working;
        Ok(())
    }
}

fn parse_field(index: usize, path: &str) -> Result<CommandField, PatchError> {
    CommandField::from_path(path).ok_or_else(|| PatchError::UnknownPath {
        index,
        path: path.to_string(),
    })
}

fn parse_string_value(
    index: usize,
    path: &str,
    value: Option<Value>,
) -> Result<String, PatchError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(PatchError::InvalidValue {
            index,
            path: path.to_string(),
        }),
    }
}

fn parse_operation(index: usize, raw: RawOperation) -> Result<PatchOperation, PatchError> {
    let op = raw.op.to_ascii_lowercase();
    match op.as_str() {
        "replace" | "add" => {
            let field = parse_field(index, &raw.path)?;
            let value = parse_string_value(index, &raw.path, raw.value)?;
            Ok(PatchOperation::Set { field, value })
        }
        "test" => {
            let field = parse_field(index, &raw.path)?;
            let value = parse_string_value(index, &raw.path, raw.value)?;
            Ok(PatchOperation::Test { field, value })
        }
        "copy" => {
            let to = parse_field(index, &raw.path)?;
            let from = raw.from.ok_or_else(|| PatchError::MissingFrom {
                index,
                op: raw.op.clone(),
            })?;
            let from = parse_field(index, &from)?;
            Ok(PatchOperation::Copy { from, to })
        }
        "remove" | "move" => Err(PatchError::UnsupportedOp {
            index,
            op: raw.op,
            reason: "every command field is required",
        }),
        _ => Err(PatchError::UnknownOp { index, op: raw.op }),
    }
}
