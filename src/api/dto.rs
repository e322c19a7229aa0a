//! Wire shapes for the commands resource and their correspondence with [`Command`].
//!
//! | from              | to                | fields                         |
//! |-------------------|-------------------|--------------------------------|
//! | `Command`         | `CommandReadDto`  | id, howTo, line                |
//! | `CommandCreateDto`| `Command`         | howTo, line, platform          |
//! | `Command`         | `CommandUpdateDto`| howTo, line, platform          |
//! | `CommandUpdateDto`| `Command` (in place) | howTo, line, platform       |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::store::{MAX_HOW_TO_LEN, MAX_PLATFORM_LEN};
use crate::db::Command;

/// Public view of a command. `platform` is deliberately left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReadDto {
    pub id: i64,
    pub how_to: String,
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandCreateDto {
    pub how_to: String,
    pub line: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandUpdateDto {
    pub how_to: String,
    pub line: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError {
            field,
            reason: reason.into(),
        }
    }
}

fn validate_fields(how_to: &str, line: &str, platform: &str) -> Result<(), ValidationError> {
    for (field, value) in [("howTo", how_to), ("line", line), ("platform", platform)] {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "is required"));
        }
    }
    if how_to.chars().count() > MAX_HOW_TO_LEN {
        return Err(ValidationError::new(
            "howTo",
            format!("must be at most {MAX_HOW_TO_LEN} characters"),
        ));
    }
    if platform.chars().count() > MAX_PLATFORM_LEN {
        return Err(ValidationError::new(
            "platform",
            format!("must be at most {MAX_PLATFORM_LEN} characters"),
        ));
    }
    Ok(())
}

impl CommandCreateDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.how_to, &self.line, &self.platform)
    }
}

impl CommandUpdateDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.how_to, &self.line, &self.platform)
    }

    /// Overwrite the mutable fields of `target`. Its id is left alone.
    pub fn apply_to(self, target: &mut Command) {
        target.how_to = self.how_to;
        target.line = self.line;
        target.platform = self.platform;
    }
}

/// Fails for a command that has not been saved yet, since the read view always carries an id.
impl TryFrom<Command> for CommandReadDto {
    type Error = crate::db::RepoError;

    fn try_from(cmd: Command) -> Result<Self, Self::Error> {
        Ok(CommandReadDto {
            id: cmd.id.ok_or(crate::db::RepoError::MissingId)?,
            how_to: cmd.how_to,
            line: cmd.line,
        })
    }
}

impl From<CommandCreateDto> for Command {
    fn from(dto: CommandCreateDto) -> Self {
        Command {
            id: None,
            how_to: dto.how_to,
            line: dto.line,
            platform: dto.platform,
        }
    }
}

impl From<&Command> for CommandUpdateDto {
    fn from(cmd: &Command) -> Self {
        CommandUpdateDto {
            how_to: cmd.how_to.clone(),
            line: cmd.line.clone(),
            platform: cmd.platform.clone(),
        }
    }
}
