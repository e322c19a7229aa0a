use thiserror::Error;

use super::models::Command;

pub type RepoResult<T> = std::result::Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0} is not supported by this repository")]
    Unsupported(&'static str),

    #[error("command has no id; it was never saved")]
    MissingId,
}

/// Outcome of a successful [`CommanderRepo::save`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Commands inserted by this save, with their new ids, in the order they were staged.
    pub created: Vec<Command>,
    pub updated: usize,
    pub deleted: usize,
}

impl SaveReport {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated == 0 && self.deleted == 0
    }
}

/// Storage operations over [`Command`]s.
///
/// Mutations are staged and only reach the backing store on [`save`](CommanderRepo::save).
pub trait CommanderRepo: Send {
    /// Every stored command, ordered by id.
    fn list_all(&self) -> RepoResult<Vec<Command>>;

    /// The command with `id`, or `None` when there is no such command.
    fn get_by_id(&self, id: i64) -> RepoResult<Option<Command>>;

    /// Stage `cmd` for insertion. Any id it carries is ignored; the store assigns one on save.
    fn create(&mut self, cmd: Command) -> RepoResult<()>;

    /// Stage a full overwrite of the mutable fields of an already stored command.
    fn update(&mut self, cmd: &Command) -> RepoResult<()>;

    /// Stage removal of an already stored command.
    fn delete(&mut self, cmd: &Command) -> RepoResult<()>;

    /// Commit all staged changes atomically.
    ///
    /// On error nothing is committed and the staged changes are dropped.
    fn save(&mut self) -> RepoResult<SaveReport>;
}
