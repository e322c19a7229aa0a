use super::models::Command;
use super::repo::{CommanderRepo, RepoError, RepoResult, SaveReport};

/// Read-only stand-in serving a fixed set of commands.
///
/// Useful for prototyping the HTTP surface without a database. Every mutation fails with
/// [`RepoError::Unsupported`].
#[derive(Debug, Clone)]
pub struct MockCommanderRepo {
    commands: Vec<Command>,
}

impl MockCommanderRepo {
    pub fn new() -> Self {
        let commands = sample_commands()
            .into_iter()
            .zip(0..)
            .map(|(mut cmd, id)| {
                cmd.id = Some(id);
                cmd
            })
            .collect();
        MockCommanderRepo { commands }
    }
}

impl Default for MockCommanderRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// The canned commands the mock serves and `commander seed` inserts.
pub fn sample_commands() -> Vec<Command> {
    vec![
        Command::new("Boil water", "Add water, add heat", "Stove top"),
        Command::new("Boil water", "Add water, microwave for 3 minutes", "Microwave"),
        Command::new("List files", "ls -la", "Linux"),
    ]
}

impl CommanderRepo for MockCommanderRepo {
    fn list_all(&self) -> RepoResult<Vec<Command>> {
        Ok(self.commands.clone())
    }

    fn get_by_id(&self, id: i64) -> RepoResult<Option<Command>> {
        Ok(self.commands.iter().find(|c| c.id == Some(id)).cloned())
    }

    fn create(&mut self, _cmd: Command) -> RepoResult<()> {
        Err(RepoError::Unsupported("create"))
    }

    fn update(&mut self, _cmd: &Command) -> RepoResult<()> {
        Err(RepoError::Unsupported("update"))
    }

    fn delete(&mut self, _cmd: &Command) -> RepoResult<()> {
        Err(RepoError::Unsupported("delete"))
    }

    fn save(&mut self) -> RepoResult<SaveReport> {
        Err(RepoError::Unsupported("save"))
    }
}
