use rusqlite::{params, Connection, Row};
use tracing::debug;

use super::models::Command;
use super::repo::{CommanderRepo, RepoError, RepoResult, SaveReport};

pub const MAX_HOW_TO_LEN: usize = 250;
pub const MAX_PLATFORM_LEN: usize = 100;

#[derive(Debug)]
enum PendingChange {
    Insert(Command),
    Update(Command),
    Delete(i64),
}

/// [`CommanderRepo`] backed by a SQLite database.
pub struct SqlCommanderRepo {
    conn: Connection,
    path: String,
    pending: Vec<PendingChange>,
}

impl SqlCommanderRepo {
    /// Open (or create) the database at `path`. `":memory:"` gives a private in-memory database.
    pub fn new(path: &str) -> RepoResult<Self> {
        let conn = Connection::open(path)?;
        let repo = SqlCommanderRepo {
            conn,
            path: path.to_string(),
            pending: Vec::new(),
        };
        repo.init()?;
        Ok(repo)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::new(":memory:")
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of changes staged since the last save.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn init(&self) -> RepoResult<()> {
        // AUTOINCREMENT keeps ids of deleted rows from being handed out again.
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS commands (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    how_to TEXT NOT NULL CHECK (length(how_to) <= {MAX_HOW_TO_LEN}),
                    line TEXT NOT NULL,
                    platform TEXT NOT NULL CHECK (length(platform) <= {MAX_PLATFORM_LEN})
                )"
            ),
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_commands_platform ON commands(platform)",
            [],
        )?;

        Ok(())
    }

    fn stored_id(cmd: &Command) -> RepoResult<i64> {
        cmd.id.ok_or(RepoError::MissingId)
    }
}

fn command_from_row(row: &Row<'_>) -> rusqlite::Result<Command> {
    Ok(Command {
        id: Some(row.get(0)?),
        how_to: row.get(1)?,
        line: row.get(2)?,
        platform: row.get(3)?,
    })
}

impl CommanderRepo for SqlCommanderRepo {
    fn list_all(&self) -> RepoResult<Vec<Command>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, how_to, line, platform
             FROM commands
             ORDER BY id ASC",
        )?;

        let commands = stmt
            .query_map([], command_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(commands)
    }

    fn get_by_id(&self, id: i64) -> RepoResult<Option<Command>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, how_to, line, platform
             FROM commands
             WHERE id = ?1",
        )?;

        let mut rows = stmt.query([id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(command_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    fn create(&mut self, mut cmd: Command) -> RepoResult<()> {
        cmd.id = None;
        self.pending.push(PendingChange::Insert(cmd));
        Ok(())
    }

    fn update(&mut self, cmd: &Command) -> RepoResult<()> {
        Self::stored_id(cmd)?;
        self.pending.push(PendingChange::Update(cmd.clone()));
        Ok(())
    }

    fn delete(&mut self, cmd: &Command) -> RepoResult<()> {
        let id = Self::stored_id(cmd)?;
        self.pending.push(PendingChange::Delete(id));
        Ok(())
    }

    fn save(&mut self) -> RepoResult<SaveReport> {
        let pending = std::mem::take(&mut self.pending);
        let mut report = SaveReport::default();
        if pending.is_empty() {
            return Ok(report);
        }

        // Dropping the transaction on an early return rolls it back.
        let tx = self.conn.transaction()?;

        for change in pending {
            match change {
                PendingChange::Insert(mut cmd) => {
                    tx.execute(
                        "INSERT INTO commands (how_to, line, platform) VALUES (?1, ?2, ?3)",
                        params![cmd.how_to, cmd.line, cmd.platform],
                    )?;
                    cmd.id = Some(tx.last_insert_rowid());
                    report.created.push(cmd);
                }
                PendingChange::Update(cmd) => {
                    report.updated += tx.execute(
                        "UPDATE commands
                         SET how_to = ?1,
                             line = ?2,
                             platform = ?3
                         WHERE id = ?4",
                        params![cmd.how_to, cmd.line, cmd.platform, cmd.id],
                    )?;
                }
                PendingChange::Delete(id) => {
                    report.deleted += tx.execute("DELETE FROM commands WHERE id = ?1", [id])?;
                }
            }
        }

        tx.commit()?;

        debug!(
            created = report.created.len(),
            updated = report.updated,
            deleted = report.deleted,
            "saved changes"
        );

        Ok(report)
    }
}
