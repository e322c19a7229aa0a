use anyhow::Result;
use commander::db::{Command, CommanderRepo, MockCommanderRepo, RepoError, SqlCommanderRepo};
use tempfile::tempdir;

use test_utils::{create_test_command, create_test_repo};

fn create_and_save(repo: &mut dyn CommanderRepo, cmd: Command) -> Result<Command> {
    repo.create(cmd)?;
    let mut report = repo.save()?;
    assert_eq!(report.created.len(), 1);
    Ok(report.created.remove(0))
}

#[test]
fn test_command_crud() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;

    // Create
    let saved = create_and_save(
        &mut repo,
        create_test_command("Boil water", "Add water, add heat", "Stove top"),
    )?;
    let id = saved.id.expect("saved command has an id");

    // Read
    let retrieved = repo.get_by_id(id)?.unwrap();
    assert_eq!(retrieved.how_to, "Boil water");
    assert_eq!(retrieved.line, "Add water, add heat");
    assert_eq!(retrieved.platform, "Stove top");

    // Update
    let mut updated = retrieved.clone();
    updated.line = "Add water, add simmer".to_string();
    repo.update(&updated)?;
    let report = repo.save()?;
    assert_eq!(report.updated, 1);
    assert_eq!(repo.get_by_id(id)?.unwrap().line, "Add water, add simmer");

    // Delete
    repo.delete(&updated)?;
    let report = repo.save()?;
    assert_eq!(report.deleted, 1);
    assert!(repo.get_by_id(id)?.is_none());

    Ok(())
}

#[test]
fn test_create_assigns_id_only_on_save() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;

    let mut cmd = create_test_command("List files", "ls -la", "Linux");
    cmd.id = Some(99);
    repo.create(cmd)?;

    assert_eq!(repo.pending_len(), 1);
    assert!(repo.list_all()?.is_empty());

    let report = repo.save()?;
    assert_eq!(repo.pending_len(), 0);
    let id = report.created[0].id.unwrap();
    assert_ne!(id, 99);
    assert!(repo.get_by_id(99)?.is_none());
    assert!(repo.get_by_id(id)?.is_some());

    Ok(())
}

#[test]
fn test_ids_are_unique_and_never_reused() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;

    let first = create_and_save(&mut repo, create_test_command("a", "a", "x"))?;
    let second = create_and_save(&mut repo, create_test_command("b", "b", "x"))?;
    assert_ne!(first.id, second.id);

    repo.delete(&second)?;
    repo.save()?;

    let third = create_and_save(&mut repo, create_test_command("c", "c", "x"))?;
    assert!(third.id.unwrap() > second.id.unwrap());

    Ok(())
}

#[test]
fn test_save_commits_staged_changes_together() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;

    for i in 0..3 {
        repo.create(create_test_command(&format!("task {}", i), "echo", "Linux"))?;
    }
    let report = repo.save()?;

    assert_eq!(report.created.len(), 3);
    let ids: Vec<i64> = report.created.iter().map(|c| c.id.unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(report.created[2].how_to, "task 2");

    let listed = repo.list_all()?;
    assert_eq!(listed, report.created);

    Ok(())
}

#[test]
fn test_failed_save_rolls_back_everything() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;

    repo.create(create_test_command("fine", "echo ok", "Linux"))?;
    // how_to longer than the column allows
    repo.create(create_test_command(&"x".repeat(300), "echo bad", "Linux"))?;

    let err = repo.save().unwrap_err();
    assert!(matches!(err, RepoError::Storage(_)));

    assert_eq!(repo.pending_len(), 0);
    assert!(repo.list_all()?.is_empty());

    // Nothing left behind to be committed by a later save
    assert!(repo.save()?.is_empty());

    Ok(())
}

#[test]
fn test_full_update_is_idempotent() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;
    let mut cmd =
        create_and_save(&mut repo, create_test_command("Boil water", "heat", "Stove top"))?;

    cmd.how_to = "Boil water".to_string();
    cmd.line = "Add water, add simmer".to_string();
    cmd.platform = "Stove top".to_string();

    repo.update(&cmd)?;
    repo.save()?;
    let once = repo.list_all()?;

    repo.update(&cmd)?;
    repo.save()?;
    let twice = repo.list_all()?;

    assert_eq!(once, twice);
    assert_eq!(twice, vec![cmd]);

    Ok(())
}

#[test]
fn test_update_and_delete_require_id() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;
    let unsaved = create_test_command("a", "b", "c");

    assert!(matches!(repo.update(&unsaved), Err(RepoError::MissingId)));
    assert!(matches!(repo.delete(&unsaved), Err(RepoError::MissingId)));
    assert_eq!(repo.pending_len(), 0);

    Ok(())
}

#[test]
fn test_edge_cases() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;

    // Non-existent command
    assert!(repo.get_by_id(9999)?.is_none());
    assert!(repo.get_by_id(-1)?.is_none());

    // Special characters survive the round trip
    let special = "echo 'test' && ls -la | grep \"something\" > output.txt";
    let saved = create_and_save(&mut repo, create_test_command("Pipe things", special, "Linux"))?;
    assert_eq!(repo.get_by_id(saved.id.unwrap())?.unwrap().line, special);

    // Unicode
    let saved = create_and_save(
        &mut repo,
        create_test_command("Kaffee kochen", "☕ brühen", "Küche"),
    )?;
    assert_eq!(repo.get_by_id(saved.id.unwrap())?.unwrap().platform, "Küche");

    // Saving with nothing staged
    assert!(repo.save()?.is_empty());

    Ok(())
}

#[test]
fn test_data_persists_across_connections() -> Result<()> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");

    let id = {
        let mut repo = SqlCommanderRepo::new(db_path.to_str().unwrap())?;
        create_and_save(&mut repo, create_test_command("Boil water", "heat", "Stove top"))?
            .id
            .unwrap()
    };

    let repo = SqlCommanderRepo::new(db_path.to_str().unwrap())?;
    assert_eq!(repo.get_by_id(id)?.unwrap().how_to, "Boil water");

    Ok(())
}

#[test]
fn test_database_init() -> Result<()> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let _repo = SqlCommanderRepo::new(db_path.to_str().unwrap())?;

    let conn = rusqlite::Connection::open(db_path)?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM commands", [], |row| row.get(0))?;
    assert_eq!(count, 0);

    Ok(())
}

#[test]
fn test_in_memory_repo() -> Result<()> {
    let mut repo = SqlCommanderRepo::open_in_memory()?;
    let saved = create_and_save(&mut repo, create_test_command("a", "b", "c"))?;
    assert_eq!(repo.list_all()?, vec![saved]);
    Ok(())
}

/// Read-side checks that hold for any repository holding exactly the sample commands.
fn check_read_contract(repo: &dyn CommanderRepo) -> Result<()> {
    let all = repo.list_all()?;
    assert_eq!(all.len(), 3);

    for cmd in &all {
        let id = cmd.id.expect("listed commands carry ids");
        assert_eq!(repo.get_by_id(id)?.as_ref(), Some(cmd));
    }

    let missing = all.iter().filter_map(|c| c.id).max().unwrap() + 1000;
    assert!(repo.get_by_id(missing)?.is_none());

    assert!(all.iter().any(|c| c.line == "Add water, add heat"));

    Ok(())
}

#[test]
fn test_read_contract_mock() -> Result<()> {
    check_read_contract(&MockCommanderRepo::new())
}

#[test]
fn test_read_contract_sql() -> Result<()> {
    let (mut repo, _dir) = create_test_repo()?;
    commander::cli::commands::seed(&mut repo)?;
    check_read_contract(&repo)
}

#[test]
fn test_mock_serves_fixed_ids() -> Result<()> {
    let repo = MockCommanderRepo::new();
    let ids: Vec<Option<i64>> = repo.list_all()?.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![Some(0), Some(1), Some(2)]);
    assert_eq!(repo.get_by_id(0)?.unwrap().platform, "Stove top");
    Ok(())
}

#[test]
fn test_mock_rejects_mutations() -> Result<()> {
    let mut repo = MockCommanderRepo::new();
    let cmd = repo.get_by_id(1)?.unwrap();

    assert!(matches!(repo.create(cmd.clone()), Err(RepoError::Unsupported("create"))));
    assert!(matches!(repo.update(&cmd), Err(RepoError::Unsupported("update"))));
    assert!(matches!(repo.delete(&cmd), Err(RepoError::Unsupported("delete"))));
    assert!(matches!(repo.save(), Err(RepoError::Unsupported("save"))));

    // Data is unchanged
    assert_eq!(repo.list_all()?.len(), 3);
    Ok(())
}
