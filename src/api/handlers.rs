use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::dto::{CommandCreateDto, CommandReadDto, CommandUpdateDto};
use super::error::{ApiError, ApiResult};
use super::extract::{ApiJson, ApiPath};
use super::patch::PatchDocument;
use super::{AppState, COMMANDS_PATH};
use crate::db::{Command, CommanderRepo, RepoError};
use crate::version::{APP_NAME, VERSION};

fn find_command(repo: &dyn CommanderRepo, id: i64) -> ApiResult<Command> {
    repo.get_by_id(id)?.ok_or(ApiError::NotFound)
}

/// Stage `cmd` as updated and commit.
fn update_and_save(repo: &mut dyn CommanderRepo, cmd: &Command) -> ApiResult<()> {
    repo.update(cmd)?;
    repo.save()?;
    Ok(())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "name": APP_NAME, "version": VERSION }))
}

pub async fn list_commands(State(state): State<AppState>) -> ApiResult<Json<Vec<CommandReadDto>>> {
    let commands = state.repo().list_all()?;
    debug!(count = commands.len(), "listing commands");

    let dtos = commands
        .into_iter()
        .map(CommandReadDto::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(dtos))
}

pub async fn get_command(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<CommandReadDto>> {
    let cmd = find_command(&**state.repo(), id)?;
    Ok(Json(CommandReadDto::try_from(cmd)?))
}

pub async fn create_command(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CommandCreateDto>,
) -> ApiResult<impl IntoResponse> {
    dto.validate()?;

    let created = {
        let mut repo = state.repo();
        repo.create(Command::from(dto))?;
        let report = repo.save()?;
        report.created.into_iter().next().ok_or(RepoError::MissingId)?
    };

    let read = CommandReadDto::try_from(created)?;
    info!(id = read.id, "command created");

    let location = format!("{COMMANDS_PATH}/{}", read.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(read)))
}

pub async fn update_command(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<CommandUpdateDto>,
) -> ApiResult<StatusCode> {
    let mut repo = state.repo();
    let mut cmd = find_command(&**repo, id)?;

    dto.validate()?;
    dto.apply_to(&mut cmd);
    update_and_save(&mut **repo, &cmd)?;

    info!(id, "command replaced");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch_command(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(document): ApiJson<Value>,
) -> ApiResult<StatusCode> {
    let mut repo = state.repo();
    let mut cmd = find_command(&**repo, id)?;

    let patch = PatchDocument::parse(document)?;
    let mut projection = CommandUpdateDto::from(&cmd);
    patch.apply_to(&mut projection)?;
    projection.validate()?;

    projection.apply_to(&mut cmd);
    update_and_save(&mut **repo, &cmd)?;

    info!(id, operations = patch.operations().len(), "command patched");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_command(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let mut repo = state.repo();
    let cmd = find_command(&**repo, id)?;

    repo.delete(&cmd)?;
    repo.save()?;

    info!(id, "command deleted");
    Ok(StatusCode::NO_CONTENT)
}
