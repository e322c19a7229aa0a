//! HTTP surface for the commands resource.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod patch;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::routing::get;
use axum::Router;

use crate::db::CommanderRepo;

pub use dto::{CommandCreateDto, CommandReadDto, CommandUpdateDto};
pub use error::{ApiError, ApiResult};
pub use patch::{PatchDocument, PatchError};

pub const COMMANDS_PATH: &str = "/api/commands";

/// Router state: the one repository every request goes through.
#[derive(Clone)]
pub struct AppState {
    repo: Arc<Mutex<Box<dyn CommanderRepo>>>,
}

impl AppState {
    pub fn new(repo: Box<dyn CommanderRepo>) -> Self {
        AppState {
            repo: Arc::new(Mutex::new(repo)),
        }
    }

    /// Held for a whole request so staged changes from two requests never mix.
    pub fn repo(&self) -> MutexGuard<'_, Box<dyn CommanderRepo>> {
        self.repo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            COMMANDS_PATH,
            get(handlers::list_commands).post(handlers::create_command),
        )
        .route(
            &format!("{COMMANDS_PATH}/:id"),
            get(handlers::get_command)
                .put(handlers::update_command)
                .patch(handlers::patch_command)
                .delete(handlers::delete_command),
        )
        .with_state(state)
}
