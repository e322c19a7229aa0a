pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod logging;
pub mod server;
pub mod version;

pub use api::{router, AppState};
pub use db::{CommanderRepo, MockCommanderRepo, SqlCommanderRepo};
pub use version::VERSION;
