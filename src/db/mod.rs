pub mod mock;
pub mod models;
pub mod repo;
pub mod store;

pub use mock::MockCommanderRepo;
pub use models::Command;
pub use repo::{CommanderRepo, RepoError, RepoResult, SaveReport};
pub use store::SqlCommanderRepo;
