//! Core domain logic for the pet adoption backend.
//! Owns the pet/adopter model, SQLite persistence and the use-case services.

pub mod db;
pub mod logging;
pub mod model;
pub mod password;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, facade_log, init_logging, logging_status, FacadeLog, ServiceLog,
};
pub use model::adopter::{Address, Adopter, AdopterId, AdopterKey, NewAdopter};
pub use model::key::KeyParseError;
pub use model::pet::{NewPet, Pet, PetId, PetKey, Size};
pub use password::{hash_password, verify_password, PasswordError};
pub use repo::adopter_repo::{AdopterRepository, SqliteAdopterRepository};
pub use repo::pet_repo::{PetRepository, SqlitePetRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::adopter_service::{AdopterDto, AdopterService};
pub use service::pet_service::{PetDto, PetService};
pub use service::response::{ResponseDto, StatusCode};

/// Minimal health-check API used by the CLI `ping` command.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
