//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls per use-case.
//! - Translate every outcome into a `ResponseDto`; nothing escapes as an error.
//!
//! # Invariants
//! - Missing entities are business outcomes (`NOT_FOUND`), not failures.
//! - Any store or hashing failure is logged and surfaced as `SERVER_ERROR`
//!   without exposing its details to the caller.

use crate::password::PasswordError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adopter_service;
pub mod pet_service;
pub mod response;

/// Internal failure collected inside a use-case before it becomes an envelope.
#[derive(Debug)]
pub(crate) enum ServiceFailure {
    Repo(RepoError),
    Password(PasswordError),
}

impl Display for ServiceFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Password(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Password(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceFailure {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<PasswordError> for ServiceFailure {
    fn from(value: PasswordError) -> Self {
        Self::Password(value)
    }
}

pub(crate) type ServiceResult<T> = Result<T, ServiceFailure>;
