//! Adopter use-case service.
//!
//! # Invariants
//! - Plaintext passwords are hashed before they reach the repository and are
//!   never logged or returned.
//! - An adopter and its address are created, replaced and deleted together.

use crate::logging::ServiceLog;
use crate::model::adopter::{Address, Adopter, AdopterId, AdopterKey, NewAdopter};
use crate::password::hash_password;
use crate::repo::adopter_repo::AdopterRepository;
use crate::repo::RepoError;
use crate::service::response::ResponseDto;
use crate::service::{ServiceFailure, ServiceResult};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Input shape for creating or updating an adopter.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AdopterDto {
    pub name: String,
    pub password: String,
    pub phone: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl Debug for AdopterDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdopterDto")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("phone", &self.phone)
            .field("photo", &self.photo)
            .field("address", &self.address)
            .finish()
    }
}

/// Adopter service over an adopter repository.
pub struct AdopterService<A: AdopterRepository> {
    adopters: A,
    log: Arc<dyn ServiceLog>,
}

impl<A: AdopterRepository> AdopterService<A> {
    pub fn new(adopters: A, log: Arc<dyn ServiceLog>) -> Self {
        Self { adopters, log }
    }

    /// Persists a new adopter with its address. `data` is always empty.
    pub fn create(&self, dto: &AdopterDto) -> ResponseDto<Adopter> {
        self.try_create(dto)
            .unwrap_or_else(|err| self.fail("adopter_create", "Failed to create adopter.", err))
    }

    pub fn list(&self) -> ResponseDto<Adopter> {
        match self.adopters.find_all_adopters() {
            Ok(adopters) => {
                self.log.debug(&format!(
                    "event=adopter_list module=adopter_service status=ok count={}",
                    adopters.len()
                ));
                ResponseDto::success("Adopters retrieved successfully.", adopters)
            }
            Err(err) => self.fail("adopter_list", "Failed to list adopters.", err.into()),
        }
    }

    pub fn find_by_id(&self, id: AdopterId) -> ResponseDto<Adopter> {
        match self.adopters.find_adopter_by_id(id) {
            Ok(Some(adopter)) => {
                ResponseDto::success("Adopter retrieved successfully.", vec![adopter])
            }
            Ok(None) => self.adopter_not_found("adopter_get", id),
            Err(err) => self.fail("adopter_get", "Failed to retrieve adopter.", err.into()),
        }
    }

    pub fn find_by_key(&self, key: &AdopterKey) -> ResponseDto<Adopter> {
        match self.adopters.find_adopters_by_key(key) {
            Ok(adopters) => {
                self.log.debug(&format!(
                    "event=adopter_find_by_key module=adopter_service status=ok key={} count={}",
                    key.column(),
                    adopters.len()
                ));
                ResponseDto::success("Adopters retrieved successfully.", adopters)
            }
            Err(err) => self.fail(
                "adopter_find_by_key",
                &format!("Failed to search adopters by {}.", key.column()),
                err.into(),
            ),
        }
    }

    /// Overwrites every adopter field, re-hashing the password and replacing
    /// the address.
    pub fn update(&self, id: AdopterId, dto: &AdopterDto) -> ResponseDto<Adopter> {
        self.try_update(id, dto)
            .unwrap_or_else(|err| self.fail("adopter_update", "Failed to update adopter.", err))
    }

    /// Deletes the adopter and its address.
    ///
    /// Fails with `SERVER_ERROR` while any pet still references the adopter.
    pub fn delete(&self, id: AdopterId) -> ResponseDto<Adopter> {
        match self.adopters.delete_adopter(id) {
            Ok(()) => {
                self.log.debug(&format!(
                    "event=adopter_delete module=adopter_service status=ok adopter_id={id}"
                ));
                ResponseDto::success("Adopter deleted successfully.", Vec::new())
            }
            Err(RepoError::NotFound { .. }) => self.adopter_not_found("adopter_delete", id),
            Err(err) => self.fail("adopter_delete", "Failed to delete adopter.", err.into()),
        }
    }

    fn try_create(&self, dto: &AdopterDto) -> ServiceResult<ResponseDto<Adopter>> {
        let new_adopter = NewAdopter {
            name: dto.name.clone(),
            password_hash: hash_password(&dto.password)?,
            phone: dto.phone.clone(),
            photo: dto.photo.clone(),
            address: dto.address.clone(),
        };

        let id = self.adopters.create_adopter(&new_adopter)?;
        self.log.debug(&format!(
            "event=adopter_create module=adopter_service status=ok adopter_id={id} has_address={}",
            new_adopter.address.is_some()
        ));
        Ok(ResponseDto::created("Adopter created successfully."))
    }

    fn try_update(&self, id: AdopterId, dto: &AdopterDto) -> ServiceResult<ResponseDto<Adopter>> {
        let Some(mut adopter) = self.adopters.find_adopter_by_id(id)? else {
            return Ok(self.adopter_not_found("adopter_update", id));
        };

        adopter.name = dto.name.clone();
        adopter.password_hash = hash_password(&dto.password)?;
        adopter.phone = dto.phone.clone();
        adopter.photo = dto.photo.clone();
        adopter.address = dto.address.clone();

        match self.adopters.update_adopter(&adopter) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => {
                return Ok(self.adopter_not_found("adopter_update", id))
            }
            Err(err) => return Err(err.into()),
        }

        self.log.debug(&format!(
            "event=adopter_update module=adopter_service status=ok adopter_id={id}"
        ));
        Ok(ResponseDto::success("Adopter updated successfully.", Vec::new()))
    }

    fn adopter_not_found(&self, event: &str, id: AdopterId) -> ResponseDto<Adopter> {
        self.log.warn(&format!(
            "event={event} module=adopter_service status=not_found adopter_id={id}"
        ));
        ResponseDto::not_found(format!("Adopter with id {id} not found."))
    }

    fn fail(&self, event: &str, message: &str, err: ServiceFailure) -> ResponseDto<Adopter> {
        self.log.error(&format!(
            "event={event} module=adopter_service status=error error={err}"
        ));
        ResponseDto::server_error(message)
    }
}
