//! Pet use-case service.
//!
//! # Invariants
//! - `create` always inserts an unlinked pet; only `adopt` sets the adopter.
//! - `update` overwrites name, species, date of birth and the adopted flag;
//!   size and adopter link are left untouched.
//! - Each call performs at most three sequential store round-trips and no
//!   cross-call transaction.

use crate::logging::ServiceLog;
use crate::model::adopter::AdopterId;
use crate::model::pet::{NewPet, Pet, PetId, PetKey, Size};
use crate::repo::adopter_repo::AdopterRepository;
use crate::repo::pet_repo::PetRepository;
use crate::repo::RepoError;
use crate::service::response::ResponseDto;
use crate::service::{ServiceFailure, ServiceResult};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Input shape for creating or updating a pet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetDto {
    pub name: String,
    #[serde(rename = "specie", alias = "species")]
    pub species: String,
    pub date_of_birth: NaiveDate,
    pub adopted: bool,
    pub size: Size,
}

impl From<&PetDto> for NewPet {
    fn from(dto: &PetDto) -> Self {
        Self {
            name: dto.name.clone(),
            species: dto.species.clone(),
            date_of_birth: dto.date_of_birth,
            adopted: dto.adopted,
            size: dto.size,
        }
    }
}

/// Pet service over pet and adopter repositories.
pub struct PetService<P: PetRepository, A: AdopterRepository> {
    pets: P,
    adopters: A,
    log: Arc<dyn ServiceLog>,
}

impl<P: PetRepository, A: AdopterRepository> PetService<P, A> {
    pub fn new(pets: P, adopters: A, log: Arc<dyn ServiceLog>) -> Self {
        Self {
            pets,
            adopters,
            log,
        }
    }

    /// Persists a new pet built from `dto`. `data` is always empty.
    pub fn create(&self, dto: &PetDto) -> ResponseDto<Pet> {
        let new_pet = NewPet::from(dto);
        self.log.debug(&format!(
            "event=pet_create module=pet_service status=start species={} size={} adopted={}",
            new_pet.species,
            new_pet.size.as_str(),
            new_pet.adopted
        ));

        match self.pets.create_pet(&new_pet) {
            Ok(id) => {
                self.log.debug(&format!(
                    "event=pet_create module=pet_service status=ok pet_id={id}"
                ));
                ResponseDto::created("Pet created successfully.")
            }
            Err(err) => self.fail("pet_create", "Failed to create pet.", err.into()),
        }
    }

    /// Returns every pet.
    pub fn list(&self) -> ResponseDto<Pet> {
        match self.pets.find_all_pets() {
            Ok(pets) => {
                self.log.debug(&format!(
                    "event=pet_list module=pet_service status=ok count={}",
                    pets.len()
                ));
                ResponseDto::success("Pets retrieved successfully.", pets)
            }
            Err(err) => self.fail("pet_list", "Failed to list pets.", err.into()),
        }
    }

    /// Returns pets whose keyed field equals the key's value.
    pub fn find_by_key(&self, key: &PetKey) -> ResponseDto<Pet> {
        match self.pets.find_pets_by_key(key) {
            Ok(pets) => {
                self.log.debug(&format!(
                    "event=pet_find_by_key module=pet_service status=ok key={} count={}",
                    key.column(),
                    pets.len()
                ));
                ResponseDto::success("Pets retrieved successfully.", pets)
            }
            Err(err) => self.fail(
                "pet_find_by_key",
                &format!("Failed to search pets by {}.", key.column()),
                err.into(),
            ),
        }
    }

    /// Returns the pet with `id` as a single-element list.
    pub fn find_by_id(&self, id: PetId) -> ResponseDto<Pet> {
        match self.pets.find_pet_by_id(id) {
            Ok(Some(pet)) => ResponseDto::success("Pet retrieved successfully.", vec![pet]),
            Ok(None) => self.pet_not_found("pet_get", id),
            Err(err) => self.fail("pet_get", "Failed to retrieve pet.", err.into()),
        }
    }

    /// Overwrites name, adopted flag, date of birth and species of pet `id`.
    pub fn update(&self, id: PetId, dto: &PetDto) -> ResponseDto<Pet> {
        self.try_update(id, dto)
            .unwrap_or_else(|err| self.fail("pet_update", "Failed to update pet.", err))
    }

    /// Deletes pet `id`.
    pub fn delete(&self, id: PetId) -> ResponseDto<Pet> {
        self.try_delete(id)
            .unwrap_or_else(|err| self.fail("pet_delete", "Failed to delete pet.", err))
    }

    /// Links pet `pet_id` to adopter `adopter_id` and marks it adopted.
    pub fn adopt(&self, adopter_id: AdopterId, pet_id: PetId) -> ResponseDto<Pet> {
        self.try_adopt(adopter_id, pet_id)
            .unwrap_or_else(|err| self.fail("pet_adopt", "Failed to adopt pet.", err))
    }

    fn try_update(&self, id: PetId, dto: &PetDto) -> ServiceResult<ResponseDto<Pet>> {
        let Some(mut pet) = self.pets.find_pet_by_id(id)? else {
            return Ok(self.pet_not_found("pet_update", id));
        };

        pet.name = dto.name.clone();
        pet.adopted = dto.adopted;
        pet.date_of_birth = dto.date_of_birth;
        pet.species = dto.species.clone();

        if !pet.adoption_is_consistent() {
            self.log.warn(&format!(
                "event=pet_update module=pet_service status=inconsistent pet_id={id} adopted={} has_adopter={}",
                pet.adopted,
                pet.adopter_id.is_some()
            ));
        }

        match self.pets.update_pet(&pet) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => return Ok(self.pet_not_found("pet_update", id)),
            Err(err) => return Err(err.into()),
        }

        self.log.debug(&format!(
            "event=pet_update module=pet_service status=ok pet_id={id}"
        ));
        Ok(ResponseDto::success("Pet updated successfully.", Vec::new()))
    }

    fn try_delete(&self, id: PetId) -> ServiceResult<ResponseDto<Pet>> {
        if self.pets.find_pet_by_id(id)?.is_none() {
            return Ok(self.pet_not_found("pet_delete", id));
        }

        match self.pets.delete_pet(id) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => return Ok(self.pet_not_found("pet_delete", id)),
            Err(err) => return Err(err.into()),
        }

        self.log.debug(&format!(
            "event=pet_delete module=pet_service status=ok pet_id={id}"
        ));
        Ok(ResponseDto::success("Pet deleted successfully.", Vec::new()))
    }

    fn try_adopt(&self, adopter_id: AdopterId, pet_id: PetId) -> ServiceResult<ResponseDto<Pet>> {
        let Some(adopter) = self.adopters.find_adopter_by_id(adopter_id)? else {
            self.log.warn(&format!(
                "event=pet_adopt module=pet_service status=not_found adopter_id={adopter_id}"
            ));
            return Ok(ResponseDto::not_found(format!(
                "Adopter with id {adopter_id} not found."
            )));
        };

        let Some(mut pet) = self.pets.find_pet_by_id(pet_id)? else {
            return Ok(self.pet_not_found("pet_adopt", pet_id));
        };

        if let Some(previous) = pet.adopter_id.filter(|previous| *previous != adopter.id) {
            self.log.debug(&format!(
                "event=pet_adopt module=pet_service status=relink pet_id={pet_id} previous_adopter_id={previous}"
            ));
        }

        pet.adopted = true;
        pet.adopter_id = Some(adopter.id);

        match self.pets.update_pet(&pet) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => return Ok(self.pet_not_found("pet_adopt", pet_id)),
            Err(err) => return Err(err.into()),
        }

        self.log.debug(&format!(
            "event=pet_adopt module=pet_service status=ok pet_id={pet_id} adopter_id={adopter_id}"
        ));
        Ok(ResponseDto::success("Pet adopted successfully.", Vec::new()))
    }

    fn pet_not_found(&self, event: &str, id: PetId) -> ResponseDto<Pet> {
        self.log.warn(&format!(
            "event={event} module=pet_service status=not_found pet_id={id}"
        ));
        ResponseDto::not_found(format!("Pet with id {id} not found."))
    }

    fn fail(&self, event: &str, message: &str, err: ServiceFailure) -> ResponseDto<Pet> {
        self.log.error(&format!(
            "event={event} module=pet_service status=error error={err}"
        ));
        ResponseDto::server_error(message)
    }
}
