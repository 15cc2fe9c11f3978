//! Fault injection: every service operation turns store failures into
//! `SERVER_ERROR` instead of propagating them.

mod support;

use log::Level;
use petadopt_core::db::DbError;
use petadopt_core::{
    Adopter, AdopterId, AdopterKey, AdopterRepository, AdopterService, NewAdopter, NewPet, Pet,
    PetId, PetKey, PetRepository, PetService, RepoError, RepoResult, ResponseDto, Size,
    StatusCode,
};
use std::cell::RefCell;
use std::sync::Arc;
use support::{address, date, pet_dto, RecordingLog};

fn io_error() -> RepoError {
    RepoError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some("injected disk failure".to_string()),
    )))
}

#[derive(Default)]
struct InMemoryPets {
    pets: RefCell<Vec<Pet>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl InMemoryPets {
    fn with_pet(fail_reads: bool, fail_writes: bool) -> Self {
        Self {
            pets: RefCell::new(vec![Pet {
                id: 1,
                name: "Rex".to_string(),
                species: "dog".to_string(),
                date_of_birth: date(2020, 1, 1),
                adopted: false,
                size: Size::Large,
                adopter_id: None,
            }]),
            fail_reads,
            fail_writes,
        }
    }

    fn read(&self) -> RepoResult<()> {
        if self.fail_reads {
            return Err(io_error());
        }
        Ok(())
    }

    fn write(&self) -> RepoResult<()> {
        if self.fail_writes {
            return Err(io_error());
        }
        Ok(())
    }
}

impl PetRepository for InMemoryPets {
    fn create_pet(&self, _pet: &NewPet) -> RepoResult<PetId> {
        self.write()?;
        Ok(2)
    }

    fn find_all_pets(&self) -> RepoResult<Vec<Pet>> {
        self.read()?;
        Ok(self.pets.borrow().clone())
    }

    fn find_pet_by_id(&self, id: PetId) -> RepoResult<Option<Pet>> {
        self.read()?;
        Ok(self.pets.borrow().iter().find(|pet| pet.id == id).cloned())
    }

    fn find_pets_by_key(&self, _key: &PetKey) -> RepoResult<Vec<Pet>> {
        self.read()?;
        Ok(Vec::new())
    }

    fn update_pet(&self, pet: &Pet) -> RepoResult<()> {
        self.write()?;
        let mut pets = self.pets.borrow_mut();
        if let Some(slot) = pets.iter_mut().find(|slot| slot.id == pet.id) {
            *slot = pet.clone();
        }
        Ok(())
    }

    fn delete_pet(&self, id: PetId) -> RepoResult<()> {
        self.write()?;
        self.pets.borrow_mut().retain(|pet| pet.id != id);
        Ok(())
    }
}

struct InMemoryAdopters {
    adopters: Vec<Adopter>,
    fail: bool,
}

impl InMemoryAdopters {
    fn new(fail: bool) -> Self {
        Self {
            adopters: vec![Adopter {
                id: 1,
                name: "Ana".to_string(),
                password_hash: "$argon2id$placeholder".to_string(),
                phone: "555-0100".to_string(),
                photo: None,
                address: Some(address("Rua A")),
            }],
            fail,
        }
    }

    fn check(&self) -> RepoResult<()> {
        if self.fail {
            return Err(io_error());
        }
        Ok(())
    }
}

impl AdopterRepository for InMemoryAdopters {
    fn create_adopter(&self, _adopter: &NewAdopter) -> RepoResult<AdopterId> {
        self.check()?;
        Ok(2)
    }

    fn find_all_adopters(&self) -> RepoResult<Vec<Adopter>> {
        self.check()?;
        Ok(self.adopters.clone())
    }

    fn find_adopter_by_id(&self, id: AdopterId) -> RepoResult<Option<Adopter>> {
        self.check()?;
        Ok(self.adopters.iter().find(|adopter| adopter.id == id).cloned())
    }

    fn find_adopters_by_key(&self, _key: &AdopterKey) -> RepoResult<Vec<Adopter>> {
        self.check()?;
        Ok(Vec::new())
    }

    fn update_adopter(&self, _adopter: &Adopter) -> RepoResult<()> {
        self.check()
    }

    fn delete_adopter(&self, _id: AdopterId) -> RepoResult<()> {
        self.check()
    }
}

fn assert_server_error<T>(response: ResponseDto<T>) {
    assert_eq!(response.status, StatusCode::ServerError);
    assert!(response.data.is_empty());
    assert!(!response.message.contains("injected"));
}

#[test]
fn pet_service_reports_read_failures_as_server_error() {
    let log = RecordingLog::shared();
    let service = PetService::new(
        InMemoryPets::with_pet(true, false),
        InMemoryAdopters::new(false),
        log.clone(),
    );
    let dto = pet_dto("Rex", "dog", false, Size::Large);

    assert_server_error(service.list());
    assert_server_error(service.find_by_key(&PetKey::Name("Rex".to_string())));
    assert_server_error(service.find_by_id(1));
    assert_server_error(service.update(1, &dto));
    assert_server_error(service.delete(1));
    assert_server_error(service.adopt(1, 1));

    let errors = log.lines_at(Level::Error);
    assert_eq!(errors.len(), 6);
    assert!(errors.iter().all(|line| line.contains("injected disk failure")));
}

#[test]
fn pet_service_reports_write_failures_as_server_error() {
    let pets = InMemoryPets::with_pet(false, true);
    let service = PetService::new(pets, InMemoryAdopters::new(false), RecordingLog::shared());
    let dto = pet_dto("Rexy", "dog", true, Size::Large);

    assert_server_error(service.create(&dto));
    assert_server_error(service.update(1, &dto));
    assert_server_error(service.delete(1));
    assert_server_error(service.adopt(1, 1));

    let unchanged = service.find_by_id(1);
    assert_eq!(unchanged.status, StatusCode::Success);
    assert_eq!(unchanged.data[0].name, "Rex");
    assert!(!unchanged.data[0].adopted);
}

#[test]
fn adopt_reports_adopter_lookup_failure_as_server_error() {
    let service = PetService::new(
        InMemoryPets::with_pet(false, false),
        InMemoryAdopters::new(true),
        RecordingLog::shared(),
    );

    assert_server_error(service.adopt(1, 1));
    assert_eq!(service.find_by_id(1).data[0].adopter_id, None);
}

#[test]
fn in_memory_adopt_succeeds_when_store_is_healthy() {
    let service = PetService::new(
        InMemoryPets::with_pet(false, false),
        InMemoryAdopters::new(false),
        RecordingLog::shared(),
    );

    assert_eq!(service.adopt(1, 1).status, StatusCode::Success);
    let pet = service.find_by_id(1).data.remove(0);
    assert!(pet.adopted);
    assert_eq!(pet.adopter_id, Some(1));
}

#[test]
fn adopter_service_reports_store_failures_as_server_error() {
    let log = RecordingLog::shared();
    let service = AdopterService::new(InMemoryAdopters::new(true), log.clone());
    let dto = petadopt_core::AdopterDto {
        name: "Ana".to_string(),
        password: "hunter2".to_string(),
        phone: "555-0100".to_string(),
        photo: None,
        address: None,
    };

    assert_server_error(service.create(&dto));
    assert_server_error(service.list());
    assert_server_error(service.find_by_id(1));
    assert_server_error(service.find_by_key(&AdopterKey::Phone("555-0100".to_string())));
    assert_server_error(service.update(1, &dto));
    assert_server_error(service.delete(1));

    assert!(log.all().iter().all(|line| !line.contains("hunter2")));
}
