#![allow(dead_code)]

use chrono::NaiveDate;
use log::Level;
use petadopt_core::{Address, NewAdopter, PetDto, ServiceLog, Size};
use std::sync::{Arc, Mutex};

/// Captures service log lines for assertions.
#[derive(Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingLog {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines_at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(lvl, _)| *lvl == level)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn all(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }
}

impl ServiceLog for RecordingLog {
    fn log(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn pet_dto(name: &str, species: &str, adopted: bool, size: Size) -> PetDto {
    PetDto {
        name: name.to_string(),
        species: species.to_string(),
        date_of_birth: date(2020, 1, 15),
        adopted,
        size,
    }
}

pub fn address(street: &str) -> Address {
    Address {
        street: street.to_string(),
        number: "42".to_string(),
        neighborhood: Some("Centro".to_string()),
        city: "Recife".to_string(),
        state: "PE".to_string(),
        postal_code: "50000-000".to_string(),
    }
}

pub fn new_adopter(name: &str, address: Option<Address>) -> NewAdopter {
    NewAdopter {
        name: name.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        phone: "555-0100".to_string(),
        photo: None,
        address,
    }
}
