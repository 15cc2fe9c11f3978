//! Pet repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered by `id ASC`.
//! - Key lookups bind exactly one column chosen by `PetKey`; no caller text
//!   is ever spliced into SQL.

use crate::model::pet::{NewPet, Pet, PetId, PetKey, Size};
use crate::repo::{bool_to_int, ensure_connection_ready, EntityKind, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};

const PET_SELECT_SQL: &str = "SELECT
    id,
    name,
    species,
    date_of_birth,
    adopted,
    size,
    adopter_id
FROM pets";

/// Repository interface for pet persistence.
pub trait PetRepository {
    /// Inserts a pet and returns its generated id.
    fn create_pet(&self, pet: &NewPet) -> RepoResult<PetId>;
    fn find_all_pets(&self) -> RepoResult<Vec<Pet>>;
    fn find_pet_by_id(&self, id: PetId) -> RepoResult<Option<Pet>>;
    /// Returns pets whose keyed field equals the key's value.
    fn find_pets_by_key(&self, key: &PetKey) -> RepoResult<Vec<Pet>>;
    /// Overwrites every mutable column of an existing pet.
    fn update_pet(&self, pet: &Pet) -> RepoResult<()>;
    fn delete_pet(&self, id: PetId) -> RepoResult<()>;
}

/// SQLite-backed pet repository.
pub struct SqlitePetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePetRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["pets"])?;
        Ok(Self { conn })
    }
}

impl PetRepository for SqlitePetRepository<'_> {
    fn create_pet(&self, pet: &NewPet) -> RepoResult<PetId> {
        self.conn.execute(
            "INSERT INTO pets (
                name,
                species,
                date_of_birth,
                adopted,
                size
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                pet.name.as_str(),
                pet.species.as_str(),
                pet.date_of_birth,
                bool_to_int(pet.adopted),
                pet.size.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_all_pets(&self) -> RepoResult<Vec<Pet>> {
        self.query_pets(&format!("{PET_SELECT_SQL} ORDER BY id ASC;"), None)
    }

    fn find_pet_by_id(&self, id: PetId) -> RepoResult<Option<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PET_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_pet_row(row)))
            .optional()?;
        row.transpose()
    }

    fn find_pets_by_key(&self, key: &PetKey) -> RepoResult<Vec<Pet>> {
        let sql = format!(
            "{PET_SELECT_SQL} WHERE {} = ?1 ORDER BY id ASC;",
            key.column()
        );
        self.query_pets(&sql, Some(key_value(key)))
    }

    fn update_pet(&self, pet: &Pet) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pets
             SET
                name = ?1,
                species = ?2,
                date_of_birth = ?3,
                adopted = ?4,
                size = ?5,
                adopter_id = ?6
             WHERE id = ?7;",
            params![
                pet.name.as_str(),
                pet.species.as_str(),
                pet.date_of_birth,
                bool_to_int(pet.adopted),
                pet.size.as_str(),
                pet.adopter_id,
                pet.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Pet,
                id: pet.id,
            });
        }

        Ok(())
    }

    fn delete_pet(&self, id: PetId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM pets WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Pet,
                id,
            });
        }

        Ok(())
    }
}

impl SqlitePetRepository<'_> {
    fn query_pets(&self, sql: &str, bind: Option<Value>) -> RepoResult<Vec<Pet>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match bind {
            Some(value) => stmt.query([value])?,
            None => stmt.query([])?,
        };

        let mut pets = Vec::new();
        while let Some(row) = rows.next()? {
            pets.push(parse_pet_row(row)?);
        }
        Ok(pets)
    }
}

fn key_value(key: &PetKey) -> Value {
    match key {
        PetKey::Name(value) | PetKey::Species(value) => Value::Text(value.clone()),
        PetKey::DateOfBirth(date) => Value::Text(date.format("%F").to_string()),
        PetKey::Adopted(adopted) => Value::Integer(bool_to_int(*adopted)),
        PetKey::Size(size) => Value::Text(size.as_str().to_string()),
        PetKey::AdopterId(id) => Value::Integer(*id),
    }
}

fn parse_pet_row(row: &Row<'_>) -> RepoResult<Pet> {
    let size_text: String = row.get("size")?;
    let size = Size::parse(&size_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid size `{size_text}` in pets.size"))
    })?;

    let adopted = match row.get::<_, i64>("adopted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid adopted value `{other}` in pets.adopted"
            )));
        }
    };

    Ok(Pet {
        id: row.get("id")?,
        name: row.get("name")?,
        species: row.get("species")?,
        date_of_birth: row.get("date_of_birth")?,
        adopted,
        size,
        adopter_id: row.get("adopter_id")?,
    })
}
