//! Adopter repository contract and SQLite implementation.
//!
//! # Invariants
//! - An adopter row and its address row are written in one transaction.
//! - Reads always load the address together with the adopter.
//! - Saving an adopter with `address = None` removes any stored address.

use crate::model::adopter::{Address, Adopter, AdopterId, AdopterKey, NewAdopter};
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ADOPTER_SELECT_SQL: &str = "SELECT
    a.id AS id,
    a.name AS name,
    a.password_hash AS password_hash,
    a.phone AS phone,
    a.photo AS photo,
    addr.street AS street,
    addr.number AS number,
    addr.neighborhood AS neighborhood,
    addr.city AS city,
    addr.state AS state,
    addr.postal_code AS postal_code
FROM adopters a
LEFT JOIN adopter_addresses addr ON addr.adopter_id = a.id";

/// Repository interface for adopter persistence.
pub trait AdopterRepository {
    /// Inserts an adopter with its address and returns the generated id.
    fn create_adopter(&self, adopter: &NewAdopter) -> RepoResult<AdopterId>;
    fn find_all_adopters(&self) -> RepoResult<Vec<Adopter>>;
    fn find_adopter_by_id(&self, id: AdopterId) -> RepoResult<Option<Adopter>>;
    fn find_adopters_by_key(&self, key: &AdopterKey) -> RepoResult<Vec<Adopter>>;
    /// Overwrites the adopter row and replaces its address.
    fn update_adopter(&self, adopter: &Adopter) -> RepoResult<()>;
    /// Deletes the adopter and its address.
    fn delete_adopter(&self, id: AdopterId) -> RepoResult<()>;
}

/// SQLite-backed adopter repository.
pub struct SqliteAdopterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAdopterRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["adopters", "adopter_addresses"])?;
        Ok(Self { conn })
    }
}

impl AdopterRepository for SqliteAdopterRepository<'_> {
    fn create_adopter(&self, adopter: &NewAdopter) -> RepoResult<AdopterId> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO adopters (
                name,
                password_hash,
                phone,
                photo
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                adopter.name.as_str(),
                adopter.password_hash.as_str(),
                adopter.phone.as_str(),
                adopter.photo.as_deref(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        save_address(&tx, id, adopter.address.as_ref())?;
        tx.commit()?;

        Ok(id)
    }

    fn find_all_adopters(&self) -> RepoResult<Vec<Adopter>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ADOPTER_SELECT_SQL} ORDER BY a.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut adopters = Vec::new();
        while let Some(row) = rows.next()? {
            adopters.push(parse_adopter_row(row)?);
        }
        Ok(adopters)
    }

    fn find_adopter_by_id(&self, id: AdopterId) -> RepoResult<Option<Adopter>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ADOPTER_SELECT_SQL} WHERE a.id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_adopter_row(row)))
            .optional()?;
        row.transpose()
    }

    fn find_adopters_by_key(&self, key: &AdopterKey) -> RepoResult<Vec<Adopter>> {
        let value = match key {
            AdopterKey::Name(value) | AdopterKey::Phone(value) => value.as_str(),
        };
        let mut stmt = self.conn.prepare(&format!(
            "{ADOPTER_SELECT_SQL} WHERE a.{} = ?1 ORDER BY a.id ASC;",
            key.column()
        ))?;
        let mut rows = stmt.query([value])?;
        let mut adopters = Vec::new();
        while let Some(row) = rows.next()? {
            adopters.push(parse_adopter_row(row)?);
        }
        Ok(adopters)
    }

    fn update_adopter(&self, adopter: &Adopter) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE adopters
             SET
                name = ?1,
                password_hash = ?2,
                phone = ?3,
                photo = ?4
             WHERE id = ?5;",
            params![
                adopter.name.as_str(),
                adopter.password_hash.as_str(),
                adopter.phone.as_str(),
                adopter.photo.as_deref(),
                adopter.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Adopter,
                id: adopter.id,
            });
        }

        save_address(&tx, adopter.id, adopter.address.as_ref())?;
        tx.commit()?;
        Ok(())
    }

    fn delete_adopter(&self, id: AdopterId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM adopter_addresses WHERE adopter_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM adopters WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Adopter,
                id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}

fn save_address(conn: &Connection, adopter_id: AdopterId, address: Option<&Address>) -> RepoResult<()> {
    let Some(address) = address else {
        conn.execute(
            "DELETE FROM adopter_addresses WHERE adopter_id = ?1;",
            [adopter_id],
        )?;
        return Ok(());
    };

    conn.execute(
        "INSERT INTO adopter_addresses (
            adopter_id,
            street,
            number,
            neighborhood,
            city,
            state,
            postal_code
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(adopter_id) DO UPDATE SET
            street = excluded.street,
            number = excluded.number,
            neighborhood = excluded.neighborhood,
            city = excluded.city,
            state = excluded.state,
            postal_code = excluded.postal_code;",
        params![
            adopter_id,
            address.street.as_str(),
            address.number.as_str(),
            address.neighborhood.as_deref(),
            address.city.as_str(),
            address.state.as_str(),
            address.postal_code.as_str(),
        ],
    )?;
    Ok(())
}

fn parse_adopter_row(row: &Row<'_>) -> RepoResult<Adopter> {
    // `street` is NOT NULL in storage, so NULL here means the join found no address.
    let address = match row.get::<_, Option<String>>("street")? {
        Some(street) => Some(Address {
            street,
            number: row.get("number")?,
            neighborhood: row.get("neighborhood")?,
            city: row.get("city")?,
            state: row.get("state")?,
            postal_code: row.get("postal_code")?,
        }),
        None => None,
    };

    Ok(Adopter {
        id: row.get("id")?,
        name: row.get("name")?,
        password_hash: row.get("password_hash")?,
        phone: row.get("phone")?,
        photo: row.get("photo")?,
        address,
    })
}
