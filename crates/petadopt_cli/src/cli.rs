//! Argument definitions. Flags fall back to `PETADOPT_*` environment variables.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use petadopt_core::{default_log_level, Address, AdopterDto, AdopterId, PetDto, PetId, Size};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "petadopt", version, about = "Pet adoption records")]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "PETADOPT_DB", default_value = "petadopt.sqlite3", global = true)]
    pub db: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long, env = "PETADOPT_LOG_LEVEL", default_value = default_log_level(), global = true)]
    pub log_level: String,

    /// Directory for rolling log files. Logging stays off when unset.
    #[arg(long, env = "PETADOPT_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print core health and version.
    Ping,
    #[command(subcommand)]
    Pet(PetCommand),
    #[command(subcommand)]
    Adopter(AdopterCommand),
}

#[derive(Debug, Subcommand)]
pub enum PetCommand {
    Create(PetFields),
    List,
    Get {
        id: PetId,
    },
    /// Exact match on one field: name, species, dateOfBirth, adopted, size, adopterId.
    Find {
        key: String,
        value: String,
    },
    Update {
        id: PetId,
        #[command(flatten)]
        fields: PetFields,
    },
    Delete {
        id: PetId,
    },
    Adopt {
        adopter_id: AdopterId,
        pet_id: PetId,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdopterCommand {
    Create(AdopterFields),
    List,
    Get {
        id: AdopterId,
    },
    /// Exact match on one field: name, phone.
    Find {
        key: String,
        value: String,
    },
    Update {
        id: AdopterId,
        #[command(flatten)]
        fields: AdopterFields,
    },
    Delete {
        id: AdopterId,
    },
}

#[derive(Debug, Args)]
pub struct PetFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub species: String,
    /// YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub born: NaiveDate,
    #[arg(long)]
    pub adopted: bool,
    /// small|medium|large
    #[arg(long, value_parser = parse_size)]
    pub size: Size,
}

impl PetFields {
    pub fn to_dto(&self) -> PetDto {
        PetDto {
            name: self.name.clone(),
            species: self.species.clone(),
            date_of_birth: self.born,
            adopted: self.adopted,
            size: self.size,
        }
    }
}

#[derive(Debug, Args)]
pub struct AdopterFields {
    #[arg(long)]
    pub name: String,
    #[arg(long, env = "PETADOPT_ADOPTER_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub photo: Option<String>,
    #[arg(long, requires_all = ["number", "city", "state", "postal_code"])]
    pub street: Option<String>,
    #[arg(long, requires = "street")]
    pub number: Option<String>,
    #[arg(long, requires = "street")]
    pub neighborhood: Option<String>,
    #[arg(long, requires = "street")]
    pub city: Option<String>,
    #[arg(long, requires = "street")]
    pub state: Option<String>,
    #[arg(long, requires = "street")]
    pub postal_code: Option<String>,
}

impl AdopterFields {
    pub fn to_dto(&self) -> AdopterDto {
        AdopterDto {
            name: self.name.clone(),
            password: self.password.clone(),
            phone: self.phone.clone(),
            photo: self.photo.clone(),
            address: self.address(),
        }
    }

    fn address(&self) -> Option<Address> {
        Some(Address {
            street: self.street.clone()?,
            number: self.number.clone()?,
            neighborhood: self.neighborhood.clone(),
            city: self.city.clone()?,
            state: self.state.clone()?,
            postal_code: self.postal_code.clone()?,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn parse_size(value: &str) -> Result<Size, String> {
    Size::parse(value).ok_or_else(|| format!("expected small|medium|large, got `{value}`"))
}
