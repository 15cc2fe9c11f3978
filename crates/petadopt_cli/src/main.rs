//! Command-line front end for the adoption core.
//!
//! Every service call prints its `{status, message, data}` envelope as JSON and
//! exits non-zero unless the status is `CREATED` or `SUCCESS`.

mod cli;

use clap::Parser;
use cli::{AdopterCommand, Cli, Command, PetCommand};
use log::error;
use petadopt_core::db::open_db;
use petadopt_core::{
    facade_log, init_logging, logging_status, AdopterKey, AdopterService, PetKey, PetService,
    ResponseDto, SqliteAdopterRepository, SqlitePetRepository, StatusCode,
};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(err) = start_logging(&cli.log_level, log_dir) {
            eprintln!("petadopt: {err}");
            return ExitCode::from(2);
        }
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("petadopt: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let absolute = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|err| format!("cannot resolve log directory: {err}"))?
            .join(log_dir)
    };
    let dir = absolute
        .to_str()
        .ok_or_else(|| format!("log directory `{}` is not valid UTF-8", absolute.display()))?;
    init_logging(level, dir)
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let Command::Ping = cli.command {
        println!("petadopt_core ping={}", petadopt_core::ping());
        println!("petadopt_core version={}", petadopt_core::core_version());
        match logging_status() {
            Some((level, dir)) => println!("logging level={level} log_dir={}", dir.display()),
            None => println!("logging disabled"),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let conn = open_db(&cli.db)?;

    match &cli.command {
        Command::Ping => Ok(ExitCode::SUCCESS),
        Command::Pet(command) => {
            let service = PetService::new(
                SqlitePetRepository::try_new(&conn)?,
                SqliteAdopterRepository::try_new(&conn)?,
                facade_log(),
            );
            let response = match command {
                PetCommand::Create(fields) => service.create(&fields.to_dto()),
                PetCommand::List => service.list(),
                PetCommand::Get { id } => service.find_by_id(*id),
                PetCommand::Find { key, value } => service.find_by_key(&PetKey::parse(key, value)?),
                PetCommand::Update { id, fields } => service.update(*id, &fields.to_dto()),
                PetCommand::Delete { id } => service.delete(*id),
                PetCommand::Adopt {
                    adopter_id,
                    pet_id,
                } => service.adopt(*adopter_id, *pet_id),
            };
            emit(&response)
        }
        Command::Adopter(command) => {
            let service =
                AdopterService::new(SqliteAdopterRepository::try_new(&conn)?, facade_log());
            let response = match command {
                AdopterCommand::Create(fields) => service.create(&fields.to_dto()),
                AdopterCommand::List => service.list(),
                AdopterCommand::Get { id } => service.find_by_id(*id),
                AdopterCommand::Find { key, value } => {
                    service.find_by_key(&AdopterKey::parse(key, value)?)
                }
                AdopterCommand::Update { id, fields } => service.update(*id, &fields.to_dto()),
                AdopterCommand::Delete { id } => service.delete(*id),
            };
            emit(&response)
        }
    }
}

fn emit<T: Serialize>(response: &ResponseDto<T>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(exit_code(response.status))
}

fn exit_code(status: StatusCode) -> ExitCode {
    if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::{emit, exit_code};
    use petadopt_core::{ResponseDto, StatusCode};
    use std::process::ExitCode;

    #[test]
    fn only_created_and_success_exit_zero() {
        assert_eq!(exit_code(StatusCode::Created), ExitCode::SUCCESS);
        assert_eq!(exit_code(StatusCode::Success), ExitCode::SUCCESS);
        assert_eq!(exit_code(StatusCode::NotFound), ExitCode::FAILURE);
        assert_eq!(exit_code(StatusCode::ServerError), ExitCode::FAILURE);
    }

    #[test]
    fn emit_returns_failure_for_error_envelopes() {
        let not_found: ResponseDto<u8> = ResponseDto::not_found("Pet with id 9 not found.");
        assert_eq!(emit(&not_found).unwrap(), ExitCode::FAILURE);

        let server_error: ResponseDto<u8> = ResponseDto::server_error("Failed to list pets.");
        assert_eq!(emit(&server_error).unwrap(), ExitCode::FAILURE);

        let created: ResponseDto<u8> = ResponseDto::created("Pet created successfully.");
        assert_eq!(emit(&created).unwrap(), ExitCode::SUCCESS);
    }
}
