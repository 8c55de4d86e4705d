//! `bookshelf` command-line entry point.
//!
//! Resolves configuration, opens the database and dispatches one request
//! to the core services. Results print as pretty JSON on stdout.

mod commands;

use anyhow::Context;
use bookshelf_core::db::open_db;
use bookshelf_core::{
    init_logging, BookDto, BookService, CoreConfig, SqliteBookRepository,
    SqliteTransactionScope, SqliteUserRepository, UserDto, UserService,
};
use commands::{BookCommand, BookFields, CommandLine, Commands, UserCommand, UserFields};
use rusqlite::Connection;
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    let mut config = CoreConfig::from_env().context("invalid BOOKSHELF_* environment")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        bookshelf_core::core_version()
    );

    match cli.command {
        Commands::User(command) => run_user(&conn, command),
        Commands::Book(command) => run_book(&conn, command),
    }
}

fn run_user(conn: &Connection, command: UserCommand) -> anyhow::Result<()> {
    let service = UserService::new(SqliteUserRepository::try_new(conn)?);

    match command {
        UserCommand::Create(fields) => print_json(&service.create_user(&user_dto(None, fields))?),
        UserCommand::Get { id } => print_json(&service.get_user_by_id(id)?),
        UserCommand::Update { id, fields } => {
            print_json(&service.update_user(&user_dto(Some(id), fields))?)
        }
        UserCommand::Delete { id } => {
            service.delete_user_by_id(id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

fn run_book(conn: &Connection, command: BookCommand) -> anyhow::Result<()> {
    let service = BookService::new(
        SqliteUserRepository::try_new(conn)?,
        SqliteBookRepository::try_new(conn)?,
        SqliteTransactionScope::new(conn),
    );

    match command {
        BookCommand::Create(fields) => print_json(&service.create_book(&book_dto(None, fields))?),
        BookCommand::Get { id } => print_json(&service.get_book_by_id(id)?),
        BookCommand::Update { id, fields } => {
            print_json(&service.update_book(&book_dto(Some(id), fields))?)
        }
        BookCommand::Delete { id } => {
            service.delete_book_by_id(id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        BookCommand::Ids { user_id } => print_json(&service.get_books_id_by_user_id(user_id)?),
        BookCommand::List { user_id } => print_json(&service.get_books_by_user_id(user_id)?),
    }
}

fn user_dto(id: Option<i64>, fields: UserFields) -> UserDto {
    UserDto {
        id,
        full_name: fields.full_name,
        title: fields.title,
        age: fields.age,
    }
}

fn book_dto(id: Option<i64>, fields: BookFields) -> BookDto {
    BookDto {
        id,
        user_id: fields.user_id,
        title: fields.title,
        author: fields.author,
        page_count: fields.page_count,
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
