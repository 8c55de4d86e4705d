//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Manage users and the books they own.", version)]
pub struct CommandLine {
    /// SQLite database file (overrides BOOKSHELF_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Absolute directory for log files (overrides BOOKSHELF_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    #[command(subcommand, alias = "u")]
    User(UserCommand),
    /// Manage books
    #[command(subcommand, alias = "b")]
    Book(BookCommand),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    Create(UserFields),
    Get { id: i64 },
    Update {
        id: i64,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct UserFields {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub age: i64,
}

#[derive(Subcommand, Debug)]
pub enum BookCommand {
    Create(BookFields),
    Get { id: i64 },
    Update {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete { id: i64 },
    /// Ids of books owned by a user
    Ids { user_id: i64 },
    /// Books owned by a user
    List { user_id: i64 },
}

#[derive(Args, Debug)]
pub struct BookFields {
    #[arg(long)]
    pub user_id: i64,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub page_count: i64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
