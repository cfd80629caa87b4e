//! This is the daemon binary that runs the folio http server.
//! there are no tests or anything else in this file because the only thing it does is set up and start the daemon
//! with functions from the `folio_daemon` library crate (which is tested).

use std::path::PathBuf;

use folio_core::{config::Settings, get_data_dir};
use folio_daemon::{create_admin, start_daemon};

use clap::{Parser, Subcommand};

#[cfg(not(feature = "cli"))]
compile_error!("The cli feature is required to build the daemon binary");

/// Options configurable via the CLI.
#[derive(Parser)]
struct Flags {
    /// Sets the port number to listen on.
    #[clap(long)]
    port: Option<u16>,
    /// config file path
    #[clap(long)]
    config: Option<PathBuf>,
    /// log level
    #[clap(long)]
    log_level: Option<log::LevelFilter>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create the first admin account, then exit.
    CreateAdmin {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = Flags::try_parse()?;

    let config_file = match flags.config {
        Some(config) => config,
        None => Settings::get_config_path()?,
    };

    let db_dir = match get_data_dir() {
        Ok(data_dir) => data_dir.join("db"),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Using a temporary directory for the database");
            std::env::temp_dir().join("folio_db")
        }
    };

    let settings = Settings::init(config_file, flags.port, flags.log_level)?;

    match flags.command {
        Some(Command::CreateAdmin {
            name,
            email,
            password,
        }) => create_admin(&settings, db_dir, &name, &email, &password).await,
        None => start_daemon(settings, db_dir).await,
    }
}
