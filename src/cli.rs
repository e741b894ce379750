use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::connection::select_connection;
use crate::logger::{info, warn};
use crate::schema::ALL_TABLES;
use crate::{db, load, seed};

#[derive(Debug, Parser)]
#[command(name = "mfstload", about = "Provision and bulk-load delivery manifest databases")]
pub struct Cli {
    /// Connection config file (defaults to config.yaml in the app config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Name of the connection to use (defaults to the first entry)
    #[arg(long, global = true)]
    pub conn: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the manifest, users and company tables
    Init {
        /// Drop existing tables first
        #[arg(long)]
        drop: bool,
    },
    /// Insert company and user reference rows from a YAML file
    Seed {
        /// Seed data file
        data: PathBuf,
    },
    /// Bulk-load a delimited manifest file
    Load {
        /// Manifest CSV (header line and spacer line are skipped)
        file: PathBuf,

        /// Print the INSERT statements instead of executing them
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    // dry runs never touch the database, so no config is needed
    if let Command::Load { file, dry_run: true } = &cli.command {
        let stdout = std::io::stdout();
        let summary = load::render_sql(file, &mut stdout.lock())?;
        info(&format!("rendered {} statements", summary.rows));
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let conn = select_connection(&config, cli.conn.as_deref())?;
    let mut session = db::open(&conn)?;

    match cli.command {
        Command::Init { drop } => {
            for table in ALL_TABLES {
                if drop {
                    warn(&format!("dropping table {}", table.name));
                    session.exec(&table.drop_sql())?;
                }
                session.exec(&table.create_sql())?;
                info(&format!("created table {}", table.name));
            }
            println!("Created {} tables", ALL_TABLES.len());
        }
        Command::Seed { data } => {
            let seed_data = seed::load_seed_file(&data)?;
            let summary = seed::apply(session.as_mut(), &seed_data)?;
            println!(
                "Seeded {} companies, {} users",
                summary.companies, summary.users
            );
        }
        Command::Load { file, .. } => {
            let summary = load::load_file(session.as_mut(), &file)?;
            println!("Loaded {} rows from {}", summary.rows, file.display());
        }
    }

    Ok(())
}
