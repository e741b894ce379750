use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{config::Config, db::DatabaseType};

#[derive(Debug, Deserialize, Clone)]
pub struct Connection {
    pub r#type: DatabaseType,
    pub name: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u64>,
    pub path: Option<std::path::PathBuf>,
    pub password: Option<String>,
    pub database: Option<String>,
}

/// Pick a connection from the config: by name when `--conn` was given,
/// otherwise the first entry.
pub fn select_connection(config: &Config, name: Option<&str>) -> Result<Connection> {
    match name {
        Some(wanted) => config
            .conn
            .iter()
            .find(|c| c.name.as_deref() == Some(wanted))
            .cloned()
            .with_context(|| format!("no connection named '{}' in config", wanted)),
        None => config
            .conn
            .first()
            .cloned()
            .context("config contains no connections"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        let yaml = r#"
conn:
  - type: sqlite
    name: local
    path: dev/sqlite/tcsweb.db
  - type: postgres
    name: prod
    user: loader
    host: db.internal
    port: 5432
    database: tcsweb
"#;
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn selects_by_name() {
        let c = select_connection(&sample_config(), Some("prod")).unwrap();
        assert!(matches!(c.r#type, DatabaseType::Postgres));
        assert_eq!(c.host.as_deref(), Some("db.internal"));
    }

    #[test]
    fn defaults_to_first_entry() {
        let c = select_connection(&sample_config(), None).unwrap();
        assert_eq!(c.name.as_deref(), Some("local"));
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(select_connection(&sample_config(), Some("staging")).is_err());
    }
}
