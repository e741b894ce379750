mod mysql;
mod postgres;
mod sqlite;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::connection::Connection;
use crate::encode::SqlValue;

pub use mysql::Mysql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

#[derive(Debug, Deserialize, Clone)]
pub enum DatabaseType {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "sqlite")]
    Sqlite,
}

/// An open database handle. One session spans a whole run (init, seed or
/// load); dropping it releases the underlying client.
pub trait DbSession {
    /// Run a single self-contained SQL statement (DDL, transaction control).
    fn exec(&mut self, sql: &str) -> Result<()>;

    /// Insert one row with bound parameters. Each backend renders its own
    /// placeholder style. Integer tokens are parsed at bind time, so a
    /// non-numeric value in a numeric column fails here instead of inside
    /// the server.
    fn insert(&mut self, table: &str, columns: &[&str], values: &[SqlValue]) -> Result<u64>;

    fn begin(&mut self) -> Result<()> {
        self.exec("BEGIN;")
    }

    fn commit(&mut self) -> Result<()> {
        self.exec("COMMIT;")
    }
}

pub fn open(conn: &Connection) -> Result<Box<dyn DbSession>> {
    Ok(match conn.r#type {
        DatabaseType::MySql => Box::new(Mysql::open(conn)?),
        DatabaseType::Postgres => Box::new(Postgres::open(conn)?),
        DatabaseType::Sqlite => Box::new(Sqlite::open(conn)?),
    })
}

pub(crate) fn insert_sql(table: &str, columns: &[&str], placeholders: &[String]) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(","),
        placeholders.join(",")
    )
}

pub(crate) fn parse_int(tok: &str) -> Result<i64> {
    tok.parse::<i64>()
        .with_context(|| format!("invalid numeric value '{}'", tok))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sql_shape() {
        let sql = insert_sql(
            "COMPANY",
            &["COMPANYKEY", "COMPANYNAME"],
            &["?".to_string(), "?".to_string()],
        );
        assert_eq!(sql, "INSERT INTO COMPANY (COMPANYKEY,COMPANYNAME) VALUES (?,?)");
    }

    #[test]
    fn parse_int_rejects_text() {
        assert!(parse_int("41750686").is_ok());
        assert!(parse_int("O'Brien").is_err());
    }
}
