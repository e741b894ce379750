use std::path::{Path, PathBuf};

use anyhow::Result;
use rusqlite::types::Value;

use crate::connection::Connection;
use crate::db::{insert_sql, parse_int, DbSession};
use crate::encode::SqlValue;
use crate::logger::debug;

pub struct Sqlite {
    conn: rusqlite::Connection,
}

impl Sqlite {
    pub fn open(conn: &Connection) -> Result<Self> {
        let path = conn
            .path
            .as_ref()
            .and_then(|p| expand_path(p))
            .ok_or_else(|| anyhow::anyhow!("type sqlite needs the path field"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug(&format!("sqlite: opening {}", path.display()));
        let conn = rusqlite::Connection::open(path)?;
        Ok(Sqlite { conn })
    }
}

impl DbSession for Sqlite {
    fn exec(&mut self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn insert(&mut self, table: &str, columns: &[&str], values: &[SqlValue]) -> Result<u64> {
        let placeholders = vec!["?".to_string(); values.len()];
        let sql = insert_sql(table, columns, &placeholders);

        let mut params = Vec::with_capacity(values.len());
        for v in values {
            params.push(match v {
                SqlValue::Int(Some(tok)) => Value::Integer(parse_int(tok)?),
                SqlValue::Int(None) | SqlValue::Text(None) => Value::Null,
                SqlValue::Text(Some(s)) => Value::Text(s.clone()),
            });
        }

        let n = self.conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(n as u64)
    }
}

fn expand_path(path: &Path) -> Option<PathBuf> {
    let mut expanded_path = PathBuf::new();
    let mut path_iter = path.iter();
    if path.starts_with("~") {
        path_iter.next()?;
        expanded_path = expanded_path.join(dirs_next::home_dir()?);
    }
    for path in path_iter {
        let path = path.to_str()?;
        expanded_path = if cfg!(unix) && path.starts_with('$') {
            expanded_path.join(std::env::var(path.strip_prefix('$')?).unwrap_or_default())
        } else if cfg!(windows) && path.starts_with('%') && path.ends_with('%') {
            expanded_path
                .join(std::env::var(path.strip_prefix('%')?.strip_suffix('%')?).unwrap_or_default())
        } else {
            expanded_path.join(path)
        }
    }
    Some(expanded_path)
}
