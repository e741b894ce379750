use anyhow::Result;
use mysql::prelude::Queryable;
use mysql::Value;

use crate::connection::Connection;
use crate::db::{insert_sql, parse_int, DbSession};
use crate::encode::SqlValue;
use crate::logger::debug;

pub struct Mysql {
    conn: mysql::Conn,
}

impl Mysql {
    pub fn open(conn: &Connection) -> Result<Self> {
        debug("mysql: connecting");
        let url = Mysql::database_url(conn)?;
        let opts = mysql::Opts::from_url(&url)?;
        let conn = mysql::Conn::new(opts)?;
        debug("mysql: connected");
        Ok(Mysql { conn })
    }

    fn database_url(conn: &Connection) -> Result<String> {
        let user = conn
            .user
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("type mysql needs the user field"))?;
        let host = conn
            .host
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("type mysql needs the host field"))?;
        let port = conn
            .port
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("type mysql needs the port field"))?;
        let password = conn
            .password
            .as_ref()
            .map_or(String::new(), |p| p.to_string());

        match conn.database.as_ref() {
            Some(database) => Ok(format!(
                "mysql://{user}:{password}@{host}:{port}/{database}",
                user = user,
                password = password,
                host = host,
                port = port,
                database = database
            )),
            None => Ok(format!(
                "mysql://{user}:{password}@{host}:{port}",
                user = user,
                password = password,
                host = host,
                port = port,
            )),
        }
    }
}

impl DbSession for Mysql {
    fn exec(&mut self, sql: &str) -> Result<()> {
        self.conn.query_drop(sql)?;
        Ok(())
    }

    fn insert(&mut self, table: &str, columns: &[&str], values: &[SqlValue]) -> Result<u64> {
        let placeholders = vec!["?".to_string(); values.len()];
        let sql = insert_sql(table, columns, &placeholders);

        let mut params = Vec::with_capacity(values.len());
        for v in values {
            params.push(match v {
                SqlValue::Int(Some(tok)) => Value::Int(parse_int(tok)?),
                SqlValue::Int(None) | SqlValue::Text(None) => Value::NULL,
                SqlValue::Text(Some(s)) => Value::Bytes(s.clone().into_bytes()),
            });
        }

        self.conn.exec_drop(&sql, params)?;
        Ok(self.conn.affected_rows())
    }
}
