use anyhow::{Context, Result};
use postgres::types::ToSql;

use crate::connection::Connection;
use crate::db::{insert_sql, DbSession};
use crate::encode::SqlValue;
use crate::logger::debug;

pub struct Postgres {
    client: postgres::Client,
}

impl Postgres {
    pub fn open(conn: &Connection) -> Result<Self> {
        debug("postgres: connecting");
        let url = Postgres::database_url(conn)?;
        let client = postgres::Client::connect(&url, postgres::NoTls)?;
        debug("postgres: connected");
        Ok(Postgres { client })
    }

    fn database_url(conn: &Connection) -> Result<String> {
        let user = conn
            .user
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("type postgres needs the user field"))?;
        let host = conn
            .host
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("type postgres needs the host field"))?;
        let port = conn
            .port
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("type postgres needs the port field"))?;
        let password = conn
            .password
            .as_ref()
            .map_or(String::new(), |p| p.to_string());

        match conn.database.as_ref() {
            Some(database) => Ok(format!(
                "postgres://{user}:{password}@{host}:{port}/{database}",
                user = user,
                password = password,
                host = host,
                port = port,
                database = database
            )),
            None => Ok(format!(
                "postgres://{user}:{password}@{host}:{port}",
                user = user,
                password = password,
                host = host,
                port = port,
            )),
        }
    }
}

impl DbSession for Postgres {
    fn exec(&mut self, sql: &str) -> Result<()> {
        self.client.batch_execute(sql)?;
        Ok(())
    }

    fn insert(&mut self, table: &str, columns: &[&str], values: &[SqlValue]) -> Result<u64> {
        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("${}", i)).collect();
        let sql = insert_sql(table, columns, &placeholders);

        // numeric columns are SMALLINT, so bind i16 and let the parse
        // catch both junk and out-of-range tokens
        let mut owned: Vec<Box<dyn ToSql + Sync>> = Vec::with_capacity(values.len());
        for v in values {
            owned.push(match v {
                SqlValue::Int(Some(tok)) => {
                    let n = tok
                        .parse::<i16>()
                        .with_context(|| format!("invalid numeric value '{}'", tok))?;
                    Box::new(n)
                }
                SqlValue::Int(None) => Box::new(Option::<i16>::None),
                SqlValue::Text(Some(s)) => Box::new(s.clone()),
                SqlValue::Text(None) => Box::new(Option::<String>::None),
            });
        }
        let params: Vec<&(dyn ToSql + Sync)> = owned.iter().map(|b| b.as_ref()).collect();

        let n = self.client.execute(sql.as_str(), &params)?;
        Ok(n)
    }
}
