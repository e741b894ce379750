use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::db::DbSession;
use crate::encode::SqlValue;
use crate::logger::info;
use crate::schema::{COMPANY, USERS};

const COMPANY_SLOTS: usize = 5;
const MODULE_SLOTS: usize = 10;

/// Reference rows supplied by the operator. The legacy scripts carried
/// these as inline dictionaries; here they come from a YAML file so the
/// same binary can provision any environment.
#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub companies: Vec<CompanySeed>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

#[derive(Debug, Deserialize)]
pub struct CompanySeed {
    pub key: String,
    pub name: String,
    pub db: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserSeed {
    pub username: String,
    pub password: String,
    pub permissions: Option<String>,
    pub powerunit: Option<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub modules: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub companies: u64,
    pub users: u64,
}

pub fn load_seed_file(path: &Path) -> Result<SeedData> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let seed: SeedData = serde_yaml::from_slice(&data)
        .with_context(|| format!("failed to parse YAML at {}", path.display()))?;
    Ok(seed)
}

/// Insert all seed rows in one transaction.
pub fn apply(session: &mut dyn DbSession, data: &SeedData) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    session.begin()?;
    for company in &data.companies {
        summary.companies += session.insert(
            COMPANY.name,
            &COMPANY.column_names(),
            &company_values(company),
        )?;
    }
    for user in &data.users {
        summary.users +=
            session.insert(USERS.name, &USERS.column_names(), &user_values(user)?)?;
    }
    session.commit()?;

    info(&format!(
        "seeded {} companies, {} users",
        summary.companies, summary.users
    ));
    Ok(summary)
}

fn text(s: &str) -> SqlValue {
    SqlValue::Text(Some(s.to_string()))
}

fn opt_text(s: &Option<String>) -> SqlValue {
    SqlValue::Text(s.clone())
}

fn company_values(company: &CompanySeed) -> Vec<SqlValue> {
    vec![text(&company.key), text(&company.name), opt_text(&company.db)]
}

fn user_values(user: &UserSeed) -> Result<Vec<SqlValue>> {
    let mut values = vec![
        text(&user.username),
        text(&user.password),
        opt_text(&user.permissions),
        opt_text(&user.powerunit),
    ];
    values.extend(pad_slots(&user.companies, COMPANY_SLOTS, &user.username, "company keys")?);
    values.extend(pad_slots(&user.modules, MODULE_SLOTS, &user.username, "modules")?);
    Ok(values)
}

/// Fill the fixed slot columns, padding the tail with NULL.
fn pad_slots(items: &[String], slots: usize, user: &str, what: &str) -> Result<Vec<SqlValue>> {
    if items.len() > slots {
        bail!("user '{}' has {} {}, the schema holds {}", user, items.len(), what, slots);
    }
    let mut out: Vec<SqlValue> = items.iter().map(|s| text(s)).collect();
    out.resize(slots, SqlValue::Text(None));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
companies:
  - key: COMPANY01
    name: Brauns Express Inc
    db: BRAUNS
  - key: COMPANY02
    name: Normandin Trucking Support
users:
  - username: admin
    password: password
    companies: [BRAUNS]
  - username: cbraatz
    password: password
    powerunit: "47"
    companies: [BRAUNS]
"#;

    #[test]
    fn parses_sample_yaml() {
        let data: SeedData = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(data.companies.len(), 2);
        assert_eq!(data.companies[1].db, None);
        assert_eq!(data.users[1].powerunit.as_deref(), Some("47"));
    }

    #[test]
    fn user_row_has_one_value_per_column() {
        let data: SeedData = serde_yaml::from_str(SAMPLE).unwrap();
        let values = user_values(&data.users[0]).unwrap();
        assert_eq!(values.len(), USERS.columns.len());
        assert_eq!(values[4], SqlValue::Text(Some("BRAUNS".into())));
        // unused slots and modules are NULL
        assert_eq!(values[5], SqlValue::Text(None));
        assert_eq!(values[18], SqlValue::Text(None));
    }

    #[test]
    fn too_many_company_keys_is_an_error() {
        let items: Vec<String> = (0..6).map(|i| format!("C{}", i)).collect();
        assert!(pad_slots(&items, COMPANY_SLOTS, "admin", "company keys").is_err());
    }
}
