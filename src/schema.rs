//! Static table definitions for the manifest database.
//!
//! Column order matters: the manifest loader lines CSV fields up against
//! `DMFSTDAT` positionally, and the SMALLINT positions drive the numeric
//! classification in `encode`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    VarChar(u16),
    SmallInt,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
}

impl Column {
    const fn varchar(name: &'static str, len: u16) -> Self {
        Column { name, ty: ColumnType::VarChar(len), primary_key: false }
    }

    const fn smallint(name: &'static str) -> Self {
        Column { name, ty: ColumnType::SmallInt, primary_key: false }
    }

    const fn key(name: &'static str, len: u16) -> Self {
        Column { name, ty: ColumnType::VarChar(len), primary_key: true }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn create_sql(&self) -> String {
        let cols = self
            .columns
            .iter()
            .map(|c| {
                let ty = match c.ty {
                    ColumnType::VarChar(n) => format!("VARCHAR({})", n),
                    ColumnType::SmallInt => "SMALLINT".to_string(),
                };
                if c.primary_key {
                    format!("{} {} PRIMARY KEY", c.name, ty)
                } else {
                    format!("{} {}", c.name, ty)
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        format!("CREATE TABLE IF NOT EXISTS {} ({});", self.name, cols)
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {};", self.name)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Positions of SMALLINT columns; the loader treats these as numeric.
    pub fn numeric_positions(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.ty == ColumnType::SmallInt)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Delivery manifest rows, one per stop. Mirrors the legacy DMFSTDAT
/// layout exactly; the bulk loader depends on this column order.
pub static MANIFEST: TableSchema = TableSchema {
    name: "DMFSTDAT",
    columns: &[
        Column::key("MFSTKEY", 20),
        Column::varchar("STATUS", 1),
        Column::varchar("LASTUPDATE", 14),
        Column::varchar("MFSTNUMBER", 10),
        Column::varchar("POWERUNIT", 10),
        Column::smallint("STOP"),
        Column::varchar("MFSTDATE", 8),
        Column::varchar("PRONUMBER", 10),
        Column::varchar("PRODATE", 8),
        Column::varchar("SHIPNAME", 30),
        Column::varchar("CONSNAME", 30),
        Column::varchar("CONSADD1", 30),
        Column::varchar("CONSADD2", 30),
        Column::varchar("CONSCITY", 20),
        Column::varchar("CONSSTATE", 2),
        Column::varchar("CONSZIP", 5),
        Column::smallint("TTLPCS"),
        Column::smallint("TTLYDS"),
        Column::smallint("TTLWGT"),
        Column::varchar("DLVDDATE", 8),
        Column::varchar("DLVDTIME", 4),
        Column::smallint("DLVDPCS"),
        Column::varchar("DLVDSIGN", 30),
        Column::varchar("DLVDNOTE", 30),
        Column::varchar("DLVDIMGFILELOCN", 30),
        Column::varchar("DLVDIMGFILESIGN", 30),
    ],
};

pub static USERS: TableSchema = TableSchema {
    name: "USERS",
    columns: &[
        Column::key("USERNAME", 30),
        Column::varchar("PASSWORD", 30),
        Column::varchar("PERMISSIONS", 10),
        Column::varchar("POWERUNIT", 10),
        Column::varchar("COMPANYKEY01", 10),
        Column::varchar("COMPANYKEY02", 10),
        Column::varchar("COMPANYKEY03", 10),
        Column::varchar("COMPANYKEY04", 10),
        Column::varchar("COMPANYKEY05", 10),
        Column::varchar("MODULE01", 10),
        Column::varchar("MODULE02", 10),
        Column::varchar("MODULE03", 10),
        Column::varchar("MODULE04", 10),
        Column::varchar("MODULE05", 10),
        Column::varchar("MODULE06", 10),
        Column::varchar("MODULE07", 10),
        Column::varchar("MODULE08", 10),
        Column::varchar("MODULE09", 10),
        Column::varchar("MODULE10", 10),
    ],
};

pub static COMPANY: TableSchema = TableSchema {
    name: "COMPANY",
    columns: &[
        Column::key("COMPANYKEY", 10),
        Column::varchar("COMPANYNAME", 50),
        Column::varchar("COMPANYDB", 10),
    ],
};

pub static ALL_TABLES: &[&TableSchema] = &[&COMPANY, &USERS, &MANIFEST];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_has_26_columns_in_legacy_order() {
        assert_eq!(MANIFEST.columns.len(), 26);
        assert_eq!(MANIFEST.columns[0].name, "MFSTKEY");
        assert_eq!(MANIFEST.columns[25].name, "DLVDIMGFILESIGN");
    }

    #[test]
    fn manifest_numeric_positions() {
        assert_eq!(MANIFEST.numeric_positions(), vec![5, 16, 17, 18, 21]);
    }

    #[test]
    fn create_sql_marks_primary_key() {
        let sql = MANIFEST.create_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS DMFSTDAT ("));
        assert!(sql.contains("MFSTKEY VARCHAR(20) PRIMARY KEY"));
        assert!(sql.contains("STOP SMALLINT"));
        assert!(sql.ends_with(");"));
    }

    #[test]
    fn users_and_company_shapes() {
        assert_eq!(USERS.columns.len(), 19);
        assert!(USERS.numeric_positions().is_empty());
        assert_eq!(COMPANY.columns.len(), 3);
        assert_eq!(COMPANY.columns[0].name, "COMPANYKEY");
    }
}
