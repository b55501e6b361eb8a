//! Table definitions as data, rendered to Oracle DDL.
//! Kept apart from the entity type so column definitions can be checked on their own.

use crate::model::{EMAIL_MAX_LEN, NAME_MAX_LEN, TABLE_NAME};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Store-generated integer key.
    Identity,
    Varchar(usize),
    TimestampTz,
}

impl ColumnType {
    fn oracle_type(&self) -> String {
        match self {
            ColumnType::Identity => "NUMBER(19) GENERATED BY DEFAULT ON NULL AS IDENTITY".into(),
            ColumnType::Varchar(n) => format!("VARCHAR2({} CHAR)", n),
            ColumnType::TimestampTz => "TIMESTAMP WITH TIME ZONE".into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub type_: ColumnType,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub default: Option<&'static str>,
}

impl ColumnDef {
    const fn new(name: &'static str, type_: ColumnType) -> Self {
        Self {
            name,
            type_,
            nullable: false,
            primary_key: false,
            unique: false,
            default: None,
        }
    }

    fn ddl(&self) -> String {
        let mut out = format!("{} {}", self.name, self.type_.oracle_type());
        if let Some(d) = self.default {
            out.push_str(&format!(" DEFAULT {}", d));
        }
        if self.primary_key {
            out.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            out.push_str(" NOT NULL");
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn create_table_sql(&self) -> String {
        let cols: Vec<String> = self.columns.iter().map(ColumnDef::ddl).collect();
        format!("CREATE TABLE {} (\n  {}\n)", self.name, cols.join(",\n  "))
    }

    /// One `CREATE UNIQUE INDEX` per unique column, named `UX_<TABLE>_<COLUMN>`.
    pub fn unique_index_sql(&self) -> Vec<String> {
        self.unique_columns()
            .map(|c| self.unique_index_sql_for(c.name))
            .collect()
    }

    pub fn unique_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.unique)
    }

    pub fn unique_index_sql_for(&self, column: &str) -> String {
        format!(
            "CREATE UNIQUE INDEX UX_{}_{} ON {} ({})",
            self.name, column, self.name, column
        )
    }
}

/// The Customer table.
pub fn customers_table() -> TableDef {
    TableDef {
        name: TABLE_NAME,
        columns: vec![
            ColumnDef {
                primary_key: true,
                ..ColumnDef::new("ID", ColumnType::Identity)
            },
            ColumnDef::new("NAME", ColumnType::Varchar(NAME_MAX_LEN)),
            ColumnDef {
                unique: true,
                ..ColumnDef::new("EMAIL", ColumnType::Varchar(EMAIL_MAX_LEN))
            },
            ColumnDef {
                default: Some("SYSTIMESTAMP"),
                ..ColumnDef::new("CREATED_AT", ColumnType::TimestampTz)
            },
            ColumnDef {
                default: Some("SYSTIMESTAMP"),
                ..ColumnDef::new("UPDATED_AT", ColumnType::TimestampTz)
            },
        ],
    }
}
