//! Schema document types and the positioned tables derived from them.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate table name: {0}")]
    DuplicateTable(String),
}

/// The document handed to the renderer. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaData {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ColumnRef>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_nullable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    /// Display only
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A table placed on the canvas. `x`/`y` are the canvas-space top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedTable {
    pub table: Table,
    pub x: f64,
    pub y: f64,
}

impl SchemaData {
    pub fn from_json(input: &str) -> Result<Self, SchemaError> {
        let schema: SchemaData = serde_json::from_str(input)?;
        schema.check_unique_names()?;
        Ok(schema)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    fn check_unique_names(&self) -> Result<(), SchemaError> {
        let mut seen = std::collections::HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
        }
        Ok(())
    }
}

impl Table {
    /// Row index of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

impl Column {
    /// Not-null marker is shown only when the source says so explicitly.
    pub fn is_not_null(&self) -> bool {
        self.is_nullable == Some(false)
    }
}

impl PositionedTable {
    pub fn name(&self) -> &str {
        &self.table.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"{
        "type": "postgres",
        "tables": [
            {
                "name": "users",
                "columns": [
                    { "name": "id", "type": "uuid", "isPrimaryKey": true, "isForeignKey": false, "isUnique": true, "isNullable": false },
                    { "name": "email", "type": "text", "isPrimaryKey": false, "isForeignKey": false, "isUnique": true }
                ]
            },
            {
                "name": "orders",
                "columns": [
                    { "name": "id", "type": "uuid", "isPrimaryKey": true, "isForeignKey": false, "isUnique": false },
                    { "name": "user_id", "type": "uuid", "isPrimaryKey": false, "isForeignKey": true,
                      "references": { "table": "users", "column": "id" }, "isUnique": false, "isNullable": true }
                ]
            }
        ],
        "relationships": [
            { "fromTable": "users", "fromColumn": "id", "toTable": "orders", "toColumn": "user_id", "type": "one-to-many" }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let schema = SchemaData::from_json(DOC).unwrap();
        assert_eq!(schema.kind, "postgres");
        assert_eq!(schema.tables.len(), 2);
        assert_eq!(schema.relationships[0].from_table, "users");
        assert_eq!(schema.relationships[0].kind, "one-to-many");

        let fk = &schema.tables[1].columns[1];
        assert!(fk.is_foreign_key);
        assert_eq!(
            fk.references,
            Some(ColumnRef {
                table: "users".into(),
                column: "id".into()
            })
        );
    }

    #[test]
    fn test_missing_flags_default() {
        let schema = SchemaData::from_json(
            r#"{ "type": "sqlite", "tables": [ { "name": "t", "columns": [ { "name": "a", "type": "int" } ] } ] }"#,
        )
        .unwrap();
        let col = &schema.tables[0].columns[0];
        assert!(!col.is_primary_key);
        assert!(!col.is_foreign_key);
        assert_eq!(col.is_nullable, None);
        assert!(schema.relationships.is_empty());
    }

    #[test]
    fn test_not_null_marker() {
        let schema = SchemaData::from_json(DOC).unwrap();
        assert!(schema.tables[0].columns[0].is_not_null());
        assert!(!schema.tables[0].columns[1].is_not_null());
        assert!(!schema.tables[1].columns[1].is_not_null());
    }

    #[test]
    fn test_column_index() {
        let schema = SchemaData::from_json(DOC).unwrap();
        let orders = schema.table("orders").unwrap();
        assert_eq!(orders.column_index("user_id"), Some(1));
        assert_eq!(orders.column_index("missing"), None);
        assert!(schema.table("nope").is_none());
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let err = SchemaData::from_json(
            r#"{ "type": "x", "tables": [ { "name": "a" }, { "name": "a" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTable(name) if name == "a"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SchemaData::from_json("{ not json"),
            Err(SchemaError::Json(_))
        ));
    }
}
