//! Relationship connectors.
//!
//! Recomputed from scratch whenever positions change; nothing is cached.
//! Relationships that reference a table not on the canvas are skipped,
//! and an unknown column anchors at the first row.

use crate::config::DiagramConfig;
use crate::schema::{PositionedTable, Relationship};
use crate::viewport::Point;
use std::collections::HashMap;

/// A cubic curve from the right edge of one table to the left edge of another.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Index into the relationship list it was built from
    pub relationship_index: usize,
    pub from_table: String,
    pub to_table: String,
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl Connector {
    pub fn control_offset(&self) -> f64 {
        self.control1.x - self.start.x
    }

    /// SVG path data.
    pub fn path_data(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

pub fn build_connectors(
    tables: &[PositionedTable],
    relationships: &[Relationship],
    config: &DiagramConfig,
) -> Vec<Connector> {
    let by_name: HashMap<&str, &PositionedTable> =
        tables.iter().map(|t| (t.name(), t)).collect();

    relationships
        .iter()
        .enumerate()
        .filter_map(|(idx, rel)| {
            let from = by_name.get(rel.from_table.as_str());
            let to = by_name.get(rel.to_table.as_str());
            let (Some(from), Some(to)) = (from, to) else {
                tracing::debug!(
                    from = %rel.from_table,
                    to = %rel.to_table,
                    "skipping relationship with unknown table"
                );
                return None;
            };
            Some(connect(idx, from, &rel.from_column, to, &rel.to_column, config))
        })
        .collect()
}

/// Relationships naming a table that is not on the canvas. These never
/// produce a connector.
pub fn unresolved<'a>(
    tables: &[PositionedTable],
    relationships: &'a [Relationship],
) -> Vec<&'a Relationship> {
    relationships
        .iter()
        .filter(|rel| {
            let known = |name: &str| tables.iter().any(|t| t.name() == name);
            !known(&rel.from_table) || !known(&rel.to_table)
        })
        .collect()
}

fn connect(
    relationship_index: usize,
    from: &PositionedTable,
    from_column: &str,
    to: &PositionedTable,
    to_column: &str,
    config: &DiagramConfig,
) -> Connector {
    let start = Point::new(
        from.x + config.table_width,
        row_center_y(from, from_column, config),
    );
    let end = Point::new(to.x, row_center_y(to, to_column, config));

    let offset = ((end.x - start.x).abs() * 0.5).max(config.min_control_offset);

    Connector {
        relationship_index,
        from_table: from.name().to_string(),
        to_table: to.name().to_string(),
        start,
        control1: Point::new(start.x + offset, start.y),
        control2: Point::new(end.x - offset, end.y),
        end,
    }
}

fn row_center_y(table: &PositionedTable, column: &str, config: &DiagramConfig) -> f64 {
    let row = table.table.column_index(column).unwrap_or(0);
    table.y + config.header_height + row as f64 * config.row_height + config.row_height / 2.0
}
