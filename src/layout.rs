//! Initial table placement.
//!
//! A square-ish grid: `ceil(sqrt(n))` tables per row, fixed spacing. This
//! only guarantees distinct starting positions; it does not try to avoid
//! overlaps between tall tables or to shorten connectors.

use crate::config::DiagramConfig;
use crate::schema::{PositionedTable, Table};

pub struct LayoutEngine {
    x_spacing: f64,
    y_spacing: f64,
    x_margin: f64,
    y_margin: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::from_config(&DiagramConfig::default())
    }
}

impl LayoutEngine {
    pub fn from_config(config: &DiagramConfig) -> Self {
        Self {
            x_spacing: config.x_spacing,
            y_spacing: config.y_spacing,
            x_margin: config.x_margin,
            y_margin: config.y_margin,
        }
    }

    /// Tables per grid row for `n` tables.
    pub fn columns_per_row(n: usize) -> usize {
        (n as f64).sqrt().ceil() as usize
    }

    pub fn layout(&self, tables: &[Table]) -> Vec<PositionedTable> {
        let cols = Self::columns_per_row(tables.len()).max(1);

        let placed: Vec<PositionedTable> = tables
            .iter()
            .enumerate()
            .map(|(i, table)| {
                let (x, y) = self.position(i, cols);
                PositionedTable {
                    table: table.clone(),
                    x,
                    y,
                }
            })
            .collect();

        tracing::debug!(tables = placed.len(), cols, "grid layout computed");
        placed
    }

    fn position(&self, index: usize, cols: usize) -> (f64, f64) {
        let col = index % cols;
        let row = index / cols;
        (
            col as f64 * self.x_spacing + self.x_margin,
            row as f64 * self.y_spacing + self.y_margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tables(n: usize) -> Vec<Table> {
        (0..n)
            .map(|i| Table {
                name: format!("t{}", i),
                columns: Vec::new(),
            })
            .collect()
    }

    fn coords(placed: &[PositionedTable]) -> Vec<(f64, f64)> {
        placed.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_columns_per_row() {
        assert_eq!(LayoutEngine::columns_per_row(0), 0);
        assert_eq!(LayoutEngine::columns_per_row(1), 1);
        assert_eq!(LayoutEngine::columns_per_row(4), 2);
        assert_eq!(LayoutEngine::columns_per_row(5), 3);
        assert_eq!(LayoutEngine::columns_per_row(9), 3);
        assert_eq!(LayoutEngine::columns_per_row(10), 4);
    }

    #[test]
    fn test_empty() {
        assert!(LayoutEngine::default().layout(&[]).is_empty());
    }

    #[test]
    fn test_four_tables_grid() {
        let placed = LayoutEngine::default().layout(&tables(4));
        assert_eq!(
            coords(&placed),
            vec![(100.0, 100.0), (450.0, 100.0), (100.0, 400.0), (450.0, 400.0)]
        );
    }

    #[test]
    fn test_preserves_order_and_names() {
        let placed = LayoutEngine::default().layout(&tables(3));
        let names: Vec<&str> = placed.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn test_idempotent() {
        let input = tables(7);
        let engine = LayoutEngine::default();
        assert_eq!(engine.layout(&input), engine.layout(&input));
    }

    #[test]
    fn test_custom_spacing() {
        let config = DiagramConfig {
            x_spacing: 10.0,
            y_spacing: 20.0,
            x_margin: 0.0,
            y_margin: 5.0,
            ..DiagramConfig::default()
        };
        let placed = LayoutEngine::from_config(&config).layout(&tables(3));
        assert_eq!(coords(&placed), vec![(0.0, 5.0), (10.0, 5.0), (0.0, 25.0)]);
    }
}
