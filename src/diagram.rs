//! A viewing session over one schema document.
//!
//! `Diagram` is the observed store: table positions and the viewport.
//! `revision` moves forward only when one of those actually changes, so a
//! host can skip redraws for pointer input that changed nothing. The
//! in-progress gesture lives in the [`DragController`], which is not
//! versioned.

use crate::config::{ConfigError, DiagramConfig};
use crate::connector::{self, Connector, build_connectors};
use crate::drag::{DragController, PointerTarget};
use crate::export::{self, ExportArtifact, ExportError};
use crate::layout::LayoutEngine;
use crate::schema::{PositionedTable, SchemaData, SchemaError};
use crate::svg::SvgRenderer;
use crate::viewport::{Point, Viewport};

#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct Diagram {
    config: DiagramConfig,
    schema: SchemaData,
    tables: Vec<PositionedTable>,
    viewport: Viewport,
    drag: DragController,
    revision: u64,
}

impl Diagram {
    pub fn new(schema: SchemaData, config: DiagramConfig) -> Result<Self, ConfigError> {
        let viewport = Viewport::from_config(&config)?;
        let tables = LayoutEngine::from_config(&config).layout(&schema.tables);
        report_unresolved(&tables, &schema);
        Ok(Self {
            viewport,
            config,
            schema,
            tables,
            drag: DragController::new(),
            revision: 0,
        })
    }

    pub fn from_json(input: &str, config: DiagramConfig) -> Result<Self, DiagramError> {
        Ok(Self::new(SchemaData::from_json(input)?, config)?)
    }

    /// Replace the document. Layout is recomputed from scratch and any
    /// gesture in progress is dropped; the viewport is kept.
    pub fn load(&mut self, schema: SchemaData) {
        self.tables = LayoutEngine::from_config(&self.config).layout(&schema.tables);
        report_unresolved(&self.tables, &schema);
        self.schema = schema;
        self.drag.pointer_up();
        self.bump();
    }

    pub fn schema(&self) -> &SchemaData {
        &self.schema
    }

    pub fn tables(&self) -> &[PositionedTable] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&PositionedTable> {
        self.tables.iter().find(|t| t.name() == name)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn zoom_in(&mut self) {
        let before = self.viewport.scale();
        self.viewport.zoom_in();
        self.bump_if(before != self.viewport.scale());
    }

    pub fn zoom_out(&mut self) {
        let before = self.viewport.scale();
        self.viewport.zoom_out();
        self.bump_if(before != self.viewport.scale());
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
        self.bump_if(dx != 0.0 || dy != 0.0);
    }

    /// Header of the topmost table under the pointer, else the background.
    /// Tables later in the list are drawn on top.
    pub fn hit_test(&self, screen: Point) -> PointerTarget {
        let p = self.viewport.screen_to_canvas(screen);
        self.tables
            .iter()
            .rev()
            .find(|t| {
                p.x >= t.x
                    && p.x <= t.x + self.config.table_width
                    && p.y >= t.y
                    && p.y <= t.y + self.config.header_height
            })
            .map(|t| PointerTarget::TableHeader(t.name().to_string()))
            .unwrap_or(PointerTarget::Background)
    }

    /// Pointer-down at a screen position; the target is found by hit test.
    pub fn pointer_down(&mut self, screen: Point) -> bool {
        let target = self.hit_test(screen);
        self.pointer_down_on(target, screen)
    }

    /// Pointer-down when the host already knows what was hit.
    pub fn pointer_down_on(&mut self, target: PointerTarget, screen: Point) -> bool {
        self.drag
            .pointer_down(target, screen, &self.viewport, &self.tables)
    }

    /// Returns whether anything observable changed.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        // TODO: coalesce moves per animation frame if large schemas show
        // the per-move redraw in profiles.
        let changed = self
            .drag
            .pointer_move(screen, &mut self.viewport, &mut self.tables);
        self.bump_if(changed);
        changed
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn connectors(&self) -> Vec<Connector> {
        build_connectors(&self.tables, &self.schema.relationships, &self.config)
    }

    pub fn render(&self) -> String {
        SvgRenderer::new(self.config.clone()).render(
            &self.tables,
            &self.connectors(),
            &self.viewport,
        )
    }

    pub fn export(&self, project_id: &str) -> Result<ExportArtifact, ExportError> {
        export::export(&self.schema, project_id)
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn bump_if(&mut self, changed: bool) {
        if changed {
            self.bump();
        }
    }
}

/// Warn once per document; rendering skips these silently on every frame.
fn report_unresolved(tables: &[PositionedTable], schema: &SchemaData) {
    for rel in connector::unresolved(tables, &schema.relationships) {
        tracing::warn!(
            from = %rel.from_table,
            to = %rel.to_table,
            "relationship references an unknown table and will not be drawn"
        );
    }
}
