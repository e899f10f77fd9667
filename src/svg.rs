use crate::config::DiagramConfig;
use crate::connector::Connector;
use crate::measure::TextMetrics;
use crate::schema::{Column, PositionedTable};
use crate::viewport::Viewport;
use std::fmt::Write;

pub struct SvgRenderer {
    config: DiagramConfig,
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(DiagramConfig::default())
    }
}

impl SvgRenderer {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            metrics: TextMetrics::new(config.char_width),
            config,
        }
    }

    /// Render the whole canvas. Geometry is written in canvas space under a
    /// single root transform taken from the viewport.
    pub fn render(
        &self,
        tables: &[PositionedTable],
        connectors: &[Connector],
        viewport: &Viewport,
    ) -> String {
        let mut svg = String::new();
        let stroke = self.stroke_width(viewport.scale());

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%">"#
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .canvas-bg {{ fill: #fafafa; }}
  .table-bg {{ fill: #fff; }}
  .table-header {{ fill: #e0e0e0; cursor: grab; }}
  .table-border {{ fill: none; stroke: #333; }}
  .table-name {{ font-family: monospace; font-size: 14px; font-weight: bold; pointer-events: none; }}
  .column-name {{ font-family: monospace; font-size: 12px; }}
  .column-type {{ font-family: monospace; font-size: 12px; fill: #666; }}
  .badges {{ font-family: monospace; font-size: 10px; fill: #333; }}
  .pk {{ font-weight: bold; }}
  .fk {{ font-style: italic; }}
  .connector {{ stroke: #666; fill: none; }}
  .anchor {{ fill: #666; }}
</style>"#
        )
        .unwrap();

        writeln!(
            &mut svg,
            r##"<defs><marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="#666" /></marker></defs>"##
        )
        .unwrap();

        // Pointer-downs that land here start a pan
        writeln!(
            &mut svg,
            r#"<rect class="canvas-bg" data-background="true" width="100%" height="100%" />"#
        )
        .unwrap();

        writeln!(&mut svg, r#"<g transform="{}">"#, viewport.transform()).unwrap();

        // Connectors first (behind tables)
        for connector in connectors {
            self.render_connector(&mut svg, connector, stroke);
        }

        for table in tables {
            self.render_table(&mut svg, table, stroke);
        }

        writeln!(&mut svg, "</g>").unwrap();
        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    /// Keep strokes roughly constant on screen regardless of zoom.
    fn stroke_width(&self, scale: f64) -> f64 {
        let base = self.config.stroke_width;
        (base / scale).min(base * 5.0)
    }

    fn render_table(&self, svg: &mut String, table: &PositionedTable, stroke: f64) {
        let x = table.x;
        let y = table.y;
        let w = self.config.table_width;
        let header_h = self.config.header_height;
        let row_h = self.config.row_height;
        let height = self.config.table_height(table.table.columns.len());
        let name = escape_xml(table.name());

        writeln!(svg, r#"<g class="table" data-table="{}">"#, name).unwrap();

        // 1. Background
        writeln!(
            svg,
            r#"<rect class="table-bg" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            x, y, w, height
        )
        .unwrap();

        // 2. Header: the drag handle
        writeln!(
            svg,
            r#"<rect class="table-header" data-drag-handle="{}" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            name, x, y, w, header_h
        )
        .unwrap();

        let title = self
            .metrics
            .fit(table.name(), w - self.config.padding_x * 2.0);
        writeln!(
            svg,
            r#"<text class="table-name" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            x + w / 2.0,
            y + header_h / 2.0 + 5.0,
            escape_xml(&title)
        )
        .unwrap();

        // 3. Columns
        if !table.table.columns.is_empty() {
            writeln!(
                svg,
                r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#333" stroke-width="{}" />"##,
                x,
                y + header_h,
                x + w,
                y + header_h,
                stroke
            )
            .unwrap();
        }

        for (i, col) in table.table.columns.iter().enumerate() {
            let row_y = y + header_h + i as f64 * row_h;
            self.render_column(svg, col, x, row_y + row_h / 2.0 + 4.0);
        }

        // 4. Border last so it sits on top
        writeln!(
            svg,
            r#"<rect class="table-border" x="{}" y="{}" width="{}" height="{}" rx="4" stroke-width="{}" />"#,
            x, y, w, height, stroke
        )
        .unwrap();

        writeln!(svg, "</g>").unwrap();
    }

    fn render_column(&self, svg: &mut String, col: &Column, x: f64, text_y: f64) {
        let w = self.config.table_width;
        let pad = self.config.padding_x;

        let mut class = "column-name".to_string();
        if col.is_primary_key {
            class.push_str(" pk");
        }
        if col.is_foreign_key {
            class.push_str(" fk");
        }

        let name = self.metrics.fit(&col.name, w * 0.45 - pad);
        let hover = col
            .references
            .as_ref()
            .map(|r| format!("<title>references {}.{}</title>", escape_xml(&r.table), escape_xml(&r.column)))
            .unwrap_or_default();
        writeln!(
            svg,
            r#"<text class="{}" x="{}" y="{}">{}{}</text>"#,
            class,
            x + pad,
            text_y,
            escape_xml(&name),
            hover
        )
        .unwrap();

        let typ = self.metrics.fit(&col.typ, w * 0.3);
        writeln!(
            svg,
            r#"<text class="column-type" x="{}" y="{}">{}</text>"#,
            x + w * 0.5,
            text_y,
            escape_xml(&typ)
        )
        .unwrap();

        let badges = badges(col);
        if !badges.is_empty() {
            writeln!(
                svg,
                r#"<text class="badges" x="{}" y="{}" text-anchor="end">{}</text>"#,
                x + w - pad,
                text_y,
                badges.join(" ")
            )
            .unwrap();
        }
    }

    fn render_connector(&self, svg: &mut String, connector: &Connector, stroke: f64) {
        writeln!(
            svg,
            r#"<path class="connector" data-from="{}" data-to="{}" d="{}" stroke-width="{}" marker-end="url(#arrow)" />"#,
            escape_xml(&connector.from_table),
            escape_xml(&connector.to_table),
            connector.path_data(),
            stroke
        )
        .unwrap();

        let r = self.config.anchor_radius;
        for p in [connector.start, connector.end] {
            writeln!(
                svg,
                r#"<circle class="anchor" cx="{}" cy="{}" r="{}" />"#,
                p.x, p.y, r
            )
            .unwrap();
        }
    }
}

fn badges(col: &Column) -> Vec<&'static str> {
    let mut out = Vec::new();
    if col.is_primary_key {
        out.push("PK");
    }
    if col.is_foreign_key {
        out.push("FK");
    }
    if col.is_unique && !col.is_primary_key {
        out.push("UQ");
    }
    if col.is_not_null() {
        out.push("NN");
    }
    out
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
