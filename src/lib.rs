pub mod config;
pub mod connector;
pub mod diagram;
pub mod drag;
pub mod export;
pub mod layout;
pub mod measure;
pub mod schema;
pub mod svg;
pub mod viewport;

use wasm_bindgen::prelude::*;

use config::DiagramConfig;
use diagram::Diagram;
use schema::SchemaData;
use viewport::Point;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Browser-facing handle. The host forwards pointer events (move/up from
/// `window`, so a fast pointer leaving the canvas keeps the gesture) and
/// re-renders whenever `revision()` changes.
#[wasm_bindgen]
pub struct SchemaCanvas {
    diagram: Diagram,
}

#[wasm_bindgen]
impl SchemaCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(schema_json: &str) -> Result<SchemaCanvas, JsValue> {
        let diagram = Diagram::from_json(schema_json, DiagramConfig::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(SchemaCanvas { diagram })
    }

    /// Replace the document and recompute the layout.
    pub fn load(&mut self, schema_json: &str) -> Result<(), JsValue> {
        let schema =
            SchemaData::from_json(schema_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.diagram.load(schema);
        Ok(())
    }

    #[wasm_bindgen(js_name = "zoomIn")]
    pub fn zoom_in(&mut self) {
        self.diagram.zoom_in();
    }

    #[wasm_bindgen(js_name = "zoomOut")]
    pub fn zoom_out(&mut self) {
        self.diagram.zoom_out();
    }

    pub fn scale(&self) -> f64 {
        self.diagram.viewport().scale()
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.diagram.pointer_down(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.diagram.pointer_move(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        self.diagram.pointer_up();
    }

    #[wasm_bindgen(js_name = "isDragging")]
    pub fn is_dragging(&self) -> bool {
        self.diagram.drag().is_active()
    }

    /// Revisions are small counters; f64 keeps them plain JS numbers.
    pub fn revision(&self) -> f64 {
        self.diagram.revision() as f64
    }

    pub fn render(&self) -> String {
        self.diagram.render()
    }

    /// `{ fileName, contents }` for the host to hand to a download.
    #[wasm_bindgen(js_name = "exportArtifact")]
    pub fn export_artifact(&self, project_id: &str) -> Result<js_sys::Object, JsValue> {
        let artifact = self
            .diagram
            .export(project_id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"fileName".into(), &artifact.file_name.into())?;
        js_sys::Reflect::set(&obj, &"contents".into(), &artifact.contents.into())?;
        Ok(obj)
    }
}
