//! WebAssembly bindings for pagecraft-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.

use wasm_bindgen::prelude::*;

use crate::{
    codegen, CanvasEngine, ComponentId, Document, EventOutcome, Field, InputEvent, KeyModifiers,
    Point, PointerEvent, ViewportMode,
};

/// Initialize the editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editor session for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    engine: CanvasEngine,
}

fn changed(outcome: EventOutcome) -> bool {
    outcome == EventOutcome::DocumentChanged
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor with an empty document.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: CanvasEngine::new(),
        }
    }

    /// Load a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is invalid or has duplicate ids.
    #[wasm_bindgen(js_name = loadDocumentJson)]
    pub fn load_document_json(&mut self, json: &str) -> Result<(), String> {
        let doc = Document::from_json(json).map_err(|e| e.to_string())?;
        self.engine.load(doc);
        Ok(())
    }

    /// Get the current document as JSON.
    #[wasm_bindgen(js_name = getDocumentJson)]
    #[must_use]
    pub fn get_document_json(&self) -> String {
        self.engine.document().to_json().unwrap_or_default()
    }

    /// Pointer pressed. `target` is the component id under the pointer, if any.
    ///
    /// Returns whether the selection or drag state changed.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32, target: Option<String>) -> bool {
        let target = target.and_then(|t| ComponentId::parse(&t).ok());
        self.engine.pointer_down(Point::new(x, y), target) != EventOutcome::Ignored
    }

    /// Pointer moved. Returns whether the document changed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        changed(self.engine.pointer_move(Point::new(x, y)))
    }

    /// Pointer released.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.engine.handle_pointer(PointerEvent::Up);
    }

    /// Pointer left the canvas.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.engine.handle_pointer(PointerEvent::Leave);
    }

    /// Key pressed. Returns whether the document changed.
    #[wasm_bindgen(js_name = keyDown)]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        let modifiers = KeyModifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        changed(self.engine.handle(&InputEvent::key_with(key, modifiers)))
    }

    /// Add a component by kind name. Returns the new id.
    #[wasm_bindgen(js_name = addComponent)]
    pub fn add_component(&mut self, kind: &str, x: f32, y: f32) -> Option<String> {
        self.engine
            .add_named(kind, Point::new(x, y))
            .map(|id| id.to_string())
    }

    /// Edit a property of the selected component. Returns whether it applied.
    #[wasm_bindgen(js_name = editProperty)]
    pub fn edit_property(&mut self, field: &str, value: &str) -> bool {
        changed(self.engine.edit(&Field::from(field), value))
    }

    /// Selected component id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.engine.selection().map(|id| id.to_string())
    }

    /// Inspector fields of the selection as JSON (`null` when empty).
    #[wasm_bindgen(js_name = inspectJson)]
    #[must_use]
    pub fn inspect_json(&self) -> String {
        serde_json::to_string(&self.engine.inspector().inspect()).unwrap_or_default()
    }

    /// Switch the preview width. Unknown names are ignored.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, mode: &str) -> bool {
        mode.parse::<ViewportMode>()
            .is_ok_and(|m| self.engine.set_viewport_mode(m))
    }

    /// Canvas display width for the current viewport.
    #[wasm_bindgen(js_name = viewportWidth)]
    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.engine.viewport().canvas_width()
    }

    /// Generated page source for the current document.
    #[must_use]
    pub fn generate(&self) -> String {
        codegen::generate(self.engine.document())
    }

    /// Undo the last change.
    pub fn undo(&mut self) -> bool {
        changed(self.engine.undo())
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        changed(self.engine.redo())
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}
