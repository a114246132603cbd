//! Canvas interaction engine.
//!
//! Turns pointer and keyboard events into document mutations. The engine owns
//! the current [`Document`] plus the transient interaction state (selection,
//! active drag), which is never part of the document itself.
//!
//! ```text
//!             pointer down on component
//!   ┌──────┐ ─────────────────────────▶ ┌──────────┐ ◀─┐ pointer move
//!   │ Idle │                            │ Dragging │ ──┘ (move_to)
//!   └──────┘ ◀── down on empty canvas ─ └──────────┘
//!      ▲                                   │ up / leave
//!      │ down on empty canvas, Escape,     ▼
//!      │ selected component deleted    ┌──────────┐
//!      └────────────────────────────── │ Selected │
//!                                      └──────────┘
//! ```
//!
//! Failed mutations are logged and dropped; the engine keeps accepting input.

use serde::{Deserialize, Serialize};

use crate::inspector::{Field, Inspector};
use crate::mutation::{self, Mutated, Mutation};
use crate::{
    ComponentId, ComponentKind, Document, History, InputEvent, KeyModifiers, MutationError,
    MutationResult, Point, PointerEvent, Viewport, ViewportMode,
};

/// Arrow-key nudge distance in pixels.
pub const NUDGE_STEP: f32 = 1.0;

/// Arrow-key nudge distance with Shift held.
pub const NUDGE_STEP_LARGE: f32 = 10.0;

/// Change notification callback, invoked with the new document.
pub type OnChangeCallback = Box<dyn FnMut(&Document)>;

/// Transient interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Interaction {
    /// Nothing selected.
    #[default]
    Idle,
    /// A component is selected but not being dragged.
    Selected {
        /// Selected component.
        id: ComponentId,
    },
    /// A component is selected and follows the pointer.
    Dragging {
        /// Dragged component.
        id: ComponentId,
        /// Pointer position relative to the component's top-left corner.
        offset: Point,
    },
}

impl Interaction {
    /// The selected component, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<ComponentId> {
        match self {
            Self::Idle => None,
            Self::Selected { id } | Self::Dragging { id, .. } => Some(*id),
        }
    }
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// Nothing changed.
    Ignored,
    /// Selection or drag state changed; the document did not.
    InteractionChanged,
    /// A new document was committed.
    DocumentChanged,
}

/// The canvas interaction engine for one editing session.
pub struct CanvasEngine {
    document: Document,
    interaction: Interaction,
    viewport: Viewport,
    history: History,
    /// Whether the active drag already pushed its undo step.
    drag_recorded: bool,
    on_change: Option<OnChangeCallback>,
}

impl std::fmt::Debug for CanvasEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEngine")
            .field("document", &self.document)
            .field("interaction", &self.interaction)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasEngine {
    /// Create an engine with an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create an engine for a loaded document.
    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            interaction: Interaction::Idle,
            viewport: Viewport::default(),
            history: History::new(),
            drag_recorded: false,
            on_change: None,
        }
    }

    /// Set the change notification callback.
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: FnMut(&Document) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Replace the session's document, resetting interaction and history.
    pub fn load(&mut self, document: Document) {
        tracing::info!("Loading document with {} components", document.len());
        self.document = document;
        self.interaction = Interaction::Idle;
        self.drag_recorded = false;
        self.history.clear();
    }

    /// The current committed document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the current document, ending the session.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Current interaction state.
    #[must_use]
    pub const fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// The selected component, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<ComponentId> {
        self.interaction.selection()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging { .. })
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Switch the preview width. The document is unaffected.
    pub fn set_viewport_mode(&mut self, mode: ViewportMode) -> bool {
        self.viewport.set_mode(mode)
    }

    /// Components extending past the current preview width, in paint order.
    #[must_use]
    pub fn offscreen_components(&self) -> Vec<ComponentId> {
        self.document
            .iter()
            .filter(|c| self.viewport.overflows(&c.geometry))
            .map(|c| c.id)
            .collect()
    }

    /// Property inspector bound to the current selection.
    #[must_use]
    pub fn inspector(&self) -> Inspector<'_> {
        Inspector::bind(&self.document, self.selection())
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Process an input event.
    pub fn handle(&mut self, event: &InputEvent) -> EventOutcome {
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(*pointer),
            InputEvent::Key {
                key,
                pressed,
                modifiers,
            } => {
                if *pressed {
                    self.key_down(key, *modifiers)
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    /// Process a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventOutcome {
        match event {
            PointerEvent::Down { at, target } => self.pointer_down(at, target),
            PointerEvent::Move { at } => self.pointer_move(at),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(),
        }
    }

    /// Press at `at`, hit-testing the document for the target.
    pub fn press_at(&mut self, at: Point) -> EventOutcome {
        let target = self.document.component_at(at.x, at.y);
        self.pointer_down(at, target)
    }

    /// Pointer pressed, optionally on a component.
    pub fn pointer_down(&mut self, at: Point, target: Option<ComponentId>) -> EventOutcome {
        if self.is_dragging() {
            tracing::debug!("Pointer down during drag; ending previous drag");
            self.pointer_up();
        }

        let previous = self.selection();
        let hit = target.and_then(|id| {
            let component = self.document.get(id);
            if component.is_none() {
                tracing::warn!("Pointer down on unknown component {id}; treating as canvas");
            }
            component
        });

        match hit {
            Some(component) => {
                let offset = Point::new(at.x - component.geometry.x, at.y - component.geometry.y);
                let id = component.id;
                self.interaction = Interaction::Dragging { id, offset };
                self.drag_recorded = false;
                tracing::debug!("Drag started on {id}");
                EventOutcome::InteractionChanged
            }
            None => {
                self.interaction = Interaction::Idle;
                if previous.is_some() {
                    EventOutcome::InteractionChanged
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    /// Pointer moved; drags the active component if any.
    pub fn pointer_move(&mut self, at: Point) -> EventOutcome {
        let Interaction::Dragging { id, offset } = self.interaction else {
            return EventOutcome::Ignored;
        };
        let result = mutation::move_to(&self.document, id, at.x - offset.x, at.y - offset.y);
        let record = !self.drag_recorded;
        if self.commit(result, record).is_some() {
            self.drag_recorded = true;
            EventOutcome::DocumentChanged
        } else {
            EventOutcome::Ignored
        }
    }

    /// Pointer released (or left the canvas). Ends an active drag.
    pub fn pointer_up(&mut self) -> EventOutcome {
        match self.interaction {
            Interaction::Dragging { id, .. } => {
                self.interaction = Interaction::Selected { id };
                self.drag_recorded = false;
                tracing::debug!("Drag ended on {id}");
                EventOutcome::InteractionChanged
            }
            Interaction::Idle | Interaction::Selected { .. } => EventOutcome::Ignored,
        }
    }

    /// Key pressed. Ignored while dragging.
    pub fn key_down(&mut self, key: &str, modifiers: KeyModifiers) -> EventOutcome {
        if self.is_dragging() {
            return EventOutcome::Ignored;
        }
        let step = if modifiers.shift {
            NUDGE_STEP_LARGE
        } else {
            NUDGE_STEP
        };

        match key {
            "Escape" => self.clear_selection(),
            "Delete" | "Backspace" => self.delete_selected(),
            "ArrowLeft" => self.nudge_selected(-step, 0.0),
            "ArrowRight" => self.nudge_selected(step, 0.0),
            "ArrowUp" => self.nudge_selected(0.0, -step),
            "ArrowDown" => self.nudge_selected(0.0, step),
            "d" | "D" if modifiers.command() => self.duplicate_selected(),
            "z" | "Z" if modifiers.command() && modifiers.shift => self.redo(),
            "z" | "Z" if modifiers.command() => self.undo(),
            "y" | "Y" if modifiers.command() => self.redo(),
            _ => EventOutcome::Ignored,
        }
    }

    /// Deselect.
    pub fn clear_selection(&mut self) -> EventOutcome {
        if self.selection().is_none() {
            return EventOutcome::Ignored;
        }
        self.interaction = Interaction::Idle;
        EventOutcome::InteractionChanged
    }

    /// Select a component without starting a drag.
    pub fn select(&mut self, id: ComponentId) -> EventOutcome {
        if !self.document.contains(id) {
            self.drop_error(&MutationError::NotFound(id));
            return EventOutcome::Ignored;
        }
        self.interaction = Interaction::Selected { id };
        EventOutcome::InteractionChanged
    }

    /// Add a component from its template and select it.
    pub fn add_component(&mut self, kind: ComponentKind, at: Point) -> Option<ComponentId> {
        let m = mutation::add(&self.document, kind, at);
        let id = self.commit(Ok(m), true)?;
        self.interaction = Interaction::Selected { id };
        Some(id)
    }

    /// Add a component by kind name and select it.
    pub fn add_named(&mut self, kind: &str, at: Point) -> Option<ComponentId> {
        match kind.parse::<ComponentKind>() {
            Ok(kind) => self.add_component(kind, at),
            Err(err) => {
                self.drop_error(&err);
                None
            }
        }
    }

    /// Apply an arbitrary mutation.
    pub fn apply(&mut self, mutation: &Mutation) -> EventOutcome {
        if self.is_dragging() {
            tracing::debug!("Mutation during drag ends the drag");
            self.pointer_up();
        }
        let result = mutation.apply(&self.document);
        self.outcome(result)
    }

    /// Edit a property of the selected component.
    pub fn edit(&mut self, field: &Field, value: &str) -> EventOutcome {
        if self.is_dragging() {
            tracing::debug!("Property edit during drag ends the drag");
            self.pointer_up();
        }
        let Some(result) = self.inspector().edit(field, value) else {
            tracing::debug!("Edit of {field} with nothing selected");
            return EventOutcome::Ignored;
        };
        self.outcome(result)
    }

    /// Delete the selected component.
    pub fn delete_selected(&mut self) -> EventOutcome {
        let Some(id) = self.selection() else {
            return EventOutcome::Ignored;
        };
        let result = mutation::remove(&self.document, id);
        self.outcome(result)
    }

    /// Duplicate the selected component and select the clone.
    pub fn duplicate_selected(&mut self) -> EventOutcome {
        let Some(id) = self.selection() else {
            return EventOutcome::Ignored;
        };
        let result = mutation::duplicate(&self.document, id);
        match self.commit(result, true) {
            Some(clone) => {
                self.interaction = Interaction::Selected { id: clone };
                EventOutcome::DocumentChanged
            }
            None => EventOutcome::Ignored,
        }
    }

    /// Shift the selected component by `(dx, dy)`.
    pub fn nudge_selected(&mut self, dx: f32, dy: f32) -> EventOutcome {
        let Some(component) = self.selection().and_then(|id| self.document.get(id)) else {
            return EventOutcome::Ignored;
        };
        let g = component.geometry;
        let result = mutation::move_to(&self.document, component.id, g.x + dx, g.y + dy);
        self.outcome(result)
    }

    /// Restore the previous committed document.
    pub fn undo(&mut self) -> EventOutcome {
        match self.history.undo(&self.document) {
            Some(previous) => self.restore(previous),
            None => EventOutcome::Ignored,
        }
    }

    /// Re-apply an undone document.
    pub fn redo(&mut self) -> EventOutcome {
        match self.history.redo(&self.document) {
            Some(next) => self.restore(next),
            None => EventOutcome::Ignored,
        }
    }

    fn restore(&mut self, document: Document) -> EventOutcome {
        self.document = document;
        self.reconcile();
        self.notify();
        EventOutcome::DocumentChanged
    }

    fn outcome(&mut self, result: MutationResult<Mutated>) -> EventOutcome {
        if self.commit(result, true).is_some() {
            EventOutcome::DocumentChanged
        } else {
            EventOutcome::Ignored
        }
    }

    /// Store a successful mutation or log and drop a failed one.
    fn commit(&mut self, result: MutationResult<Mutated>, record: bool) -> Option<ComponentId> {
        match result {
            Ok(Mutated { document, id }) => {
                let before = std::mem::replace(&mut self.document, document);
                if record {
                    self.history.record(before);
                }
                self.reconcile();
                self.notify();
                Some(id)
            }
            Err(err) => {
                self.drop_error(&err);
                None
            }
        }
    }

    fn drop_error(&mut self, err: &MutationError) {
        match err {
            MutationError::UnknownKind(_) => tracing::error!("Dropped operation: {err}"),
            MutationError::NotFound(_)
            | MutationError::InvalidGeometry(_)
            | MutationError::InvalidStyleKey(_) => tracing::warn!("Dropped operation: {err}"),
        }
        self.reconcile();
    }

    /// Clear interaction state that points at a component no longer present.
    fn reconcile(&mut self) {
        if let Some(id) = self.selection() {
            if !self.document.contains(id) {
                tracing::debug!("Selection {id} no longer in document; clearing");
                self.interaction = Interaction::Idle;
                self.drag_recorded = false;
            }
        }
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.document);
        }
    }
}
