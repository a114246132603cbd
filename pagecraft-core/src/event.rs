//! Input events from the host UI surface.

use serde::{Deserialize, Serialize};

use crate::{ComponentId, Point};

/// A pointer (mouse or primary touch) event in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Button pressed.
    Down {
        /// Pointer position.
        at: Point,
        /// Component under the pointer, if the host hit-tested one.
        #[serde(default)]
        target: Option<ComponentId>,
    },
    /// Pointer moved.
    Move {
        /// Pointer position.
        at: Point,
    },
    /// Button released.
    Up,
    /// Pointer left the canvas surface.
    Leave,
}

impl PointerEvent {
    /// Press on empty canvas space.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::Down {
            at: Point::new(x, y),
            target: None,
        }
    }

    /// Press on a component.
    #[must_use]
    pub const fn down_on(x: f32, y: f32, target: ComponentId) -> Self {
        Self::Down {
            at: Point::new(x, y),
            target: Some(target),
        }
    }

    /// Move to a position.
    #[must_use]
    pub const fn move_to(x: f32, y: f32) -> Self {
        Self::Move {
            at: Point::new(x, y),
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    #[serde(default)]
    pub shift: bool,
    /// Control key pressed.
    #[serde(default)]
    pub ctrl: bool,
    /// Alt/Option key pressed.
    #[serde(default)]
    pub alt: bool,
    /// Meta/Command key pressed.
    #[serde(default)]
    pub meta: bool,
}

impl KeyModifiers {
    /// Control on most platforms, Command on macOS.
    #[must_use]
    pub const fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// All input events the canvas engine can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum InputEvent {
    /// Pointer event.
    Pointer(PointerEvent),

    /// Keyboard event.
    Key {
        /// Key name, as reported by the browser (`"Delete"`, `"d"`, `"ArrowLeft"`).
        key: String,
        /// Whether the key is pressed.
        #[serde(default = "default_pressed")]
        pressed: bool,
        /// Active modifier keys.
        #[serde(default)]
        modifiers: KeyModifiers,
    },
}

const fn default_pressed() -> bool {
    true
}

impl InputEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::key_with(key, KeyModifiers::default())
    }

    /// A key press with modifiers.
    #[must_use]
    pub fn key_with(key: impl Into<String>, modifiers: KeyModifiers) -> Self {
        Self::Key {
            key: key.into(),
            pressed: true,
            modifiers,
        }
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}
