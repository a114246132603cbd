//! Preview width selection.
//!
//! The viewport mode only changes how wide the canvas is drawn. Component
//! coordinates are shared by every mode, so a narrow preview can show
//! components hanging past its right edge. That is reported, never fixed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Geometry;

/// Preview width preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    /// Desktop-width preview.
    #[default]
    Wide,
    /// Tablet-width preview.
    Medium,
    /// Phone-width preview.
    Narrow,
}

impl ViewportMode {
    /// Canvas display width in pixels.
    #[must_use]
    pub const fn display_width(self) -> f32 {
        match self {
            Self::Wide => 1280.0,
            Self::Medium => 768.0,
            Self::Narrow => 375.0,
        }
    }

    /// Lowercase mode name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Medium => "medium",
            Self::Narrow => "narrow",
        }
    }
}

impl std::fmt::Display for ViewportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wide" => Ok(Self::Wide),
            "medium" => Ok(Self::Medium),
            "narrow" => Ok(Self::Narrow),
            other => Err(format!("unknown viewport mode: {other}")),
        }
    }
}

/// Tracks the current preview mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    mode: ViewportMode,
}

impl Viewport {
    /// Create a viewport in the given mode.
    #[must_use]
    pub const fn new(mode: ViewportMode) -> Self {
        Self { mode }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Switch modes. Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: ViewportMode) -> bool {
        let changed = self.mode != mode;
        if changed {
            tracing::debug!("Viewport mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        changed
    }

    /// Canvas display width for the current mode.
    #[must_use]
    pub const fn canvas_width(&self) -> f32 {
        self.mode.display_width()
    }

    /// Whether a component extends beyond the visible canvas horizontally.
    #[must_use]
    pub fn overflows(&self, geometry: &Geometry) -> bool {
        geometry.x < 0.0 || geometry.right() > self.canvas_width()
    }
}
