//! Page components - the building blocks of documents.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MutationError, MutationResult};

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(Uuid);

impl ComponentId {
    /// Create a new unique component ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a component ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ComponentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The closed set of placeable component kinds.
///
/// A kind only selects the template applied at creation time. After that it
/// is descriptive and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// Top-of-page navigation bar.
    NavigationBar,
    /// Large headline block.
    HeroBlock,
    /// Bordered content card.
    Card,
    /// Call-to-action button.
    Button,
    /// Free text paragraph.
    Text,
    /// Image placeholder.
    Image,
    /// Bottom-of-page footer.
    Footer,
    /// Untyped layout section.
    GenericSection,
}

impl ComponentKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 8] = [
        Self::NavigationBar,
        Self::HeroBlock,
        Self::Card,
        Self::Button,
        Self::Text,
        Self::Image,
        Self::Footer,
        Self::GenericSection,
    ];

    /// Canonical kebab-case name, as used in documents and generated output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NavigationBar => "navigation-bar",
            Self::HeroBlock => "hero-block",
            Self::Card => "card",
            Self::Button => "button",
            Self::Text => "text",
            Self::Image => "image",
            Self::Footer => "footer",
            Self::GenericSection => "generic-section",
        }
    }

    /// Whether the kind displays its `content` as text.
    #[must_use]
    pub const fn is_text_bearing(self) -> bool {
        !matches!(self, Self::Image)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MutationError::UnknownKind(s.to_string()))
    }
}

/// A point in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Position and size in the document's single coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Geometry {
    /// Create a geometry from position and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The same size shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Smallest geometry covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Check if a point is within this geometry (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Check that a position can be placed.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::InvalidGeometry`] for non-finite coordinates.
    pub fn check_position(x: f32, y: f32) -> MutationResult<()> {
        if x.is_finite() && y.is_finite() {
            Ok(())
        } else {
            Err(MutationError::InvalidGeometry(format!(
                "position ({x}, {y}) is not finite"
            )))
        }
    }

    /// Check that a size can be rendered.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::InvalidGeometry`] unless both sizes are
    /// positive and finite.
    pub fn check_size(width: f32, height: f32) -> MutationResult<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(())
        } else {
            Err(MutationError::InvalidGeometry(format!(
                "size {width}x{height} must be positive"
            )))
        }
    }

    /// Check position and size together.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::InvalidGeometry`] if either check fails.
    pub fn validate(&self) -> MutationResult<()> {
        Self::check_position(self.x, self.y)?;
        Self::check_size(self.width, self.height)
    }
}

/// Check that a style key can be written as an inline property name.
///
/// Keys are non-empty and use only ASCII alphanumerics, `-` and `_`.
///
/// # Errors
///
/// Returns [`MutationError::InvalidStyleKey`] otherwise.
pub fn check_style_key(key: &str) -> MutationResult<()> {
    let well_formed = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if well_formed {
        Ok(())
    } else {
        Err(MutationError::InvalidStyleKey(key.to_string()))
    }
}

/// Open mapping of presentation attribute names to raw values.
///
/// A missing key means "platform default". Values are stored verbatim.
pub type Style = BTreeMap<String, String>;

/// A placeable page component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique identifier.
    pub id: ComponentId,
    /// Template the component was created from.
    pub kind: ComponentKind,
    /// Position and size.
    pub geometry: Geometry,
    /// Presentation attributes.
    #[serde(default)]
    pub style: Style,
    /// Text shown inside the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Component {
    /// Create a bare component of the given kind with a fresh ID.
    ///
    /// Use [`crate::template::instantiate`] to get the kind's defaults.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            id: ComponentId::new(),
            kind,
            geometry: Geometry::default(),
            style: Style::new(),
            content: None,
        }
    }

    /// Set the geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set one style entry.
    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Content, treating an empty string as absent.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Check if a point (in document coordinates) is within this component.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.geometry.contains_point(x, y)
    }

    /// Check the geometry and every style key.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::InvalidGeometry`] or
    /// [`MutationError::InvalidStyleKey`] for the first problem found.
    pub fn validate(&self) -> MutationResult<()> {
        self.geometry.validate()?;
        self.style.keys().try_for_each(|key| check_style_key(key))
    }
}
