//! Property inspector binding.
//!
//! Projects the selected component into a flat list of editable fields and
//! turns field edits back into mutations. With nothing selected, or with a
//! selection that no longer resolves, the inspector is simply empty.

use std::borrow::Cow;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::mutation::{self, Mutated};
use crate::{Component, ComponentId, ComponentKind, Document, MutationError, MutationResult};

/// Style keys always offered by the inspector, set or not.
pub const RECOGNIZED_STYLE_KEYS: [&str; 6] = [
    "background-color",
    "color",
    "font-size",
    "padding",
    "border-radius",
    "border",
];

/// One editable property of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Left edge.
    X,
    /// Top edge.
    Y,
    /// Width.
    Width,
    /// Height.
    Height,
    /// Text content.
    Content,
    /// A style entry.
    Style(String),
}

impl Field {
    /// Prefix that addresses a style entry whose key is also a field name.
    pub const STYLE_PREFIX: &'static str = "style.";

    /// Name used by hosts to address the field.
    ///
    /// Style keys named like a geometry or content field carry
    /// [`Self::STYLE_PREFIX`], so every name parses back to its field.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::X => Cow::Borrowed("x"),
            Self::Y => Cow::Borrowed("y"),
            Self::Width => Cow::Borrowed("width"),
            Self::Height => Cow::Borrowed("height"),
            Self::Content => Cow::Borrowed("content"),
            Self::Style(key) if Self::reserved(key).is_some() => {
                Cow::Owned(format!("{}{key}", Self::STYLE_PREFIX))
            }
            Self::Style(key) => Cow::Borrowed(key),
        }
    }

    fn reserved(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "width" => Some(Self::Width),
            "height" => Some(Self::Height),
            "content" => Some(Self::Content),
            _ => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Geometry names and `content` address those fields; any other name, or
/// any name behind [`Field::STYLE_PREFIX`], is a style key.
impl From<&str> for Field {
    fn from(name: &str) -> Self {
        if let Some(key) = name.strip_prefix(Self::STYLE_PREFIX) {
            return Self::Style(key.to_string());
        }
        Self::reserved(name).unwrap_or_else(|| Self::Style(name.to_string()))
    }
}

impl FromStr for Field {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// A field together with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyField {
    /// Host-facing name; passing it back to an edit addresses `field`.
    pub name: String,
    /// Which property.
    pub field: Field,
    /// Current value; `None` means unset (platform default).
    pub value: Option<String>,
}

impl PropertyField {
    fn new(field: Field, value: Option<String>) -> Self {
        Self {
            name: field.name().into_owned(),
            field,
            value,
        }
    }
}

/// Snapshot of the inspected component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Inspected component.
    pub id: ComponentId,
    /// Its kind.
    pub kind: ComponentKind,
    /// Editable fields in display order.
    pub fields: Vec<PropertyField>,
}

/// Binds a document snapshot to the current selection.
#[derive(Debug, Clone, Copy)]
pub struct Inspector<'a> {
    document: &'a Document,
    component: Option<&'a Component>,
}

impl<'a> Inspector<'a> {
    /// Resolve `selection` against `document`.
    #[must_use]
    pub fn bind(document: &'a Document, selection: Option<ComponentId>) -> Self {
        let component = selection.and_then(|id| {
            let found = document.get(id);
            if found.is_none() {
                tracing::debug!("Inspector selection {id} is stale; treating as empty");
            }
            found
        });
        Self {
            document,
            component,
        }
    }

    /// The bound component, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&'a Component> {
        self.component
    }

    /// Whether there is nothing to inspect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.component.is_none()
    }

    /// Editable fields of the bound component, or none.
    #[must_use]
    pub fn fields(&self) -> Vec<PropertyField> {
        let Some(c) = self.component else {
            return Vec::new();
        };
        let g = c.geometry;
        let mut fields = vec![
            PropertyField::new(Field::X, Some(g.x.to_string())),
            PropertyField::new(Field::Y, Some(g.y.to_string())),
            PropertyField::new(Field::Width, Some(g.width.to_string())),
            PropertyField::new(Field::Height, Some(g.height.to_string())),
            PropertyField::new(Field::Content, c.content.clone()),
        ];

        for key in RECOGNIZED_STYLE_KEYS {
            let value = c.style.get(key).cloned();
            fields.push(PropertyField::new(Field::Style(key.to_string()), value));
        }
        // Extra keys keep the style map's sorted order.
        for (key, value) in &c.style {
            if !RECOGNIZED_STYLE_KEYS.contains(&key.as_str()) {
                fields.push(PropertyField::new(
                    Field::Style(key.clone()),
                    Some(value.clone()),
                ));
            }
        }
        fields
    }

    /// Full snapshot of the bound component.
    #[must_use]
    pub fn inspect(&self) -> Option<Inspection> {
        let c = self.component?;
        Some(Inspection {
            id: c.id,
            kind: c.kind,
            fields: self.fields(),
        })
    }

    /// Apply an edit to the bound component. Returns `None` when nothing is bound.
    ///
    /// Geometry values accept an optional `px` suffix. An empty style value
    /// removes the key.
    #[must_use]
    pub fn edit(&self, field: &Field, value: &str) -> Option<MutationResult<Mutated>> {
        let c = self.component?;
        Some(self.apply(c, field, value))
    }

    fn apply(&self, c: &Component, field: &Field, value: &str) -> MutationResult<Mutated> {
        let doc = self.document;
        let g = c.geometry;
        match field {
            Field::X => mutation::move_to(doc, c.id, parse_length(field, value)?, g.y),
            Field::Y => mutation::move_to(doc, c.id, g.x, parse_length(field, value)?),
            Field::Width => mutation::resize(doc, c.id, parse_length(field, value)?, g.height),
            Field::Height => mutation::resize(doc, c.id, g.width, parse_length(field, value)?),
            Field::Content => mutation::set_content(doc, c.id, value),
            Field::Style(key) if value.trim().is_empty() => mutation::remove_style(doc, c.id, key),
            Field::Style(key) => mutation::set_style(doc, c.id, key, value),
        }
    }
}

fn parse_length(field: &Field, value: &str) -> MutationResult<f32> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    number.parse::<f32>().map_err(|_| {
        MutationError::InvalidGeometry(format!("{field} must be a number, got {value:?}"))
    })
}
