//! Creation-time defaults for each component kind.
//!
//! Templates are static records. They are consulted once, when a component is
//! instantiated, and never again: editing a template does not touch existing
//! components.

use crate::{Component, ComponentKind, Geometry, MutationResult};

/// Default geometry, style and content for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Kind this template creates.
    pub kind: ComponentKind,
    /// Default width in pixels.
    pub width: u16,
    /// Default height in pixels.
    pub height: u16,
    /// Default style entries.
    pub style: &'static [(&'static str, &'static str)],
    /// Default content, if the kind starts with text.
    pub content: Option<&'static str>,
    /// Body text emitted by the generator when content is empty.
    pub placeholder: &'static str,
}

static NAVIGATION_BAR: Template = Template {
    kind: ComponentKind::NavigationBar,
    width: 1200,
    height: 64,
    style: &[
        ("background-color", "#1f2937"),
        ("color", "#ffffff"),
        ("font-size", "18px"),
        ("padding", "16px"),
    ],
    content: Some("Brand"),
    placeholder: "Navigation",
};

static HERO_BLOCK: Template = Template {
    kind: ComponentKind::HeroBlock,
    width: 800,
    height: 320,
    style: &[
        ("background-color", "#f3f4f6"),
        ("color", "#111827"),
        ("font-size", "40px"),
        ("padding", "48px"),
    ],
    content: Some("Your Headline Here"),
    placeholder: "Hero",
};

static CARD: Template = Template {
    kind: ComponentKind::Card,
    width: 300,
    height: 200,
    style: &[
        ("background-color", "#ffffff"),
        ("border", "1px solid #e5e7eb"),
        ("border-radius", "8px"),
        ("padding", "16px"),
    ],
    content: Some("Card content"),
    placeholder: "Card",
};

static BUTTON: Template = Template {
    kind: ComponentKind::Button,
    width: 120,
    height: 40,
    style: &[
        ("background-color", "#3b82f6"),
        ("border-radius", "6px"),
        ("color", "#ffffff"),
        ("font-size", "16px"),
    ],
    content: Some("Click Me"),
    placeholder: "Button",
};

static TEXT: Template = Template {
    kind: ComponentKind::Text,
    width: 300,
    height: 50,
    style: &[("color", "#111827"), ("font-size", "16px")],
    content: Some("Edit this text"),
    placeholder: "Text",
};

static IMAGE: Template = Template {
    kind: ComponentKind::Image,
    width: 300,
    height: 200,
    style: &[("background-color", "#e5e7eb")],
    content: None,
    placeholder: "Image",
};

static FOOTER: Template = Template {
    kind: ComponentKind::Footer,
    width: 1200,
    height: 120,
    style: &[
        ("background-color", "#111827"),
        ("color", "#9ca3af"),
        ("padding", "24px"),
    ],
    content: Some("© Your Company"),
    placeholder: "Footer",
};

static GENERIC_SECTION: Template = Template {
    kind: ComponentKind::GenericSection,
    width: 800,
    height: 400,
    style: &[("background-color", "#ffffff"), ("padding", "32px")],
    content: None,
    placeholder: "Section",
};

/// Look up the template for a kind.
#[must_use]
pub fn template(kind: ComponentKind) -> &'static Template {
    match kind {
        ComponentKind::NavigationBar => &NAVIGATION_BAR,
        ComponentKind::HeroBlock => &HERO_BLOCK,
        ComponentKind::Card => &CARD,
        ComponentKind::Button => &BUTTON,
        ComponentKind::Text => &TEXT,
        ComponentKind::Image => &IMAGE,
        ComponentKind::Footer => &FOOTER,
        ComponentKind::GenericSection => &GENERIC_SECTION,
    }
}

impl Template {
    /// Default geometry at the origin.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry::new(0.0, 0.0, f32::from(self.width), f32::from(self.height))
    }

    /// Build a component from this template with a fresh ID.
    #[must_use]
    pub fn instantiate(&self) -> Component {
        let mut component = Component::new(self.kind).with_geometry(self.geometry());
        for (key, value) in self.style {
            component = component.with_style(*key, *value);
        }
        component.content = self.content.map(str::to_string);
        component
    }
}

/// Create a component of `kind` with the kind's defaults.
#[must_use]
pub fn instantiate(kind: ComponentKind) -> Component {
    template(kind).instantiate()
}

/// Create a component from a kind name such as `"hero-block"`.
///
/// # Errors
///
/// Returns [`crate::MutationError::UnknownKind`] if no template has that name.
pub fn instantiate_named(name: &str) -> MutationResult<Component> {
    let kind: ComponentKind = name.parse()?;
    Ok(instantiate(kind))
}
