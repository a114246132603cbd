//! Pure document mutations.
//!
//! Every function borrows the current [`Document`] and returns a new one
//! together with the id of the affected component. The input is never
//! touched, so a failed call leaves the caller's state exactly as it was.
//!
//! Only [`bring_to_front`], [`send_to_back`], [`add`], [`duplicate`] and
//! [`remove`] change the paint order; all other mutations keep it.

use serde::{Deserialize, Serialize};

use crate::component::check_style_key;
use crate::{
    template, Component, ComponentId, ComponentKind, Document, Geometry, MutationError,
    MutationResult, Point,
};

/// Offset applied to both axes of a duplicated component.
pub const DUPLICATE_OFFSET: f32 = 20.0;

/// Outcome of a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutated {
    /// The new document.
    pub document: Document,
    /// The component the mutation affected.
    pub id: ComponentId,
}

impl Mutated {
    fn new(components: Vec<Component>, id: ComponentId) -> Self {
        Self {
            document: Document::from_vec_unchecked(components),
            id,
        }
    }
}

/// Clone the document's components and edit the one with `id` in place.
fn edit_component<F>(doc: &Document, id: ComponentId, edit: F) -> MutationResult<Mutated>
where
    F: FnOnce(&mut Component),
{
    let index = doc.index_of(id).ok_or(MutationError::NotFound(id))?;
    let mut components = doc.components().to_vec();
    edit(&mut components[index]);
    Ok(Mutated::new(components, id))
}

/// Instantiate `kind` at `position` and paint it above everything else.
///
/// A non-finite coordinate is placed at 0.
#[must_use]
pub fn add(doc: &Document, kind: ComponentKind, position: Point) -> Mutated {
    let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
    if Geometry::check_position(position.x, position.y).is_err() {
        tracing::warn!(
            "Non-finite drop position ({}, {}) for {kind}; using 0",
            position.x,
            position.y
        );
    }
    let mut component = template::instantiate(kind);
    component.geometry.x = finite_or_zero(position.x);
    component.geometry.y = finite_or_zero(position.y);
    let id = component.id;

    let mut components = doc.components().to_vec();
    components.push(component);
    tracing::debug!("Added {kind} component {id}");
    Mutated::new(components, id)
}

/// Add a component by kind name.
///
/// # Errors
///
/// Returns [`MutationError::UnknownKind`] if `kind` names no template.
pub fn add_named(doc: &Document, kind: &str, position: Point) -> MutationResult<Mutated> {
    let kind: ComponentKind = kind.parse()?;
    Ok(add(doc, kind, position))
}

/// Move a component's top-left corner. Positions are not clamped.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent and
/// [`MutationError::InvalidGeometry`] for non-finite coordinates.
pub fn move_to(doc: &Document, id: ComponentId, x: f32, y: f32) -> MutationResult<Mutated> {
    Geometry::check_position(x, y)?;
    edit_component(doc, id, |c| {
        c.geometry.x = x;
        c.geometry.y = y;
    })
}

/// Change a component's size.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent and
/// [`MutationError::InvalidGeometry`] unless both sizes are positive and finite.
pub fn resize(doc: &Document, id: ComponentId, width: f32, height: f32) -> MutationResult<Mutated> {
    Geometry::check_size(width, height)?;
    edit_component(doc, id, |c| {
        c.geometry.width = width;
        c.geometry.height = height;
    })
}

/// Insert or overwrite one style entry. The value is stored verbatim.
///
/// # Errors
///
/// Returns [`MutationError::InvalidStyleKey`] for keys that are empty or
/// contain characters other than ASCII alphanumerics, `-` and `_`, and
/// [`MutationError::NotFound`] if `id` is absent.
pub fn set_style(
    doc: &Document,
    id: ComponentId,
    key: &str,
    value: &str,
) -> MutationResult<Mutated> {
    check_style_key(key)?;
    edit_component(doc, id, |c| {
        c.style.insert(key.to_string(), value.to_string());
    })
}

/// Drop a style entry so the platform default applies again.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent.
pub fn remove_style(doc: &Document, id: ComponentId, key: &str) -> MutationResult<Mutated> {
    edit_component(doc, id, |c| {
        c.style.remove(key);
    })
}

/// Replace a component's content. Allowed for every kind.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent.
pub fn set_content(doc: &Document, id: ComponentId, text: &str) -> MutationResult<Mutated> {
    edit_component(doc, id, |c| {
        c.content = Some(text.to_string());
    })
}

/// Clone a component under a new id, offset by [`DUPLICATE_OFFSET`], on top.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent.
pub fn duplicate(doc: &Document, id: ComponentId) -> MutationResult<Mutated> {
    let original = doc.get(id).ok_or(MutationError::NotFound(id))?;
    let clone = Component {
        id: ComponentId::new(),
        geometry: original
            .geometry
            .translated(DUPLICATE_OFFSET, DUPLICATE_OFFSET),
        ..original.clone()
    };
    let clone_id = clone.id;

    let mut components = doc.components().to_vec();
    components.push(clone);
    tracing::debug!("Duplicated component {id} as {clone_id}");
    Ok(Mutated::new(components, clone_id))
}

/// Delete a component. The document may become empty.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent.
pub fn remove(doc: &Document, id: ComponentId) -> MutationResult<Mutated> {
    let index = doc.index_of(id).ok_or(MutationError::NotFound(id))?;
    let mut components = doc.components().to_vec();
    components.remove(index);
    tracing::debug!("Removed component {id}");
    Ok(Mutated::new(components, id))
}

/// Move a component to the end of the paint order.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent.
pub fn bring_to_front(doc: &Document, id: ComponentId) -> MutationResult<Mutated> {
    let index = doc.index_of(id).ok_or(MutationError::NotFound(id))?;
    let mut components = doc.components().to_vec();
    let component = components.remove(index);
    components.push(component);
    Ok(Mutated::new(components, id))
}

/// Move a component to the start of the paint order.
///
/// # Errors
///
/// Returns [`MutationError::NotFound`] if `id` is absent.
pub fn send_to_back(doc: &Document, id: ComponentId) -> MutationResult<Mutated> {
    let index = doc.index_of(id).ok_or(MutationError::NotFound(id))?;
    let mut components = doc.components().to_vec();
    let component = components.remove(index);
    components.insert(0, component);
    Ok(Mutated::new(components, id))
}

/// One mutation described as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// See [`add`].
    Add {
        /// Template to instantiate.
        kind: ComponentKind,
        /// Top-left corner.
        position: Point,
    },
    /// See [`move_to`].
    Move {
        /// Target component.
        id: ComponentId,
        /// New X position.
        x: f32,
        /// New Y position.
        y: f32,
    },
    /// See [`resize`].
    Resize {
        /// Target component.
        id: ComponentId,
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
    /// See [`set_style`].
    SetStyle {
        /// Target component.
        id: ComponentId,
        /// Attribute name.
        key: String,
        /// Raw attribute value.
        value: String,
    },
    /// See [`remove_style`].
    RemoveStyle {
        /// Target component.
        id: ComponentId,
        /// Attribute name.
        key: String,
    },
    /// See [`set_content`].
    SetContent {
        /// Target component.
        id: ComponentId,
        /// New content.
        text: String,
    },
    /// See [`duplicate`].
    Duplicate {
        /// Component to clone.
        id: ComponentId,
    },
    /// See [`remove`].
    Remove {
        /// Component to delete.
        id: ComponentId,
    },
    /// See [`bring_to_front`].
    BringToFront {
        /// Component to raise.
        id: ComponentId,
    },
    /// See [`send_to_back`].
    SendToBack {
        /// Component to lower.
        id: ComponentId,
    },
}

impl Mutation {
    /// Apply this mutation to `doc`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying mutation function returns.
    pub fn apply(&self, doc: &Document) -> MutationResult<Mutated> {
        match self {
            Self::Add { kind, position } => Ok(add(doc, *kind, *position)),
            Self::Move { id, x, y } => move_to(doc, *id, *x, *y),
            Self::Resize { id, width, height } => resize(doc, *id, *width, *height),
            Self::SetStyle { id, key, value } => set_style(doc, *id, key, value),
            Self::RemoveStyle { id, key } => remove_style(doc, *id, key),
            Self::SetContent { id, text } => set_content(doc, *id, text),
            Self::Duplicate { id } => duplicate(doc, *id),
            Self::Remove { id } => remove(doc, *id),
            Self::BringToFront { id } => bring_to_front(doc, *id),
            Self::SendToBack { id } => send_to_back(doc, *id),
        }
    }

    /// The existing component this mutation targets, if any.
    #[must_use]
    pub const fn target(&self) -> Option<ComponentId> {
        match self {
            Self::Add { .. } => None,
            Self::Move { id, .. }
            | Self::Resize { id, .. }
            | Self::SetStyle { id, .. }
            | Self::RemoveStyle { id, .. }
            | Self::SetContent { id, .. }
            | Self::Duplicate { id }
            | Self::Remove { id }
            | Self::BringToFront { id }
            | Self::SendToBack { id } => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Geometry;

    fn doc_with(kinds: &[ComponentKind]) -> (Document, Vec<ComponentId>) {
        let mut doc = Document::new();
        let mut ids = Vec::new();
        for (i, kind) in kinds.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f32 * 10.0;
            let m = add(&doc, *kind, Point::new(offset, offset));
            ids.push(m.id);
            doc = m.document;
        }
        (doc, ids)
    }

    #[test]
    fn test_add_appends_on_top() {
        let (doc, ids) = doc_with(&[ComponentKind::HeroBlock, ComponentKind::Button]);
        assert_eq!(doc.ids(), ids);

        let m = add(&doc, ComponentKind::Text, Point::new(5.0, 5.0));
        assert_eq!(doc.len(), 2, "input untouched");
        assert_eq!(m.document.len(), 3);
        assert_eq!(m.document.index_of(m.id), Some(2));
    }

    #[test]
    fn test_add_non_finite_position_lands_at_origin() {
        let m = add(&Document::new(), ComponentKind::Button, Point::new(f32::NAN, 10.0));
        let g = m.document.get(m.id).expect("added").geometry;
        assert!(g.x.abs() < f32::EPSILON);
        assert!((g.y - 10.0).abs() < f32::EPSILON);

        let m = add(
            &m.document,
            ComponentKind::Card,
            Point::new(f32::NEG_INFINITY, f32::INFINITY),
        );
        let g = m.document.get(m.id).expect("added").geometry;
        assert!(g.validate().is_ok());

        let json = m.document.to_json().expect("serialize");
        assert_eq!(Document::from_json(&json).expect("reload"), m.document);
    }

    #[test]
    fn test_add_named_unknown_kind() {
        let err = add_named(&Document::new(), "slider", Point::default()).unwrap_err();
        assert_eq!(err, MutationError::UnknownKind("slider".to_string()));
    }

    #[test]
    fn test_move_is_unclamped() {
        let (doc, ids) = doc_with(&[ComponentKind::Card]);
        let m = move_to(&doc, ids[0], -500.0, 10_000.0).expect("move");
        let g = m.document.get(ids[0]).expect("present").geometry;
        assert_eq!((g.x, g.y), (-500.0, 10_000.0));
        assert_eq!((g.width, g.height), (300.0, 200.0));
    }

    #[test]
    fn test_move_rejects_non_finite() {
        let (doc, ids) = doc_with(&[ComponentKind::Card]);
        let err = move_to(&doc, ids[0], f32::NAN, 0.0).unwrap_err();
        assert!(matches!(err, MutationError::InvalidGeometry(_)));
    }

    #[test]
    fn test_resize_rejects_non_positive() {
        let (doc, ids) = doc_with(&[ComponentKind::Button]);
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f32::INFINITY, 10.0)] {
            let err = resize(&doc, ids[0], w, h).unwrap_err();
            assert!(matches!(err, MutationError::InvalidGeometry(_)));
        }
        let m = resize(&doc, ids[0], 200.0, 60.0).expect("resize");
        assert_eq!(
            m.document.get(ids[0]).expect("present").geometry,
            Geometry::new(0.0, 0.0, 200.0, 60.0)
        );
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let (doc, _) = doc_with(&[ComponentKind::Text]);
        let missing = ComponentId::new();
        assert_eq!(
            move_to(&doc, missing, 0.0, 0.0).unwrap_err(),
            MutationError::NotFound(missing)
        );
        assert!(set_content(&doc, missing, "x").is_err());
        assert!(duplicate(&doc, missing).is_err());
        assert!(remove(&doc, missing).is_err());
        assert!(bring_to_front(&doc, missing).is_err());
    }

    #[test]
    fn test_set_style_stores_value_verbatim() {
        let (doc, ids) = doc_with(&[ComponentKind::Text]);
        let m = set_style(&doc, ids[0], "color", "not-a-color!!").expect("set style");
        let style = &m.document.get(ids[0]).expect("present").style;
        assert_eq!(style.get("color").map(String::as_str), Some("not-a-color!!"));
    }

    #[test]
    fn test_set_style_rejects_malformed_key() {
        let (doc, ids) = doc_with(&[ComponentKind::Text]);
        for key in ["", "color\"", "a b", "x;y"] {
            let err = set_style(&doc, ids[0], key, "red").unwrap_err();
            assert!(matches!(err, MutationError::InvalidStyleKey(_)));
        }
    }

    #[test]
    fn test_remove_style() {
        let (doc, ids) = doc_with(&[ComponentKind::Button]);
        let m = remove_style(&doc, ids[0], "background-color").expect("remove style");
        let style = &m.document.get(ids[0]).expect("present").style;
        assert!(!style.contains_key("background-color"));

        let again = remove_style(&m.document, ids[0], "background-color").expect("no-op");
        assert_eq!(again.document, m.document);
    }

    #[test]
    fn test_set_content_on_image() {
        let (doc, ids) = doc_with(&[ComponentKind::Image]);
        let m = set_content(&doc, ids[0], "Product shot").expect("set content");
        assert_eq!(
            m.document.get(ids[0]).expect("present").content.as_deref(),
            Some("Product shot")
        );
    }

    #[test]
    fn test_duplicate_offsets_and_appends() {
        let (doc, ids) = doc_with(&[ComponentKind::Card, ComponentKind::Text]);
        let m = duplicate(&doc, ids[0]).expect("duplicate");
        assert_ne!(m.id, ids[0]);
        assert_eq!(m.document.index_of(m.id), Some(2));

        let original = m.document.get(ids[0]).expect("original");
        let clone = m.document.get(m.id).expect("clone");
        assert_eq!(clone.style, original.style);
        assert_eq!(clone.content, original.content);
        assert_eq!(clone.kind, original.kind);
        assert_eq!(
            clone.geometry,
            original.geometry.translated(DUPLICATE_OFFSET, DUPLICATE_OFFSET)
        );
    }

    #[test]
    fn test_remove_to_empty() {
        let (doc, ids) = doc_with(&[ComponentKind::Footer]);
        let m = remove(&doc, ids[0]).expect("remove");
        assert!(m.document.is_empty());
        assert_eq!(m.id, ids[0]);
        assert!(remove(&m.document, ids[0]).is_err(), "double delete");
    }

    #[test]
    fn test_reordering() {
        let (doc, ids) = doc_with(&[
            ComponentKind::Card,
            ComponentKind::Button,
            ComponentKind::Text,
        ]);
        let front = bring_to_front(&doc, ids[0]).expect("front");
        assert_eq!(front.document.ids(), vec![ids[1], ids[2], ids[0]]);

        let back = send_to_back(&doc, ids[2]).expect("back");
        assert_eq!(back.document.ids(), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_mutation_enum_from_json() {
        let (doc, ids) = doc_with(&[ComponentKind::Text]);
        let json = format!(r#"{{"op":"set_content","id":"{}","text":"Hello"}}"#, ids[0]);
        let mutation: Mutation = serde_json::from_str(&json).expect("parse mutation");
        assert_eq!(mutation.target(), Some(ids[0]));

        let m = mutation.apply(&doc).expect("apply");
        assert_eq!(
            m.document.get(ids[0]).expect("present").content.as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn test_mutation_add_from_json() {
        let json = r#"{"op":"add","kind":"hero-block","position":{"x":0,"y":64}}"#;
        let mutation: Mutation = serde_json::from_str(json).expect("parse mutation");
        assert_eq!(mutation.target(), None);
        let m = mutation.apply(&Document::new()).expect("apply");
        assert_eq!(m.document.get(m.id).expect("added").kind, ComponentKind::HeroBlock);
    }
}
