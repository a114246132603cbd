//! Ordered component documents.
//!
//! Document order is paint order: later components are drawn over earlier
//! ones. A document is a value; every mutation produces a new one.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Component, ComponentId, DocumentError, Geometry};

/// Wire shape of a document before it is checked.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    components: Vec<Component>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDocument::deserialize(deserializer)?;
        Self::from_components(raw.components).map_err(serde::de::Error::custom)
    }
}

/// An ordered collection of components with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    components: Vec<Component>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from components in paint order.
    ///
    /// Every component must hold the invariants the mutations keep: finite
    /// position, positive finite size and well-formed style keys.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::DuplicateId`] if two components share an id
    /// and [`DocumentError::InvalidComponent`] if one breaks an invariant.
    pub fn from_components(components: Vec<Component>) -> Result<Self, DocumentError> {
        let mut seen = HashSet::with_capacity(components.len());
        for component in &components {
            if !seen.insert(component.id) {
                return Err(DocumentError::DuplicateId(component.id));
            }
            component
                .validate()
                .map_err(|source| DocumentError::InvalidComponent {
                    id: component.id,
                    source,
                })?;
        }
        Ok(Self { components })
    }

    /// Builds without checks; callers uphold the invariants.
    pub(crate) fn from_vec_unchecked(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Consume the document, yielding components in paint order.
    #[must_use]
    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    /// Components in paint order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Components as a slice in paint order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Get a component by ID.
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Position of a component in paint order.
    #[must_use]
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id == id)
    }

    /// Check whether a component is present.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.index_of(id).is_some()
    }

    /// Component ids in paint order.
    #[must_use]
    pub fn ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(|c| c.id).collect()
    }

    /// Get the number of components in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Find the topmost component at the given document coordinates.
    #[must_use]
    pub fn component_at(&self, x: f32, y: f32) -> Option<ComponentId> {
        self.components
            .iter()
            .rev()
            .find(|c| c.contains_point(x, y))
            .map(|c| c.id)
    }

    /// Union of all component geometries, or `None` for an empty document.
    #[must_use]
    pub fn bounds(&self) -> Option<Geometry> {
        let mut iter = self.components.iter().map(|c| c.geometry);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, g| acc.union(&g)))
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, contains duplicate ids or
    /// holds a component that breaks an invariant.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let document = Self::from_components(raw.components)?;
        tracing::info!("Loaded document with {} components", document.len());
        Ok(document)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
