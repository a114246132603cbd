//! # Pagecraft Core
//!
//! Visual page-builder logic for affiliate landing pages.
//! Compiles to WASM for the browser editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              pagecraft-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Model           │  Canvas Engine           │
//! │  - Components    │  - Selection / drag      │
//! │  - Templates     │  - Keyboard shortcuts    │
//! │  - Documents     │  - Undo / redo           │
//! ├─────────────────────────────────────────────┤
//! │  Mutations       │  Inspector   │  Codegen  │
//! │  - Pure, total   │  - Fields    │  - HTML   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Events flow into [`CanvasEngine`], which calls the [`mutation`] functions
//! and keeps the returned [`Document`] as the session's current state.
//! [`codegen::generate`] turns any document snapshot into page source.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codegen;
pub mod component;
pub mod document;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod inspector;
pub mod mutation;
pub mod template;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use codegen::{generate, generate_with, CodeGenerator, CodegenOptions};
pub use component::{Component, ComponentId, ComponentKind, Geometry, Point, Style};
pub use document::Document;
pub use engine::{CanvasEngine, EventOutcome, Interaction};
pub use error::{DocumentError, MutationError, MutationResult};
pub use event::{InputEvent, KeyModifiers, PointerEvent};
pub use history::History;
pub use inspector::{Field, Inspection, Inspector, PropertyField};
pub use mutation::{Mutated, Mutation};
pub use template::{instantiate, instantiate_named, Template};
pub use viewport::{Viewport, ViewportMode};

/// Pagecraft core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
