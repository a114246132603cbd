//! Document to page source.
//!
//! Emits an HTML fragment that reproduces the canvas layout: a relatively
//! positioned container with one absolutely positioned element per
//! component. Elements appear in document order and no z-index is written,
//! so later components paint over earlier ones exactly as on the canvas.
//!
//! The output depends only on the document. Selection, drag state and the
//! viewport mode are never consulted.

use std::fmt::Write;

use crate::template::template;
use crate::{Component, ComponentKind, Document};

/// Class attribute of the page container.
pub const CONTAINER_CLASS: &str = "pagecraft-page";

/// Configuration for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Wrap the fragment in a complete HTML document.
    pub full_page: bool,
    /// `<title>` used when `full_page` is set.
    pub title: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            full_page: false,
            title: "Landing Page".to_string(),
        }
    }
}

/// Generates page source from documents.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    options: CodegenOptions,
}

impl CodeGenerator {
    /// Create a generator with the given options.
    #[must_use]
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    /// Create a generator with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(CodegenOptions::default())
    }

    /// Generator options.
    #[must_use]
    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Render `doc` to page source.
    #[must_use]
    pub fn generate(&self, doc: &Document) -> String {
        let mut out = String::with_capacity(256 + doc.len() * 256);

        if self.options.full_page {
            let title = escape_html(&self.options.title);
            let _ = write!(
                out,
                "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<title>{title}</title>\n</head>\n<body style=\"margin: 0;\">\n"
            );
        }

        // Components are placed from the document origin, so the container
        // must reach the furthest right/bottom edge.
        let (width, height) = doc.bounds().map_or((0.0, 0.0), |b| {
            (b.right().max(0.0), b.bottom().max(0.0))
        });
        let _ = writeln!(
            out,
            "<div class=\"{CONTAINER_CLASS}\" style=\"position: relative; width: {width}px; height: {height}px;\">"
        );
        for component in doc {
            render_component(&mut out, component);
        }
        out.push_str("</div>\n");

        if self.options.full_page {
            out.push_str("</body>\n</html>\n");
        }
        out
    }
}

/// Render `doc` with default options.
#[must_use]
pub fn generate(doc: &Document) -> String {
    CodeGenerator::with_defaults().generate(doc)
}

/// Render `doc` with the given options.
#[must_use]
pub fn generate_with(doc: &Document, options: &CodegenOptions) -> String {
    CodeGenerator::new(options.clone()).generate(doc)
}

/// HTML element used for a kind.
#[must_use]
pub const fn tag_for(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::NavigationBar => "nav",
        ComponentKind::HeroBlock | ComponentKind::GenericSection => "section",
        ComponentKind::Card => "div",
        ComponentKind::Button => "button",
        ComponentKind::Text => "p",
        ComponentKind::Image => "figure",
        ComponentKind::Footer => "footer",
    }
}

fn render_component(out: &mut String, component: &Component) {
    let tag = tag_for(component.kind);
    let g = &component.geometry;

    let mut style = format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; margin: 0; box-sizing: border-box;",
        g.x, g.y, g.width, g.height
    );
    for (key, value) in &component.style {
        let property = escape_html(&css_property(key));
        let _ = write!(style, " {property}: {};", escape_html(value));
    }

    let body = component
        .text()
        .unwrap_or_else(|| template(component.kind).placeholder);
    let body = escape_html(body);

    let _ = write!(
        out,
        "  <{tag} data-component-id=\"{}\" data-kind=\"{}\" style=\"{style}\">",
        component.id, component.kind
    );
    if component.kind.is_text_bearing() {
        out.push_str(&body);
    } else {
        let _ = write!(
            out,
            "<img alt=\"{body}\" style=\"width: 100%; height: 100%; object-fit: cover;\" />"
        );
    }
    let _ = writeln!(out, "</{tag}>");
}

/// `backgroundColor` and `background-color` both render as `background-color`.
fn css_property(key: &str) -> String {
    let mut property = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            property.push('-');
            property.push(c.to_ascii_lowercase());
        } else {
            property.push(c);
        }
    }
    property
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{self, Mutated};
    use crate::Point;

    fn build(steps: &[(ComponentKind, f32, f32)]) -> (Document, Vec<crate::ComponentId>) {
        let mut doc = Document::new();
        let mut ids = Vec::new();
        for (kind, x, y) in steps {
            let Mutated { document, id } = mutation::add(&doc, *kind, Point::new(*x, *y));
            doc = document;
            ids.push(id);
        }
        (doc, ids)
    }

    #[test]
    fn test_empty_document() {
        let out = generate(&Document::new());
        assert_eq!(
            out,
            "<div class=\"pagecraft-page\" style=\"position: relative; width: 0px; height: 0px;\">\n</div>\n"
        );
    }

    #[test]
    fn test_button_block() {
        let (doc, ids) = build(&[(ComponentKind::Button, 10.0, 10.0)]);
        let out = generate(&doc);
        assert!(out.contains(&format!("<button data-component-id=\"{}\"", ids[0])));
        assert!(out.contains("left: 10px; top: 10px; width: 120px; height: 40px;"));
        assert!(out.contains("background-color: #3b82f6;"));
        assert!(out.contains(">Click Me</button>"));
        assert!(out.contains("width: 130px; height: 50px;"), "container bounds");
    }

    #[test]
    fn test_placeholder_for_empty_content() {
        let (doc, ids) = build(&[(ComponentKind::Card, 0.0, 0.0)]);
        let doc = mutation::set_content(&doc, ids[0], "").expect("set").document;
        assert!(generate(&doc).contains(">Card</div>"));
    }

    #[test]
    fn test_image_renders_img_with_alt() {
        let (doc, ids) = build(&[(ComponentKind::Image, 0.0, 0.0)]);
        assert!(generate(&doc).contains("<img alt=\"Image\""));

        let doc = mutation::set_content(&doc, ids[0], "Blender 3000")
            .expect("set")
            .document;
        assert!(generate(&doc).contains("<img alt=\"Blender 3000\""));
    }

    #[test]
    fn test_content_and_style_are_escaped() {
        let (doc, ids) = build(&[(ComponentKind::Text, 0.0, 0.0)]);
        let doc = mutation::set_content(&doc, ids[0], "<b>50% off</b> & more")
            .expect("set")
            .document;
        let doc = mutation::set_style(&doc, ids[0], "font-family", "\"Inter\", sans-serif")
            .expect("style")
            .document;
        let out = generate(&doc);
        assert!(out.contains("&lt;b&gt;50% off&lt;/b&gt; &amp; more"));
        assert!(out.contains("font-family: &quot;Inter&quot;, sans-serif;"));
    }

    #[test]
    fn test_style_key_cannot_leave_attribute() {
        let (doc, _) = build(&[(ComponentKind::Text, 0.0, 0.0)]);
        let mut components = doc.into_components();
        components[0].style.insert("x\" onmouseover=\"alert(1)".to_string(), "red".to_string());
        let doc = Document::from_vec_unchecked(components);

        let out = generate(&doc);
        assert!(!out.contains("onmouseover=\"alert(1)"));
        assert!(out.contains("x&quot; onmouseover=&quot;alert(1): red;"));
    }

    #[test]
    fn test_camel_case_keys_render_kebab_case() {
        assert_eq!(css_property("backgroundColor"), "background-color");
        assert_eq!(css_property("border-radius"), "border-radius");
    }

    #[test]
    fn test_negative_positions_do_not_shrink_container_below_zero() {
        let (doc, _) = build(&[(ComponentKind::Button, -500.0, -500.0)]);
        assert!(generate(&doc).contains("width: 0px; height: 0px;\">"));
    }

    #[test]
    fn test_full_page_wrapper() {
        let (doc, _) = build(&[(ComponentKind::HeroBlock, 0.0, 0.0)]);
        let options = CodegenOptions {
            full_page: true,
            title: "Best Blenders 2026".to_string(),
        };
        let out = generate_with(&doc, &options);
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<title>Best Blenders 2026</title>"));
        assert!(out.trim_end().ends_with("</html>"));
        assert!(out.contains("<section data-component-id="));
    }

    #[test]
    fn test_output_follows_document_order() {
        let (doc, ids) = build(&[
            (ComponentKind::Card, 0.0, 0.0),
            (ComponentKind::Card, 5.0, 5.0),
        ]);
        let out = generate(&doc);
        let first = out.find(&ids[0].to_string()).expect("first block");
        let second = out.find(&ids[1].to_string()).expect("second block");
        assert!(first < second);

        let raised = mutation::bring_to_front(&doc, ids[0]).expect("raise").document;
        let out = generate(&raised);
        let first = out.find(&ids[0].to_string()).expect("first block");
        let second = out.find(&ids[1].to_string()).expect("second block");
        assert!(second < first);
    }
}
