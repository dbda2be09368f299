//! Element factory seam
//!
//! Maps validated tag names to element kinds. Concrete per-tag element
//! behavior is an external collaborator; the document only needs the
//! kind tag back.

use crate::ElementKind;

/// Pure tag-name lookup consulted by `Document::create_element`.
///
/// Returning `None` means "no specialized type", never an error; the
/// document then falls back to an unknown element.
pub trait ElementFactory {
    fn create(&self, tag: &str) -> Option<ElementKind>;
}

/// Default factory recognizing the standard HTML tag set.
#[derive(Debug, Default)]
pub struct HtmlElementFactory;

impl HtmlElementFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElementFactory for HtmlElementFactory {
    fn create(&self, tag: &str) -> Option<ElementKind> {
        match tag {
            "html" => Some(ElementKind::Html),
            "head" => Some(ElementKind::Head),
            "body" => Some(ElementKind::Body),
            "a" | "abbr" | "article" | "aside" | "b" | "blockquote" | "br" | "button"
            | "canvas" | "code" | "dd" | "div" | "dl" | "dt" | "em" | "footer" | "form"
            | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "i" | "img"
            | "input" | "label" | "li" | "main" | "nav" | "ol" | "option" | "p" | "pre"
            | "s" | "script" | "section" | "select" | "small" | "span" | "strong"
            | "style" | "table" | "tbody" | "td" | "textarea" | "th" | "thead" | "title"
            | "tr" | "u" | "ul" => Some(ElementKind::Generic),
            _ => None,
        }
    }
}
