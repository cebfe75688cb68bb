//! Minimal SVG document tree with deterministic serialization.

use std::fmt::{self, Display, Write as _};
use std::hash::Hasher;
use twox_hash::XxHash64;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const VIEW_BOX: &str = "0 0 100 100";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<SvgElement>,
    text: Option<String>,
}

impl SvgElement {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Set an attribute. Attributes serialize in insertion order.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn child_elements(&self) -> &[Self] {
        &self.children
    }

    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            let _ = write!(out, " {key}=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            escape_into(text, false, out);
        }
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

fn escape_into(raw: &str, attribute: bool, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

/// A 100x100 SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    elements: Vec<SvgElement>,
}

impl SvgDocument {
    #[must_use]
    pub fn new(elements: impl IntoIterator<Item = SvgElement>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Total number of elements below the root.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.iter().map(SvgElement::count).sum()
    }

    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(256);
        let _ = write!(
            out,
            "<svg xmlns=\"{SVG_NAMESPACE}\" viewBox=\"{VIEW_BOX}\">"
        );
        for element in &self.elements {
            element.write_markup(&mut out);
        }
        out.push_str("</svg>");
        out
    }

    /// Stable xxhash64 of the markup; suitable as a cache key.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(self.to_markup().as_bytes());
        hasher.finish()
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}
