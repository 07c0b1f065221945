//! Markup builder
//!
//! Tags and class names are fixed by the section templates; every piece of
//! dictionary text goes through [`Markup::text`] and is escaped.

use crate::utils::helpers::{escape_html, push_escaped};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tag, optionally with a class
    pub fn open(&mut self, tag: &str, class: Option<&str>) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        if let Some(class) = class {
            self.buf.push_str(" class=\"");
            self.buf.push_str(&escape_html(class));
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Escaped text
    pub fn text(&mut self, text: &str) -> &mut Self {
        push_escaped(&mut self.buf, text);
        self
    }

    /// A single space between inline parts
    pub fn space(&mut self) -> &mut Self {
        self.buf.push(' ');
        self
    }

    /// `<tag class="..">text</tag>`
    pub fn element(&mut self, tag: &str, class: Option<&str>, text: &str) -> &mut Self {
        self.open(tag, class).text(text).close(tag)
    }

    /// `<tag class=".."></tag>`
    pub fn empty(&mut self, tag: &str, class: Option<&str>) -> &mut Self {
        self.open(tag, class).close(tag)
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_escaped_elements() {
        let mut markup = Markup::new();
        markup
            .open("p", Some("project-tech"))
            .element("span", None, "Tech:")
            .space()
            .text("C++ & <Rust>")
            .close("p");

        assert_eq!(
            markup.as_str(),
            r#"<p class="project-tech"><span>Tech:</span> C++ &amp; &lt;Rust&gt;</p>"#
        );
    }

    #[test]
    fn test_empty_element() {
        let mut markup = Markup::new();
        markup.empty("div", Some("cert-timeline-dot"));
        assert_eq!(markup.into_string(), r#"<div class="cert-timeline-dot"></div>"#);
    }
}
