//! Static HTML page document
//!
//! Elements are located with a regex tag scanner. Opening and closing tags
//! of the same name are paired with a stack; void elements and self-closing
//! tags never open a scope, and the contents of raw text elements such as
//! `<script>` are not scanned. Elements whose closing tag is implied rather
//! than written have no replaceable content.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::PageConfig;
use crate::utils::helpers::escape_html;
use super::Document;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements whose end tag may be left out
const OPTIONAL_END_ELEMENTS: &[&str] = &[
    "li", "p", "dt", "dd", "option", "optgroup", "tr", "td", "th", "thead", "tbody", "tfoot",
];

/// Start tags that end an open `<p>`
const PARAGRAPH_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main",
    "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Whether the start tag `next` ends an open `open` element without an end tag
fn implicitly_closed_by(open: &str, next: &str) -> bool {
    match open {
        "li" => next == "li",
        "dt" | "dd" => matches!(next, "dt" | "dd"),
        "option" => matches!(next, "option" | "optgroup"),
        "optgroup" => next == "optgroup",
        "td" | "th" => matches!(next, "td" | "th" | "tr" | "tbody" | "tfoot"),
        "tr" => matches!(next, "tr" | "tbody" | "tfoot"),
        "thead" | "tbody" => matches!(next, "tbody" | "tfoot"),
        "p" => PARAGRAPH_CLOSERS.contains(&next),
        _ => false,
    }
}

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
            .expect("tag pattern is valid")
    })
}

fn attribute_pattern() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(r#"([^\s=/"'<>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("attribute pattern is valid")
    })
}

/// One element located in the page source
#[derive(Debug, Clone)]
struct Element {
    /// Lowercased tag name
    name: String,
    /// Tag name as written
    tag_name: Range<usize>,
    open: Range<usize>,
    attrs: Range<usize>,
    close: Option<Range<usize>>,
}

impl Element {
    /// Byte range between the opening and closing tags
    fn content(&self) -> Option<Range<usize>> {
        self.close.as_ref().map(|close| self.open.end..close.start)
    }

    /// Attribute value; bare attributes yield `""`
    fn attr<'s>(&self, source: &'s str, name: &str) -> Option<&'s str> {
        attributes(&source[self.attrs.clone()])
            .into_iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.unwrap_or(""))
    }

    fn within(&self, range: &Range<usize>) -> bool {
        self.open.start >= range.start && self.open.end <= range.end
    }
}

struct Attribute<'a> {
    name: &'a str,
    value: Option<&'a str>,
    raw: &'a str,
}

fn attributes(text: &str) -> Vec<Attribute<'_>> {
    attribute_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let raw = caps.get(0)?.as_str();
            let name = caps.get(1)?.as_str();
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)).map(|m| m.as_str());
            Some(Attribute { name, value, raw })
        })
        .collect()
}

/// Locate every element of the page in document order
fn parse_elements(source: &str) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut raw_text: Option<String> = None;

    for caps in tag_pattern().captures_iter(source) {
        let (Some(whole), Some(tag_name)) = (caps.get(0), caps.get(2)) else {
            // comment
            continue;
        };
        let name = tag_name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).map_or(false, |m| !m.as_str().is_empty());

        if let Some(raw) = &raw_text {
            if !(closing && *raw == name) {
                continue;
            }
            raw_text = None;
        }

        if closing {
            if let Some(pos) = open.iter().rposition(|&i| elements[i].name == name) {
                elements[open[pos]].close = Some(whole.range());
                close_implied(&mut elements, &open[pos + 1..], whole.start());
                open.truncate(pos);
            }
            continue;
        }

        while let Some(&top) = open.last() {
            if !implicitly_closed_by(&elements[top].name, &name) {
                break;
            }
            elements[top].close = Some(whole.start()..whole.start());
            open.pop();
        }

        let attrs = caps.get(3).map_or(whole.end()..whole.end(), |m| m.range());
        let self_closing = source[attrs.clone()].trim_end().ends_with('/');
        let opens_scope = !self_closing && !VOID_ELEMENTS.contains(&name.as_str());
        if opens_scope && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            raw_text = Some(name.clone());
        }

        elements.push(Element {
            name,
            tag_name: tag_name.range(),
            open: whole.range(),
            attrs,
            close: None,
        });
        if opens_scope {
            open.push(elements.len() - 1);
        }
    }

    close_implied(&mut elements, &open, source.len());
    elements
}

/// End the still-open elements whose end tag is optional at `at`
fn close_implied(elements: &mut [Element], open: &[usize], at: usize) {
    for &i in open {
        if OPTIONAL_END_ELEMENTS.contains(&elements[i].name.as_str()) {
            elements[i].close = Some(at..at);
        }
    }
}

/// Change to one attribute of an opening tag
enum AttributeEdit<'a> {
    Remove,
    Flag,
    Value(&'a str),
}

/// Rebuild an opening tag with one attribute changed
fn rewrite_open_tag(source: &str, element: &Element, name: &str, edit: AttributeEdit<'_>) -> String {
    let attrs_text = &source[element.attrs.clone()];
    let self_closing = attrs_text.trim_end().ends_with('/');

    let mut tag = format!("<{}", &source[element.tag_name.clone()]);
    for attr in attributes(attrs_text).iter().filter(|a| !a.name.eq_ignore_ascii_case(name)) {
        tag.push(' ');
        tag.push_str(attr.raw);
    }
    match edit {
        AttributeEdit::Remove => {}
        AttributeEdit::Flag => {
            tag.push(' ');
            tag.push_str(name);
        }
        AttributeEdit::Value(value) => {
            tag.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
    }
    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

/// Apply non-overlapping edits, sorted by start, back to front
fn apply_edits(source: &mut String, edits: Vec<(Range<usize>, String)>) {
    for (range, replacement) in edits.into_iter().rev() {
        source.replace_range(range, &replacement);
    }
}

/// Document backed by static HTML source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    source: String,
    translation_attribute: String,
    language_control_id: String,
}

impl HtmlDocument {
    pub fn new(source: impl Into<String>, page: &PageConfig) -> Self {
        Self {
            source: source.into(),
            translation_attribute: page.translation_attribute.clone(),
            language_control_id: page.language_control_id.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_html(self) -> String {
        self.source
    }

    /// Inner markup of the first element with this id
    pub fn element_content(&self, id: &str) -> Option<&str> {
        let elements = parse_elements(&self.source);
        let range = self.find_by_id(&elements, id)?.content()?;
        Some(&self.source[range])
    }

    /// Translation keys in document order
    pub fn translation_keys(&self) -> Vec<String> {
        parse_elements(&self.source)
            .iter()
            .filter_map(|e| e.attr(&self.source, &self.translation_attribute))
            .map(str::to_string)
            .collect()
    }

    fn find_by_id<'e>(&self, elements: &'e [Element], id: &str) -> Option<&'e Element> {
        elements.iter().find(|e| e.attr(&self.source, "id") == Some(id))
    }

    fn select_option(&mut self, elements: &[Element], select: &Element, language: &str) {
        let Some(content) = select.content() else { return };
        let source = &self.source;

        let mut chosen = false;
        let mut edits = Vec::new();
        for option in elements.iter().filter(|e| e.name == "option" && e.within(&content)) {
            let value = match option.attr(source, "value") {
                Some(value) => value.to_string(),
                None => option.content().map(|r| source[r].trim().to_string()).unwrap_or_default(),
            };
            let selected = !chosen && value == language;
            chosen |= selected;

            if option.attr(source, "selected").is_some() != selected {
                let edit = if selected { AttributeEdit::Flag } else { AttributeEdit::Remove };
                edits.push((option.open.clone(), rewrite_open_tag(source, option, "selected", edit)));
            }
        }

        apply_edits(&mut self.source, edits);
    }
}

impl Document for HtmlDocument {
    fn for_each_target(&mut self, resolve: &mut dyn FnMut(&str) -> Option<String>) -> usize {
        let elements = parse_elements(&self.source);
        let mut resolved = 0;
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();

        for element in &elements {
            let Some(key) = element.attr(&self.source, &self.translation_attribute) else { continue };
            // void or unterminated elements have no text to replace
            let Some(content) = element.content() else { continue };
            // an outer target overwrites whatever it contains
            if edits.last().map_or(false, |(kept, _)| content.start < kept.end) {
                continue;
            }
            let Some(text) = resolve(key) else { continue };

            resolved += 1;
            edits.push((content, escape_html(&text)));
        }

        apply_edits(&mut self.source, edits);
        resolved
    }

    fn has_container(&self, id: &str) -> bool {
        let elements = parse_elements(&self.source);
        self.find_by_id(&elements, id).and_then(Element::content).is_some()
    }

    fn replace_container(&mut self, id: &str, markup: &str) -> bool {
        let elements = parse_elements(&self.source);
        match self.find_by_id(&elements, id).and_then(Element::content) {
            Some(content) => {
                self.source.replace_range(content, markup);
                true
            }
            None => false,
        }
    }

    fn set_language_control(&mut self, language: &str) {
        let elements = parse_elements(&self.source);
        let Some(control) = self.find_by_id(&elements, &self.language_control_id).cloned() else {
            return;
        };

        match control.name.as_str() {
            "select" => self.select_option(&elements, &control, language),
            "input" => {
                let tag = rewrite_open_tag(&self.source, &control, "value", AttributeEdit::Value(language));
                self.source.replace_range(control.open, &tag);
            }
            _ => {}
        }
    }
}
