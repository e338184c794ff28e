//! A small owned element tree. Controllers build pages out of these and the
//! page shell splices the rendered HTML into its slots.

use std::collections::BTreeMap;

use handlebars::html_escape;

use crate::error::{Error, Result};

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &["img", "source", "br", "hr", "meta", "link", "input"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(tag).attr("id", id)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.append(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the attribute if it is already set, otherwise add it.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, old)) => *old = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Replace every child with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(&html_escape(text)),
                Node::Element(el) => el.render_into(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// The fixed, id-addressed slots of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    slots: BTreeMap<String, Element>,
}

impl Document {
    /// Every slot must carry an `id` attribute; ones that don't are ignored.
    pub fn new(slots: impl IntoIterator<Item = Element>) -> Self {
        let slots = slots
            .into_iter()
            .filter_map(|el| el.id().map(str::to_string).map(|id| (id, el)))
            .collect();
        Self { slots }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.slots.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Element> {
        self.slots
            .get_mut(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }

    /// Rendered slots keyed for templates: `restaurants-list` becomes
    /// `restaurants_list`.
    pub fn rendered_slots(&self) -> BTreeMap<String, String> {
        self.slots
            .iter()
            .map(|(id, el)| (id.replace('-', "_"), el.render()))
            .collect()
    }
}
