//! Owned element tree backed by quick-xml.
//!
//! Parses a serialized SVG (or any well-formed XML fragment with a single
//! root) into a tree of reference-counted nodes and serializes it back.
//! Attribute order is preserved, so attributes the rewriters never touch
//! come back byte-identical.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::rc::Rc;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::ElementHandle;
use crate::error::DomError;

enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Text(String),
    /// Raw comment content, emitted verbatim.
    Comment(String),
}

struct NodeData {
    kind: NodeKind,
    children: Vec<NodeRef>,
}

/// Cheap-to-clone handle to one node; identity is the node, not its content.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<NodeData>>);

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for NodeRef {}

impl Hash for NodeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, .. } => write!(f, "NodeRef(<{tag}>)"),
            NodeKind::Text(t) => write!(f, "NodeRef({t:?})"),
            NodeKind::Comment(_) => write!(f, "NodeRef(<!-- -->)"),
        }
    }
}

impl NodeRef {
    fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            children: Vec::new(),
        })))
    }

    /// Create a detached element node (test and host-adapter convenience).
    pub fn element(tag: &str, attrs: &[(&str, &str)]) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            self_closing: false,
        })
    }

    /// Create a detached text node.
    pub fn text(content: &str) -> Self {
        Self::new(NodeKind::Text(content.to_string()))
    }

    pub fn is_element(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Element { .. })
    }

    /// Concatenated text content of direct text children.
    pub fn text_content(&self) -> String {
        self.0
            .borrow()
            .children
            .iter()
            .filter_map(|c| match &c.0.borrow().kind {
                NodeKind::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn append_child(&self, child: NodeRef) {
        self.0.borrow_mut().children.push(child);
    }

    /// Direct element children.
    pub fn child_elements(&self) -> Vec<NodeRef> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|c| c.is_element())
            .cloned()
            .collect()
    }

    fn collect_descendants(&self, out: &mut Vec<NodeRef>) {
        for child in self.child_elements() {
            out.push(child.clone());
            child.collect_descendants(out);
        }
    }

    fn write_to(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<(), DomError> {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Element {
                tag,
                attrs,
                self_closing,
            } => {
                let mut start = BytesStart::new(tag.as_str());
                for (key, value) in attrs {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
                if *self_closing && data.children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for child in &data.children {
                        child.write_to(writer)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
                }
            }
            NodeKind::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            NodeKind::Comment(raw) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))?;
            }
        }
        Ok(())
    }
}

impl ElementHandle for NodeRef {
    fn tag_name(&self) -> String {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, .. } => tag.clone(),
            _ => String::new(),
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    fn set_attr(&self, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            // Keep the authored key casing and position when updating.
            if let Some(slot) = attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                slot.1 = value.to_string();
            } else {
                attrs.push((name.to_string(), value.to_string()));
            }
        }
    }

    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }
}

/// A parsed document: prolog events kept verbatim plus the root element.
pub struct Tree {
    prolog: Vec<String>,
    root: NodeRef,
}

impl Tree {
    /// Parse a serialized document with a single root element.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let mut reader = Reader::from_str(input);
        let mut prolog: Vec<String> = Vec::new();
        let mut root: Option<NodeRef> = None;
        let mut stack: Vec<NodeRef> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let node = element_from_event(&e, false)?;
                    attach(&stack, &mut root, &node);
                    stack.push(node);
                }
                Event::Empty(e) => {
                    let node = element_from_event(&e, true)?;
                    attach(&stack, &mut root, &node);
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    match stack.pop() {
                        Some(open) if open.tag_name() == name => {}
                        _ => return Err(DomError::UnexpectedClose(name)),
                    }
                }
                Event::Text(t) => {
                    if let Some(parent) = stack.last() {
                        let raw = String::from_utf8_lossy(t.as_ref()).into_owned();
                        let text = unescape(&raw)?.into_owned();
                        parent.append_child(NodeRef::new(NodeKind::Text(text)));
                    }
                    // Whitespace outside the root is dropped.
                }
                Event::CData(t) => {
                    if let Some(parent) = stack.last() {
                        let text = String::from_utf8_lossy(t.as_ref()).into_owned();
                        parent.append_child(NodeRef::new(NodeKind::Text(text)));
                    }
                }
                Event::Comment(t) => {
                    let raw = String::from_utf8_lossy(t.as_ref()).into_owned();
                    if let Some(parent) = stack.last() {
                        parent.append_child(NodeRef::new(NodeKind::Comment(raw)));
                    } else if root.is_none() {
                        prolog.push(format!("<!--{raw}-->"));
                    }
                }
                Event::Decl(d) => {
                    let raw = String::from_utf8_lossy(d.as_ref()).into_owned();
                    prolog.push(format!("<?{raw}?>"));
                }
                Event::DocType(d) => {
                    let raw = String::from_utf8_lossy(d.as_ref()).into_owned();
                    prolog.push(format!("<!DOCTYPE {raw}>"));
                }
                Event::PI(p) => {
                    let raw = String::from_utf8_lossy(p.as_ref()).into_owned();
                    if stack.is_empty() && root.is_none() {
                        prolog.push(format!("<?{raw}?>"));
                    }
                }
                Event::GeneralRef(r) => {
                    // quick-xml emits entity/character references (e.g. `&amp;`)
                    // in text as a separate event; reconstruct and unescape them
                    // like the surrounding Text so they round-trip unchanged.
                    if let Some(parent) = stack.last() {
                        let name = String::from_utf8_lossy(r.as_ref()).into_owned();
                        let text = unescape(&format!("&{name};"))?.into_owned();
                        parent.append_child(NodeRef::new(NodeKind::Text(text)));
                    }
                }
                Event::Eof => break,
            }
        }

        root.map(|root| Self { prolog, root }).ok_or(DomError::NoRoot)
    }

    /// The root element handle.
    pub fn root(&self) -> NodeRef {
        self.root.clone()
    }

    /// Serialize back to text. Prolog events come back verbatim; attribute
    /// order within elements is preserved.
    pub fn serialize(&self) -> String {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        for raw in &self.prolog {
            writer
                .write_event(Event::Text(BytesText::from_escaped(raw.as_str())))
                .expect("in-memory write cannot fail");
        }
        self.root
            .write_to(&mut writer)
            .expect("in-memory write cannot fail");
        String::from_utf8(writer.into_inner().into_inner()).expect("serializer emits UTF-8")
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

fn element_from_event(e: &BytesStart<'_>, self_closing: bool) -> Result<NodeRef, DomError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = unescape(&raw)?.into_owned();
        attrs.push((key, value));
    }
    Ok(NodeRef::new(NodeKind::Element {
        tag,
        attrs,
        self_closing,
    }))
}

fn attach(stack: &[NodeRef], root: &mut Option<NodeRef>, node: &NodeRef) {
    if let Some(parent) = stack.last() {
        parent.append_child(node.clone());
    } else if root.is_none() {
        *root = Some(node.clone());
    }
}
