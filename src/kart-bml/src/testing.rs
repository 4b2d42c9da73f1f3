//! Fixture encoder for tests
//!
//! Production code only ever decodes BML. Test suites here and in
//! downstream crates (via the `testing` feature) build their inputs with
//! this encoder.

use crate::node::Node;

/// Element description to encode
#[derive(Debug, Clone, Default)]
pub struct Element {
    name: String,
    text: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Append an attribute; duplicates are written as-is
    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

impl From<&Node> for Element {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            text: node.text.clone(),
            attributes: node
                .attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: node.children.iter().map(Element::from).collect(),
        }
    }
}

fn write_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    let units: Vec<u16> = s.encode_utf16().collect();
    write_i32(out, units.len() as i32);
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
}

fn write_element(out: &mut Vec<u8>, element: &Element) {
    write_string(out, &element.name);
    write_string(out, &element.text);
    write_i32(out, element.attributes.len() as i32);
    for (key, value) in &element.attributes {
        write_string(out, key);
        write_string(out, value);
    }
    write_i32(out, element.children.len() as i32);
    for child in &element.children {
        write_element(out, child);
    }
}

/// Encode an element tree to BML bytes
pub fn encode(element: &Element) -> Vec<u8> {
    let mut out = Vec::new();
    write_element(&mut out, element);
    out
}

/// Encode `depth` nested `name` elements, each with one child, around `leaf`
///
/// Built without recursion so fixtures can be arbitrarily deep.
pub fn encode_nested(name: &str, depth: usize, leaf: &Element) -> Vec<u8> {
    let mut header = Vec::new();
    write_string(&mut header, name);
    write_string(&mut header, "");
    write_i32(&mut header, 0);
    write_i32(&mut header, 1);

    let mut out = Vec::with_capacity(header.len() * depth);
    for _ in 0..depth {
        out.extend_from_slice(&header);
    }
    write_element(&mut out, leaf);
    out
}

/// Encoding of a node with an empty name
pub fn empty_node() -> Vec<u8> {
    0i32.to_le_bytes().to_vec()
}
