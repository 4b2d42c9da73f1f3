//! Iterative BML tree decoder
//!
//! Node layout (little-endian):
//!
//! ```text
//! Str   name           (empty name = "no node")
//! Str   text
//! Int32 attr_count
//!       attr_count x (Str key, Str value)
//! Int32 child_count
//!       child_count x Node
//! ```
//!
//! Nesting depth is unbounded in the format, so children are decoded with an
//! explicit stack of pending frames instead of native recursion.

use std::path::Path;

use crate::node::{Attributes, Node};
use crate::reader::{Reader, INT32_SIZE};
use crate::{Error, Result};

/// Smallest possible encoded attribute: two empty strings
const MIN_ATTRIBUTE_SIZE: usize = 2 * INT32_SIZE;

/// Smallest possible encoded child: an empty name
const MIN_CHILD_SIZE: usize = INT32_SIZE;

/// A node whose children are still being decoded
struct Frame {
    node: Node,
    remaining: usize,
}

/// Decoder positioned at the start of an encoded node
pub struct Decoder<'a> {
    reader: Reader<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    /// Current byte offset into the input
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Decode one node and all of its descendants
    ///
    /// Returns `Ok(None)` when the node's name is empty. Children that decode
    /// to "no node" still count against their parent's declared child count
    /// but are not attached.
    pub fn decode_node(&mut self) -> Result<Option<Node>> {
        let Some(root) = self.read_frame()? else {
            return Ok(None);
        };

        let mut stack = vec![root];
        while let Some(frame) = stack.last_mut() {
            if frame.remaining > 0 {
                frame.remaining -= 1;
                if let Some(child) = self.read_frame()? {
                    stack.push(child);
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            match stack.last_mut() {
                Some(parent) => parent.node.children.push(done.node),
                None => return Ok(Some(done.node)),
            }
        }

        Ok(None)
    }

    /// Read a node header: name, text, attributes and child count
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        let name = self.reader.read_string()?;
        if name.is_empty() {
            return Ok(None);
        }

        let text = self.reader.read_string()?;

        let attr_count = self.reader.read_count("attribute", MIN_ATTRIBUTE_SIZE)?;
        let mut attributes = Attributes::new();
        for _ in 0..attr_count {
            let key = self.reader.read_string()?;
            let value = self.reader.read_string()?;
            attributes.insert(key, value);
        }

        // Declared counts are only a lower bound on input size, so children
        // are not reserved up front.
        let child_count = self.reader.read_count("child", MIN_CHILD_SIZE)?;

        Ok(Some(Frame {
            node: Node {
                name,
                text,
                attributes,
                children: Vec::new(),
            },
            remaining: child_count,
        }))
    }
}

/// Decode the node at the start of `data`
pub fn decode(data: &[u8]) -> Result<Option<Node>> {
    Decoder::new(data).decode_node()
}

/// Decode a whole document, treating an empty root as an error
pub fn decode_document(data: &[u8]) -> Result<Node> {
    decode(data)?.ok_or(Error::EmptyDocument)
}

/// Read and decode a BML file
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    tracing::debug!("Decoding {} ({} bytes)", path.display(), data.len());
    decode_document(&data)
}
