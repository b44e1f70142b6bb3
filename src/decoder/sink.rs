//! Structured output sink
//!
//! Decoders report every field as it is read. The sink is a visitor: it sees
//! `begin`/`end` pairs for nested records and a `field` call per leaf value,
//! always in wire order. `TreeSink` collects the calls into an owned
//! `FieldNode` tree that can be rendered or serialised.

use serde::Serialize;
use std::net::IpAddr;

/// A decoded value as handed to the sink
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Record headers and markers with no value of their own
    None,
    UInt(u64),
    Int(i64),
    Bool(bool),
    /// Raw bytes, rendered as hex in wire order
    Bytes(&'a [u8]),
    /// 32-byte hash, rendered in reversed byte order
    Hash(&'a [u8; 32]),
    Text(String),
    Ip(IpAddr),
    /// Unix seconds
    Timestamp(i64),
    /// Amount in duffs
    Amount(u64),
    /// Numeric code with a symbolic name
    Named { value: u64, name: &'static str },
    /// Value rendered as fixed-width hex (flags, magic numbers)
    Hex { value: u64, width: usize },
}

/// One field report: label, absolute offset, byte length and value
#[derive(Debug, Clone, PartialEq)]
pub struct Field<'a> {
    pub label: &'a str,
    pub offset: usize,
    pub length: usize,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new(label: &'a str, offset: usize, length: usize, value: FieldValue<'a>) -> Self {
        Self {
            label,
            offset,
            length,
            value,
        }
    }
}

/// Receiver of decoded fields
pub trait FieldSink {
    /// Open a nested record starting at `offset`
    fn begin(&mut self, label: &str, offset: usize);

    /// Report a leaf field inside the innermost open record
    fn field(&mut self, field: Field<'_>);

    /// Close the innermost record; `length` is the number of bytes it spans
    fn end(&mut self, length: usize);
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl FieldSink for NullSink {
    fn begin(&mut self, _label: &str, _offset: usize) {}
    fn field(&mut self, _field: Field<'_>) {}
    fn end(&mut self, _length: usize) {}
}

/// Owned rendering of a field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderedValue {
    UInt(u64),
    Int(i64),
    Bool(bool),
    Text(String),
}

impl std::fmt::Display for RenderedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderedValue::UInt(v) => write!(f, "{}", v),
            RenderedValue::Int(v) => write!(f, "{}", v),
            RenderedValue::Bool(v) => write!(f, "{}", v),
            RenderedValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl FieldValue<'_> {
    /// Convert into the owned display form; `None` has no rendering
    pub fn render(&self) -> Option<RenderedValue> {
        let rendered = match self {
            FieldValue::None => return None,
            FieldValue::UInt(v) => RenderedValue::UInt(*v),
            FieldValue::Int(v) => RenderedValue::Int(*v),
            FieldValue::Bool(v) => RenderedValue::Bool(*v),
            FieldValue::Bytes(b) => RenderedValue::Text(hex::encode(b)),
            FieldValue::Hash(h) => RenderedValue::Text(reversed_hex(*h)),
            FieldValue::Text(s) => RenderedValue::Text(s.clone()),
            FieldValue::Ip(ip) => RenderedValue::Text(ip.to_string()),
            FieldValue::Timestamp(t) => {
                RenderedValue::Text(crate::utils::time::format_unix_time(*t))
            }
            FieldValue::Amount(duffs) => {
                RenderedValue::Text(crate::utils::currency::format_duffs(*duffs))
            }
            FieldValue::Named { value, name } => {
                RenderedValue::Text(format!("{} ({})", name, value))
            }
            FieldValue::Hex { value, width } => {
                RenderedValue::Text(format!("0x{:0width$x}", value, width = *width))
            }
        };
        Some(rendered)
    }
}

/// Hex of `bytes` in reversed order, the conventional display for hashes
pub fn reversed_hex(bytes: &[u8]) -> String {
    let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
    hex::encode(reversed)
}

/// Owned node of the decoded field tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldNode {
    pub label: String,
    pub offset: usize,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RenderedValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldNode>,
}

impl FieldNode {
    pub fn new(label: &str, offset: usize) -> Self {
        Self {
            label: label.to_string(),
            offset,
            length: 0,
            value: None,
            children: Vec::new(),
        }
    }

    /// Depth-first search for the first node with `label`
    pub fn find(&self, label: &str) -> Option<&FieldNode> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(label))
    }

    /// All nodes with `label`, depth-first
    pub fn find_all<'n>(&'n self, label: &str) -> Vec<&'n FieldNode> {
        let mut out = Vec::new();
        self.collect(label, &mut out);
        out
    }

    fn collect<'n>(&'n self, label: &str, out: &mut Vec<&'n FieldNode>) {
        if self.label == label {
            out.push(self);
        }
        for child in &self.children {
            child.collect(label, out);
        }
    }

    /// Total number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

/// Sink that builds a `FieldNode` tree
#[derive(Debug)]
pub struct TreeSink {
    stack: Vec<FieldNode>,
}

impl TreeSink {
    pub fn new(root_label: &str) -> Self {
        Self {
            stack: vec![FieldNode::new(root_label, 0)],
        }
    }

    /// Close any records left open and return the root
    pub fn finish(mut self) -> FieldNode {
        while self.stack.len() > 1 {
            self.close_top(None);
        }
        let mut root = self.stack.pop().unwrap_or_else(|| FieldNode::new("", 0));
        root.length = root
            .children
            .iter()
            .map(|c| c.offset + c.length)
            .max()
            .unwrap_or(0)
            .saturating_sub(root.offset);
        root
    }

    fn close_top(&mut self, length: Option<usize>) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(mut node) = self.stack.pop() {
            node.length = length.unwrap_or_else(|| {
                node.children
                    .iter()
                    .map(|c| c.offset + c.length)
                    .max()
                    .unwrap_or(node.offset)
                    .saturating_sub(node.offset)
            });
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(node);
            }
        }
    }
}

impl FieldSink for TreeSink {
    fn begin(&mut self, label: &str, offset: usize) {
        self.stack.push(FieldNode::new(label, offset));
    }

    fn field(&mut self, field: Field<'_>) {
        let node = FieldNode {
            label: field.label.to_string(),
            offset: field.offset,
            length: field.length,
            value: field.value.render(),
            children: Vec::new(),
        };
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn end(&mut self, length: usize) {
        self.close_top(Some(length));
    }
}
