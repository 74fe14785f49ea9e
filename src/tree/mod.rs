mod ser;
mod value;

use std::borrow::Cow;

use crate::path::Segment;
use crate::{Error, Result};

pub use value::{Container, FieldValue, FilePart, Map, Node, Scalar};

/// Insert `value` at `path` inside `container`.
///
/// Missing containers along the way are created as lists; a scalar sitting
/// where a container is needed is replaced. The leaf slot is overwritten if
/// it already holds something. The only failure is an empty `path`.
///
/// # Examples
/// ```
/// use serde_formtree::{insert, parse, Container, Node};
///
/// let mut root = Container::new();
/// insert(&mut root, &parse("a[]").unwrap(), Node::text("x")).unwrap();
/// insert(&mut root, &parse("a[]").unwrap(), Node::text("y")).unwrap();
/// assert_eq!(root["a"][1].as_str(), Some("y"));
/// ```
pub fn insert(container: &mut Container, path: &[Segment], value: Node) -> Result<()> {
    let (leaf, branch) = path.split_last().ok_or_else(Error::empty_path)?;
    let mut current = container;
    for segment in branch {
        let key = current.resolve_key(segment);
        current = current.slot_mut(&key).make_container();
    }
    let key = current.resolve_key(leaf);
    *current.slot_mut(&key) = value;
    Ok(())
}

/// Re-key list entries as `"0"`, `"1"`, ... in a map, keeping their order.
pub fn promote(items: Vec<Node>) -> Map {
    let mut buffer = itoa::Buffer::new();
    items
        .into_iter()
        .enumerate()
        .map(|(idx, node)| (buffer.format(idx).to_owned(), node))
        .collect()
}

/// A list when the keys of `map` are exactly `0..len` in any order, entries
/// placed by index; otherwise `map` unchanged. An empty map gives an empty list.
pub(crate) fn settle(map: Map) -> Container {
    let len = map.len();
    if !map.keys().all(|key| canonical_index(key).is_some_and(|idx| idx < len)) {
        return Container::Map(map);
    }
    let mut indexed: Vec<(usize, Node)> = map
        .into_iter()
        .filter_map(|(key, node)| Some((canonical_index(&key)?, node)))
        .collect();
    indexed.sort_unstable_by_key(|(idx, _)| *idx);
    Container::List(indexed.into_iter().map(|(_, node)| node).collect())
}

/// `Some(n)` when `key` is the canonical decimal spelling of `n`
/// (no sign, no leading zeros).
pub(crate) fn canonical_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.iter().all(u8::is_ascii_digit) => key.parse().ok(),
        _ => None,
    }
}

impl Container {
    /// AutoIndex takes the current entry count. After promotion that count
    /// can skip numbers or land on a key already in use, which then gets
    /// overwritten.
    fn resolve_key<'s>(&self, segment: &'s Segment) -> Cow<'s, str> {
        match segment {
            Segment::Key(key) => Cow::Borrowed(key),
            Segment::AutoIndex => Cow::Owned(itoa::Buffer::new().format(self.len()).to_owned()),
        }
    }

    fn fits_list(len: usize, key: &str) -> bool {
        canonical_index(key).is_some_and(|idx| idx <= len)
    }

    /// The slot for `key`, created empty when missing. A list that cannot
    /// hold `key` contiguously becomes a map first.
    fn slot_mut(&mut self, key: &str) -> &mut Node {
        let overflows =
            matches!(&*self, Container::List(items) if !Self::fits_list(items.len(), key));
        if overflows {
            if let Container::List(items) = self {
                let items = std::mem::take(items);
                log::trace!("promoting list of {} entries to map for key {key:?}", items.len());
                *self = Container::Map(promote(items));
            }
        }

        match self {
            Container::List(items) => {
                let idx = canonical_index(key).unwrap_or(items.len());
                if idx == items.len() {
                    items.push(Node::default());
                }
                &mut items[idx]
            }
            Container::Map(map) => map.entry(key.to_owned()).or_default(),
        }
    }
}
