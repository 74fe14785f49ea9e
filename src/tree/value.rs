use std::{fmt, ops::Index};

use indexmap::IndexMap;

pub type Map = IndexMap<String, Node>;

/// An uploaded file carried through the tree untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content: content.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

// Content is opaque; keep it out of debug output.
impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    Text(String),
    File(FilePart),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            Scalar::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FilePart> {
        match self {
            Scalar::File(file) => Some(file),
            Scalar::Text(_) => None,
        }
    }

    pub const fn is_file(&self) -> bool {
        matches!(self, Scalar::File(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Container {
    List(Vec<Node>),
    Map(Map),
}

impl Default for Container {
    fn default() -> Self {
        Container::List(Vec::new())
    }
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry count: list length or number of map keys.
    pub fn len(&self) -> usize {
        match self {
            Container::List(items) => items.len(),
            Container::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Container::List(_))
    }

    pub const fn is_map(&self) -> bool {
        matches!(self, Container::Map(_))
    }

    pub fn as_list(&self) -> Option<&Vec<Node>> {
        match self {
            Container::List(items) => Some(items),
            Container::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Container::Map(map) => Some(map),
            Container::List(_) => None,
        }
    }

    /// Look an entry up by key. Lists answer canonical decimal keys.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Container::List(items) => super::canonical_index(key).and_then(|idx| items.get(idx)),
            Container::Map(map) => map.get(key),
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&Node> {
        match self {
            Container::List(items) => items.get(index),
            Container::Map(map) => map.get_index(index).map(|(_, node)| node),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Container::List(_) => "list",
            Container::Map(_) => "map",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Scalar(Scalar),
    Container(Container),
}

impl Default for Node {
    fn default() -> Self {
        Node::Container(Container::default())
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Scalar(Scalar::Text(text.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) => scalar.as_str(),
            Node::Container(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            Node::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Container(container) => Some(container),
            Node::Scalar(_) => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_container().and_then(|container| container.get(key))
    }

    pub const fn is_container(&self) -> bool {
        matches!(self, Node::Container(_))
    }

    /// Turn this slot into a container, dropping a scalar that sits here.
    pub(crate) fn make_container(&mut self) -> &mut Container {
        match self {
            Node::Container(container) => container,
            slot => {
                *slot = Node::Container(Container::new());
                slot.make_container()
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Scalar(Scalar::Text(_)) => "text",
            Node::Scalar(Scalar::File(_)) => "file",
            Node::Container(container) => container.type_name(),
        }
    }
}

impl Index<&str> for Container {
    type Output = Node;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).unwrap_or_else(|| {
            panic!("key '{key}' not found in {} with {} entries", self.type_name(), self.len())
        })
    }
}

impl Index<usize> for Container {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        self.get_index(index).unwrap_or_else(|| {
            panic!("index {index} out of bounds for {} of length {}", self.type_name(), self.len())
        })
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Node::Container(container) => &container[key],
            Node::Scalar(_) => panic!("cannot index into {} value", self.type_name()),
        }
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Node::Container(container) => &container[index],
            Node::Scalar(_) => panic!("cannot index into {} value", self.type_name()),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Node::Container(container)
    }
}

/// Anything that can be the value half of a form pair.
///
/// `None` means the field has nothing to contribute and is skipped.
pub trait FieldValue {
    fn into_node(self) -> Option<Node>;
}

impl FieldValue for Node {
    fn into_node(self) -> Option<Node> {
        Some(self)
    }
}

impl FieldValue for Scalar {
    fn into_node(self) -> Option<Node> {
        Some(Node::Scalar(self))
    }
}

impl FieldValue for FilePart {
    fn into_node(self) -> Option<Node> {
        Some(Node::Scalar(Scalar::File(self)))
    }
}

impl FieldValue for String {
    fn into_node(self) -> Option<Node> {
        Some(Node::text(self))
    }
}

impl FieldValue for &str {
    fn into_node(self) -> Option<Node> {
        Some(Node::text(self))
    }
}

impl FieldValue for &String {
    fn into_node(self) -> Option<Node> {
        Some(Node::text(self.as_str()))
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn into_node(self) -> Option<Node> {
        self.and_then(FieldValue::into_node)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use indexmap::IndexMap;

    use super::{Container, FieldValue, FilePart, Node, Scalar};

    #[rstest::rstest]
    fn test_container_accessors() {
        let list = Container::List(vec![Node::text("a"), Node::text("b")]);
        assert!(list.is_list());
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("1").and_then(Node::as_str), Some("b"));
        assert!(list.get("01").is_none());
        assert!(list.get("x").is_none());
        assert_eq!(list[0].as_str(), Some("a"));

        let mut map = IndexMap::new();
        map.insert("5".to_string(), Node::text("x"));
        let map = Container::Map(map);
        assert!(map.is_map());
        assert_eq!(map["5"].as_str(), Some("x"));
        assert_eq!(map.get_index(0).and_then(Node::as_str), Some("x"));
        assert!(map.as_list().is_none());
    }

    #[rstest::rstest]
    fn test_make_container_replaces_scalar() {
        let mut node = Node::text("old");
        let container = node.make_container();
        assert!(container.is_list());
        assert!(container.is_empty());
        assert!(node.is_container());

        let mut nested = Node::Container(Container::List(vec![Node::text("keep")]));
        assert_eq!(nested.make_container().len(), 1);
    }

    #[rstest::rstest]
    fn test_field_value_conversions() {
        assert_eq!("x".into_node(), Some(Node::text("x")));
        assert_eq!(String::from("y").into_node(), Some(Node::text("y")));
        assert_eq!(None::<&str>.into_node(), None);
        assert_eq!(Some("z").into_node(), Some(Node::text("z")));

        let file = FilePart::new("a.txt", b"abc".to_vec()).with_content_type("text/plain");
        let node = file.clone().into_node().unwrap();
        assert_eq!(node.as_scalar().and_then(Scalar::as_file), Some(&file));
        assert_eq!(node.type_name(), "file");
    }

    #[rstest::rstest]
    fn test_file_part_debug_hides_content() {
        let file = FilePart::new("secret.bin", vec![1, 2, 3]);
        let debug = format!("{file:?}");
        assert!(debug.contains("size: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }

    #[rstest::rstest]
    fn test_indexing_panics() {
        let scalar = Node::text("x");
        assert!(catch_unwind(AssertUnwindSafe(|| {
            let _ = &scalar["a"];
        }))
        .is_err());

        let empty = Container::new();
        assert!(catch_unwind(AssertUnwindSafe(|| {
            let _ = &empty[0];
        }))
        .is_err());
    }
}
