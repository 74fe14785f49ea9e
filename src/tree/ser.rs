use serde::ser::{Serialize, SerializeMap, SerializeSeq, SerializeStruct, Serializer};

use super::value::{Container, FilePart, Node, Scalar};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Container(container) => container.serialize(serializer),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(text) => serializer.serialize_str(text),
            Scalar::File(file) => file.serialize(serializer),
        }
    }
}

// Files are described, never inlined.
impl Serialize for FilePart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FilePart", 3)?;
        state.serialize_field("filename", &self.file_name)?;
        state.serialize_field("contentType", &self.content_type)?;
        state.serialize_field("size", &self.size())?;
        state.end()
    }
}

impl Serialize for Container {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Container::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Container::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_json::json;

    use crate::tree::{Container, FilePart, Node, Scalar};

    #[rstest::rstest]
    fn test_serialize_nested_tree() {
        let mut inner = IndexMap::new();
        inner.insert("z".to_string(), Node::text("last"));
        inner.insert("a".to_string(), Node::text("first"));
        let root = Container::List(vec![
            Node::text("x"),
            Node::Container(Container::Map(inner)),
        ]);

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(value, json!(["x", {"z": "last", "a": "first"}]));
        assert_eq!(
            serde_json::to_string(&root).unwrap(),
            r#"["x",{"z":"last","a":"first"}]"#
        );
    }

    #[rstest::rstest]
    fn test_serialize_file_metadata_only() {
        let file = FilePart::new("photo.png", vec![0u8; 4]).with_content_type("image/png");
        let node = Node::Scalar(Scalar::File(file));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({"filename": "photo.png", "contentType": "image/png", "size": 4})
        );
    }

    #[rstest::rstest]
    fn test_serialize_empty_containers() {
        assert_eq!(serde_json::to_value(Container::new()).unwrap(), json!([]));
        assert_eq!(
            serde_json::to_value(Container::Map(IndexMap::new())).unwrap(),
            json!({})
        );
    }
}
