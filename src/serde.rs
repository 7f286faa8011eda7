use ::serde::de::DeserializeOwned;
use ::serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::form::parse_urlencoded;
use crate::node::{FormMap, FormSeq, Leaf, Node};
use crate::{Error, FormTree, Result};

impl Serialize for Leaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Leaf::Single(value) => serializer.serialize_str(value),
            Leaf::Many(values) => serializer.collect_seq(values),
        }
    }
}

impl Serialize for FormMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, node) in self {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for FormSeq {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Map(map) => map.serialize(serializer),
            Node::Seq(seq) => seq.serialize(serializer),
            Node::Leaf(leaf) => leaf.serialize(serializer),
        }
    }
}

impl Serialize for FormTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

impl From<&Leaf> for Value {
    fn from(leaf: &Leaf) -> Self {
        match leaf {
            Leaf::Single(value) => Value::String(value.clone()),
            Leaf::Many(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl From<&FormMap> for Value {
    fn from(map: &FormMap) -> Self {
        let object: Map<String, Value> = map
            .iter()
            .map(|(key, node)| (key.clone(), Value::from(node)))
            .collect();
        Value::Object(object)
    }
}

impl From<&FormSeq> for Value {
    fn from(seq: &FormSeq) -> Self {
        Value::Array(
            seq.iter()
                .map(|slot| slot.as_ref().map_or(Value::Null, Value::from))
                .collect(),
        )
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Map(map) => Value::from(map),
            Node::Seq(seq) => Value::from(seq),
            Node::Leaf(leaf) => Value::from(leaf),
        }
    }
}

impl FormTree {
    /// The tree as a JSON decoder would have produced it; empty sequence
    /// slots become `null`.
    pub fn to_value(&self) -> Value {
        Value::from(self.root())
    }

    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.to_value())
            .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
    }
}

/// Builds a tree from `form` and deserializes it into `T`. Leaves are
/// strings, so target fields holding form values should be `String`,
/// `Vec<String>` or `Option` of those.
pub fn from_form<T, I, K, V, S>(form: I) -> Result<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FormTree::new(form)?.deserialize_into()
}

pub fn from_urlencoded<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    FormTree::new(parse_urlencoded(input))?.deserialize_into()
}

#[cfg(test)]
mod tests {
    use ::serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        name: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Table {
        title: String,
        rows: Vec<Row>,
    }

    #[rstest::rstest]
    fn test_serialize_matches_to_value() {
        let tree = FormTree::new([
            ("rows.0.name", vec!["a"]),
            ("rows.2.name", vec!["c"]),
            ("rows.2.tags", vec!["x", "y"]),
        ])
        .unwrap();
        let expected = json!({
            "rows": [
                {"name": "a"},
                null,
                {"name": "c", "tags": ["x", "y"]}
            ]
        });
        assert_eq!(tree.to_value(), expected);
        assert_eq!(serde_json::to_value(&tree).unwrap(), expected);
    }

    #[rstest::rstest]
    fn test_from_urlencoded_into_struct() {
        let table: Table = from_urlencoded(
            b"title=Outlets&rows.0.name=North&rows.1.name=South&rows.1.tags=a&rows.1.tags=b",
        )
        .unwrap();
        assert_eq!(
            table,
            Table {
                title: "Outlets".to_string(),
                rows: vec![
                    Row {
                        name: "North".to_string(),
                        tags: Vec::new(),
                    },
                    Row {
                        name: "South".to_string(),
                        tags: vec!["a".to_string(), "b".to_string()],
                    },
                ],
            }
        );
    }

    #[rstest::rstest]
    fn test_from_form_reports_deserialize_error() {
        let err = from_form::<Table, _, _, _, _>([("title", ["x"])]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Deserialize);
    }
}
