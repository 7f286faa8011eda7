use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::slice;

/// Values collected under one form key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Single(String),
    Many(Vec<String>),
}

impl Leaf {
    /// Zero values produce no leaf; one value is kept as a scalar.
    pub fn from_values(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Leaf::Single),
            _ => Some(Leaf::Many(values)),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Leaf::Single(value) => slice::from_ref(value),
            Leaf::Many(values) => values,
        }
    }

    pub fn first(&self) -> &str {
        self.values().first().map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Map,
    Seq,
    Leaf,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Map => "map",
            NodeKind::Seq => "sequence",
            NodeKind::Leaf => "leaf",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Map(FormMap),
    Seq(FormSeq),
    Leaf(Leaf),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Map(_) => NodeKind::Map,
            Node::Seq(_) => NodeKind::Seq,
            Node::Leaf(_) => NodeKind::Leaf,
        }
    }

    pub fn as_map(&self) -> Option<&FormMap> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&FormSeq> {
        match self {
            Node::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<FormMap> for Node {
    fn from(map: FormMap) -> Self {
        Node::Map(map)
    }
}

impl From<FormSeq> for Node {
    fn from(seq: FormSeq) -> Self {
        Node::Seq(seq)
    }
}

/// String-keyed node. Keys are kept sorted so equal trees compare and
/// serialize identically no matter how the input was ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormMap(BTreeMap<String, Node>);

impl FormMap {
    pub const fn new() -> Self {
        FormMap(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, Node> {
        self.0.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Node> {
        self.0.iter()
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    pub(crate) fn insert(&mut self, key: String, node: Node) -> Option<Node> {
        self.0.insert(key, node)
    }
}

impl<'a> IntoIterator for &'a FormMap {
    type Item = (&'a String, &'a Node);
    type IntoIter = btree_map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for FormMap {
    type Item = (String, Node);
    type IntoIter = btree_map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Node)> for FormMap {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        FormMap(iter.into_iter().collect())
    }
}

/// Integer-indexed node. Indices below the highest populated one that
/// never received a value are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSeq(Vec<Option<Node>>);

impl FormSeq {
    pub const fn new() -> Self {
        FormSeq(Vec::new())
    }

    pub(crate) fn from_slots(slots: Vec<Option<Node>>) -> Self {
        FormSeq(slots)
    }

    /// Returns `None` both for an empty slot and for an index past the end.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index).and_then(Option::as_ref)
    }

    pub fn is_slot_empty(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Option<Node>> {
        self.0.iter()
    }

    pub fn slots(&self) -> &[Option<Node>] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a FormSeq {
    type Item = &'a Option<Node>;
    type IntoIter = slice::Iter<'a, Option<Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[rstest::rstest]
    fn test_leaf_from_values() {
        assert_eq!(Leaf::from_values(Vec::new()), None);
        assert_eq!(
            Leaf::from_values(strings(&["a"])),
            Some(Leaf::Single("a".to_string()))
        );
        assert_eq!(
            Leaf::from_values(strings(&["a", "b"])),
            Some(Leaf::Many(strings(&["a", "b"])))
        );
    }

    #[rstest::rstest]
    fn test_leaf_values_normalizes_single() {
        let leaf = Leaf::Single("x".to_string());
        assert_eq!(leaf.values(), &["x".to_string()]);
        assert_eq!(leaf.first(), "x");
        assert_eq!(leaf.len(), 1);

        let empty = Leaf::Many(Vec::new());
        assert_eq!(empty.first(), "");
        assert!(empty.is_empty());
    }

    #[rstest::rstest]
    fn test_seq_sparse_slots() {
        let seq = FormSeq::from_slots(vec![
            Some(Node::Leaf(Leaf::Single("a".to_string()))),
            None,
            Some(Node::Map(FormMap::new())),
        ]);
        assert_eq!(seq.len(), 3);
        assert!(seq.is_slot_empty(1));
        assert!(seq.is_slot_empty(7));
        assert_eq!(seq.get(2).map(Node::kind), Some(NodeKind::Map));
    }

    #[rstest::rstest]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::Seq.to_string(), "sequence");
        let node = Node::from(FormSeq::new());
        assert!(node.as_seq().is_some());
        assert!(node.as_map().is_none());
        assert!(node.as_leaf().is_none());
    }
}
