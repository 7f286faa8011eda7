use std::ops::Deref;

use tracing::debug;

use crate::arrayify::{arrayify_root, parse_index};
use crate::build::build_map;
use crate::node::{FormMap, Node};
use crate::path::decompose;
use crate::{BuildOptions, Result};

/// A tree of form values whose shape follows the dotted form keys.
///
/// The root is always a map, even when every top-level key is an integer.
/// It dereferences to [`FormMap`], so the [`Navigate`](crate::Navigate)
/// accessors work on it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormTree {
    root: FormMap,
}

impl FormTree {
    /// Builds and arrayifies `form` with [`BuildOptions::default`].
    ///
    /// Besides path collisions and empty keys, this fails with
    /// [`ErrorKind::IndexLimit`](crate::ErrorKind::IndexLimit) when an
    /// integer segment exceeds [`DEFAULT_MAX_INDEX`](crate::constants::DEFAULT_MAX_INDEX);
    /// use [`FormTree::with_options`] to raise the limit or skip arrayifying.
    pub fn new<I, K, V, S>(form: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_options(form, &BuildOptions::default())
    }

    pub fn with_options<I, K, V, S>(form: I, options: &BuildOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = build_map(form)?;
        if options.arrayify {
            root = arrayify_root(root, options.max_index)
                .inspect_err(|err| debug!(%err, "arrayify failed"))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &FormMap {
        &self.root
    }

    pub fn into_root(self) -> FormMap {
        self.root
    }

    /// Follows a dotted key through the tree. Segments index sequences when
    /// they parse as integers and key maps otherwise.
    pub fn lookup(&self, key: &str) -> Option<&Node> {
        let path = decompose(key);
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(first)?;
        for segment in rest {
            node = match node {
                Node::Map(map) => map.get(segment)?,
                Node::Seq(seq) => seq.get(parse_index(segment)?)?,
                Node::Leaf(_) => return None,
            };
        }
        Some(node)
    }
}

impl Deref for FormTree {
    type Target = FormMap;

    fn deref(&self) -> &FormMap {
        &self.root
    }
}

impl From<FormTree> for FormMap {
    fn from(tree: FormTree) -> Self {
        tree.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Leaf;

    #[rstest::rstest]
    fn test_lookup_walks_maps_and_sequences() {
        let tree = FormTree::new([
            ("rows.0.name", vec!["a"]),
            ("rows.1.name", vec!["b", "c"]),
        ])
        .unwrap();

        assert_eq!(
            tree.lookup("rows.1.name").and_then(Node::as_leaf),
            Some(&Leaf::Many(vec!["b".to_string(), "c".to_string()]))
        );
        assert_eq!(tree.lookup(" rows . 0 . name "), tree.lookup("rows.0.name"));
        assert!(tree.lookup("rows.x.name").is_none());
        assert!(tree.lookup("rows.0.name.deeper").is_none());
        assert!(tree.lookup("").is_none());
    }

    #[rstest::rstest]
    fn test_without_arrayify_keeps_maps() {
        let opts = BuildOptions::new().with_arrayify(false);
        let tree = FormTree::with_options([("rows.0", ["a"])], &opts).unwrap();
        let rows = tree.get("rows").and_then(Node::as_map).unwrap();
        assert_eq!(rows.get("0"), Some(&Node::Leaf(Leaf::Single("a".to_string()))));
    }

    #[rstest::rstest]
    fn test_root_with_integer_keys_stays_map() {
        let tree = FormTree::new([("0", ["a"]), ("1", ["b"])]).unwrap();
        assert_eq!(tree.root().len(), 2);
        assert!(tree.lookup("1").is_some());
    }
}
