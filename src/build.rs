use tracing::debug;

use crate::node::{FormMap, Leaf, Node};
use crate::path::decompose_non_empty;
use crate::{Error, Result};

/// Inserts every `(key, values)` entry into a fresh map-of-maps tree.
///
/// Keys with no values still create their intermediate maps and are
/// rejected when a prefix is already a leaf; only the leaf itself is left
/// out, so they never claim their final segment.
pub fn build_map<I, K, V, S>(form: I) -> Result<FormMap>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = FormMap::new();
    let mut entries = 0usize;
    for (key, values) in form {
        let key = key.as_ref();
        let path = decompose_non_empty(key).inspect_err(|err| debug!(%err, "rejected form key"))?;
        let values: Vec<String> = values.into_iter().map(|v| v.as_ref().to_owned()).collect();
        insert_leaf(&mut root, key, &path, Leaf::from_values(values))
            .inspect_err(|err| debug!(%err, "rejected form key"))?;
        entries += 1;
    }
    debug!(entries, keys = root.len(), "built form map");
    Ok(root)
}

/// Walks `path`, creating intermediate maps, and stores `leaf` at its end.
///
/// Fails when any prefix of `path` already holds a leaf or sequence, or
/// when a leaf is stored at a path that is already occupied. Without a
/// leaf only the prefix is walked.
pub(crate) fn insert_leaf(
    root: &mut FormMap,
    key: &str,
    path: &[&str],
    leaf: Option<Leaf>,
) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        return Err(Error::empty_path(key));
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        if !current.contains_key(segment) {
            current.insert((*segment).to_string(), Node::Map(FormMap::new()));
        }
        current = match current.get_mut(segment) {
            Some(Node::Map(child)) => child,
            _ => return Err(Error::path_collision(key, &path[..=depth])),
        };
    }

    let Some(leaf) = leaf else {
        return Ok(());
    };
    if current.contains_key(last) {
        return Err(Error::path_collision(key, path));
    }
    current.insert((*last).to_string(), Node::Leaf(leaf));
    Ok(())
}
