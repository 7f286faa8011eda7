use tracing::trace;

use crate::constants::is_index_segment;
use crate::node::{FormMap, FormSeq, Node};
use crate::{Error, Result};

/// Parses a plain base-10 index: ASCII digits only, no sign. Leading zeros
/// are accepted; values that overflow `usize` are not indices.
pub fn parse_index(segment: &str) -> Option<usize> {
    if !is_index_segment(segment) {
        return None;
    }
    segment.parse().ok()
}

/// Indices of every key in `map`, in key order, or `None` when the map is
/// empty or any key is not an index.
pub fn numeric_indices(map: &FormMap) -> Option<Vec<usize>> {
    if map.is_empty() {
        return None;
    }
    map.keys().map(|key| parse_index(key)).collect()
}

/// Rewrites the children of the root map, leaves first. The root itself
/// always stays a map.
pub fn arrayify_root(root: FormMap, max_index: usize) -> Result<FormMap> {
    let mut trail = Vec::new();
    arrayify_children(root, max_index, &mut trail)
}

/// Rewrites a single node. Maps whose keys are all indices become
/// sequences; everything else keeps its kind.
pub fn arrayify(node: Node, max_index: usize) -> Result<Node> {
    match node {
        Node::Map(map) => arrayify_map(map, max_index, &mut Vec::new()),
        other => Ok(other),
    }
}

fn arrayify_children(map: FormMap, max_index: usize, trail: &mut Vec<String>) -> Result<FormMap> {
    let mut out = FormMap::new();
    for (key, node) in map {
        let node = match node {
            Node::Map(child) => {
                trail.push(key.clone());
                let node = arrayify_map(child, max_index, trail)?;
                trail.pop();
                node
            }
            other => other,
        };
        out.insert(key, node);
    }
    Ok(out)
}

fn arrayify_map(map: FormMap, max_index: usize, trail: &mut Vec<String>) -> Result<Node> {
    let map = arrayify_children(map, max_index, trail)?;
    let Some(indices) = numeric_indices(&map) else {
        return Ok(Node::Map(map));
    };

    let len = sequence_len(&map, &indices, max_index, trail)?;
    let mut slots: Vec<Option<Node>> = empty_slots(len)
        .ok_or_else(|| Error::index_limit(&trail.join("."), len - 1, max_index))?;
    for ((_, node), index) in map.into_iter().zip(indices) {
        slots[index] = Some(node);
    }
    trace!(at = %trail.join("."), len, "arrayified map");
    Ok(Node::Seq(FormSeq::from_slots(slots)))
}

fn sequence_len(
    map: &FormMap,
    indices: &[usize],
    max_index: usize,
    trail: &[String],
) -> Result<usize> {
    let max = indices.iter().copied().max().unwrap_or(0);
    let limit = || Error::index_limit(&trail.join("."), max, max_index);
    if max > max_index {
        return Err(limit());
    }
    let len = max.checked_add(1).ok_or_else(limit)?;

    let mut owners: Vec<Option<&str>> = empty_slots(len).ok_or_else(limit)?;
    for (key, &index) in map.keys().zip(indices) {
        if let Some(previous) = owners[index] {
            return Err(Error::index_collision(&trail.join("."), index, previous, key));
        }
        owners[index] = Some(key.as_str());
    }
    Ok(len)
}

/// `len` empty slots, or `None` when they cannot be allocated.
fn empty_slots<T: Clone>(len: usize) -> Option<Vec<Option<T>>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(len).ok()?;
    slots.resize(len, None);
    Some(slots)
}
