use crate::node::{FormMap, FormSeq, Leaf, Node, NodeKind};
use crate::{Error, Result};

// Stand-ins returned for missing children.
static EMPTY_MAP: FormMap = FormMap::new();
static EMPTY_SEQ: FormSeq = FormSeq::new();

/// Read-only lookups shared by both container kinds.
///
/// A missing child is never an error: `map` and `seq` hand back an empty
/// container, `values` an empty slice and `value` an empty string, so chains
/// like `tree.seq("fields")?.map(0)?.value("label")?` stay short. Asking for
/// the wrong kind of node fails with [`ErrorKind::KindMismatch`].
///
/// [`ErrorKind::KindMismatch`]: crate::ErrorKind::KindMismatch
pub trait Navigate {
    type Key<'k>: Copy;

    /// The node stored under `key`, if any.
    fn child(&self, key: Self::Key<'_>) -> Option<&Node>;

    /// Renders `key` for error messages.
    fn locate(key: Self::Key<'_>) -> String;

    fn map(&self, key: Self::Key<'_>) -> Result<&FormMap> {
        match self.child(key) {
            None => Ok(&EMPTY_MAP),
            Some(Node::Map(map)) => Ok(map),
            Some(other) => Err(mismatch::<Self>(NodeKind::Map, other, key)),
        }
    }

    fn seq(&self, key: Self::Key<'_>) -> Result<&FormSeq> {
        match self.child(key) {
            None => Ok(&EMPTY_SEQ),
            Some(Node::Seq(seq)) => Ok(seq),
            Some(other) => Err(mismatch::<Self>(NodeKind::Seq, other, key)),
        }
    }

    fn leaf(&self, key: Self::Key<'_>) -> Result<Option<&Leaf>> {
        match self.child(key) {
            None => Ok(None),
            Some(Node::Leaf(leaf)) => Ok(Some(leaf)),
            Some(other) => Err(mismatch::<Self>(NodeKind::Leaf, other, key)),
        }
    }

    /// Every value stored under `key`; a single value comes back as a
    /// one-element slice.
    fn values(&self, key: Self::Key<'_>) -> Result<&[String]> {
        Ok(self.leaf(key)?.map(Leaf::values).unwrap_or(&[]))
    }

    /// The first value stored under `key`, or `""` when there is none.
    fn value(&self, key: Self::Key<'_>) -> Result<&str> {
        Ok(self.leaf(key)?.map(Leaf::first).unwrap_or(""))
    }
}

fn mismatch<N: Navigate + ?Sized>(expected: NodeKind, found: &Node, key: N::Key<'_>) -> Error {
    let at = N::locate(key);
    Error::kind_mismatch(expected.as_str(), found.kind().as_str(), &at).with_key(at)
}

impl Navigate for FormMap {
    type Key<'k> = &'k str;

    fn child(&self, key: Self::Key<'_>) -> Option<&Node> {
        self.get(key)
    }

    fn locate(key: Self::Key<'_>) -> String {
        format!("{key:?}")
    }
}

impl Navigate for FormSeq {
    type Key<'k> = usize;

    fn child(&self, index: Self::Key<'_>) -> Option<&Node> {
        self.get(index)
    }

    fn locate(index: Self::Key<'_>) -> String {
        format!("[{index}]")
    }
}
