//! Nested trees from dotted form field names.
//!
//! Decoded HTML forms arrive as a flat mapping of keys to value lists. When
//! the keys follow the `fields.0.content.3.postcode` convention, [`FormTree`]
//! rebuilds the nesting they describe: segments become map keys, and any map
//! whose keys are all integers becomes a sequence.
//!
//! ```
//! use formtree::{FormTree, Navigate};
//!
//! let tree = FormTree::from_urlencoded(
//!     b"fields.0.label=HQ&fields.1.content.1.postcode=pc+2",
//! )?;
//! assert_eq!(tree.seq("fields")?.map(0)?.value("label")?, "HQ");
//! assert_eq!(
//!     tree.seq("fields")?.map(1)?.seq("content")?.map(1)?.value("postcode")?,
//!     "pc 2"
//! );
//! # Ok::<(), formtree::Error>(())
//! ```

pub mod arrayify;
pub mod build;
pub mod constants;
pub mod error;
pub mod form;
pub mod navigate;
pub mod node;
pub mod options;
pub mod path;
pub mod serde;
pub mod tree;

pub use crate::error::{Error, ErrorKind};
pub use crate::form::{group_pairs, parse_json_form, parse_urlencoded, FormValues};
pub use crate::navigate::Navigate;
pub use crate::node::{FormMap, FormSeq, Leaf, Node, NodeKind};
pub use crate::options::BuildOptions;
pub use crate::path::{decompose, Path};
pub use crate::serde::{from_form, from_urlencoded};
pub use crate::tree::FormTree;

pub type Result<T> = std::result::Result<T, Error>;
