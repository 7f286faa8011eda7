use memchr::memchr_iter;
use smallvec::SmallVec;

use crate::constants::{INLINE_SEGMENTS, PATH_SEPARATOR};
use crate::{Error, Result};

/// Trimmed, non-empty segments of a dotted form key.
pub type Path<'a> = SmallVec<[&'a str; INLINE_SEGMENTS]>;

/// Splits `key` on `.`, trimming each segment and dropping the empty ones.
pub fn decompose(key: &str) -> Path<'_> {
    let mut path = Path::new();
    let mut start = 0;
    for end in memchr_iter(PATH_SEPARATOR, key.as_bytes()) {
        push_segment(&mut path, &key[start..end]);
        start = end + 1;
    }
    push_segment(&mut path, &key[start..]);
    path
}

/// Like [`decompose`], but a key without any segment is an error.
pub fn decompose_non_empty(key: &str) -> Result<Path<'_>> {
    let path = decompose(key);
    if path.is_empty() {
        return Err(Error::empty_path(key));
    }
    Ok(path)
}

#[inline]
fn push_segment<'a>(path: &mut Path<'a>, raw: &'a str) {
    let segment = raw.trim();
    if !segment.is_empty() {
        path.push(segment);
    }
}
