pub const PATH_SEPARATOR: u8 = b'.';

/// Inline capacity for decomposed paths; deeper keys spill to the heap.
pub const INLINE_SEGMENTS: usize = 8;

pub const DEFAULT_MAX_INDEX: usize = 10_000;

#[inline]
pub fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}
