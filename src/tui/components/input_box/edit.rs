//! Pure editing helpers and dimensional constants for the InputBox.
//!
//! These are stateless helpers with no dependency on InputBox or CursorState.

/// Longest message the box accepts, in characters.
pub const MAX_CHARS: usize = 500;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to content (border + padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

/// Calculate the inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Prepare incoming text for a single-line buffer holding `current_chars`
/// characters: line breaks and tabs become spaces, other control characters
/// are dropped, and the result is cut so the buffer stays within `MAX_CHARS`.
pub(super) fn fit_to_limit(incoming: &str, current_chars: usize) -> String {
    let room = MAX_CHARS.saturating_sub(current_chars);
    incoming
        .chars()
        .filter_map(|c| match c {
            '\r' | '\n' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .take(room)
        .collect()
}
