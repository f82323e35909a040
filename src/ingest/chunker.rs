//! Overlapping text chunker with separator-priority splitting
//!
//! Text is broken on the coarsest boundary available: paragraph first
//! (blank line), then line, then word. Pieces are then merged back into
//! chunks of roughly `size` characters, with consecutive chunks sharing
//! `overlap` characters of trailing/leading context so similarity search
//! is not blind to segment boundaries.

use std::collections::VecDeque;

/// Split priority, coarsest first. A piece that still exceeds the target
/// size after the last separator is a single oversized word and is emitted
/// whole rather than truncated mid-word.
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Split `text` into overlapping chunks of roughly `size` characters.
///
/// Deterministic: the same input, size and overlap always yield the same
/// sequence. `overlap` is clamped below `size` so the merge always makes
/// forward progress.
pub fn chunk(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let size = size.max(1);
    let overlap = overlap.min(size.saturating_sub(1));

    if text.is_empty() {
        return Vec::new();
    }

    let mut pieces = Vec::new();
    split_recursive(text, size, 0, &mut pieces);
    merge_pieces(pieces, size, overlap)
}

/// Recursively split on the separator priority list, collecting in-order
/// leaf pieces no longer than `size` (except oversized words).
///
/// `split_inclusive` keeps each separator attached to its piece, so
/// concatenating the leaves reproduces the input text exactly.
fn split_recursive<'a>(text: &'a str, size: usize, level: usize, out: &mut Vec<&'a str>) {
    if text.len() <= size || level >= SEPARATORS.len() {
        if !text.is_empty() {
            out.push(text);
        }
        return;
    }
    for part in text.split_inclusive(SEPARATORS[level]) {
        if part.len() <= size {
            out.push(part);
        } else {
            split_recursive(part, size, level + 1, out);
        }
    }
}

/// Merge consecutive pieces into chunks of at most `size` characters,
/// carrying up to `overlap` characters of trailing context into the next
/// chunk (rounded down to a piece boundary).
///
/// The flush check runs before each piece joins the window, so a merged
/// chunk never exceeds `size`; only a single piece already longer than
/// `size` (an oversized word) can.
fn merge_pieces(pieces: Vec<&str>, size: usize, overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    let mut window_len = 0usize;

    for piece in pieces {
        if window_len > 0 && window_len + piece.len() > size {
            push_chunk(&mut chunks, &window);
            // Retain the largest suffix of the window that fits in the
            // requested overlap, so the next chunk opens with trailing
            // context from this one.
            while window_len > overlap {
                match window.pop_front() {
                    Some(front) => window_len -= front.len(),
                    None => break,
                }
            }
        }
        window_len += piece.len();
        window.push_back(piece);
    }

    if window_len > 0 {
        push_chunk(&mut chunks, &window);
    }

    chunks
}

fn push_chunk(chunks: &mut Vec<String>, window: &VecDeque<&str>) {
    let joined: String = window.iter().copied().collect();
    let trimmed = joined.trim_end();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
