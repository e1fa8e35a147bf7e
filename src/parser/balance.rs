//! Parenthesis counting and backward matching-block discovery.

/// A parenthesized group inside a larger string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Byte offset of the opening `(`.
    pub start: usize,
    /// The group, parentheses included.
    pub text: &'a str,
}

impl<'a> Block<'a> {
    /// The group without its outer parentheses.
    pub fn inner(&self) -> &'a str {
        &self.text[1..self.text.len() - 1]
    }
}

/// Number of `(`/`)` pairs in `s`, or `None` when they do not balance.
pub fn count_pairs(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pairs = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                pairs += 1;
            }
            _ => {}
        }
    }
    (depth == 0).then_some(pairs)
}

/// The last properly nested parenthesized group in `s`.
///
/// Scans backward from just before the last `)`: every `)` raises the
/// nesting level, every `(` lowers it, and the `(` met at level zero opens
/// the group. Returns `None` when `s` has no parentheses or is unbalanced.
pub fn last_block(s: &str) -> Option<Block<'_>> {
    if count_pairs(s)? == 0 {
        return None;
    }
    let close = s.rfind(')')?;
    let mut level = 0usize;
    for (i, c) in s[..close].char_indices().rev() {
        match c {
            ')' => level += 1,
            '(' if level == 0 => {
                return Some(Block {
                    start: i,
                    text: &s[i..=close],
                });
            }
            '(' => level -= 1,
            _ => {}
        }
    }
    None
}
