//! Chunked rope used as the printer's output buffer.
//!
//! Rendering a large tree concatenates many short fragments with the
//! occasional large, already-rendered subtree. [`Rope`] keeps both cheap:
//! short fragments append into the tail chunk, and whole ropes merge by
//! moving their chunks, never copying character data. The final string is
//! produced once by [`Rope::flatten`].

use smallvec::SmallVec;

/// An append-friendly aggregate of owned string chunks.
#[derive(Debug, Clone, Default)]
pub struct Rope {
    chunks: SmallVec<[String; 4]>,
    len: usize,
}

impl Rope {
    /// Creates an empty rope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the rope holds no text.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a string fragment into the tail chunk.
    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.len += text.len();
        match self.chunks.last_mut() {
            Some(last) => last.push_str(text),
            None => self.chunks.push(text.to_string()),
        }
    }

    /// Appends another rope by moving its chunks.
    pub fn append(&mut self, other: Rope) {
        self.len += other.len;
        self.chunks.extend(other.chunks);
    }

    /// Returns the first character of the aggregate, if any.
    pub fn first_char(&self) -> Option<char> {
        self.chunks.iter().find_map(|chunk| chunk.chars().next())
    }

    /// Concatenates all chunks into one `String`.
    pub fn flatten(self) -> String {
        let mut out = String::with_capacity(self.len);
        for chunk in &self.chunks {
            out.push_str(chunk);
        }
        out
    }
}

impl From<&str> for Rope {
    fn from(text: &str) -> Self {
        let mut rope = Rope::new();
        rope.push_str(text);
        rope
    }
}

impl From<String> for Rope {
    fn from(text: String) -> Self {
        let len = text.len();
        let mut chunks = SmallVec::new();
        if len > 0 {
            chunks.push(text);
        }
        Rope { chunks, len }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let rope = Rope::new();
        assert!(rope.is_empty());
        assert_eq!(rope.len(), 0);
        assert_eq!(rope.first_char(), None);
        assert_eq!(rope.flatten(), "");
    }

    #[test]
    fn test_push_str_accumulates() {
        let mut rope = Rope::new();
        rope.push_str("if(");
        rope.push_str("x");
        rope.push_str(")");
        assert_eq!(rope.len(), 5);
        assert_eq!(rope.flatten(), "if(x)");
    }

    #[test]
    fn test_append_moves_chunks() {
        let mut left = Rope::from("function ");
        let mut right = Rope::from("f");
        right.push_str("()");
        left.append(right);
        assert_eq!(left.len(), 13);
        assert_eq!(left.flatten(), "function f()");
    }

    #[test]
    fn test_append_empty() {
        let mut rope = Rope::from("x");
        rope.append(Rope::new());
        assert_eq!(rope.flatten(), "x");
    }

    #[test]
    fn test_first_char_skips_empty_chunks() {
        let mut rope = Rope::new();
        rope.append(Rope::from(String::new()));
        rope.push_str("{a}");
        assert_eq!(rope.first_char(), Some('{'));
    }

    #[test]
    fn test_from_string() {
        let rope = Rope::from(String::from("var x"));
        assert_eq!(rope.len(), 5);
        assert_eq!(rope.first_char(), Some('v'));
        assert_eq!(rope.flatten(), "var x");
    }
}
