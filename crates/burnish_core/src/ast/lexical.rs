//! Lexical predicates.
//!
//! The reducer canonicalizes string-keyed properties and bracketed
//! subscripts into bare identifiers only when the string could have been
//! written as one; these predicates make that call.

/// Returns `true` if `id` is a reserved word (ECMA-262 §7.5.1), a future
/// reserved word, or one of the literal tokens `true` / `false` / `null`.
///
/// Future reserved words are included because some browsers refuse them as
/// identifiers even where the standard would allow it.
pub fn is_reserved_keyword(id: &str) -> bool {
    matches!(
        id,
        // Keywords
        "break" | "case" | "catch" | "continue" | "default" | "delete" | "do" | "else"
            | "finally" | "for" | "function" | "if" | "in" | "instanceof" | "new" | "return"
            | "switch" | "this" | "throw" | "try" | "typeof" | "var" | "void" | "while"
            | "with"
            // Future reserved words
            | "abstract" | "boolean" | "byte" | "char" | "class" | "const" | "debugger"
            | "double" | "enum" | "export" | "extends" | "final" | "float" | "goto"
            | "implements" | "import" | "int" | "interface" | "long" | "native" | "package"
            | "private" | "protected" | "public" | "short" | "static" | "super"
            | "synchronized" | "throws" | "transient" | "volatile"
            // Literal tokens
            | "true" | "false" | "null"
    )
}

/// Returns `true` for characters that may start an identifier.
fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphabetic()
}

/// Returns `true` for characters that may continue an identifier.
fn is_id_continue(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphanumeric()
}

/// Returns `true` if `id` is a well-formed, non-reserved identifier:
/// `[A-Za-z_$][A-Za-z0-9_$]*` and not a keyword.
///
/// Unicode escapes are not recognized.
pub fn is_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !is_id_start(first) || !chars.all(is_id_continue) {
        return false;
    }
    !is_reserved_keyword(id)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keywords() {
        for kw in [
            "break", "delete", "in", "instanceof", "typeof", "var", "with",
        ] {
            assert!(is_reserved_keyword(kw), "{kw} must be reserved");
        }
    }

    #[test]
    fn test_future_reserved_words() {
        for kw in ["abstract", "class", "enum", "goto", "synchronized", "volatile"] {
            assert!(is_reserved_keyword(kw), "{kw} must be reserved");
        }
    }

    #[test]
    fn test_literal_tokens_reserved() {
        assert!(is_reserved_keyword("true"));
        assert!(is_reserved_keyword("false"));
        assert!(is_reserved_keyword("null"));
    }

    #[test]
    fn test_not_reserved() {
        for id in ["foo", "eval", "bagofholding", "undefined", "let", "of"] {
            assert!(!is_reserved_keyword(id), "{id} must not be reserved");
        }
    }

    #[test]
    fn test_identifier_shapes() {
        assert!(is_identifier("foo"));
        assert!(is_identifier("_bar"));
        assert!(is_identifier("$"));
        assert!(is_identifier("a1"));
        assert!(is_identifier("$jQuery_0"));
    }

    #[test]
    fn test_identifier_rejections() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("2bad"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("a b"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier("null"));
    }

    #[test]
    fn test_identifier_non_ascii() {
        // Unicode letters are legal ECMAScript identifiers, but the
        // canonicalizer deliberately leaves them quoted.
        assert!(!is_identifier("über"));
        assert!(!is_identifier("名前"));
    }
}
