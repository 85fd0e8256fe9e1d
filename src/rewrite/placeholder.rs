//! Placeholder numbering for a single query block.

/// Replaces a generic placeholder character with sequentially numbered tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRewriter {
    placeholder: char,
    token_prefix: String,
}

/// Outcome of rewriting one block of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenText {
    /// Text with every placeholder replaced
    pub text: String,
    /// Number of placeholders replaced
    pub replacements: usize,
}

impl Default for PlaceholderRewriter {
    fn default() -> Self {
        Self::new('?', "$")
    }
}

impl PlaceholderRewriter {
    /// Create a rewriter for the given placeholder and token prefix
    pub fn new(placeholder: char, token_prefix: impl Into<String>) -> Self {
        Self {
            placeholder,
            token_prefix: token_prefix.into(),
        }
    }

    /// Check whether the text holds at least one placeholder
    pub fn contains_placeholder(&self, text: &str) -> bool {
        text.contains(self.placeholder)
    }

    /// Number the placeholders of `text` from 1, left to right, across line breaks.
    pub fn rewrite(&self, text: &str) -> RewrittenText {
        let mut out = String::with_capacity(text.len() + 8);
        let mut counter = 0usize;

        for ch in text.chars() {
            if ch == self.placeholder {
                counter += 1;
                out.push_str(&self.token_prefix);
                out.push_str(&counter.to_string());
            } else {
                out.push(ch);
            }
        }

        RewrittenText {
            text: out,
            replacements: counter,
        }
    }
}
