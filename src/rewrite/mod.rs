//! Query block detection and placeholder numbering.
//!
//! ```text
//! file content ──► BlockExtractor ──► QueryBlock ──► PlaceholderRewriter ──► FileRewrite
//!                  (trigger + parens)                 (? → $1, $2, …)
//! ```

pub mod block;
pub mod placeholder;


pub use block::{BlockExtractor, FileRewrite, QueryBlock};
pub use placeholder::{PlaceholderRewriter, RewrittenText};
