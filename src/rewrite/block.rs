//! Query block detection.
//!
//! A file is scanned line by line through a two-state machine. A line that
//! contains one of the configured triggers opens a block; every following
//! line joins it until the configured [`BlockClosing`] rule decides the
//! invocation has ended. Closed blocks are handed to the
//! [`PlaceholderRewriter`] as one piece of text, so numbering restarts for
//! each block and runs across the block's line breaks.
//!
//! Parentheses are counted on raw text. String literals, comments and
//! template expressions are not understood, which is why both closing rules
//! are heuristics.

use std::mem;

use tracing::{debug, warn};

use crate::core::config::{BlockClosing, RewriteConfig};

use super::placeholder::PlaceholderRewriter;

/// One detected query block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBlock {
    /// 1-based line number of the trigger line
    pub start_line: usize,
    /// 1-based line number of the line that closed the block
    pub end_line: usize,
    /// Original text of the block, line terminators included
    pub text: String,
    /// Whether the block holds at least one placeholder
    pub has_placeholder: bool,
    /// Placeholders replaced in this block
    pub replacements: usize,
}

/// Result of running the extractor over a whole file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileRewrite {
    /// Rebuilt file content
    pub content: String,
    /// Closed blocks in file order
    pub blocks: Vec<QueryBlock>,
    /// Blocks cut short by a new trigger before they closed
    pub abandoned_blocks: usize,
    /// Block still open when the input ended
    pub unterminated_block: Option<usize>,
}

impl FileRewrite {
    /// True when at least one block was rewritten
    pub fn is_modified(&self) -> bool {
        self.blocks.iter().any(|block| block.has_placeholder)
    }

    /// Total placeholders replaced across all blocks
    pub fn replacements(&self) -> usize {
        self.blocks.iter().map(|block| block.replacements).sum()
    }

    /// Number of blocks that were rewritten
    pub fn rewritten_blocks(&self) -> usize {
        self.blocks.iter().filter(|block| block.has_placeholder).count()
    }
}

/// Lines collected since the last trigger
#[derive(Debug)]
struct PendingBlock {
    start_line: usize,
    text: String,
    depth: i64,
}

impl PendingBlock {
    fn start(line_no: usize, line: &str) -> Self {
        Self {
            start_line: line_no,
            text: line.to_string(),
            depth: paren_balance(line),
        }
    }

    /// Append a continuation line and report whether it closes the block.
    fn push(&mut self, line: &str, closing: BlockClosing) -> bool {
        self.text.push_str(line);
        let balance = paren_balance(line);
        match closing {
            BlockClosing::PerLine => balance < 0,
            BlockClosing::Balanced => {
                self.depth += balance;
                self.depth <= 0
            }
        }
    }
}

#[derive(Debug)]
enum BlockState {
    Outside,
    InBlock(PendingBlock),
}

/// `(` count minus `)` count of a single line.
fn paren_balance(line: &str) -> i64 {
    line.chars().fold(0, |acc, ch| match ch {
        '(' => acc + 1,
        ')' => acc - 1,
        _ => acc,
    })
}

/// Scans file content for query blocks and rewrites their placeholders.
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    triggers: Vec<String>,
    closing: BlockClosing,
    rewriter: PlaceholderRewriter,
}

impl Default for BlockExtractor {
    fn default() -> Self {
        Self::from_config(&RewriteConfig::default())
    }
}

impl BlockExtractor {
    /// Build an extractor from the run configuration
    pub fn from_config(config: &RewriteConfig) -> Self {
        Self {
            triggers: config.triggers.clone(),
            closing: config.block_closing,
            rewriter: PlaceholderRewriter::new(config.placeholder, config.token_prefix.clone()),
        }
    }

    /// Block closing rule in use
    pub fn closing(&self) -> BlockClosing {
        self.closing
    }

    fn is_trigger(&self, line: &str) -> bool {
        self.triggers.iter().any(|trigger| line.contains(trigger.as_str()))
    }

    /// Rebuild `content` with the placeholders of every closed block numbered.
    ///
    /// Text outside blocks, abandoned blocks and an unterminated trailing
    /// block are copied through unchanged, so the output always has the same
    /// lines as the input in the same order.
    pub fn rewrite(&self, content: &str) -> FileRewrite {
        let mut result = FileRewrite {
            content: String::with_capacity(content.len() + content.len() / 16),
            ..FileRewrite::default()
        };
        let mut state = BlockState::Outside;

        for (index, line) in content.split_inclusive('\n').enumerate() {
            let line_no = index + 1;

            if self.is_trigger(line) {
                if let BlockState::InBlock(pending) = mem::replace(&mut state, BlockState::Outside)
                {
                    debug!(
                        "Block opened at line {} abandoned by new trigger at line {}",
                        pending.start_line, line_no
                    );
                    result.abandoned_blocks += 1;
                    result.content.push_str(&pending.text);
                }

                let pending = PendingBlock::start(line_no, line);
                if self.closing == BlockClosing::Balanced && pending.depth <= 0 {
                    self.emit(pending, line_no, &mut result);
                } else {
                    state = BlockState::InBlock(pending);
                }
                continue;
            }

            let closed = match &mut state {
                BlockState::Outside => {
                    result.content.push_str(line);
                    false
                }
                BlockState::InBlock(pending) => pending.push(line, self.closing),
            };

            if closed {
                if let BlockState::InBlock(pending) = mem::replace(&mut state, BlockState::Outside)
                {
                    self.emit(pending, line_no, &mut result);
                }
            }
        }

        if let BlockState::InBlock(pending) = state {
            warn!(
                "Query block starting at line {} never closed; left unchanged",
                pending.start_line
            );
            result.unterminated_block = Some(pending.start_line);
            result.content.push_str(&pending.text);
        }

        result
    }

    fn emit(&self, pending: PendingBlock, end_line: usize, result: &mut FileRewrite) {
        let has_placeholder = self.rewriter.contains_placeholder(&pending.text);
        let replacements = if has_placeholder {
            let rewritten = self.rewriter.rewrite(&pending.text);
            result.content.push_str(&rewritten.text);
            rewritten.replacements
        } else {
            result.content.push_str(&pending.text);
            0
        };

        debug!(
            "Query block lines {}-{}: {} placeholder(s) replaced",
            pending.start_line, end_line, replacements
        );

        result.blocks.push(QueryBlock {
            start_line: pending.start_line,
            end_line,
            text: pending.text,
            has_placeholder,
            replacements,
        });
    }
}
