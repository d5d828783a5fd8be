//! Expression delegation protocol
//!
//! The structural lexer does not understand the embedded expression grammar.
//! When it reaches a delegation point (a full-expression attribute value, or
//! the `{` of an attribute/text value template) it hands control to an
//! [`ExpressionTokenizer`] together with a cursor and an exit condition, and
//! resumes its own scan at the exact character the callee stopped on.

use serde::{Deserialize, Serialize};

use crate::xsl_lexer::tokens::Token;

/// The unescaped character that ends a delegated scan.
///
/// The callee stops *at* the matching character without consuming it, so the
/// terminator itself is always tokenized by the structural lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitCondition {
    None,
    SingleQuote,
    DoubleQuote,
    CurlyBrace,
}

/// Cursor shared across the structural/expression boundary.
///
/// `document_offset` is an absolute character index into the document being
/// analysed; `line` and `start_character` always describe the character at
/// that offset. Whichever lexer currently owns the cursor may only move it
/// forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexPosition {
    pub line: u32,
    pub start_character: u32,
    pub document_offset: usize,
}

impl LexPosition {
    pub fn new(line: u32, start_character: u32, document_offset: usize) -> Self {
        LexPosition {
            line,
            start_character,
            document_offset,
        }
    }
}

/// The embedded-expression tokenizer, seen through the handoff contract.
///
/// `analyse` scans `document` from `position.document_offset`, appends its
/// tokens directly to the shared `tokens` sink (flat, already sorted by
/// position), and returns with `position` parked on the first unescaped
/// character matching `exit` — or at end of input if none occurs. The callee
/// must keep `position.line`/`start_character` synchronized with
/// `document_offset` as it advances.
pub trait ExpressionTokenizer {
    /// The published token-type legend. Structural token types are numbered
    /// starting at `legend().len()`.
    fn legend(&self) -> &[&'static str];

    fn analyse(
        &mut self,
        document: &[char],
        exit: ExitCondition,
        position: &mut LexPosition,
        tokens: &mut Vec<Token>,
    );
}
