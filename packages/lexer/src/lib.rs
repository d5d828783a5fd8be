#![deny(clippy::all)]

//! Semantic tokenizer for XSLT documents.
//!
//! XSLT is two grammars in one file: an XML-structured outer grammar and an
//! expression grammar (XPath) embedded in attribute values, attribute value
//! templates and text templates. This crate owns the outer grammar: a
//! single-pass character state machine that classifies the XML syntax,
//! tracks the inheritable `expand-text` context per element, and hands
//! embedded expressions to an external [`ExpressionTokenizer`] through a
//! narrow cursor-based protocol. Both sides append to one flat token
//! sequence, ordered by `(line, startCharacter)` and ready for a semantic
//! token builder.
//!
//! The output is tokens, not a tree: there is no validation, no error
//! reporting, and malformed input degrades to best-effort tokens.

pub mod chars;
pub mod expression;
pub mod xsl_lexer;

pub use expression::{ExitCondition, ExpressionTokenizer, LexPosition};
pub use xsl_lexer::{Token, XmlCharState, XslLexer, XslTokenKind, XSL_TOKEN_LEGEND};
