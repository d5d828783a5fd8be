//! Structural (XML-level) tokenization of XSLT documents

pub mod attributes;
pub mod char_state;
pub mod lexer;
pub mod tokens;

pub use attributes::{EXPRESSION_ATTRIBUTES, TEMPLATE_ATTRIBUTES};
pub use char_state::XmlCharState;
pub use lexer::XslLexer;
pub use tokens::{Token, XslTokenKind, XSL_TOKEN_LEGEND};
