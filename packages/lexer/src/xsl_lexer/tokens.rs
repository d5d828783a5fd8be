//! Semantic tokens emitted by the structural lexer

use serde::{Deserialize, Serialize};

use super::char_state::XmlCharState;

/// Structural token categories.
///
/// Numbered from zero in declaration order; on the wire each is offset by
/// the length of the expression tokenizer's legend so that both lexers share
/// one flat numbering (expression types first, then these).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum XslTokenKind {
    AttributeName = 0,
    AttributeEquals = 1,
    AttributeValue = 2,
    ElementName = 3,
    ElementValue = 4,
    ProcessingInstrName = 5,
    ProcessingInstrValue = 6,
    EntityRef = 7,
    XmlComment = 8,
    XmlPunctuation = 9,
    XslElementName = 10,
    XmlText = 11,
}

/// Legend names for the structural categories, in declaration order.
pub const XSL_TOKEN_LEGEND: [&str; 12] = [
    "attributeName",
    "attributeEquals",
    "attributeValue",
    "elementName",
    "elementValue",
    "processingInstrName",
    "processingInstrValue",
    "entityRef",
    "xmlComment",
    "xmlPunctuation",
    "xslElementName",
    "xmlText",
];

/// A semantic token: position, length and combined-legend type code.
///
/// Never spans a line boundary. `value` is carried for wire compatibility
/// and is always empty. `char_type` is the raw scanner state at emission
/// time, attached only when the lexer runs with
/// `provide_char_level_state` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub line: u32,
    pub start_character: u32,
    pub length: u32,
    pub token_type: u32,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_type: Option<XmlCharState>,
}

impl Token {
    pub fn new(line: u32, start_character: u32, length: u32, token_type: u32) -> Self {
        Token {
            line,
            start_character,
            length,
            token_type,
            value: String::new(),
            char_type: None,
        }
    }
}
