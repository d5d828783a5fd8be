//! Character-level state of the structural scan
//!
//! One value per position in the XML grammar. The transition function lives
//! on the lexer itself; two literal-match counters (comment terminator,
//! CDATA keyword) disambiguate states that the enum alone cannot.

use serde::{Deserialize, Serialize};

/// Current position in the XML grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum XmlCharState {
    /// Awaiting a new node
    Init,
    /// `<` of an open tag, before the name
    TagOpen,
    /// `>` ending an open tag that carried attributes
    TagOpenEnd,
    /// `>` directly after the element name
    TagOpenEndBare,
    /// Inside `<!--` ... `-->`
    Comment,
    /// `>` of a comment terminator
    CommentEnd,
    /// `<` of `<?`
    PiOpen,
    /// `?` of `<?`
    PiTargetStart,
    /// Inside the processing-instruction target name
    PiTarget,
    /// Whitespace between target and value
    PiAfterTarget,
    /// Inside the processing-instruction value
    PiValue,
    /// `?` of `?>`
    PiEnd,
    /// Matching the `<![CDATA[` keyword character by character
    CdataKeyword,
    /// The final `[` of `<![CDATA[`
    CdataOpenEnd,
    /// First `]` of `]]>`
    CdataCloseStart,
    /// `>` of `]]>`
    CdataCloseEnd,
    /// Inside a CDATA body
    CdataText,
    /// Inside a single-quoted attribute value
    AttrValueSq,
    /// Inside a double-quoted attribute value
    AttrValueDq,
    /// Closing `'` of an attribute value
    AttrValueSqEnd,
    /// Closing `"` of an attribute value
    AttrValueDqEnd,
    /// `<!` before the construct is known
    Bang,
    /// `>` closing a DTD declaration
    DtdEnd,
    /// Whitespace outside any construct
    Whitespace,
    /// `<` of `</`
    CloseTagOpen,
    /// `/` of `</`
    CloseTagSlash,
    /// Inside a close-tag name
    CloseTagName,
    /// `>` of a close tag
    CloseTagEnd,
    /// `/` of `/>` directly after the element name
    SelfCloseBare,
    /// `/` of `/>` after attributes
    SelfClose,
    /// Inside an element name
    ElementName,
    /// Whitespace after the element name
    WsAfterElementName,
    /// Inside an attribute name
    AttrName,
    /// Whitespace after an attribute name
    WsAfterAttrName,
    /// `=` after an attribute name
    AttrEquals,
    /// Whitespace after the `=`
    AttrEqualsWs,
    /// Whitespace between attributes
    WsBeforeAttrName,
    /// `{` opening a value template in a single-quoted value
    AvtSq,
    /// `{` opening a value template in a double-quoted value
    AvtDq,
    /// `{{`/`}}` escape in a single-quoted value
    EscapedBraceSq,
    /// `{{`/`}}` escape in a double-quoted value
    EscapedBraceDq,
    /// `{` opening a text value template
    TextTemplate,
    /// `{` opening a value template inside CDATA
    CdataTemplate,
    /// `{{`/`}}` escape in text
    EscapedBraceText,
    /// `{{`/`}}` escape inside CDATA
    EscapedBraceCdata,
    /// Inside `&` ... `;`
    EntityRef,
    /// `;` terminating an entity reference
    EntityRefEnd,
    /// Inside plain text
    Text,
}

/// The context an entity reference was entered from.
///
/// After the terminating `;` the scan resumes in exactly this context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityContext {
    Text,
    AttrSq,
    AttrDq,
}
