//! The structural lexer
//!
//! A single forward scan over the document with one character of lookahead.
//! The scan owns the element context stack, the literal-match counters and
//! the handoff to the expression tokenizer; tokens from both sides are
//! appended to one shared sink in document order. Malformed input never
//! aborts the scan — unterminated constructs consume the remainder of the
//! input in the active state and flush at end of input.

use smallvec::SmallVec;

use crate::chars;
use crate::expression::{ExitCondition, ExpressionTokenizer, LexPosition};

use super::attributes::{self, AttributeClassification};
use super::char_state::{EntityContext, XmlCharState};
use super::tokens::{Token, XslTokenKind, XSL_TOKEN_LEGEND};

/// Per-open-element template-expansion context.
///
/// Holds the resolved flag: the local override merged with the inherited
/// default at push time, so lookup never walks ancestor frames.
#[derive(Debug, Clone, Copy)]
struct ElementFrame {
    expand_text: bool,
}

type ElementStack = SmallVec<[ElementFrame; 8]>;

/// Structural tokenizer for the XML level of an XSLT document.
///
/// Embedded expressions (full-expression attributes, `{expr}` value
/// templates) are handed to the [`ExpressionTokenizer`] supplied at
/// construction; everything else is classified by this state machine.
pub struct XslLexer {
    expression: Box<dyn ExpressionTokenizer>,
    /// Structural token types are numbered from here (one flat legend:
    /// expression types first, then [`XslTokenKind`] in order).
    xsl_type_offset: u32,
    /// Attach the raw scanner state to every emitted token.
    pub provide_char_level_state: bool,

    // Scan state, re-initialized on every analyse call.
    line_number: u32,
    line_char_count: u32,
    char_count: usize,
    comment_char_count: u8,
    cdata_char_count: u8,
    entity_context: EntityContext,
}

impl XslLexer {
    pub fn new(expression: Box<dyn ExpressionTokenizer>) -> Self {
        let xsl_type_offset = expression.legend().len() as u32;
        XslLexer {
            expression,
            xsl_type_offset,
            provide_char_level_state: false,
            line_number: 0,
            line_char_count: 0,
            char_count: 0,
            comment_char_count: 0,
            cdata_char_count: 0,
            entity_context: EntityContext::Text,
        }
    }

    /// First type code owned by the structural lexer.
    pub fn xsl_start_token_number(&self) -> u32 {
        self.xsl_type_offset
    }

    /// The flat combined legend: expression types, then structural types.
    pub fn combined_legend(&self) -> Vec<&'static str> {
        self.expression
            .legend()
            .iter()
            .copied()
            .chain(XSL_TOKEN_LEGEND.iter().copied())
            .collect()
    }

    /// Tokenize a whole document.
    ///
    /// Tokens come out sorted by `(line, start_character)`; no token spans a
    /// line boundary. Never fails: malformed input degrades to best-effort
    /// tokens.
    pub fn analyse(&mut self, text: &str) -> Vec<Token> {
        let document: Vec<char> = text.chars().collect();

        self.line_number = 0;
        self.line_char_count = 0;
        self.char_count = 0;
        self.comment_char_count = 0;
        self.cdata_char_count = 0;
        self.entity_context = EntityContext::Text;

        let mut result: Vec<Token> = Vec::new();
        let mut current_state = XmlCharState::Init;
        let mut token_chars: Vec<char> = Vec::new();
        let mut element_stack: ElementStack = SmallVec::new();
        let mut attribute_name = String::new();
        let mut attribute = AttributeClassification::default();
        let mut store_token = false;
        let mut is_instruction_element = false;
        let mut delegated_value = false;
        let mut expand_text_value: Option<bool> = Some(false);
        let mut token_start_char: u32 = 0;
        let mut attribute_name_token_added = false;

        while self.char_count < document.len() {
            let current = document[self.char_count];
            let next = document
                .get(self.char_count + 1)
                .copied()
                .unwrap_or(chars::EOF);
            let is_newline = current == chars::NEWLINE;

            let mut next_state = self.transition(current, next, current_state);
            // A delegation moved the cursor; skip the normal advance.
            let mut resumed = false;
            // Where the next run token starts, when not the current column.
            let mut run_token_start: Option<u32> = None;

            if next_state == current_state {
                if is_newline {
                    // Split multi-line tokens: one token per physical line,
                    // the newline itself belongs to none.
                    match next_state {
                        XmlCharState::PiValue => {
                            let length = self.line_char_count.saturating_sub(token_start_char);
                            self.add_char_token(
                                token_start_char,
                                length,
                                XslTokenKind::ProcessingInstrValue,
                                next_state,
                                &mut result,
                            );
                        }
                        XmlCharState::Comment => {
                            let start = token_start_char.saturating_sub(2);
                            let length = self.line_char_count.saturating_sub(start);
                            self.add_char_token(
                                start,
                                length,
                                XslTokenKind::XmlComment,
                                next_state,
                                &mut result,
                            );
                        }
                        XmlCharState::AttrValueSq | XmlCharState::AttrValueDq => {
                            let length = self.line_char_count.saturating_sub(token_start_char);
                            self.add_char_token(
                                token_start_char,
                                length,
                                XslTokenKind::AttributeValue,
                                next_state,
                                &mut result,
                            );
                        }
                        _ => {}
                    }
                } else if store_token {
                    // Element-name capture is capped: the instruction check
                    // only needs the first five characters.
                    let capped = matches!(
                        current_state,
                        XmlCharState::ElementName | XmlCharState::CloseTagName
                    );
                    if !capped || token_chars.len() < 5 {
                        token_chars.push(current);
                    }
                }
            } else {
                // Flush an in-progress text run before the boundary tokens.
                if current_state == XmlCharState::Text {
                    let length = self.line_char_count.saturating_sub(token_start_char);
                    self.add_char_token(
                        token_start_char,
                        length,
                        XslTokenKind::XmlText,
                        current_state,
                        &mut result,
                    );
                } else if current_state == XmlCharState::EscapedBraceText {
                    self.add_char_token(
                        token_start_char,
                        2,
                        XslTokenKind::XmlText,
                        current_state,
                        &mut result,
                    );
                }

                match next_state {
                    XmlCharState::TagOpen => {
                        self.add_char_token(
                            self.line_char_count,
                            1,
                            XslTokenKind::XmlPunctuation,
                            next_state,
                            &mut result,
                        );
                    }
                    XmlCharState::ElementName | XmlCharState::CloseTagName => {
                        expand_text_value = None;
                        if token_chars.len() < 5 {
                            token_chars.push(current);
                            store_token = true;
                        } else {
                            store_token = false;
                        }
                    }
                    XmlCharState::TagOpenEndBare
                    | XmlCharState::WsAfterElementName
                    | XmlCharState::SelfCloseBare
                    | XmlCharState::CloseTagEnd => {
                        if next_state == XmlCharState::TagOpenEndBare {
                            expand_text_value =
                                Some(push_element_frame(expand_text_value, &mut element_stack));
                        }
                        is_instruction_element = is_instruction_name(&token_chars);
                        if next_state == XmlCharState::CloseTagEnd {
                            element_stack.pop();
                        }
                        store_token = false;
                        token_chars.clear();

                        let kind = if is_instruction_element {
                            XslTokenKind::XslElementName
                        } else {
                            XslTokenKind::ElementName
                        };
                        self.add_new_token(token_start_char, kind, next_state, &mut result);
                        if next_state != XmlCharState::WsAfterElementName {
                            let punctuation_length = if next_state == XmlCharState::CloseTagEnd
                                || next_state == XmlCharState::TagOpenEndBare
                            {
                                1
                            } else {
                                2
                            };
                            self.add_char_token(
                                self.line_char_count,
                                punctuation_length,
                                XslTokenKind::XmlPunctuation,
                                next_state,
                                &mut result,
                            );
                        }
                    }
                    XmlCharState::PiAfterTarget => {
                        self.add_new_token(
                            token_start_char,
                            XslTokenKind::ProcessingInstrName,
                            next_state,
                            &mut result,
                        );
                    }
                    XmlCharState::PiEnd => {
                        self.add_new_token(
                            token_start_char,
                            XslTokenKind::ProcessingInstrValue,
                            current_state,
                            &mut result,
                        );
                        self.add_char_token(
                            self.line_char_count,
                            2,
                            XslTokenKind::XmlPunctuation,
                            next_state,
                            &mut result,
                        );
                    }
                    XmlCharState::CommentEnd => {
                        let start = token_start_char.saturating_sub(2);
                        self.add_new_token(start, XslTokenKind::XmlComment, next_state, &mut result);
                    }
                    XmlCharState::WsAfterAttrName => {
                        store_token = false;
                        self.add_new_token(
                            token_start_char,
                            XslTokenKind::AttributeName,
                            next_state,
                            &mut result,
                        );
                        attribute_name_token_added = true;
                    }
                    XmlCharState::AttrName => {
                        token_chars.push(current);
                        store_token = true;
                        attribute_name_token_added = false;
                    }
                    XmlCharState::AttrEquals => {
                        attribute_name = token_chars.iter().collect();
                        attribute = attributes::classify(&attribute_name, is_instruction_element);
                        if !attribute_name_token_added {
                            self.add_new_token(
                                token_start_char,
                                XslTokenKind::AttributeName,
                                next_state,
                                &mut result,
                            );
                        }
                        self.add_char_token(
                            self.line_char_count,
                            1,
                            XslTokenKind::AttributeEquals,
                            next_state,
                            &mut result,
                        );
                        token_chars.clear();
                        store_token = false;
                    }
                    XmlCharState::TagOpenEnd => {
                        expand_text_value =
                            Some(push_element_frame(expand_text_value, &mut element_stack));
                        self.add_char_token(
                            self.line_char_count,
                            1,
                            XslTokenKind::XmlPunctuation,
                            next_state,
                            &mut result,
                        );
                        store_token = false;
                        token_chars.clear();
                    }
                    XmlCharState::CloseTagOpen | XmlCharState::PiOpen | XmlCharState::SelfClose => {
                        self.add_char_token(
                            self.line_char_count,
                            2,
                            XslTokenKind::XmlPunctuation,
                            next_state,
                            &mut result,
                        );
                    }
                    XmlCharState::AttrValueSqEnd | XmlCharState::AttrValueDqEnd => {
                        if attribute.is_expand_text {
                            let value: String = token_chars.iter().collect();
                            expand_text_value =
                                Some(value == "yes" || value == "true" || value == "1");
                        }
                        if delegated_value {
                            // The whole value was tokenized by the expression
                            // side; only the closing quote is ours.
                            self.add_char_token(
                                self.line_char_count,
                                1,
                                XslTokenKind::AttributeValue,
                                next_state,
                                &mut result,
                            );
                            delegated_value = false;
                        } else {
                            self.add_new_token(
                                token_start_char,
                                XslTokenKind::AttributeValue,
                                next_state,
                                &mut result,
                            );
                        }
                        token_chars.clear();
                        store_token = false;
                    }
                    XmlCharState::AttrValueSq | XmlCharState::AttrValueDq => {
                        if matches!(
                            current_state,
                            XmlCharState::EscapedBraceSq | XmlCharState::EscapedBraceDq
                        ) {
                            // Returning from a brace escape: the value run
                            // continues, it does not restart here.
                            run_token_start = Some(token_start_char);
                        } else if attribute.is_expand_text {
                            store_token = true;
                        } else if attribute.is_expression {
                            self.add_char_token(
                                self.line_char_count,
                                1,
                                XslTokenKind::AttributeValue,
                                next_state,
                                &mut result,
                            );
                            let exit = if next_state == XmlCharState::AttrValueSq {
                                ExitCondition::SingleQuote
                            } else {
                                ExitCondition::DoubleQuote
                            };
                            let mut position = LexPosition::new(
                                self.line_number,
                                self.line_char_count + 1,
                                self.char_count + 1,
                            );
                            self.expression
                                .analyse(&document, exit, &mut position, &mut result);
                            self.resync(&position);
                            run_token_start = Some(self.line_char_count);
                            attribute.is_expression = false;
                            delegated_value = true;
                            resumed = true;
                        }
                    }
                    XmlCharState::AvtSq | XmlCharState::AvtDq => {
                        let exit =
                            attributes::avt_exit_condition(&attribute_name, is_instruction_element);
                        if exit != ExitCondition::None {
                            // Flush the literal prefix, brace included.
                            self.add_new_token(
                                token_start_char,
                                XslTokenKind::AttributeValue,
                                next_state,
                                &mut result,
                            );
                            let mut position = LexPosition::new(
                                self.line_number,
                                self.line_char_count + 1,
                                self.char_count + 1,
                            );
                            self.expression
                                .analyse(&document, exit, &mut position, &mut result);
                            self.resync(&position);
                            resumed = true;
                        }
                        // The closing brace (or the literal brace when no
                        // delegation applies) stays part of the value run.
                        run_token_start = Some(self.line_char_count);
                        if !resumed {
                            run_token_start = Some(token_start_char);
                        }
                        next_state = if next_state == XmlCharState::AvtSq {
                            XmlCharState::AttrValueSq
                        } else {
                            XmlCharState::AttrValueDq
                        };
                    }
                    XmlCharState::TextTemplate | XmlCharState::CdataTemplate => {
                        if next_state == XmlCharState::TextTemplate {
                            self.add_char_token(
                                self.line_char_count,
                                1,
                                XslTokenKind::XmlText,
                                current_state,
                                &mut result,
                            );
                        }
                        let expansion_enabled =
                            matches!(element_stack.last(), Some(frame) if frame.expand_text);
                        if expansion_enabled {
                            let mut position = LexPosition::new(
                                self.line_number,
                                self.line_char_count + 1,
                                self.char_count + 1,
                            );
                            self.expression.analyse(
                                &document,
                                ExitCondition::CurlyBrace,
                                &mut position,
                                &mut result,
                            );
                            self.resync(&position);
                            run_token_start = Some(self.line_char_count);
                            resumed = true;
                            next_state = if next_state == XmlCharState::CdataTemplate {
                                XmlCharState::CdataText
                            } else {
                                XmlCharState::Init
                            };
                        } else if next_state == XmlCharState::CdataTemplate {
                            next_state = XmlCharState::CdataText;
                        }
                    }
                    XmlCharState::EntityRef => {
                        if self.entity_context != EntityContext::Text {
                            // Flush the value prefix scanned so far.
                            let length = self.line_char_count.saturating_sub(token_start_char);
                            self.add_char_token(
                                token_start_char,
                                length,
                                XslTokenKind::AttributeValue,
                                next_state,
                                &mut result,
                            );
                        }
                    }
                    XmlCharState::EntityRefEnd => {
                        if self.entity_context != EntityContext::Text {
                            let length = self.line_char_count.saturating_sub(token_start_char) + 1;
                            self.add_char_token(
                                token_start_char,
                                length,
                                XslTokenKind::EntityRef,
                                next_state,
                                &mut result,
                            );
                        }
                        // Resume the exact context the entity was entered from.
                        next_state = match self.entity_context {
                            EntityContext::Text => XmlCharState::Init,
                            EntityContext::AttrSq => XmlCharState::AttrValueSq,
                            EntityContext::AttrDq => XmlCharState::AttrValueDq,
                        };
                        run_token_start = Some(self.line_char_count + 1);
                    }
                    XmlCharState::CdataOpenEnd => {
                        self.add_char_token(
                            token_start_char.saturating_sub(2),
                            9,
                            XslTokenKind::XmlPunctuation,
                            next_state,
                            &mut result,
                        );
                    }
                    XmlCharState::CdataCloseEnd => {
                        self.add_char_token(
                            token_start_char,
                            3,
                            XslTokenKind::XmlPunctuation,
                            next_state,
                            &mut result,
                        );
                    }
                    XmlCharState::EscapedBraceSq | XmlCharState::EscapedBraceDq => {
                        // Brace escapes stay inside the value run.
                        run_token_start = Some(token_start_char);
                    }
                    _ => {}
                }

                token_start_char = run_token_start.unwrap_or(self.line_char_count);
            }

            if !resumed {
                self.char_count += 1;
                if is_newline {
                    token_start_char = 0;
                    self.line_number += 1;
                    self.line_char_count = 0;
                } else {
                    self.line_char_count += 1;
                }
            }
            current_state = next_state;
        }

        self.flush_at_end(current_state, token_start_char, &mut result);
        result
    }

    /// Adopt the cursor position the expression tokenizer stopped at.
    ///
    /// The callee parks the cursor on the terminator; the main loop picks up
    /// with exactly that character. Forward progress is enforced even
    /// against a misbehaving callee.
    fn resync(&mut self, position: &LexPosition) {
        self.line_number = position.line;
        self.line_char_count = position.start_character;
        self.char_count = position.document_offset.max(self.char_count + 1);
    }

    /// Flush whatever run is still open when the input ends.
    fn flush_at_end(
        &mut self,
        state: XmlCharState,
        token_start_char: u32,
        result: &mut Vec<Token>,
    ) {
        let kind = match state {
            XmlCharState::Text | XmlCharState::EscapedBraceText => Some(XslTokenKind::XmlText),
            XmlCharState::Comment => Some(XslTokenKind::XmlComment),
            XmlCharState::AttrValueSq | XmlCharState::AttrValueDq => {
                Some(XslTokenKind::AttributeValue)
            }
            XmlCharState::PiValue => Some(XslTokenKind::ProcessingInstrValue),
            XmlCharState::PiTarget => Some(XslTokenKind::ProcessingInstrName),
            XmlCharState::ElementName | XmlCharState::CloseTagName => {
                Some(XslTokenKind::ElementName)
            }
            XmlCharState::AttrName => Some(XslTokenKind::AttributeName),
            _ => None,
        };
        if let Some(kind) = kind {
            let start = if state == XmlCharState::Comment {
                token_start_char.saturating_sub(2)
            } else {
                token_start_char
            };
            let length = self.line_char_count.saturating_sub(start);
            self.add_char_token(start, length, kind, state, result);
        }
    }

    /// The FSM transition function: pure in `(state, current, next)` except
    /// for the two literal-match counters and the entity context.
    fn transition(&mut self, current: char, next: char, existing: XmlCharState) -> XmlCharState {
        use XmlCharState::*;

        match existing {
            CloseTagOpen => CloseTagSlash,
            CloseTagSlash => CloseTagName,
            CloseTagName => {
                if current == chars::GT {
                    CloseTagEnd
                } else {
                    existing
                }
            }
            PiOpen => PiTargetStart,
            PiTargetStart => PiTarget,
            PiTarget => {
                if chars::is_whitespace(current) {
                    PiAfterTarget
                } else {
                    existing
                }
            }
            PiAfterTarget => {
                if chars::is_whitespace(current) {
                    existing
                } else if current == chars::QUESTION && next == chars::GT {
                    PiEnd
                } else {
                    PiValue
                }
            }
            PiValue => {
                if current == chars::QUESTION && next == chars::GT {
                    PiEnd
                } else {
                    existing
                }
            }
            Comment => match self.comment_char_count {
                // The second '-' of '<!--' is still in flight.
                0 => {
                    self.comment_char_count = 1;
                    existing
                }
                1 => {
                    if current == chars::MINUS && next == chars::MINUS {
                        self.comment_char_count = 2;
                    }
                    existing
                }
                2 => {
                    self.comment_char_count = 3;
                    existing
                }
                3 => {
                    if current == chars::GT {
                        CommentEnd
                    } else {
                        // '--' without '>': keep scanning, no terminator
                        // will match any more.
                        self.comment_char_count = 4;
                        existing
                    }
                }
                _ => existing,
            },
            Bang => {
                if current == chars::LBRACKET && next == 'C' {
                    self.cdata_char_count = 0;
                    CdataKeyword
                } else if current == chars::MINUS && next == chars::MINUS {
                    self.comment_char_count = 0;
                    Comment
                } else if current == chars::GT {
                    DtdEnd
                } else {
                    existing
                }
            }
            CdataKeyword => match self.cdata_char_count {
                // Pairs were verified one character early via lookahead.
                0 | 2 | 4 => {
                    self.cdata_char_count += 1;
                    existing
                }
                1 => {
                    if current == 'D' && next == 'A' {
                        self.cdata_char_count += 1;
                        existing
                    } else {
                        Init
                    }
                }
                3 => {
                    if current == 'T' && next == 'A' {
                        self.cdata_char_count += 1;
                        existing
                    } else {
                        Init
                    }
                }
                5 => {
                    if current == chars::LBRACKET {
                        self.cdata_char_count = 0;
                        CdataOpenEnd
                    } else {
                        Init
                    }
                }
                _ => Init,
            },
            CdataOpenEnd | CdataText => {
                if current == chars::RBRACKET && next == chars::RBRACKET {
                    self.cdata_char_count = 0;
                    CdataCloseStart
                } else if current == chars::LBRACE {
                    if next == chars::LBRACE {
                        EscapedBraceCdata
                    } else {
                        CdataTemplate
                    }
                } else if current == chars::RBRACE && next == chars::RBRACE {
                    EscapedBraceCdata
                } else {
                    existing
                }
            }
            CdataCloseStart => {
                if self.cdata_char_count == 0 {
                    self.cdata_char_count = 1;
                    existing
                } else if current == chars::GT {
                    self.cdata_char_count = 0;
                    CdataCloseEnd
                } else {
                    self.cdata_char_count = 0;
                    Init
                }
            }
            TagOpen => {
                if current == chars::GT {
                    TagOpenEnd
                } else {
                    ElementName
                }
            }
            ElementName => {
                if chars::is_whitespace(current) {
                    WsAfterElementName
                } else if current == chars::GT {
                    TagOpenEndBare
                } else if current == chars::SLASH && next == chars::GT {
                    SelfCloseBare
                } else {
                    existing
                }
            }
            WsAfterElementName | AttrValueSqEnd | AttrValueDqEnd | WsBeforeAttrName => {
                if chars::is_whitespace(current) {
                    if existing == WsAfterElementName {
                        existing
                    } else {
                        WsBeforeAttrName
                    }
                } else if current == chars::GT {
                    TagOpenEnd
                } else if current == chars::SLASH && next == chars::GT {
                    SelfClose
                } else {
                    AttrName
                }
            }
            AttrName => {
                if chars::is_whitespace(current) {
                    WsAfterAttrName
                } else if current == chars::EQ {
                    AttrEquals
                } else {
                    existing
                }
            }
            WsAfterAttrName => {
                if current == chars::EQ {
                    AttrEquals
                } else {
                    existing
                }
            }
            AttrEquals | AttrEqualsWs => {
                if chars::is_whitespace(current) {
                    AttrEqualsWs
                } else if current == chars::DQ {
                    AttrValueDq
                } else if current == chars::SQ {
                    AttrValueSq
                } else {
                    existing
                }
            }
            AttrValueDq => {
                if current == chars::DQ {
                    AttrValueDqEnd
                } else if current == chars::LBRACE {
                    if next == chars::LBRACE {
                        EscapedBraceDq
                    } else {
                        AvtDq
                    }
                } else if current == chars::RBRACE && next == chars::RBRACE {
                    EscapedBraceDq
                } else if current == chars::AMPERSAND {
                    self.entity_context = EntityContext::AttrDq;
                    EntityRef
                } else {
                    existing
                }
            }
            AttrValueSq => {
                if current == chars::SQ {
                    AttrValueSqEnd
                } else if current == chars::LBRACE {
                    if next == chars::LBRACE {
                        EscapedBraceSq
                    } else {
                        AvtSq
                    }
                } else if current == chars::RBRACE && next == chars::RBRACE {
                    EscapedBraceSq
                } else if current == chars::AMPERSAND {
                    self.entity_context = EntityContext::AttrSq;
                    EntityRef
                } else {
                    existing
                }
            }
            EscapedBraceDq => AttrValueDq,
            EscapedBraceSq => AttrValueSq,
            EscapedBraceText => Init,
            EscapedBraceCdata => CdataText,
            EntityRef => {
                if current == chars::SEMICOLON {
                    EntityRefEnd
                } else if chars::is_whitespace(current) {
                    // Not an entity after all; reclassify the character.
                    self.dispatch_char(current, next, false)
                } else {
                    existing
                }
            }
            Text => self.dispatch_char(current, next, true),
            // The '>' of '?>' and '/>' is already covered by the
            // punctuation token; consume it silently.
            PiEnd | SelfClose | SelfCloseBare => Init,
            _ => self.dispatch_char(current, next, false),
        }
    }

    /// Dispatch a character while awaiting a new node (or inside text).
    fn dispatch_char(&mut self, current: char, next: char, is_text: bool) -> XmlCharState {
        use XmlCharState::*;

        match current {
            chars::SPACE | chars::TAB | chars::RETURN => {
                if is_text {
                    Text
                } else {
                    Whitespace
                }
            }
            chars::NEWLINE => Whitespace,
            chars::LT => match next {
                chars::QUESTION => PiOpen,
                chars::BANG => Bang,
                chars::SLASH => CloseTagOpen,
                _ => TagOpen,
            },
            chars::LBRACE => {
                if next == chars::LBRACE {
                    EscapedBraceText
                } else {
                    TextTemplate
                }
            }
            chars::RBRACE if next == chars::RBRACE => EscapedBraceText,
            chars::AMPERSAND => {
                self.entity_context = EntityContext::Text;
                EntityRef
            }
            _ => Text,
        }
    }

    /// Emit a token from `token_start_char` up to the current column;
    /// comment and attribute-value tokens include the current character
    /// (their closing delimiter).
    fn add_new_token(
        &mut self,
        token_start_char: u32,
        kind: XslTokenKind,
        state: XmlCharState,
        result: &mut Vec<Token>,
    ) {
        let mut length = self.line_char_count.saturating_sub(token_start_char);
        if kind == XslTokenKind::XmlComment || kind == XslTokenKind::AttributeValue {
            length += 1;
        }
        self.add_char_token(token_start_char, length, kind, state, result);
    }

    /// Emit a token with an explicit span. Zero-length spans are dropped.
    fn add_char_token(
        &mut self,
        start_character: u32,
        length: u32,
        kind: XslTokenKind,
        state: XmlCharState,
        result: &mut Vec<Token>,
    ) {
        if length == 0 {
            return;
        }
        let mut token = Token::new(
            self.line_number,
            start_character,
            length,
            self.xsl_type_offset + kind as u32,
        );
        if self.provide_char_level_state {
            token.char_type = Some(state);
        }
        result.push(token);
    }
}

/// Resolve and push the template-expansion flag for a newly opened element:
/// an explicit attribute wins, otherwise the parent's resolved value,
/// otherwise disabled.
fn push_element_frame(expand_text_value: Option<bool>, stack: &mut ElementStack) -> bool {
    let resolved = expand_text_value
        .unwrap_or_else(|| matches!(stack.last(), Some(frame) if frame.expand_text));
    stack.push(ElementFrame {
        expand_text: resolved,
    });
    resolved
}

/// Instruction elements are exactly those whose captured name prefix is
/// `xsl:` followed by at least one more character.
fn is_instruction_name(name: &[char]) -> bool {
    name.len() > 4 && name[0] == 'x' && name[1] == 's' && name[2] == 'l' && name[3] == ':'
}
