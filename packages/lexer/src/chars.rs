//! Character constants used throughout the lexer

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const NEWLINE: char = '\n';
pub const RETURN: char = '\r';
pub const SPACE: char = ' ';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const AMPERSAND: char = '&';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const SLASH: char = '/';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';

// Brackets and braces
pub const LBRACKET: char = '[';
pub const RBRACKET: char = ']';
pub const UNDERSCORE: char = '_';
pub const LBRACE: char = '{';
pub const RBRACE: char = '}';

/// Check if character is XML whitespace
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == NEWLINE || ch == RETURN
}
