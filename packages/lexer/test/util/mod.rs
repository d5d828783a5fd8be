//! Shared test support
//!
//! A basic expression tokenizer stands in for the XPath side of the
//! handoff: it honors the full delegation contract (forward-only cursor,
//! stop at the first unescaped exit character, flat tokens appended to the
//! shared sink, no token across a newline) with deliberately simple token
//! classification.

use xslt_lexer::{ExitCondition, ExpressionTokenizer, LexPosition, Token, XslLexer};

pub const EXPRESSION_LEGEND: [&str; 6] = [
    "comment",
    "number",
    "name",
    "operator",
    "stringLiteral",
    "variable",
];

const NUMBER: u32 = 1;
const NAME: u32 = 2;
const OPERATOR: u32 = 3;
const STRING_LITERAL: u32 = 4;

pub struct BasicExpressionTokenizer;

impl BasicExpressionTokenizer {
    fn exit_char(exit: ExitCondition) -> Option<char> {
        match exit {
            ExitCondition::None => None,
            ExitCondition::SingleQuote => Some('\''),
            ExitCondition::DoubleQuote => Some('"'),
            ExitCondition::CurlyBrace => Some('}'),
        }
    }

    fn is_name_start(c: char) -> bool {
        c.is_alphabetic() || c == '_' || c == '$' || c == '@' || c == '*'
    }

    fn is_name_part(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
    }
}

impl ExpressionTokenizer for BasicExpressionTokenizer {
    fn legend(&self) -> &[&'static str] {
        &EXPRESSION_LEGEND
    }

    fn analyse(
        &mut self,
        document: &[char],
        exit: ExitCondition,
        position: &mut LexPosition,
        tokens: &mut Vec<Token>,
    ) {
        let terminator = Self::exit_char(exit);
        let mut i = position.document_offset;
        let mut line = position.line;
        let mut col = position.start_character;

        while i < document.len() {
            let c = document[i];
            if Some(c) == terminator {
                break;
            }
            if c == '\n' {
                line += 1;
                col = 0;
                i += 1;
                continue;
            }
            if c.is_whitespace() {
                col += 1;
                i += 1;
                continue;
            }
            if c == '\'' || c == '"' {
                // Expression string literal: the exit character does not
                // terminate inside it. Never crosses a newline.
                let start_col = col;
                i += 1;
                col += 1;
                while i < document.len() && document[i] != c && document[i] != '\n' {
                    i += 1;
                    col += 1;
                }
                if i < document.len() && document[i] == c {
                    i += 1;
                    col += 1;
                }
                tokens.push(Token::new(line, start_col, col - start_col, STRING_LITERAL));
                continue;
            }
            if c.is_ascii_digit() {
                let start_col = col;
                while i < document.len() && (document[i].is_ascii_digit() || document[i] == '.') {
                    i += 1;
                    col += 1;
                }
                tokens.push(Token::new(line, start_col, col - start_col, NUMBER));
                continue;
            }
            if Self::is_name_start(c) {
                let start_col = col;
                i += 1;
                col += 1;
                while i < document.len() && Self::is_name_part(document[i]) {
                    i += 1;
                    col += 1;
                }
                tokens.push(Token::new(line, start_col, col - start_col, NAME));
                continue;
            }
            tokens.push(Token::new(line, col, 1, OPERATOR));
            i += 1;
            col += 1;
        }

        position.line = line;
        position.start_character = col;
        position.document_offset = i;
    }
}

pub fn lexer() -> XslLexer {
    XslLexer::new(Box::new(BasicExpressionTokenizer))
}

pub fn tokenize(input: &str) -> Vec<Token> {
    lexer().analyse(input)
}

/// Render each token as `line:start:length name` against the combined legend.
pub fn humanize(input: &str) -> Vec<String> {
    let mut lx = lexer();
    let legend = lx.combined_legend();
    lx.analyse(input)
        .iter()
        .map(|t| {
            format!(
                "{}:{}:{} {}",
                t.line, t.start_character, t.length, legend[t.token_type as usize]
            )
        })
        .collect()
}

pub fn expected(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The §8 ordering invariants: strictly increasing positions, no overlap on
/// a line, no zero-length tokens.
pub fn assert_token_order(tokens: &[Token], input: &str) {
    for pair in tokens.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            b.line > a.line
                || (b.line == a.line && b.start_character >= a.start_character + a.length),
            "tokens overlap or are unordered: {:?} then {:?} in {:?}",
            a,
            b,
            input
        );
    }
    for t in tokens {
        assert!(t.length > 0, "zero-length token {:?} in {:?}", t, input);
    }
}

/// No token may span a line boundary.
pub fn assert_no_line_spans(tokens: &[Token], input: &str) {
    let line_lengths: Vec<u32> = input.split('\n').map(|l| l.chars().count() as u32).collect();
    for t in tokens {
        let line_len = line_lengths
            .get(t.line as usize)
            .copied()
            .unwrap_or_default();
        assert!(
            t.start_character + t.length <= line_len,
            "token {:?} exceeds line {} (length {}) in {:?}",
            t,
            t.line,
            line_len,
            input
        );
    }
}
