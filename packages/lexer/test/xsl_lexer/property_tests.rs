//! Universal token-stream properties over arbitrary documents
//!
//! The lexer promises these for *all* inputs, well-formed or not: strict
//! `(line, startCharacter)` ordering, no overlap on a line, no token across
//! a newline, and identical output for identical input.

#[path = "../util/mod.rs"]
mod util;

use proptest::prelude::*;

/// The lexer's own trigger fragments: tags, delimiters, braces, entities,
/// names and junk, assembled in arbitrary order.
const FRAGMENTS: &[&str] = &[
    "<",
    ">",
    "/>",
    "</",
    "<?",
    "?>",
    "<!--",
    "-->",
    "<![CDATA[",
    "]]>",
    "\"",
    "'",
    "=",
    "{",
    "}",
    "{{",
    "}}",
    "&amp;",
    "&",
    ";",
    " ",
    "\n",
    "\t",
    "xsl:value-of",
    "xsl:text",
    "select",
    "href",
    "expand-text",
    "yes",
    "a",
    "1+1",
    "text",
];

fn document_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(FRAGMENTS), 0..48)
        .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn tokens_are_ordered_and_line_confined(doc in document_strategy()) {
        let tokens = util::tokenize(&doc);
        util::assert_token_order(&tokens, &doc);
        util::assert_no_line_spans(&tokens, &doc);
    }

    #[test]
    fn analyse_is_idempotent(doc in document_strategy()) {
        let mut lexer = util::lexer();
        let first = lexer.analyse(&doc);
        let second = lexer.analyse(&doc);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn analyse_never_panics_on_arbitrary_text(doc in "\\PC{0,120}") {
        let _ = util::tokenize(&doc);
    }
}
