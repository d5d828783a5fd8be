//! Attribute-name classification tables
//!
//! Two static name sets drive the delegation decisions: expression
//! attributes (the whole value is an embedded expression) and template
//! attributes (the value is literal text that may contain `{expr}`
//! segments). The lists are a compatibility surface and are reproduced
//! verbatim, duplicates and historical spellings included.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::expression::ExitCondition;

/// The attribute that is a full expression on any element.
const OPTIONS_ATTRIBUTE: &str = "saxon:options";

/// The expansion-control attribute on instruction elements.
const EXPAND_TEXT_ATTRIBUTE: &str = "expand-text";

/// The expansion-control attribute on plain elements.
const EXPAND_TEXT_ATTRIBUTE_PREFIXED: &str = "xsl:expand-text";

// Note: non-standard 'else', 'then', 'on-duplicates' can be used in Saxon 10.0
pub const EXPRESSION_ATTRIBUTES: [&str; 24] = [
    "context-item",
    "count",
    "else",
    "from",
    "group-adjacent",
    "group-by",
    "group-ending-with",
    "group-starting-with",
    "from",
    "for-each-item",
    "for-each-source",
    "initial-value",
    "key",
    "match",
    "namespace-context",
    "on-duplicates",
    "select",
    "test",
    "then",
    "use",
    "use-when",
    "value",
    "with-params",
    "xpath",
];

pub const TEMPLATE_ATTRIBUTES: [&str; 45] = [
    "allow-duplicate-names",
    "base-uri",
    "build-tree",
    "byte-order-mark",
    "case-order",
    "cdata-section-elements",
    "collation",
    "data-type",
    "doctype-public",
    "doctype-system",
    "encoding",
    "error-code",
    "escape-uri-attributes",
    "flags",
    "format",
    "grouping-separator",
    "grouping-size",
    "href",
    "html-version",
    "include-context-type",
    "indent",
    "item-separator",
    "json-node-output-method",
    "lang",
    "letter-value",
    "media-type",
    "method",
    "name",
    "namespace",
    "normalization-form",
    "omit-xml-declaration",
    "order",
    "ordinal",
    "ordinal-type",
    "output-version",
    "parameter-document",
    "regex",
    "separator",
    "schema-aware",
    "stable",
    "standalone",
    "suppress-indentaion",
    "terminate",
    "undeclar-prefixes",
    "start-at",
];

static EXPRESSION_ATTRIBUTE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| EXPRESSION_ATTRIBUTES.iter().copied().collect());

static TEMPLATE_ATTRIBUTE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TEMPLATE_ATTRIBUTES.iter().copied().collect());

pub fn is_expression_attribute(name: &str) -> bool {
    EXPRESSION_ATTRIBUTE_SET.contains(name)
}

pub fn is_template_attribute(name: &str) -> bool {
    TEMPLATE_ATTRIBUTE_SET.contains(name)
}

/// Flags resolved at the `=` following an attribute name, consumed when the
/// value's opening quote is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeClassification {
    /// The whole quoted value is one embedded expression.
    pub is_expression: bool,
    /// The value sets the template-expansion flag for descendant text.
    pub is_expand_text: bool,
}

/// Classify an attribute by name.
pub fn classify(name: &str, is_instruction_element: bool) -> AttributeClassification {
    if name == OPTIONS_ATTRIBUTE {
        return AttributeClassification {
            is_expression: true,
            is_expand_text: false,
        };
    }
    if is_instruction_element {
        if name == EXPAND_TEXT_ATTRIBUTE {
            AttributeClassification {
                is_expression: false,
                is_expand_text: true,
            }
        } else {
            AttributeClassification {
                is_expression: is_expression_attribute(name),
                is_expand_text: false,
            }
        }
    } else if name == EXPAND_TEXT_ATTRIBUTE_PREFIXED {
        AttributeClassification {
            is_expression: false,
            is_expand_text: true,
        }
    } else {
        AttributeClassification::default()
    }
}

/// Exit condition for a `{` opening a value template inside this attribute.
///
/// On plain elements every attribute is template-capable; on instruction
/// elements only template-table attributes and names starting `_` are.
pub fn avt_exit_condition(name: &str, is_instruction_element: bool) -> ExitCondition {
    if !is_instruction_element
        || name.starts_with('_')
        || is_template_attribute(name)
    {
        ExitCondition::CurlyBrace
    } else {
        ExitCondition::None
    }
}
