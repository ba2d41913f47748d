//! CSS subset understood by the fixture DOM.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`
//! (quoted or bare) and the descendant combinator. Anything else is rejected
//! rather than silently mismatched.

use crate::error::{Error, Result};
use crate::identifiers::NodeId;

use super::FixtureTree;

// ============================================================================
// Types
// ============================================================================

/// A parsed selector: compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CssSelector {
    parts: Vec<Compound>,
}

/// One compound selector such as `input.field[type='text']`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

// ============================================================================
// Parsing
// ============================================================================

impl CssSelector {
    /// Parses a selector.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for empty input or unsupported syntax.
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let parts = split_compounds(input)?
            .iter()
            .map(|raw| Compound::parse(raw, input))
            .collect::<Result<Vec<_>>>()?;

        if parts.is_empty() {
            return Err(Error::invalid_argument("empty CSS selector"));
        }

        Ok(Self { parts })
    }

    /// Returns `true` if `id` matches, checking ancestors for the leading
    /// compounds. Ancestors never cross a shadow boundary.
    pub(crate) fn matches(&self, tree: &FixtureTree, id: &NodeId) -> bool {
        let Some((last, leading)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(tree, id) {
            return false;
        }

        let mut pending = leading.iter().rev().peekable();
        let mut cursor = tree.light_parent(id);
        while let Some(compound) = pending.peek() {
            let Some(ancestor) = cursor else {
                return false;
            };
            if compound.matches(tree, &ancestor) {
                pending.next();
            }
            cursor = tree.light_parent(&ancestor);
        }
        true
    }
}

/// Splits on whitespace outside of attribute brackets.
fn split_compounds(input: &str) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match (c, quote, in_brackets) {
            ('\'' | '"', None, true) => {
                quote = Some(c);
                current.push(c);
            }
            (c, Some(q), _) if c == q => {
                quote = None;
                current.push(c);
            }
            ('[', None, false) => {
                in_brackets = true;
                current.push(c);
            }
            (']', None, true) => {
                in_brackets = false;
                current.push(c);
            }
            ('>' | '+' | '~' | ',' | ':', None, false) => {
                return Err(Error::invalid_argument(format!(
                    "unsupported CSS syntax {c:?} in {input:?}"
                )));
            }
            (c, None, false) if c.is_whitespace() => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if in_brackets || quote.is_some() {
        return Err(Error::invalid_argument(format!(
            "unterminated attribute selector in {input:?}"
        )));
    }
    if !current.is_empty() {
        parts.push(current);
    }
    Ok(parts)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

impl Compound {
    fn parse(raw: &str, whole: &str) -> Result<Self> {
        let invalid = || Error::invalid_argument(format!("invalid CSS selector {whole:?}"));
        let chars: Vec<char> = raw.chars().collect();
        let mut pos = 0;
        let mut compound = Compound::default();

        if chars.first() == Some(&'*') {
            pos = 1;
        } else if chars.first().is_some_and(|c| c.is_ascii_alphabetic()) {
            compound.tag = Some(read_ident(&chars, &mut pos).to_ascii_lowercase());
        }

        while pos < chars.len() {
            let marker = chars[pos];
            pos += 1;
            match marker {
                '#' => {
                    let id = read_ident(&chars, &mut pos);
                    if id.is_empty() {
                        return Err(invalid());
                    }
                    compound.id = Some(id);
                }
                '.' => {
                    let class = read_ident(&chars, &mut pos);
                    if class.is_empty() {
                        return Err(invalid());
                    }
                    compound.classes.push(class);
                }
                '[' => {
                    let end = chars[pos..]
                        .iter()
                        .position(|&c| c == ']')
                        .ok_or_else(invalid)?;
                    let body: String = chars[pos..pos + end].iter().collect();
                    pos += end + 1;
                    compound.attrs.push(parse_attr(&body).ok_or_else(invalid)?);
                }
                _ => return Err(invalid()),
            }
        }

        Ok(compound)
    }

    fn matches(&self, tree: &FixtureTree, id: &NodeId) -> bool {
        let Some(node) = tree.node(id) else {
            return false;
        };

        if let Some(tag) = &self.tag
            && !node.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(expected) = &self.id
            && node.attr("id") != Some(expected.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|class| node.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            Some(value) => node.attr(name) == Some(value.as_str()),
            None => node.attr(name).is_some(),
        })
    }
}

/// Parses `name`, `name=value`, `name='value'` or `name="value"`.
fn parse_attr(body: &str) -> Option<(String, Option<String>)> {
    let body = body.trim();
    match body.split_once('=') {
        None if !body.is_empty() && body.chars().all(is_ident_char) => {
            Some((body.to_string(), None))
        }
        None => None,
        Some((name, value)) => {
            let name = name.trim();
            if name.is_empty() || !name.chars().all(is_ident_char) {
                return None;
            }
            let value = value.trim();
            let unquoted = value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                .unwrap_or(value);
            Some((name.to_string(), Some(unquoted.to_string())))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound_parts() {
        let selector = CssSelector::parse("input.field[type='text']").expect("parse");
        assert_eq!(selector.parts.len(), 1);

        let compound = &selector.parts[0];
        assert_eq!(compound.tag.as_deref(), Some("input"));
        assert_eq!(compound.classes, ["field"]);
        assert_eq!(
            compound.attrs,
            [("type".to_string(), Some("text".to_string()))]
        );
    }

    #[test]
    fn test_parse_descendant_chain() {
        let selector = CssSelector::parse("table#productTable  tr td").expect("parse");
        assert_eq!(selector.parts.len(), 3);
        assert_eq!(selector.parts[0].id.as_deref(), Some("productTable"));
    }

    #[test]
    fn test_quoted_attribute_with_space() {
        let selector = CssSelector::parse("span[title=\"a b\"]").expect("parse");
        assert_eq!(selector.parts.len(), 1);
        assert_eq!(
            selector.parts[0].attrs,
            [("title".to_string(), Some("a b".to_string()))]
        );
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        assert!(CssSelector::parse("ul > li").is_err());
        assert!(CssSelector::parse("a:hover").is_err());
        assert!(CssSelector::parse("a, b").is_err());
        assert!(CssSelector::parse("input[type='text'").is_err());
        assert!(CssSelector::parse("   ").is_err());
    }

    #[test]
    fn test_universal_selector() {
        let selector = CssSelector::parse("*.active").expect("parse");
        assert!(selector.parts[0].tag.is_none());
        assert_eq!(selector.parts[0].classes, ["active"]);
    }
}
