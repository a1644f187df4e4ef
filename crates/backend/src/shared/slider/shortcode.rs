//! Shortcode expansion for storefront page content.
//!
//! Only self-closing tags are recognised: `[tag attr="value" other='x' bare=y]`.
//! Attribute names are lower-cased; positional attributes are ignored.

use std::collections::HashMap;

use regex::Regex;

pub const SLIDER_SHORTCODE: &str = "wcs_category_slider";

pub type ShortcodeAttrs = HashMap<String, String>;

/// `name="v"`, `name='v'`, `name=v`, then quoted or bare positional values
const ATTRIBUTE_PATTERN: &str = r#"([\w-]+)\s*=\s*"([^"]*)"(?:\s|$)|([\w-]+)\s*=\s*'([^']*)'(?:\s|$)|([\w-]+)\s*=\s*([^\s'"]+)(?:\s|$)|"[^"]*"(?:\s|$)|'[^']*'(?:\s|$)|\S+(?:\s|$)"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Shortcode(ShortcodeAttrs),
}

/// Tokenizer for a single shortcode tag
#[derive(Debug, Clone)]
pub struct ShortcodeParser {
    tag: Regex,
    attribute: Regex,
}

impl ShortcodeParser {
    pub fn new(tag: &str) -> Result<Self, regex::Error> {
        // the tag name must end at whitespace, `/` or `]`
        let tag = Regex::new(&format!(r"\[{}(?P<attrs>[\s/][^\[\]]*)?\]", regex::escape(tag)))?;
        let attribute = Regex::new(ATTRIBUTE_PATTERN)?;
        Ok(Self { tag, attribute })
    }

    pub fn slider() -> Result<Self, regex::Error> {
        Self::new(SLIDER_SHORTCODE)
    }

    /// Splits `content` into literal text and occurrences of the tag.
    ///
    /// Other shortcodes and unterminated tags stay in the text segments verbatim.
    pub fn segments<'a>(&self, content: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut text_start = 0;

        for caps in self.tag.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > text_start {
                segments.push(Segment::Text(&content[text_start..whole.start()]));
            }
            let raw = caps.name("attrs").map(|m| m.as_str()).unwrap_or("");
            segments.push(Segment::Shortcode(self.attributes(raw)));
            text_start = whole.end();
        }

        if text_start < content.len() {
            segments.push(Segment::Text(&content[text_start..]));
        }
        segments
    }

    fn attributes(&self, raw: &str) -> ShortcodeAttrs {
        let raw = strip_self_closing(raw.trim());
        let mut attrs = HashMap::new();

        for caps in self.attribute.captures_iter(raw) {
            let pair = [(1, 2), (3, 4), (5, 6)]
                .into_iter()
                .find_map(|(n, v)| Some((caps.get(n)?, caps.get(v)?)));
            if let Some((name, value)) = pair {
                attrs.insert(name.as_str().to_ascii_lowercase(), value.as_str().to_string());
            }
        }
        attrs
    }
}

/// Drops the closing `/` of `[tag ... /]`; `id=foo/` keeps its slash
fn strip_self_closing(raw: &str) -> &str {
    let Some(rest) = raw.strip_suffix('/') else {
        return raw;
    };
    match rest.chars().last() {
        None => rest,
        Some(c) if c.is_whitespace() || c == '"' || c == '\'' => rest.trim_end(),
        Some(_) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> ShortcodeAttrs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parse(content: &str) -> Vec<Segment<'_>> {
        ShortcodeParser::slider().unwrap().segments(content)
    }

    #[test]
    fn test_text_only() {
        assert_eq!(parse("<p>hello</p>"), vec![Segment::Text("<p>hello</p>")]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_shortcode_between_text() {
        let segments = parse(r#"<p>a</p>[wcs_category_slider category="1,2" id='home']<p>b</p>"#);
        assert_eq!(
            segments,
            vec![
                Segment::Text("<p>a</p>"),
                Segment::Shortcode(attrs(&[("category", "1,2"), ("id", "home")])),
                Segment::Text("<p>b</p>"),
            ]
        );
    }

    #[test]
    fn test_bare_and_self_closing() {
        let segments = parse("[wcs_category_slider][wcs_category_slider CATEGORY=3 /][wcs_category_slider/]");
        assert_eq!(
            segments,
            vec![
                Segment::Shortcode(ShortcodeAttrs::new()),
                Segment::Shortcode(attrs(&[("category", "3")])),
                Segment::Shortcode(ShortcodeAttrs::new()),
            ]
        );
    }

    #[test]
    fn test_other_tags_untouched() {
        let content = "[gallery ids=1][wcs_category_slider_old] [wcs_category_slider category=\"1\"";
        assert_eq!(parse(content), vec![Segment::Text(content)]);
    }

    #[test]
    fn test_positional_attributes_ignored() {
        let segments = parse("[wcs_category_slider featured \"quoted\" id=x]");
        assert_eq!(segments, vec![Segment::Shortcode(attrs(&[("id", "x")]))]);
    }

    #[test]
    fn test_unquoted_value_keeps_trailing_slash() {
        assert_eq!(
            parse("[wcs_category_slider id=foo/]"),
            vec![Segment::Shortcode(attrs(&[("id", "foo/")]))]
        );
        assert_eq!(
            parse(r#"[wcs_category_slider id="foo"/]"#),
            vec![Segment::Shortcode(attrs(&[("id", "foo")]))]
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(
            parse("[wcs_category_slider category = \"4, 5\"]"),
            vec![Segment::Shortcode(attrs(&[("category", "4, 5")]))]
        );
    }
}
