//! HTML escaping and sanitization for rendered markup

use std::borrow::Cow;

/// Escape for element text content (also used for `<textarea>` bodies)
pub fn esc_html(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape for a double-quoted attribute value
pub fn esc_attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// URL safe to place in `src`/`href`.
///
/// Only http(s), protocol-relative and root-relative URLs pass; anything
/// else (`javascript:`, `data:`) becomes an empty string.
pub fn esc_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    let allowed = lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || (lower.starts_with('/') && !lower.starts_with("//"));
    if !allowed {
        return String::new();
    }
    let no_ws: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    esc_attr(&no_ws).into_owned()
}

/// Санитизация HTML-контента страниц витрины.
///
/// Правила:
/// - `<script>` и `on*` атрибуты удаляются
/// - разрешены базовые теги плюс атрибуты `class` / `id`
/// - текст шорткодов (`[...]`) проходит без изменений
pub fn sanitize_page_content(html: &str) -> String {
    ammonia::Builder::default()
        .add_generic_attributes(&["class", "id"])
        .clean(html)
        .to_string()
}
