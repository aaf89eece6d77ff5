/// Escapes `&`, `<`, `>`, `"` and `'` so the value can be echoed into HTML
/// (text or quoted attribute) without being interpreted as markup.
pub fn escape_html(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}
