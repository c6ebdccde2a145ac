use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Built once, shared by every fragment writer
static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape a value for use inside a double-quoted XML attribute.
///
/// Values without special characters are borrowed unchanged.
///
/// # Examples
///
/// ```
/// use svgdml::common::xml::escape_attr;
/// assert_eq!(escape_attr("rId7"), "rId7");
/// assert_eq!(escape_attr("a&\"b\""), "a&amp;&quot;b&quot;");
/// ```
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if ATTR_ESCAPER.is_match(s) {
        Cow::Owned(ATTR_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]))
    } else {
        Cow::Borrowed(s)
    }
}
