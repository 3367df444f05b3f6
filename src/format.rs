//! Plain-text rendering of generated impl fragments.

/// Strip the markup from a pre-rendered `impl` fragment.
///
/// Artifact text is an HTML fragment: anchor tags around path segments,
/// entity-escaped angle brackets, `&nbsp;` padding inside where clauses.
/// Tags are dropped, then the entity set the generator emits is decoded.
/// `&amp;` is decoded last so it cannot manufacture new entities.
pub fn strip_markup(text: &str) -> String {
    let tags = regex::Regex::new(r"<[^>]*>").unwrap();
    let stripped = tags.replace_all(text, "");
    stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
