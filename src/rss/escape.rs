//! XML escaping for RSS element text, attribute values, and CDATA bodies.
//!
//! Two mechanisms, chosen per field:
//!
//! - [`escape_text`] for everything rendered as plain element text or an
//!   attribute value (titles, links, channel fields). Replaces the four
//!   entities `&` `<` `>` `"`. The apostrophe is deliberately left alone:
//!   conforming parsers accept a raw `'` in both text and attribute
//!   content under the default entity set, and the minimal replacement
//!   set keeps output byte-compatible with feeds already in the wild.
//!   This asymmetry is intentional; do not "complete" the set.
//! - [`cdata`] for the description/snippet, which may legitimately carry
//!   HTML markup that must survive verbatim.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, and `"` for use in XML element text or an
/// attribute value.
///
/// Borrows the input unchanged when no replacement is needed, which is
/// the common case for links and language codes.
///
/// Apostrophes pass through unescaped (see module docs).
pub fn escape_text(input: &str) -> Cow<'_, str> {
    if !input
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"'))
    {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Wraps free text in a CDATA section, splitting on any embedded `]]>`.
///
/// The literal sequence `]]>` would terminate a CDATA section early, so
/// each occurrence is rewritten as `]]]]><![CDATA[>`: the first section
/// ends after `]]`, a new section reopens with `>`, and a conformant
/// parser concatenates the two back into the exact original bytes.
pub fn cdata(input: &str) -> String {
    format!("<![CDATA[{}]]>", input.replace("]]>", "]]]]><![CDATA[>"))
}
