//! Markup stripping for inbound notification bodies.
//!
//! Notification messages may carry a small set of inline formatting tags.
//! Every other tag is removed while its text content is kept, so
//! `<div>hi</div>` becomes `hi`. Comments, `<!...>` declarations and
//! `<?...?>` processing instructions are removed together with their body.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Tags that survive sanitization (compared case-insensitively).
pub const ALLOWED_TAGS: &[&str] = &["a", "b", "i", "strong", "em", "span"];

/// One alternation per markup construct, scanned left to right in a single pass:
/// comments, declarations / processing instructions, then regular tags whose
/// attribute section may contain quoted `>` characters. `\z` lets an
/// unterminated construct at the end of input match so it can be dropped;
/// an unclosed quote runs to the end of input.
const MARKUP_PATTERN: &str = r#"(?s)<!--.*?(?:-->|\z)|<[!?][^>]*(?:>|\z)|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*(?:"|\z)|'[^']*(?:'|\z))*)(>|\z)"#;

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MARKUP_PATTERN).expect("valid regex"));

/// Whether `name` is on the inline formatting allow-list.
pub fn is_allowed_tag(name: &str) -> bool {
    ALLOWED_TAGS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(name))
}

/// Strip all markup from `raw` except the tags in [`ALLOWED_TAGS`].
///
/// Allowed tags are kept verbatim, attributes included. A `<` that does not
/// open a tag (`a < b`, `1<2`) is left alone.
pub fn sanitize(raw: &str) -> String {
    MARKUP_RE
        .replace_all(raw, |caps: &Captures<'_>| {
            let terminated = caps.get(4).is_some_and(|m| m.as_str() == ">");
            match caps.get(2) {
                Some(name) if terminated && is_allowed_tag(name.as_str()) => caps[0].to_string(),
                _ => String::new(),
            }
        })
        .into_owned()
}
