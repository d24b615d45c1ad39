//! Notification template rendering.
//!
//! Stored notification content is a template such as
//! `"{user} shared {file} with you"`. Rendering first localizes the template
//! in the sending app's namespace, then substitutes `{key}` placeholders
//! with the stored parameter values.

use crate::l10n::Translator;
use crate::types::Params;

/// Render a stored template for display.
///
/// Every `{key}` occurrence is replaced literally for each key in `params`,
/// in key order. Keys without a placeholder are ignored and placeholders
/// without a key are left verbatim. Values are not escaped.
pub fn render(
    translator: &dyn Translator,
    namespace: &str,
    raw_template: &str,
    params: &Params,
) -> String {
    let template = translator.translate(namespace, raw_template);
    substitute(&template, params)
}

/// Placeholder substitution without the localization step.
pub fn substitute(template: &str, params: &Params) -> String {
    params.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::{Catalog, Untranslated};

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn all_placeholders_resolved() {
        let out = render(
            &Untranslated,
            "files",
            "Hello {name}, you have {n} items",
            &params(&[("name", "Ann"), ("n", "3")]),
        );
        assert_eq!(out, "Hello Ann, you have 3 items");
    }

    #[test]
    fn unused_param_has_no_effect() {
        let out = render(
            &Untranslated,
            "files",
            "Hello {name}, you have {n} items",
            &params(&[("name", "Ann"), ("n", "3"), ("x", "1")]),
        );
        assert_eq!(out, "Hello Ann, you have 3 items");
    }

    #[test]
    fn missing_key_left_literal() {
        let out = render(&Untranslated, "calendar", "{missing} event", &Params::new());
        assert_eq!(out, "{missing} event");
    }

    #[test]
    fn repeated_placeholder_replaced_everywhere() {
        let out = substitute("{a} and {a}", &params(&[("a", "x")]));
        assert_eq!(out, "x and x");
    }

    #[test]
    fn translation_applied_before_substitution() {
        let catalog =
            Catalog::new().with("files", "{user} shared {file}", "{user} hat {file} geteilt");
        let out = render(
            &catalog,
            "files",
            "{user} shared {file}",
            &params(&[("user", "ann"), ("file", "a.txt")]),
        );
        assert_eq!(out, "ann hat a.txt geteilt");
    }

    #[test]
    fn values_are_not_escaped() {
        let out = substitute("see {link}", &params(&[("link", "<a href=\"/x\">x</a>")]));
        assert_eq!(out, "see <a href=\"/x\">x</a>");
    }

    #[test]
    fn same_input_same_output() {
        let p = params(&[("b", "{a}"), ("a", "1")]);
        assert_eq!(substitute("{a}{b}", &p), substitute("{a}{b}", &p));
    }
}
