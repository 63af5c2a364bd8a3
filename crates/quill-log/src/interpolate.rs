//! Placeholder interpolation.
//!
//! Replaces `{key}` tokens in a message template with the string form of the
//! matching context value. Replacement is a single left-to-right pass: text
//! produced by a replacement is never scanned again, and at each position the
//! longest matching token wins.

use std::borrow::Cow;

use crate::context::{Context, ContextValue, rfc3339};

/// Render `template`, substituting `{key}` tokens from `context`.
///
/// Templates without a `{` are returned borrowed and untouched. Tokens with no
/// matching key are left verbatim; keys with no matching token are ignored.
#[must_use]
pub fn render<'a>(template: &'a str, context: &Context) -> Cow<'a, str> {
    if !template.contains('{') {
        return Cow::Borrowed(template);
    }

    let replacements: Vec<(String, String)> = context
        .iter()
        .map(|(key, value)| (format!("{{{key}}}"), stringify(value)))
        .collect();

    Cow::Owned(substitute(template, &replacements))
}

/// String form of a context value, as used for placeholder replacement.
///
/// Dispatch order: scalars, stringables, date-times, composite objects, and
/// finally raw collections, which render as `[<kind>]`.
#[must_use]
pub fn stringify(value: &ContextValue) -> String {
    match value {
        ContextValue::Null => String::new(),
        ContextValue::Bool(v) => v.to_string(),
        ContextValue::Int(v) => v.to_string(),
        ContextValue::UInt(v) => v.to_string(),
        ContextValue::Float(v) => v.to_string(),
        ContextValue::String(v) => v.clone(),

        ContextValue::Stringable(v) => v.to_string(),
        ContextValue::Error(e) => e.message().to_owned(),

        ContextValue::DateTime(dt) => rfc3339(dt),

        ContextValue::Object(object) => format!("[object {}]", object.type_name()),

        ContextValue::List(_) | ContextValue::Map(_) => format!("[{}]", value.kind_name()),
    }
}

/// Replace every token in one pass, preferring the longest token at each
/// position. Every token must start with `{`.
pub(crate) fn substitute<T, R>(template: &str, replacements: &[(T, R)]) -> String
where
    T: AsRef<str>,
    R: AsRef<str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (head, tail) = rest.split_at(open);
        out.push_str(head);

        let matched = replacements
            .iter()
            .filter(|(token, _)| {
                let token = token.as_ref();
                !token.is_empty() && tail.starts_with(token)
            })
            .max_by_key(|(token, _)| token.as_ref().len());

        if let Some((token, replacement)) = matched {
            out.push_str(replacement.as_ref());
            rest = &tail[token.as_ref().len()..];
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ObjectValue;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use serde::Serialize;

    #[test]
    fn test_template_without_braces_is_borrowed() {
        let context = Context::new().with("code", 500);
        let rendered = render("Disk full", &context);
        assert!(matches!(rendered, Cow::Borrowed("Disk full")));
    }

    #[test]
    fn test_scalar_replacement() {
        let context = Context::new().with("code", 500);
        assert_eq!(render("Code: {code}", &context), "Code: 500");
    }

    #[test]
    fn test_scalar_forms() {
        let context = Context::new()
            .with("s", "text")
            .with("f", 1.5)
            .with("whole", 2.0)
            .with("t", true)
            .with("n", ContextValue::Null)
            .with("big", u64::MAX);
        assert_eq!(
            render("{s}|{f}|{whole}|{t}|{n}|{big}", &context),
            "text|1.5|2|true||18446744073709551615"
        );
    }

    #[test]
    fn test_unknown_tokens_are_left_verbatim() {
        let context = Context::new().with("known", "yes").with("unused", 1);
        assert_eq!(render("{known} {unknown} {", &context), "yes {unknown} {");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let context = Context::new().with("a", "{b}").with("b", "boom");
        assert_eq!(render("{a} {b}", &context), "{b} boom");
    }

    #[test]
    fn test_repeated_tokens() {
        let context = Context::new().with("x", "y");
        assert_eq!(render("{x}{x}-{x}", &context), "yy-y");
    }

    #[test]
    fn test_stringable() {
        struct Host;
        impl std::fmt::Display for Host {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("db-1.internal")
            }
        }

        let context = Context::new().with("host", ContextValue::stringable(Host));
        assert_eq!(render("host={host}", &context), "host=db-1.internal");
    }

    #[test]
    fn test_error_renders_message() {
        let err = std::io::Error::other("disk full");
        let context = Context::new().with("err", ContextValue::error(&err));
        assert_eq!(render("failed: {err}", &context), "failed: disk full");
    }

    #[test]
    fn test_datetime_renders_rfc3339_with_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        let east = FixedOffset::east_opt(18_000)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 5, 10, 30, 0)
            .unwrap();
        let context = Context::new().with("utc", utc).with("east", east);
        assert_eq!(
            render("{utc} {east}", &context),
            "2024-01-05T10:30:00+00:00 2024-01-05T10:30:00+05:00"
        );
    }

    #[test]
    fn test_datetime_drops_subseconds() {
        let dt = DateTime::parse_from_rfc3339("2024-01-05T10:30:00.987-03:00").unwrap();
        let context = Context::new().with("at", dt);
        assert_eq!(render("{at}", &context), "2024-01-05T10:30:00-03:00");
    }

    #[test]
    fn test_object_fallback() {
        #[derive(Serialize)]
        struct Request {
            path: &'static str,
        }

        let context = Context::new()
            .with("req", ContextValue::object(&Request { path: "/" }))
            .with("named", ObjectValue::new("stdClass", serde_json::json!({})));
        assert_eq!(
            render("{req} {named}", &context),
            "[object Request] [object stdClass]"
        );
    }

    #[test]
    fn test_collection_fallback() {
        let context = Context::new()
            .with("list", vec![1, 2, 3])
            .with("map", Context::new().with("foo", "bar"));
        assert_eq!(render("{list} {map}", &context), "[array] [array]");
    }

    #[test]
    fn test_substitute_prefers_longest_token() {
        let replacements = [("{a", "short"), ("{ab}", "long")];
        assert_eq!(substitute("x{ab}y", &replacements), "xlongy");
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        let context = Context::new().with("name", "Zoë");
        assert_eq!(render("héllo {name} ✓", &context), "héllo Zoë ✓");
    }
}
