//! Token substitution - {{date}} and {{time}} placeholders
//!
//! Patterns use the moment.js-style tokens users know from their notes app
//! (YYYY, MM, DD, HH, mm, ...) and are translated to strftime before
//! formatting. Anything else between double curlies is left untouched.

use chrono::{DateTime, Local};
use regex::Regex;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{date(?::([^{}]+))?\}\}").expect("invalid date token regex"));

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{time(?::([^{}]+))?\}\}").expect("invalid time token regex"));

/// Substitute all {{date}}/{{date:PATTERN}} and {{time}}/{{time:PATTERN}}
/// tokens in `content`.
///
/// The date and time passes are independent: one never consumes the other's
/// tokens, and each token may appear any number of times. Tokens without an
/// inline pattern use the configured default formats.
pub fn render(
    content: &str,
    date_format: &str,
    time_format: &str,
    now: &DateTime<Local>,
) -> String {
    let dated = DATE_RE.replace_all(content, |caps: &regex::Captures| {
        let pattern = caps.get(1).map(|m| m.as_str()).unwrap_or(date_format);
        format_with_pattern(now, pattern)
    });

    TIME_RE
        .replace_all(&dated, |caps: &regex::Captures| {
            let pattern = caps.get(1).map(|m| m.as_str()).unwrap_or(time_format);
            format_with_pattern(now, pattern)
        })
        .into_owned()
}

/// Format a timestamp with a moment.js-style pattern
pub fn format_with_pattern(now: &DateTime<Local>, pattern: &str) -> String {
    now.format(&to_strftime(pattern)).to_string()
}

/// Pattern tokens, longest first within each letter family so the scanner
/// can match greedily.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
];

/// Translate a moment.js-style pattern to a strftime pattern.
/// Characters that are not part of any token pass through as literals.
fn to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        for (token, replacement) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }

        let ch = rest.chars().next().unwrap();
        if ch == '%' {
            // Literal percent must not reach strftime unescaped
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 12, 19, 9, 5, 42).unwrap()
    }

    #[test]
    fn test_to_strftime() {
        assert_eq!(to_strftime("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(to_strftime("HH:mm"), "%H:%M");
        assert_eq!(to_strftime("DD.MM.YYYY"), "%d.%m.%Y");
        assert_eq!(to_strftime("h:mm A"), "%-I:%M %p");
        assert_eq!(to_strftime("100% YYYY"), "100%% %Y");
    }

    #[test]
    fn test_render_default_date() {
        let out = render("- [ ] {{date}}", "YYYY-MM-DD", "HH:mm", &fixed_now());
        assert_eq!(out, "- [ ] 2024-12-19");
    }

    #[test]
    fn test_render_inline_pattern_wins() {
        let out = render("{{date:DD.MM.YYYY}}", "YYYY-MM-DD", "HH:mm", &fixed_now());
        assert_eq!(out, "19.12.2024");
    }

    #[test]
    fn test_render_time() {
        let out = render("at {{time}}", "YYYY-MM-DD", "HH:mm", &fixed_now());
        assert_eq!(out, "at 09:05");

        let out = render("{{time:HH:mm:ss}}", "YYYY-MM-DD", "HH:mm", &fixed_now());
        assert_eq!(out, "09:05:42");
    }

    #[test]
    fn test_date_and_time_passes_are_independent() {
        let out = render("{{date}} at {{time}}", "YYYY-MM-DD", "HH:mm", &fixed_now());
        assert_eq!(out, "2024-12-19 at 09:05");

        // Order in the content does not matter either
        let out = render("{{time}} on {{date}}", "YYYY-MM-DD", "HH:mm", &fixed_now());
        assert_eq!(out, "09:05 on 2024-12-19");
    }

    #[test]
    fn test_repeated_tokens() {
        let out = render(
            "{{date}} / {{date:YYYY}} / {{date}}",
            "YYYY-MM-DD",
            "HH:mm",
            &fixed_now(),
        );
        assert_eq!(out, "2024-12-19 / 2024 / 2024-12-19");
    }

    #[test]
    fn test_unrecognized_tokens_pass_through() {
        let out = render(
            "# {{title}}\n{{date}}\n{{ weird }}",
            "YYYY-MM-DD",
            "HH:mm",
            &fixed_now(),
        );
        assert_eq!(out, "# {{title}}\n2024-12-19\n{{ weird }}");
    }

    #[test]
    fn test_content_without_tokens_unchanged() {
        let content = "plain note, no curly business";
        let out = render(content, "YYYY-MM-DD", "HH:mm", &fixed_now());
        assert_eq!(out, content);
    }
}
