//! Markup escaping and the display form of line content.
//!
//! The editable region is plain text, so every loaded character stays
//! literal on screen; the one display transform is expanding each tab to a
//! fixed-width run of non-breaking spaces, inverted on save so
//! load-then-save reproduces the loaded text byte for byte. [`escape`] and
//! [`unescape`] cover the five markup-significant characters for contexts
//! that do emit markup; they never touch the editing path, since decoding
//! what a user literally typed would corrupt it.

/// Number of display cells a tab occupies.
pub const TAB_WIDTH: usize = 4;

/// Display form of one tab: a `TAB_WIDTH` run of non-breaking spaces.
pub const TAB_DISPLAY: &str = "\u{a0}\u{a0}\u{a0}\u{a0}";

/// Escape `& < > " '` to their markup-safe entities.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Invert [`escape`]. `&amp;` is decoded last so double-escaped input is
/// not collapsed twice.
#[must_use]
pub fn unescape(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Turn one raw line into its display form: uniform tab expansion, every
/// other character kept literal. Regular spaces pass through untouched.
#[must_use]
pub fn display_line(raw: &str) -> String {
    raw.replace('\t', TAB_DISPLAY)
}

/// Invert [`display_line`]: collapse each tab run back to a tab.
///
/// A raw line that already contained a literal `TAB_WIDTH` run of
/// non-breaking spaces is indistinguishable from a tab after display
/// conversion; restoring maps both back to a tab.
#[must_use]
pub fn restore_line(display: &str) -> String {
    display.replace(TAB_DISPLAY, "\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_the_five_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn escaped_form_contains_no_raw_markup() {
        let escaped = escape("<script>alert('&\"')</script>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        // Every remaining ampersand opens an entity we emitted ourselves.
        for (idx, _) in escaped.match_indices('&') {
            let rest = &escaped[idx..];
            assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"]
                    .iter()
                    .any(|entity| rest.starts_with(entity)),
                "stray ampersand in {escaped:?}"
            );
        }
    }

    #[test]
    fn display_form_keeps_markup_characters_literal() {
        let raw = "a & b < c > \"d\" 'e'";
        assert_eq!(display_line(raw), raw);
    }

    #[test]
    fn restore_leaves_entity_lookalikes_untouched() {
        for typed in ["&lt;", "&amp;", "a &quot;b&quot; c"] {
            assert_eq!(restore_line(typed), typed, "typed {typed:?}");
        }
    }

    #[test]
    fn escape_then_unescape_is_lossless() {
        for raw in [
            "",
            "plain text",
            "&<>\"'",
            "&amp; already escaped",
            "a && b < c > d",
            "it's \"quoted\"",
        ] {
            assert_eq!(unescape(&escape(raw)), raw, "raw {raw:?}");
        }
    }

    #[test]
    fn tabs_expand_uniformly_and_restore() {
        let raw = "\ta\tb\t";
        let display = display_line(raw);
        assert_eq!(display.matches(TAB_DISPLAY).count(), 3);
        assert!(!display.contains('\t'));
        assert_eq!(restore_line(&display), raw);
    }

    #[test]
    fn display_restore_round_trips_mixed_content() {
        for raw in ["", "\t<&>\t", "no special chars", "ends with tab\t"] {
            assert_eq!(restore_line(&display_line(raw)), raw, "raw {raw:?}");
        }
    }

    #[test]
    fn single_spaces_are_left_alone() {
        assert_eq!(display_line("a b  c"), "a b  c");
    }

    #[test]
    fn tab_display_matches_the_advertised_width() {
        assert_eq!(TAB_DISPLAY.chars().count(), TAB_WIDTH);
        assert!(TAB_DISPLAY.chars().all(|ch| ch == '\u{a0}'));
    }
}
