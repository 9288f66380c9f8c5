// ── Display formatting helpers ──
//
// Shared by the CLI and TUI so both front-ends render prices, dates, and
// titles identically -- there is exactly one rendering path for item data.

use chrono::{DateTime, Utc};

/// Display cap for item card titles, in characters.
pub const TITLE_MAX_CHARS: usize = 40;

/// Group an integer with thousands separators (e.g. `1234567` → `"1,234,567"`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a price with the currency suffix. Absent or zero prices render
/// as "Price N/A".
pub fn fmt_price(price: Option<u64>) -> String {
    match price {
        None | Some(0) => "Price N/A".to_owned(),
        Some(p) => format!("{} JPY", group_thousands(p)),
    }
}

/// Compact yen form for item cards (`¥1,000`).
pub fn fmt_price_yen(price: Option<u64>) -> String {
    match price {
        None | Some(0) => "Price N/A".to_owned(),
        Some(p) => format!("¥{}", group_thousands(p)),
    }
}

/// Format a timestamp as local-ish date + two-digit hour:minute, or "N/A".
pub fn fmt_date(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        None => "N/A".to_owned(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Truncate a title to [`TITLE_MAX_CHARS`] characters plus an ellipsis.
/// Shorter titles are returned verbatim. Char-based, so multi-byte
/// titles are never split mid-character.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX_CHARS {
        let head: String = title.chars().take(TITLE_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_owned()
    }
}

/// Strip control characters from untrusted wire text before rendering.
///
/// Item titles and server messages are arbitrary remote strings; a raw
/// ESC byte would let them inject terminal escape sequences into the UI.
pub fn sanitize_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_absent_or_zero_is_na() {
        assert_eq!(fmt_price(None), "Price N/A");
        assert_eq!(fmt_price(Some(0)), "Price N/A");
        assert_eq!(fmt_price_yen(None), "Price N/A");
        assert_eq!(fmt_price_yen(Some(0)), "Price N/A");
    }

    #[test]
    fn price_is_grouped_with_suffix() {
        assert_eq!(fmt_price(Some(1000)), "1,000 JPY");
        assert_eq!(fmt_price(Some(999)), "999 JPY");
        assert_eq!(fmt_price(Some(1_234_567)), "1,234,567 JPY");
        assert_eq!(fmt_price_yen(Some(1000)), "¥1,000");
    }

    #[test]
    fn titles_longer_than_cap_get_ellipsis() {
        let long = "a".repeat(41);
        let rendered = truncate_title(&long);
        assert_eq!(rendered, format!("{}...", "a".repeat(40)));

        let exact = "b".repeat(40);
        assert_eq!(truncate_title(&exact), exact);

        assert_eq!(truncate_title("short"), "short");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let kana = "ポ".repeat(41);
        let rendered = truncate_title(&kana);
        assert_eq!(rendered.chars().count(), 43); // 40 kana + "..."
        assert!(rendered.starts_with(&"ポ".repeat(40)));
    }

    #[test]
    fn sanitize_strips_control_bytes() {
        let hostile = "\x1b[31mevil\x07 title";
        let clean = sanitize_text(hostile);
        assert_eq!(clean, "[31mevil title");
        assert!(!clean.chars().any(char::is_control));
    }

    #[test]
    fn sanitize_passes_plain_text_through() {
        assert_eq!(sanitize_text("Pokemon card ¥1,000"), "Pokemon card ¥1,000");
    }

    #[test]
    fn date_formatting() {
        assert_eq!(fmt_date(None), "N/A");

        let dt = chrono::DateTime::parse_from_rfc3339("2024-06-01T09:05:00Z")
            .expect("valid timestamp")
            .with_timezone(&chrono::Utc);
        assert_eq!(fmt_date(Some(&dt)), "2024-06-01 09:05");
    }
}
