//! ANSI escape stripping.

use regex::Regex;
use std::sync::OnceLock;

/// CSI sequences, OSC sequences (BEL or ST terminated) and two-character
/// escapes, in that order. OSC must match before the two-character form
/// or its payload would survive.
const ANSI_PATTERN: &str =
    r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)?|[@-Z\\-_])";

static ANSI_RE: OnceLock<Regex> = OnceLock::new();

/// Remove ANSI escape sequences (colors, cursor movement, titles).
///
/// The pattern compiles once per process.
#[must_use]
pub fn strip_ansi(s: &str) -> String {
    let re = ANSI_RE.get_or_init(|| Regex::new(ANSI_PATTERN).expect("ANSI escape pattern compiles"));
    re.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_color_codes() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m plain"), "red plain");
        assert_eq!(strip_ansi("\x1b[1;32;40mbold green\x1b[m"), "bold green");
    }

    #[test]
    fn removes_cursor_movement() {
        assert_eq!(strip_ansi("start\x1b[2Aup\x1b[10;20Hjump"), "startupjump");
    }

    #[test]
    fn removes_osc_titles() {
        assert_eq!(strip_ansi("\x1b]0;window title\x07body"), "body");
        assert_eq!(strip_ansi("\x1b]8;;https://example.com\x1b\\link"), "link");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip_ansi("no escapes here"), "no escapes here");
        assert_eq!(strip_ansi(""), "");
    }
}
