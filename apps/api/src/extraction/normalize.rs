//! Text normalization applied to raw decoder output before field extraction.
//!
//! The pass is idempotent: running it on its own output changes nothing.
//! Note that collapsing all whitespace first means newlines never survive
//! to the later steps, so normalized text is always a single line. Field
//! extraction is written against exactly this shape.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Collapses whitespace runs to one space, drops characters outside
/// printable ASCII (newlines exempt), collapses newline runs, and trims.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let printable: String = collapsed
        .chars()
        .filter(|&c| c == '\n' || (' '..='~').contains(&c))
        .collect();
    let flattened = NEWLINE_RUN.replace_all(&printable, "\n");
    // Dropping a character can butt two spaces together; collapse once more
    // so already-normalized text passes through unchanged.
    let spaced = SPACE_RUN.replace_all(&flattened, " ");
    spaced.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_runs_to_single_space() {
        assert_eq!(normalize("a  b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_strips_non_printable_characters() {
        assert_eq!(normalize("caf\u{e9} r\u{e9}sum\u{e9}\u{0}!"), "caf rsum!");
        assert_eq!(normalize("bullet \u{2022} point"), "bullet point");
    }

    #[test]
    fn test_trims_leading_and_trailing_whitespace() {
        assert_eq!(normalize("   padded   "), "padded");
    }

    #[test]
    fn test_empty_and_blank_input_yield_empty_string() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n\r "), "");
    }

    #[test]
    fn test_output_is_single_line() {
        let out = normalize("line one\nline two\r\nline three");
        assert!(!out.contains('\n'));
        assert_eq!(out, "line one line two line three");
    }

    #[test]
    fn test_idempotent_on_its_own_output() {
        let samples = [
            "Name: Jane Doe\n\nSkills:  Python,  Docker",
            "  mixed \u{2013} content\twith\u{a0}odd spacing  ",
            "a \u{2022} b",
            "",
            "already normalized text",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
