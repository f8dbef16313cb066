/// Strips every character outside printable 7-bit ASCII, keeping newlines and tabs.
pub fn sanitize_text(text: &str) -> String {
    text.chars().filter(|&c| is_kept(c)).collect()
}

fn is_kept(c: char) -> bool {
    c.is_ascii_graphic() || c == ' ' || c == '\n' || c == '\t'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_printable_ascii_and_line_breaks() {
        assert_eq!(sanitize_text("- Python\n\tSQL, AWS"), "- Python\n\tSQL, AWS");
    }

    #[test]
    fn test_strips_non_ascii_and_control_chars() {
        assert_eq!(sanitize_text("• Café\u{7}\r résumé ✓"), " Caf rsum ");
    }
}
