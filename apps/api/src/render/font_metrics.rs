//! Static width tables for the two built-in PDF fonts the renderer uses.
//!
//! Widths are in em units (AFM widths / 1000) under WinAnsi encoding and cover
//! ASCII 0x20..=0x7E. Index = (char as usize) - 32. Text reaching the renderer is
//! already sanitized to ASCII; anything else falls back to `average_char_width`.

use serde::{Deserialize, Serialize};

/// The standard-14 fonts embedded by name in every rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    /// PostScript name written into the font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
        }
    }
}

pub struct FontMetricTable {
    pub font: BuiltinFont,
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Rendered width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    /// Greedy word-wrap of one paragraph into lines no wider than `max_width_pt`.
    ///
    /// Leading indentation is kept on the first line (tabs count as four spaces) as
    /// long as the first word still fits after it. Other runs of whitespace collapse
    /// to one space. A single word wider than the column is split by characters.
    pub fn wrap(&self, paragraph: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let max_em = max_width_pt / size_pt;
        let body = paragraph.trim_start();
        if body.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        let mut current = leading_indent(&paragraph[..paragraph.len() - body.len()]);
        let mut current_width = self.measure_str(&current);
        let mut has_word = false;

        for word in body.split_whitespace() {
            let word_w = self.measure_str(word);

            if !has_word && current_width + word_w > max_em {
                current.clear();
                current_width = 0.0;
            }

            if word_w > max_em {
                if has_word {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = self.split_long_word(word, max_em);
                // last piece stays open so following words can join it
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_width = self.measure_str(&last);
                    current = last;
                    has_word = true;
                }
                continue;
            }

            let space_w = if has_word { self.space_width } else { 0.0 };
            if has_word && current_width + space_w + word_w > max_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                if has_word {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
            }
            has_word = true;
        }

        if has_word {
            lines.push(current);
        }
        lines
    }

    fn split_long_word(&self, word: &str, max_em: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.measure_str(c.encode_utf8(&mut [0u8; 4]));
            if !piece.is_empty() && width + w > max_em {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

fn leading_indent(whitespace: &str) -> String {
    whitespace
        .chars()
        .map(|c| if c == '\t' { "    " } else { " " })
        .collect()
}

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: BuiltinFont::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '
        //  (     )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191,
        0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.52,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: BuiltinFont::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '
        //  (     )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238,
        0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.56,
    space_width: 0.278,
};

pub fn get_metrics(font: BuiltinFont) -> &'static FontMetricTable {
    match font {
        BuiltinFont::Helvetica => &HELVETICA_TABLE,
        BuiltinFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(BuiltinFont::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Professional Summary";
        assert!(
            get_metrics(BuiltinFont::HelveticaBold).measure_str(text)
                > get_metrics(BuiltinFont::Helvetica).measure_str(text)
        );
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let metrics = get_metrics(BuiltinFont::Helvetica);
        assert_eq!(metrics.wrap("Jane   Doe ", 12.0, 450.0), vec!["Jane Doe"]);
    }

    #[test]
    fn test_wrap_keeps_leading_indent_on_first_line() {
        let metrics = get_metrics(BuiltinFont::Helvetica);
        assert_eq!(metrics.wrap("  - Python", 12.0, 450.0), vec!["  - Python"]);
        assert_eq!(metrics.wrap("\tAcme Corp", 12.0, 450.0), vec!["    Acme Corp"]);

        let lines = metrics.wrap("    alpha beta gamma delta", 12.0, 60.0);
        assert!(lines[0].starts_with("    alpha"));
        assert!(lines[1..].iter().all(|l| !l.starts_with(' ')));
    }

    #[test]
    fn test_wrap_respects_column_width() {
        let metrics = get_metrics(BuiltinFont::Helvetica);
        let text = "Applied 5 years of experience to projects aligned with Senior Data Engineer \
                    at Acme "
            .repeat(4);
        let lines = metrics.wrap(&text, 12.0, 450.0);
        assert!(lines.len() >= 3, "expected wrapping, got {lines:?}");
        for line in &lines {
            assert!(metrics.measure_pt(line, 12.0) <= 450.0 + 1e-3, "too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let metrics = get_metrics(BuiltinFont::Helvetica);
        let word = "x".repeat(200);
        let lines = metrics.wrap(&format!("{word} tail"), 12.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat().replace(' ', ""), format!("{word}tail"));
        assert!(lines.last().is_some_and(|l| l.ends_with("tail")));
    }

    #[test]
    fn test_wrap_empty_paragraph() {
        let metrics = get_metrics(BuiltinFont::Helvetica);
        assert!(metrics.wrap("   ", 12.0, 450.0).is_empty());
    }
}
