//! Static font-metric tables for the three PDF base-14 font families the
//! renderer can name without embedding font programs.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe AFM files (width / 1000). The base-14 metrics are exact for ASCII;
//! non-ASCII characters fall back to an average width.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// The supported body-text font families. All three are PDF base-14 fonts,
/// so the artifact sink can reference them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Default — neutral sans-serif.
    Helvetica,
    /// Classic serif.
    TimesRoman,
    /// Fixed-pitch.
    Courier,
}

impl FontFamily {
    /// PDF BaseFont name for the regular weight.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::TimesRoman => "Times-Roman",
            FontFamily::Courier => "Courier",
        }
    }

    /// PDF BaseFont name for the bold weight (emphasis runs and margin labels).
    pub fn bold_base_font(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica-Bold",
            FontFamily::TimesRoman => "Times-Bold",
            FontFamily::Courier => "Courier-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout configuration
// ────────────────────────────────────────────────────────────────────────────

/// Immutable layout parameters for a single pipeline run.
///
/// All geometry is in PostScript points. The content area is the column of
/// body text to the right of the margin-annotation column; `margin_width_pt`
/// is the width reserved for annotation labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub font: FontFamily,
    pub font_size_pt: f32,
    /// Font size for margin annotation labels.
    pub label_font_size_pt: f32,
    /// Width of the body-text content area.
    pub content_width_pt: f32,
    /// Height of the content area on each page.
    pub content_height_pt: f32,
    /// Width of the margin annotation column.
    pub margin_width_pt: f32,
    /// Vertical advance per wrapped line.
    pub line_height_pt: f32,
    /// Extra vertical gap between paragraphs.
    pub paragraph_spacing_pt: f32,
    /// Minimum vertical distance between two margin labels (`h_min`).
    pub min_label_gap_pt: f32,
    /// Column count for the keyword index artifact.
    pub grid_columns: usize,
    /// Keyword-count bounds handed to the keyword source collaborator.
    pub min_keywords: usize,
    pub max_keywords: usize,
}

/// Returns the default layout config for the given font family.
///
/// Assumes US letter (612 × 792 pt), 0.75" page margins, a 1.5" margin
/// annotation column with a 0.25" gap, 11pt body text on 14pt leading.
pub fn default_layout_config(font: FontFamily) -> LayoutConfig {
    LayoutConfig {
        font,
        font_size_pt: 11.0,
        label_font_size_pt: 9.0,
        // 612 - 2×54 (page margins) - 108 (annotation column) - 18 (gap)
        content_width_pt: 378.0,
        // 792 - 2×54
        content_height_pt: 684.0,
        margin_width_pt: 108.0,
        line_height_pt: 14.0,
        paragraph_spacing_pt: 10.8,
        min_label_gap_pt: 12.0,
        grid_columns: 3,
        min_keywords: 3,
        max_keywords: 5,
    }
}

impl LayoutConfig {
    /// Maximum line width in em units at the configured font size.
    pub fn content_width_em(&self) -> f32 {
        self.content_width_pt / self.font_size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~).
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
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

    /// Measures a string in points at the given font size.
    pub fn measure_pt(&self, s: &str, font_size_pt: f32) -> f32 {
        self.measure_str(s) * font_size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica — AFM widths / 1000.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
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
    average_char_width: 0.530,
    space_width: 0.278,
};

/// Times-Roman — AFM widths / 1000.
static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::TimesRoman,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.500,
    space_width: 0.250,
};

/// Courier — fixed pitch, every glyph 600/1000.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Courier,
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA_TABLE,
        FontFamily::TimesRoman => &TIMES_ROMAN_TABLE,
        FontFamily::Courier => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(&FontFamily::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(&FontFamily::Helvetica);
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.278).abs() < 1e-4,
            "space width should be 0.278, got {width}"
        );
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&FontFamily::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(&FontFamily::Helvetica);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_measure_pt_scales_with_font_size() {
        let metrics = get_metrics(&FontFamily::Helvetica);
        let em = metrics.measure_str("keyword");
        let pt = metrics.measure_pt("keyword", 11.0);
        assert!((pt - em * 11.0).abs() < 1e-3);
    }

    #[test]
    fn test_courier_is_fixed_pitch() {
        let metrics = get_metrics(&FontFamily::Courier);
        assert!((metrics.measure_str("iii") - metrics.measure_str("WWW")).abs() < 1e-6);
    }

    #[test]
    fn test_all_three_fonts_accessible() {
        let _ = get_metrics(&FontFamily::Helvetica);
        let _ = get_metrics(&FontFamily::TimesRoman);
        let _ = get_metrics(&FontFamily::Courier);
    }

    #[test]
    fn test_default_layout_config_sanity() {
        let config = default_layout_config(FontFamily::Helvetica);
        assert_eq!(config.font, FontFamily::Helvetica);
        assert!((config.content_width_pt - 378.0).abs() < 1e-3);
        assert!((config.content_height_pt - 684.0).abs() < 1e-3);
        assert_eq!(config.grid_columns, 3);
        // ~34 em of text per line at 11pt
        assert!(config.content_width_em() > 30.0 && config.content_width_em() < 40.0);
    }

    #[test]
    fn test_base_font_names_match_pdf_base14() {
        assert_eq!(FontFamily::Helvetica.base_font(), "Helvetica");
        assert_eq!(FontFamily::TimesRoman.bold_base_font(), "Times-Bold");
        assert_eq!(FontFamily::Courier.bold_base_font(), "Courier-Bold");
    }
}
