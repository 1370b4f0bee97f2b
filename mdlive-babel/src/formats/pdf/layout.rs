//! Page layout for plain-text PDF export.
//!
//! Layout is literal: one source line per output line, no wrapping, no
//! markdown interpretation. Lines are placed top to bottom at a fixed line
//! height and a new page starts when the next line would cross the bottom
//! margin.

use crate::error::FormatError;

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.28;
/// A4 height in points.
pub const A4_HEIGHT: f32 = 841.89;
/// 10 mm in points.
pub const DEFAULT_MARGIN: f32 = 28.35;
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
/// 1.15 × the default font size.
pub const DEFAULT_LINE_HEIGHT: f32 = 18.4;

/// Spaces a tab expands to.
pub const TAB_WIDTH: usize = 4;

/// Page size and text metrics, all in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: DEFAULT_MARGIN,
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl PageGeometry {
    /// Rejects non-positive metrics and margins that leave no printable area.
    pub fn validate(&self) -> Result<(), FormatError> {
        let fields = [
            ("page-width", self.page_width),
            ("page-height", self.page_height),
            ("font-size", self.font_size),
            ("line-height", self.line_height),
        ];
        for (key, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(FormatError::InvalidOption {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        if !(self.margin.is_finite() && self.margin >= 0.0)
            || self.margin * 2.0 >= self.page_width
            || self.margin * 2.0 >= self.page_height
        {
            return Err(FormatError::InvalidOption {
                key: "margin".to_string(),
                value: self.margin.to_string(),
            });
        }
        Ok(())
    }

    /// Height available for text between the top and bottom margins.
    pub fn printable_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Lines that fit on one page. Always at least one.
    pub fn lines_per_page(&self) -> usize {
        let fit = (self.printable_height() / self.line_height).floor();
        if fit >= 1.0 {
            fit as usize
        } else {
            1
        }
    }

    /// Pages needed for `line_count` lines. Always at least one.
    pub fn page_count(&self, line_count: usize) -> usize {
        line_count.div_ceil(self.lines_per_page()).max(1)
    }
}

/// One line of text positioned on a page (PDF coordinates, origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine<'a> {
    pub text: &'a str,
    pub x: f32,
    /// Baseline.
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page<'a> {
    pub lines: Vec<PlacedLine<'a>>,
}

/// Split `text` into lines and distribute them over pages.
///
/// A trailing newline yields a final empty line and an empty text yields a
/// single page holding one empty line.
pub fn paginate<'a>(text: &'a str, geometry: &PageGeometry) -> Vec<Page<'a>> {
    let lines_per_page = geometry.lines_per_page();
    let mut pages = vec![];
    let mut current = Page::default();
    let mut cursor = geometry.margin;

    for line in text.split('\n') {
        if current.lines.len() == lines_per_page {
            pages.push(std::mem::take(&mut current));
            cursor = geometry.margin;
        }
        current.lines.push(PlacedLine {
            text: line.strip_suffix('\r').unwrap_or(line),
            x: geometry.margin,
            y: geometry.page_height - cursor - geometry.font_size,
        });
        cursor += geometry.line_height;
    }
    pages.push(current);

    pages
}

/// Encode a line for the standard Type 1 fonts (WinAnsiEncoding).
///
/// Tabs expand to spaces, other control characters are dropped and anything
/// the encoding can't represent becomes `?`.
pub fn encode_win_ansi(line: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\t' => bytes.extend(std::iter::repeat(b' ').take(TAB_WIDTH)),
            c if c.is_ascii_control() => {}
            c if c.is_ascii() => bytes.push(c as u8),
            c @ '\u{A0}'..='\u{FF}' => bytes.push(c as u32 as u8),
            c => bytes.push(win_ansi_extra(c).unwrap_or(b'?')),
        }
    }
    bytes
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F.
fn win_ansi_extra(ch: char) -> Option<u8> {
    let byte = match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}
