//! PDF export as a plain-text page layout.
//!
//! The markdown source is laid out literally (see [`layout`]) and written with
//! `pdf-writer` using the standard Helvetica font, so no font data is
//! embedded. The whole file is built in memory; callers get either complete
//! bytes or an error.
//!
//! # Options
//!
//! `page-width`, `page-height`, `margin`, `font-size` and `line-height`, all
//! in points.

pub mod layout;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use layout::{encode_win_ansi, paginate, PageGeometry};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use std::collections::HashMap;

const FONT_NAME: Name<'static> = Name(b"F1");

/// Result of rendering a PDF.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Format implementation producing paginated plain-text PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfFormat {
    geometry: PageGeometry,
}

impl PdfFormat {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "Paginated plain-text PDF"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn mime_type(&self) -> &str {
        "application/pdf"
    }

    fn suggested_filename(&self) -> String {
        "document.pdf".to_string()
    }

    fn serialize(&self, source: &str) -> Result<SerializedDocument, FormatError> {
        let rendered = render_pdf(source, &self.geometry)?;
        Ok(SerializedDocument::Binary(rendered.bytes))
    }

    fn serialize_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let geometry = geometry_from_options(self.geometry, options)?;
        let rendered = render_pdf(source, &geometry)?;
        Ok(SerializedDocument::Binary(rendered.bytes))
    }
}

fn geometry_from_options(
    mut geometry: PageGeometry,
    options: &HashMap<String, String>,
) -> Result<PageGeometry, FormatError> {
    for (key, value) in options {
        let field = match key.as_str() {
            "page-width" => &mut geometry.page_width,
            "page-height" => &mut geometry.page_height,
            "margin" => &mut geometry.margin,
            "font-size" => &mut geometry.font_size,
            "line-height" => &mut geometry.line_height,
            _ => {
                return Err(FormatError::NotSupported(format!(
                    "PDF export does not support option '{key}'"
                )))
            }
        };
        *field = parse_length(key, value)?;
    }
    Ok(geometry)
}

fn parse_length(key: &str, value: &str) -> Result<f32, FormatError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| FormatError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Lay out `text` over pages of `geometry` and write the PDF.
pub fn render_pdf(text: &str, geometry: &PageGeometry) -> Result<RenderedPdf, FormatError> {
    geometry.validate()?;
    let pages = paginate(text, geometry);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let page_ids: Vec<Ref> = (0..pages.len()).map(|i| object_ref(4, i)).collect();
    let content_ids: Vec<Ref> = (0..pages.len()).map(|i| object_ref(5, i)).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for ((page, &page_id), &content_id) in pages.iter().zip(&page_ids).zip(&content_ids) {
        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, geometry.page_width, geometry.page_height))
            .parent(page_tree_id)
            .contents(content_id);
        page_writer.resources().fonts().pair(FONT_NAME, font_id);
        page_writer.finish();

        let mut content = Content::new();
        content.begin_text();
        content.set_font(FONT_NAME, geometry.font_size);
        for line in &page.lines {
            content.set_text_matrix([1.0, 0.0, 0.0, 1.0, line.x, line.y]);
            content.show(Str(&encode_win_ansi(line.text)));
        }
        content.end_text();
        pdf.stream(content_id, &content.finish());
    }

    tracing::debug!(pages = pages.len(), "rendered pdf");
    Ok(RenderedPdf {
        bytes: pdf.finish(),
        page_count: pages.len(),
    })
}

/// Page objects and content streams interleave after the three fixed objects.
fn object_ref(first: i32, page_index: usize) -> Ref {
    Ref::new(first + 2 * page_index as i32)
}
