//! PDF rendering for finished lecture notes.
//!
//! Lays the transcript, summary, and optional study questions out as flow
//! elements: a centered title block, a styled heading per section, body text
//! wrapped at a fixed column width, and questions as a bulleted list. Pages
//! are US letter with 50pt margins; a new page starts whenever the cursor
//! passes the bottom margin.

use crate::error::{LecternError, Result};
use crate::notes::NotesContext;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::io::BufWriter;

// US letter in millimeters
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
/// 50pt margin on all sides
const MARGIN_MM: f32 = 17.6;

const TITLE_SIZE: f32 = 22.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;

// Leadings in mm (28pt / 20pt / 14pt)
const TITLE_LEADING_MM: f32 = 9.9;
const HEADING_LEADING_MM: f32 = 7.1;
const BODY_LEADING_MM: f32 = 4.9;
const SECTION_GAP_MM: f32 = 7.0;

/// Rendering options for one document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Title rendered at the top of the first page
    pub title: String,
    /// Column width for wrapped body text
    pub wrap_columns: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: crate::defaults::DOCUMENT_TITLE.to_string(),
            wrap_columns: crate::defaults::WRAP_COLUMNS,
        }
    }
}

/// Vertical cursor over a growing document; starts new pages as needed.
struct FlowCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> FlowCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    /// Blank vertical space (spacer flow element).
    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// One line of text at `x`; breaks to a fresh page if it would land in
    /// the bottom margin.
    fn line(&mut self, text: &str, size: f32, leading: f32, font: &IndirectFontRef, x: f32) {
        if self.y - leading < MARGIN_MM {
            let (page, layer) = self.doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                "Layer 1",
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.y -= leading;
        self.layer
            .use_text(text, size, Mm(x), Mm(self.y), font);
    }
}

/// Approximate x position that centers `text` on the page.
///
/// Builtin fonts carry no metrics here; 0.5em average glyph width is close
/// enough for a short title line.
fn centered_x(text: &str, size_pt: f32) -> f32 {
    const PT_TO_MM: f32 = 0.3528;
    let width_mm = text.chars().count() as f32 * size_pt * 0.5 * PT_TO_MM;
    ((PAGE_WIDTH_MM - width_mm) / 2.0).max(MARGIN_MM)
}

/// Render finished notes into an in-memory PDF.
///
/// Requires the transcript and summary stages to have run (ordering
/// invariant); study questions are included when present.
pub fn render_notes(notes: &NotesContext, options: &RenderOptions) -> Result<Vec<u8>> {
    let transcript = notes.transcript().map_err(|_| LecternError::StageOutOfOrder {
        stage: "render",
    })?;
    let summary = notes.summary()?;

    let (doc, page, layer) = PdfDocument::new(
        options.title.clone(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let title_font = builtin(&doc, BuiltinFont::HelveticaBold)?;
    let heading_font = builtin(&doc, BuiltinFont::HelveticaBoldOblique)?;
    let body_font = builtin(&doc, BuiltinFont::Courier)?;

    {
        let mut cursor = FlowCursor::new(&doc, doc.get_page(page).get_layer(layer));

        // Title block
        cursor.space(SECTION_GAP_MM);
        cursor.line(
            &options.title,
            TITLE_SIZE,
            TITLE_LEADING_MM,
            &title_font,
            centered_x(&options.title, TITLE_SIZE),
        );
        cursor.space(SECTION_GAP_MM);

        render_section(
            &mut cursor,
            "Transcript:",
            transcript,
            options.wrap_columns,
            &heading_font,
            &body_font,
        );
        render_section(
            &mut cursor,
            "Summary:",
            summary,
            options.wrap_columns,
            &heading_font,
            &body_font,
        );

        if let Some(questions) = notes.questions() {
            cursor.line(
                "Study Questions:",
                HEADING_SIZE,
                HEADING_LEADING_MM,
                &heading_font,
                MARGIN_MM,
            );
            cursor.space(3.5);
            for item in bullet_items(questions) {
                for wrapped in textwrap::wrap(&item, options.wrap_columns) {
                    cursor.line(&wrapped, BODY_SIZE, BODY_LEADING_MM, &body_font, MARGIN_MM);
                }
            }
        }
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| LecternError::Render {
            message: e.to_string(),
        })?;

    Ok(bytes)
}

/// Heading plus wrapped body paragraphs, one flow line per wrapped row.
fn render_section(
    cursor: &mut FlowCursor<'_>,
    heading: &str,
    body: &str,
    wrap_columns: usize,
    heading_font: &IndirectFontRef,
    body_font: &IndirectFontRef,
) {
    cursor.line(heading, HEADING_SIZE, HEADING_LEADING_MM, heading_font, MARGIN_MM);
    cursor.space(3.5);
    for line in textwrap::wrap(body, wrap_columns.max(1)) {
        cursor.line(&line, BODY_SIZE, BODY_LEADING_MM, body_font, MARGIN_MM);
    }
    cursor.space(SECTION_GAP_MM);
}

/// Split question text into bullet items: one per non-blank line, existing
/// list markers normalized to a single bullet.
fn bullet_items(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| {
            let stripped = line
                .trim_start_matches(['-', '*', '\u{2022}'])
                .trim_start();
            format!("\u{2022} {stripped}")
        })
        .collect()
}

fn builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font).map_err(|e| LecternError::Render {
        message: format!("builtin font unavailable: {e}"),
    })
}
