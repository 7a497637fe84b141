//! Low-level drawing surface on top of `printpdf`.
//!
//! The chart drawers and the orchestrator talk to [`Surface`] instead of the
//! backend directly.  All coordinates are millimetres measured from the
//! top-left corner of the page (the convention the layout math is written
//! in); the conversion to the PDF's bottom-left origin happens here and
//! nowhere else.

use std::io::{BufWriter, Cursor};

use printpdf::indices::{PdfLayerIndex, PdfPageIndex};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::error::{RenderError, Result};
use crate::layout::PageSink;

const PT_TO_MM: f64 = 0.352_778;

/// An 8-bit RGB color, converted to the backend's unit-interval model on use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn to_color(self) -> Color {
        Color::Rgb(Rgb::new(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            None,
        ))
    }
}

/// Font role used for a piece of text.  The two builtin Helvetica faces are
/// registered once per document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRole {
    Regular,
    Bold,
}

/// A paginated PDF drawing surface.
///
/// Pages are created on demand and never closed explicitly; the backend
/// finalizes them when the document is saved.  Every page keeps one layer,
/// and the surface remembers all of them so a footer pass can revisit pages
/// after the content is laid out.
pub struct Surface {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f64,
    height: f64,
}

impl Surface {
    /// Creates a document with a single empty page of the given size (mm).
    pub fn new(title: &str, width: f64, height: f64) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(Self {
            doc,
            pages: vec![(page, layer)],
            regular,
            bold,
            width,
            height,
        })
    }

    pub fn page_width(&self) -> f64 {
        self.width
    }

    pub fn page_height(&self) -> f64 {
        self.height
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn layer_at(&self, index: usize) -> PdfLayerReference {
        let (page, layer) = self.pages[index];
        self.doc.get_page(page).get_layer(layer)
    }

    fn layer(&self) -> PdfLayerReference {
        self.layer_at(self.pages.len() - 1)
    }

    fn font(&self, role: FontRole) -> &IndirectFontRef {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
        }
    }

    /// Places a single line of text with its baseline at `y` from the top.
    pub fn text(&self, text: &str, size: f64, x: f64, y: f64, role: FontRole, color: Rgb8) {
        self.text_on_page(self.pages.len() - 1, text, size, x, y, role, color);
    }

    /// Like [`Surface::text`] but addressing an already-created page, used by
    /// the footer pass once the final page count is known.
    pub fn text_on_page(
        &self,
        page: usize,
        text: &str,
        size: f64,
        x: f64,
        y: f64,
        role: FontRole,
        color: Rgb8,
    ) {
        let layer = self.layer_at(page);
        layer.set_fill_color(color.to_color());
        layer.use_text(text, size, Mm(x), Mm(self.height - y), self.font(role));
    }

    /// Fills an axis-aligned rectangle whose top-left corner is `(x, y)`.
    pub fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: Rgb8) {
        let layer = self.layer();
        layer.set_fill_color(color.to_color());
        layer.add_shape(self.rect_shape(x, y, w, h, true, false));
    }

    /// Strokes the outline of a rectangle whose top-left corner is `(x, y)`.
    pub fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64, color: Rgb8) {
        let layer = self.layer();
        layer.set_outline_color(color.to_color());
        layer.set_outline_thickness(0.5);
        layer.add_shape(self.rect_shape(x, y, w, h, false, true));
    }

    fn rect_shape(&self, x: f64, y: f64, w: f64, h: f64, fill: bool, stroke: bool) -> Line {
        let bottom = self.height - (y + h);
        let top = self.height - y;
        Line {
            points: vec![
                (Point::new(Mm(x), Mm(bottom)), false),
                (Point::new(Mm(x + w), Mm(bottom)), false),
                (Point::new(Mm(x + w), Mm(top)), false),
                (Point::new(Mm(x), Mm(top)), false),
            ],
            is_closed: true,
            has_fill: fill,
            has_stroke: stroke,
            is_clipping_path: false,
        }
    }

    /// Strokes a straight segment between two points.
    pub fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64, color: Rgb8) {
        self.line_on_page(self.pages.len() - 1, x1, y1, x2, y2, thickness, color);
    }

    /// Segment variant addressing an already-created page (footer rules).
    pub fn line_on_page(
        &self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        thickness: f64,
        color: Rgb8,
    ) {
        let layer = self.layer_at(page);
        layer.set_outline_color(color.to_color());
        layer.set_outline_thickness(thickness);
        layer.add_shape(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.height - y1)), false),
                (Point::new(Mm(x2), Mm(self.height - y2)), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    /// Strokes a connected polyline through the given points.
    pub fn polyline(&self, points: &[(f64, f64)], thickness: f64, color: Rgb8) {
        if points.len() < 2 {
            return;
        }
        let layer = self.layer();
        layer.set_outline_color(color.to_color());
        layer.set_outline_thickness(thickness);
        layer.add_shape(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(self.height - y)), false))
                .collect(),
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    /// Fills a triangle and strokes its edges in the given outline color.
    pub fn fill_triangle(
        &self,
        a: (f64, f64),
        b: (f64, f64),
        c: (f64, f64),
        fill: Rgb8,
        outline: Rgb8,
    ) {
        let layer = self.layer();
        layer.set_fill_color(fill.to_color());
        layer.set_outline_color(outline.to_color());
        layer.set_outline_thickness(0.2);
        layer.add_shape(Line {
            points: [a, b, c]
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(self.height - y)), false))
                .collect(),
            is_closed: true,
            has_fill: true,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    /// Fills a circle approximated by a 16-gon, which is indistinguishable
    /// from a true circle at point-marker radii.
    pub fn fill_circle(&self, cx: f64, cy: f64, radius: f64, color: Rgb8) {
        const SEGMENTS: usize = 16;
        let layer = self.layer();
        layer.set_fill_color(color.to_color());
        let points = (0..SEGMENTS)
            .map(|i| {
                let angle = (i as f64 / SEGMENTS as f64) * std::f64::consts::TAU;
                let x = cx + angle.cos() * radius;
                let y = cy + angle.sin() * radius;
                (Point::new(Mm(x), Mm(self.height - y)), false)
            })
            .collect();
        layer.add_shape(Line {
            points,
            is_closed: true,
            has_fill: true,
            has_stroke: false,
            is_clipping_path: false,
        });
    }

    /// Places a decoded raster image with its top-left corner at `(x, y)`,
    /// scaled to `width` while keeping the aspect ratio.  Returns the height
    /// the image occupies on the page.
    pub fn place_image(&self, img: &image::DynamicImage, x: f64, y: f64, width: f64) -> f64 {
        use image::GenericImageView;

        let (px_w, px_h) = img.dimensions();
        if px_w == 0 || px_h == 0 {
            return 0.0;
        }
        let height = px_h as f64 * width / px_w as f64;
        // printpdf sizes embedded images through their DPI.
        let dpi = px_w as f64 * 25.4 / width;
        let pdf_image = printpdf::Image::from_dynamic_image(img);
        pdf_image.add_to_layer(
            self.layer(),
            Some(Mm(x)),
            Some(Mm(self.height - (y + height))),
            None,
            None,
            None,
            Some(dpi),
        );
        height
    }

    /// Estimated width of `text` in millimetres at the given point size.
    ///
    /// The builtin Helvetica metrics are not exposed by the backend, so the
    /// width is estimated from per-glyph-class advance factors.  The estimate
    /// errs slightly wide, which for wrapping means lines break early rather
    /// than overflow.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        text_width(text, size)
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width` mm.
    pub fn wrap_text(&self, text: &str, size: f64, max_width: f64) -> Vec<String> {
        wrap_text(text, size, max_width)
    }

    /// Serializes the document, consuming the surface.
    pub fn save_to_bytes(self) -> Result<Vec<u8>> {
        let mut writer = BufWriter::new(Cursor::new(Vec::new()));
        self.doc
            .save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let cursor = writer
            .into_inner()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

impl PageSink for Surface {
    fn begin_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(self.width), Mm(self.height), "Layer 1");
        self.pages.push((page, layer));
    }
}

/// Approximate advance width of one Helvetica glyph in em units.
fn glyph_em(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' | '!' | '.' | ',' | ':' | ';' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | ' ' => 0.33,
        'm' | 'M' | 'W' => 0.89,
        'w' | '%' | '@' => 0.72,
        'A'..='Z' | '0'..='9' => 0.67,
        '\u{2022}' => 0.35,
        _ => 0.52,
    }
}

fn text_width(text: &str, size: f64) -> f64 {
    let em: f64 = text.chars().map(glyph_em).sum();
    em * size * PT_TO_MM
}

fn wrap_text(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_lines_respect_the_width_limit() {
        let text = "Active team members: 3 working on 2 projects across the laboratory";
        let lines = wrap_text(text, 11.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 11.0) <= 60.0, "line too wide: {line}");
        }
    }

    #[test]
    fn wrap_preserves_every_word_in_order() {
        let text = "Experiment completion rate: 100%";
        let lines = wrap_text(text, 11.0, 18.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("done", 11.0, 170.0).len(), 1);
    }

    #[test]
    fn overlong_single_word_is_not_dropped() {
        let lines = wrap_text("supercalifragilisticexpialidocious", 11.0, 5.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "supercalifragilisticexpialidocious");
    }

    #[test]
    fn width_grows_with_text_length() {
        assert!(text_width("toolbox", 10.0) > text_width("tool", 10.0));
        assert!(text_width("mm", 10.0) > text_width("il", 10.0));
    }
}
