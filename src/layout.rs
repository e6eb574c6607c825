//! Page geometry and drawing primitives.
//!
//! A4 portrait, millimetres, coordinates measured from the top-left like the
//! layout tables in the design notes; [`Sheet`] converts to printpdf's
//! bottom-left origin at the call site. Every draw call is also recorded as a
//! [`DrawOp`] so tests can assert on positions without parsing PDF output.

use image::DynamicImage;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Line, Mm,
    PdfLayerReference, Point, Px, Rect, Rgb,
};

use crate::config;
use crate::models::TemplateData;

// ─── Page geometry (mm) ───────────────────────────────────────────────────────

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = 170.0;

/// Header logo slot: full content width, 30mm tall, 10mm from the top.
pub const SLOT_X: f32 = MARGIN;
pub const SLOT_Y: f32 = 10.0;
pub const SLOT_WIDTH: f32 = 170.0;
pub const SLOT_HEIGHT: f32 = 30.0;
/// The logo itself is drawn at a fixed 60x30mm, centered in the slot.
pub const LOGO_WIDTH: f32 = 60.0;
pub const LOGO_HEIGHT: f32 = 30.0;

pub const TITLE_Y: f32 = 50.0;
pub const DATE_Y: f32 = 58.0;
pub const CLINIC_LINE_Y: f32 = 64.0;

pub const PATIENT_HEADING_Y: f32 = 70.0;
pub const CLINICIAN_HEADING_Y: f32 = 104.0;
/// First y available to kind-specific body content.
pub const BODY_TOP: f32 = 132.0;
/// Body content must stop before the footer band.
pub const BODY_BOTTOM: f32 = 245.0;

pub const FOOTER_BAND_Y: f32 = 250.0;
pub const FOOTER_BAND_HEIGHT: f32 = 36.0;

/// Vertical advance for one 10pt body line.
pub const BODY_LINE_HEIGHT: f32 = 5.0;

/// Point-to-millimetre conversion.
const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_FACTOR: f32 = 0.5;

// ─── Draw-op log ──────────────────────────────────────────────────────────────

/// Record of one drawing call, in top-left mm coordinates. Tests use the log
/// to verify layout invariants (placeholder rendering, logo-independent
/// positioning, validation-before-drawing) without decoding the PDF.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        filled: bool,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

// ─── Sheet ────────────────────────────────────────────────────────────────────

pub struct Fonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
}

/// One page plus its fonts and the op log.
pub struct Sheet {
    layer: PdfLayerReference,
    fonts: Fonts,
    ops: Vec<DrawOp>,
}

fn from_top(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

/// Rough width of `text` at `size` pt in mm. Builtin fonts carry no metrics,
/// so centering works off the average glyph advance.
pub fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVG_GLYPH_FACTOR
}

/// How many characters fit into `width` mm at `size` pt.
pub fn max_chars_for(width: f32, size: f32) -> usize {
    (width / (size * PT_TO_MM * AVG_GLYPH_FACTOR)).floor() as usize
}

/// Simple word-wrap for PDF text rendering. The budget counts characters,
/// not bytes, so accented words fill their line like unaccented ones.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars + word_chars + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

impl Sheet {
    pub fn new(layer: PdfLayerReference, fonts: Fonts) -> Self {
        Self {
            layer,
            fonts,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    fn write(&mut self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        self.layer.use_text(text, size, Mm(x), from_top(y), font);
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            bold,
        });
    }

    pub fn text(&mut self, text: &str, size: f32, x: f32, y: f32) {
        self.write(text, size, x, y, false);
    }

    pub fn text_bold(&mut self, text: &str, size: f32, x: f32, y: f32) {
        self.write(text, size, x, y, true);
    }

    pub fn text_centered(&mut self, text: &str, size: f32, center_x: f32, y: f32) {
        let x = center_x - approx_text_width(text, size) / 2.0;
        self.write(text, size, x, y, false);
    }

    pub fn text_centered_bold(&mut self, text: &str, size: f32, center_x: f32, y: f32) {
        let x = center_x - approx_text_width(text, size) / 2.0;
        self.write(text, size, x, y, true);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.layer.set_outline_thickness(0.5);
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), from_top(y1)), false),
                (Point::new(Mm(x2), from_top(y2)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    pub fn filled_rect(&mut self, x: f32, y: f32, width: f32, height: f32, rgb: (f32, f32, f32)) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(rgb.0, rgb.1, rgb.2, None)));
        let rect = Rect::new(Mm(x), from_top(y + height), Mm(x + width), from_top(y))
            .with_mode(PaintMode::Fill)
            .with_winding(WindingOrder::NonZero);
        self.layer.add_rect(rect);
        // Reset so following text is black again.
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            filled: true,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.layer.set_outline_thickness(0.5);
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
        let rect = Rect::new(Mm(x), from_top(y + height), Mm(x + width), from_top(y))
            .with_mode(PaintMode::Stroke)
            .with_winding(WindingOrder::NonZero);
        self.layer.add_rect(rect);
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            filled: false,
        });
    }

    /// Embeds a raster image at exactly `width` x `height` mm. Transparency
    /// is flattened against white first; PDF XObjects here are plain RGB.
    pub fn image(&mut self, img: &DynamicImage, x: f32, y: f32, width: f32, height: f32) {
        let rgba = img.to_rgba8();
        let (px_w, px_h) = rgba.dimensions();

        let mut rgb = image::RgbImage::new(px_w, px_h);
        for (ix, iy, pixel) in rgba.enumerate_pixels() {
            let image::Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
            rgb.put_pixel(ix, iy, image::Rgb([blend(r), blend(g), blend(b)]));
        }

        let xobject = ImageXObject {
            width: Px(px_w as usize),
            height: Px(px_h as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        };

        // With dpi fixed, scale factors force the exact target size.
        let dpi = 300.0;
        let natural_w = px_w as f32 * 25.4 / dpi;
        let natural_h = px_h as f32 * 25.4 / dpi;

        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(from_top(y + height)),
                scale_x: Some(width / natural_w),
                scale_y: Some(height / natural_h),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        self.ops.push(DrawOp::Image {
            x,
            y,
            width,
            height,
        });
    }
}

// ─── Shared page furniture ────────────────────────────────────────────────────

/// Logo slot + document title + display date + clinic identity line.
///
/// When the logo is unavailable the two-line text mark occupies the exact
/// same slot, so everything below is positioned identically either way.
pub fn draw_header(sheet: &mut Sheet, logo: Option<&DynamicImage>, title: &str, t: &TemplateData) {
    let slot_center_x = SLOT_X + SLOT_WIDTH / 2.0;
    match logo {
        Some(img) => {
            let x = SLOT_X + (SLOT_WIDTH - LOGO_WIDTH) / 2.0;
            sheet.image(img, x, SLOT_Y, LOGO_WIDTH, LOGO_HEIGHT);
        }
        None => {
            sheet.text_centered_bold("PRONTIVUS", 16.0, slot_center_x, SLOT_Y + 14.0);
            sheet.text_centered("HORIZONTAL", 10.0, slot_center_x, SLOT_Y + 22.0);
        }
    }

    sheet.text_centered_bold(title, 14.0, PAGE_WIDTH / 2.0, TITLE_Y);
    sheet.text_centered(&t.date, 10.0, PAGE_WIDTH / 2.0, DATE_Y);
    sheet.text_centered(
        &format!(
            "{} | {} | Tel: {}",
            t.clinic_name, t.clinic_address, t.clinic_phone
        ),
        8.0,
        PAGE_WIDTH / 2.0,
        CLINIC_LINE_Y,
    );
}

pub fn draw_patient_block(sheet: &mut Sheet, t: &TemplateData) {
    sheet.text_bold("DADOS DO PACIENTE", 11.0, MARGIN, PATIENT_HEADING_Y);
    sheet.text(
        &format!("Nome: {}", t.patient_name),
        10.0,
        MARGIN,
        PATIENT_HEADING_Y + 8.0,
    );
    sheet.text(
        &format!("Documento: {}", t.patient_id),
        10.0,
        MARGIN,
        PATIENT_HEADING_Y + 15.0,
    );
    sheet.text(
        &format!("Idade: {}", t.patient_age),
        10.0,
        MARGIN,
        PATIENT_HEADING_Y + 22.0,
    );
}

pub fn draw_clinician_block(sheet: &mut Sheet, t: &TemplateData) {
    sheet.text_bold("MÉDICO RESPONSÁVEL", 11.0, MARGIN, CLINICIAN_HEADING_Y);
    sheet.text(
        &format!("Dr(a). {}", t.doctor_name),
        10.0,
        MARGIN,
        CLINICIAN_HEADING_Y + 8.0,
    );
    sheet.text(
        &format!("CRM: {}", t.doctor_crm),
        10.0,
        MARGIN,
        CLINICIAN_HEADING_Y + 15.0,
    );
}

/// Shaded bottom band: city + date, signature line, clinician identity and
/// the branding caption.
pub fn draw_footer(sheet: &mut Sheet, t: &TemplateData) {
    sheet.filled_rect(
        15.0,
        FOOTER_BAND_Y,
        PAGE_WIDTH - 30.0,
        FOOTER_BAND_HEIGHT,
        (0.94, 0.94, 0.94),
    );

    sheet.text_centered(
        &format!("{}, {}", t.clinic_city(), t.date),
        10.0,
        PAGE_WIDTH / 2.0,
        FOOTER_BAND_Y + 8.0,
    );

    sheet.line(70.0, FOOTER_BAND_Y + 18.0, 140.0, FOOTER_BAND_Y + 18.0);
    sheet.text_centered(
        &format!("Dr(a). {}", t.doctor_name),
        10.0,
        PAGE_WIDTH / 2.0,
        FOOTER_BAND_Y + 24.0,
    );
    sheet.text_centered(
        &format!("CRM: {}", t.doctor_crm),
        9.0,
        PAGE_WIDTH / 2.0,
        FOOTER_BAND_Y + 30.0,
    );

    sheet.text_centered(config::BRANDING_CAPTION, 8.0, PAGE_WIDTH / 2.0, 291.0);
}
