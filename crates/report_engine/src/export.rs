//! PDF report composition.
//!
//! The report is an A4 page with an optional logo, a title, the generation
//! date, a separator rule and a table of the selected columns. Long tables
//! continue on new pages with the header row repeated.
//!
//! The whole document is rendered in memory before anything touches the
//! output directory, so a failure never leaves a partial file behind.

use std::io::Cursor;
use std::path::PathBuf;

use bytes::Bytes;
use chrono::NaiveDateTime;
use printpdf::image_crate::{self, DynamicImage};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};
use report_core::{Column, UserRecord};
use report_logging::{report_info, report_warn};
use thiserror::Error;

use crate::assets::{AssetError, AssetLoader};
use crate::filename::report_filename;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::ExportSummary;

pub const DEFAULT_REPORT_TITLE: &str = report_core::DEFAULT_TITLE;
pub const DEFAULT_FONT_PATH: &str = "fonts/DejaVuSans.ttf";
pub const DEFAULT_LOGO_PATH: &str = "logo.png";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const LOGO_SIZE: f32 = 20.0;
const LOGO_TOP: f32 = 10.0;
const HEADER_TEXT_LEFT: f32 = 40.0;
const RULE_Y: f32 = 32.0;
const TABLE_TOP: f32 = 38.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 2.0;
const TITLE_SIZE: f32 = 16.0;
const DATE_SIZE: f32 = 10.0;
const CELL_SIZE: f32 = 9.0;
const PT_TO_MM: f32 = 0.352_778;
/// Average advance of DejaVu Sans glyphs, as a fraction of the font size.
const GLYPH_WIDTH_EM: f32 = 0.58;

const HEADER_FILL: (u8, u8, u8) = (99, 102, 241);
const STRIPE_FILL: (u8, u8, u8) = (245, 247, 250);
const RULE_COLOR: (u8, u8, u8) = (200, 200, 200);
const TEXT_DARK: (u8, u8, u8) = (33, 37, 41);
const TEXT_LIGHT: (u8, u8, u8) = (255, 255, 255);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to load report font: {0}")]
    FontLoad(String),
    /// Never aborts an export; reported through logging only.
    #[error("failed to load report logo: {0}")]
    ImageLoad(String),
    #[error("failed to render report: {0}")]
    Render(String),
    #[error("failed to write report: {0}")]
    Persist(#[from] PersistError),
}

/// What to do when the configured font cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFallback {
    /// Abort the export with [`ExportError::FontLoad`].
    #[default]
    Fail,
    /// Log a warning and use built-in Helvetica. Cyrillic text will not render.
    Builtin,
}

#[derive(Debug, Clone)]
pub enum ReportFont {
    /// TrueType bytes embedded in the document.
    Embedded(Bytes),
    Builtin,
}

#[derive(Debug, Clone)]
pub struct ReportAssets {
    pub font: ReportFont,
    pub logo: Option<DynamicImage>,
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub generated_at: NaiveDateTime,
    pub font_fallback: FontFallback,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub title: String,
    pub font_path: String,
    /// `None` disables the logo.
    pub logo_path: Option<String>,
    pub font_fallback: FontFallback,
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            font_path: DEFAULT_FONT_PATH.to_string(),
            logo_path: Some(DEFAULT_LOGO_PATH.to_string()),
            font_fallback: FontFallback::Fail,
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Load assets, compose the report and write it to `settings.output_dir`.
pub async fn export_report(
    loader: &AssetLoader,
    settings: &ExportSettings,
    records: Vec<UserRecord>,
    columns: Vec<Column>,
    generated_at: NaiveDateTime,
) -> Result<ExportSummary, ExportError> {
    let assets = load_assets(loader, settings).await?;
    let logo_embedded = assets.logo.is_some();
    let options = ReportOptions {
        title: settings.title.clone(),
        generated_at,
        font_fallback: settings.font_fallback,
    };
    let row_count = records.len();

    let pdf = tokio::task::spawn_blocking(move || {
        compose_report(&records, &columns, &assets, &options)
    })
    .await
    .map_err(|err| ExportError::Render(err.to_string()))??;

    let filename = report_filename(generated_at.date());
    let writer = AtomicFileWriter::new(settings.output_dir.clone());
    let output_path = writer.write(&filename, &pdf)?;
    report_info!(
        "Report written path={:?} rows={} bytes={}",
        output_path,
        row_count,
        pdf.len()
    );

    Ok(ExportSummary {
        filename,
        output_path,
        row_count,
        byte_len: pdf.len(),
        logo_embedded,
    })
}

/// Font is mandatory (subject to `font_fallback`); the logo is best-effort.
pub async fn load_assets(
    loader: &AssetLoader,
    settings: &ExportSettings,
) -> Result<ReportAssets, ExportError> {
    let font = match loader.load(&settings.font_path).await {
        Ok(bytes) => ReportFont::Embedded(bytes),
        Err(err) => {
            check_fallback(settings.font_fallback, err.to_string())?;
            ReportFont::Builtin
        }
    };

    let logo = match &settings.logo_path {
        Some(path) => match load_logo(loader, path).await {
            Ok(image) => Some(image),
            Err(err) => {
                report_warn!("{}; continuing without logo", err);
                None
            }
        },
        None => None,
    };

    Ok(ReportAssets { font, logo })
}

async fn load_logo(loader: &AssetLoader, path: &str) -> Result<DynamicImage, ExportError> {
    let bytes = loader
        .load(path)
        .await
        .map_err(|err: AssetError| ExportError::ImageLoad(err.to_string()))?;
    image_crate::load_from_memory(&bytes).map_err(|err| ExportError::ImageLoad(err.to_string()))
}

/// Errors under [`FontFallback::Fail`]; otherwise warns that Helvetica is used.
fn check_fallback(fallback: FontFallback, reason: String) -> Result<(), ExportError> {
    match fallback {
        FontFallback::Fail => Err(ExportError::FontLoad(reason)),
        FontFallback::Builtin => {
            report_warn!(
                "Report font unavailable ({}); using built-in Helvetica, non-Latin text will not render",
                reason
            );
            Ok(())
        }
    }
}

/// Render the report into PDF bytes.
///
/// `columns` may be empty; the document then carries only its header block.
pub fn compose_report(
    records: &[UserRecord],
    columns: &[Column],
    assets: &ReportAssets,
    options: &ReportOptions,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new(&options.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = register_font(&doc, &assets.font, options.font_fallback)?;
    let layer = doc.get_page(page).get_layer(layer);

    if let Some(logo) = &assets.logo {
        draw_logo(&layer, logo);
    }

    set_fill(&layer, TEXT_DARK);
    layer.use_text(
        options.title.clone(),
        TITLE_SIZE,
        Mm(HEADER_TEXT_LEFT),
        from_top(18.0),
        &font,
    );
    layer.use_text(
        format!(
            "Дата формирования: {}",
            options.generated_at.format("%d.%m.%Y")
        ),
        DATE_SIZE,
        Mm(HEADER_TEXT_LEFT),
        from_top(25.0),
        &font,
    );

    layer.set_outline_color(rgb(RULE_COLOR));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), from_top(RULE_Y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), from_top(RULE_Y)), false),
        ],
        is_closed: false,
    });

    if !columns.is_empty() {
        let mut table = TableWriter::new(&doc, layer, &font, columns);
        table.header_row();
        for (index, record) in records.iter().enumerate() {
            table.body_row(record, index);
        }
    }

    doc.save_to_bytes()
        .map_err(|err| ExportError::Render(err.to_string()))
}

fn register_font(
    doc: &PdfDocumentReference,
    font: &ReportFont,
    fallback: FontFallback,
) -> Result<IndirectFontRef, ExportError> {
    let builtin = || {
        doc.add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| ExportError::Render(err.to_string()))
    };
    match font {
        ReportFont::Embedded(bytes) => match doc.add_external_font(Cursor::new(bytes.to_vec())) {
            Ok(font) => Ok(font),
            Err(err) => {
                check_fallback(fallback, err.to_string())?;
                builtin()
            }
        },
        ReportFont::Builtin => builtin(),
    }
}

fn draw_logo(layer: &PdfLayerReference, logo: &DynamicImage) {
    let (width_px, height_px) = (logo.width().max(1) as f32, logo.height().max(1) as f32);
    // Pick the DPI that makes the width LOGO_SIZE mm, then stretch the height to match.
    let dpi = width_px * 25.4 / LOGO_SIZE;
    let natural_height = height_px * 25.4 / dpi;
    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(logo.to_rgb8()));
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN)),
            translate_y: Some(from_top(LOGO_TOP + LOGO_SIZE)),
            scale_y: Some(LOGO_SIZE / natural_height),
            dpi: Some(dpi),
            ..ImageTransform::default()
        },
    );
}

/// Draws table rows top to bottom, opening new pages as needed.
struct TableWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: &'a IndirectFontRef,
    columns: &'a [Column],
    column_width: f32,
    max_chars: usize,
    row_top: f32,
}

impl<'a> TableWriter<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        layer: PdfLayerReference,
        font: &'a IndirectFontRef,
        columns: &'a [Column],
    ) -> Self {
        let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns.len() as f32;
        let glyph_width = CELL_SIZE * PT_TO_MM * GLYPH_WIDTH_EM;
        let max_chars = (((column_width - 2.0 * CELL_PADDING) / glyph_width).floor() as usize).max(1);
        Self {
            doc,
            layer,
            font,
            columns,
            column_width,
            max_chars,
            row_top: TABLE_TOP,
        }
    }

    fn header_row(&mut self) {
        self.fill_row(HEADER_FILL);
        set_fill(&self.layer, TEXT_LIGHT);
        let labels: Vec<&str> = self.columns.iter().map(|c| c.label()).collect();
        self.write_cells(&labels);
        self.row_top += ROW_HEIGHT;
    }

    fn body_row(&mut self, record: &UserRecord, index: usize) {
        if self.row_top + ROW_HEIGHT > PAGE_HEIGHT - MARGIN {
            self.new_page();
        }
        if index % 2 == 1 {
            self.fill_row(STRIPE_FILL);
        }
        set_fill(&self.layer, TEXT_DARK);
        let cells: Vec<&str> = self.columns.iter().map(|&c| record.field(c)).collect();
        self.write_cells(&cells);
        self.row_top += ROW_HEIGHT;
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.row_top = MARGIN;
        self.header_row();
    }

    fn fill_row(&self, color: (u8, u8, u8)) {
        set_fill(&self.layer, color);
        self.layer.add_rect(Rect::new(
            Mm(MARGIN),
            from_top(self.row_top + ROW_HEIGHT),
            Mm(PAGE_WIDTH - MARGIN),
            from_top(self.row_top),
        ));
    }

    fn write_cells(&self, cells: &[&str]) {
        let baseline = from_top(self.row_top + ROW_HEIGHT - 2.6);
        for (i, text) in cells.iter().enumerate() {
            let x = MARGIN + i as f32 * self.column_width + CELL_PADDING;
            self.layer
                .use_text(truncate(text, self.max_chars), CELL_SIZE, Mm(x), baseline, self.font);
        }
    }
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with `…`.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn from_top(mm: f32) -> Mm {
    Mm(PAGE_HEIGHT - mm)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn set_fill(layer: &PdfLayerReference, color: (u8, u8, u8)) {
    layer.set_fill_color(rgb(color));
}
