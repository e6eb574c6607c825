//! Tabular rendering with two interchangeable engines.
//!
//! The grid engine is the preferred path: it wraps cell text, sizes each row
//! to its content and reports the exact final extent. The manual engine is
//! the degradation path (fixed row height, truncated cells, estimated
//! extent). Body composers only consume [`TableExtent`], so either engine
//! can run without affecting the content positioned below the table.

use crate::layout::{max_chars_for, wrap_text, Sheet, MARGIN};

pub struct TableSpec {
    pub headers: &'static [&'static str],
    /// Column widths in mm. Their sum is the table width.
    pub widths: &'static [f32],
    pub row_height: f32,
}

pub const MEDICATION_TABLE: TableSpec = TableSpec {
    headers: &["Medicamento", "Dosagem", "Frequência", "Duração"],
    widths: &[70.0, 40.0, 40.0, 40.0],
    row_height: 8.0,
};

pub const RECEIPT_TABLE: TableSpec = TableSpec {
    headers: &["Serviço", "Qtd", "Valor Unit.", "Total"],
    widths: &[80.0, 20.0, 30.0, 30.0],
    row_height: 8.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableEngine {
    #[default]
    Grid,
    Manual,
}

/// Where the table ended, in top-left mm. Exact for the grid engine,
/// row-count estimate for the manual engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableExtent {
    pub end_y: f32,
}

const HEADER_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 2.0;
const CELL_FONT: f32 = 9.0;
const CELL_LINE_HEIGHT: f32 = 4.0;

fn column_x(spec: &TableSpec, col: usize) -> f32 {
    MARGIN + spec.widths[..col].iter().sum::<f32>()
}

fn table_width(spec: &TableSpec) -> f32 {
    spec.widths.iter().sum()
}

fn wrapped_cells(spec: &TableSpec, row: &[String]) -> Vec<Vec<String>> {
    row.iter()
        .enumerate()
        .map(|(col, cell)| {
            let usable = spec.widths[col] - 2.0 * CELL_PADDING;
            wrap_text(cell, max_chars_for(usable, CELL_FONT).max(1))
        })
        .collect()
}

fn row_height_for(spec: &TableSpec, line_count: usize) -> f32 {
    (line_count as f32 * CELL_LINE_HEIGHT + 3.0).max(spec.row_height)
}

/// Height a row will occupy, derived from wrap counts alone. Both engines
/// share this arithmetic so their reported extents never drift apart.
fn estimated_row_height(spec: &TableSpec, row: &[String]) -> f32 {
    let line_count = wrapped_cells(spec, row).iter().map(Vec::len).max().unwrap_or(1);
    row_height_for(spec, line_count)
}

pub fn draw_table(
    sheet: &mut Sheet,
    spec: &TableSpec,
    rows: &[Vec<String>],
    y: f32,
    engine: TableEngine,
) -> TableExtent {
    match engine {
        TableEngine::Grid => draw_grid_table(sheet, spec, rows, y),
        TableEngine::Manual => draw_manual_table(sheet, spec, rows, y),
    }
}

/// Preferred engine: content-sized rows, wrapped cells, exact extent.
fn draw_grid_table(sheet: &mut Sheet, spec: &TableSpec, rows: &[Vec<String>], y: f32) -> TableExtent {
    let width = table_width(spec);

    sheet.filled_rect(MARGIN, y, width, HEADER_HEIGHT, (0.85, 0.89, 0.96));
    for (col, header) in spec.headers.iter().enumerate() {
        sheet.text_bold(header, CELL_FONT, column_x(spec, col) + CELL_PADDING, y + 5.5);
    }

    let mut cursor = y + HEADER_HEIGHT;
    for row in rows {
        let wrapped = wrapped_cells(spec, row);
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let row_height = row_height_for(spec, line_count);

        for (col, lines) in wrapped.iter().enumerate() {
            let x = column_x(spec, col) + CELL_PADDING;
            for (i, line) in lines.iter().enumerate() {
                sheet.text(line, CELL_FONT, x, cursor + 5.0 + i as f32 * CELL_LINE_HEIGHT);
            }
        }

        cursor += row_height;
        sheet.line(MARGIN, cursor, MARGIN + width, cursor);
    }

    sheet.stroke_rect(MARGIN, y, width, cursor - y);
    TableExtent { end_y: cursor }
}

/// Degradation path: colored header band, alternating row shading,
/// single-line truncated cells at the fixed column offsets, bounding
/// rectangle. Nothing here is measured after drawing; each row's band height
/// is estimated up front from its wrap counts so the reported extent stays
/// within one row height of what the grid engine would produce.
fn draw_manual_table(
    sheet: &mut Sheet,
    spec: &TableSpec,
    rows: &[Vec<String>],
    y: f32,
) -> TableExtent {
    let width = table_width(spec);

    sheet.filled_rect(MARGIN, y, width, HEADER_HEIGHT, (0.85, 0.89, 0.96));
    for (col, header) in spec.headers.iter().enumerate() {
        sheet.text_bold(header, CELL_FONT, column_x(spec, col) + CELL_PADDING, y + 5.5);
    }

    let mut cursor = y + HEADER_HEIGHT;
    for (index, row) in rows.iter().enumerate() {
        let band_height = estimated_row_height(spec, row);
        if index % 2 == 1 {
            sheet.filled_rect(MARGIN, cursor, width, band_height, (0.96, 0.96, 0.96));
        }
        for (col, cell) in row.iter().enumerate() {
            let usable = spec.widths[col] - 2.0 * CELL_PADDING;
            let truncated = truncate(cell, max_chars_for(usable, CELL_FONT).max(1));
            sheet.text(
                &truncated,
                CELL_FONT,
                column_x(spec, col) + CELL_PADDING,
                cursor + 5.5,
            );
        }
        cursor += band_height;
    }

    sheet.stroke_rect(MARGIN, y, width, cursor - y);
    TableExtent { end_y: cursor }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
