use crate::layout::{max_chars_for, wrap_text, Sheet, BODY_LINE_HEIGHT, BODY_TOP, CONTENT_WIDTH, MARGIN};
use crate::models::PrescriptionData;
use crate::table::{draw_table, TableEngine, MEDICATION_TABLE};

/// Medication table plus optional notes. Notes are positioned from the
/// table's reported extent so neither engine can cause an overlap.
pub(super) fn body(sheet: &mut Sheet, data: &PrescriptionData, engine: TableEngine) {
    sheet.text_bold("PRESCRIÇÃO", 11.0, MARGIN, BODY_TOP);

    let rows = data.medication_rows();
    let extent = draw_table(sheet, &MEDICATION_TABLE, &rows, BODY_TOP + 6.0, engine);

    if let Some(notes) = &data.notes {
        let y = extent.end_y + 8.0;
        sheet.text_bold("Observações:", 10.0, MARGIN, y);
        let max = max_chars_for(CONTENT_WIDTH, 10.0);
        for (i, line) in wrap_text(notes, max).iter().enumerate() {
            sheet.text(line, 10.0, MARGIN, y + 6.0 + i as f32 * BODY_LINE_HEIGHT);
        }
    }
}
