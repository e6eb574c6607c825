use crate::layout::{max_chars_for, wrap_text, Sheet, BODY_LINE_HEIGHT, BODY_TOP, CONTENT_WIDTH, MARGIN};
use crate::models::ExamGuideData;

/// Exam type and description always render; preparation, fasting and special
/// instructions only when present, each advancing the cursor by its own
/// wrapped-line count.
pub(super) fn body(sheet: &mut Sheet, data: &ExamGuideData) {
    let max = max_chars_for(CONTENT_WIDTH, 10.0);
    let mut y = BODY_TOP;

    sheet.text_bold("EXAME SOLICITADO", 11.0, MARGIN, y);
    y += 8.0;
    sheet.text(&format!("Tipo: {}", data.exam_type_display()), 10.0, MARGIN, y);
    y += 7.0;
    for line in wrap_text(&data.description_display(), max) {
        sheet.text(&line, 10.0, MARGIN, y);
        y += BODY_LINE_HEIGHT;
    }
    y += 4.0;

    if let Some(preparation) = &data.preparation {
        sheet.text_bold("Preparo:", 10.0, MARGIN, y);
        y += 6.0;
        for line in wrap_text(preparation, max) {
            sheet.text(&line, 10.0, MARGIN, y);
            y += BODY_LINE_HEIGHT;
        }
        y += 3.0;
    }

    if let Some(fasting) = data.fasting_display() {
        sheet.text(&format!("Jejum: {fasting}"), 10.0, MARGIN, y);
        y += 6.0;
    }

    if let Some(instructions) = &data.instructions {
        sheet.text_bold("Instruções especiais:", 10.0, MARGIN, y);
        y += 6.0;
        for line in wrap_text(instructions, max) {
            sheet.text(&line, 10.0, MARGIN, y);
            y += BODY_LINE_HEIGHT;
        }
    }
}
