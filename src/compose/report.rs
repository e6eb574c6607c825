use crate::layout::{max_chars_for, wrap_text, Sheet, BODY_LINE_HEIGHT, BODY_TOP, CONTENT_WIDTH, MARGIN};
use crate::models::ReportData;

const HEADING_ADVANCE: f32 = 7.0;
const SECTION_GAP: f32 = 3.0;

/// Optional vitals summary, then the five clinical sections in fixed order.
/// The cursor always advances by heading offset plus wrapped-line count,
/// placeholder content included, so the section rhythm never collapses.
pub(super) fn body(sheet: &mut Sheet, data: &ReportData) {
    let max = max_chars_for(CONTENT_WIDTH, 10.0);
    let mut y = BODY_TOP;

    if data.vitals.any_present() {
        sheet.text_bold("SINAIS VITAIS", 11.0, MARGIN, y);
        y += HEADING_ADVANCE;
        for line in wrap_text(&data.vitals.summary(), max) {
            sheet.text(&line, 10.0, MARGIN, y);
            y += BODY_LINE_HEIGHT;
        }
        y += SECTION_GAP;
    }

    for (heading, content) in data.sections() {
        sheet.text_bold(heading, 11.0, MARGIN, y);
        y += HEADING_ADVANCE;
        for line in wrap_text(&content, max) {
            sheet.text(&line, 10.0, MARGIN, y);
            y += BODY_LINE_HEIGHT;
        }
        y += SECTION_GAP;
    }
}
