use crate::layout::{max_chars_for, wrap_text, Sheet, BODY_LINE_HEIGHT, BODY_TOP, CONTENT_WIDTH, MARGIN};
use crate::models::CertificateData;

/// One word-wrapped paragraph, chosen by certificate subtype.
pub(super) fn body(sheet: &mut Sheet, data: &CertificateData) {
    let max = max_chars_for(CONTENT_WIDTH, 11.0);
    for (i, line) in wrap_text(&data.body_text(), max).iter().enumerate() {
        sheet.text(line, 11.0, MARGIN, BODY_TOP + i as f32 * (BODY_LINE_HEIGHT + 1.0));
    }
}
