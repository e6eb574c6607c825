use crate::layout::{Sheet, BODY_TOP, MARGIN};
use crate::models::receipt::format_currency;
use crate::models::ReceiptData;
use crate::table::{draw_table, TableEngine, RECEIPT_TABLE};

/// Service table, bold total (the caller's figure, never recomputed) and the
/// payment method beneath it.
pub(super) fn body(sheet: &mut Sheet, data: &ReceiptData, engine: TableEngine) {
    sheet.text_bold("SERVIÇOS PRESTADOS", 11.0, MARGIN, BODY_TOP);

    let rows = data.service_rows();
    let extent = draw_table(sheet, &RECEIPT_TABLE, &rows, BODY_TOP + 6.0, engine);

    let y = extent.end_y + 8.0;
    sheet.text_bold(
        &format!("TOTAL: {}", format_currency(data.total_amount)),
        12.0,
        MARGIN,
        y,
    );
    sheet.text(
        &format!("Forma de pagamento: {}", data.payment_method_display()),
        10.0,
        MARGIN,
        y + 7.0,
    );
}
