//! Spreadsheet export of order and quote lists.

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use thiserror::Error;

use crate::domain::order::{Order, OrderKind};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const BRAND_COLOR: u32 = 0x7A4E8C;
const STRIPE_COLOR: u32 = 0xF4EEF7;

/// Fixed column layout: header label and width in characters.
const COLUMNS: [(&str, f64); 7] = [
    ("Référence", 16.0),
    ("Date", 12.0),
    ("Client", 28.0),
    ("Fournisseur", 28.0),
    ("Articles", 48.0),
    ("Montant total (€)", 18.0),
    ("Statut", 14.0),
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet generation failed: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Generated spreadsheet ready to be served as an attachment.
#[derive(Debug)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `commandes-<date>.xlsx` or `devis-<date>.xlsx`.
pub fn export_file_name(kind: OrderKind, date: NaiveDate) -> String {
    format!("{}-{}.xlsx", kind.export_prefix(), date.format("%Y-%m-%d"))
}

fn sheet_name(kind: OrderKind) -> &'static str {
    match kind {
        OrderKind::Order => "Commandes",
        OrderKind::Quote => "Devis",
    }
}

/// Renders `orders` into an `.xlsx` workbook.
pub fn orders_workbook(
    kind: OrderKind,
    orders: &[Order],
    date: NaiveDate,
) -> Result<ExportFile, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(kind))?;

    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(BRAND_COLOR))
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let text = Format::new().set_border(FormatBorder::Thin);
    let amount = Format::new()
        .set_border(FormatBorder::Thin)
        .set_num_format("#,##0.00 \"€\"");
    let striped_text = text.clone().set_background_color(Color::RGB(STRIPE_COLOR));
    let striped_amount = amount
        .clone()
        .set_background_color(Color::RGB(STRIPE_COLOR));

    for (col, (label, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *label, &header)?;
        worksheet.set_column_width(col, *width)?;
    }

    for (index, order) in orders.iter().enumerate() {
        let row = index as u32 + 1;
        let (text_format, amount_format) = if index % 2 == 1 {
            (&striped_text, &striped_amount)
        } else {
            (&text, &amount)
        };

        let date = order.created_at.format("%d/%m/%Y").to_string();
        let cells = [
            order.reference.as_str(),
            date.as_str(),
            order.customer_name.as_str(),
            order.supplier_name.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            worksheet.write_string_with_format(row, col as u16, *value, text_format)?;
        }
        worksheet.write_string_with_format(row, 4, order.items_summary(), text_format)?;
        match order.total_amount {
            Some(total) => worksheet.write_number_with_format(row, 5, total, amount_format)?,
            None => worksheet.write_blank(row, 5, amount_format)?,
        };
        worksheet.write_string_with_format(row, 6, order.status.label(), text_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofilter(0, 0, orders.len() as u32, (COLUMNS.len() - 1) as u16)?;

    Ok(ExportFile {
        file_name: export_file_name(kind, date),
        content_type: XLSX_CONTENT_TYPE,
        bytes: workbook.save_to_buffer()?,
    })
}
