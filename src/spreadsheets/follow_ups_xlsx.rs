use crate::domain::customer::Customer;
use crate::domain::expiry::{ExpiryAssessment, ExpiryBucket};
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;
use crate::templates::fmt_day;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

const HEADERS: [&str; 7] = [
    "Name",
    "Phone",
    "Area",
    "Service (months)",
    "Expiry Date",
    "Days Left",
    "Status",
];

fn xlsx_err(what: &str) -> impl Fn(XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Builds the follow-up list workbook in memory.
pub fn follow_ups_workbook(rows: &[(&Customer, ExpiryAssessment)]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err(header))?;
    }

    for (i, (customer, assessment)) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &customer.name)
            .map_err(xlsx_err("name"))?;
        worksheet
            .write_string(r, 1, &customer.phone)
            .map_err(xlsx_err("phone"))?;
        worksheet
            .write_string(r, 2, customer.area.as_deref().unwrap_or(""))
            .map_err(xlsx_err("area"))?;
        worksheet
            .write_string(r, 3, customer.service.as_deref().unwrap_or(""))
            .map_err(xlsx_err("service"))?;
        worksheet
            .write_string(r, 4, fmt_day(assessment.expiry_date))
            .map_err(xlsx_err("expiry date"))?;
        worksheet
            .write_number(r, 5, assessment.days_until_expiry as f64)
            .map_err(xlsx_err("days left"))?;
        worksheet
            .write_string(r, 6, customer.follow_up_status.as_str())
            .map_err(xlsx_err("status"))?;
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_follow_ups_xlsx(
    rows: &[(&Customer, ExpiryAssessment)],
    bucket: ExpiryBucket,
    today: NaiveDate,
) -> ResultResp {
    let buffer = follow_ups_workbook(rows)?;
    let filename = format!("follow-ups-{}-{}.xlsx", bucket.label(), today.format("%Y-%m-%d"));
    xlsx_response(buffer, &filename)
}
