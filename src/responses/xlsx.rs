// responses/xlsx.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Workbook download. Exports reflect live data, so they are never cached.
pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", XLSX_MIME)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .header("Cache-Control", "no-store")
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}
