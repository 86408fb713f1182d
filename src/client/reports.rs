//! Report downloads
//!
//! Reports are rendered by the backend; the console only fetches the bytes.

use chrono::NaiveDate;
use serde::Serialize;

use super::api_service::query_pairs;
use super::error::ApiError;
use super::http::{HttpClient, RequestOptions};

#[derive(Debug, Serialize)]
struct RangeQuery {
    desde: NaiveDate,
    hasta: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct ReportsApi {
    http: HttpClient,
}

impl ReportsApi {
    pub const APPOINTMENTS_PDF: &'static str = "/reportes/turnos/pdf";

    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Download any binary report
    pub async fn download<Q: Serialize + ?Sized>(&self, path: &str, params: &Q) -> Result<Vec<u8>, ApiError> {
        let options = RequestOptions::with_query(query_pairs(params)?).header("Accept", "application/pdf");
        self.http.get_bytes(path, &options).await
    }

    /// Appointment report for a date range, as PDF bytes
    pub async fn appointments_pdf(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<u8>, ApiError> {
        self.download(Self::APPOINTMENTS_PDF, &RangeQuery { desde: from, hasta: to })
            .await
    }
}
