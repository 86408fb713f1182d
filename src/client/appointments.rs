//! Appointment calls beyond plain CRUD
//!
//! Confirming, cancelling, "llegó tarde" and "ausente" are separate backend
//! operations. The backend owns the legal status transitions; this client
//! forwards the request and shows whatever the backend answers.

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;

use super::api_service::{query_pairs, ApiService};
use super::error::ApiError;
use super::http::{HttpClient, RequestOptions};
use crate::shared::clinic::{Appointment, ReschedulePatch};
use crate::shared::Resource;

/// Status value the backend uses for a confirmed appointment
pub const STATUS_CONFIRMED: &str = "confirmado";

/// Status value the backend uses for a cancelled appointment
pub const STATUS_CANCELLED: &str = "cancelado";

#[derive(Debug, Serialize)]
struct CalendarQuery {
    desde: NaiveDate,
    hasta: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    kinesiologo_id: Option<i64>,
}

/// Appointment (turno) client
#[derive(Debug, Clone)]
pub struct AppointmentsApi {
    http: HttpClient,
    crud: ApiService<Appointment>,
}

impl AppointmentsApi {
    pub fn new(http: HttpClient) -> Self {
        let crud = ApiService::for_resource(http.clone(), Resource::Appointments);
        Self { http, crud }
    }

    /// Plain CRUD over `/turnos`
    pub fn crud(&self) -> &ApiService<Appointment> {
        &self.crud
    }

    /// Appointments between two dates, inclusive
    pub async fn calendar(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        therapist: Option<i64>,
    ) -> Result<Vec<Appointment>, ApiError> {
        let query = CalendarQuery {
            desde: from,
            hasta: to,
            kinesiologo_id: therapist,
        };
        let options = RequestOptions::with_query(query_pairs(&query)?);
        let path = format!("{}/calendario", Resource::Appointments.base_path());
        self.http.send_json(Method::GET, &path, None, &options).await
    }

    /// Move an appointment (calendar drag and drop)
    pub async fn reschedule(&self, id: i64, patch: &ReschedulePatch) -> Result<Appointment, ApiError> {
        self.crud.patch(id, patch).await
    }

    pub async fn set_status(&self, id: i64, estado: &str) -> Result<Appointment, ApiError> {
        self.crud.patch(id, &json!({ "estado": estado })).await
    }

    pub async fn confirm(&self, id: i64) -> Result<Appointment, ApiError> {
        self.set_status(id, STATUS_CONFIRMED).await
    }

    pub async fn cancel(&self, id: i64) -> Result<Appointment, ApiError> {
        self.set_status(id, STATUS_CANCELLED).await
    }

    /// Record that the patient arrived late
    pub async fn mark_late(&self, id: i64) -> Result<Appointment, ApiError> {
        let path = format!("{}/llego-tarde", Resource::Appointments.item_path(id));
        self.http
            .send_json(Method::POST, &path, None, &RequestOptions::default())
            .await
    }

    /// Record that the patient did not show up
    pub async fn mark_absent(&self, id: i64) -> Result<Appointment, ApiError> {
        let path = format!("{}/ausente", Resource::Appointments.item_path(id));
        self.http
            .send_json(Method::POST, &path, None, &RequestOptions::default())
            .await
    }
}
