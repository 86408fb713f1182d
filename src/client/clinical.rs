//! Clinical-record client

use serde_json::json;

use super::api_service::ApiService;
use super::error::ApiError;
use super::http::HttpClient;
use crate::shared::clinic::{clinical_timeline, ClinicalRecord, TimelineGroup};
use crate::shared::Resource;

#[derive(Debug, Clone)]
pub struct ClinicalRecordsApi {
    crud: ApiService<ClinicalRecord>,
}

impl ClinicalRecordsApi {
    pub fn new(http: HttpClient) -> Self {
        Self {
            crud: ApiService::for_resource(http, Resource::ClinicalRecords),
        }
    }

    pub fn crud(&self) -> &ApiService<ClinicalRecord> {
        &self.crud
    }

    pub async fn for_patient(&self, patient_id: i64) -> Result<Vec<ClinicalRecord>, ApiError> {
        self.crud.list(&json!({ "paciente_id": patient_id })).await
    }

    /// A patient's records arranged newest first, grouped by month
    pub async fn timeline(&self, patient_id: i64) -> Result<Vec<TimelineGroup>, ApiError> {
        let records = self.for_patient(patient_id).await?;
        Ok(clinical_timeline(&records))
    }
}
