//! Patient Data Structure

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient (paciente)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<NaiveDate>,
    #[serde(default)]
    pub obra_social: Option<String>,
    /// Linked console user when the patient can log in
    #[serde(default)]
    pub usuario_id: Option<i64>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.apellido, self.nombre)
    }
}
