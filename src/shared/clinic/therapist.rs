//! Therapist Data Structure

use serde::{Deserialize, Serialize};

/// A physical therapist (kinesiólogo)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Therapist {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub matricula: Option<String>,
    #[serde(default)]
    pub especialidad: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<i64>,
}

impl Therapist {
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.apellido, self.nombre)
    }
}
