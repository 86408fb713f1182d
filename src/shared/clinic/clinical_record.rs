//! Clinical Record (Historia Clínica)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One clinical-history entry, tied to a patient and a consultation date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalRecord {
    pub id: i64,
    pub paciente_id: i64,
    #[serde(default)]
    pub kinesiologo_id: Option<i64>,
    pub fecha_consulta: NaiveDate,
    #[serde(default)]
    pub motivo_consulta: Option<String>,
    #[serde(default)]
    pub diagnostico: Option<String>,
    #[serde(default)]
    pub tratamiento: Option<String>,
    #[serde(default)]
    pub evolucion: Option<String>,
    #[serde(default)]
    pub observaciones: Option<String>,
}

/// Records of one calendar month, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGroup {
    pub year: i32,
    pub month: u32,
    pub records: Vec<ClinicalRecord>,
}

impl TimelineGroup {
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

/// Arrange records as a timeline: newest consultation first (ties by id
/// descending), grouped by year and month.
pub fn clinical_timeline(records: &[ClinicalRecord]) -> Vec<TimelineGroup> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.fecha_consulta
            .cmp(&a.fecha_consulta)
            .then_with(|| b.id.cmp(&a.id))
    });

    let mut groups: Vec<TimelineGroup> = Vec::new();
    for record in sorted {
        let (year, month) = (record.fecha_consulta.year(), record.fecha_consulta.month());
        match groups.last_mut() {
            Some(group) if group.year == year && group.month == month => group.records.push(record),
            _ => groups.push(TimelineGroup {
                year,
                month,
                records: vec![record],
            }),
        }
    }
    groups
}
