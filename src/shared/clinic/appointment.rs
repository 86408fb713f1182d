//! Appointment (Turno) Data Structure
//!
//! Besides the record itself this module holds the pure calendar helpers
//! used by the week view: week bounds, day bucketing and the target slot
//! computed when an appointment is dragged onto another day or hour.
//!
//! `estado` is an opaque backend value. Which status changes are legal is
//! decided server-side, so nothing here validates transitions.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Default slot length when the backend sends no end time
const DEFAULT_SLOT_MINUTES: i64 = 45;

/// A booking (turno)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub paciente_id: i64,
    pub kinesiologo_id: i64,
    #[serde(default)]
    pub servicio_id: Option<i64>,
    #[serde(default)]
    pub box_id: Option<i64>,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    #[serde(default)]
    pub hora_fin: Option<NaiveTime>,
    pub estado: String,
    #[serde(default)]
    pub observaciones: Option<String>,
    /// Display names some endpoints embed
    #[serde(default)]
    pub paciente_nombre: Option<String>,
    #[serde(default)]
    pub kinesiologo_nombre: Option<String>,
}

impl Appointment {
    /// Length of the appointment, falling back to the default slot.
    pub fn duration(&self) -> Duration {
        match self.hora_fin {
            Some(end) if end > self.hora_inicio => end - self.hora_inicio,
            _ => Duration::minutes(DEFAULT_SLOT_MINUTES),
        }
    }

    /// Short label for calendar cells
    pub fn label(&self) -> String {
        let who = self
            .paciente_nombre
            .clone()
            .unwrap_or_else(|| format!("Paciente #{}", self.paciente_id));
        format!("{} {}", self.hora_inicio.format("%H:%M"), who)
    }
}

/// Body sent when an appointment is moved in the calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReschedulePatch {
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hora_fin: Option<NaiveTime>,
}

/// Monday and Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(date.weekday().num_days_from_monday());
    let monday = date - Duration::days(offset);
    (monday, monday + Duration::days(6))
}

/// Bucket the appointments of the week starting at `monday` by day.
///
/// Every day of the week gets an entry, empty days included. Each bucket
/// is sorted by start time, then id.
pub fn group_by_day(
    appointments: &[Appointment],
    monday: NaiveDate,
) -> BTreeMap<NaiveDate, Vec<&Appointment>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Appointment>> = (0..7)
        .map(|offset| (monday + Duration::days(offset), Vec::new()))
        .collect();

    for appointment in appointments {
        if let Some(bucket) = days.get_mut(&appointment.fecha) {
            bucket.push(appointment);
        }
    }
    for bucket in days.values_mut() {
        bucket.sort_by_key(|a| (a.hora_inicio, a.id));
    }
    days
}

/// Patch that moves `appointment` to the dropped day and hour, keeping its length.
///
/// Returns `None` when the drop lands on the slot the appointment already
/// occupies, or when the moved appointment would run past midnight.
pub fn reschedule_target(
    appointment: &Appointment,
    drop_date: NaiveDate,
    drop_time: NaiveTime,
) -> Option<ReschedulePatch> {
    if appointment.fecha == drop_date && appointment.hora_inicio == drop_time {
        return None;
    }
    let hora_fin = match appointment.hora_fin {
        Some(_) => {
            let (end, overflow) = drop_time.overflowing_add_signed(appointment.duration());
            if overflow != 0 {
                return None;
            }
            Some(end)
        }
        None => None,
    };
    Some(ReschedulePatch {
        fecha: drop_date,
        hora_inicio: drop_time,
        hora_fin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn appointment(id: i64, fecha: NaiveDate, start: NaiveTime, end: Option<NaiveTime>) -> Appointment {
        Appointment {
            id,
            paciente_id: 10,
            kinesiologo_id: 20,
            servicio_id: None,
            box_id: None,
            fecha,
            hora_inicio: start,
            hora_fin: end,
            estado: "pendiente".to_string(),
            observaciones: None,
            paciente_nombre: None,
            kinesiologo_nombre: None,
        }
    }

    #[test]
    fn test_week_bounds() {
        // 2024-05-15 is a Wednesday
        assert_eq!(week_bounds(date(2024, 5, 15)), (date(2024, 5, 13), date(2024, 5, 19)));
        assert_eq!(week_bounds(date(2024, 5, 13)), (date(2024, 5, 13), date(2024, 5, 19)));
        assert_eq!(week_bounds(date(2024, 5, 19)), (date(2024, 5, 13), date(2024, 5, 19)));
    }

    #[test]
    fn test_group_by_day_sorts_and_filters() {
        let monday = date(2024, 5, 13);
        let items = vec![
            appointment(3, date(2024, 5, 14), time(11, 0), None),
            appointment(1, date(2024, 5, 14), time(9, 0), None),
            appointment(2, date(2024, 5, 20), time(9, 0), None),
        ];
        let days = group_by_day(&items, monday);

        assert_eq!(days.len(), 7);
        let tuesday: Vec<i64> = days[&date(2024, 5, 14)].iter().map(|a| a.id).collect();
        assert_eq!(tuesday, vec![1, 3]);
        assert!(days[&monday].is_empty());
        assert!(!days.contains_key(&date(2024, 5, 20)));
    }

    #[test]
    fn test_reschedule_keeps_duration() {
        let original = appointment(1, date(2024, 5, 14), time(9, 0), Some(time(9, 45)));
        let patch = reschedule_target(&original, date(2024, 5, 16), time(15, 30)).unwrap();
        assert_eq!(
            patch,
            ReschedulePatch {
                fecha: date(2024, 5, 16),
                hora_inicio: time(15, 30),
                hora_fin: Some(time(16, 15)),
            }
        );
    }

    #[test]
    fn test_reschedule_same_slot_is_noop() {
        let original = appointment(1, date(2024, 5, 14), time(9, 0), None);
        assert!(reschedule_target(&original, date(2024, 5, 14), time(9, 0)).is_none());
    }

    #[test]
    fn test_reschedule_past_midnight_rejected() {
        let original = appointment(1, date(2024, 5, 14), time(9, 0), Some(time(10, 0)));
        assert!(reschedule_target(&original, date(2024, 5, 14), time(23, 30)).is_none());
    }

    #[test]
    fn test_duration_default() {
        let open_ended = appointment(1, date(2024, 5, 14), time(9, 0), None);
        assert_eq!(open_ended.duration(), Duration::minutes(45));
    }

    #[test]
    fn test_patch_omits_missing_end() {
        let patch = ReschedulePatch {
            fecha: date(2024, 5, 14),
            hora_inicio: time(8, 0),
            hora_fin: None,
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({"fecha": "2024-05-14", "hora_inicio": "08:00:00"}));
    }
}
