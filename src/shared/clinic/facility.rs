//! Rooms and Services

use serde::{Deserialize, Serialize};

/// A treatment room (box)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

/// A bookable service (servicio)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceOffering {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Session length in minutes
    #[serde(default)]
    pub duracion_minutos: Option<u32>,
    #[serde(default)]
    pub precio: Option<f64>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_defaults_to_active() {
        let room: Room = serde_json::from_value(json!({"id": 3, "nombre": "Box 3"})).unwrap();
        assert!(room.activo);
        assert!(room.descripcion.is_none());
    }
}
