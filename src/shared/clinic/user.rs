//! User Profile
//!
//! The console user as returned by `GET /usuarios/{id}`.

use serde::{Deserialize, Serialize};

/// A role attached to a profile.
///
/// The backend sends either bare names (`["admin"]`) or role objects
/// (`[{"id": 1, "nombre": "admin"}]`); both deserialize here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoleRef {
    Name(String),
    Record(RoleRecord),
}

impl RoleRef {
    pub fn name(&self) -> &str {
        match self {
            RoleRef::Name(name) => name,
            RoleRef::Record(record) => &record.nombre,
        }
    }
}

/// Role row from the `/roles` collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "name")]
    pub nombre: String,
}

/// Console user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleRef>,
    #[serde(default)]
    pub activo: Option<bool>,
}

impl UserProfile {
    /// Role names in the order the backend listed them, without duplicates.
    pub fn role_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.roles.len());
        for role in &self.roles {
            let name = role.name().trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.nombre, self.apellido);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}
