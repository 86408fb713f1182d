//! Backend Resource Collections

use std::fmt;

/// A REST collection exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Patients,
    Therapists,
    Services,
    Rooms,
    Appointments,
    Roles,
    ClinicalRecords,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Users,
        Resource::Patients,
        Resource::Therapists,
        Resource::Services,
        Resource::Rooms,
        Resource::Appointments,
        Resource::Roles,
        Resource::ClinicalRecords,
    ];

    /// Base path of the collection, relative to the API root
    pub fn base_path(self) -> &'static str {
        match self {
            Resource::Users => "/usuarios",
            Resource::Patients => "/pacientes",
            Resource::Therapists => "/kinesiologos",
            Resource::Services => "/servicios",
            Resource::Rooms => "/boxes",
            Resource::Appointments => "/turnos",
            Resource::Roles => "/roles",
            Resource::ClinicalRecords => "/historias-clinicas",
        }
    }

    /// Path of a single item in the collection
    pub fn item_path(self, id: impl fmt::Display) -> String {
        format!("{}/{}", self.base_path(), id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Resource::Users => "Usuarios",
            Resource::Patients => "Pacientes",
            Resource::Therapists => "Kinesiólogos",
            Resource::Services => "Servicios",
            Resource::Rooms => "Boxes",
            Resource::Appointments => "Turnos",
            Resource::Roles => "Roles",
            Resource::ClinicalRecords => "Historias clínicas",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<&str> = Resource::ALL.iter().map(|r| r.base_path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Resource::ALL.len());
    }

    #[test]
    fn test_item_path() {
        assert_eq!(Resource::Appointments.item_path(12), "/turnos/12");
        assert_eq!(Resource::ClinicalRecords.item_path("7"), "/historias-clinicas/7");
    }
}
