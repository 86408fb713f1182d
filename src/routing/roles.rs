//! Primary role selection
//!
//! A user may hold several roles. The console shows one menu, chosen by a
//! fixed precedence: admin, then recepcionista, then kinesiologo, then
//! paciente.

use std::fmt;

use super::Route;

/// Role that decides which menu and dashboard a user sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimaryRole {
    Admin,
    Recepcionista,
    Kinesiologo,
    Paciente,
}

/// Precedence order, highest first
pub const ROLE_PRIORITY: [PrimaryRole; 4] = [
    PrimaryRole::Admin,
    PrimaryRole::Recepcionista,
    PrimaryRole::Kinesiologo,
    PrimaryRole::Paciente,
];

impl PrimaryRole {
    /// Parse a backend role name, ignoring case, surrounding spaces and accents.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'á' => 'a',
                'é' => 'e',
                'í' => 'i',
                'ó' => 'o',
                'ú' => 'u',
                other => other,
            })
            .collect();
        match normalized.as_str() {
            "admin" | "administrador" => Some(PrimaryRole::Admin),
            "recepcionista" => Some(PrimaryRole::Recepcionista),
            "kinesiologo" => Some(PrimaryRole::Kinesiologo),
            "paciente" => Some(PrimaryRole::Paciente),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryRole::Admin => "admin",
            PrimaryRole::Recepcionista => "recepcionista",
            PrimaryRole::Kinesiologo => "kinesiologo",
            PrimaryRole::Paciente => "paciente",
        }
    }
}

impl fmt::Display for PrimaryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest-precedence known role in `roles`, or `None` if none is recognized.
pub fn select_primary_role<S: AsRef<str>>(roles: &[S]) -> Option<PrimaryRole> {
    let held: Vec<PrimaryRole> = roles
        .iter()
        .filter_map(|r| PrimaryRole::parse(r.as_ref()))
        .collect();
    ROLE_PRIORITY.into_iter().find(|role| held.contains(role))
}

/// Menu entries for a role, in display order
pub fn menu_for(role: PrimaryRole) -> &'static [Route] {
    match role {
        PrimaryRole::Admin => &[
            Route::Dashboard,
            Route::Users,
            Route::Patients,
            Route::Therapists,
            Route::Rooms,
            Route::Services,
            Route::Appointments,
            Route::Calendar,
            Route::ClinicalRecords,
        ],
        PrimaryRole::Recepcionista => &[
            Route::Dashboard,
            Route::Patients,
            Route::Therapists,
            Route::Appointments,
            Route::Calendar,
        ],
        PrimaryRole::Kinesiologo => &[
            Route::Dashboard,
            Route::Appointments,
            Route::Calendar,
            Route::ClinicalRecords,
        ],
        PrimaryRole::Paciente => &[
            Route::Dashboard,
            Route::Appointments,
            Route::ClinicalRecords,
            Route::Profile,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            select_primary_role(&["paciente", "kinesiologo"]),
            Some(PrimaryRole::Kinesiologo)
        );
        assert_eq!(
            select_primary_role(&["kinesiologo", "recepcionista"]),
            Some(PrimaryRole::Recepcionista)
        );
        assert_eq!(
            select_primary_role(&["paciente", "admin", "recepcionista"]),
            Some(PrimaryRole::Admin)
        );
    }

    #[test]
    fn test_variants_and_unknown_names() {
        assert_eq!(select_primary_role(&["  Kinesiólogo "]), Some(PrimaryRole::Kinesiologo));
        assert_eq!(select_primary_role(&["ADMIN"]), Some(PrimaryRole::Admin));
        assert_eq!(select_primary_role(&["auditor"]), None);
        assert_eq!(select_primary_role::<&str>(&[]), None);
    }

    #[test]
    fn test_menus_respect_allowed_roles() {
        for role in ROLE_PRIORITY {
            for route in menu_for(role) {
                if let Some(allowed) = route.allowed_roles() {
                    assert!(allowed.contains(&role), "{route} offered to {role}");
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_selection_is_order_independent(mut picks in proptest::collection::vec(0usize..5, 0..8)) {
            let names = ["admin", "recepcionista", "kinesiologo", "paciente", "otro"];
            let forward: Vec<&str> = picks.iter().map(|i| names[*i]).collect();
            picks.reverse();
            let backward: Vec<&str> = picks.iter().map(|i| names[*i]).collect();
            prop_assert_eq!(select_primary_role(&forward), select_primary_role(&backward));
        }

        #[test]
        fn prop_selected_role_is_held(picks in proptest::collection::vec(0usize..4, 1..6)) {
            let held: Vec<PrimaryRole> = picks.iter().map(|i| ROLE_PRIORITY[*i]).collect();
            let names: Vec<&str> = held.iter().map(|r| r.as_str()).collect();
            let chosen = select_primary_role(&names).unwrap();
            prop_assert!(held.contains(&chosen));
            prop_assert!(held.iter().all(|r| chosen <= *r));
        }
    }
}
