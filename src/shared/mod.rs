//! Shared Module
//!
//! Types used by both the API client layer and the console views: the
//! clinic records exchanged with the backend, form error mapping and the
//! application configuration.

/// Clinic records and calendar/timeline helpers
pub mod clinic;

/// Form error mapping
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use clinic::{Appointment, ClinicalRecord, Patient, Resource, Room, ServiceOffering, Therapist, UserProfile};
pub use error::FieldError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
