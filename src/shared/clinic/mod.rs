//! Clinic Module
//!
//! This module contains the records exchanged with the KinesioPro backend:
//!
//! - `UserProfile` / `RoleRef` - Console users and their roles
//! - `Patient` - A patient (paciente)
//! - `Therapist` - A physical therapist (kinesiólogo)
//! - `Room` / `ServiceOffering` - Treatment boxes and billable services
//! - `Appointment` - A booking (turno) plus calendar helpers
//! - `ClinicalRecord` - A clinical-history entry and its timeline view
//! - `Resource` - Backend collection names and their base paths
//!
//! # Usage
//!
//! ```rust
//! use kinesiopro::shared::clinic::{Appointment, Patient, Resource};
//! ```

pub mod user;
pub mod patient;
pub mod therapist;
pub mod facility;
pub mod appointment;
pub mod clinical_record;
pub mod resource;

// Re-export all types
pub use user::{RoleRecord, RoleRef, UserProfile};
pub use patient::Patient;
pub use therapist::Therapist;
pub use facility::{Room, ServiceOffering};
pub use appointment::{
    group_by_day, reschedule_target, week_bounds, Appointment, ReschedulePatch,
};
pub use clinical_record::{clinical_timeline, ClinicalRecord, TimelineGroup};
pub use resource::Resource;
