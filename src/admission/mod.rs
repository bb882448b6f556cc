//! Admission Module
//!
//! Bounds how many requests may run the processing function at once.

mod controller;

pub use controller::{AdmissionController, AdmissionStats, Permit};
