//! # EMR Mock Core
//!
//! Core business logic for the mock EMR integration server.
//!
//! This crate contains the domain model and the in-memory clinical data
//! store:
//! - Seeded patients and per-patient clinical summaries
//! - Encounters (append-only per patient) and their notes
//! - The note ingestion payload and its validated sum type
//!
//! **No API concerns**: authentication, HTTP servers, or response shapes
//! belong in `api-rest` or `api-shared`.

pub mod config;
pub mod constants;
pub mod encounter;
pub mod error;
pub mod note;
pub mod patient;
pub mod store;

pub use config::CoreConfig;
pub use encounter::Encounter;
pub use error::{EmrError, EmrResult};
pub use note::{NoteBody, NotePayload};
pub use patient::Patient;
pub use store::{EmrStore, IngestReceipt};
