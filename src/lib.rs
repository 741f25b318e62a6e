//! Ingestion and filtering pipeline behind an electric-vehicle
//! registration dashboard.
//!
//! The crate loads a CSV of EV registrations into an immutable canonical
//! [`Dataset`], lets a [`Session`] apply and reset exact-match filters over
//! it, and computes the summary numbers a dashboard displays. Rendering —
//! charts, tables, toasts — is deliberately not here: a UI layer consumes
//! the session, the [`data::summary`] aggregations, and any
//! [`Notification`]s, and draws them however it likes.
//!
//! Loading never leaves the caller without data: a source that cannot be
//! fetched or parsed is replaced by a small embedded sample dataset plus a
//! single warning notification.

pub mod data;
pub mod notify;
pub mod state;

pub use data::error::{IngestError, ParseFailure};
pub use data::filter::FilterSelection;
pub use data::loader::{load_dataset, LoadReport};
pub use data::model::{CafvStatus, Dataset, Drivetrain, FilterOptions, Vehicle};
pub use notify::{Notification, Severity};
pub use state::Session;
