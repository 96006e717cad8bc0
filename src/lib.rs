//! Daily attendance and homework tracking for a fixed classroom roster.
//!
//! [`classbook::Classbook`] owns the roster, attendance and homework stores;
//! [`stats`] derives read-only totals from them; [`ipc`] exposes everything
//! as JSON-lines requests for the `rollbookd` sidecar.

pub mod attendance;
pub mod backup;
pub mod classbook;
pub mod config;
pub mod dates;
pub mod homework;
pub mod ipc;
pub mod logging;
pub mod roster;
pub mod stats;
