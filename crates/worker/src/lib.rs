//! Background workers for lead intake.
//!
//! - Notifications (new-lead hook, admin alerts)
//! - Scheduler (metrics log, alert checks, external store probe)

pub mod notifications;
pub mod scheduler;

pub use notifications::*;
pub use scheduler::*;
