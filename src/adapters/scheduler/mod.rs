//! Background scheduling for the overdue-session sweep.

mod sweep_scheduler;

pub use sweep_scheduler::{SweepSchedule, SweepScheduler};
