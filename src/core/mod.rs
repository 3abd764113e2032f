//! Core allocation algorithms and the replica view they read from.

pub mod error;
pub mod replica;
pub mod share;
pub mod largest_remainder;
pub mod rescale;
pub mod saturation;
pub mod policy;
pub mod percentage;
pub mod balanced;
pub mod scheduler;

pub use error::{AppResult, ScheduleError};
pub use replica::{JobId, PeerId, Percentage, Replica, ReplicaView, Saturation, TaskId};
pub use share::{Share, TaskAllocation, TaskShare};
pub use largest_remainder::largest_remainder;
pub use rescale::rescale;
pub use saturation::{resolve_saturation, OverCapacityPolicy};
pub use policy::{TaskScheduler, TaskSchedulerPolicy};
pub use percentage::PercentageScheduler;
pub use balanced::BalancedScheduler;
pub use scheduler::Scheduler;
