//! # Peer Allocation
//!
//! Deterministic peer allocation for masterless, replicated task schedulers.
//!
//! Every peer in a cluster independently decides how many worker slots each
//! task of a job receives, reading only its local copy of an immutable cluster
//! snapshot. The peers never negotiate, so the computation has to come out
//! bit-identical everywhere.
//!
//! ## Key Features
//!
//! - **Exact apportionment**: the largest remainder method on exact rationals;
//!   allocations always sum to the peer budget, with no floating point involved
//! - **Total-order tie-breaks**: equal remainders are settled by task id, never
//!   by sort stability or map iteration order
//! - **Saturation ceilings**: tasks that would exceed their ceiling are pinned
//!   and the rest of the budget is re-solved over the remaining tasks
//! - **Drop selection**: when a job shrinks, the most recently added peers of
//!   the tasks furthest above their new target are revoked
//! - **Policy dispatch**: percentage and balanced schedulers behind one trait,
//!   selected by the policy tag carried on each job
//!
//! ## Example
//!
//! ```rust
//! use peer_allocation::core::{Percentage, Replica, Saturation, Scheduler, TaskId};
//!
//! let replica = Replica::new()
//!     .with_job(
//!         "job",
//!         [
//!             ("a", Percentage::whole(60)),
//!             ("b", Percentage::whole(25)),
//!             ("c", Percentage::whole(15)),
//!         ],
//!     )
//!     .with_saturation("job", "a", Saturation::Bounded(5));
//!
//! let plan = Scheduler::default().distribute(&replica, &"job".into(), 10)?;
//! assert_eq!(plan[&TaskId::from("a")], 5);
//! assert_eq!(plan[&TaskId::from("b")], 3);
//! assert_eq!(plan[&TaskId::from("c")], 2);
//! # Ok::<(), peer_allocation::core::ScheduleError>(())
//! ```
//!
//! The scheduler performs no I/O and never mutates the snapshot; turning its
//! answer into the next snapshot is the coordinator's job.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core allocation algorithms, scheduling policies and the replica view.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Shared utilities.
pub mod util;
