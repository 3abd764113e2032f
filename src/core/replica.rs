//! Read-only snapshot of scheduling-relevant cluster state.
//!
//! The scheduler never owns or mutates cluster state. It reads a [`Replica`]
//! (or any other [`ReplicaView`]) and hands back plain values; the external
//! coordination log turns those values into the next snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::policy::TaskSchedulerPolicy;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a submitted job.
    JobId
);
string_id!(
    /// Identifier of a task within a job. Ordering doubles as the tie-break order.
    TaskId
);
string_id!(
    /// Identifier of a peer (worker execution slot).
    PeerId
);

impl PeerId {
    /// Generate a fresh random peer identifier.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Exact fixed-point percentage with a resolution of 1/10 000 of a percent.
///
/// Percentages never pass through floating point, so every host derives the
/// same allocation from the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "PercentageRepr", into = "String")]
pub struct Percentage(u32);

impl Percentage {
    /// Micro-units per whole percent.
    pub const SCALE: u32 = 10_000;
    /// Zero percent.
    pub const ZERO: Self = Self(0);
    /// One hundred percent.
    pub const HUNDRED: Self = Self(100 * Self::SCALE);

    /// A whole number of percent.
    ///
    /// # Panics
    ///
    /// Panics if `percent` does not fit the fixed-point range.
    pub const fn whole(percent: u32) -> Self {
        match percent.checked_mul(Self::SCALE) {
            Some(micros) => Self(micros),
            None => panic!("percentage out of range"),
        }
    }

    /// A percentage expressed in micro-units (1/10 000 of a percent).
    pub const fn from_micros(micros: u32) -> Self {
        Self(micros)
    }

    /// The raw micro-unit value.
    pub const fn micros(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:04}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl FromStr for Percentage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err("empty percentage".into());
        }
        if frac.len() > 4 {
            return Err(format!("percentage `{s}` has more than 4 fractional digits"));
        }
        let digits_ok = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !digits_ok(whole) || !digits_ok(frac) {
            return Err(format!("percentage `{s}` is not a non-negative decimal"));
        }
        let whole: u32 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|e| format!("percentage `{s}` invalid: {e}"))?
        };
        let frac: u32 = if frac.is_empty() {
            0
        } else {
            // Right-pad to four digits: ".5" means 5000 micro-units.
            format!("{frac:0<4}")
                .parse()
                .map_err(|e| format!("percentage `{s}` invalid: {e}"))?
        };
        whole
            .checked_mul(Self::SCALE)
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or_else(|| format!("percentage `{s}` out of range"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PercentageRepr {
    Whole(u32),
    Text(String),
}

impl TryFrom<PercentageRepr> for Percentage {
    type Error = String;

    fn try_from(repr: PercentageRepr) -> Result<Self, Self::Error> {
        match repr {
            PercentageRepr::Whole(percent) => percent
                .checked_mul(Self::SCALE)
                .map(Self)
                .ok_or_else(|| format!("percentage {percent} out of range")),
            PercentageRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Percentage> for String {
    fn from(pct: Percentage) -> Self {
        pct.to_string()
    }
}

/// Maximum number of peers a task may be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "SaturationRepr", into = "SaturationRepr")]
pub enum Saturation {
    /// At most this many peers.
    Bounded(usize),
    /// No ceiling.
    #[default]
    Unbounded,
}

impl Saturation {
    /// The ceiling, if any.
    pub const fn ceiling(self) -> Option<usize> {
        match self {
            Self::Bounded(max) => Some(max),
            Self::Unbounded => None,
        }
    }

    /// Whether `peers` would exceed this ceiling.
    pub const fn is_exceeded_by(self, peers: usize) -> bool {
        match self {
            Self::Bounded(max) => peers > max,
            Self::Unbounded => false,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SaturationRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<SaturationRepr> for Saturation {
    type Error = String;

    fn try_from(repr: SaturationRepr) -> Result<Self, Self::Error> {
        match repr {
            SaturationRepr::Count(max) => Ok(Self::Bounded(max)),
            SaturationRepr::Keyword(word) if word == "unbounded" => Ok(Self::Unbounded),
            SaturationRepr::Keyword(word) => {
                Err(format!("saturation must be a count or `unbounded`, got `{word}`"))
            }
        }
    }
}

impl From<Saturation> for SaturationRepr {
    fn from(sat: Saturation) -> Self {
        match sat {
            Saturation::Bounded(max) => Self::Count(max),
            Saturation::Unbounded => Self::Keyword("unbounded".into()),
        }
    }
}

/// Read-only accessors the scheduler needs from a cluster snapshot.
pub trait ReplicaView {
    /// Tasks belonging to `job`, or `None` if the job is unknown.
    fn tasks(&self, job: &JobId) -> Option<&[TaskId]>;

    /// Target percentage of `task`, if one was recorded.
    fn task_percentage(&self, job: &JobId, task: &TaskId) -> Option<Percentage>;

    /// Saturation ceiling of `task`; tasks without an entry are unbounded.
    fn task_saturation(&self, job: &JobId, task: &TaskId) -> Saturation;

    /// Peers currently allocated to `task`, oldest first.
    fn task_peers(&self, job: &JobId, task: &TaskId) -> &[PeerId];

    /// Task scheduler policy tag carried by `job`.
    fn task_scheduler(&self, job: &JobId) -> Option<TaskSchedulerPolicy>;
}

/// Immutable cluster snapshot.
///
/// Builder methods consume and return the snapshot, so every "update" yields a
/// new value and a snapshot handed to the scheduler is never changed under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replica {
    /// Task identifiers per job.
    #[serde(default)]
    pub tasks: BTreeMap<JobId, Vec<TaskId>>,
    /// Target percentage per task; sums to 100 per job.
    #[serde(default)]
    pub task_percentages: BTreeMap<JobId, BTreeMap<TaskId, Percentage>>,
    /// Saturation ceiling per task.
    #[serde(default)]
    pub task_saturation: BTreeMap<JobId, BTreeMap<TaskId, Saturation>>,
    /// Ordered peers allocated per task.
    #[serde(default)]
    pub allocations: BTreeMap<JobId, BTreeMap<TaskId, Vec<PeerId>>>,
    /// Task scheduler policy per job.
    #[serde(default)]
    pub task_schedulers: BTreeMap<JobId, TaskSchedulerPolicy>,
}

impl Replica {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Add a job with its tasks and their percentages.
    #[must_use]
    pub fn with_job<T>(mut self, job: impl Into<JobId>, tasks: impl IntoIterator<Item = (T, Percentage)>) -> Self
    where
        T: Into<TaskId>,
    {
        let job = job.into();
        let mut ids = Vec::new();
        let mut pcts = BTreeMap::new();
        for (task, pct) in tasks {
            let task = task.into();
            ids.push(task.clone());
            pcts.insert(task, pct);
        }
        self.tasks.insert(job.clone(), ids);
        self.task_percentages.insert(job, pcts);
        self
    }

    /// Set the saturation ceiling of a task.
    #[must_use]
    pub fn with_saturation(
        mut self,
        job: impl Into<JobId>,
        task: impl Into<TaskId>,
        saturation: Saturation,
    ) -> Self {
        self.task_saturation
            .entry(job.into())
            .or_default()
            .insert(task.into(), saturation);
        self
    }

    /// Set the ordered peers allocated to a task.
    #[must_use]
    pub fn with_peers<P>(
        mut self,
        job: impl Into<JobId>,
        task: impl Into<TaskId>,
        peers: impl IntoIterator<Item = P>,
    ) -> Self
    where
        P: Into<PeerId>,
    {
        self.allocations
            .entry(job.into())
            .or_default()
            .insert(task.into(), peers.into_iter().map(Into::into).collect());
        self
    }

    /// Tag a job with its task scheduler policy.
    #[must_use]
    pub fn with_policy(mut self, job: impl Into<JobId>, policy: TaskSchedulerPolicy) -> Self {
        self.task_schedulers.insert(job.into(), policy);
        self
    }
}

impl ReplicaView for Replica {
    fn tasks(&self, job: &JobId) -> Option<&[TaskId]> {
        self.tasks.get(job).map(Vec::as_slice)
    }

    fn task_percentage(&self, job: &JobId, task: &TaskId) -> Option<Percentage> {
        self.task_percentages.get(job)?.get(task).copied()
    }

    fn task_saturation(&self, job: &JobId, task: &TaskId) -> Saturation {
        self.task_saturation
            .get(job)
            .and_then(|tasks| tasks.get(task))
            .copied()
            .unwrap_or_default()
    }

    fn task_peers(&self, job: &JobId, task: &TaskId) -> &[PeerId] {
        self.allocations
            .get(job)
            .and_then(|tasks| tasks.get(task))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn task_scheduler(&self, job: &JobId) -> Option<TaskSchedulerPolicy> {
        self.task_schedulers.get(job).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_parsing() {
        assert_eq!("60".parse::<Percentage>().unwrap(), Percentage::whole(60));
        assert_eq!("62.5".parse::<Percentage>().unwrap().micros(), 625_000);
        assert_eq!(".25".parse::<Percentage>().unwrap().micros(), 2_500);
        assert_eq!("33.3333".parse::<Percentage>().unwrap().micros(), 333_333);
        assert!("33.33333".parse::<Percentage>().is_err());
        assert!("-5".parse::<Percentage>().is_err());
        assert!("abc".parse::<Percentage>().is_err());
        assert!(".".parse::<Percentage>().is_err());
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::whole(15).to_string(), "15");
        assert_eq!(Percentage::from_micros(625_000).to_string(), "62.5");
        assert_eq!(Percentage::from_micros(10_050).to_string(), "1.005");
    }

    #[test]
    fn test_saturation_defaults_to_unbounded() {
        let replica = Replica::new().with_job("job", [("a", Percentage::HUNDRED)]);
        let sat = replica.task_saturation(&JobId::from("job"), &TaskId::from("a"));
        assert_eq!(sat, Saturation::Unbounded);
        assert!(!sat.is_exceeded_by(usize::MAX));
        assert!(Saturation::Bounded(3).is_exceeded_by(4));
        assert!(!Saturation::Bounded(3).is_exceeded_by(3));
    }

    #[test]
    fn test_missing_peers_are_empty() {
        let replica = Replica::new();
        assert!(replica
            .task_peers(&JobId::from("job"), &TaskId::from("a"))
            .is_empty());
        assert!(replica.tasks(&JobId::from("job")).is_none());
    }

    #[test]
    fn test_builders_return_new_values() {
        let base = Replica::new().with_job("job", [("a", Percentage::HUNDRED)]);
        let updated = base.clone().with_saturation("job", "a", Saturation::Bounded(2));
        assert_eq!(
            base.task_saturation(&"job".into(), &"a".into()),
            Saturation::Unbounded
        );
        assert_eq!(
            updated.task_saturation(&"job".into(), &"a".into()),
            Saturation::Bounded(2)
        );
    }

    #[test]
    fn test_replica_from_json() {
        let json = r#"{
            "tasks": { "job": ["a", "b"] },
            "task_percentages": { "job": { "a": 62.5, "b": "37.5" } },
            "task_saturation": { "job": { "a": 4, "b": "unbounded" } },
            "allocations": { "job": { "a": ["p1", "p2"] } },
            "task_schedulers": { "job": "percentage" }
        }"#;
        // 62.5 as a JSON number is not an integer, so it must be rejected.
        assert!(Replica::from_json_str(json).is_err());

        let json = json.replace("62.5", "\"62.5\"");
        let replica = Replica::from_json_str(&json).unwrap();
        let job = JobId::from("job");
        assert_eq!(
            replica.task_percentage(&job, &"a".into()),
            Some(Percentage::from_micros(625_000))
        );
        assert_eq!(replica.task_saturation(&job, &"a".into()), Saturation::Bounded(4));
        assert_eq!(replica.task_saturation(&job, &"b".into()), Saturation::Unbounded);
        assert_eq!(replica.task_peers(&job, &"a".into()).len(), 2);
        assert_eq!(replica.task_scheduler(&job), Some(TaskSchedulerPolicy::Percentage));
    }

    #[test]
    fn test_peer_ids_are_unique() {
        assert_ne!(PeerId::random(), PeerId::random());
    }
}
