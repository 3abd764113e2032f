//! Exact rational shares and the transient per-task records built from them.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::core::replica::{Percentage, TaskId};

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Non-negative rational percentage, always kept in lowest terms.
///
/// Rescaled shares such as 100/3 have no exact decimal form, so the
/// allocator works on numerator/denominator pairs instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Share {
    numer: u128,
    denom: u128,
}

impl Share {
    /// Zero percent.
    pub const ZERO: Self = Self { numer: 0, denom: 1 };
    /// One hundred percent.
    pub const HUNDRED: Self = Self { numer: 100, denom: 1 };

    /// Construct `numer / denom` percent.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn new(numer: u128, denom: u128) -> Self {
        assert!(denom != 0, "share denominator must be non-zero");
        let g = gcd(numer, denom);
        Self {
            numer: numer / g,
            denom: denom / g,
        }
    }

    /// Numerator in lowest terms.
    pub const fn numer(self) -> u128 {
        self.numer
    }

    /// Denominator in lowest terms.
    pub const fn denom(self) -> u128 {
        self.denom
    }

    /// Whether the share is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.numer == 0
    }

    /// `self * 100 / total`, the share relative to a pool summing to `total`.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero.
    #[must_use]
    pub fn relative_to(self, total: Self) -> Self {
        Self::new(self.numer * 100 * total.denom, self.denom * total.numer)
    }

    /// Split `self / 100 * n` into its integer part and fractional remainder.
    ///
    /// The remainder is returned as an exact fraction `rem / div` with
    /// `rem < div`.
    pub fn apportion(self, n: usize) -> (usize, Remainder) {
        let div = self.denom * 100;
        let scaled = self.numer * n as u128;
        let whole = scaled / div;
        let rem = scaled % div;
        // whole <= n whenever the share is at most 100 percent
        let whole = usize::try_from(whole).unwrap_or(usize::MAX);
        (whole, Remainder { rem, div })
    }
}

impl Add for Share {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let g = gcd(self.denom, other.denom);
        let denom = self.denom / g * other.denom;
        let numer = self.numer * (other.denom / g) + other.numer * (self.denom / g);
        Self::new(numer, denom)
    }
}

impl Sum for Share {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Ord for Share {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numer * other.denom).cmp(&(other.numer * self.denom))
    }
}

impl PartialOrd for Share {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Percentage> for Share {
    fn from(pct: Percentage) -> Self {
        Self::new(u128::from(pct.micros()), u128::from(Percentage::SCALE))
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}%", self.numer)
        } else {
            write!(f, "{}/{}%", self.numer, self.denom)
        }
    }
}

/// Exact fractional part left after flooring an apportioned share.
#[derive(Debug, Clone, Copy)]
pub struct Remainder {
    rem: u128,
    div: u128,
}

impl PartialEq for Remainder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Remainder {}

impl Ord for Remainder {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rem * other.div).cmp(&(other.rem * self.div))
    }
}

impl PartialOrd for Remainder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A task's share relative to the current candidate pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskShare {
    /// Task identifier.
    pub task: TaskId,
    /// Percentage of the pool.
    pub pct: Share,
}

impl TaskShare {
    /// Pair a task with its share.
    pub fn new(task: impl Into<TaskId>, pct: impl Into<Share>) -> Self {
        Self {
            task: task.into(),
            pct: pct.into(),
        }
    }
}

/// Peers assigned to a task, with the share it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAllocation {
    /// Task identifier.
    pub task: TaskId,
    /// Share of the pool the allocation was derived from.
    pub pct: Share,
    /// Number of peers assigned.
    pub allocation: usize,
}

/// Total of all shares in `shares`.
pub fn total_share(shares: &[TaskShare]) -> Share {
    shares.iter().map(|share| share.pct).sum()
}
