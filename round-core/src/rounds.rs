//! Round schedules as data and validated round limits.

use crate::Error;

/// Number of schedule steps a transform executes, checked against the
/// schedule length when it is created.
///
/// The limit remembers that length, so it is only accepted by schedules of
/// the same size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoundLimit {
    rounds: usize,
    max: usize,
}

impl RoundLimit {
    /// Validates `requested` against a schedule of `max` steps.
    pub fn new(name: &'static str, requested: usize, max: usize) -> Result<Self, Error> {
        if requested > max {
            return Err(Error::RoundLimitExceeded {
                name,
                requested,
                max,
            });
        }
        Ok(RoundLimit {
            rounds: requested,
            max,
        })
    }

    pub(crate) const fn full(max: usize) -> Self {
        RoundLimit { rounds: max, max }
    }

    /// Number of steps to execute.
    #[inline]
    pub const fn get(self) -> usize {
        self.rounds
    }

    /// Schedule length the limit was checked against.
    #[inline]
    pub const fn max(self) -> usize {
        self.max
    }
}

/// Immutable, ordered step descriptors of one primitive.
///
/// A transform runs a prefix of `steps` selected by a [`RoundLimit`] and
/// then its family's combination step. Specs live in statics and are read
/// concurrently by every context of the primitive.
#[derive(Debug)]
pub struct RoundSpec<S: 'static> {
    name: &'static str,
    steps: &'static [S],
}

impl<S: 'static> RoundSpec<S> {
    /// Creates a spec named `name` over `steps`.
    pub const fn new(name: &'static str, steps: &'static [S]) -> Self {
        Self { name, steps }
    }

    /// Name reported in round limit errors.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Length of the full schedule.
    #[inline]
    pub const fn max_rounds(&self) -> usize {
        self.steps.len()
    }

    /// Validates a requested limit against this schedule.
    pub fn limit(&self, requested: usize) -> Result<RoundLimit, Error> {
        RoundLimit::new(self.name, requested, self.steps.len())
    }

    /// Limit running every step.
    pub const fn full(&self) -> RoundLimit {
        RoundLimit::full(self.steps.len())
    }

    /// Steps executed under `limit`.
    ///
    /// # Panics
    ///
    /// If `limit` was checked against a schedule of a different length.
    #[inline]
    pub fn steps(&self, limit: RoundLimit) -> &'static [S] {
        assert_eq!(
            limit.max,
            self.steps.len(),
            "{}: round limit checked against another schedule",
            self.name
        );
        &self.steps[..limit.rounds]
    }

    /// Every step of the schedule.
    pub const fn all(&self) -> &'static [S] {
        self.steps
    }
}
