//! Record identifiers and collision-free id generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a record within one app's list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How new ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random UUID v4.
    #[default]
    Uuid,
    /// Monotonic decimal counter.
    Counter,
}

impl IdStrategy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Uuid => "uuid",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "counter" => Ok(Self::Counter),
            other => Err(format!("unknown id strategy: {other}")),
        }
    }
}

/// Mints record ids that never repeat within one generator.
///
/// The counter variant starts above the largest numeric id it was seeded
/// with, so ids loaded from storage are never handed out again. Once the
/// counter runs past `u64::MAX` it hands out UUIDs instead.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    /// `None` once the counter is exhausted.
    next: Option<u64>,
}

impl IdGenerator {
    #[must_use]
    pub const fn new(strategy: IdStrategy) -> Self {
        Self { strategy, next: Some(1) }
    }

    /// Create a generator that skips every numeric id in `existing`.
    #[must_use]
    pub fn seeded<'a, I>(strategy: IdStrategy, existing: I) -> Self
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let max = existing.into_iter().filter_map(|id| id.as_str().parse::<u64>().ok()).max();
        Self { strategy, next: max.map_or(Some(1), |m| m.checked_add(1)) }
    }

    #[must_use]
    pub const fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Mint the next id.
    pub fn next_id(&mut self) -> RecordId {
        match (self.strategy, self.next) {
            (IdStrategy::Counter, Some(id)) => {
                self.next = id.checked_add(1);
                RecordId(id.to_string())
            },
            (IdStrategy::Counter, None) => {
                tracing::warn!("id counter exhausted, falling back to uuid");
                Self::uuid()
            },
            (IdStrategy::Uuid, _) => Self::uuid(),
        }
    }

    /// Mint the next id that `taken` does not already contain.
    pub fn next_unused(&mut self, taken: impl Fn(&RecordId) -> bool) -> RecordId {
        loop {
            let id = self.next_id();
            if !taken(&id) {
                return id;
            }
            tracing::debug!(id = %id, "generated id already in use, skipping");
        }
    }

    fn uuid() -> RecordId {
        RecordId(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn counter_starts_above_existing_ids() {
        let existing = [RecordId::from("3"), RecordId::from("abc"), RecordId::from("10")];
        let mut ids = IdGenerator::seeded(IdStrategy::Counter, existing.iter());
        assert_eq!(ids.next_id(), "11");
        assert_eq!(ids.next_id(), "12");
    }

    #[test]
    fn counter_at_u64_max_falls_back_to_uuid() {
        // given
        let existing = [RecordId::from(u64::MAX.to_string())];
        let mut ids = IdGenerator::seeded(IdStrategy::Counter, existing.iter());

        // when
        let first = ids.next_unused(|id| existing.contains(id));
        let second = ids.next_unused(|id| existing.contains(id) || *id == first);

        // then
        assert_ne!(first, existing[0]);
        assert!(uuid::Uuid::parse_str(first.as_str()).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn counter_hands_out_u64_max_once() {
        let existing = [RecordId::from((u64::MAX - 1).to_string())];
        let mut ids = IdGenerator::seeded(IdStrategy::Counter, existing.iter());
        assert_eq!(ids.next_id(), u64::MAX.to_string().as_str());
        assert!(uuid::Uuid::parse_str(ids.next_id().as_str()).is_ok());
        assert_eq!(ids.strategy(), IdStrategy::Counter);
    }

    #[test]
    fn counter_without_seed_starts_at_one() {
        let mut ids = IdGenerator::new(IdStrategy::Counter);
        assert_eq!(ids.next_id(), "1");
    }

    #[test]
    fn uuids_do_not_repeat() {
        let mut ids = IdGenerator::new(IdStrategy::Uuid);
        let minted: HashSet<RecordId> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(minted.len(), 1000);
    }

    #[test]
    fn next_unused_skips_taken_ids() {
        let mut ids = IdGenerator::new(IdStrategy::Counter);
        let taken: HashSet<RecordId> = ["1", "2"].into_iter().map(RecordId::from).collect();
        assert_eq!(ids.next_unused(|id| taken.contains(id)), "3");
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("COUNTER".parse::<IdStrategy>(), Ok(IdStrategy::Counter));
        assert!("timestamp".parse::<IdStrategy>().is_err());
    }
}
