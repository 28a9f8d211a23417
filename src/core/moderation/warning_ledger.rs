// Warning ledger - the per-member list of moderator warnings.
//
// Lives in memory only. A restart clears every warning.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

pub const DEFAULT_REASON: &str = "No reason provided";

/// A single warning issued by a moderator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub reason: String,
    pub issued_by: u64,
    pub issued_at: DateTime<Utc>,
}

/// Maps member id -> warnings, oldest first.
///
/// DashMap keeps this safe to touch from concurrent command invocations
/// without wrapping the whole ledger in a Mutex.
#[derive(Default)]
pub struct WarningLedger {
    entries: DashMap<u64, Vec<Warning>>,
}

impl WarningLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a warning and return the member's new warning count.
    pub fn warn(&self, member_id: u64, reason: Option<String>, issued_by: u64) -> usize {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        let mut warnings = self.entries.entry(member_id).or_default();
        warnings.push(Warning {
            reason,
            issued_by,
            issued_at: Utc::now(),
        });
        warnings.len()
    }

    /// Remove and return the most recent warning.
    ///
    /// Popping the last warning removes the member from the ledger entirely.
    pub fn unwarn(&self, member_id: u64) -> Option<Warning> {
        let removed = {
            let mut warnings = self.entries.get_mut(&member_id)?;
            warnings.pop()
        };

        self.entries.remove_if(&member_id, |_, warnings| warnings.is_empty());
        removed
    }

    /// Drop every warning for a member. Returns how many were removed.
    pub fn clear(&self, member_id: u64) -> usize {
        self.entries
            .remove(&member_id)
            .map(|(_, warnings)| warnings.len())
            .unwrap_or(0)
    }

    pub fn warnings(&self, member_id: u64) -> Vec<Warning> {
        self.entries
            .get(&member_id)
            .map(|w| w.clone())
            .unwrap_or_default()
    }
}
