//! Per-session refresh bookkeeping for the analytics screen
//!
//! Every refresh takes a ticket before it starts fetching. When the fetch
//! completes, its report is committed only if no newer ticket has been issued
//! for the same session in the meantime; otherwise the result is dropped.
//! A failed refresh never clears the last committed report.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::analytics::AnalyticsReport;
use crate::domain::auth::UserId;

/// Proof of a started refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    owner: UserId,
    sequence: u64,
}

impl RefreshTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Default)]
struct SessionSlot {
    latest_issued: u64,
    committed: Option<CommittedReport>,
}

/// A report together with the ticket that produced it
#[derive(Debug, Clone)]
pub struct CommittedReport {
    pub sequence: u64,
    pub report: AnalyticsReport,
}

#[derive(Debug, Default)]
pub struct AnalyticsSessions {
    next_sequence: AtomicU64,
    slots: Mutex<HashMap<UserId, SessionSlot>>,
}

impl AnalyticsSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<UserId, SessionSlot>> {
        // A panic while holding the lock leaves the map itself consistent
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a clean session, discarding anything left from an earlier one
    pub fn open(&self, owner: UserId) {
        self.slots().insert(owner, SessionSlot::default());
    }

    /// Drop all state for `owner`; in-flight refreshes can no longer commit
    pub fn end(&self, owner: &UserId) {
        self.slots().remove(owner);
    }

    /// Issue a ticket that supersedes every earlier ticket of `owner`
    pub fn begin(&self, owner: UserId) -> RefreshTicket {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed) + 1;
        self.slots().entry(owner).or_default().latest_issued = sequence;
        RefreshTicket { owner, sequence }
    }

    /// Store `report` if `ticket` is still the newest; returns whether it was stored
    pub fn commit(&self, ticket: RefreshTicket, report: AnalyticsReport) -> bool {
        let mut slots = self.slots();
        match slots.get_mut(&ticket.owner) {
            Some(slot) if slot.latest_issued == ticket.sequence => {
                slot.committed = Some(CommittedReport {
                    sequence: ticket.sequence,
                    report,
                });
                true
            }
            _ => false,
        }
    }

    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        self.slots()
            .get(&ticket.owner)
            .is_some_and(|slot| slot.latest_issued == ticket.sequence)
    }

    /// Last report committed for `owner`, if any
    pub fn last_known(&self, owner: &UserId) -> Option<CommittedReport> {
        self.slots()
            .get(owner)
            .and_then(|slot| slot.committed.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::{AnalyticsTotals, GrowthMetrics, TimeWindow};
    use chrono::Utc;

    fn report(days: u32) -> AnalyticsReport {
        let now = Utc::now();
        AnalyticsReport {
            window: TimeWindow::trailing_days(now, days).unwrap(),
            totals: AnalyticsTotals::default(),
            growth: GrowthMetrics::default(),
            monthly: Vec::new(),
            categories: Vec::new(),
            top_services: Vec::new(),
            generated_at: now,
        }
    }

    #[test]
    fn test_newest_ticket_wins() {
        let sessions = AnalyticsSessions::new();
        let admin = UserId::generate();
        sessions.open(admin);

        let first = sessions.begin(admin);
        let second = sessions.begin(admin);

        assert!(sessions.commit(second, report(90)));
        assert!(!sessions.commit(first, report(7)));

        let known = sessions.last_known(&admin).unwrap();
        assert_eq!(known.sequence, second.sequence());
        assert_eq!(known.report.window.length().num_days(), 90);
    }

    #[test]
    fn test_stale_response_arriving_first_is_discarded() {
        let sessions = AnalyticsSessions::new();
        let admin = UserId::generate();

        let first = sessions.begin(admin);
        let second = sessions.begin(admin);

        assert!(!sessions.commit(first, report(7)));
        assert!(sessions.last_known(&admin).is_none());
        assert!(sessions.is_current(&second));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let sessions = AnalyticsSessions::new();
        let alice = UserId::generate();
        let bob = UserId::generate();

        let a = sessions.begin(alice);
        let b = sessions.begin(bob);

        assert!(sessions.commit(a, report(7)));
        assert!(sessions.commit(b, report(30)));
        assert_eq!(
            sessions.last_known(&alice).unwrap().report.window.length().num_days(),
            7
        );
    }

    #[test]
    fn test_end_discards_state_and_blocks_commits() {
        let sessions = AnalyticsSessions::new();
        let admin = UserId::generate();

        let ticket = sessions.begin(admin);
        sessions.end(&admin);

        assert!(!sessions.commit(ticket, report(30)));
        assert!(sessions.last_known(&admin).is_none());
    }

    #[test]
    fn test_open_resets_previous_session() {
        let sessions = AnalyticsSessions::new();
        let admin = UserId::generate();

        let ticket = sessions.begin(admin);
        assert!(sessions.commit(ticket, report(30)));

        sessions.open(admin);
        assert!(sessions.last_known(&admin).is_none());
    }
}
