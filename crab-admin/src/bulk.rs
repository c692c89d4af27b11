//! Bulk activate / deactivate / delete
//!
//! One user action, many records. Each id is mutated independently: a
//! failure never stops the remaining attempts, and the coordinator itself
//! never fails. The outcome splits the attempted ids into succeeded and
//! failed; only the first failure's message is kept, so the operator gets a
//! single aggregate notice instead of one per row.

use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;

use futures::StreamExt;
use futures::stream;
use shared::Record;

use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Activate,
    Deactivate,
    Delete,
}

impl BulkAction {
    /// New `is_active` value, for flag-flip actions
    pub fn target_state(&self) -> Option<bool> {
        match self {
            Self::Activate => Some(true),
            Self::Deactivate => Some(false),
            Self::Delete => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Delete => "delete",
        }
    }

    fn done_verb(&self) -> &'static str {
        match self {
            Self::Activate => "Activated",
            Self::Deactivate => "Deactivated",
            Self::Delete => "Deleted",
        }
    }

    fn partial_verb(&self) -> &'static str {
        match self {
            Self::Activate | Self::Deactivate => "Updated",
            Self::Delete => "Deleted",
        }
    }
}

/// Result of one bulk run
///
/// `succeeded` and `failed` partition the attempted ids, each id exactly once,
/// in attempt order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: Vec<i64>,
    pub failed: Vec<i64>,
    /// Message of the first failure
    pub first_error: Option<String>,
}

impl BulkOutcome {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }

    /// `succeeded ∪ failed == ids` and `succeeded ∩ failed == ∅`
    pub fn is_complete_for(&self, ids: &[i64]) -> bool {
        let expected: HashSet<i64> = ids.iter().copied().collect();
        let ok: HashSet<i64> = self.succeeded.iter().copied().collect();
        let failed: HashSet<i64> = self.failed.iter().copied().collect();
        ok.len() == self.succeeded.len()
            && failed.len() == self.failed.len()
            && ok.is_disjoint(&failed)
            && ok.union(&failed).copied().collect::<HashSet<_>>() == expected
    }

    /// Single aggregate notice; `None` when nothing was attempted
    pub fn notice(&self, action: BulkAction, noun: &str) -> Option<Notice> {
        let ok = self.succeeded.len();
        let failed = self.failed.len();
        let reason = || {
            self.first_error
                .clone()
                .unwrap_or_else(|| format!("could not {} {failed} {noun}(s)", action.as_str()))
        };
        match (ok, failed) {
            (0, 0) => None,
            (ok, 0) => Some(Notice::success(format!(
                "{} {ok} {noun}(s)",
                action.done_verb()
            ))),
            (0, _) => Some(Notice::error(reason())),
            (ok, failed) => Some(Notice::info(format!(
                "{} {ok} {noun}(s). Skipped {failed} — {}.",
                action.partial_verb(),
                reason().trim_end_matches('.')
            ))),
        }
    }

    /// Optimistic update of the in-memory rows
    ///
    /// Succeeded ids are patched (activate/deactivate) or removed (delete);
    /// failed rows are left as they are since their server state is unchanged.
    pub fn apply<R: Record>(&self, action: BulkAction, rows: &mut Vec<R>) {
        let succeeded: HashSet<i64> = self.succeeded.iter().copied().collect();
        match action.target_state() {
            Some(active) => rows
                .iter_mut()
                .filter(|row| succeeded.contains(&row.id()))
                .for_each(|row| row.set_active(active)),
            None => rows.retain(|row| !succeeded.contains(&row.id())),
        }
    }
}

/// Runs a per-id mutation over a selection
#[derive(Debug, Clone, Copy)]
pub struct BulkMutationCoordinator {
    concurrency: usize,
}

impl Default for BulkMutationCoordinator {
    fn default() -> Self {
        Self::sequential()
    }
}

impl BulkMutationCoordinator {
    /// One request at a time
    pub fn sequential() -> Self {
        Self { concurrency: 1 }
    }

    /// Up to `limit` requests in flight (at least 1)
    pub fn with_concurrency(limit: usize) -> Self {
        Self {
            concurrency: limit.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Call `mutate` once per distinct id and collect the outcome.
    ///
    /// Resolves only after every attempt has settled.
    pub async fn run<F, Fut, E>(&self, ids: &[i64], mut mutate: F) -> BulkOutcome
    where
        F: FnMut(i64) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        let mut seen = HashSet::with_capacity(ids.len());
        let ids: Vec<i64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        // `buffered` yields in input order regardless of completion order
        let results: Vec<(i64, Result<(), E>)> = stream::iter(ids)
            .map(|id| {
                let attempt = mutate(id);
                async move { (id, attempt.await) }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut outcome = BulkOutcome::default();
        for (id, result) in results {
            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(e) => {
                    tracing::warn!(id, error = %e, "Bulk item failed");
                    if outcome.first_error.is_none() {
                        outcome.first_error = Some(e.to_string());
                    }
                    outcome.failed.push(id);
                }
            }
        }

        tracing::info!(
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Bulk run finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::notice::NoticeLevel;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        is_active: bool,
    }

    impl Record for Row {
        fn id(&self) -> i64 {
            self.id
        }
        fn is_active(&self) -> bool {
            self.is_active
        }
        fn set_active(&mut self, active: bool) {
            self.is_active = active;
        }
    }

    fn rows(ids: &[i64]) -> Vec<Row> {
        ids.iter()
            .map(|&id| Row {
                id,
                is_active: true,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_failure_does_not_short_circuit() {
        let attempts = Arc::new(Mutex::new(Vec::new()));
        let seen = attempts.clone();
        let outcome = BulkMutationCoordinator::sequential()
            .run(&[1, 2, 3], move |id| {
                seen.lock().unwrap().push(id);
                async move {
                    if id == 2 {
                        Err("locked")
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert_eq!(*attempts.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(outcome.succeeded, vec![1, 3]);
        assert_eq!(outcome.failed, vec![2]);
        assert_eq!(outcome.first_error.as_deref(), Some("locked"));
        assert!(outcome.is_complete_for(&[1, 2, 3]));
    }

    #[tokio::test]
    async fn test_only_first_error_kept() {
        let outcome = BulkMutationCoordinator::sequential()
            .run(&[4, 5], |id| async move { Err::<(), _>(format!("boom {id}")) })
            .await;
        assert_eq!(outcome.failed, vec![4, 5]);
        assert_eq!(outcome.first_error.as_deref(), Some("boom 4"));
        let notice = outcome.notice(BulkAction::Delete, "coupon").unwrap();
        assert_eq!(notice, Notice::error("boom 4"));
    }

    #[tokio::test]
    async fn test_duplicates_attempted_once() {
        let outcome = BulkMutationCoordinator::sequential()
            .run(&[7, 7, 8], |_| async { Ok::<(), String>(()) })
            .await;
        assert_eq!(outcome.succeeded, vec![7, 8]);
        assert!(outcome.is_complete_for(&[7, 8]));
    }

    #[tokio::test]
    async fn test_concurrent_run_keeps_input_order() {
        let outcome = BulkMutationCoordinator::with_concurrency(4)
            .run(&[1, 2, 3, 4], |id| async move {
                // later ids finish first
                tokio::time::sleep(Duration::from_millis((5 - id as u64) * 5)).await;
                if id % 2 == 0 { Err("even") } else { Ok(()) }
            })
            .await;
        assert_eq!(outcome.succeeded, vec![1, 3]);
        assert_eq!(outcome.failed, vec![2, 4]);
        assert_eq!(outcome.first_error.as_deref(), Some("even"));
    }

    #[tokio::test]
    async fn test_empty_run() {
        let outcome = BulkMutationCoordinator::default()
            .run(&[], |_| async { Ok::<(), String>(()) })
            .await;
        assert!(outcome.is_empty());
        assert!(outcome.notice(BulkAction::Activate, "user").is_none());
    }

    #[test]
    fn test_notice_policy() {
        let all_ok = BulkOutcome {
            succeeded: vec![1, 2, 3, 4, 5],
            ..Default::default()
        };
        assert_eq!(
            all_ok.notice(BulkAction::Activate, "user"),
            Some(Notice::success("Activated 5 user(s)"))
        );

        let mixed = BulkOutcome {
            succeeded: vec![1, 3],
            failed: vec![2],
            first_error: Some("locked".to_string()),
        };
        let notice = mixed.notice(BulkAction::Deactivate, "user").unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "Updated 2 user(s). Skipped 1 — locked.");

        let mixed_delete = BulkOutcome {
            succeeded: vec![1],
            failed: vec![2, 3],
            first_error: Some("Store has registers.".to_string()),
        };
        assert_eq!(
            mixed_delete.notice(BulkAction::Delete, "store").unwrap().message,
            "Deleted 1 store(s). Skipped 2 — Store has registers."
        );
    }

    #[test]
    fn test_apply_patches_only_succeeded() {
        let mut list = rows(&[1, 2, 3, 4]);
        let outcome = BulkOutcome {
            succeeded: vec![1, 3],
            failed: vec![2],
            first_error: Some("locked".to_string()),
        };
        outcome.apply(BulkAction::Deactivate, &mut list);
        let states: Vec<(i64, bool)> = list.iter().map(|r| (r.id, r.is_active)).collect();
        assert_eq!(states, vec![(1, false), (2, true), (3, false), (4, true)]);
    }

    #[test]
    fn test_apply_delete_removes_succeeded() {
        let mut list = rows(&[1, 2, 3]);
        let outcome = BulkOutcome {
            succeeded: vec![3, 1],
            failed: vec![2],
            first_error: Some("in use".to_string()),
        };
        outcome.apply(BulkAction::Delete, &mut list);
        assert_eq!(list, rows(&[2]));
    }

    #[test]
    fn test_is_complete_for_rejects_overlap_and_drops() {
        let overlap = BulkOutcome {
            succeeded: vec![1, 2],
            failed: vec![2],
            first_error: None,
        };
        assert!(!overlap.is_complete_for(&[1, 2]));
        let dropped = BulkOutcome {
            succeeded: vec![1],
            ..Default::default()
        };
        assert!(!dropped.is_complete_for(&[1, 2]));
    }
}
