//! Entity tab controller
//!
//! Owns the list state of one tab (rows, total, query, selection) and wires
//! it to the REST API and the bulk coordinator. All mutation goes through
//! `&mut self`, so a tab needs no locking of its own; an embedder that shares
//! a tab between tasks uses the split [`EntityTab::set_query`] /
//! [`EntityTab::finish_load`] pair and relies on the generation check to drop
//! responses that arrive after a newer query.

use std::sync::Arc;

use shared::models::{Coupon, DiscountRule, Register, Store, TaxCategory, TaxRule, User};
use shared::{EntityQuery, Ordering, PageResult, QueryError};

use crate::api::{Resource, ResourceApi};
use crate::bulk::{BulkAction, BulkMutationCoordinator, BulkOutcome};
use crate::notice::{Notice, Notifier};
use crate::selection::{SelectionModel, Toggle};
use crate::{ClientResult, HttpClient};

pub type UsersTab = EntityTab<User>;
pub type StoresTab = EntityTab<Store>;
pub type RegistersTab = EntityTab<Register>;
pub type TaxCategoriesTab = EntityTab<TaxCategory>;
pub type TaxRulesTab = EntityTab<TaxRule>;
pub type DiscountRulesTab = EntityTab<DiscountRule>;
pub type CouponsTab = EntityTab<Coupon>;

/// Handle for one in-flight list request
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    generation: u64,
    query: EntityQuery,
}

impl LoadTicket {
    pub fn query(&self) -> &EntityQuery {
        &self.query
    }
}

/// What happened to a finished list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Applied,
    /// Superseded by a newer query; result dropped
    Stale,
    Failed,
}

pub struct EntityTab<R: Resource> {
    rows: Vec<R>,
    total: Option<u64>,
    query: EntityQuery,
    selection: SelectionModel,
    generation: u64,
    loading: bool,
    coordinator: BulkMutationCoordinator,
    notifier: Arc<dyn Notifier>,
}

impl<R: Resource> std::fmt::Debug for EntityTab<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityTab")
            .field("resource", &R::PATH)
            .field("rows", &self.rows.len())
            .field("total", &self.total)
            .field("query", &self.query)
            .field("selection", &self.selection)
            .field("generation", &self.generation)
            .field("loading", &self.loading)
            .finish()
    }
}

impl<R: Resource> EntityTab<R> {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_protected(notifier, None)
    }

    /// Tab whose `protected` row can never be selected or toggled
    pub fn with_protected(notifier: Arc<dyn Notifier>, protected: Option<i64>) -> Self {
        Self {
            rows: Vec::new(),
            total: None,
            query: EntityQuery::default(),
            selection: SelectionModel::new(protected),
            generation: 0,
            loading: false,
            coordinator: BulkMutationCoordinator::sequential(),
            notifier,
        }
    }

    pub fn with_coordinator(mut self, coordinator: BulkMutationCoordinator) -> Self {
        self.coordinator = coordinator;
        self
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row(&self, id: i64) -> Option<&R> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Server-side total; `None` when the server did not report one
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn query(&self) -> &EntityQuery {
        &self.query
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ========== Loading ==========

    /// Switch to a new query. The selection is cleared immediately.
    pub fn set_query(&mut self, query: EntityQuery) -> LoadTicket {
        self.query = query;
        self.begin_load()
    }

    /// Reload with the current query
    pub fn reload(&mut self) -> LoadTicket {
        self.begin_load()
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.selection.clear();
        self.generation += 1;
        self.loading = true;
        tracing::debug!(resource = R::PATH, generation = self.generation, "Loading list");
        LoadTicket {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Apply a list response, unless a newer request superseded it.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ClientResult<PageResult<R>>) -> LoadState {
        if ticket.generation != self.generation {
            tracing::debug!(
                resource = R::PATH,
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale list response"
            );
            return LoadState::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.selection.set_visible(page.rows.iter().map(|row| row.id()));
                self.rows = page.rows;
                self.total = page.total;
                tracing::debug!(resource = R::PATH, rows = self.rows.len(), total = ?self.total, "List loaded");
                LoadState::Applied
            }
            Err(e) => {
                tracing::error!(resource = R::PATH, error = %e, "Failed to load list");
                self.rows.clear();
                self.total = None;
                self.selection.set_visible(std::iter::empty());
                self.notifier
                    .notify(Notice::error(format!("Failed to load {} list: {e}", R::NOUN)));
                LoadState::Failed
            }
        }
    }

    /// Fetch and apply the current query
    pub async fn load<H: HttpClient>(&mut self, api: &ResourceApi<R, H>) -> LoadState {
        let ticket = self.reload();
        let result = api.list(ticket.query()).await;
        self.finish_load(ticket, result)
    }

    /// Column header click: sort by `field`, flipping direction on repeat.
    pub fn sort_by(&mut self, field: &str) -> Result<LoadTicket, QueryError> {
        let next = Ordering::next_for(self.query.ordering.as_ref(), field);
        let ordering = Ordering::parse(&next.to_string(), R::SORTABLE)?;
        let query = self.query.clone().order_by(ordering);
        Ok(self.set_query(query))
    }

    // ========== Selection ==========

    pub fn toggle_one(&mut self, id: i64) -> Toggle {
        let result = self.selection.toggle_one(id);
        if result == Toggle::Protected {
            self.notifier
                .notify(Notice::info(format!("You cannot select your own {}", R::NOUN)));
        }
        result
    }

    pub fn toggle_all(&mut self) {
        self.selection.toggle_all();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selection.ids()
    }

    /// The row's own active switch is disabled for the protected id
    pub fn can_toggle_active(&self, id: i64) -> bool {
        !self.selection.is_protected(id)
    }

    // ========== Mutations ==========

    /// Flip one row's active flag via its own switch
    pub async fn set_row_active<H: HttpClient>(
        &mut self,
        api: &ResourceApi<R, H>,
        id: i64,
        active: bool,
    ) -> ClientResult<()> {
        if !self.can_toggle_active(id) {
            self.notifier
                .notify(Notice::info(format!("You cannot deactivate your own {}", R::NOUN)));
            return Ok(());
        }
        match api.set_active(id, active).await {
            Ok(updated) => {
                if let Some(row) = self.rows.iter_mut().find(|row| row.id() == id) {
                    *row = updated;
                }
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Run `action` over the current selection
    ///
    /// Succeeded rows are patched or removed in place, the selection is
    /// reseeded with the failed ids and a single notice is emitted.
    pub async fn bulk<H: HttpClient>(&mut self, api: &ResourceApi<R, H>, action: BulkAction) -> BulkOutcome {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return BulkOutcome::default();
        }
        tracing::info!(resource = R::PATH, action = action.as_str(), count = ids.len(), "Bulk action");

        let outcome = match action.target_state() {
            Some(active) => {
                self.coordinator
                    .run(&ids, |id| async move { api.set_active(id, active).await.map(|_| ()) })
                    .await
            }
            None => {
                self.coordinator
                    .run(&ids, |id| async move { api.delete(id).await })
                    .await
            }
        };

        self.apply_outcome(action, &outcome);
        outcome
    }

    /// Fold a finished bulk run into the tab state
    pub fn apply_outcome(&mut self, action: BulkAction, outcome: &BulkOutcome) {
        outcome.apply(action, &mut self.rows);
        if action == BulkAction::Delete {
            self.total = self
                .total
                .map(|total| total.saturating_sub(outcome.succeeded.len() as u64));
            self.selection
                .retain_visible(self.rows.iter().map(|row| row.id()));
        }
        self.selection.reseed(outcome.failed.iter().copied());
        if let Some(notice) = outcome.notice(action, R::NOUN) {
            self.notifier.notify(notice);
        }
    }
}

impl EntityTab<User> {
    /// Users tab; the signed-in user is protected from selection and deactivation
    pub fn for_current_user(notifier: Arc<dyn Notifier>, current_user_id: Option<i64>) -> Self {
        Self::with_protected(notifier, current_user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use crate::notice::{NoticeLevel, NoticeLog};

    fn user(id: i64) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: "cashier".to_string(),
            store: None,
            is_active: true,
        }
    }

    fn page(ids: &[i64], total: Option<u64>) -> ClientResult<PageResult<User>> {
        Ok(PageResult {
            rows: ids.iter().map(|&id| user(id)).collect(),
            total,
        })
    }

    fn loaded_tab(ids: &[i64], protected: Option<i64>) -> (UsersTab, Arc<NoticeLog>) {
        let log = Arc::new(NoticeLog::new());
        let mut tab = UsersTab::for_current_user(log.clone(), protected);
        let ticket = tab.reload();
        assert_eq!(tab.finish_load(ticket, page(ids, Some(ids.len() as u64))), LoadState::Applied);
        (tab, log)
    }

    #[test]
    fn test_query_change_clears_selection_before_response() {
        let (mut tab, _) = loaded_tab(&[1, 2, 3], None);
        tab.toggle_one(1);
        tab.toggle_one(2);
        assert_eq!(tab.selection().len(), 2);

        let ticket = tab.set_query(EntityQuery::new().search("abc"));
        assert!(tab.selection().is_empty());
        assert!(tab.is_loading());
        assert_eq!(ticket.query().search.as_deref(), Some("abc"));
    }

    #[test]
    fn test_stale_response_discarded() {
        let (mut tab, _) = loaded_tab(&[1, 2], None);
        let old = tab.set_query(EntityQuery::new().search("a"));
        let new = tab.set_query(EntityQuery::new().search("ab"));

        assert_eq!(tab.finish_load(new, page(&[7], Some(1))), LoadState::Applied);
        assert_eq!(tab.finish_load(old, page(&[8, 9], Some(2))), LoadState::Stale);
        let ids: Vec<i64> = tab.rows().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![7]);
        assert_eq!(tab.total(), Some(1));
    }

    #[test]
    fn test_load_failure_clears_rows_and_notifies_once() {
        let (mut tab, log) = loaded_tab(&[1, 2], None);
        let query = EntityQuery::new().search("x");
        let ticket = tab.set_query(query.clone());
        let state = tab.finish_load(
            ticket,
            Err(ClientError::Api {
                status: 503,
                message: "maintenance".to_string(),
            }),
        );
        assert_eq!(state, LoadState::Failed);
        assert!(tab.rows().is_empty());
        assert_eq!(tab.total(), None);
        assert_eq!(tab.query(), &query);
        assert!(!tab.is_loading());
        let notices = log.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, "Failed to load user list: maintenance");
    }

    #[test]
    fn test_protected_toggle_notifies() {
        let (mut tab, log) = loaded_tab(&[1, 2, 3], Some(2));
        assert_eq!(tab.toggle_one(2), Toggle::Protected);
        assert!(tab.selection().is_empty());
        assert!(!tab.can_toggle_active(2));
        assert!(tab.can_toggle_active(1));
        let notices = log.take();
        assert_eq!(notices, vec![Notice::info("You cannot select your own user")]);
    }

    #[test]
    fn test_apply_outcome_reseeds_failed_and_patches_rows() {
        let (mut tab, log) = loaded_tab(&[1, 2, 3, 4, 5], None);
        for id in [1, 2, 3] {
            tab.toggle_one(id);
        }
        let outcome = BulkOutcome {
            succeeded: vec![1, 3],
            failed: vec![2],
            first_error: Some("locked".to_string()),
        };
        tab.apply_outcome(BulkAction::Deactivate, &outcome);

        assert_eq!(tab.selection().ids(), vec![2]);
        assert!(!tab.row(1).unwrap().is_active);
        assert!(tab.row(2).unwrap().is_active);
        assert!(!tab.row(3).unwrap().is_active);
        assert!(tab.row(4).unwrap().is_active);
        assert_eq!(
            log.take(),
            vec![Notice::info("Updated 2 user(s). Skipped 1 — locked.")]
        );
    }

    #[test]
    fn test_apply_delete_outcome_adjusts_total() {
        let (mut tab, _) = loaded_tab(&[1, 2, 3], None);
        tab.toggle_all();
        let outcome = BulkOutcome {
            succeeded: vec![1, 2, 3],
            ..Default::default()
        };
        tab.apply_outcome(BulkAction::Delete, &outcome);
        assert!(tab.rows().is_empty());
        assert_eq!(tab.total(), Some(0));
        assert!(tab.selection().is_empty());
    }

    #[test]
    fn test_sort_by_flips_and_validates() {
        let (mut tab, _) = loaded_tab(&[1], None);
        let ticket = tab.sort_by("username").unwrap();
        assert_eq!(ticket.query().ordering, Some(Ordering::asc("username")));
        tab.finish_load(ticket, page(&[1], None));
        let ticket = tab.sort_by("username").unwrap();
        assert_eq!(
            ticket.query().ordering.as_ref().map(ToString::to_string),
            Some("-username".to_string())
        );
        assert_eq!(
            tab.sort_by("password").unwrap_err(),
            QueryError::UnsortableField("password".to_string())
        );
    }
}
