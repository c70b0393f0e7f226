//! Detail resolution for the comparison matrix.
//!
//! Fetching full detail records is the only asynchronous step. Requests are
//! numbered with a generation counter: a request for a different set of ids
//! supersedes any in-flight one, and a response is applied only if its
//! generation is still the latest and the selection revision it was issued
//! for is still current. Stale responses are dropped, never merged.

use std::future::Future;

use parking_lot::Mutex;

use crate::core::{CatalogError, DetailRecord, Result, VehicleId};

use super::attributes::{default_descriptors, AttributeDescriptor};
use super::best_value::ComparisonMatrix;
use super::selection::CompareSelection;

/// Collaborator that hydrates full detail records for selected ids.
pub trait DetailResolver: Send + Sync {
    fn fetch_details(
        &self,
        ids: &[VehicleId],
    ) -> impl Future<Output = Result<Vec<DetailRecord>>> + Send;
}

/// What the comparison view should currently show.
#[derive(Debug, Clone, Default)]
pub enum MatrixState {
    #[default]
    Idle,
    Loading {
        ids: Vec<VehicleId>,
    },
    Ready(ComparisonMatrix),
    Failed(CatalogError),
}

impl MatrixState {
    pub fn is_loading(&self) -> bool {
        matches!(self, MatrixState::Loading { .. })
    }

    pub fn matrix(&self) -> Option<&ComparisonMatrix> {
        match self {
            MatrixState::Ready(matrix) => Some(matrix),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            MatrixState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Handle for one outstanding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTicket {
    generation: u64,
    revision: u64,
    ids: Vec<VehicleId>,
}

impl ResolutionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Selection revision the request was issued for.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn ids(&self) -> &[VehicleId] {
        &self.ids
    }
}

/// Last-request-wins holder of the comparison matrix.
#[derive(Debug, Clone)]
pub struct ComparisonLoader {
    generation: u64,
    pending: Option<(Vec<VehicleId>, u64)>,
    state: MatrixState,
    descriptors: Vec<AttributeDescriptor>,
}

impl Default for ComparisonLoader {
    fn default() -> Self {
        Self::new(default_descriptors())
    }
}

impl ComparisonLoader {
    pub fn new(descriptors: &[AttributeDescriptor]) -> Self {
        Self {
            generation: 0,
            pending: None,
            state: MatrixState::Idle,
            descriptors: descriptors.to_vec(),
        }
    }

    pub fn state(&self) -> &MatrixState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a request for `ids` at selection `revision`.
    ///
    /// Asking again for the ids and revision already in flight reuses that
    /// request's generation; anything else supersedes it.
    pub fn begin(&mut self, ids: Vec<VehicleId>, revision: u64) -> ResolutionTicket {
        if let Some((pending_ids, pending_revision)) = &self.pending {
            if *pending_ids == ids && *pending_revision == revision {
                return ResolutionTicket {
                    generation: self.generation,
                    revision,
                    ids,
                };
            }
        }

        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            revision,
            ?ids,
            "Resolving comparison details"
        );
        self.pending = Some((ids.clone(), revision));
        self.state = MatrixState::Loading { ids: ids.clone() };
        ResolutionTicket {
            generation: self.generation,
            revision,
            ids,
        }
    }

    /// Apply a response, given the selection revision at arrival.
    ///
    /// Returns `false` when the ticket was superseded by a newer request or
    /// the selection changed while it was in flight. The latter also drops
    /// the loading state, since nothing is waiting for those ids any more.
    pub fn complete(
        &mut self,
        ticket: ResolutionTicket,
        result: Result<Vec<DetailRecord>>,
        current_revision: u64,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "Discarding superseded detail response"
            );
            return false;
        }
        if ticket.revision != current_revision {
            tracing::debug!(
                requested = ticket.revision,
                current = current_revision,
                "Selection changed while details were loading"
            );
            self.pending = None;
            self.state = MatrixState::Idle;
            return false;
        }

        self.pending = None;
        self.state = match result {
            Ok(records) => {
                let ordered = order_by_ids(records, &ticket.ids);
                MatrixState::Ready(ComparisonMatrix::build(&ordered, &self.descriptors))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Detail resolution failed");
                MatrixState::Failed(err)
            }
        };
        true
    }

    /// Abandon whatever is in flight and go back to idle.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.state = MatrixState::Idle;
    }
}

/// Arrange resolved records in selection order, skipping ids the resolver
/// did not return.
fn order_by_ids(mut records: Vec<DetailRecord>, ids: &[VehicleId]) -> Vec<DetailRecord> {
    let ordered: Vec<DetailRecord> = ids
        .iter()
        .filter_map(|id| {
            let pos = records.iter().position(|r| r.id == *id)?;
            Some(records.swap_remove(pos))
        })
        .collect();
    if ordered.len() < ids.len() {
        tracing::warn!(
            requested = ids.len(),
            resolved = ordered.len(),
            "Some selected vehicles have no detail record"
        );
    }
    ordered
}

/// Resolve the current selection through `resolver` and apply the result
/// to `loader`.
///
/// Neither lock is held while the fetch is pending, so the selection may
/// change and a newer call may supersede this one. Returns whether this
/// call's result was applied. A selection that cannot open a comparison
/// resets the loader instead.
pub async fn resolve_comparison<R: DetailResolver>(
    loader: &Mutex<ComparisonLoader>,
    selection: &Mutex<CompareSelection>,
    resolver: &R,
) -> bool {
    let request = {
        let selection = selection.lock();
        selection
            .open_comparison()
            .map(|ids| (ids, selection.revision()))
    };
    let Some((ids, revision)) = request else {
        loader.lock().reset();
        return false;
    };

    let ticket = loader.lock().begin(ids, revision);
    let result = resolver.fetch_details(ticket.ids()).await;
    let current_revision = selection.lock().revision();
    loader.lock().complete(ticket, result, current_revision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::attributes::AttributeKey;
    use crate::compare::viewport::{CapacityPolicy, Viewport};
    use crate::core::VehicleRecord;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn detail(id: VehicleId, price: f64) -> DetailRecord {
        DetailRecord {
            id,
            make_name: "Make".into(),
            model: format!("M{id}"),
            current_price: Some(price),
            ..Default::default()
        }
    }

    fn record(id: VehicleId) -> VehicleRecord {
        VehicleRecord {
            id,
            ..Default::default()
        }
    }

    fn selection_of(ids: &[VehicleId]) -> CompareSelection {
        let mut selection = CompareSelection::new(CapacityPolicy::default(), Viewport::default());
        selection.enter_compare_mode();
        for &id in ids {
            assert!(selection.add_car(&record(id)).is_added());
        }
        selection
    }

    fn column_ids(state: &MatrixState) -> Vec<VehicleId> {
        state
            .matrix()
            .map(|m| m.columns.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    /// Serves from a fixed table; `[1, 2]` waits for `release`, any request
    /// naming 99 never resolves.
    struct ScriptedResolver {
        table: Vec<DetailRecord>,
        release: Arc<Notify>,
        fail: bool,
    }

    impl ScriptedResolver {
        fn new() -> Self {
            Self {
                table: vec![detail(1, 100.0), detail(2, 200.0), detail(3, 300.0)],
                release: Arc::new(Notify::new()),
                fail: false,
            }
        }
    }

    impl DetailResolver for ScriptedResolver {
        async fn fetch_details(&self, ids: &[VehicleId]) -> Result<Vec<DetailRecord>> {
            if ids.contains(&99) {
                std::future::pending::<()>().await;
            }
            if ids == [1, 2] {
                self.release.notified().await;
            }
            if self.fail {
                return Err(CatalogError::detail("upstream unavailable"));
            }
            Ok(self
                .table
                .iter()
                .filter(|d| ids.contains(&d.id))
                .cloned()
                .collect())
        }
    }

    #[test]
    fn test_complete_applies_current_ticket() {
        let mut loader = ComparisonLoader::default();
        let ticket = loader.begin(vec![2, 1], 4);
        assert!(loader.state().is_loading());
        assert!(loader.complete(ticket, Ok(vec![detail(1, 100.0), detail(2, 200.0)]), 4));
        assert_eq!(column_ids(loader.state()), vec![2, 1]);
    }

    #[test]
    fn test_superseded_ticket_is_discarded() {
        let mut loader = ComparisonLoader::default();
        let old = loader.begin(vec![1, 2], 2);
        let new = loader.begin(vec![1, 3], 4);
        assert!(new.generation() > old.generation());

        assert!(loader.complete(new, Ok(vec![detail(1, 100.0), detail(3, 300.0)]), 4));
        assert!(!loader.complete(old, Ok(vec![detail(1, 100.0), detail(2, 200.0)]), 4));
        assert_eq!(column_ids(loader.state()), vec![1, 3]);
    }

    #[test]
    fn test_same_key_reuses_generation() {
        let mut loader = ComparisonLoader::default();
        let first = loader.begin(vec![1, 2], 2);
        let again = loader.begin(vec![1, 2], 2);
        assert_eq!(first.generation(), again.generation());
        assert!(loader.complete(first, Ok(vec![detail(1, 1.0), detail(2, 2.0)]), 2));
        assert!(loader.complete(again, Ok(vec![detail(1, 1.0), detail(2, 2.0)]), 2));
    }

    #[test]
    fn test_same_ids_at_new_revision_supersede() {
        let mut loader = ComparisonLoader::default();
        let first = loader.begin(vec![1, 2], 2);
        let readded = loader.begin(vec![1, 2], 4);
        assert!(readded.generation() > first.generation());
        assert!(!loader.complete(first, Ok(vec![detail(1, 1.0), detail(2, 2.0)]), 4));
        assert!(loader.complete(readded, Ok(vec![detail(1, 1.0), detail(2, 2.0)]), 4));
    }

    #[test]
    fn test_selection_change_discards_in_flight_result() {
        let mut selection = selection_of(&[1, 2]);
        let mut loader = ComparisonLoader::default();
        let ticket = loader.begin(selection.open_comparison().unwrap(), selection.revision());

        assert!(selection.remove_car(2));
        let applied = loader.complete(
            ticket,
            Ok(vec![detail(1, 100.0), detail(2, 200.0)]),
            selection.revision(),
        );

        assert!(!applied);
        assert_eq!(selection.selected_ids(), vec![1]);
        assert!(matches!(loader.state(), MatrixState::Idle));
        assert!(column_ids(loader.state()).is_empty());
    }

    #[test]
    fn test_reset_abandons_in_flight() {
        let mut loader = ComparisonLoader::default();
        let ticket = loader.begin(vec![1, 2], 2);
        loader.reset();
        assert!(!loader.complete(ticket, Ok(vec![]), 2));
        assert!(matches!(loader.state(), MatrixState::Idle));
    }

    #[test]
    fn test_missing_details_are_skipped() {
        let mut loader = ComparisonLoader::default();
        let ticket = loader.begin(vec![1, 2, 3], 3);
        loader.complete(ticket, Ok(vec![detail(3, 300.0), detail(1, 100.0)]), 3);
        assert_eq!(column_ids(loader.state()), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_last_request_wins_when_first_finishes_late() {
        let loader = Mutex::new(ComparisonLoader::default());
        let selection = Mutex::new(selection_of(&[1, 2]));
        let resolver = ScriptedResolver::new();

        let first = resolve_comparison(&loader, &selection, &resolver);
        let second = async {
            {
                let mut selection = selection.lock();
                selection.remove_car(2);
                selection.add_car(&record(3));
            }
            let applied = resolve_comparison(&loader, &selection, &resolver).await;
            resolver.release.notify_one();
            applied
        };
        let (first_applied, second_applied) = tokio::join!(first, second);

        assert!(!first_applied);
        assert!(second_applied);
        let loader = loader.lock();
        assert_eq!(column_ids(loader.state()), vec![1, 3]);
        let matrix = loader.state().matrix().unwrap();
        assert_eq!(matrix.winners(AttributeKey::CurrentPrice), vec![1]);
    }

    #[tokio::test]
    async fn test_removal_during_fetch_discards_result() {
        let loader = Mutex::new(ComparisonLoader::default());
        let selection = Mutex::new(selection_of(&[1, 2]));
        let resolver = ScriptedResolver::new();

        let fetch = resolve_comparison(&loader, &selection, &resolver);
        let remove = async {
            selection.lock().remove_car(2);
            resolver.release.notify_one();
        };
        let (applied, ()) = tokio::join!(fetch, remove);

        assert!(!applied);
        assert_eq!(selection.lock().selected_ids(), vec![1]);
        assert!(matches!(loader.lock().state(), MatrixState::Idle));
    }

    #[tokio::test]
    async fn test_too_small_selection_resets_loader() {
        let loader = Mutex::new(ComparisonLoader::default());
        let selection = Mutex::new(selection_of(&[3]));
        let resolver = ScriptedResolver::new();

        assert!(!resolve_comparison(&loader, &selection, &resolver).await);
        assert!(matches!(loader.lock().state(), MatrixState::Idle));
    }

    #[tokio::test]
    async fn test_never_resolving_fetch_stays_loading() {
        let loader = Mutex::new(ComparisonLoader::default());
        let selection = Mutex::new(selection_of(&[99, 1]));
        let resolver = ScriptedResolver::new();

        tokio::select! {
            biased;
            _ = resolve_comparison(&loader, &selection, &resolver) => panic!("fetch should hang"),
            _ = tokio::task::yield_now() => {}
        }

        assert!(loader.lock().state().is_loading());
    }

    #[tokio::test]
    async fn test_failure_leaves_selection_untouched() {
        let loader = Mutex::new(ComparisonLoader::default());
        let selection = Mutex::new(selection_of(&[2, 3]));
        let resolver = ScriptedResolver {
            fail: true,
            ..ScriptedResolver::new()
        };
        assert!(resolve_comparison(&loader, &selection, &resolver).await);

        let loader = loader.lock();
        assert!(loader.state().error().is_some_and(|e| e.is_retryable()));
        assert_eq!(selection.lock().selected_ids(), vec![2, 3]);
    }
}
