//! Bounded, viewport-aware selection of vehicles for side-by-side comparison.
//!
//! The selection is a small state machine:
//!
//! ```text
//! Inactive --enter--> Active(empty, capacity)
//! Active   --exit---> Inactive            (selection discarded)
//! Active   --add/remove/clear/resize--> Active
//! ```
//!
//! All mutation goes through `&mut self`, so events are applied one at a time
//! in the order the owner receives them. Declined requests (duplicates, a
//! full selection, calls while inactive) come back as values, never errors.

use crate::core::{VehicleId, VehicleRecord};

use super::viewport::{CapacityPolicy, Viewport};

/// Minimum number of selected vehicles before a comparison can open.
pub const MIN_COMPARE: usize = 2;

/// Result of asking to add a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The id is already selected.
    Duplicate,
    /// The selection is full for the current viewport.
    AtCapacity,
    /// Compare mode is off.
    Inactive,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CompareState {
    Inactive,
    Active {
        selection: Vec<VehicleRecord>,
        capacity: usize,
    },
}

/// User intent delivered to the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareEvent {
    EnterCompareMode,
    ExitCompareMode,
    AddCar(VehicleRecord),
    RemoveCar(VehicleId),
    ClearSelection,
    ViewportChanged(Viewport),
    OpenComparison,
}

/// What handling a [`CompareEvent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareOutcome {
    /// Compare mode flag after the event.
    Mode { active: bool },
    Add(AddOutcome),
    Removed(bool),
    Cleared,
    Resized {
        capacity: usize,
        dropped: Vec<VehicleId>,
    },
    /// Ids to resolve, or `None` when fewer than two are selected.
    Open(Option<Vec<VehicleId>>),
}

/// Compare selection state owned by one presentation session.
#[derive(Debug, Clone)]
pub struct CompareSelection {
    policy: CapacityPolicy,
    viewport: Viewport,
    state: CompareState,
    revision: u64,
}

impl Default for CompareSelection {
    fn default() -> Self {
        Self::new(CapacityPolicy::default(), Viewport::default())
    }
}

impl CompareSelection {
    pub fn new(policy: CapacityPolicy, viewport: Viewport) -> Self {
        Self {
            policy,
            viewport,
            state: CompareState::Inactive,
            revision: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CompareState::Active { .. })
    }

    /// Capacity for the current viewport.
    pub fn capacity(&self) -> usize {
        match &self.state {
            CompareState::Active { capacity, .. } => *capacity,
            CompareState::Inactive => self.policy.capacity_for(self.viewport),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Selected vehicles, earliest first. Empty while inactive.
    pub fn selection(&self) -> &[VehicleRecord] {
        match &self.state {
            CompareState::Active { selection, .. } => selection,
            CompareState::Inactive => &[],
        }
    }

    pub fn selected_ids(&self) -> Vec<VehicleId> {
        self.selection().iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.selection().len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection().is_empty()
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.selection().iter().any(|r| r.id == id)
    }

    /// Bumped whenever the selected membership changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start comparing with an empty selection sized for the current viewport.
    ///
    /// Entering while already active keeps the existing selection.
    pub fn enter_compare_mode(&mut self) {
        if self.is_active() {
            return;
        }
        let capacity = self.policy.capacity_for(self.viewport);
        tracing::debug!(capacity, "Entering compare mode");
        self.state = CompareState::Active {
            selection: Vec::new(),
            capacity,
        };
    }

    /// Leave compare mode, discarding the selection.
    pub fn exit_compare_mode(&mut self) {
        if !self.is_empty() {
            self.revision += 1;
        }
        self.state = CompareState::Inactive;
    }

    /// Append a vehicle unless it is already selected or the selection is full.
    pub fn add_car(&mut self, record: &VehicleRecord) -> AddOutcome {
        let CompareState::Active {
            selection,
            capacity,
        } = &mut self.state
        else {
            return AddOutcome::Inactive;
        };

        let outcome = if selection.iter().any(|r| r.id == record.id) {
            AddOutcome::Duplicate
        } else if selection.len() >= *capacity {
            AddOutcome::AtCapacity
        } else {
            selection.push(record.clone());
            AddOutcome::Added
        };

        if outcome.is_added() {
            self.revision += 1;
        } else {
            tracing::debug!(id = record.id, ?outcome, "Compare add declined");
        }
        outcome
    }

    /// Remove a vehicle by id. Returns whether anything was removed.
    pub fn remove_car(&mut self, id: VehicleId) -> bool {
        let CompareState::Active { selection, .. } = &mut self.state else {
            return false;
        };
        let before = selection.len();
        selection.retain(|r| r.id != id);
        let removed = selection.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Empty the selection without leaving compare mode.
    pub fn clear_selection(&mut self) {
        if let CompareState::Active { selection, .. } = &mut self.state {
            if !selection.is_empty() {
                selection.clear();
                self.revision += 1;
            }
        }
    }

    /// Recompute capacity for a new viewport.
    ///
    /// When capacity shrinks below the selection size the most recently
    /// added vehicles are dropped. Returns the dropped ids.
    pub fn on_viewport_change(&mut self, viewport: Viewport) -> Vec<VehicleId> {
        self.viewport = viewport;
        let new_capacity = self.policy.capacity_for(viewport);

        let CompareState::Active {
            selection,
            capacity,
        } = &mut self.state
        else {
            return Vec::new();
        };

        *capacity = new_capacity;
        if selection.len() <= new_capacity {
            return Vec::new();
        }

        let dropped: Vec<VehicleId> = selection.drain(new_capacity..).map(|r| r.id).collect();
        self.revision += 1;
        tracing::info!(
            capacity = new_capacity,
            dropped = ?dropped,
            "Viewport shrank, truncated compare selection"
        );
        dropped
    }

    pub fn can_open_comparison(&self) -> bool {
        self.len() >= MIN_COMPARE
    }

    /// Ids to resolve for the comparison, or `None` when the gate is closed.
    pub fn open_comparison(&self) -> Option<Vec<VehicleId>> {
        self.can_open_comparison().then(|| self.selected_ids())
    }

    /// Apply one event. This is the single entry point for queued user events.
    pub fn handle(&mut self, event: CompareEvent) -> CompareOutcome {
        match event {
            CompareEvent::EnterCompareMode => {
                self.enter_compare_mode();
                CompareOutcome::Mode { active: true }
            }
            CompareEvent::ExitCompareMode => {
                self.exit_compare_mode();
                CompareOutcome::Mode { active: false }
            }
            CompareEvent::AddCar(record) => CompareOutcome::Add(self.add_car(&record)),
            CompareEvent::RemoveCar(id) => CompareOutcome::Removed(self.remove_car(id)),
            CompareEvent::ClearSelection => {
                self.clear_selection();
                CompareOutcome::Cleared
            }
            CompareEvent::ViewportChanged(viewport) => {
                let dropped = self.on_viewport_change(viewport);
                CompareOutcome::Resized {
                    capacity: self.capacity(),
                    dropped,
                }
            }
            CompareEvent::OpenComparison => CompareOutcome::Open(self.open_comparison()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DESKTOP: Viewport = Viewport {
        width: 1440,
        height: 900,
    };
    const PHONE: Viewport = Viewport {
        width: 390,
        height: 844,
    };

    fn car(id: VehicleId) -> VehicleRecord {
        VehicleRecord {
            id,
            make_name: "Make".into(),
            model: format!("Model {id}"),
            ..Default::default()
        }
    }

    fn active_desktop() -> CompareSelection {
        let mut selection = CompareSelection::new(CapacityPolicy::default(), DESKTOP);
        selection.enter_compare_mode();
        selection
    }

    #[test]
    fn test_starts_inactive_and_declines_adds() {
        let mut selection = CompareSelection::new(CapacityPolicy::default(), DESKTOP);
        assert!(!selection.is_active());
        assert_eq!(selection.add_car(&car(1)), AddOutcome::Inactive);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_enter_sets_capacity_from_viewport() {
        let mut selection = CompareSelection::new(CapacityPolicy::default(), PHONE);
        selection.enter_compare_mode();
        assert!(selection.is_active());
        assert_eq!(selection.capacity(), 2);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_add_until_capacity() {
        let mut selection = active_desktop();
        assert_eq!(selection.add_car(&car(1)), AddOutcome::Added);
        assert_eq!(selection.add_car(&car(2)), AddOutcome::Added);
        assert_eq!(selection.add_car(&car(3)), AddOutcome::Added);
        assert_eq!(selection.add_car(&car(4)), AddOutcome::AtCapacity);
        assert_eq!(selection.selected_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_add_is_declined() {
        let mut selection = active_desktop();
        selection.add_car(&car(7));
        let revision = selection.revision();
        assert_eq!(selection.add_car(&car(7)), AddOutcome::Duplicate);
        assert_eq!(selection.selected_ids(), vec![7]);
        assert_eq!(selection.revision(), revision);
    }

    #[test]
    fn test_remove_member_and_non_member() {
        let mut selection = active_desktop();
        selection.add_car(&car(1));
        selection.add_car(&car(2));
        assert!(selection.remove_car(1));
        assert!(!selection.remove_car(99));
        assert_eq!(selection.selected_ids(), vec![2]);
    }

    #[test]
    fn test_clear_keeps_mode() {
        let mut selection = active_desktop();
        selection.add_car(&car(1));
        selection.clear_selection();
        assert!(selection.is_active());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_exit_discards_selection() {
        let mut selection = active_desktop();
        selection.add_car(&car(1));
        selection.add_car(&car(2));
        selection.exit_compare_mode();
        assert!(!selection.is_active());
        assert!(selection.is_empty());

        selection.enter_compare_mode();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_reenter_while_active_keeps_selection() {
        let mut selection = active_desktop();
        selection.add_car(&car(1));
        selection.enter_compare_mode();
        assert_eq!(selection.selected_ids(), vec![1]);
    }

    #[test]
    fn test_shrinking_viewport_keeps_earliest() {
        let mut selection = active_desktop();
        selection.add_car(&car(10));
        selection.add_car(&car(20));
        selection.add_car(&car(30));

        let dropped = selection.on_viewport_change(PHONE);
        assert_eq!(dropped, vec![30]);
        assert_eq!(selection.capacity(), 2);
        assert_eq!(selection.selected_ids(), vec![10, 20]);
    }

    #[test]
    fn test_growing_viewport_keeps_everything() {
        let mut selection = CompareSelection::new(CapacityPolicy::default(), PHONE);
        selection.enter_compare_mode();
        selection.add_car(&car(1));
        selection.add_car(&car(2));
        assert!(selection.on_viewport_change(DESKTOP).is_empty());
        assert_eq!(selection.capacity(), 3);
        assert_eq!(selection.add_car(&car(3)), AddOutcome::Added);
    }

    #[test]
    fn test_viewport_change_while_inactive_is_remembered() {
        let mut selection = CompareSelection::new(CapacityPolicy::default(), DESKTOP);
        selection.on_viewport_change(PHONE);
        selection.enter_compare_mode();
        assert_eq!(selection.capacity(), 2);
    }

    #[test]
    fn test_open_gate_needs_two() {
        let mut selection = active_desktop();
        assert_eq!(selection.open_comparison(), None);
        selection.add_car(&car(1));
        assert!(!selection.can_open_comparison());
        selection.add_car(&car(2));
        assert_eq!(selection.open_comparison(), Some(vec![1, 2]));
    }

    #[test]
    fn test_revision_tracks_membership_changes() {
        let mut selection = active_desktop();
        let start = selection.revision();
        selection.add_car(&car(1));
        selection.remove_car(42);
        selection.clear_selection();
        selection.clear_selection();
        assert_eq!(selection.revision(), start + 2);
    }

    #[test]
    fn test_event_queue_in_arrival_order() {
        let mut selection = CompareSelection::new(CapacityPolicy::default(), DESKTOP);
        let outcomes: Vec<CompareOutcome> = vec![
            CompareEvent::EnterCompareMode,
            CompareEvent::AddCar(car(1)),
            CompareEvent::AddCar(car(1)),
            CompareEvent::AddCar(car(2)),
            CompareEvent::AddCar(car(3)),
            CompareEvent::ViewportChanged(PHONE),
            CompareEvent::RemoveCar(3),
            CompareEvent::OpenComparison,
        ]
        .into_iter()
        .map(|event| selection.handle(event))
        .collect();

        assert_eq!(
            outcomes,
            vec![
                CompareOutcome::Mode { active: true },
                CompareOutcome::Add(AddOutcome::Added),
                CompareOutcome::Add(AddOutcome::Duplicate),
                CompareOutcome::Add(AddOutcome::Added),
                CompareOutcome::Add(AddOutcome::Added),
                CompareOutcome::Resized {
                    capacity: 2,
                    dropped: vec![3],
                },
                CompareOutcome::Removed(false),
                CompareOutcome::Open(Some(vec![1, 2])),
            ]
        );
    }
}
