//! State for the lists aggregate.

use crate::lists::actions::ListsAction;
use listkeeper_client::{List, ListId};
use std::collections::{HashMap, HashSet, VecDeque};

/// State of the lists aggregate
///
/// Holds every list the container has fetched, regardless of owner; tenant
/// filtering is the view's job. `in_flight` counts outstanding remote
/// operations, `busy`/`queued` serialize mutations per list so two
/// read-modify-writes never race against the same document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListsState {
    /// All fetched lists, unique by id
    pub lists: Vec<List>,
    /// Number of remote operations currently running
    pub in_flight: usize,
    /// Message of the most recent failure, cleared by `ClearError`
    pub error: Option<String>,
    /// Lists with a mutation currently in flight
    pub busy: HashSet<ListId>,
    /// Mutations waiting for their list to become free, in arrival order
    pub queued: HashMap<ListId, VecDeque<ListsAction>>,
}

impl ListsState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any remote operation is running
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Look up a list by id
    #[must_use]
    pub fn list(&self, list_id: &ListId) -> Option<&List> {
        self.lists.iter().find(|list| &list.id == list_id)
    }

    /// Replace the list with the same id, or append
    ///
    /// Applying the same document twice leaves a single copy (idempotent).
    pub fn upsert(&mut self, list: List) {
        if let Some(existing) = self.lists.iter_mut().find(|l| l.id == list.id) {
            *existing = list;
        } else {
            self.lists.push(list);
        }
    }

    /// Remove the list with `list_id`
    ///
    /// Returns false when the id is unknown (tolerated no-op).
    pub fn remove(&mut self, list_id: &ListId) -> bool {
        let before = self.lists.len();
        self.lists.retain(|list| &list.id != list_id);
        self.lists.len() != before
    }

    /// Whether a mutation against `list_id` is currently in flight
    #[must_use]
    pub fn is_busy(&self, list_id: &ListId) -> bool {
        self.busy.contains(list_id)
    }

    /// Queue a mutation behind the one in flight for its list
    pub fn queue(&mut self, list_id: ListId, command: ListsAction) {
        self.queued.entry(list_id).or_default().push_back(command);
    }

    /// Take the next queued mutation for `list_id`, if any
    pub fn pop_queued(&mut self, list_id: &ListId) -> Option<ListsAction> {
        let queue = self.queued.get_mut(list_id)?;
        let next = queue.pop_front();
        if queue.is_empty() {
            self.queued.remove(list_id);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listkeeper_client::UserId;

    fn list(id: &str) -> List {
        List {
            id: ListId::from(id),
            name: format!("List {id}"),
            items: 0,
            date: "5/1/2024".to_string(),
            user_id: UserId::from("u1"),
            grocery_items: Vec::new(),
        }
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut state = ListsState::new();
        state.upsert(list("L1"));
        state.upsert(list("L2"));

        let mut renamed = list("L1");
        renamed.name = "Renamed".to_string();
        state.upsert(renamed);

        assert_eq!(state.lists.len(), 2);
        assert_eq!(state.list(&ListId::from("L1")).map(|l| l.name.as_str()), Some("Renamed"));
    }

    #[test]
    fn upsert_is_idempotent() {
        let mut state = ListsState::new();
        state.upsert(list("L1"));
        state.upsert(list("L1"));
        assert_eq!(state.lists.len(), 1);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut state = ListsState::new();
        state.upsert(list("L1"));

        assert!(!state.remove(&ListId::from("nope")));
        assert_eq!(state.lists.len(), 1);
        assert!(state.remove(&ListId::from("L1")));
        assert!(state.lists.is_empty());
    }

    #[test]
    fn queue_preserves_arrival_order() {
        let mut state = ListsState::new();
        let id = ListId::from("L1");
        state.queue(id.clone(), ListsAction::DeleteItem {
            list_id: id.clone(),
            item_id: "i1".into(),
        });
        state.queue(id.clone(), ListsAction::DeleteItem {
            list_id: id.clone(),
            item_id: "i2".into(),
        });

        let first = state.pop_queued(&id);
        assert!(matches!(
            first,
            Some(ListsAction::DeleteItem { item_id, .. }) if item_id == "i1".into()
        ));
        let second = state.pop_queued(&id);
        assert!(matches!(
            second,
            Some(ListsAction::DeleteItem { item_id, .. }) if item_id == "i2".into()
        ));
        assert!(state.pop_queued(&id).is_none());
        assert!(state.queued.is_empty());
    }

    #[test]
    fn loading_derives_from_in_flight() {
        let mut state = ListsState::new();
        assert!(!state.loading());
        state.in_flight = 2;
        assert!(state.loading());
    }
}
