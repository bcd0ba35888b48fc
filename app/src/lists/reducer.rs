//! Reducer logic for the lists aggregate.
//!
//! Commands validate, bump the in-flight counter, and return one Future
//! effect each; events apply completions to state. List-scoped mutations
//! are serialized per list: while one is in flight, later ones queue in
//! state and replay when the running one completes, so two read-modify-
//! writes never race against the same document.

use crate::lists::actions::ListsAction;
use crate::lists::environment::ListsEnvironment;
use crate::lists::state::ListsState;
use listkeeper_client::{ListId, NewList};
use listkeeper_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Display format for list creation dates, e.g. `5/1/2024`
const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Reducer for the lists aggregate
#[derive(Clone, Debug, Default)]
pub struct ListsReducer;

impl ListsReducer {
    /// Creates a new `ListsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Launch a list-scoped mutation, or queue it behind the running one
    fn start_or_queue(
        &self,
        state: &mut ListsState,
        command: ListsAction,
        env: &ListsEnvironment,
    ) -> SmallVec<[Effect<ListsAction>; 4]> {
        let Some(list_id) = command.mutated_list().cloned() else {
            return SmallVec::new();
        };

        if state.is_busy(&list_id) {
            tracing::debug!(list_id = %list_id, "list busy, queueing mutation");
            state.queue(list_id, command);
            return SmallVec::new();
        }

        state.busy.insert(list_id.clone());
        state.in_flight += 1;

        let effect = match command {
            ListsAction::DeleteList { list_id } => env.delete_list(list_id),
            ListsAction::AddItem { list_id, draft } => env.add_item(list_id, draft),
            ListsAction::UpdateItem {
                list_id,
                item_id,
                patch,
            } => env.update_item(list_id, item_id, patch),
            ListsAction::DeleteItem { list_id, item_id } => env.delete_item(list_id, item_id),
            ListsAction::ToggleItem { list_id, item_id } => env.toggle_item(list_id, item_id),
            _ => Effect::None,
        };

        smallvec![effect]
    }

    /// Complete a list-scoped mutation and replay the next queued one
    fn finish_mutation(
        &self,
        state: &mut ListsState,
        list_id: &ListId,
        env: &ListsEnvironment,
    ) -> SmallVec<[Effect<ListsAction>; 4]> {
        if !state.busy.remove(list_id) {
            return SmallVec::new();
        }

        let Some(next) = state.pop_queued(list_id) else {
            return SmallVec::new();
        };

        tracing::debug!(list_id = %list_id, "replaying queued mutation");
        self.reduce(state, next, env)
    }
}

impl Reducer for ListsReducer {
    type State = ListsState;
    type Action = ListsAction;
    type Environment = ListsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            ListsAction::FetchLists { user_id } => {
                state.in_flight += 1;
                smallvec![env.fetch_lists(user_id)]
            },

            ListsAction::CreateList { name, user_id } => {
                let date = env.clock.now().format(DATE_FORMAT).to_string();
                match NewList::new(name, user_id, date) {
                    Ok(new_list) => {
                        state.in_flight += 1;
                        smallvec![env.create_list(new_list)]
                    },
                    Err(error) => {
                        state.error = Some(error.to_string());
                        SmallVec::new()
                    },
                }
            },

            ListsAction::FetchList { list_id } => {
                state.in_flight += 1;
                smallvec![env.fetch_list(list_id)]
            },

            command @ (ListsAction::DeleteList { .. }
            | ListsAction::AddItem { .. }
            | ListsAction::UpdateItem { .. }
            | ListsAction::DeleteItem { .. }
            | ListsAction::ToggleItem { .. }) => self.start_or_queue(state, command, env),

            // ========== Events ==========
            ListsAction::ListsLoaded { lists } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.lists = lists;
                SmallVec::new()
            },

            ListsAction::ListUpserted { list } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                let list_id = list.id.clone();
                state.upsert(list);
                self.finish_mutation(state, &list_id, env)
            },

            ListsAction::ListFetched { list } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.upsert(list);
                SmallVec::new()
            },

            ListsAction::ListRemoved { list_id } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.remove(&list_id);
                self.finish_mutation(state, &list_id, env)
            },

            ListsAction::ItemToggled { list_id, item_id } => {
                // Local flip; unknown ids are a tolerated no-op
                if let Some(list) = state.lists.iter_mut().find(|l| l.id == list_id) {
                    if let Some(item) = list.grocery_items.iter_mut().find(|i| i.id == item_id) {
                        item.completed = !item.completed;
                    }
                }
                SmallVec::new()
            },

            ListsAction::RequestFailed {
                context,
                list_id,
                message,
            } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                tracing::warn!(context, "recording failed operation");
                state.error = Some(message);
                match list_id {
                    Some(id) => self.finish_mutation(state, &id, env),
                    None => SmallVec::new(),
                }
            },

            ListsAction::ClearError => {
                state.error = None;
                SmallVec::new()
            },
        }
    }
}
