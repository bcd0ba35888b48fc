//! Actions for the lists aggregate.
//!
//! Commands express intent and produce effects; events are completions
//! produced by those effects (or local transitions) and only touch state.

use listkeeper_client::{ItemDraft, ItemId, ItemPatch, List, ListId, UserId};

/// Commands and events for the lists aggregate
#[derive(Clone, Debug, PartialEq)]
pub enum ListsAction {
    // ========== Commands ==========
    /// Command: Fetch every list owned by a user
    FetchLists {
        /// Owner to query for
        user_id: UserId,
    },

    /// Command: Create an empty list dated now
    CreateList {
        /// Display name, must not be blank
        name: String,
        /// Owning user
        user_id: UserId,
    },

    /// Command: Delete a list
    DeleteList {
        /// List to delete
        list_id: ListId,
    },

    /// Command: Re-fetch a single list document
    FetchList {
        /// List to fetch
        list_id: ListId,
    },

    /// Command: Append a drafted item to a list
    AddItem {
        /// Parent list
        list_id: ListId,
        /// Validated item draft; the id is minted by the environment
        draft: ItemDraft,
    },

    /// Command: Patch an existing item
    UpdateItem {
        /// Parent list
        list_id: ListId,
        /// Item to patch
        item_id: ItemId,
        /// Fields to change
        patch: ItemPatch,
    },

    /// Command: Remove an item from a list
    DeleteItem {
        /// Parent list
        list_id: ListId,
        /// Item to remove
        item_id: ItemId,
    },

    /// Command: Flip an item's completion flag remotely
    ///
    /// The flag flipped is the one read from the freshly fetched document,
    /// never the container's possibly stale copy.
    ToggleItem {
        /// Parent list
        list_id: ListId,
        /// Item to toggle
        item_id: ItemId,
    },

    // ========== Events ==========
    /// Event: A fetch of all lists completed
    ListsLoaded {
        /// Wholesale replacement for the container's lists
        lists: Vec<List>,
    },

    /// Event: A list document was created or rewritten by a mutation
    ListUpserted {
        /// The authoritative document returned by the store
        list: List,
    },

    /// Event: A single-list fetch completed
    ///
    /// Upserts like [`Self::ListUpserted`] but is not a mutation
    /// completion: a fetch never holds a busy marker, so its completion
    /// must not release one held by an in-flight mutation on the same
    /// list.
    ListFetched {
        /// The fetched document
        list: List,
    },

    /// Event: A list was deleted remotely
    ListRemoved {
        /// Id of the removed list
        list_id: ListId,
    },

    /// Event: Flip an item's completion flag locally
    ///
    /// Silent no-op when either id is unknown.
    ItemToggled {
        /// Parent list
        list_id: ListId,
        /// Toggled item
        item_id: ItemId,
    },

    /// Event: A remote operation failed
    RequestFailed {
        /// Operation that failed, for logs
        context: &'static str,
        /// List the operation targeted, when list-scoped
        list_id: Option<ListId>,
        /// Human-readable failure message
        message: String,
    },

    /// Event: Dismiss the current error
    ClearError,
}

impl ListsAction {
    /// The list a mutation command targets, if it is list-scoped
    ///
    /// Only these commands participate in per-list serialization;
    /// `FetchLists` and `CreateList` target no existing document and
    /// `FetchList` does not write.
    #[must_use]
    pub const fn mutated_list(&self) -> Option<&ListId> {
        match self {
            Self::DeleteList { list_id }
            | Self::AddItem { list_id, .. }
            | Self::UpdateItem { list_id, .. }
            | Self::DeleteItem { list_id, .. }
            | Self::ToggleItem { list_id, .. } => Some(list_id),
            _ => None,
        }
    }
}
