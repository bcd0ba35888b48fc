//! Environment dependencies and effect builders for the lists aggregate.

use crate::lists::actions::ListsAction;
use listkeeper_client::{
    ClientError, CollectionStore, ItemDraft, ItemId, ItemPatch, List, ListId, NewList, UserId,
};
use listkeeper_core::async_effect;
use listkeeper_core::effect::Effect;
use listkeeper_core::environment::{Clock, IdGenerator};
use std::sync::Arc;

/// Environment dependencies for the lists reducer
///
/// The collection store performs the remote protocol, the clock stamps
/// creation dates, and the id generator mints item ids on the client side
/// before the read-modify-write round trip.
#[derive(Clone)]
pub struct ListsEnvironment {
    /// Remote collection store
    pub store: Arc<dyn CollectionStore>,
    /// Clock for creation dates
    pub clock: Arc<dyn Clock>,
    /// Generator for item ids
    pub ids: Arc<dyn IdGenerator>,
}

impl ListsEnvironment {
    /// Creates a new `ListsEnvironment`
    #[must_use]
    pub fn new(
        store: Arc<dyn CollectionStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { store, clock, ids }
    }

    /// Fetch all lists owned by `user_id`
    pub(crate) fn fetch_lists(&self, user_id: UserId) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            Some(match store.lists_for_user(&user_id).await {
                Ok(lists) => ListsAction::ListsLoaded { lists },
                Err(e) => failure("fetch_lists", None, &e),
            })
        }
    }

    /// Create a list; the store assigns the id
    pub(crate) fn create_list(&self, new_list: NewList) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            Some(match store.create_list(new_list).await {
                Ok(list) => ListsAction::ListUpserted { list },
                Err(e) => failure("create_list", None, &e),
            })
        }
    }

    /// Delete a list remotely
    pub(crate) fn delete_list(&self, list_id: ListId) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            Some(match store.delete_list(&list_id).await {
                Ok(()) => ListsAction::ListRemoved { list_id },
                Err(e) => failure("delete_list", Some(list_id), &e),
            })
        }
    }

    /// Re-fetch a single list document
    ///
    /// Completes with `ListFetched`, never `ListUpserted`: a fetch holds
    /// no busy marker, and its failure carries no list id for the same
    /// reason.
    pub(crate) fn fetch_list(&self, list_id: ListId) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            Some(match store.list(&list_id).await {
                Ok(list) => ListsAction::ListFetched { list },
                Err(e) => failure("fetch_list", None, &e),
            })
        }
    }

    /// Append `draft` to a list via read-modify-write
    ///
    /// The item id is minted here, before the round trip, so the effect is
    /// deterministic under a seeded generator.
    pub(crate) fn add_item(&self, list_id: ListId, draft: ItemDraft) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        let item_id = ItemId::new(self.ids.generate());
        async_effect! {
            let result = async {
                let mut list = store.list(&list_id).await?;
                list.push_item(draft.into_item(item_id, list_id.clone()));
                store.replace_list(list).await
            }
            .await;

            Some(completion("add_item", list_id, result))
        }
    }

    /// Patch an item via read-modify-write
    ///
    /// An item id unknown in the fetched document leaves it unchanged; the
    /// write-back still happens and the container converges on the result.
    pub(crate) fn update_item(
        &self,
        list_id: ListId,
        item_id: ItemId,
        patch: ItemPatch,
    ) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            let result = async {
                let mut list = store.list(&list_id).await?;
                list.patch_item(&item_id, &patch);
                store.replace_list(list).await
            }
            .await;

            Some(completion("update_item", list_id, result))
        }
    }

    /// Remove an item via read-modify-write
    pub(crate) fn delete_item(&self, list_id: ListId, item_id: ItemId) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            let result = async {
                let mut list = store.list(&list_id).await?;
                list.remove_item(&item_id);
                store.replace_list(list).await
            }
            .await;

            Some(completion("delete_item", list_id, result))
        }
    }

    /// Flip an item's completion flag via read-modify-write
    ///
    /// The flag flipped is the one in the freshly fetched document, never
    /// the container's copy.
    pub(crate) fn toggle_item(&self, list_id: ListId, item_id: ItemId) -> Effect<ListsAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            let result = async {
                let mut list = store.list(&list_id).await?;
                if let Some(current) = list.item(&item_id).map(|item| item.completed) {
                    list.patch_item(&item_id, &ItemPatch::completion(!current));
                }
                store.replace_list(list).await
            }
            .await;

            Some(completion("toggle_item", list_id, result))
        }
    }
}

fn failure(context: &'static str, list_id: Option<ListId>, error: &ClientError) -> ListsAction {
    tracing::warn!(context, error = %error, "remote operation failed");
    ListsAction::RequestFailed {
        context,
        list_id,
        message: error.to_string(),
    }
}

fn completion(
    context: &'static str,
    list_id: ListId,
    result: Result<List, ClientError>,
) -> ListsAction {
    match result {
        Ok(list) => ListsAction::ListUpserted { list },
        Err(e) => failure(context, Some(list_id), &e),
    }
}
