//! Wire and domain types for the collection store
//!
//! Field names follow the remote store's JSON shape exactly (`userId`,
//! `groceryItems`, `listId`), so these types serialize to the documents the
//! backend holds without any mapping layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category assigned to a grocery item created without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Validation failures caught before any intent is dispatched
///
/// These never reach the synchronization layer: typed constructors reject
/// bad input at the view boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// List name is empty after trimming
    #[error("List name cannot be empty")]
    EmptyListName,

    /// Item name is empty after trimming
    #[error("Item name cannot be empty")]
    BlankItemName,

    /// Item quantity must be at least 1
    #[error("Item quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw id string
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw id string
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id! {
    /// Unique identifier for a user document
    UserId
}

string_id! {
    /// Unique identifier for a list document
    ListId
}

string_id! {
    /// Unique identifier for a grocery item within a list
    ItemId
}

/// A registered user
///
/// The password field is stored and compared in plaintext against the mock
/// collection store - preserved prototype behavior, not a design to emulate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (server-assigned)
    pub id: UserId,
    /// First name
    pub name: String,
    /// Surname
    pub surname: String,
    /// Email address (login key)
    pub email: String,
    /// Plaintext password
    pub password: String,
    /// Contact number
    pub cellphone: String,
}

/// Payload for registering a new user (`POST /users`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// First name
    pub name: String,
    /// Surname
    pub surname: String,
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
    /// Contact number
    pub cellphone: String,
}

/// Partial user update (`PATCH /users/{id}`)
///
/// Absent fields are omitted from the request body and left untouched by
/// the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    /// New first name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New surname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New contact number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cellphone: Option<String>,
}

impl UserPatch {
    /// Apply this patch to a user document in place
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(surname) = &self.surname {
            user.surname.clone_from(surname);
        }
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
        if let Some(password) = &self.password {
            user.password.clone_from(password);
        }
        if let Some(cellphone) = &self.cellphone {
            user.cellphone.clone_from(cellphone);
        }
    }
}

/// A single purchasable entry within a list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Unique identifier within the parent list (client-minted)
    pub id: ItemId,
    /// Item name
    pub name: String,
    /// Quantity to purchase (at least 1)
    pub quantity: u32,
    /// Category for grouping; defaults to [`DEFAULT_CATEGORY`]
    pub category: String,
    /// Whether the item has been checked off
    pub completed: bool,
    /// Id of the owning list
    #[serde(rename = "listId")]
    pub list_id: ListId,
    /// Free-form note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Draft of a grocery item as entered in the view layer
///
/// Validated at construction; turned into a [`GroceryItem`] by the
/// synchronization layer once an id has been minted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDraft {
    name: String,
    quantity: u32,
    category: Option<String>,
    notes: Option<String>,
    image: Option<String>,
}

impl ItemDraft {
    /// Create a draft, rejecting blank names and zero quantities
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankItemName`] or
    /// [`ValidationError::InvalidQuantity`].
    pub fn new(name: impl Into<String>, quantity: u32) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::BlankItemName);
        }
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity(quantity));
        }

        Ok(Self {
            name,
            quantity,
            category: None,
            notes: None,
            image: None,
        })
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the note
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the image reference
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Materialize the draft as an item owned by `list_id`
    ///
    /// The category defaults to [`DEFAULT_CATEGORY`] when omitted and
    /// `completed` always starts false.
    #[must_use]
    pub fn into_item(self, id: ItemId, list_id: ListId) -> GroceryItem {
        GroceryItem {
            id,
            name: self.name,
            quantity: self.quantity,
            category: self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            completed: false,
            list_id,
            notes: self.notes,
            image: self.image,
        }
    }
}

/// Partial update of a grocery item
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// New name
    pub name: Option<String>,
    /// New quantity
    pub quantity: Option<u32>,
    /// New category
    pub category: Option<String>,
    /// New completion flag
    pub completed: Option<bool>,
    /// New note
    pub notes: Option<String>,
    /// New image reference
    pub image: Option<String>,
}

impl ItemPatch {
    /// Patch that only flips the completion flag
    #[must_use]
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Apply this patch to an item in place
    pub fn apply_to(&self, item: &mut GroceryItem) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(category) = &self.category {
            item.category.clone_from(category);
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
        if let Some(notes) = &self.notes {
            item.notes = Some(notes.clone());
        }
        if let Some(image) = &self.image {
            item.image = Some(image.clone());
        }
    }
}

/// A named, user-owned collection of grocery items
///
/// `items` is a denormalized count that must equal `grocery_items.len()`
/// after every committed mutation. All mutation helpers on this type
/// recount, so going through them keeps the invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Unique identifier (server-assigned)
    pub id: ListId,
    /// Display name
    pub name: String,
    /// Denormalized item count
    pub items: usize,
    /// Creation date as a locale-style date string
    pub date: String,
    /// Owning user
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Embedded item documents
    #[serde(rename = "groceryItems", default)]
    pub grocery_items: Vec<GroceryItem>,
}

impl List {
    /// Recompute the denormalized `items` count
    pub fn recount(&mut self) {
        self.items = self.grocery_items.len();
    }

    /// Look up an item by id
    #[must_use]
    pub fn item(&self, item_id: &ItemId) -> Option<&GroceryItem> {
        self.grocery_items.iter().find(|item| &item.id == item_id)
    }

    /// Append an item and recount
    pub fn push_item(&mut self, item: GroceryItem) {
        self.grocery_items.push(item);
        self.recount();
    }

    /// Apply a patch to the item with `item_id` and recount
    ///
    /// Returns false (leaving the list untouched) when the id is unknown.
    pub fn patch_item(&mut self, item_id: &ItemId, patch: &ItemPatch) -> bool {
        let Some(item) = self
            .grocery_items
            .iter_mut()
            .find(|item| &item.id == item_id)
        else {
            return false;
        };
        patch.apply_to(item);
        self.recount();
        true
    }

    /// Remove the item with `item_id` and recount
    ///
    /// Returns false when the id is unknown.
    pub fn remove_item(&mut self, item_id: &ItemId) -> bool {
        let before = self.grocery_items.len();
        self.grocery_items.retain(|item| &item.id != item_id);
        self.recount();
        self.grocery_items.len() != before
    }
}

/// Payload for creating a list (`POST /lists`, server assigns the id)
///
/// Serializes to the full list document minus `id`: zero items, empty
/// embedded collection, creation date stamped by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewList {
    /// Display name
    pub name: String,
    /// Denormalized item count (always 0 at creation)
    pub items: usize,
    /// Creation date as a locale-style date string
    pub date: String,
    /// Owning user
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Embedded item documents (always empty at creation)
    #[serde(rename = "groceryItems")]
    pub grocery_items: Vec<GroceryItem>,
}

impl NewList {
    /// Create a payload, rejecting empty names
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyListName`] if `name` is blank.
    pub fn new(
        name: impl Into<String>,
        user_id: UserId,
        date: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyListName);
        }

        Ok(Self {
            name,
            items: 0,
            date: date.into(),
            user_id,
            grocery_items: Vec::new(),
        })
    }

    /// Promote the payload to a full document with a server-assigned id
    #[must_use]
    pub fn into_list(self, id: ListId) -> List {
        List {
            id,
            name: self.name,
            items: self.items,
            date: self.date,
            user_id: self.user_id,
            grocery_items: self.grocery_items,
        }
    }
}
