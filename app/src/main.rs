//! End-to-end demo against the in-memory collection store.
//!
//! Registers a user, logs in, creates a list, mutates its items, and shows
//! the session surviving a simulated restart.

use anyhow::Context;
use listkeeper::{
    restore_session, AuthAction, AuthEnvironment, AuthReducer, AuthState, ListsAction,
    ListsEnvironment, ListsReducer, ListsState, MemorySessionStore, RegisterAction,
    RegisterEnvironment, RegisterReducer, RegisterState, SessionPersistence, SessionStore,
};
use listkeeper_client::{CollectionStore, ItemDraft, MemoryCollectionStore, NewUser};
use listkeeper_core::environment::{SystemClock, UuidIdGenerator};
use listkeeper_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Listkeeper Demo ===\n");

    let collection: Arc<dyn CollectionStore> = Arc::new(MemoryCollectionStore::new());
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    // Register an account
    let register_store = Store::new(
        RegisterState::new(),
        RegisterReducer::new(),
        RegisterEnvironment::new(Arc::clone(&collection)),
    );
    register_store
        .send_and_wait_for(
            RegisterAction::Register {
                details: NewUser {
                    name: "Ada".to_string(),
                    surname: "Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    password: "secret".to_string(),
                    cellphone: "555-0100".to_string(),
                },
            },
            |a| {
                matches!(
                    a,
                    RegisterAction::Registered { .. } | RegisterAction::RegisterFailed { .. }
                )
            },
            WAIT,
        )
        .await?;
    println!("Registered ada@example.com");

    // Log in, with the session persistence adapter attached
    let auth_store = Store::new(
        AuthState::new(),
        AuthReducer::new(),
        AuthEnvironment::new(Arc::clone(&collection)),
    );
    let persistence = SessionPersistence::attach(&auth_store, Arc::clone(&session));

    auth_store
        .send_and_wait_for(
            AuthAction::Login {
                email: "ada@example.com".to_string(),
                password: "secret".to_string(),
            },
            |a| matches!(a, AuthAction::LoggedIn { .. } | AuthAction::LoginFailed { .. }),
            WAIT,
        )
        .await?;

    let user = auth_store
        .state(|s| s.user.clone())
        .await
        .context("login did not authenticate")?;
    println!("Logged in as {} {}", user.name, user.surname);

    // Work with lists
    let lists_store = Store::new(
        ListsState::new(),
        ListsReducer::new(),
        ListsEnvironment::new(
            Arc::clone(&collection),
            Arc::new(SystemClock),
            Arc::new(UuidIdGenerator),
        ),
    );

    let created = lists_store
        .send_and_wait_for(
            ListsAction::CreateList {
                name: "Weekly shop".to_string(),
                user_id: user.id.clone(),
            },
            |a| {
                matches!(
                    a,
                    ListsAction::ListUpserted { .. } | ListsAction::RequestFailed { .. }
                )
            },
            WAIT,
        )
        .await?;
    let ListsAction::ListUpserted { list } = created else {
        anyhow::bail!("list creation failed");
    };
    println!("Created list '{}' ({})", list.name, list.date);

    for (name, quantity) in [("Milk", 2), ("Bread", 1), ("Apples", 6)] {
        let draft = ItemDraft::new(name, quantity)?;
        lists_store
            .send_and_wait_for(
                ListsAction::AddItem {
                    list_id: list.id.clone(),
                    draft,
                },
                |a| {
                    matches!(
                        a,
                        ListsAction::ListUpserted { .. } | ListsAction::RequestFailed { .. }
                    )
                },
                WAIT,
            )
            .await?;
    }

    lists_store
        .send_and_wait_for(
            ListsAction::FetchLists {
                user_id: user.id.clone(),
            },
            |a| {
                matches!(
                    a,
                    ListsAction::ListsLoaded { .. } | ListsAction::RequestFailed { .. }
                )
            },
            WAIT,
        )
        .await?;

    let lists = lists_store.state(|s| s.lists.clone()).await;
    for list in &lists {
        println!("\n{} ({} items):", list.name, list.items);
        for item in &list.grocery_items {
            let status = if item.completed { "x" } else { " " };
            println!("  [{status}] {} x{} ({})", item.name, item.quantity, item.category);
        }
    }

    // Simulated restart: the session store still holds the user
    let restored = restore_session(session.as_ref()).await?;
    match restored {
        Some(action) => {
            let fresh_auth = Store::new(
                AuthState::new(),
                AuthReducer::new(),
                AuthEnvironment::new(Arc::clone(&collection)),
            );
            fresh_auth.send(action).await?;
            let restored_user = fresh_auth.state(|s| s.user.clone()).await;
            println!(
                "\nAfter restart, session restored for {}",
                restored_user.map_or_else(|| "<nobody>".to_string(), |u| u.email)
            );
        },
        None => println!("\nNo session to restore"),
    }

    // Log out and shut down
    let mut handle = auth_store.send(AuthAction::Logout).await?;
    handle.wait_with_timeout(WAIT).await?;

    auth_store.shutdown(WAIT).await?;
    lists_store.shutdown(WAIT).await?;
    register_store.shutdown(WAIT).await?;
    persistence.abort();

    println!("\n=== Demo Complete ===");
    Ok(())
}
