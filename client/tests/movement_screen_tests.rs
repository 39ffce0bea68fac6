//! Movement screen tests
//!
//! The submission gate, reset-on-success versus preserve-on-failure, and
//! the cancellation semantics of the party loader.

use blend_vinos_client::api::ApiClient;
use blend_vinos_client::error::AppError;
use blend_vinos_client::screens::{MovementsScreen, PartyLoader};
use blend_vinos_client::session::SessionStore;
use shared::{MovementType, Party, Quantity};

fn offline_api() -> ApiClient {
    // Nothing in these tests may actually reach the network
    ApiClient::with_base_url("http://127.0.0.1:9", SessionStore::new())
}

fn party(id: i64, name: &str) -> Party {
    Party {
        id,
        name: Some(name.to_string()),
        ..Default::default()
    }
}

async fn mounted_screen() -> MovementsScreen {
    let parties = vec![party(1, "Ana"), party(2, "Beto")];
    let loader = PartyLoader::spawn_with(async move { Ok(parties) });
    let mut screen = MovementsScreen::with_loader(offline_api(), MovementType::Sale, loader);
    screen.parties_loaded().await;
    screen
}

// ============================================================================
// Party loader
// ============================================================================

#[tokio::test]
async fn test_cancelled_fetch_applies_nothing() {
    let loader = PartyLoader::spawn_with(std::future::pending());
    let mut screen = MovementsScreen::with_loader(offline_api(), MovementType::Purchase, loader);

    screen.unmount();
    screen.parties_loaded().await;

    assert!(screen.parties.is_empty());
    assert!(screen.error.is_none());
    // Nothing was applied, not even the loading flag
    assert!(screen.loading);
}

#[tokio::test]
async fn test_remount_populates_exactly_once() {
    // First instance is torn down before its fetch resolves
    let loader = PartyLoader::spawn_with(std::future::pending());
    let mut first = MovementsScreen::with_loader(offline_api(), MovementType::Purchase, loader);
    first.unmount();
    first.parties_loaded().await;
    drop(first);

    // The remounted instance loads normally
    let mut screen = mounted_screen().await;
    assert_eq!(screen.parties.len(), 2);
    assert!(!screen.loading);

    // Driving the loader again is a no-op
    screen.parties_loaded().await;
    assert_eq!(screen.parties.len(), 2);
}

#[tokio::test]
async fn test_fetch_failure_surfaces_message() {
    let loader = PartyLoader::spawn_with(async {
        Err(AppError::RequestFailed {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        })
    });
    let mut screen = MovementsScreen::with_loader(offline_api(), MovementType::Purchase, loader);
    screen.parties_loaded().await;

    let message = screen.error.clone().expect("load failure must surface");
    assert_eq!(message, "Request failed: 500 Internal Server Error - boom");
    assert!(!screen.loading);
    assert!(screen.parties.is_empty());
}

// ============================================================================
// Line-item editing through the screen
// ============================================================================

#[tokio::test]
async fn test_add_item_clears_input_and_messages() {
    let mut screen = mounted_screen().await;
    screen.success = Some("Movimiento creado correctamente".to_string());

    screen.set_code_input("MLB-01");
    screen.add_item();

    assert_eq!(screen.draft.items.len(), 1);
    assert!(screen.code_input.is_empty());
    assert!(screen.success.is_none());
    assert!(screen.error.is_none());
}

#[tokio::test]
async fn test_duplicate_add_keeps_list_and_sets_message() {
    let mut screen = mounted_screen().await;

    screen.set_code_input("ABC");
    screen.add_item();
    screen.set_code_input("abc");
    screen.add_item();

    assert_eq!(screen.draft.items.len(), 1);
    assert_eq!(
        screen.error.as_deref(),
        Some("Ese vino ya fue agregado a la lista")
    );
    // The input is cleared on the duplicate path too
    assert!(screen.code_input.is_empty());
}

#[tokio::test]
async fn test_blank_input_is_ignored_and_kept() {
    let mut screen = mounted_screen().await;
    screen.set_code_input("   ");
    screen.add_item();

    assert!(screen.draft.items.is_empty());
    assert_eq!(screen.code_input, "   ");
    assert!(screen.error.is_none());
}

// ============================================================================
// Submission gate
// ============================================================================

#[tokio::test]
async fn test_gate_requires_items_and_quantities() {
    let mut screen = mounted_screen().await;
    assert!(!screen.can_submit());

    screen.set_code_input("W1");
    screen.add_item();
    assert!(screen.can_submit());

    screen.update_quantity(0, "");
    assert!(!screen.can_submit());

    screen.update_quantity(0, "5");
    assert!(screen.can_submit());
    assert_eq!(screen.draft.items[0].quantity, Quantity::Count(5));
}

#[tokio::test]
async fn test_submit_is_a_noop_when_gate_is_closed() {
    let mut screen = mounted_screen().await;
    screen.submit().await;

    assert!(!screen.submitting);
    assert!(screen.error.is_none());
    assert!(screen.success.is_none());
}

#[tokio::test]
async fn test_submit_failure_preserves_draft() {
    // No token in the session, so the submit fails before the wire
    let mut screen = mounted_screen().await;
    screen.set_code_input("W1");
    screen.add_item();
    screen.set_comment("queda pendiente");
    screen.set_client(Some(1));

    screen.submit().await;

    assert_eq!(screen.error.as_deref(), Some("No authentication token"));
    assert!(screen.success.is_none());
    assert!(!screen.submitting);

    // Draft untouched for the retry
    assert_eq!(screen.draft.items.len(), 1);
    assert_eq!(screen.draft.comment, "queda pendiente");
    assert_eq!(screen.draft.client_id, Some(1));
}

#[tokio::test]
async fn test_success_resets_the_form() {
    let mut screen = mounted_screen().await;
    screen.set_code_input("W1");
    screen.add_item();
    screen.update_quantity(0, "2");
    screen.set_comment("entrega lunes");
    screen.set_client(Some(2));

    screen.apply_submit_outcome(Ok(()));

    assert_eq!(
        screen.success.as_deref(),
        Some("Movimiento creado correctamente")
    );
    assert!(screen.error.is_none());
    assert!(screen.draft.items.is_empty());
    assert!(screen.draft.comment.is_empty());
    assert_eq!(screen.draft.client_id, None);
    assert!(screen.code_input.is_empty());
    // The selected type survives for the next movement
    assert_eq!(screen.draft.movement_type, MovementType::Sale);
}

#[tokio::test]
async fn test_new_failure_replaces_previous_message() {
    let mut screen = mounted_screen().await;
    screen.set_code_input("W1");
    screen.add_item();

    screen.apply_submit_outcome(Err(AppError::RequestFailed {
        status: 500,
        status_text: "Internal Server Error".to_string(),
        body: "first".to_string(),
    }));
    let first = screen.error.clone().unwrap();

    screen.apply_submit_outcome(Err(AppError::RequestFailed {
        status: 422,
        status_text: "Unprocessable Entity".to_string(),
        body: "second".to_string(),
    }));
    let second = screen.error.clone().unwrap();

    assert_ne!(first, second);
    assert!(second.contains("422"));
    assert_eq!(screen.draft.items.len(), 1);
}
