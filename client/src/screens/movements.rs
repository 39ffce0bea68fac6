//! Movement-entry screen
//!
//! Builds a list of line items keyed by wine code, validates it, and flattens
//! it into one create-movement call. Draft mutations are synchronous; the
//! party fetch and the submit call are the only suspension points, and both
//! die with the screen: the loader task is aborted on unmount, and a submit
//! future dropped mid-await never touches state again.

use std::future::Future;

use shared::{AddOutcome, MovementDraft, MovementType, Party};
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};

/// One cancellable fetch of the party list, bound to a screen instance
pub struct PartyLoader {
    handle: Option<JoinHandle<AppResult<Vec<Party>>>>,
}

impl PartyLoader {
    /// Spawn the fetch against the collaborator API
    pub fn spawn(api: ApiClient) -> Self {
        Self::spawn_with(async move { api.list_users().await })
    }

    /// Spawn an arbitrary fetch future (tests substitute stubs here)
    pub fn spawn_with<F>(fut: F) -> Self
    where
        F: Future<Output = AppResult<Vec<Party>>> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(fut)),
        }
    }

    /// Signal the in-flight fetch to abort. Completion after this point is
    /// reported as a cancellation, never as data.
    pub fn cancel(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    /// Await the outcome. `None` means the fetch was cancelled: expected on
    /// teardown, nothing to apply.
    pub async fn finish(&mut self) -> Option<AppResult<Vec<Party>>> {
        let handle = self.handle.take()?;
        match handle.await {
            Ok(result) => Some(result),
            Err(join) if join.is_cancelled() => None,
            Err(join) => Some(Err(AppError::Internal(format!(
                "party fetch failed: {}",
                join
            )))),
        }
    }
}

impl Drop for PartyLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// State behind the movement-entry form
pub struct MovementsScreen {
    api: ApiClient,
    /// The draft under construction; discarded on success or navigation away
    pub draft: MovementDraft,
    /// The wine-code input field
    pub code_input: String,
    /// Parties available for client attribution; empty until loaded
    pub parties: Vec<Party>,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    loader: Option<PartyLoader>,
}

impl MovementsScreen {
    /// Mount the screen. `initial_type` comes from the calling screen's
    /// navigation state; the party fetch starts immediately.
    pub fn mount(api: ApiClient, initial_type: MovementType) -> Self {
        let loader = PartyLoader::spawn(api.clone());
        Self::with_loader(api, initial_type, loader)
    }

    /// Mount with a caller-provided loader (tests use this to stub the fetch)
    pub fn with_loader(api: ApiClient, initial_type: MovementType, loader: PartyLoader) -> Self {
        Self {
            api,
            draft: MovementDraft::new(initial_type),
            code_input: String::new(),
            parties: Vec::new(),
            loading: true,
            submitting: false,
            error: None,
            success: None,
            loader: Some(loader),
        }
    }

    /// Drive the pending party fetch to completion and apply the outcome.
    /// A cancelled fetch applies nothing; calling again is a no-op.
    pub async fn parties_loaded(&mut self) {
        let Some(mut loader) = self.loader.take() else {
            return;
        };
        match loader.finish().await {
            None => {}
            Some(Ok(parties)) => {
                self.parties = parties;
                self.loading = false;
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "party list load failed");
                self.error = Some(err.to_string());
                self.loading = false;
            }
        }
    }

    /// Tear the screen down, aborting any in-flight fetch
    pub fn unmount(&mut self) {
        if let Some(loader) = &mut self.loader {
            loader.cancel();
        }
    }

    /// Add the current code input as a line item.
    ///
    /// Empty input is ignored outright. Any other attempt clears the
    /// previous indicators; a duplicate code leaves the list alone and
    /// surfaces the rejection, and in both cases the input field is cleared
    /// for the next code.
    pub fn add_item(&mut self) {
        let outcome = self.draft.add_item(&self.code_input);
        if outcome == AddOutcome::EmptyInput {
            return;
        }

        self.error = None;
        self.success = None;
        if outcome == AddOutcome::Duplicate {
            self.error = Some(AppError::DuplicateItem.detail().message_es);
        }
        self.code_input.clear();
    }

    pub fn set_code_input(&mut self, value: &str) {
        self.code_input = value.to_string();
    }

    pub fn update_quantity(&mut self, index: usize, raw: &str) {
        self.draft.update_quantity(index, raw);
    }

    pub fn remove_item(&mut self, index: usize) {
        self.draft.remove_item(index);
    }

    pub fn set_movement_type(&mut self, movement_type: MovementType) {
        self.draft.movement_type = movement_type;
    }

    pub fn set_client(&mut self, client_id: Option<i64>) {
        self.draft.client_id = client_id;
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.draft.comment = comment.to_string();
    }

    /// The submit gate: one submission at a time, and only a complete draft
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.draft.is_complete()
    }

    /// Flatten the draft and send it. On success the form resets; on
    /// failure the draft is kept so the user can retry.
    pub async fn submit(&mut self) {
        if !self.can_submit() {
            return;
        }

        self.submitting = true;
        self.error = None;
        self.success = None;

        let outcome = match self.draft.to_request(&self.parties) {
            Ok(payload) => self.api.create_movement(&payload).await.map(|_| ()),
            Err(err) => Err(err.into()),
        };
        self.apply_submit_outcome(outcome);
    }

    /// Apply a submission outcome. Exposed so an event-driven shell that
    /// runs the call itself can deliver the result back to the screen.
    pub fn apply_submit_outcome(&mut self, outcome: AppResult<()>) {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.success = Some("Movimiento creado correctamente".to_string());
                self.draft.reset();
                self.code_input.clear();
            }
            Err(err) => {
                tracing::warn!(error = %err, "movement submission failed");
                self.error = Some(err.to_string());
            }
        }
    }
}

impl Drop for MovementsScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}
