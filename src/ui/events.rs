//! Application event handling.
//!
//! This module processes background task completion events: collection
//! loads, delete/save/toggle outcomes, and row image probe results.
//! Mutation completions spawn the follow-up reload here, as an explicit
//! event-driven replacement for a watched refresh counter.

use crate::app::{App, AppEvent};
use crate::store::LoadOutcome;
use crate::thumbnail::ThumbState;
use crate::util::strip_control_chars;
use crate::view;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::helpers::{spawn_categories_load, spawn_thumb_probes};

/// Handle application events from background tasks.
pub(super) async fn handle_app_event(
    app: &mut App,
    event: AppEvent,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match event {
        AppEvent::CategoriesLoaded { generation, result } => {
            handle_categories_loaded(app, generation, result, event_tx);
        }
        AppEvent::DeleteCompleted { id, name } => {
            tracing::info!(id, name = %name, "Category deleted");
            app.set_status(format!("Deleted '{}'", name));
            spawn_categories_load(app, event_tx);
        }
        AppEvent::DeleteFailed { id, error } => {
            tracing::error!(id, error = %error, "Category delete failed");
            app.set_status(format!("Delete failed: {}", strip_control_chars(&error)));
        }
        AppEvent::SaveCompleted { name, created } => {
            tracing::info!(name = %name, created, "Category saved");
            app.form = None;
            if created {
                app.set_status(format!("Created '{}'", name));
            } else {
                app.set_status(format!("Saved '{}'", name));
            }
            spawn_categories_load(app, event_tx);
        }
        AppEvent::SaveFailed { error } => {
            tracing::error!(error = %error, "Category save failed");
            // Keep the form open so the input is not lost
            if let Some(form) = &mut app.form {
                form.submitting = false;
            }
            app.set_status(format!("Save failed: {}", strip_control_chars(&error)));
        }
        AppEvent::ToggleCompleted { id, active } => {
            tracing::info!(id, active, "Category active flag toggled");
            app.set_status(if active {
                "Marked active"
            } else {
                "Marked inactive"
            });
            spawn_categories_load(app, event_tx);
        }
        AppEvent::ToggleFailed { id, error } => {
            tracing::error!(id, error = %error, "Category toggle failed");
            app.set_status(format!("Toggle failed: {}", strip_control_chars(&error)));
        }
        AppEvent::ThumbLoaded { id, generation } => {
            if generation == app.store.generation() {
                app.thumbs.insert(id, ThumbState::Loaded);
            }
        }
        AppEvent::ThumbFailed {
            id,
            generation,
            error,
        } => {
            if generation == app.store.generation() {
                tracing::debug!(id, error = %error, "Image probe failed, using placeholder");
                app.thumbs.insert(id, ThumbState::Failed);
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

/// Apply a finished collection load to the store.
///
/// On success the selection is clamped to the (possibly shrunken) page and
/// fresh image probes are spawned. On failure the previous collection stays
/// visible and only the status line changes. Stale results are dropped by
/// the store.
fn handle_categories_loaded(
    app: &mut App,
    generation: u64,
    result: Result<Vec<crate::api::models::Category>, String>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let now_ms = chrono::Utc::now().timestamp_millis();
    match app.store.apply_loaded(generation, result, now_ms) {
        LoadOutcome::Applied => {
            let categories = Arc::clone(app.store.categories());
            let visible = view::project(&categories, &mut app.view_state).rows.len();
            app.clamp_selection(visible);
            spawn_thumb_probes(app, event_tx);
        }
        LoadOutcome::Failed => {
            let error = app
                .store
                .last_error()
                .unwrap_or("unknown error")
                .to_string();
            app.set_status(format!(
                "Refresh failed: {} (showing last known data)",
                strip_control_chars(&error)
            ));
        }
        LoadOutcome::Stale => {
            // A newer load is pending; nothing to do.
        }
    }
}
