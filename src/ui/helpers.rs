//! Background task spawn helpers.
//!
//! Every network call runs in its own short-lived task and reports back
//! over the `AppEvent` channel; nothing here touches `App` state after the
//! spawn. Tasks are wrapped so a panic surfaces as `AppEvent::TaskPanicked`
//! instead of dying silently.

use crate::api::models::{Category, CategoryPayload};
use crate::app::{App, AppEvent, FormTarget};
use crate::thumbnail::{self, ThumbState};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Spawn `fut` and surface a panic as `AppEvent::TaskPanicked`.
pub(super) fn spawn_guarded<F>(task: &'static str, tx: mpsc::Sender<AppEvent>, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let handle = tokio::spawn(fut);
        if let Err(err) = handle.await {
            if err.is_panic() {
                let error = match err.into_panic().downcast::<String>() {
                    Ok(msg) => *msg,
                    Err(payload) => match payload.downcast::<&'static str>() {
                        Ok(msg) => (*msg).to_string(),
                        Err(_) => "unknown panic".to_string(),
                    },
                };
                tracing::error!(task, error = %error, "Background task panicked");
                let _ = tx.send(AppEvent::TaskPanicked { task, error }).await;
            }
        }
    });
}

/// Spawn a collection load tagged with a fresh store generation.
///
/// Called on entry and after every successful mutation (delete, save,
/// toggle); this is the explicit replacement for a watched refresh counter.
pub(super) fn spawn_categories_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let generation = app.store.begin_load();
    let api = Arc::clone(&app.api);
    let tx = event_tx.clone();

    tracing::debug!(generation, "Spawning category load");

    spawn_guarded("load", tx.clone(), async move {
        let result = app_result(api.list_categories().await);
        let event = AppEvent::CategoriesLoaded { generation, result };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send load result (receiver dropped)");
        }
    });
}

/// Spawn the backend delete for a confirmed category.
pub(super) fn spawn_delete(app: &App, id: i64, name: String, event_tx: &mpsc::Sender<AppEvent>) {
    let api = Arc::clone(&app.api);
    let tx = event_tx.clone();

    spawn_guarded("delete", tx.clone(), async move {
        let event = match api.delete_category(id).await {
            Ok(()) => AppEvent::DeleteCompleted { id, name },
            Err(e) => AppEvent::DeleteFailed {
                id,
                error: e.user_message(),
            },
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send delete result (receiver dropped)");
        }
    });
}

/// Spawn the create or update call for a submitted form.
pub(super) fn spawn_save(
    app: &App,
    target: FormTarget,
    payload: CategoryPayload,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let api = Arc::clone(&app.api);
    let tx = event_tx.clone();
    let name = payload.name.clone();

    spawn_guarded("save", tx.clone(), async move {
        let (result, created) = match target {
            FormTarget::Create => (api.create_category(&payload).await, true),
            FormTarget::Edit { id } => (api.update_category(id, &payload).await, false),
        };
        let event = match result {
            Ok(()) => AppEvent::SaveCompleted { name, created },
            Err(e) => AppEvent::SaveFailed {
                error: e.user_message(),
            },
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send save result (receiver dropped)");
        }
    });
}

/// Spawn an active-flag toggle: a full update with the flag flipped.
pub(super) fn spawn_toggle(app: &App, category: &Category, event_tx: &mpsc::Sender<AppEvent>) {
    let api = Arc::clone(&app.api);
    let tx = event_tx.clone();
    let id = category.id;
    let mut payload = CategoryPayload::from_category(category);
    payload.is_active = !payload.is_active;
    let active = payload.is_active;

    spawn_guarded("toggle", tx.clone(), async move {
        let event = match api.update_category(id, &payload).await {
            Ok(()) => AppEvent::ToggleCompleted { id, active },
            Err(e) => AppEvent::ToggleFailed {
                id,
                error: e.user_message(),
            },
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send toggle result (receiver dropped)");
        }
    });
}

/// Reset row probe state and spawn a probe per category with an image.
///
/// Results carry the store generation at spawn time; probes belonging to a
/// superseded collection are discarded by the event handler.
pub(super) fn spawn_thumb_probes(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    app.thumbs.clear();

    let generation = app.store.generation();
    let stamp = app.store.cache_bust_stamp();
    let categories = Arc::clone(app.store.categories());

    for category in categories.iter() {
        let Some(image_url) = &category.image_url else {
            continue;
        };

        app.thumbs.insert(category.id, ThumbState::Loading);

        let probe_url = thumbnail::cache_busted(image_url, stamp).into_owned();
        let api = Arc::clone(&app.api);
        let tx = event_tx.clone();
        let id = category.id;

        spawn_guarded("image_probe", tx.clone(), async move {
            let event = match api.probe_image(&probe_url).await {
                Ok(()) => AppEvent::ThumbLoaded { id, generation },
                Err(e) => AppEvent::ThumbFailed {
                    id,
                    generation,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }
}

/// Collapse an API result into the string the status line can show.
fn app_result(result: Result<Vec<Category>, crate::api::ApiError>) -> Result<Vec<Category>, String> {
    result.map_err(|e| e.user_message())
}
