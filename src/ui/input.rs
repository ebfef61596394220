//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on current mode. Overlays capture all keys while visible:
//! confirmation dialog first, then the form, then search mode, then normal
//! browse dispatch.

use crate::api::models::{Category, CategoryPayload};
use crate::app::{App, AppEvent, ConfirmAction, FormField, FormState};
use crate::util::MAX_SEARCH_LENGTH;
use crate::view;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::helpers::{spawn_categories_load, spawn_delete, spawn_save, spawn_toggle};
use super::Action;

/// Main input dispatch function.
///
/// Routes input to the appropriate handler based on current mode.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Confirmation dialog captures all keys when visible
    if app.pending_confirm.is_some() {
        return handle_confirm_input(app, code, event_tx);
    }

    // Form overlay captures all keys when visible
    if app.form.is_some() {
        return handle_form_input(app, code, modifiers, event_tx);
    }

    // Search mode input
    if app.search_mode {
        return handle_search_input(app, code);
    }

    handle_browse_input(app, code, event_tx)
}

/// Handle input while the delete confirmation dialog is visible.
fn handle_confirm_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            if let Some(ConfirmAction::DeleteCategory { id, name }) = app.pending_confirm.take() {
                tracing::debug!(id, name = %name, "Delete confirmed");
                app.set_status(format!("Deleting '{}'...", name));
                spawn_delete(app, id, name, event_tx);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_confirm = None;
            app.set_status("Delete cancelled");
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while the create/edit form is visible.
fn handle_form_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let Some(form) = &mut app.form else {
        return Action::Continue;
    };

    // Ignore everything while the save is in flight; the record must not be
    // submitted twice.
    if form.submitting {
        return Action::Continue;
    }

    match code {
        KeyCode::Esc => {
            app.form = None;
            app.set_status("Cancelled");
        }
        KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
        KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
        KeyCode::Enter => {
            if form.name.trim().is_empty() {
                app.set_status("Name is required");
                return Action::Continue;
            }
            let target = form.target;
            let image_url = form.image_url.trim();
            let payload = CategoryPayload {
                name: form.name.trim().to_string(),
                image_url: if image_url.is_empty() {
                    None
                } else {
                    Some(image_url.to_string())
                },
                is_active: form.active,
            };
            form.submitting = true;
            spawn_save(app, target, payload, event_tx);
        }
        KeyCode::Char(' ') if form.field == FormField::Active => {
            form.active = !form.active;
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => match form.field {
            FormField::Name => form.name.push(c),
            FormField::ImageUrl => form.image_url.push(c),
            FormField::Active => {}
        },
        KeyCode::Backspace => match form.field {
            FormField::Name => {
                form.name.pop();
            }
            FormField::ImageUrl => {
                form.image_url.pop();
            }
            FormField::Active => {}
        },
        _ => {}
    }
    Action::Continue
}

/// Handle input while the search box has focus.
///
/// Each keystroke re-projects synchronously: filtering is a pure in-memory
/// pass, so there is no debounce timer. The page resets only when the
/// trimmed term actually changes (handled by `ViewState::set_search_term`).
fn handle_search_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc => {
            // Cancel the search entirely: clear term and restore the full list
            app.search_mode = false;
            app.search_input.clear();
            if app.view_state.set_search_term("") {
                app.selected_row = 0;
            }
        }
        KeyCode::Enter => {
            // Keep the term applied and return to browse keys
            app.search_mode = false;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            if app.view_state.set_search_term(&app.search_input) {
                app.selected_row = 0;
            }
        }
        KeyCode::Char(c) => {
            if app.search_input.len() >= MAX_SEARCH_LENGTH {
                app.set_status(format!(
                    "Search term too long (max {} chars)",
                    MAX_SEARCH_LENGTH
                ));
                return Action::Continue;
            }
            app.search_input.push(c);
            if app.view_state.set_search_term(&app.search_input) {
                app.selected_row = 0;
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input in the normal browse mode.
fn handle_browse_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            let rows = visible_row_count(app);
            if rows > 0 && app.selected_row + 1 < rows {
                app.selected_row += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected_row = app.selected_row.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let total = current_total_pages(app);
            app.view_state.next_page(total);
            app.selected_row = 0;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.view_state.prev_page();
            app.selected_row = 0;
        }
        KeyCode::Char('/') => {
            app.search_mode = true;
            app.search_input = app.view_state.search_term().to_string();
        }
        KeyCode::Char('a') => {
            app.form = Some(FormState::create());
        }
        KeyCode::Char('e') => {
            if let Some(category) = selected_category(app) {
                app.form = Some(FormState::edit(&category));
            }
        }
        KeyCode::Char('x') => {
            if let Some(category) = selected_category(app) {
                spawn_toggle(app, &category, event_tx);
            }
        }
        KeyCode::Char('d') => {
            if let Some(category) = selected_category(app) {
                app.pending_confirm = Some(ConfirmAction::DeleteCategory {
                    id: category.id,
                    name: category.name,
                });
            }
        }
        KeyCode::Char('r') => {
            app.set_status("Refreshing...");
            spawn_categories_load(app, event_tx);
        }
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KeyCode::Esc => {
            // Clear an applied search filter
            if !app.view_state.search_term().is_empty() {
                app.search_input.clear();
                if app.view_state.set_search_term("") {
                    app.selected_row = 0;
                }
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Number of rows on the currently visible page.
fn visible_row_count(app: &mut App) -> usize {
    let categories = Arc::clone(app.store.categories());
    view::project(&categories, &mut app.view_state).rows.len()
}

/// Total page count for the current filter.
fn current_total_pages(app: &mut App) -> usize {
    let categories = Arc::clone(app.store.categories());
    view::project(&categories, &mut app.view_state).total_pages
}

/// The category under the cursor, cloned out of the projection.
///
/// Cloned because the caller mutates `App` (opens overlays, spawns tasks)
/// while the projection would otherwise still borrow the collection.
fn selected_category(app: &mut App) -> Option<Category> {
    let categories = Arc::clone(app.store.categories());
    let projection = view::project(&categories, &mut app.view_state);
    projection.rows.get(app.selected_row).map(|c| (*c).clone())
}
