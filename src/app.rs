//! Central application state.

use crate::api::models::Category;
use crate::api::ApiClient;
use crate::config::Config;
use crate::store::CategoryStore;
use crate::theme::{StyleMap, ThemeVariant};
use crate::thumbnail::ThumbState;
use crate::view::ViewState;
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::Instant;

// ============================================================================
// Confirmation Dialog
// ============================================================================

/// Pending confirmation action for destructive operations.
///
/// While set, the UI renders a confirmation overlay and input is routed to
/// the confirmation handler instead of normal dispatch.
pub enum ConfirmAction {
    /// Delete a category after a yes/no prompt.
    DeleteCategory { id: i64, name: String },
}

// ============================================================================
// Create/Edit Form
// ============================================================================

/// Which record the form writes to on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit { id: i64 },
}

/// Field currently receiving input in the form overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    ImageUrl,
    Active,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::ImageUrl,
            Self::ImageUrl => Self::Active,
            Self::Active => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Active,
            Self::ImageUrl => Self::Name,
            Self::Active => Self::ImageUrl,
        }
    }
}

/// State for the create/edit overlay.
pub struct FormState {
    pub target: FormTarget,
    pub field: FormField,
    pub name: String,
    pub image_url: String,
    pub active: bool,
    /// Set while a save is in flight; further input is ignored until the
    /// save resolves so the record cannot be submitted twice.
    pub submitting: bool,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            target: FormTarget::Create,
            field: FormField::Name,
            name: String::new(),
            image_url: String::new(),
            active: true,
            submitting: false,
        }
    }

    pub fn edit(category: &Category) -> Self {
        Self {
            target: FormTarget::Edit { id: category.id },
            field: FormField::Name,
            name: category.name.clone(),
            image_url: category.image_url.clone().unwrap_or_default(),
            active: category.is_active,
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            FormTarget::Create => " New Category ",
            FormTarget::Edit { .. } => " Edit Category ",
        }
    }
}

// ============================================================================
// Background Task Events
// ============================================================================

/// Events from background tasks.
pub enum AppEvent {
    /// Category collection fetch finished.
    ///
    /// `generation` is the tag handed out by `CategoryStore::begin_load`
    /// when this fetch was spawned; the store discards results from
    /// superseded fetches.
    CategoriesLoaded {
        generation: u64,
        result: Result<Vec<Category>, String>,
    },
    /// Backend confirmed a delete; triggers a reload.
    DeleteCompleted { id: i64, name: String },
    /// Delete failed; `error` is the user-facing message.
    DeleteFailed { id: i64, error: String },
    /// Backend confirmed a create or edit save; triggers a reload.
    SaveCompleted { name: String, created: bool },
    SaveFailed { error: String },
    /// Backend confirmed an active-flag toggle; triggers a reload.
    ToggleCompleted { id: i64, active: bool },
    ToggleFailed { id: i64, error: String },
    /// Row image probe answered. Stale generations are ignored.
    ThumbLoaded { id: i64, generation: u64 },
    ThumbFailed {
        id: i64,
        generation: u64,
        error: String,
    },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// All fields are owned by the UI task; background tasks only ever report
/// back over the `AppEvent` channel, so there is exactly one writer per
/// piece of state.
pub struct App {
    pub api: Arc<ApiClient>,
    pub store: CategoryStore,
    pub view_state: ViewState,

    // Theme
    /// Current theme variant (for cycling).
    pub theme_variant: ThemeVariant,
    /// Active style map for all UI rendering.
    pub theme: StyleMap,

    // UI state
    /// Selected row index within the current page.
    pub selected_row: usize,
    pub search_mode: bool,
    /// Raw contents of the search box; the trimmed term lives in
    /// `view_state`.
    pub search_input: String,
    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,
    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,
    /// Status message with expiry — Cow avoids allocation for static
    /// literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    // Overlays
    pub pending_confirm: Option<ConfirmAction>,
    pub form: Option<FormState>,

    /// Row image probe state, keyed by category id. Rebuilt after every
    /// applied load.
    pub thumbs: HashMap<i64, ThumbState>,
}

impl App {
    pub fn new(api: ApiClient, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark");
            ThemeVariant::Dark
        });

        Self {
            api: Arc::new(api),
            store: CategoryStore::new(),
            view_state: ViewState::new(config.page_size),
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            selected_row: 0,
            search_mode: false,
            search_input: String::new(),
            spinner_frame: 0,
            needs_redraw: true,
            status_message: None,
            pending_confirm: None,
            form: None,
            thumbs: HashMap::new(),
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Clamp the row selection to the visible page.
    ///
    /// Call after any operation that may shrink the page: load applied,
    /// search narrowed, page changed.
    pub fn clamp_selection(&mut self, visible_rows: usize) {
        self.selected_row = if visible_rows == 0 {
            0
        } else {
            self.selected_row.min(visible_rows - 1)
        };
    }

    /// Probe state for a row, if the category has an image at all.
    pub fn thumb_state(&self, id: i64) -> Option<ThumbState> {
        self.thumbs.get(&id).copied()
    }

    /// True while any row image probe is still in flight.
    pub fn any_thumb_loading(&self) -> bool {
        self.thumbs.values().any(|s| *s == ThumbState::Loading)
    }
}

// ============================================================================
// Tests
// ============================================================================
