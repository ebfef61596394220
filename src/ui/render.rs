//! Render functions for the TUI.
//!
//! This module handles all rendering logic: the main table layout plus the
//! confirmation and form overlays.

use crate::app::{App, ConfirmAction};
use crate::view;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::sync::Arc;

use super::{form, status, table};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 8;

/// Main render dispatch function.
///
/// Handles terminal size validation, then draws the table, pager, and
/// status bar, with any active overlay on top.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Minimum terminal size check for usable UI
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    // Three rows: table, pager line, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // The projection applies the page clamp as a side effect, so it must be
    // derived before anything reads `view_state.page`.
    let categories = Arc::clone(app.store.categories());
    let projection = view::project(&categories, &mut app.view_state);

    table::render(f, app, chunks[0], &projection);
    table::render_pager(f, app, chunks[1], &projection);
    status::render(f, app, chunks[2]);

    // Overlays on top of the table when active
    if let Some(confirm) = &app.pending_confirm {
        render_confirm_overlay(f, app, confirm);
    }
    if app.form.is_some() {
        form::render(f, app);
    }
}

/// Render the delete confirmation dialog centered on screen.
fn render_confirm_overlay(f: &mut Frame, app: &App, confirm: &ConfirmAction) {
    let area = f.area();

    let text = match confirm {
        ConfirmAction::DeleteCategory { name, .. } => {
            let shown = if name.is_empty() { "(unnamed)" } else { name };
            format!(
                "Delete \"{}\"?\n\nThis cannot be undone.\n\n(y) Confirm  (n/Esc) Cancel",
                shown
            )
        }
    };

    // Size: at most 50 chars wide, 7 lines tall, centered
    let width = 50u16.min(area.width.saturating_sub(4));
    let height = 7u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("overlay_border"))
                .title(" Confirm "),
        )
        .alignment(Alignment::Center)
        .style(app.style("overlay_text"));

    f.render_widget(paragraph, overlay);
}
