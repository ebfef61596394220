//! Category table widget.
//!
//! Renders the visible page of the collection, or a spinner while a load is
//! in flight, or one of the two empty-state placeholders. The pager line
//! below the table shows position within the filtered set.

use crate::app::App;
use crate::thumbnail::{placeholder_letter, ThumbState};
use crate::util::truncate_to_width;
use crate::view::{EmptyState, Projection};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Braille spinner animation frames (kept in sync with the tick handler's
/// frame count).
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the category table panel.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect, projection: &Projection) {
    let title = if app.search_mode {
        format!(" Search: {}_ ", app.search_input)
    } else if !app.view_state.search_term().is_empty() {
        format!(" Categories (filter: '{}') ", app.view_state.search_term())
    } else {
        " Categories ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.search_mode {
            app.style("panel_border_focused")
        } else {
            app.style("panel_border")
        })
        .title(title);

    // The loading flag gates table vs. spinner
    if app.store.is_loading() {
        let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
        let paragraph = Paragraph::new(format!("\n{} Loading categories...", spinner))
            .alignment(Alignment::Center)
            .style(app.style("thumb_spinner"))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    if let Some(empty) = projection.empty {
        let text = match empty {
            EmptyState::NoCategories => "\nNo categories yet. Press 'a' to add one".to_string(),
            EmptyState::NoMatches => {
                format!("\nNo results for '{}'", app.view_state.search_term())
            }
        };
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(app.style("empty_state"))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(" "),
        Cell::from("Name"),
        Cell::from("Image"),
        Cell::from("Active"),
    ])
    .style(app.style("table_header"));

    // Fixed columns (thumb, active) plus borders/spacing leave the rest
    // for name and image address
    let name_width = (area.width as usize).saturating_sub(3 + 8 + 6) * 3 / 5;
    let image_width = (area.width as usize).saturating_sub(3 + 8 + 6) - name_width;

    let rows = projection.rows.iter().enumerate().map(|(i, category)| {
        let thumb = thumb_cell(app, category.id, &category.name, category.image_url.is_some());

        let name = truncate_to_width(&category.name, name_width).into_owned();
        let image = category
            .image_url
            .as_deref()
            .map(|url| truncate_to_width(url, image_width).into_owned())
            .unwrap_or_else(|| "-".to_string());

        let active = if category.is_active {
            Cell::from(Span::styled("active", app.style("badge_active")))
        } else {
            Cell::from(Span::styled("inactive", app.style("badge_inactive")))
        };

        let row_style = if i == app.selected_row {
            app.style("row_selected")
        } else if !category.is_active {
            app.style("row_inactive")
        } else {
            app.style("row_normal")
        };

        Row::new(vec![thumb, Cell::from(name), Cell::from(image), active]).style(row_style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(16),
            Constraint::Min(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

/// The leading cell of a row: spinner while the image probe is in flight,
/// a marker once it answered, the letter placeholder otherwise.
fn thumb_cell(app: &App, id: i64, name: &str, has_image: bool) -> Cell<'static> {
    if has_image {
        match app.thumb_state(id) {
            Some(ThumbState::Loading) => {
                let frame = SPINNER[app.spinner_frame % SPINNER.len()];
                return Cell::from(Span::styled(frame.to_string(), app.style("thumb_spinner")));
            }
            Some(ThumbState::Loaded) => {
                return Cell::from(Span::styled("▣".to_string(), app.style("thumb_placeholder")));
            }
            Some(ThumbState::Failed) | None => {}
        }
    }
    Cell::from(Span::styled(
        placeholder_letter(name).to_string(),
        app.style("thumb_placeholder"),
    ))
}

/// Render the pager line: position within the filtered set.
pub(super) fn render_pager(f: &mut Frame, app: &App, area: Rect, projection: &Projection) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // An empty filtered set still reads as one page
    let display_pages = projection.total_pages.max(1);
    let total = app.store.categories().len();

    let text = if projection.filtered_len == total {
        format!(
            " Page {}/{} · {} categories",
            projection.page, display_pages, total
        )
    } else {
        format!(
            " Page {}/{} · {} of {} categories",
            projection.page, display_pages, projection.filtered_len, total
        )
    };

    let paragraph = Paragraph::new(text).style(app.style("pager"));
    f.render_widget(paragraph, area);
}
