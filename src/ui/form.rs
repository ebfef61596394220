//! Create/edit form overlay.
//!
//! A minimal field-cycling dialog: name, image address, active flag. Field
//! validation beyond "name must not be empty" belongs to the backend.

use crate::app::{App, FormField};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the form overlay centered on screen.
pub(super) fn render(f: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };

    let area = f.area();
    let width = 60u16.min(area.width.saturating_sub(4));
    let height = 11u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 24 || overlay.height < 9 {
        return;
    }

    let field_line = |field: FormField, label: &str, value: String| {
        let marker = if form.field == field { "> " } else { "  " };
        let style = if form.field == field {
            app.style("overlay_field_active")
        } else {
            app.style("overlay_text")
        };
        Line::from(vec![
            Span::styled(format!("{}{:<7}", marker, label), style),
            Span::styled(value, app.style("overlay_text")),
        ])
    };

    let cursor = |field: FormField| if form.field == field { "_" } else { "" };

    let mut lines = vec![
        Line::from(""),
        field_line(
            FormField::Name,
            "Name",
            format!("{}{}", form.name, cursor(FormField::Name)),
        ),
        field_line(
            FormField::ImageUrl,
            "Image",
            format!("{}{}", form.image_url, cursor(FormField::ImageUrl)),
        ),
        field_line(
            FormField::Active,
            "Active",
            if form.active { "[x]".to_string() } else { "[ ]".to_string() },
        ),
        Line::from(""),
    ];

    if form.submitting {
        lines.push(Line::from(Span::styled(
            "  Saving...",
            app.style("thumb_spinner"),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  (Tab) Next field  (Space) Toggle  (Enter) Save  (Esc) Cancel",
            app.style("overlay_text"),
        )));
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("overlay_border"))
            .title(form.title()),
    );

    f.render_widget(paragraph, overlay);
}
