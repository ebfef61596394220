//! Status bar widget.

use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Use Cow to avoid allocations for static strings and borrowed status messages
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        // Borrow existing status message instead of cloning
        Cow::Borrowed(msg.as_ref())
    } else if app.pending_confirm.is_some() {
        Cow::Borrowed("Confirm delete: (y) yes  (n/Esc) no")
    } else if app.form.is_some() {
        Cow::Borrowed("(Tab) next field  (Space) toggle active  (Enter) save  (Esc) cancel")
    } else if app.search_mode {
        Cow::Borrowed("Type to filter | ENTER keep | ESC clear")
    } else {
        // Static keybinding hints - zero allocation
        Cow::Borrowed(
            "[a]dd [e]dit [d]elete [x]toggle [/]search [h/l]page [r]efresh [t]heme [q]uit",
        )
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
