//! Footer widgets for dirpilot.
//!
//! The footer row shows, in order of precedence: the active prompt with its cursor,
//! the status message, or the key help line.

use crate::app::AppState;
use crate::app::actions::Prompt;
use crate::core::sanitize_to_exact_width;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

/// Static help line. `{suffix}` is replaced with the configured script suffix.
const HELP_TEMPLATE: &str =
    "q:Quit Enter/→:Open/Run({suffix})/View Bksp/←/u:Up | r:Rename c:Copy d:Delete";

pub(crate) fn help_line(suffix: &str) -> String {
    HELP_TEMPLATE.replace("{suffix}", suffix)
}

pub(crate) fn draw_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    if let Some(prompt) = app.prompt() {
        draw_prompt(frame, prompt, area);
        return;
    }

    let width = area.width as usize;
    let status = app.status();
    let (text, style) = if !status.is_empty() {
        let style = if status.is_error() {
            app.config().theme().error_style()
        } else {
            Style::default()
        };
        (status.text().to_string(), style)
    } else {
        (
            help_line(app.config().general().script_suffix()),
            Style::default(),
        )
    };

    frame.render_widget(
        Paragraph::new(Span::styled(sanitize_to_exact_width(&text, width), style)),
        area,
    );
}

/// Draws `label` + input and places the terminal cursor.
/// Long input scrolls so the cursor stays visible.
fn draw_prompt(frame: &mut Frame, prompt: &Prompt, area: Rect) {
    let label_width = prompt.label().width().min(area.width as usize);
    let visible_width = (area.width as usize).saturating_sub(label_width + 1);
    let (visible, cursor_offset) = input_field_view(prompt.buffer(), prompt.cursor(), visible_width);

    let line = Line::from(vec![
        Span::raw(prompt.label().to_string()),
        Span::raw(visible.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let x = area.x + (label_width + cursor_offset) as u16;
    frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
}

/// Returns the visible tail of `input` and the cursor offset into it, in columns.
///
/// `cursor` counts chars. Input wider than `visible_width` is cut from the left.
fn input_field_view(input: &str, cursor: usize, visible_width: usize) -> (&str, usize) {
    let cursor_byte = input
        .char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(input.len());

    if input[..cursor_byte].width() <= visible_width {
        return (input, input[..cursor_byte].width());
    }

    let mut start = cursor_byte;
    let mut current_w = 0;
    for (idx, ch) in input[..cursor_byte].char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_w + w > visible_width {
            break;
        }
        current_w += w;
        start = idx;
    }
    (&input[start..], input[start..cursor_byte].width())
}
