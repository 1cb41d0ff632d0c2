//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop.
//!
//! This module is "pure rendering": it reads the app state and config and produces
//! widgets. It never changes the state, so drawing the same state twice yields the
//! same frame.

use crate::app::AppState;
use crate::core::{
    DirEntry, format_mtime, format_permissions, format_size, right_align, sanitize_to_exact_width,
};
use crate::ui::layout::{DATE_WIDTH, PERM_WIDTH, SIZE_WIDTH, ViewportGeometry};
use crate::ui::widgets;

use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Marker appended to the names of entries that could not be stat'ed.
const INACCESSIBLE_MARKER: &str = " [?]";

/// Renders the whole terminal UI for one frame.
/// Draws the header, the file list and the footer, or only the "too small" notice.
pub fn render(frame: &mut Frame, app: &AppState) {
    let Some(geometry) = ViewportGeometry::compute(frame.area()) else {
        frame.render_widget(
            Paragraph::new("Terminal too small!").style(app.config().theme().error_style()),
            frame.area(),
        );
        return;
    };

    render_header(frame, app, &geometry);
    render_list(frame, app, &geometry);
    widgets::draw_footer(frame, app, geometry.footer);
}

fn render_header(frame: &mut Frame, app: &AppState, geometry: &ViewportGeometry) {
    let text = format!("Path: {}", app.nav().current_dir().display());
    let line = sanitize_to_exact_width(&text, geometry.header.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(line, app.config().theme().header_style())),
        geometry.header,
    );
}

fn render_list(frame: &mut Frame, app: &AppState, geometry: &ViewportGeometry) {
    frame.render_widget(Block::default().borders(Borders::ALL), geometry.list_box);

    let nav = app.nav();
    let entries = nav.entries();
    let range = geometry.visible_range(nav.scroll_offset(), entries.len());
    let selected = nav.selected_idx();

    let lines: Vec<Line> = range
        .map(|idx| {
            let entry = &entries[idx];
            let style = if idx == selected {
                app.config().theme().selection_style()
            } else {
                entry_style(app, entry)
            };
            Line::from(Span::styled(format_row(entry, geometry), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), geometry.list_inner);
}

/// Color class of an unselected row.
fn entry_style(app: &AppState, entry: &DirEntry) -> Style {
    let theme = app.config().theme();
    if entry.is_dir() {
        theme.directory_style()
    } else if entry.is_executable() || entry.has_suffix(app.config().general().script_suffix()) {
        theme.executable_style()
    } else {
        Style::default()
    }
}

/// Builds one list row, exactly as wide as the list box, so a selected row is
/// highlighted over the full width.
fn format_row(entry: &DirEntry, geometry: &ViewportGeometry) -> String {
    let mut name = entry.name_str().into_owned();
    if entry.is_dir() {
        name.push('/');
    }
    if !entry.is_accessible() {
        name.push_str(INACCESSIBLE_MARKER);
    }

    let mut row = sanitize_to_exact_width(&name, geometry.name_width);
    if geometry.shows_perm() {
        row.push(' ');
        row.push_str(&sanitize_to_exact_width(
            &format_permissions(entry.mode()),
            PERM_WIDTH,
        ));
    }
    if geometry.shows_size() {
        row.push(' ');
        row.push_str(&right_align(&format_size(entry.size()), SIZE_WIDTH));
    }
    if geometry.shows_date() {
        row.push(' ');
        row.push_str(&sanitize_to_exact_width(
            &format_mtime(entry.modified()),
            DATE_WIDTH,
        ));
    }

    sanitize_to_exact_width(&row, geometry.content_width())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use std::path::PathBuf;

    #[test]
    fn inaccessible_row_has_marker_and_placeholders() {
        let geometry = ViewportGeometry::compute(Rect::new(0, 0, 80, 24)).unwrap();
        let entry = DirEntry::inaccessible("ghost".into(), PathBuf::from("/tmp/ghost"));
        let row = format_row(&entry, &geometry);

        assert_eq!(row.chars().count(), geometry.content_width());
        assert!(row.starts_with("ghost [?] "));
        assert_eq!(&row[geometry.perm_x..geometry.perm_x + PERM_WIDTH], "?---------");
        assert_eq!(&row[geometry.size_x..geometry.size_x + SIZE_WIDTH], "      ?");
        assert_eq!(&row[geometry.date_x..], "--- -- --:--");
    }

    #[test]
    fn long_names_are_cut_to_the_name_column() {
        let geometry = ViewportGeometry::compute(Rect::new(0, 0, 40, 10)).unwrap();
        let entry = DirEntry::inaccessible("x".repeat(100).into(), PathBuf::from("/x"));
        let row = format_row(&entry, &geometry);
        assert_eq!(row.chars().count(), geometry.content_width());
        assert_eq!(&row[..geometry.name_width], "x".repeat(geometry.name_width));
    }
}
