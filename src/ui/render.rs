use crate::config::Context;
use crate::ui::app::App;
use crate::ui::layout::{self, PanelGeometry};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::fmt::Write as _;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let geometry = layout::split(area.width, area.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(geometry.list_height),
            Constraint::Min(geometry.output_height),
        ])
        .split(area);

    render_context_list(frame, app, chunks[0], geometry);
    render_output(frame, app, chunks[1], geometry);
}

fn render_context_list(frame: &mut Frame, app: &App, area: Rect, geometry: PanelGeometry) {
    let capacity = layout::list_capacity(geometry.list_height);
    let window = layout::window(app.contexts.len(), app.cursor, capacity);
    let inner_width = usize::from(geometry.inner_width);

    let mut lines: Vec<Line> = Vec::new();

    if app.contexts.is_empty() {
        lines.push(Line::from("No contexts configured."));
    }

    for i in window {
        let context = &app.contexts[i];
        let cursor = if i == app.cursor { ">" } else { " " };
        let status = match &context.last_result {
            Some(result) if result.success => "✓",
            Some(_) => "✗",
            None => " ",
        };
        let current = if context.name == app.current_name() {
            "*"
        } else {
            " "
        };

        let mut text = format!("{cursor}{current}[{status}] {}", context.label);
        if !context.description.is_empty() {
            let _ = write!(text, " - {}", context.description);
        }
        let text = layout::truncate(&text, inner_width);

        let style = if i == app.cursor {
            Style::default()
                .fg(app.theme.selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " Context Deck ",
                Style::default()
                    .fg(app.theme.title)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(" ↑/↓ or j/k: navigate • space: run • q: quit ")
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(list, area);
}

fn render_output(frame: &mut Frame, app: &App, area: Rect, geometry: PanelGeometry) {
    let capacity = layout::output_capacity(geometry.output_height);
    let inner_width = usize::from(geometry.inner_width);

    let (title, text) = if app.last_output.is_empty() {
        let detail = match app.selected() {
            Some(context) => detail_text(context),
            None => "No context selected".to_string(),
        };
        (" Details ", detail)
    } else {
        (" Output ", app.last_output.clone())
    };

    let lines: Vec<Line> = layout::wrap_lines(&text, inner_width, capacity)
        .into_iter()
        .map(Line::from)
        .collect();

    let output = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                title,
                Style::default()
                    .fg(app.theme.output_title)
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(output, area);
}

/// Plain-text summary of a context for the detail view.
pub fn detail_text(context: &Context) -> String {
    let mut text = format!("Name: {}\nLabel: {}\n", context.name, context.label);
    if !context.description.is_empty() {
        let _ = writeln!(text, "Description: {}", context.description);
    }
    for (role, command) in &context.commands {
        let _ = writeln!(text, "Command [{role}]: {command}");
    }
    if !context.variables.is_empty() {
        text.push_str("\nVariables:\n");
        for (key, value) in &context.variables {
            let _ = writeln!(text, "  {key} = {value}");
        }
    }
    match &context.last_result {
        Some(result) => {
            text.push_str("\nLast Execution:\n");
            let _ = writeln!(
                text,
                "  Time: {}",
                result.timestamp.format("%Y-%m-%d %H:%M:%S")
            );
            let status = if result.success { "SUCCESS" } else { "FAILED" };
            let _ = writeln!(
                text,
                "  Status: {status} (Exit Code: {})",
                result.exit_code
            );
        }
        None => text.push_str("\nNever executed"),
    }
    text
}
