use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect, Size},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use std::rc::Rc;

use crate::app::App;

const INPUT_PROMPT: &str = "> ";
const KEY_HINTS: &str =
    " Enter: run | Up/Down: history | PgUp/PgDn: scroll | F2: auto-scroll | Esc: quit ";

/// Draws the current state only; all mutation happens in the event handler.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = split(frame.area());

    render_log(frame, app, layout[0]);
    render_status(frame, app, layout[1]);
    render_input(frame, app, layout[2]);
}

fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area)
}

/// Rows available to log lines inside the bordered log pane of a terminal of `size`.
pub fn log_rows(size: Size) -> usize {
    let pane = split(Rect::new(0, 0, size.width, size.height))[0];
    usize::from(pane.height.saturating_sub(2))
}

fn render_log(frame: &mut Frame, app: &App, area: Rect) {
    let log = &app.console.log;
    let visible_rows = usize::from(area.height.saturating_sub(2));
    let offset = app
        .scroll_offset
        .min(log.len().saturating_sub(visible_rows));

    let mut title = format!(" Log {}/{}", log.len(), log.capacity());
    if app.auto_scroll {
        title.push_str(" [auto-scroll]");
    }
    if offset > 0 {
        title.push_str(&format!(" [-{}]", offset));
    }
    title.push(' ');

    let block = Block::default().title(title).borders(Borders::ALL);

    let lines: Vec<Line> = log
        .all()
        .map(|entry| Line::from(entry.display()))
        .collect();

    let top = first_visible_line(lines.len(), visible_rows, offset);

    let pane = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0));

    frame.render_widget(pane, area);
}

/// Index of the topmost line when the view sits `offset` lines above the tail.
fn first_visible_line(total: usize, visible_rows: usize, offset: usize) -> usize {
    total.saturating_sub(visible_rows).saturating_sub(offset)
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Status ").borders(Borders::ALL);

    let text = app.console.status.visible().unwrap_or_default();
    let status = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(block);

    frame.render_widget(status, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let history = &app.history;
    let title = match history.cursor() {
        Some(idx) => format!(" Enter command [history {}/{}] ", idx + 1, history.len()),
        None if history.is_empty() => " Enter command ".to_string(),
        None => format!(" Enter command [{} in history] ", history.len()),
    };

    let block = Block::default()
        .title(title)
        .title_bottom(KEY_HINTS)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = Line::from(vec![
        Span::styled(
            INPUT_PROMPT,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(app.input.as_str()),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);

    let typed =
        u16::try_from(INPUT_PROMPT.len() + app.input.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.x + area.width.saturating_sub(2);
    frame.set_cursor_position(Position::new(
        (area.x + 1).saturating_add(typed).min(max_x),
        area.y + 1,
    ));
}
