use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::domain::slot::PersistenceSlot;
use crate::domain::todo::{FilterType, Stats};
use crate::ui::app::{App, Mode};

const HELP: &str = "Enter/Space: toggle, n: new, e: edit, d: delete, f: filter, q: quit";

pub fn render<S: PersistenceSlot>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.size());

    let header = Paragraph::new(HELP).block(Block::default().borders(Borders::ALL).title("todos"));
    f.render_widget(header, chunks[0]);

    let bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    let stats = Paragraph::new(stats_line(app.store().stats())).block(Block::default().borders(Borders::ALL));
    f.render_widget(stats, bar[0]);
    let tabs = Tabs::new(FilterType::ALL.iter().map(|f| f.as_str()).collect::<Vec<_>>())
        .select(FilterType::ALL.iter().position(|f| *f == app.filter()).unwrap_or(0))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("filter"));
    f.render_widget(tabs, bar[1]);

    let visible = app.visible();
    let list_block = Block::default().borders(Borders::ALL).title(format!("items [{}]", app.filter()));
    if visible.is_empty() {
        let empty = Paragraph::new(empty_message(app.filter(), app.store().len()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(list_block);
        f.render_widget(empty, chunks[2]);
    } else {
        let items: Vec<ListItem> = visible
            .iter()
            .map(|t| {
                let (mark, style) = if t.completed {
                    ("[x] ", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
                } else {
                    ("[ ] ", Style::default())
                };
                ListItem::new(Line::from(vec![Span::raw(mark), Span::styled(t.text.as_str(), style)]))
            })
            .collect();
        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol(">> ");
        let mut state = ListState::default();
        state.select(Some(app.selected()));
        f.render_stateful_widget(list, chunks[2], &mut state);
    }

    let (title, text, style) = match app.mode() {
        Mode::Create { draft } => ("new", format!("{draft}_  |  Enter to add, Esc to cancel"), Style::default()),
        Mode::Edit { draft, .. } => ("edit", format!("{draft}_  |  Enter to save, Esc to cancel"), Style::default()),
        Mode::View => match app.notice() {
            Some(notice) => ("info", notice.to_string(), Style::default().fg(Color::Red)),
            None => (
                "info",
                app.selected_todo().map(|t| created_label(&t.created_at.with_timezone(&Local))).unwrap_or_default(),
                Style::default(),
            ),
        },
    };
    let footer = Paragraph::new(text).style(style).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(footer, chunks[3]);
}

/// Summary shown next to the filter tabs.
pub fn stats_line(stats: Stats) -> String {
    if stats.total == 0 {
        return "No todos yet".to_string();
    }
    let mut line = format!("{} active", stats.active);
    if stats.completed > 0 {
        line.push_str(&format!(" • {} completed", stats.completed));
    }
    line.push_str(&format!(" • {} total", stats.total));
    line
}

/// Placeholder for an empty filtered view. `total` is the size of the whole collection.
pub fn empty_message(filter: FilterType, total: usize) -> &'static str {
    match filter {
        FilterType::Active if total > 0 => "All done! No active todos.",
        FilterType::Completed if total > 0 => "No completed todos yet.",
        _ => "No todos yet. Add one above to get started!",
    }
}

pub fn created_label<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("Created {} at {}", at.format("%Y-%m-%d"), at.format("%H:%M"))
}
