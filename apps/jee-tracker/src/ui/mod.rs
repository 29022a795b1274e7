//! UI rendering for the JEE tracker.

mod analytics;
mod calendar;
mod dashboard;
mod flashcards;
mod gamification;
mod syllabus;
mod timetable;

use crate::app::{App, EditField, MessageType, View};
use crate::models::{Priority, Subject, TopicStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the application.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer/status
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);

    if app.show_help {
        draw_help_popup(f);
    }

    if app.editing && app.editing_field != EditField::Search {
        draw_edit_dialog(f, app);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let date_str = app.today.format(&app.config.display.date_format).to_string();
    let title = format!(" JEE Tracker - {} - {} ", app.view_title(), date_str);

    let mut tabs: Vec<Span> = Vec::new();
    for (i, view) in View::ALL.iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw(" "));
        }
        tabs.push(styled_tab(&format!("{}:{}", i + 1, view.title()), app.view == *view));
    }

    let header = Paragraph::new(Line::from(tabs))
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn styled_tab(label: &str, active: bool) -> Span<'static> {
    if active {
        Span::styled(
            format!("[{}]", label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {} ", label), Style::default().fg(Color::Gray))
    }
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    match app.view {
        View::Dashboard => dashboard::draw(f, app, area),
        View::Syllabus => syllabus::draw(f, app, area),
        View::Analytics => analytics::draw(f, app, area),
        View::Timetable => timetable::draw(f, app, area),
        View::Flashcards => flashcards::draw(f, app, area),
        View::Calendar => calendar::draw(f, app, area),
        View::Gamification => gamification::draw(f, app, area),
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let (msg, style) = if let Some((ref message, msg_type)) = app.message {
        let color = match msg_type {
            MessageType::Info => Color::Blue,
            MessageType::Success => Color::Green,
            MessageType::Warning => Color::Yellow,
            MessageType::Error => Color::Red,
        };
        (message.clone(), Style::default().fg(color))
    } else if app.editing_field == EditField::Search {
        (
            format!("Search: {}_  (Enter:Keep  Esc:Clear)", app.input_buffer),
            Style::default().fg(Color::Yellow),
        )
    } else {
        let help = match app.view {
            View::Dashboard => "1-7:Views  n:Next quote  x:Export  ?:Help  q:Quit",
            View::Syllabus => "j/k:Navigate  Enter:Expand/Cycle status  m:Mains/Advanced  /:Search  f:Filter  c:Clear  ?:Help",
            View::Analytics => "m:Mains/Advanced  a:Log test  1-7:Views  ?:Help  q:Quit",
            View::Timetable => "h/l:Day  j/k:Navigate  Space:Toggle  a:Add  t:Start timer  p:Pause  T:Stop  ?:Help",
            View::Flashcards => "Space:Flip  y/n:Correct/Wrong  h/l:Prev/Next  r:Shuffle  R:Restart  s:Subject  m:Mode  ?:Help",
            View::Calendar => "h/l:Day  Up/Down:Week  t:Today  j/k:Goal  +/-:Progress  a:Add goal  ?:Help",
            View::Gamification => "1-7:Views  x:Export  ?:Help  q:Quit",
        };
        (help.to_string(), Style::default().fg(Color::DarkGray))
    };

    let mut block = Block::default().borders(Borders::ALL);
    if app.timer.is_active() {
        if let Some(target) = app.timer.target() {
            let state = if app.timer.is_running() { "" } else { " (paused)" };
            block = block.title(format!(
                " {} - {} {}{} ",
                target.subject.short(),
                target.topic,
                app.timer.format_elapsed(),
                state
            ));
        }
    }

    let footer = Paragraph::new(msg).style(style).block(block);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = centered_rect(60, 90, f.area());
    f.render_widget(Clear, area);

    let help_text = r#"
JEE Tracker Keybindings

Views:
  1-7, Tab        Dashboard, Syllabus, Analytics, Timetable,
                  Flashcards, Calendar, Achievements

Syllabus:
  Enter/Space     Expand subject / cycle topic status
  m               Toggle Mains / Advanced
  /  f  c         Search, status filter, clear filters

Analytics:
  m  a            Mains / Advanced, log a mock test

Timetable:
  h/l             Previous / next day
  Space           Toggle task    a  Add task
  t               Time selected task

Flashcards:
  Space           Flip card      y/n  Mark correct / wrong
  s  m  r         Subject, mode, shuffle
  R               Start a new session

Calendar:
  h/l, Up/Down    Move by day / week
  +/-             Goal progress  a  Add goal

General:
  p  T            Pause / stop study timer
  x               Export dashboard snapshot
  ?               Show this help
  q               Quit

Press any key to close
"#;

    let popup = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });

    f.render_widget(popup, area);
}

fn draw_edit_dialog(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);

    let title = match app.editing_field {
        EditField::TaskSlot => "Time slot (H:MM-H:MM)".to_string(),
        EditField::TaskTopic => format!("Topic - {} (Tab: subject)", app.draft.subject),
        EditField::GoalTitle => format!("Goal title - {} (Tab: category)", app.draft.category.name()),
        EditField::GoalDeadline => {
            format!("Deadline YYYY-MM-DD - {} priority (Tab)", app.draft.priority.name())
        }
        EditField::TestMarks => format!(
            "Marks P C M minutes - {}, {} each",
            app.analytics_exam.name(),
            app.analytics_exam.subject_max_marks()
        ),
        EditField::TestWeakTopics => "Weak topics, comma separated".to_string(),
        EditField::Search | EditField::None => String::new(),
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(input, area);

    // Show cursor
    f.set_cursor_position((
        area.x + 1 + app.input_buffer.chars().count() as u16,
        area.y + 1,
    ));
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Placeholder for an empty panel.
fn empty_panel(f: &mut Frame, area: Rect, title: &str, text: &str) {
    let msg = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(msg, area);
}

/// Fixed-width text progress bar.
fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn subject_color(subject: Subject) -> Color {
    match subject {
        Subject::Physics => Color::Blue,
        Subject::Chemistry => Color::Green,
        Subject::Mathematics => Color::Magenta,
    }
}

fn status_color(status: TopicStatus) -> Color {
    match status {
        TopicStatus::Mastered => Color::Green,
        TopicStatus::InProgress => Color::Blue,
        TopicStatus::ReviseSoon => Color::Yellow,
        TopicStatus::Weak => Color::Red,
        TopicStatus::NotStarted => Color::DarkGray,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fixtures::Dataset;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    pub(super) fn test_app() -> App {
        let monday = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        App::with_state(Config::default(), Dataset::sample(), monday)
    }

    pub(super) fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    pub(super) fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "----------");
        assert_eq!(progress_bar(50, 10), "#####-----");
        assert_eq!(progress_bar(100, 4), "####");
        assert_eq!(progress_bar(255, 4), "####");
    }

    #[test]
    fn test_header_lists_every_view() {
        let mut app = test_app();
        let screen = render(&mut app);
        assert!(screen.contains("[1:Dashboard]"));
        assert!(screen.contains("7:Achievements"));
        assert!(screen.contains("Dec 16, 2024"));
    }

    #[test]
    fn test_every_view_renders() {
        let mut app = test_app();
        for c in ['1', '2', '3', '4', '5', '6', '7'] {
            press(&mut app, KeyCode::Char(c));
            let screen = render(&mut app);
            assert!(screen.contains(&format!("[{}:{}]", c, app.view.title())));
        }
    }

    #[test]
    fn test_help_popup() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        let screen = render(&mut app);
        assert!(screen.contains("JEE Tracker Keybindings"));
    }

    #[test]
    fn test_message_replaces_footer_help() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('p'));
        let screen = render(&mut app);
        assert!(screen.contains("No timer running"));
    }

    #[test]
    fn test_timer_shown_in_footer() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('t'));
        let screen = render(&mut app);
        assert!(screen.contains("Phy - Mechanics Revision 00:0"));
    }

    #[test]
    fn test_edit_dialog() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('a'));
        let screen = render(&mut app);
        assert!(screen.contains("Time slot (H:MM-H:MM)"));
    }
}
