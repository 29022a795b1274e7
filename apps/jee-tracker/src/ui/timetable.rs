use super::{empty_panel, progress_bar, selected_style, subject_color};
use crate::app::App;
use crate::timetable::{
    day_name, day_progress, subject_share, timetable_stats, weekly_progress, WEEK,
};
use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // Day strip with per-day completion
    let tasks = &app.data().timetable;
    let mut spans = Vec::new();
    for day in WEEK {
        let label = format!(" {} {}% ", &day_name(day)[..3], day_progress(tasks, day));
        let style = if day == app.selected_day {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else if day == app.today.weekday() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    let strip = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Week "))
        .alignment(Alignment::Center);
    f.render_widget(strip, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    let day_tasks = app.day_tasks();
    let title = format!(
        " {} - {}% done ",
        day_name(app.selected_day),
        day_progress(tasks, app.selected_day)
    );

    if day_tasks.is_empty() {
        empty_panel(f, body[0], title.trim(), "No study blocks. Press 'a' to add one.");
    } else {
        let header = Row::new(vec!["", "Time", "Subject", "Topic"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);
        let rows: Vec<Row> = day_tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let topic_style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Line::from(Span::styled(
                        if task.completed { "[x]" } else { "[ ]" },
                        Style::default().fg(Color::Green),
                    )),
                    Line::from(task.slot.to_string()),
                    Line::from(Span::styled(
                        task.subject.name(),
                        Style::default().fg(subject_color(task.subject)),
                    )),
                    Line::from(Span::styled(task.topic.clone(), topic_style)),
                ])
                .style(selected_style(i == app.selected_index))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
        let mut state = TableState::default().with_selected(Some(app.selected_index));
        f.render_stateful_widget(table, body[0], &mut state);
    }

    draw_stats(f, app, body[1]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let tasks = &app.data().timetable;
    let stats = timetable_stats(tasks);
    let weekly = weekly_progress(tasks);

    let mut lines = vec![
        Line::from(Span::styled(
            "Weekly completion",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} {}%  ({}/{})",
            progress_bar(weekly, 20),
            weekly,
            stats.overall.completed,
            stats.overall.total
        )),
        Line::from(format!(
            "Planned: {}h {}m",
            stats.planned_minutes / 60,
            stats.planned_minutes % 60
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} subject mix", day_name(app.selected_day)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for (subject, share) in subject_share(tasks, app.selected_day) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", subject.name()),
                Style::default().fg(subject_color(subject)),
            ),
            Span::raw(format!("{:>3}%", share)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "By subject",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (subject, s) in &stats.by_subject {
        lines.push(Line::from(format!(
            "{:<12}{}/{} ({}%)",
            subject.name(),
            s.completed,
            s.total,
            s.rate()
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "By time slot",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (slot, s) in &stats.by_slot {
        lines.push(Line::from(format!(
            "{:<12}{}/{} ({}%)",
            slot.to_string(),
            s.completed,
            s.total,
            s.rate()
        )));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Statistics "));
    f.render_widget(widget, area);
}
