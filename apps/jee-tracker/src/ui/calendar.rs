use super::{empty_panel, priority_color, progress_bar, selected_style};
use crate::app::App;
use crate::calendar::{
    days_until, events_for_date, goal_summary, has_events, month_grid, relative_label,
    upcoming_deadlines,
};
use crate::config::CountdownTarget;
use chrono::{Datelike, Duration};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(chunks[0]);

    draw_month(f, app, left[0]);
    draw_day_events(f, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)])
        .split(chunks[1]);

    draw_goals(f, app, right[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(right[1]);

    draw_deadlines(f, app, bottom[0]);
    draw_exams(f, app, bottom[1]);
}

fn draw_month(f: &mut Frame, app: &App, area: Rect) {
    let events = &app.data().events;
    let week_start = app.config.display.week_start.weekday();

    let mut header = Vec::new();
    let mut day = app.selected_date;
    while day.weekday() != week_start {
        day -= Duration::days(1);
    }
    for _ in 0..7 {
        header.push(Span::styled(
            format!("{:<5}", &day.format("%a").to_string()[..2]),
            Style::default().fg(Color::DarkGray),
        ));
        day += Duration::days(1);
    }

    let mut lines = vec![Line::from(header)];
    for week in month_grid(app.selected_date, week_start) {
        let mut spans = Vec::new();
        for cell in week {
            match cell {
                Some(date) => {
                    let marker = if has_events(events, date) { "*" } else { " " };
                    let mut style = Style::default();
                    if date == app.today {
                        style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                    }
                    if date == app.selected_date {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled(format!("{:>2}{}", date.day(), marker), style));
                    spans.push(Span::raw("  "));
                }
                None => spans.push(Span::raw("     ")),
            }
        }
        lines.push(Line::from(spans));
    }

    let title = format!(" {} ", app.selected_date.format("%B %Y"));
    let month = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);
    f.render_widget(month, area);
}

fn draw_day_events(f: &mut Frame, app: &App, area: Rect) {
    let date_format = &app.config.display.date_format;
    let title = format!("Events on {}", app.selected_date.format(date_format));
    let events = events_for_date(&app.data().events, app.selected_date);

    if events.is_empty() {
        empty_panel(f, area, &title, "No events");
        return;
    }

    let items: Vec<ListItem> = events
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", e.kind.name()), Style::default().fg(Color::Cyan)),
                Span::raw(e.title.clone()),
                Span::styled(
                    format!("  {}", e.priority.name()),
                    Style::default().fg(priority_color(e.priority)),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)));
    f.render_widget(list, area);
}

fn draw_goals(f: &mut Frame, app: &App, area: Rect) {
    let goals = &app.data().goals;
    let summary = goal_summary(goals);
    let title = format!(
        " Goals - {} total, {} done ({}%), {} nearly done, avg {}% ",
        summary.total,
        summary.completed,
        summary.completion_rate,
        summary.near_complete,
        summary.average_progress
    );
    let by_category: Vec<String> = summary
        .by_category
        .iter()
        .map(|(category, tally)| format!("{} {}/{}", category.name(), tally.completed, tally.total))
        .collect();

    if goals.is_empty() {
        empty_panel(f, area, title.trim(), "No goals yet. Press 'a' to add one.");
        return;
    }

    let date_format = &app.config.display.date_format;
    let items: Vec<ListItem> = goals
        .iter()
        .enumerate()
        .map(|(i, goal)| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:<7}", goal.priority.name()),
                        Style::default().fg(priority_color(goal.priority)),
                    ),
                    Span::styled(goal.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {} - {}", goal.category.name(), relative_label(goal.deadline, app.today, date_format)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(vec![
                    Span::raw(format!("       {} {}%", progress_bar(goal.progress, 24), goal.progress)),
                    if goal.completed {
                        Span::styled("  done", Style::default().fg(Color::Green))
                    } else {
                        Span::raw("")
                    },
                ]),
            ])
            .style(selected_style(i == app.selected_index))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(format!(" {} ", by_category.join("  "))),
    );
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_deadlines(f: &mut Frame, app: &App, area: Rect) {
    let upcoming = upcoming_deadlines(&app.data().goals, app.today);
    if upcoming.is_empty() {
        empty_panel(f, area, "Upcoming Deadlines", "Nothing due this week");
        return;
    }

    let date_format = &app.config.display.date_format;
    let lines: Vec<Line> = upcoming
        .iter()
        .map(|g| {
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", relative_label(g.deadline, app.today, date_format)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(g.title.clone()),
            ])
        })
        .collect();
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Upcoming Deadlines "));
    f.render_widget(widget, area);
}

fn draw_exams(f: &mut Frame, app: &App, area: Rect) {
    let date_format = &app.config.display.date_format;
    let selected = app.config.exam.countdown;
    let lines: Vec<Line> = [
        CountdownTarget::MainsSession1,
        CountdownTarget::MainsSession2,
        CountdownTarget::Advanced,
    ]
    .into_iter()
    .flat_map(|target| {
        let date = target.date(&app.exam_dates);
        let left = days_until(date, app.today);
        let status = if left < 0 {
            "done".to_string()
        } else {
            format!("{} days", left)
        };
        let style = if target == selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        vec![
            Line::from(Span::styled(target.label(), style)),
            Line::from(Span::styled(
                format!("  {} - {}", date.format(date_format), status),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    })
    .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Exams "));
    f.render_widget(widget, area);
}
