use super::{empty_panel, priority_color, progress_bar, styled_tab, subject_color};
use crate::analytics::{tests_for_exam, weak_topic_details, ExamReport, TrendDirection};
use crate::app::App;
use crate::models::ExamType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let exam = app.analytics_exam;
    let report = ExamReport::build(&app.data().tests, exam);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let tabs = Paragraph::new(Line::from(vec![
        styled_tab("JEE Mains", exam == ExamType::Mains),
        Span::raw(" "),
        styled_tab("JEE Advanced", exam == ExamType::Advanced),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Mock Test Analytics "))
    .alignment(Alignment::Center);
    f.render_widget(tabs, chunks[0]);

    if report.tests_taken == 0 {
        empty_panel(f, chunks[2], exam.name(), "No mock tests recorded for this exam");
        return;
    }

    // Headline numbers
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(chunks[1]);

    let (arrow, trend_color) = match report.trend.direction {
        TrendDirection::Up => ("up", Color::Green),
        TrendDirection::Down => ("down", Color::Red),
        TrendDirection::Stable => ("stable", Color::Gray),
    };
    let stats = [
        ("Tests Taken", report.tests_taken.to_string(), Color::Cyan),
        ("Average", format!("{}%", report.average_score), Color::Cyan),
        ("Best", format!("{}%", report.best_score), Color::Green),
        ("Avg Time", format!("{} min", report.average_time), Color::Cyan),
        (
            "Trend",
            format!("{} {:.1}%", arrow, report.trend.change),
            trend_color,
        ),
    ];
    for ((title, value, color), area) in stats.iter().zip(cards.iter()) {
        let card = Paragraph::new(value.as_str())
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
            .style(Style::default().fg(*color))
            .alignment(Alignment::Center);
        f.render_widget(card, *area);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(body[0]);

    // Subject accuracy
    let lines: Vec<Line> = report
        .subjects
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", s.subject.name()),
                    Style::default().fg(subject_color(s.subject)),
                ),
                Span::raw(format!(
                    "{} avg {:>3}%  best {:.0}%",
                    progress_bar(s.average.min(100) as u8, 20),
                    s.average,
                    s.best
                )),
            ])
        })
        .collect();
    let subjects = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Subject Accuracy "));
    f.render_widget(subjects, left[0]);

    // Test history
    let header = Row::new(vec!["Date", "Score", "%", "Phy", "Chem", "Maths", "Time"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let rows: Vec<Row> = tests_for_exam(&app.data().tests, exam)
        .into_iter()
        .map(|t| {
            Row::new(vec![
                t.date.format(&app.config.display.date_format).to_string(),
                format!("{}/{}", t.score, t.total_marks),
                format!("{:.1}", t.percentage()),
                format!("{}/{}", t.physics.score, t.physics.total),
                format!("{}/{}", t.chemistry.score, t.chemistry.total),
                format!("{}/{}", t.mathematics.score, t.mathematics.total),
                format!("{}m", t.time_spent),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Test History "));
    f.render_widget(table, left[1]);

    // Weak topics
    let items: Vec<ListItem> = report
        .weak_topics
        .iter()
        .enumerate()
        .map(|(i, (topic, count))| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(topic.clone(), Style::default().fg(Color::Red)),
                Span::raw(format!("  ({}x)", count)),
            ]))
        })
        .collect();
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(body[1]);
    let weak = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Focus Areas "));
    f.render_widget(weak, right[0]);

    draw_weak_topic_history(f, app, right[1]);
}

/// Weak topics across every exam type.
fn draw_weak_topic_history(f: &mut Frame, app: &App, area: Rect) {
    let report = weak_topic_details(&app.data().tests);
    let date_format = &app.config.display.date_format;
    let items: Vec<ListItem> = report
        .topics
        .iter()
        .map(|d| {
            let exams: Vec<&str> = d.exam_types.iter().map(|e| e.short()).collect();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:<7}", d.priority.name()),
                        Style::default().fg(priority_color(d.priority)),
                    ),
                    Span::raw(d.topic.clone()),
                    Span::raw(format!("  {}x", d.appearances)),
                ]),
                Line::from(Span::styled(
                    format!("       last {}  {}", d.last_seen.format(date_format), exams.join("/")),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let title = format!(
        " Weak Topics - {} tracked, {} high priority ",
        report.topics.len(),
        report.high_priority
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
