use super::{empty_panel, subject_color};
use crate::app::App;
use crate::flashcards::{card_summary, hard_count, is_due};
use crate::models::Difficulty;
use chrono::{Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[0]);

    let subject = app.card_subject.map_or("All subjects", |s| s.name());
    let position = if app.deck.is_empty() {
        "0/0".to_string()
    } else {
        format!("{}/{}", app.deck.position() + 1, app.deck.len())
    };
    let filters = Paragraph::new(Line::from(vec![
        Span::styled(app.study_mode.label(), Style::default().fg(Color::Yellow)),
        Span::raw("  |  "),
        Span::raw(subject),
        Span::raw("  |  "),
        Span::raw(format!("Card {}", position)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Study "))
    .alignment(Alignment::Center);
    f.render_widget(filters, left[0]);

    match app.current_card() {
        Some(card) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(card.subject.name(), Style::default().fg(subject_color(card.subject))),
                    Span::raw(format!(" - {}  ", card.topic)),
                    Span::styled(
                        card.difficulty.name(),
                        Style::default().fg(difficulty_color(card.difficulty)),
                    ),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    card.question.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            if app.deck.is_flipped() {
                lines.push(Line::from(Span::styled(
                    card.answer.clone(),
                    Style::default().fg(Color::Green),
                )));
                lines.push(Line::from(""));
                let hint = if app.deck.is_scored() {
                    "Scored this session"
                } else {
                    "Did you get it? y: correct  n: wrong"
                };
                lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
            } else {
                lines.push(Line::from(Span::styled(
                    "Press Space to reveal the answer",
                    Style::default().fg(Color::DarkGray),
                )));
            }

            let date_format = &app.config.display.date_format;
            let mut review = format!("Next review {}", card.next_review.format(date_format));
            if is_due(card, app.today) {
                review.push_str(" (due)");
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(review, Style::default().fg(Color::DarkGray))));

            let title = if app.deck.is_flipped() { " Answer " } else { " Question " };
            let widget = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(title))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(widget, left[1]);
        }
        None => empty_panel(f, left[1], "Flashcards", "No cards match these filters"),
    }

    draw_sidebar(f, app, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let summary = card_summary(&app.data().flashcards, app.today);

    let mut lines = vec![
        Line::from(Span::styled("Session", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled(format!("Correct: {}", session.correct), Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::styled(format!("Wrong: {}", session.incorrect), Style::default().fg(Color::Red)),
        ]),
        Line::from(format!("Accuracy: {}%", session.accuracy())),
        Line::from(format!("Scored {}/{}", app.deck.scored_count(), app.deck.len())),
        Line::from(Span::styled(
            format!(
                "Started {} ({} min)",
                session.started_at.with_timezone(&Local).format("%H:%M"),
                session.elapsed_minutes(Utc::now())
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled("Collection", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!(
            "{} cards, {} due, {} hard",
            summary.total,
            summary.due,
            hard_count(&app.data().flashcards)
        )),
    ];
    for (subject, n) in &summary.by_subject {
        lines.push(Line::from(Span::styled(
            format!("  {:<12}{}", subject.name(), n),
            Style::default().fg(subject_color(*subject)),
        )));
    }
    for (difficulty, n) in &summary.by_difficulty {
        lines.push(Line::from(Span::styled(
            format!("  {:<12}{}", difficulty.name(), n),
            Style::default().fg(difficulty_color(*difficulty)),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Progress "));
    f.render_widget(widget, area);
}
