use super::{empty_panel, progress_bar, subject_color};
use crate::app::App;
use crate::calendar::relative_label;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.dashboard_summary();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(9),
        ])
        .split(area);

    // Stat cards
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(rows[0]);

    let stats = [
        ("Syllabus", format!("{}% complete", summary.overall_progress)),
        (
            "Streak",
            format!("{} days (best {})", summary.current_streak, summary.longest_streak),
        ),
        ("Study Hours", format!("{}h total", summary.study_hours)),
        (
            "Level",
            format!("Lv {} - {} XP", summary.level.level, summary.level.xp),
        ),
        (
            "Countdown",
            format!("{} days to {}", summary.countdown.days_left, summary.countdown.label),
        ),
    ];
    for ((title, value), area) in stats.iter().zip(cards.iter()) {
        let card = Paragraph::new(value.as_str())
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(card, *area);
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    // Today's tasks
    let title = format!(
        " Today's Tasks ({}/{}) ",
        summary.tasks_done, summary.tasks_total
    );
    if summary.todays_tasks.is_empty() {
        empty_panel(f, middle[0], title.trim(), "No study blocks scheduled today");
    } else {
        let items: Vec<ListItem> = summary
            .todays_tasks
            .iter()
            .map(|task| {
                let (mark, style) = if task.completed {
                    (
                        "[x]",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ]", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, Style::default().fg(Color::Green)),
                    Span::raw(format!(" {:<12} ", task.slot.to_string())),
                    Span::styled(
                        format!("{:<6}", task.subject.short()),
                        Style::default().fg(subject_color(task.subject)),
                    ),
                    Span::styled(task.topic.clone(), style),
                ]))
            })
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(list, middle[0]);
    }

    // Goals
    let date_format = &app.config.display.date_format;
    let goal_lines: Vec<Line> = summary
        .goals
        .iter()
        .flat_map(|goal| {
            vec![
                Line::from(vec![
                    Span::styled(goal.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {}", relative_label(goal.deadline, app.today, date_format)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(format!("{} {}%", progress_bar(goal.progress, 20), goal.progress)),
            ]
        })
        .collect();
    let goals = Paragraph::new(goal_lines)
        .block(Block::default().borders(Borders::ALL).title(" Goals "));
    f.render_widget(goals, middle[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[2]);

    // Latest mock test
    match &summary.latest_test {
        Some(test) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("{}/{}", test.score, test.total_marks),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {:.1}% accuracy", test.accuracy)),
                ]),
                Line::from(Span::styled(
                    format!("{} - {}", test.exam.name(), test.date.format(date_format)),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from("Weak topics:"),
            ];
            lines.extend(
                test.weak_topics
                    .iter()
                    .map(|t| Line::from(Span::styled(format!("  {}", t), Style::default().fg(Color::Red)))),
            );
            let widget = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(" Latest Mock Test "));
            f.render_widget(widget, bottom[0]);
        }
        None => empty_panel(f, bottom[0], "Latest Mock Test", "No tests taken yet"),
    }

    // Mains subject progress
    let progress_lines: Vec<Line> = summary
        .mains_progress
        .iter()
        .filter_map(|p| p.subject.map(|s| (s, p)))
        .flat_map(|(subject, p)| {
            vec![
                Line::from(Span::styled(
                    format!("{} ({}/{})", subject, p.mastered, p.total),
                    Style::default().fg(subject_color(subject)),
                )),
                Line::from(format!("{} {}%", progress_bar(p.percent, 18), p.percent)),
            ]
        })
        .collect();
    let progress = Paragraph::new(progress_lines)
        .block(Block::default().borders(Borders::ALL).title(" JEE Mains Progress "));
    f.render_widget(progress, bottom[1]);

    // Quote
    let quote_lines = match app.current_quote() {
        Some(quote) => vec![
            Line::from(Span::styled(
                format!("\"{}\"", quote.quote),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Tip: {}", quote.tip),
                Style::default().fg(Color::Yellow),
            )),
        ],
        None => vec![Line::from("Stay consistent.")],
    };
    let quote = Paragraph::new(quote_lines)
        .block(Block::default().borders(Borders::ALL).title(" Motivation "))
        .wrap(Wrap { trim: true });
    f.render_widget(quote, bottom[2]);
}

#[cfg(test)]
mod tests {
    use crate::ui::tests::{press, render, test_app};
    use crossterm::event::KeyCode;

    #[test]
    fn test_dashboard_shows_overview() {
        let mut app = test_app();
        let screen = render(&mut app);
        assert!(screen.contains("15% complete"));
        assert!(screen.contains("Today's Tasks (2/3)"));
        assert!(screen.contains("Mechanics Revision"));
        assert!(screen.contains("245/300"));
        assert!(screen.contains("Thermodynamics"));
        assert!(screen.contains("Physics (1/5)"));
    }

    #[test]
    fn test_quote_advances() {
        let mut app = test_app();
        let first = app.current_quote().unwrap().quote.clone();
        press(&mut app, KeyCode::Char('n'));
        assert_ne!(app.current_quote().unwrap().quote, first);
    }
}
