use super::progress_bar;
use crate::app::App;
use crate::gamification::{badge_counts, completed_achievements, leaderboard, LevelInfo};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // Level gauge
    let info = LevelInfo::from_xp(app.tracker.total_xp());
    let user = &app.data().user;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Level {} - {} XP - {} day streak ",
            info.level, info.xp, user.current_streak
        )))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(info.progress.min(100) as u16)
        .label(format!("{} XP to level {}", info.xp_to_next, info.level + 1));
    f.render_widget(gauge, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[1]);

    draw_badges(f, app, left[0]);
    draw_achievements(f, app, left[1]);
    draw_challenges(f, app, right[0]);
    draw_leaderboard(f, app, right[1]);
}

fn draw_badges(f: &mut Frame, app: &App, area: Rect) {
    let data = app.data();
    let (earned, total) = badge_counts(data.all_badges());
    let date_format = &app.config.display.date_format;

    let items: Vec<ListItem> = data
        .all_badges()
        .map(|b| {
            let line = if b.earned {
                let when = b
                    .earned_date
                    .map(|d| format!("  {}", d.format(date_format)))
                    .unwrap_or_default();
                Line::from(vec![
                    Span::styled("* ", Style::default().fg(Color::Yellow)),
                    Span::styled(b.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(when, Style::default().fg(Color::DarkGray)),
                ])
            } else {
                Line::from(Span::styled(
                    format!("  {} - {}", b.name, b.description),
                    Style::default().fg(Color::DarkGray),
                ))
            };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Badges {}/{} ", earned, total)),
    );
    f.render_widget(list, area);
}

fn draw_achievements(f: &mut Frame, app: &App, area: Rect) {
    let achievements = &app.data().achievements;
    let lines: Vec<Line> = achievements
        .iter()
        .flat_map(|a| {
            vec![
                Line::from(vec![
                    Span::styled(a.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {} ({})", a.description, a.reward),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(format!(
                    "{} {}/{}",
                    progress_bar(a.progress, 20),
                    a.current_value,
                    a.max_value
                )),
            ]
        })
        .collect();

    let title = format!(
        " Achievements {}/{} ",
        completed_achievements(achievements),
        achievements.len()
    );
    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn draw_challenges(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .data()
        .challenges
        .iter()
        .flat_map(|c| {
            vec![
                Line::from(vec![
                    Span::styled(c.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {} left", c.time_left), Style::default().fg(Color::Yellow)),
                ]),
                Line::from(Span::styled(c.description.clone(), Style::default().fg(Color::DarkGray))),
                Line::from(format!("{} {}%  {}", progress_bar(c.progress, 20), c.progress, c.reward)),
            ]
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Weekly Challenges "));
    f.render_widget(widget, area);
}

fn draw_leaderboard(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = leaderboard(&app.data().rivals, app.tracker.total_xp())
        .into_iter()
        .map(|row| {
            let style = if row.is_current_user {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                format!("#{}", row.rank),
                row.name,
                row.xp.to_string(),
                format!("Lv {}", row.level),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["Rank", "Name", "XP", "Level"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(14),
            Constraint::Length(8),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Leaderboard "));
    f.render_widget(table, area);
}
