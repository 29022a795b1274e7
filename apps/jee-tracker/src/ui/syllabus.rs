use super::{progress_bar, selected_style, status_color, styled_tab, subject_color};
use crate::app::{App, SyllabusRow};
use crate::models::{ExamType, TopicStatus};
use crate::syllabus::{exam_progress, SubjectProgress};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let progress = exam_progress(&app.data().syllabus, app.syllabus_exam);
    draw_summary(f, app, &progress, chunks[0]);

    let rows = app.syllabus_rows();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = match row {
                SyllabusRow::Subject(subject) => {
                    let expanded =
                        app.topic_filter.is_active() || app.expanded.contains(subject);
                    let p = progress.iter().find(|p| p.subject == Some(*subject));
                    let (percent, mastered, total) =
                        p.map_or((0, 0, 0), |p| (p.percent, p.mastered, p.total));
                    Line::from(vec![
                        Span::raw(if expanded { "v " } else { "> " }),
                        Span::styled(
                            format!("{:<14}", subject.name()),
                            Style::default()
                                .fg(subject_color(*subject))
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!(
                            "{} {:>3}%  ({}/{} mastered)",
                            progress_bar(percent, 20),
                            percent,
                            mastered,
                            total
                        )),
                    ])
                }
                SyllabusRow::Topic(id) => match app.topic(id) {
                    Some(topic) => {
                        let mut spans = vec![
                            Span::raw("    "),
                            Span::styled(
                                format!("{:<13}", topic.status.label()),
                                Style::default().fg(status_color(topic.status)),
                            ),
                            Span::raw(topic.topic.clone()),
                        ];
                        if topic.high_yield {
                            spans.push(Span::styled(" [HY]", Style::default().fg(Color::Yellow)));
                        }
                        spans.push(Span::styled(
                            format!("  {}", topic.subtopics.join(", ")),
                            Style::default().fg(Color::DarkGray),
                        ));
                        Line::from(spans)
                    }
                    None => Line::from(format!("    {}", id)),
                },
            };
            ListItem::new(line).style(selected_style(i == app.selected_index))
        })
        .collect();

    let title = match (app.topic_filter.status, app.topic_filter.search.trim()) {
        (None, "") => " Topics ".to_string(),
        (status, search) => {
            let status = status.map_or("all", |s| s.label());
            format!(" Topics - status: {} - search: '{}' ", status, search)
        }
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_summary(f: &mut Frame, app: &App, progress: &[SubjectProgress], area: Rect) {
    let tabs = Line::from(vec![
        styled_tab("JEE Mains", app.syllabus_exam == ExamType::Mains),
        Span::raw(" "),
        styled_tab("JEE Advanced", app.syllabus_exam == ExamType::Advanced),
    ]);

    let mut counts = vec![];
    for status in TopicStatus::ALL {
        let n: usize = progress.iter().map(|p| p.count(status)).sum();
        counts.push(Span::styled(
            format!("{}: {}  ", status.label(), n),
            Style::default().fg(status_color(status)),
        ));
    }
    let high_yield: usize = progress.iter().map(|p| p.high_yield).sum();
    counts.push(Span::raw(format!("High-yield: {}", high_yield)));

    let summary = Paragraph::new(vec![tabs, Line::from(counts)])
        .block(Block::default().borders(Borders::ALL).title(" Syllabus Progress "));
    f.render_widget(summary, area);
}
