use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::linkify::{linkify, Segment};
use crate::transcript::{Speaker, Status};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let banner_height = match app.transcript.status() {
        Status::Errored(_) => 1,
        _ => 0,
    };

    let [header_area, banner_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(banner_height),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);
    if let Status::Errored(text) = app.transcript.status() {
        let banner = Paragraph::new(Line::from(Span::styled(
            format!("⚠️  {}", text),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(banner, banner_area);
    }
    render_transcript(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Meet Amal",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  •  Your companion at AnNisa.org",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Convert one line of message content into styled spans. URLs become
/// underlined link spans; everything else renders as literal text.
fn linkified_line(text: &str, base_style: Style) -> Line<'static> {
    let spans: Vec<Span<'static>> = linkify(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(s) => Span::styled(s, base_style),
            Segment::Link(url) => Span::styled(
                url,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        })
        .collect();

    Line::from(spans)
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store inner dimensions for scroll arithmetic (minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    // A fresh append pins the viewport to the newest message
    if app.transcript.take_follow() {
        app.scroll_to_latest();
    }

    let mut lines: Vec<Line> = Vec::new();

    for msg in app.transcript.messages() {
        match msg.role {
            Speaker::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(linkified_line(line, Style::default()));
                }
                lines.push(Line::default());
            }
            Speaker::Assistant => {
                lines.push(Line::from(Span::styled(
                    "Amal:",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(linkified_line(line, Style::default()));
                }
                lines.push(Line::default());
            }
        }
    }

    if app.transcript.status().is_pending() {
        lines.push(Line::from(Span::styled(
            "Amal:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        // Typing indicator: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            dots,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Conversation "))
        .wrap(Wrap { trim: true })
        .scroll((app.scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect) {
    let pending = app.transcript.status().is_pending();

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if pending {
            Color::DarkGray
        } else {
            Color::Yellow
        }))
        .title(" Message ");

    // Horizontal scrolling keeps the cursor visible in a single-line box.
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.input.is_empty() && !pending {
        Paragraph::new("Ask about AnNisa.org programs, volunteer opportunities, donations...")
            .style(Style::default().fg(Color::DarkGray))
            .block(input_block)
    } else {
        let visible_text: String = app
            .input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();

        Paragraph::new(visible_text)
            .style(Style::default().fg(Color::Cyan))
            .block(input_block)
    };

    frame.render_widget(input, area);

    if !pending {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " Enter send  •  ↑/↓ scroll  •  Esc quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, area);
}
