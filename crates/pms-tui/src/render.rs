//! Draws a [`ViewDescription`] onto a ratatui frame.
//!
//! Pure: reads the description and draws; never mutates state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::features::login::LoginField;
use crate::view::{DashboardView, LoginView, Tone, ViewDescription};

const LOGIN_WIDTH: u16 = 56;
const LOGIN_HEIGHT: u16 = 16;

pub fn render(view: &ViewDescription, frame: &mut Frame) {
    match view {
        ViewDescription::Login(login) => render_login(login, frame),
        ViewDescription::Dashboard(dashboard) => render_dashboard(dashboard, frame),
    }
}

pub(crate) fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::Gray,
        Tone::Error => Color::Red,
        Tone::Admin => Color::Magenta,
        Tone::Manager => Color::Blue,
        Tone::Guest => Color::Green,
        Tone::Warning => Color::Yellow,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::Cyan)),
        Span::styled(format!(" {value} "), value_style),
    ])
}

fn render_login(view: &LoginView, frame: &mut Frame) {
    let area = centered(frame.area(), LOGIN_WIDTH, LOGIN_HEIGHT);

    let submit_style = match (view.submit_enabled, view.focus == LoginField::Submit) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Cyan),
    };

    let status = match &view.status {
        Some(status) => Line::styled(
            status.text.as_str(),
            Style::default().fg(tone_color(status.tone)),
        ),
        None => Line::default(),
    };

    let lines = vec![
        Line::styled(view.subtitle, Style::default().fg(Color::Gray)),
        Line::default(),
        field_line("Username", &view.username, view.focus == LoginField::Username),
        Line::default(),
        field_line("Password", &view.password_mask, view.focus == LoginField::Password),
        Line::default(),
        status,
        Line::default(),
        Line::from(Span::styled(format!("[ {} ]", view.submit_label), submit_style))
            .alignment(Alignment::Center),
        Line::default(),
        Line::styled(view.hint, Style::default().fg(Color::DarkGray)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(view.title).alignment(Alignment::Center))
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_dashboard(view: &DashboardView, frame: &mut Frame) {
    let [header_area, panel_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let header = &view.header;
    let header_block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(header.title).style(Style::default().add_modifier(Modifier::BOLD)));
    let header_line = Line::from(vec![
        Span::raw(header.logged_in_as()),
        Span::raw("  "),
        Span::styled(
            format!("[ {} (l) ]", header.logout_label),
            Style::default().fg(Color::Red),
        ),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(Paragraph::new(header_line).block(header_block), header_area);

    let panel = &view.panel;
    let color = tone_color(panel.tone);
    let mut lines = vec![Line::from(panel.body.as_str()), Line::default()];
    if let Some(note) = &panel.note {
        lines.push(Line::styled(
            note.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(note.detail.as_str()));
    }
    let panel_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Line::styled(
            panel.heading.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block)
            .wrap(Wrap { trim: true }),
        panel_area,
    );

    let footer = Line::styled(" l logout · q quit", Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(footer), footer_area);
}
