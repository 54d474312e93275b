use ratatui::{
    backend::TestBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use crate::config::{Field, Provider};
use crate::mask_key;
use crate::tui::state::{App, Focus};

const BG: Color = Color::Rgb(15, 15, 25);
const BORDER: Color = Color::Rgb(50, 50, 80);

// ── Drawing ───────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(Block::default().style(Style::default().bg(BG)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, chunks[0], app);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    draw_providers(f, cols[0], app);
    draw_form(f, cols[1], app);

    draw_status(f, chunks[2], app);
    draw_footer(f, chunks[3], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(vec![
            Span::styled(" AI SOW Analyzer", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled("  LLM API Key Configuration", Style::default().fg(Color::White)),
            Span::styled(format!("  v{}", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!(" Settings: {}", app.store_label),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let header = Paragraph::new(lines)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(BORDER)))
        .alignment(Alignment::Left);
    f.render_widget(header, area);
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(BORDER)
    }
}

fn draw_providers(f: &mut Frame, area: Rect, app: &mut App) {
    let saved = app.controller.saved_provider();
    let items: Vec<ListItem> = Provider::all()
        .into_iter()
        .map(|p| {
            let marker = if saved == Some(p) { " ●" } else { "" };
            ListItem::new(Line::from(vec![
                Span::raw(p.label()),
                Span::styled(marker, Style::default().fg(Color::Green)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(" LLM Provider ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(focused_border(app.focus == Focus::ProviderList)),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut app.provider_list_state);
}

fn field_line(app: &App, field: Field) -> Line<'static> {
    let input = app.input(field);
    let focused = app.focus == Focus::Field(field);
    let provider = app.selected_provider();
    let masked = field == Field::ApiKey && !app.reveal_key;

    if input.value.is_empty() && !focused {
        return Line::from(Span::styled(
            format!("  {}", provider.placeholder(field)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if !focused {
        let shown = if masked { mask_key(&input.value) } else { input.value.clone() };
        return Line::from(Span::styled(format!("  {shown}"), Style::default().fg(Color::White)));
    }

    let (before, at, after) = input.split_at_cursor();
    let hide = |s: &str| if masked { "•".repeat(s.chars().count()) } else { s.to_string() };
    let at = if at == " " { " ".to_string() } else { hide(at) };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(hide(before), Style::default().fg(Color::White)),
        Span::styled(at, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(hide(after), Style::default().fg(Color::White)),
    ])
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let provider = app.selected_provider();
    let fields = app.visible_fields();

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let title = if provider.profile().requires(*field) {
            format!(" {} ", provider.field_label(*field))
        } else {
            format!(" {} (optional) ", provider.field_label(*field))
        };
        let p = Paragraph::new(field_line(app, *field)).block(
            Block::default()
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .borders(Borders::ALL)
                .border_style(focused_border(app.focus == Focus::Field(*field))),
        );
        f.render_widget(p, rows[i]);
    }

    let mut lines = vec![
        Line::from(Span::styled(format!("  {}", provider.description()), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Ctrl+S ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::styled(format!(" {}", app.controller.save_action_label()), Style::default().fg(Color::White)),
        ]),
    ];
    if app.controller.can_remove() {
        lines.push(Line::from(vec![
            Span::styled("  Ctrl+D ", Style::default().fg(Color::Black).bg(Color::Red)),
            Span::styled(" Remove Configuration", Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    if let Some(status) = app.controller.status_line() {
        lines.push(Line::from(Span::styled(format!("  {status}"), Style::default().fg(Color::Green))));
    }
    let analysis = app.analysis.borrow();
    lines.push(Line::from(Span::styled(
        format!("  {}", analysis.describe()),
        Style::default().fg(if analysis.is_ready() { Color::Green } else { Color::Yellow }),
    )));

    let summary = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Configuration ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(summary, rows[fields.len()]);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let color = if app.status_is_error { Color::Red } else { Color::Green };
    let status = Paragraph::new(format!(" {}", app.status))
        .style(Style::default().fg(color).bg(BG));
    f.render_widget(status, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let hint = match app.focus {
        Focus::ProviderList => " ↑↓ Provider   Tab Next field   Ctrl+S Save   q/Esc Quit ",
        Focus::Field(Field::ApiKey) => " Tab Next field   Enter/Ctrl+S Save   Ctrl+V Paste   Ctrl+T Show key   Esc Quit ",
        Focus::Field(_) => " Tab Next field   Enter/Ctrl+S Save   Ctrl+V Paste   Esc Quit ",
    };
    let footer = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray).bg(BG))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

/// Renders one frame into an off-screen buffer.
pub fn render_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("TestBackend terminal");
    terminal.draw(|f| draw(f, app)).expect("draw");
    terminal.backend().buffer().clone()
}
