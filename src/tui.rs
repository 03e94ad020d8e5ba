use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::client::{Recommendation, RecommendationSource};
use crate::form::{CheckboxGroup, FormState, SelectField};
use crate::state::{Controller, Event, NoticeKind, Panel, LOAD_FAILED};
use crate::view::{PostingCard, NO_RESULTS_HINT, NO_RESULTS_TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Education,
    Location,
    Skill(usize),
    Interest(usize),
    Submit,
}

struct AppState {
    form: FormState,
    rows: Vec<Row>,
    focus: usize,
    controller: Controller,
    selected: usize,
    pending: Option<Receiver<Recommendation>>,
    notice_area: Option<Rect>,
    okay_area: Option<Rect>,
}

impl AppState {
    fn new() -> Self {
        let form = FormState::default();
        let mut rows = vec![Row::Education, Row::Location];
        rows.extend((0..form.skills.options.len()).map(Row::Skill));
        rows.extend((0..form.interests.options.len()).map(Row::Interest));
        rows.push(Row::Submit);
        Self {
            form,
            rows,
            focus: 0,
            controller: Controller::new(),
            selected: 0,
            pending: None,
            notice_area: None,
            okay_area: None,
        }
    }

    fn focused(&self) -> Row {
        self.rows.get(self.focus).copied().unwrap_or(Row::Submit)
    }

    fn cards(&self) -> &[PostingCard] {
        match self.controller.panel() {
            Panel::Results(cards) => cards,
            _ => &[],
        }
    }

    fn next(&mut self) {
        match self.controller.panel() {
            Panel::Form if self.focus + 1 < self.rows.len() => self.focus += 1,
            Panel::Results(cards) if self.selected + 1 < cards.len() => self.selected += 1,
            _ => {}
        }
    }

    fn prev(&mut self) {
        match self.controller.panel() {
            Panel::Form => self.focus = self.focus.saturating_sub(1),
            Panel::Results(_) => self.selected = self.selected.saturating_sub(1),
            _ => {}
        }
    }

    fn cycle(&mut self, forward: bool) {
        let field: &mut SelectField = match self.focused() {
            Row::Education => &mut self.form.education,
            Row::Location => &mut self.form.location,
            _ => return,
        };
        if forward {
            field.next()
        } else {
            field.prev()
        }
    }

    fn activate(&mut self, source: &Arc<dyn RecommendationSource>) {
        match self.focused() {
            Row::Education | Row::Location => self.cycle(true),
            Row::Skill(i) => self.form.skills.toggle(i),
            Row::Interest(i) => self.form.interests.toggle(i),
            Row::Submit => self.submit(source),
        }
    }

    fn submit(&mut self, source: &Arc<dyn RecommendationSource>) {
        let Some(profile) = self.controller.submit(self.form.collect()) else { return };
        tracing::info!(
            education = %profile.education,
            location = %profile.location,
            skills = profile.skills.len(),
            interests = profile.interests.len(),
            "requesting recommendations"
        );

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(source);
        thread::spawn(move || {
            let _ = tx.send(source.recommend(&profile));
        });
        self.pending = Some(rx);
    }

    fn poll_pending(&mut self) {
        let Some(rx) = &self.pending else { return };
        let event = match rx.try_recv() {
            Ok(recommendation) => {
                if let Recommendation::Fallback { reason, .. } = &recommendation {
                    tracing::info!("showing offline catalog matches ({})", reason);
                }
                Event::Loaded(recommendation.into_postings())
            }
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("recommendation worker exited without a result");
                Event::Failed(LOAD_FAILED.to_string())
            }
        };
        self.pending = None;
        self.selected = 0;
        self.controller.dispatch(event);
    }
}

pub fn run_form(source: Arc<dyn RecommendationSource>) -> Result<()> {
    let mut state = AppState::new();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, &source);

    // Restore terminal
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    source: &Arc<dyn RecommendationSource>,
) -> Result<()> {
    let mut list_state = ListState::default();

    loop {
        state.poll_pending();
        list_state.select(Some(state.selected));
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            TermEvent::Mouse(mouse) => {
                if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                    continue;
                }
                if let (Some(notice), Some(okay)) = (state.notice_area, state.okay_area) {
                    if click_dismisses(notice, okay, Position::new(mouse.column, mouse.row)) {
                        state.controller.dispatch(Event::Dismiss);
                    }
                }
            }
            TermEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if state.controller.state().notice.is_some() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('o')) {
                        state.controller.dispatch(Event::Dismiss);
                    }
                    continue;
                }

                match (state.controller.panel(), key.code) {
                    (Panel::Loading, _) => {}
                    (_, KeyCode::Char('q') | KeyCode::Esc) => break,
                    (_, KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab) => state.next(),
                    (_, KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab) => state.prev(),
                    (Panel::Form, KeyCode::Right | KeyCode::Char('l')) => state.cycle(true),
                    (Panel::Form, KeyCode::Left | KeyCode::Char('h')) => state.cycle(false),
                    (Panel::Form, KeyCode::Enter | KeyCode::Char(' ')) => state.activate(source),
                    (Panel::Form, KeyCode::Char('s')) => state.submit(source),
                    (Panel::Results(_), KeyCode::Enter | KeyCode::Char('a')) => {
                        if let Some(card) = state.cards().get(state.selected) {
                            let id = card.id;
                            state.controller.dispatch(Event::Apply(id));
                        }
                    }
                    (Panel::Results(_) | Panel::NoResults, KeyCode::Char('n')) => {
                        state.controller.dispatch(Event::NewSearch);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &mut AppState, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let help = match state.controller.panel() {
        Panel::Form => {
            draw_form(frame, state, chunks[0]);
            " j/k:move  h/l:change  space:toggle  s:find internships  q:quit"
        }
        Panel::Loading => {
            let loading = Paragraph::new("\n\nFinding internships that match your profile...")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Please wait "));
            frame.render_widget(loading, chunks[0]);
            ""
        }
        Panel::Results(cards) => {
            draw_results(frame, cards, state.selected, list_state, chunks[0]);
            " j/k:navigate  a:apply  n:new search  q:quit"
        }
        Panel::NoResults => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from(":("),
                Line::from(""),
                Line::from(Span::styled(NO_RESULTS_TITLE, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(NO_RESULTS_HINT),
            ]);
            let empty = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title(" Recommendations "));
            frame.render_widget(empty, chunks[0]);
            " n:new search  q:quit"
        }
    };

    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );

    state.notice_area = None;
    state.okay_area = None;
    if let Some(notice) = &state.controller.state().notice {
        let area = centered_rect(50, 30, frame.area());
        let (body, okay) = notice_layout(area);
        let (icon, color) = match notice.kind {
            NoticeKind::Warning => ("!", Color::Yellow),
            NoticeKind::Info => ("i", Color::Cyan),
        };
        let text = Text::from(vec![
            Line::from(Span::styled(
                format!("[{}] Attention", icon),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(notice.message.as_str()),
        ]);
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                "[ Okay ]",
                Style::default().add_modifier(Modifier::REVERSED),
            ))
            .alignment(Alignment::Center),
            okay,
        );
        state.notice_area = Some(area);
        state.okay_area = Some(okay);
    }
}

/// Splits the bordered notice into its message body and the bottom Okay row.
fn notice_layout(area: Rect) -> (Rect, Rect) {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    (rows[0], rows[1])
}

/// A click closes the notice when it lands outside it or on the Okay row.
fn click_dismisses(notice: Rect, okay: Rect, at: Position) -> bool {
    !notice.contains(at) || okay.contains(at)
}

fn draw_form(frame: &mut Frame, state: &AppState, area: Rect) {
    let focus_style = Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = state
        .rows
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            let mut out = Vec::new();
            match row {
                Row::Skill(0) => out.push(section("Skills")),
                Row::Interest(0) => out.push(section("Areas of interest")),
                Row::Submit => out.push(Line::from("")),
                _ => {}
            }
            let text = match row {
                Row::Education => select_line("Education", &state.form.education),
                Row::Location => select_line("Preferred location", &state.form.location),
                Row::Skill(n) => checkbox_line(&state.form.skills, *n),
                Row::Interest(n) => checkbox_line(&state.form.interests, *n),
                Row::Submit => "  [ Find internships ]".to_string(),
            };
            let style = if i == state.focus { focus_style } else { Style::default() };
            out.push(Line::from(Span::styled(text, style)));
            out
        })
        .collect();

    let form = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Your profile "));
    frame.render_widget(form, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), Style::default().fg(Color::Cyan)))
}

fn select_line(label: &str, field: &SelectField) -> String {
    format!("  {:<20} < {} >", label, field.label())
}

fn checkbox_line(group: &CheckboxGroup, index: usize) -> String {
    let checked = group.checked.get(index).copied().unwrap_or(false);
    let label = group.options.get(index).map(|c| c.label).unwrap_or("?");
    format!("    [{}] {}", if checked { "x" } else { " " }, label)
}

fn draw_results(
    frame: &mut Frame,
    cards: &[PostingCard],
    selected: usize,
    list_state: &mut ListState,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            let score = card.match_score.map(|s| format!("{:>3}%", s)).unwrap_or_else(|| "   -".to_string());
            ListItem::new(format!("{} {} | {}", score, card.title, card.company))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Recommendations ({}) ", cards.len()
        )))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[0], list_state);

    let detail = match cards.get(selected) {
        Some(card) => build_detail(card, chunks[1].width.saturating_sub(4) as usize),
        None => Text::raw("No internship selected"),
    };
    let detail_widget = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail_widget, chunks[1]);
}

fn build_detail(card: &PostingCard, width: usize) -> Text<'_> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        &card.title,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("at {}", card.company)));
    lines.push(Line::from(""));

    for (label, value) in card.details() {
        lines.push(Line::from(format!("{:<10} {}", label, value)));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Why this matches you:",
        Style::default().fg(Color::Green),
    )));
    for line in textwrap::fill(&card.match_reason, width.max(20)).lines() {
        lines.push(Line::from(format!("  {}", line)));
    }
    lines.push(Line::from(""));

    for line in textwrap::fill(&card.summary, width.max(20)).lines() {
        lines.push(Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[ Apply Now ]",
        Style::default().add_modifier(Modifier::REVERSED),
    )));

    Text::from(lines)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
