// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts a [`BiolinksViewer`] in a ratatui + crossterm shell. Annotation loads are spawned
//! on the tokio runtime and their outcomes are fed back to the viewer on the UI thread.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::config::{ConfigError, ViewerOptions};
use crate::dialog::{DialogOutcome, GroupsDialog};
use crate::loader::{load_batch, AnnotationSource, LoadOutcome, LoadRequest};
use crate::state::ViewStage;
use crate::stats::{BiolinksStatistics, DistributionMatrix};
use crate::viewer::BiolinksViewer;

mod charts;

use charts::{AnnotationView, SimilarityView, TerminalCharts};

const FOCUS_COLOR: Color = Color::LightGreen;
const MUTED_COLOR: Color = Color::DarkGray;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const GROUP_COL_WIDTH: usize = 6;
const MATRIX_COL_WIDTH: usize = 16;
const SCORE_BAR_WIDTH: usize = 10;
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Runs the interactive terminal UI until the user quits.
///
/// Must be called off the runtime's worker threads (e.g. from `spawn_blocking`); load
/// batches are spawned onto `runtime`.
pub fn run(
    options: ViewerOptions,
    source: Arc<dyn AnnotationSource>,
    runtime: Handle,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(options)?;
    let mut terminal = TerminalSession::new()?;
    let (outcomes_tx, mut outcomes_rx) = mpsc::unbounded_channel::<LoadOutcome>();

    while !app.should_quit {
        for request in app.take_load_requests() {
            spawn_load(&runtime, source.clone(), request, outcomes_tx.clone());
        }
        while let Ok(outcome) = outcomes_rx.try_recv() {
            app.complete_load(outcome);
        }

        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn spawn_load(
    runtime: &Handle,
    source: Arc<dyn AnnotationSource>,
    request: LoadRequest,
    outcomes: mpsc::UnboundedSender<LoadOutcome>,
) {
    tracing::info!(
        generation = %request.generation,
        articles = request.plan.len(),
        "annotation load started"
    );
    runtime.spawn(async move {
        let outcome = load_batch(source.as_ref(), request).await;
        tracing::info!(
            generation = %outcome.generation,
            requested = outcome.requested,
            failed = outcome.failed,
            "annotation load finished"
        );
        // The UI may already be gone; nothing left to update then.
        let _ = outcomes.send(outcome);
    });
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    viewer: BiolinksViewer<TerminalCharts>,
    dialog: GroupsDialog,
    focus: Focus,
    pending_loads: Vec<LoadRequest>,
    show_help: bool,
    help_scroll: u16,
    help_viewport_height: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(options: ViewerOptions) -> Result<Self, ConfigError> {
        let dialog = GroupsDialog::for_options(&options);
        let mut viewer =
            BiolinksViewer::new(options, TerminalCharts, Box::new(BiolinksStatistics))?;
        let request = viewer.start();

        Ok(Self {
            viewer,
            dialog,
            focus: Focus::Distribution,
            pending_loads: vec![request],
            show_help: false,
            help_scroll: 0,
            help_viewport_height: 0,
            toast: None,
            should_quit: false,
        })
    }

    fn take_load_requests(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.pending_loads)
    }

    fn queue_load(&mut self, request: Option<LoadRequest>) {
        if let Some(request) = request {
            self.pending_loads.push(request);
        }
    }

    fn complete_load(&mut self, outcome: LoadOutcome) {
        if self.viewer.complete_load(outcome) {
            self.ensure_focus_visible();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll_by(-1),
                KeyCode::Home => self.help_scroll = 0,
                _ => {}
            }
            return false;
        }

        if self.dialog.is_open() {
            self.handle_dialog_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            KeyCode::Char('c') => self.cycle_content(),
            KeyCode::Char('t') => self.cycle_topic(1),
            KeyCode::Char('T') => self.cycle_topic(-1),
            KeyCode::Char('g') => self.dialog.show(self.viewer.state().group_filter()),
            KeyCode::Char('r') => {
                let request = self.viewer.refresh_distribution();
                self.queue_load(request);
            }
            KeyCode::Char('y') => self.yank_reference_id(),
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_focused(),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            _ => {}
        }

        self.ensure_focus_visible();
        false
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.dialog.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.dialog.move_down(),
            KeyCode::Char(' ') => self.dialog.toggle(),
            KeyCode::Char('a') => self.dialog.set_all(true),
            KeyCode::Char('n') => self.dialog.set_all(false),
            KeyCode::Enter => {
                if let DialogOutcome::Applied(filter) = self.dialog.apply() {
                    let groups = filter.len();
                    let request = self.viewer.apply_group_filter(filter);
                    self.queue_load(request);
                    self.ensure_focus_visible();
                    self.set_toast(format!("Group filter applied ({groups} groups)"));
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.dialog.cancel();
            }
            _ => {}
        }
    }

    fn help_scroll_by(&mut self, delta: i32) {
        if delta < 0 {
            self.help_scroll = self.help_scroll.saturating_sub(delta.unsigned_abs() as u16);
        } else {
            self.help_scroll = self.help_scroll.saturating_add(delta as u16);
        }
    }

    fn cycle_content(&mut self) {
        let labels = self
            .viewer
            .options()
            .content
            .iter()
            .map(|content| content.label.clone())
            .collect::<Vec<_>>();
        if labels.len() < 2 {
            self.set_toast("Only one collection configured");
            return;
        }
        let current = labels
            .iter()
            .position(|label| label == self.viewer.state().content())
            .unwrap_or(0);
        let next = labels[(current + 1) % labels.len()].clone();
        let request = self.viewer.select_content(&next);
        self.focus = Focus::Distribution;
        self.queue_load(request);
    }

    fn cycle_topic(&mut self, step: isize) {
        let topics = self
            .viewer
            .options()
            .topics_for(self.viewer.state().content())
            .iter()
            .map(|topic| topic.id.clone())
            .collect::<Vec<_>>();
        if topics.len() < 2 {
            self.set_toast("No other topic in this collection");
            return;
        }
        let current = self
            .viewer
            .state()
            .topic()
            .and_then(|topic| topics.iter().position(|candidate| candidate == topic))
            .unwrap_or(0);
        let len = topics.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        let request = self.viewer.select_topic(&topics[next]);
        self.focus = Focus::Distribution;
        self.queue_load(request);
    }

    fn similarity_focusable(&self) -> usize {
        if self.viewer.visibility().similarity {
            self.viewer.similarity_slots().len()
        } else {
            0
        }
    }

    fn cycle_focus(&mut self, step: isize) {
        let slots = self.similarity_focusable();
        let positions = 1 + slots as isize;
        let current = match self.focus {
            Focus::Distribution => 0,
            Focus::Similarity(slot) => 1 + slot as isize,
        };
        self.focus = match (current + step).rem_euclid(positions) {
            0 => Focus::Distribution,
            slot => Focus::Similarity(slot as usize - 1),
        };
    }

    fn ensure_focus_visible(&mut self) {
        if let Focus::Similarity(slot) = self.focus {
            if slot >= self.similarity_focusable() {
                self.focus = Focus::Distribution;
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Distribution => self.viewer.distribution_chart_mut().move_cursor(delta),
            Focus::Similarity(slot) => {
                if let Some(slot) = self.viewer.similarity_slots_mut().get_mut(slot) {
                    slot.chart_mut().move_cursor(delta);
                }
            }
        }
    }

    fn activate_focused(&mut self) {
        let event = match self.focus {
            Focus::Distribution => self.viewer.distribution_chart_mut().activate(),
            Focus::Similarity(slot) => self
                .viewer
                .similarity_slots_mut()
                .get_mut(slot)
                .and_then(|slot| slot.chart_mut().activate()),
        };
        let Some(event) = event else {
            return;
        };
        if !self.viewer.handle_event(event) {
            self.set_toast("Selection not available");
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn reference_id(&self) -> Option<String> {
        let article = self.viewer.reference_article()?;
        let content = self.viewer.active_content()?;
        Some(content.prefixed_id(&article.id))
    }

    fn yank_reference_id(&mut self) {
        let Some(reference) = self.reference_id() else {
            self.set_toast("No reference article selected");
            return;
        };

        match copy_to_clipboard(&reference) {
            Ok(backend) => self.set_toast(format!("Yanked {reference} ({backend})")),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Distribution,
    ReferenceHeadline,
    Similarity,
    ReferenceAnnotations,
    ComparedHeadline,
    ComparedAnnotations,
    Footer,
}

fn layout_sections(app: &App) -> Vec<(Section, Constraint)> {
    let visibility = app.viewer.visibility();
    let mut sections = vec![
        (Section::Header, Constraint::Length(2)),
        (Section::Distribution, Constraint::Min(6)),
        (Section::ReferenceHeadline, Constraint::Length(1)),
    ];
    if visibility.similarity {
        sections.push((Section::Similarity, Constraint::Percentage(30)));
    }
    if visibility.annotation_group() {
        if visibility.reference_annotations {
            sections.push((Section::ReferenceAnnotations, Constraint::Percentage(18)));
        }
        if visibility.similarity {
            sections.push((Section::ComparedHeadline, Constraint::Length(1)));
        }
        if visibility.compared_annotations {
            sections.push((Section::ComparedAnnotations, Constraint::Percentage(18)));
        }
    }
    sections.push((Section::Footer, Constraint::Length(1)));
    sections
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let sections = layout_sections(app);
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(sections.iter().map(|(_, constraint)| *constraint).collect::<Vec<_>>())
        .split(area);

    for ((section, _), section_area) in sections.iter().zip(areas.iter().copied()) {
        match section {
            Section::Header => {
                frame.render_widget(Paragraph::new(header_lines(app)), section_area);
            }
            Section::Distribution => render_distribution(frame, app, section_area),
            Section::ReferenceHeadline => {
                let line = headline_line("Reference", &app.viewer.reference_headline());
                frame.render_widget(Paragraph::new(line), section_area);
            }
            Section::Similarity => render_similarity(frame, app, section_area),
            Section::ReferenceAnnotations => {
                let views = app
                    .viewer
                    .reference_slots()
                    .iter()
                    .map(|slot| slot.chart())
                    .collect::<Vec<_>>();
                render_annotation_row(frame, &views, section_area);
            }
            Section::ComparedHeadline => {
                let line = headline_line("Compared", &app.viewer.compared_headline());
                frame.render_widget(Paragraph::new(line), section_area);
            }
            Section::ComparedAnnotations => {
                let views = app
                    .viewer
                    .compared_slots()
                    .iter()
                    .map(|slot| slot.chart())
                    .collect::<Vec<_>>();
                render_annotation_row(frame, &views, section_area);
            }
            Section::Footer => {
                let toast = active_toast(app);
                frame.render_widget(Paragraph::new(footer_help_line(app, &toast)), section_area);
            }
        }
    }

    if app.dialog.is_open() {
        render_dialog(frame, app, area);
    }
    if app.show_help {
        render_help(frame, app, area);
    }

    // Terminal graphs are laid out in one pass.
    for slot in app.viewer.similarity_slots_mut() {
        slot.chart_mut().settle();
    }
}

fn active_toast(app: &mut App) -> String {
    match app.toast.as_ref() {
        Some(toast) if toast.expires_at > Instant::now() => toast.message.clone(),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    }
}

fn header_lines(app: &App) -> Vec<Line<'static>> {
    let viewer = &app.viewer;
    let content = viewer
        .active_content()
        .map(|content| content.text.clone())
        .unwrap_or_default();
    let topic = viewer
        .state()
        .topic()
        .and_then(|topic| {
            viewer
                .options()
                .topics_for(viewer.state().content())
                .iter()
                .find(|candidate| &candidate.id == topic)
        })
        .map(|topic| topic.text.clone())
        .unwrap_or_else(|| "-".to_owned());

    let mut title = vec![
        Span::styled(
            viewer.options().title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("[c] ", Style::default().fg(FOOTER_KEY_COLOR)),
        Span::raw(content),
        Span::raw("  "),
        Span::styled("[t] ", Style::default().fg(FOOTER_KEY_COLOR)),
        Span::raw(topic),
    ];
    if viewer.is_loading() {
        title.push(Span::styled(
            format!("  loading {}…", viewer.generation()),
            Style::default().fg(HIGHLIGHT_COLOR),
        ));
    }

    let filter = viewer.state().group_filter();
    let known = viewer.options().known_groups().len();
    let mut status = vec![Span::styled(
        format!("Groups {}/{known}", filter.len()),
        Style::default().fg(MUTED_COLOR),
    )];
    if viewer.state().refresh_mode() {
        status.push(Span::styled(" (refresh pending)", Style::default().fg(MUTED_COLOR)));
    }
    if !viewer.is_loading() {
        status.push(Span::raw("  "));
        status.push(Span::styled(
            stage_hint(viewer.state().stage(), viewer.visibility().similarity),
            Style::default().fg(FOCUS_COLOR),
        ));
    }

    vec![Line::from(title), Line::from(status)]
}

fn stage_hint(stage: ViewStage, similarity: bool) -> &'static str {
    match stage {
        ViewStage::ContentSelected => "No topic in this collection",
        ViewStage::TopicSelected => "Pick a reference column",
        ViewStage::ReferenceSelected if similarity => "Pick a node to compare",
        ViewStage::ReferenceSelected => "Reference selected",
        ViewStage::ComparedSelected => "Comparing articles",
    }
}

fn headline_line(label: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::styled(text.to_owned(), Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn render_distribution(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Distribution;
    let header = app
        .viewer
        .active_content()
        .map(|content| format!("Distribution - {}", content.text))
        .unwrap_or_else(|| "Distribution".to_owned());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title(&header, None))
        .border_style(panel_border_style(focused));

    let view = app.viewer.distribution_chart();
    let lines = match view.data() {
        None if app.viewer.is_loading() => {
            vec![Line::styled("Loading annotations…", Style::default().fg(MUTED_COLOR))]
        }
        None => vec![Line::styled(
            "No annotations for this topic",
            Style::default().fg(MUTED_COLOR),
        )],
        Some(data) if data.is_empty() => vec![Line::styled(
            "No article matches the selected groups",
            Style::default().fg(MUTED_COLOR),
        )],
        Some(data) => distribution_lines(data, view, focused),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn distribution_lines(
    data: &DistributionMatrix,
    view: &charts::DistributionView,
    focused: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(data.groups.len() + 3);

    let mut header = vec![Span::raw(" ".repeat(GROUP_COL_WIDTH))];
    for (column, entry) in data.columns.iter().enumerate() {
        let label = pad_cell(&view.column_label(&entry.id), MATRIX_COL_WIDTH);
        header.push(Span::styled(
            label,
            column_style(view, column, &entry.id, focused).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(header));

    for (row, group) in data.groups.iter().enumerate() {
        let mut spans = vec![Span::styled(
            pad_cell(group.as_str(), GROUP_COL_WIDTH),
            Style::default().fg(FOOTER_LABEL_COLOR),
        )];
        for (column, entry) in data.columns.iter().enumerate() {
            let value = data.value(row, column);
            spans.push(Span::styled(
                pad_cell(&share_cell(value), MATRIX_COL_WIDTH),
                column_style(view, column, &entry.id, focused),
            ));
        }
        lines.push(Line::from(spans));
    }

    if let Some(column) = data.columns.get(view.cursor()) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(FOCUS_COLOR)),
            Span::raw(column.title.clone()),
        ]));
        if let Some(url) = view.column_url(&column.id) {
            lines.push(Line::styled(format!("  {url}"), Style::default().fg(MUTED_COLOR)));
        }
    }
    lines
}

fn column_style(
    view: &charts::DistributionView,
    column: usize,
    id: &crate::model::ArticleId,
    focused: bool,
) -> Style {
    let mut style = Style::default();
    if view.selected() == Some(id) {
        style = style.fg(FOCUS_COLOR);
    }
    if focused && view.cursor() == column {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn render_similarity(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let slots = app.viewer.similarity_slots();
    if slots.is_empty() {
        return;
    }
    let areas = split_even(area, slots.len());
    for (idx, (slot, slot_area)) in slots.iter().zip(areas.iter().copied()).enumerate() {
        let focused = app.focus == Focus::Similarity(idx);
        render_similarity_slot(frame, slot.chart(), focused, slot_area);
    }
}

fn render_similarity_slot(frame: &mut Frame<'_>, view: &SimilarityView, focused: bool, area: Rect) {
    let tail = view.is_settling().then_some("~");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title(view.header(), tail))
        .border_style(panel_border_style(focused));

    let Some(graph) = view.data() else {
        let empty = Paragraph::new(Line::styled(
            "No annotations for the reference article",
            Style::default().fg(MUTED_COLOR),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = graph
        .nodes()
        .enumerate()
        .map(|(idx, node)| {
            let is_query = idx == 0;
            let marker = if is_query {
                "◆"
            } else if view.selected() == Some(&node.id) {
                "●"
            } else {
                "○"
            };
            let mut style = Style::default();
            if focused && view.cursor() == idx {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if view.selected() == Some(&node.id) && !is_query {
                style = style.fg(FOCUS_COLOR);
            }
            let score = if is_query {
                " ".repeat(SCORE_BAR_WIDTH + 5)
            } else {
                format!("{} {:>4.2}", score_bar(node.score), node.score)
            };
            Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(pad_cell(&view.node_label(node), MATRIX_COL_WIDTH), style),
                Span::styled(score, Style::default().fg(MUTED_COLOR)),
                Span::raw(" "),
                Span::styled(node.title.clone(), style),
            ])
        })
        .collect::<Vec<_>>();
    if focused {
        if let Some(url) = view.cursor_url() {
            lines.push(Line::styled(format!("▸ {url}"), Style::default().fg(MUTED_COLOR)));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_annotation_row(frame: &mut Frame<'_>, views: &[&AnnotationView], area: Rect) {
    if views.is_empty() {
        return;
    }
    let areas = split_even(area, views.len());
    for (view, slot_area) in views.iter().zip(areas.iter().copied()) {
        render_annotation_slot(frame, view, slot_area);
    }
}

fn render_annotation_slot(frame: &mut Frame<'_>, view: &AnnotationView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title(view.header(), None))
        .border_style(Style::default().fg(MUTED_COLOR));

    if !view.is_rendered() {
        let empty = Paragraph::new(Line::styled(
            "No annotations for this article",
            Style::default().fg(MUTED_COLOR),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut spans = Vec::new();
    for annotation in view.terms() {
        let style = if view.is_highlighted(annotation) {
            Style::default()
                .fg(HIGHLIGHT_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(annotation.text.clone(), style));
        spans.push(Span::styled(
            format!("({})  ", annotation.count),
            Style::default().fg(MUTED_COLOR),
        ));
    }

    let cloud = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(cloud, area);
}

fn split_even(area: Rect, parts: usize) -> Vec<Rect> {
    let parts = parts.max(1);
    let share = (100 / parts) as u16;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(share); parts])
        .split(area)
        .to_vec()
}

fn share_cell(value: f64) -> String {
    const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
    let level = (value * (SHADES.len() - 1) as f64).round() as usize;
    let shade = SHADES[level.min(SHADES.len() - 1)];
    let percent = (value * 100.0).round() as u32;
    format!("{}{}{} {percent:>3}%", shade, shade, shade)
}

fn score_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0)) * SCORE_BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(SCORE_BAR_WIDTH - filled))
}

fn pad_cell(text: &str, width: usize) -> String {
    let mut cell = text.chars().take(width.saturating_sub(1)).collect::<String>();
    let len = cell.chars().count();
    cell.push_str(&" ".repeat(width - len));
    cell
}

// Titles, footer, help and dialog overlays.
include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
