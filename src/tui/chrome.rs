// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Focus, title, footer, help, and dialog helpers used by TUI rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Distribution,
    Similarity(usize),
}

fn panel_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn footer_help_line(app: &App, toast: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    if app.dialog.is_open() {
        push_footer_entry(&mut spans, "TOGGLE", "Space");
        push_footer_entry(&mut spans, "ALL/NONE", "a/n");
        push_footer_entry(&mut spans, "APPLY", "⏎");
        push_footer_entry(&mut spans, "CANCEL", "Esc");
    } else {
        match app.focus {
            Focus::Distribution => {
                push_footer_entry(&mut spans, "COLUMN", "←→");
                push_footer_entry(&mut spans, "REFERENCE", "⏎");
            }
            Focus::Similarity(_) => {
                push_footer_entry(&mut spans, "NODE", "↑↓");
                push_footer_entry(&mut spans, "COMPARE", "⏎");
            }
        }
        push_footer_entry(&mut spans, "FOCUS", "Tab");
        push_footer_entry(&mut spans, "CONTENT", "c");
        push_footer_entry(&mut spans, "TOPIC", "t/T");
        push_footer_entry(&mut spans, "GROUPS", "g");
        push_footer_entry(&mut spans, "REFRESH", "r");
        push_footer_entry(&mut spans, "YANK", "y");
        push_footer_entry(&mut spans, "HELP", "?");
        push_footer_entry(&mut spans, "QUIT", "q");
    }

    let toast = toast.trim();
    if !toast.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(toast.to_owned()));
    }

    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Help (toggle)"),
            ("q", "Quit"),
            ("c", "Next collection"),
            ("t/T", "Next/previous topic"),
            ("Tab/Shift-Tab", "Focus next/previous chart"),
            ("g", "Semantic group filter"),
            ("r", "Refresh distribution (reload annotations)"),
            ("y", "Yank reference article id"),
        ],
    ),
    (
        "Distribution",
        &[
            ("←/→ or h/l", "Move column cursor"),
            ("Enter/Space", "Select reference article"),
        ],
    ),
    (
        "Similarity network",
        &[
            ("↑/↓ or j/k", "Move node cursor"),
            ("Enter/Space", "Compare with reference (query node deselects)"),
        ],
    ),
    (
        "Group filter",
        &[
            ("↑/↓ or j/k", "Move cursor"),
            ("Space", "Toggle group"),
            ("a/n", "Check all/none"),
            ("Enter", "Apply filter"),
            ("Esc", "Cancel"),
        ],
    ),
    ("Help", &[("j/k, ↑/↓, Home", "Scroll help"), ("Esc/?", "Close help")]),
];

fn render_help(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let area = centered_rect(76, 80, area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = HELP_SECTIONS
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (idx, (section, entries)) in HELP_SECTIONS.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!("--- {section} ---"), header_style)));
        for (key, desc) in entries.iter() {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(Style::default().fg(FOCUS_COLOR));
    let inner = block.inner(area);
    app.help_viewport_height = inner.height;
    let max_scroll = lines
        .len()
        .saturating_sub(inner.height.max(1) as usize)
        .min(u16::MAX as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_dialog(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let area = centered_rect(56, 70, area);
    frame.render_widget(Clear, area);

    let lines = app
        .dialog
        .options()
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if option.checked { "◼" } else { "◻" };
            let mut style = Style::default();
            if idx == app.dialog.cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(format!("{marker} "), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("{:<5}", option.id.as_str()), style.fg(FOOTER_KEY_COLOR)),
                Span::styled(option.name.to_owned(), style),
            ])
        })
        .collect::<Vec<_>>();

    let title = format!(
        "─ Semantic groups ({}/{}) ",
        app.dialog.checked_count(),
        app.dialog.options().len()
    );
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(FOCUS_COLOR)),
    );
    frame.render_widget(dialog, area);
}
