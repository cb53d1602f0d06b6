//! Screen rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph};

use crate::i18n::Messages;
use crate::tui::state::{
    AdditionalInfoState, AppState, Form, HomeState, ScreenState, SubmitState,
};

const ACCENT: Color = Color::Magenta;
const ERROR: Color = Color::Red;
const DIM: Color = Color::DarkGray;

pub fn draw(frame: &mut Frame<'_>, state: &AppState, messages: &Messages) {
    match &state.screen {
        ScreenState::Splash => draw_splash(frame, messages),
        ScreenState::Login(form) => draw_form(
            frame,
            messages,
            messages.get("login"),
            form,
            None,
            &["Enter ⏎", "Ctrl+N signup", "Ctrl+R reset", "Esc quit"],
        ),
        ScreenState::Signup(form) => draw_form(
            frame,
            messages,
            messages.get("signup"),
            form,
            None,
            &["Enter ⏎", "Esc back"],
        ),
        ScreenState::AdditionalInfo(info) => draw_additional_info(frame, messages, info),
        ScreenState::Reset(form) => draw_form(
            frame,
            messages,
            messages.get("resetPassTitle"),
            form,
            None,
            &["Enter ⏎", "Esc back"],
        ),
        ScreenState::ResetOtp { form, .. } => draw_form(
            frame,
            messages,
            messages.get("confirmResetPassTitle"),
            form,
            None,
            &["Enter ⏎", "Esc back"],
        ),
        ScreenState::Home(home) => draw_home(frame, messages, home),
    }
}

fn draw_splash(frame: &mut Frame<'_>, messages: &Messages) {
    let area = centered_rect(30, 5, frame.area());
    let lines = vec![
        Line::from(Span::styled(
            "S O U K",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            messages.get("loading"),
            Style::default().fg(DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), area);
}

/// Renders a titled form box with the status and hint lines below it.
fn draw_form(
    frame: &mut Frame<'_>,
    messages: &Messages,
    title: &str,
    form: &Form,
    extra: Option<Vec<Line<'_>>>,
    hints: &[&str],
) {
    let mut lines: Vec<Line<'_>> = Vec::new();

    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;
        let shown = if field.secret {
            "•".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        lines.push(field_line(messages.get(field.label), &shown, focused));
    }

    if let Some(extra_lines) = extra {
        lines.extend(extra_lines);
    }

    lines.push(Line::default());
    lines.push(status_line(messages, &form.submit));

    let height = lines.len() as u16 + 2;
    let area = centered_rect(54, height + 2, frame.area());
    let chunks =
        Layout::vertical([Constraint::Length(height), Constraint::Length(1)]).split(area);

    let block = Block::bordered()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(DIM));
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);
    frame.render_widget(hint_line(hints), chunks[1]);
}

fn draw_additional_info(frame: &mut Frame<'_>, messages: &Messages, info: &AdditionalInfoState) {
    let city_label = messages.get("city");
    let city_value = if info.city.is_none() {
        messages.get("selectCity").to_string()
    } else {
        format!("< {} >", info.selected_city())
    };
    let picker = vec![field_line(city_label, &city_value, info.picker_focused)];

    // Reuse the form renderer; the picker row is appended after the text
    // fields, and the form focus marker is suppressed while it owns focus.
    let mut form = info.form.clone();
    if info.picker_focused {
        form.focus = usize::MAX;
    }

    draw_form(
        frame,
        messages,
        messages.get("additionalInfos"),
        &form,
        Some(picker),
        &["Enter ⏎", "←/→ city"],
    );
}

fn draw_home(frame: &mut Frame<'_>, messages: &Messages, home: &HomeState) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    let title = Line::from(Span::styled(
        format!(" {} ", messages.get("categories")),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), chunks[0]);

    if home.loading {
        frame.render_widget(
            Paragraph::new(messages.get("loading")).style(Style::default().fg(DIM)),
            chunks[1],
        );
    } else if let Some(error) = &home.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(ERROR)),
            chunks[1],
        );
    } else if home.categories.is_empty() {
        frame.render_widget(
            Paragraph::new(messages.get("noCategories")).style(Style::default().fg(DIM)),
            chunks[1],
        );
    } else {
        let items: Vec<ListItem<'_>> = home
            .categories
            .iter()
            .map(|category| ListItem::new(format!("  {} · {}", category.id, category.name)))
            .collect();
        frame.render_widget(List::new(items), chunks[1]);
    }

    if home.confirm_logout {
        let prompt_area = centered_rect(40, 3, area);
        let prompt = Paragraph::new(format!("{} (y/n)", messages.get("logoutConfirm")))
            .centered()
            .block(Block::bordered().border_style(Style::default().fg(ACCENT)));
        frame.render_widget(ratatui::widgets::Clear, prompt_area);
        frame.render_widget(prompt, prompt_area);
    }

    frame.render_widget(
        hint_line(&["r refresh", "l logout", "q quit"]),
        chunks[2],
    );
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    let cursor = if focused { "_" } else { "" };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(format!("{label}: "), Style::default().fg(DIM)),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn status_line<'a>(messages: &'a Messages, submit: &'a SubmitState) -> Line<'a> {
    match submit {
        SubmitState::Submitting => Line::from(Span::styled(
            messages.get("loading"),
            Style::default().fg(DIM),
        )),
        SubmitState::Failed(message) => {
            Line::from(Span::styled(message.as_str(), Style::default().fg(ERROR)))
        }
        SubmitState::Idle => Line::default(),
    }
}

fn hint_line(hints: &[&str]) -> Paragraph<'static> {
    Paragraph::new(hints.join("   ")).style(Style::default().fg(DIM))
}

/// A `width`×`height` rectangle centered in `area`, clamped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
