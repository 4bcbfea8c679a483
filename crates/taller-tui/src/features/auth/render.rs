//! Form views.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use taller_core::messages;
use unicode_width::UnicodeWidthStr;

use super::FormState;
use crate::overlays::render_utils::{
    InputHint, InputLine, calculate_centered_area, inner_area, input_line, render_container,
    render_hints,
};

const FORM_WIDTH: u16 = 56;

pub fn render_login(frame: &mut Frame, form: &FormState, area: Rect, spinner: &str) {
    let label = if form.submitting {
        format!("{spinner} {}", messages::LOGIN_SUBMITTING)
    } else {
        messages::LOGIN_SUBMIT.to_string()
    };
    let hints = [
        InputHint::new("Tab", "campo"),
        InputHint::new("Enter", "enviar"),
        InputHint::new("Ctrl+R", "registrarse"),
        InputHint::new("Esc", "volver"),
    ];
    render_form(frame, area, "Iniciar Sesión", form, &label, &hints);
}

pub fn render_register(frame: &mut Frame, form: &FormState, area: Rect, spinner: &str) {
    let label = if form.submitting {
        format!("{spinner} {}", messages::REGISTER_SUBMITTING)
    } else {
        messages::REGISTER_SUBMIT.to_string()
    };
    let hints = [
        InputHint::new("Tab", "campo"),
        InputHint::new("Enter", "enviar"),
        InputHint::new("Ctrl+L", "iniciar sesión"),
        InputHint::new("Esc", "volver"),
    ];
    render_form(frame, area, "Crear Cuenta", form, &label, &hints);
}

fn render_form(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    form: &FormState,
    submit_label: &str,
    hints: &[InputHint<'_>],
) {
    // One row per field with a blank row between, submit row, hints row.
    let height = (form.fields.len() as u16) * 2 + 6;
    let popup = calculate_centered_area(area, FORM_WIDTH, height);
    render_container(frame, popup, title, Color::Cyan);
    let inner = inner_area(popup);

    let label_width = form
        .fields
        .iter()
        .map(|f| f.label.width() + 1)
        .max()
        .unwrap_or(0);

    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields.iter().enumerate() {
        lines.push(input_line(
            &InputLine {
                label: field.label,
                value: &field.value,
                secret: field.secret,
                focused: form.focus == i && !form.submitting,
            },
            inner.width,
            label_width,
        ));
        lines.push(Line::from(""));
    }
    lines.push(submit_line(submit_label, form));

    frame.render_widget(Paragraph::new(lines), inner);
    render_hints(frame, inner, hints, Color::Cyan);
}

fn submit_line(label: &str, form: &FormState) -> Line<'static> {
    let style = if form.submitting {
        Style::default().fg(Color::DarkGray)
    } else if form.submit_focused() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(format!("[ {label} ]"), style)).alignment(Alignment::Center)
}
