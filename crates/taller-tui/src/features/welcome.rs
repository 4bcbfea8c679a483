//! Welcome panel.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::overlays::render_utils::{
    InputHint, calculate_centered_area, inner_area, render_container, render_hints,
};

pub fn render_welcome(frame: &mut Frame, area: Rect) {
    let popup = calculate_centered_area(area, 56, 11);
    render_container(frame, popup, "Taller", Color::Cyan);
    let inner = inner_area(popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Bienvenido",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Inicia sesión o crea una cuenta para continuar.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

    let hints = [
        InputHint::new("l", "iniciar sesión"),
        InputHint::new("r", "registrarse"),
        InputHint::new("q", "salir"),
    ];
    render_hints(frame, inner, &hints, Color::Cyan);
}
