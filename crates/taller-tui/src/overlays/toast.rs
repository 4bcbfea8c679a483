//! Toast notifications.
//!
//! Toasts stack in the top-right corner and expire on their own; they never
//! take keyboard focus.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use taller_core::notify::{Notification, NotificationLevel};
use unicode_width::UnicodeWidthStr;

const TOAST_MAX_WIDTH: u16 = 48;
const TOAST_MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Toasts {
    items: Vec<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.items.push(Toast {
            notification,
            expires_at: now + self.lifetime,
        });
    }

    /// Drops expired toasts. Returns whether anything changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at > now);
        before != self.items.len()
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn level_style(level: NotificationLevel) -> (Color, &'static str) {
    match level {
        NotificationLevel::Success => (Color::Green, "✔"),
        NotificationLevel::Error => (Color::Red, "✖"),
        NotificationLevel::Info => (Color::Blue, "ℹ"),
    }
}

/// Draws the newest toasts from the top-right corner downwards.
pub fn render_toasts(frame: &mut Frame, toasts: &Toasts, area: Rect) {
    let mut y = area.y + 1;
    let newest_first = toasts.items().iter().rev().take(TOAST_MAX_VISIBLE);

    for toast in newest_first {
        let (color, icon) = level_style(toast.notification.level);
        let text = format!("{icon} {}", toast.notification.message);
        // Server messages can be arbitrarily long.
        let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let width = text_width
            .saturating_add(4)
            .min(TOAST_MAX_WIDTH)
            .min(area.width.saturating_sub(2));
        let inner_width = width.saturating_sub(2).max(1);
        let rows = text_width.div_ceil(inner_width).max(1);
        let height = rows.saturating_add(2);

        if y.saturating_add(height) > area.bottom() {
            break;
        }
        let x = area.x + area.width.saturating_sub(width.saturating_add(1));
        let toast_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let para = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(para, toast_area);

        y = y.saturating_add(height);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(toasts: &Toasts, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render_toasts(frame, toasts, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_render_short_toast() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.push(Notification::success("Registro exitoso!"), Instant::now());

        let screen = draw(&toasts, 100, 30);
        assert!(screen.contains("Registro exitoso!"));
    }

    #[test]
    fn test_render_huge_message_does_not_overflow() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        let now = Instant::now();
        toasts.push(Notification::info("Sesión cerrada correctamente"), now);
        toasts.push(Notification::error("x".repeat(70_000)), now);

        // Too tall for the screen: skipped, and the older toast is not drawn below it.
        let screen = draw(&toasts, 100, 30);
        assert!(!screen.contains("xxxx"));
        assert!(!screen.contains("Sesión cerrada"));
    }

    #[test]
    fn test_render_wrapped_toast_fits_tall_screen() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.push(Notification::error("x".repeat(200)), Instant::now());

        let screen = draw(&toasts, 100, 30);
        assert!(screen.contains("xxxx"));
    }

    #[test]
    fn test_toasts_expire_after_lifetime() {
        let start = Instant::now();
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.push(Notification::info("a"), start);
        toasts.push(Notification::error("b"), start + Duration::from_secs(2));

        assert!(!toasts.expire(start + Duration::from_secs(3)));
        assert_eq!(toasts.items().len(), 2);

        assert!(toasts.expire(start + Duration::from_secs(4)));
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].notification.message, "b");

        toasts.expire(start + Duration::from_secs(6));
        assert!(toasts.is_empty());
    }
}
