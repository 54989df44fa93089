#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::GENERATION_ERROR_PREFIX;
use crate::domain::models::MODEL_UNAVAILABLE_TEXT;

const USER_COLOR: Color = Color::Rgb(102, 126, 234);
const ASSISTANT_COLOR: Color = Color::Rgb(240, 147, 251);

/// Terminal columns taken by `text`. Emoji and CJK take two.
fn display_width(text: &str) -> usize {
    return Span::raw(text).width();
}

#[derive(PartialEq, Eq, Debug)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    /// left border + left padding + (text, not counted) + right padding + right border.
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, window_max_width: usize) -> Bubble<'a> {
        let mut alignment = BubbleAlignment::Left;
        if message.role() == Role::User {
            alignment = BubbleAlignment::Right;
        }

        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            border_elements_length: 4,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn alignment(&self) -> &BubbleAlignment {
        return &self.alignment;
    }

    fn title(&self) -> String {
        return format!(
            "{} {}",
            self.message.role().title(),
            self.message.timestamp().format("%H:%M")
        );
    }

    fn is_error(&self) -> bool {
        let content = self.message.content();
        return self.message.role() == Role::Assistant
            && (content == MODEL_UNAVAILABLE_TEXT || content.starts_with(GENERATION_ERROR_PREFIX));
    }

    fn border_style(&self) -> Style {
        let color = match self.message.role() {
            Role::User => USER_COLOR,
            Role::Assistant => ASSISTANT_COLOR,
        };

        return Style::default().fg(color);
    }

    fn text_style(&self) -> Style {
        if self.is_error() {
            return Style::default().fg(Color::Red);
        }

        return Style::default();
    }

    fn max_text_width(&self) -> usize {
        let config = Bubble::style_config();
        let outer_padding =
            (self.window_max_width as f32 * config.outer_padding_percentage).ceil() as usize;

        return self
            .window_max_width
            .saturating_sub(config.border_elements_length)
            .saturating_sub(outer_padding)
            .max(1);
    }

    /// Renders the message as a bordered box, with the role and time in the top border.
    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let title = self.title();
        let text_lines = self.message.as_string_lines(self.max_text_width());

        let inner_width = text_lines
            .iter()
            .map(|line| {
                return display_width(line);
            })
            .chain([display_width(&title)])
            .max()
            .unwrap_or(0);
        let bubble_width = inner_width + Bubble::style_config().border_elements_length;
        let outer_padding = " ".repeat(self.window_max_width.saturating_sub(bubble_width));

        let border_style = self.border_style();
        let text_style = self.text_style();

        let top = vec![Span::styled(
            format!(
                "╭{title}{}╮",
                "─".repeat((inner_width + 2).saturating_sub(display_width(&title)))
            ),
            border_style,
        )];
        let bottom = vec![Span::styled(
            format!("╰{}╯", "─".repeat(inner_width + 2)),
            border_style,
        )];

        let mut rows = vec![top];
        for text in text_lines {
            let fill = " ".repeat(inner_width.saturating_sub(display_width(&text)));
            rows.push(vec![
                Span::styled("│ ", border_style),
                Span::styled(text, text_style),
                Span::from(fill),
                Span::styled(" │", border_style),
            ]);
        }
        rows.push(bottom);

        return rows
            .into_iter()
            .map(|mut spans| {
                if self.alignment == BubbleAlignment::Left {
                    spans.push(Span::from(outer_padding.clone()));
                } else {
                    spans.insert(0, Span::from(outer_padding.clone()));
                }

                return Line::from(spans);
            })
            .collect();
    }
}
