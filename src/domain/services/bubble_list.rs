use std::collections::HashMap;

use chrono::DateTime;
use chrono::Local;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use crate::domain::models::Message;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

struct BubbleCacheEntry {
    timestamp: DateTime<Local>,
    text_len: usize,
    lines: Vec<Line<'static>>,
}

#[derive(Default)]
pub struct BubbleList {
    cache: HashMap<usize, BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
}

impl BubbleList {
    pub fn new() -> BubbleList {
        return BubbleList::default();
    }

    /// Renders bubbles for any message not already cached at its index.
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        if self.line_width != line_width || messages.len() < self.cache.len() {
            self.cache.clear();
            self.line_width = line_width;
        }

        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(entry) = self.cache.get(&idx) {
                    if entry.timestamp == message.timestamp()
                        && entry.text_len == message.content().len()
                    {
                        return entry.lines.len();
                    }
                }

                let lines = Bubble::new(message, line_width).as_lines();
                let lines_len = lines.len();
                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        timestamp: message.timestamp(),
                        text_len: message.content().len(),
                        lines,
                    },
                );

                return lines_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn is_empty(&self) -> bool {
        return self.lines_len == 0;
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: usize) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line> = indexes
            .iter()
            .filter_map(|idx| {
                return self.cache.get(idx);
            })
            .flat_map(|entry| {
                return entry.lines.iter().cloned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
            rect,
        );
    }
}
