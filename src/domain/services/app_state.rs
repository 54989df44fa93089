#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::actions::persona_options;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::ChatView;
use crate::domain::models::GenerationSettings;
use crate::domain::models::Loading;
use crate::domain::models::PromptBuilder;
use crate::domain::models::SlashCommand;
use crate::domain::models::MAX_TOKENS_RANGE;
use crate::domain::models::QUICK_PROMPTS;
use crate::domain::models::TEMPERATURE_RANGE;

/// UI side state. The conversation itself lives in the actions service, this
/// only mirrors the last view it sent.
pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub loading: Loading,
    pub notice: Option<String>,
    pub scroll: Scroll,
    pub view: ChatView,
    pub waiting_for_backend: bool,
}

impl AppState {
    pub fn new(view: ChatView) -> AppState {
        return AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            loading: Loading::default(),
            notice: None,
            scroll: Scroll::default(),
            waiting_for_backend: view.waiting_for_backend,
            view,
        };
    }

    pub fn handle_chat_update(&mut self, view: ChatView) {
        let grew = view.messages.len() != self.view.messages.len();
        self.waiting_for_backend = view.waiting_for_backend;
        self.view = view;
        self.sync_dependants();

        if grew {
            self.scroll.last();
        }
    }

    pub fn set_notice(&mut self, notice: &str) {
        self.notice = Some(notice.to_string());
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    /// Queues a turn. Input stays hidden until the service answers.
    pub fn submit(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.notice = None;
        self.waiting_for_backend = true;
        tx.send(Action::Submit(text.to_string()))?;
        return Ok(());
    }

    /// Returns `(should_break, should_continue)`. `should_continue` is set when
    /// the input was a command and must not be submitted as a message.
    pub fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        if !input_str.starts_with('/') {
            return Ok((false, false));
        }

        // Unrecognized input such as a path is a regular message.
        let cmd = match SlashCommand::parse(input_str) {
            Some(cmd) => cmd,
            None => return Ok((false, false)),
        };

        if cmd.is_quit() {
            return Ok((true, false));
        }

        if cmd.is_help() {
            self.set_notice(&help_text());
            return Ok((false, true));
        }

        if cmd.is_clear() {
            tx.send(Action::Clear())?;
            return Ok((false, true));
        }

        if cmd.is_export() {
            if self.view.messages.is_empty() {
                self.set_notice("There is nothing to export yet.");
            } else {
                tx.send(Action::Export())?;
            }
            return Ok((false, true));
        }

        if cmd.is_model_list() {
            tx.send(Action::ListModels())?;
            return Ok((false, true));
        }

        if cmd.is_model_set() {
            tx.send(Action::SelectModel(cmd.arg_text()))?;
            return Ok((false, true));
        }

        if cmd.is_persona_list() {
            self.set_notice(&persona_options());
            return Ok((false, true));
        }

        if cmd.is_persona_set() {
            tx.send(Action::SelectPersona(cmd.arg_text()))?;
            return Ok((false, true));
        }

        if cmd.is_temperature() {
            match cmd.arg_text().parse::<f32>() {
                Ok(value) if !value.is_nan() => {
                    let temperature = GenerationSettings::clamp_temperature(value);
                    tx.send(Action::SetTemperature(temperature))?;
                    self.set_notice(&format!("Temperature set to {temperature:.1}."));
                }
                _ => {
                    self.set_notice(&format!(
                        "Temperature must be a number between {:.1} and {:.1}.",
                        TEMPERATURE_RANGE.start(),
                        TEMPERATURE_RANGE.end()
                    ));
                }
            }
            return Ok((false, true));
        }

        if cmd.is_max_tokens() {
            match cmd.arg_text().parse::<i64>() {
                Ok(value) => {
                    let max_tokens = GenerationSettings::clamp_max_tokens(value);
                    tx.send(Action::SetMaxTokens(max_tokens))?;
                    self.set_notice(&format!("Max tokens set to {max_tokens}."));
                }
                Err(_) => {
                    self.set_notice(&format!(
                        "Max tokens must be a whole number between {} and {}.",
                        MAX_TOKENS_RANGE.start(),
                        MAX_TOKENS_RANGE.end()
                    ));
                }
            }
            return Ok((false, true));
        }

        if cmd.is_quick_prompt() {
            let prompt = cmd
                .arg_text()
                .parse::<usize>()
                .ok()
                .and_then(PromptBuilder::quick_prompt);
            match prompt {
                Some(prompt) => {
                    self.submit(prompt, tx)?;
                }
                None => {
                    self.set_notice(&format!(
                        "Pick a quick prompt between 1 and {}. Run /help to see them.",
                        QUICK_PROMPTS.len()
                    ));
                }
            }
            return Ok((false, true));
        }

        return Ok((false, false));
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.view.messages, usize::from(self.last_known_width));

        self.scroll
            .set_state(self.bubble_list.len(), usize::from(self.last_known_height));

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
