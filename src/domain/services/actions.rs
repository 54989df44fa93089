#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::ChatController;
use super::Exports;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::Persona;
use crate::domain::models::QUICK_PROMPTS;

pub fn help_text() -> String {
    let quick_prompts = QUICK_PROMPTS
        .iter()
        .enumerate()
        .map(|(idx, prompt)| {
            return format!("  ({}) {prompt}", idx + 1);
        })
        .collect::<Vec<String>>()
        .join("\n");

    let text = format!(
        r#"
COMMANDS:
- /model (/m) [MODEL_ID,MODEL_INDEX] - Sets the active model. Without an argument, lists the configured models.
- /models (/ml) - Lists the configured models and whether the backend has them installed.
- /persona (/p) [PERSONA_NAME,PERSONA_INDEX] - Sets the assistant role. Without an argument, lists the personas.
- /temp (/t) [VALUE] - Sets the temperature, between 0.0 and 1.0.
- /tokens (/mt) [VALUE] - Sets the maximum tokens to generate, between 50 and 500.
- /quick [INDEX] - Sends one of the quick prompts.
- /clear - Clears the chat history.
- /export (/x) - Saves the chat history as JSON to the export directory.
- /quit /exit (/q) - Exit Parley.
- /help (/h) - Provides this help menu.

QUICK PROMPTS:
{quick_prompts}

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.
        "#
    );

    return text.trim().to_string();
}

/// Ollama reports untagged pulls as `NAME:latest`.
fn is_installed(installed: &[String], model_id: &str) -> bool {
    let latest = format!("{model_id}:latest");
    return installed
        .iter()
        .any(|e| return e == model_id || *e == latest);
}

pub fn model_options(installed: &[String]) -> String {
    return ModelDescriptor::all()
        .iter()
        .enumerate()
        .map(|(idx, model)| {
            let n = idx + 1;
            let mut line = format!("- ({n}) {}", model.label());
            if !installed.is_empty() && !is_installed(installed, model.id) {
                line = format!("{line} [not installed]");
            }
            return line;
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn persona_options() -> String {
    return Persona::all()
        .iter()
        .enumerate()
        .map(|(idx, persona)| {
            let n = idx + 1;
            return format!("- ({n}) {}: {}", persona.name, persona.system_prompt);
        })
        .collect::<Vec<String>>()
        .join("\n");
}

async fn startup_notice(controller: &ChatController) -> Option<String> {
    if let Err(err) = controller.health_check().await {
        return Some(format!(
            "Hey, it looks like Ollama isn't running, I can't connect to it. Double check that before we start talking.\n\nError: {err}"
        ));
    }

    let model_id = controller.model().id;
    match controller.installed_models().await {
        Ok(models) if !is_installed(&models, model_id) => {
            return Some(format!(
                "Model {model_id} isn't installed in Ollama. Run `ollama pull {model_id}`, or use /model to switch models."
            ));
        }
        Ok(_) => return None,
        Err(err) => {
            tracing::warn!(error = ?err, "unable to list installed models");
            return None;
        }
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Processes UI actions one at a time. Every action answers with an
    /// updated view, turns answer twice so the user message renders while the
    /// backend is working.
    pub async fn start(
        mut controller: ChatController,
        exports: Exports,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        tx.send(Event::ChatUpdate(controller.view()))?;
        if let Some(notice) = startup_notice(&controller).await {
            tx.send(Event::ChatNotice(notice))?;
        }

        while let Some(action) = rx.recv().await {
            match action {
                Action::Submit(text) => {
                    if let Ok(request) = controller.dispatch(&text) {
                        tx.send(Event::ChatUpdate(controller.view()))?;
                        controller.complete(request).await;
                    }
                }
                Action::Clear() => {
                    controller.clear();
                    tx.send(Event::ChatNotice("Chat cleared.".to_string()))?;
                }
                Action::Export() => match controller.export_snapshot() {
                    Some(snapshot) => match exports.save(&snapshot).await {
                        Ok(file_path) => {
                            tx.send(Event::ChatNotice(format!(
                                "Exported chat to {}",
                                file_path.display()
                            )))?;
                        }
                        Err(err) => {
                            tracing::error!(error = ?err, "export failed");
                            tx.send(Event::ChatNotice(format!("Export failed: {err}")))?;
                        }
                    },
                    None => {
                        tx.send(Event::ChatNotice("There is nothing to export yet.".to_string()))?;
                    }
                },
                Action::ListModels() => {
                    let installed = controller.installed_models().await.unwrap_or_else(|err| {
                        tracing::warn!(error = ?err, "unable to list installed models");
                        return vec![];
                    });
                    tx.send(Event::ChatNotice(model_options(&installed)))?;
                }
                Action::SelectModel(text) => match controller.select_model(&text) {
                    Ok(model) => {
                        tx.send(Event::ChatNotice(format!("{} has entered the chat.", model.id)))?;
                    }
                    Err(err) => {
                        tx.send(Event::ChatNotice(format!(
                            "{err} Run /models to see the options."
                        )))?;
                    }
                },
                Action::SelectPersona(text) => match controller.select_persona(&text) {
                    Ok(persona) => {
                        tx.send(Event::ChatNotice(format!("Persona set to {}.", persona.name)))?;
                    }
                    Err(err) => {
                        tx.send(Event::ChatNotice(format!(
                            "{err} Run /personas to see the options."
                        )))?;
                    }
                },
                Action::SetTemperature(temperature) => {
                    controller.set_temperature(temperature);
                }
                Action::SetMaxTokens(max_tokens) => {
                    controller.set_max_tokens(max_tokens);
                }
            }

            tracing::debug!(
                state = %controller.state(),
                messages = controller.session().len(),
                "action handled"
            );
            tx.send(Event::ChatUpdate(controller.view()))?;
        }

        return Ok(());
    }
}
