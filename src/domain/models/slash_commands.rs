#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args.remove(0);
        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_clear()
            || cmd.is_export()
            || cmd.is_model_list()
            || cmd.is_model_set()
            || cmd.is_persona_list()
            || cmd.is_persona_set()
            || cmd.is_temperature()
            || cmd.is_max_tokens()
            || cmd.is_quick_prompt()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Remaining input after the command, joined back together. Persona names
    /// contain spaces.
    pub fn arg_text(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/clear"].contains(&self.command.as_str());
    }

    pub fn is_export(&self) -> bool {
        return ["/x", "/export"].contains(&self.command.as_str());
    }

    pub fn is_model_list(&self) -> bool {
        return ["/ml", "/models", "/modellist"].contains(&self.command.as_str())
            || (self.is_model_command() && self.args.is_empty());
    }

    pub fn is_model_set(&self) -> bool {
        return self.is_model_command() && !self.args.is_empty();
    }

    pub fn is_persona_list(&self) -> bool {
        return ["/pl", "/personas"].contains(&self.command.as_str())
            || (self.is_persona_command() && self.args.is_empty());
    }

    pub fn is_persona_set(&self) -> bool {
        return self.is_persona_command() && !self.args.is_empty();
    }

    pub fn is_temperature(&self) -> bool {
        return ["/t", "/temp", "/temperature"].contains(&self.command.as_str());
    }

    pub fn is_max_tokens(&self) -> bool {
        return ["/mt", "/tokens", "/max-tokens"].contains(&self.command.as_str());
    }

    pub fn is_quick_prompt(&self) -> bool {
        return ["/quick"].contains(&self.command.as_str());
    }

    fn is_model_command(&self) -> bool {
        return ["/m", "/model"].contains(&self.command.as_str());
    }

    fn is_persona_command(&self) -> bool {
        return ["/p", "/persona"].contains(&self.command.as_str());
    }
}
