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

        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_image_attach()
            || cmd.is_image_list()
            || cmd.is_image_detach()
            || cmd.is_clear()
            || cmd.is_session()
            || cmd.is_model_set()
            || cmd.is_key_set()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Everything after the command, joined back together. Paths and URLs may
    /// contain spaces.
    pub fn rest(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_image_attach(&self) -> bool {
        return ["/i", "/image"].contains(&self.command.as_str());
    }

    pub fn is_image_list(&self) -> bool {
        return self.command == "/images";
    }

    pub fn is_image_detach(&self) -> bool {
        return ["/d", "/detach"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return self.command == "/clear";
    }

    pub fn is_session(&self) -> bool {
        return ["/s", "/session"].contains(&self.command.as_str());
    }

    pub fn is_model_set(&self) -> bool {
        return ["/m", "/model"].contains(&self.command.as_str());
    }

    pub fn is_key_set(&self) -> bool {
        return self.command == "/key";
    }
}
