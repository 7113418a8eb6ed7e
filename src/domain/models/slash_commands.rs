#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
    /// Everything after the command, line breaks included.
    pub body: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let trimmed = text.trim_start();
        let (prefix, body) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        let cmd = SlashCommand {
            command: prefix.to_string(),
            args: body
                .split_whitespace()
                .map(|e| return e.to_string())
                .collect::<Vec<String>>(),
            body: body.to_string(),
        };

        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_go()
            || cmd.is_toxicity()
            || cmd.is_conversation()
            || cmd.is_emotion()
            || cmd.is_emotion_conversation()
            || cmd.is_locate()
            || cmd.is_score()
            || cmd.is_route()
            || cmd.is_map()
            || cmd.is_sos()
            || cmd.is_quick_sos()
            || cmd.is_share()
            || cmd.is_checkin()
            || cmd.is_name()
            || cmd.is_contact_add()
            || cmd.is_contact_remove()
            || cmd.is_contacts()
            || cmd.is_history()
            || cmd.is_status()
        {
            return Some(cmd);
        }

        return None;
    }

    fn is(&self, names: &[&str]) -> bool {
        return names.contains(&self.command.as_str());
    }

    fn subcommand(&self) -> Option<&str> {
        return self.args.first().map(|e| return e.as_str());
    }

    /// Arguments following a `/contact` subcommand.
    pub fn subcommand_args(&self) -> Vec<String> {
        return self.args.iter().skip(1).cloned().collect();
    }

    pub fn is_quit(&self) -> bool {
        return self.is(&["/q", "/quit", "/exit"]);
    }

    pub fn is_help(&self) -> bool {
        return self.is(&["/h", "/help"]);
    }

    pub fn is_go(&self) -> bool {
        return self.is(&["/g", "/go"]);
    }

    pub fn is_toxicity(&self) -> bool {
        return self.is(&["/t", "/tox", "/toxicity"]);
    }

    pub fn is_conversation(&self) -> bool {
        return self.is(&["/conv", "/conversation"]);
    }

    pub fn is_emotion(&self) -> bool {
        return self.is(&["/e", "/emo", "/emotion"]);
    }

    pub fn is_emotion_conversation(&self) -> bool {
        return self.is(&["/emoconv", "/emotions"]);
    }

    pub fn is_locate(&self) -> bool {
        return self.is(&["/l", "/loc", "/locate"]);
    }

    pub fn is_score(&self) -> bool {
        return self.is(&["/s", "/score"]);
    }

    pub fn is_route(&self) -> bool {
        return self.is(&["/r", "/route"]);
    }

    pub fn is_map(&self) -> bool {
        return self.is(&["/m", "/map"]);
    }

    pub fn is_sos(&self) -> bool {
        return self.is(&["/sos"]);
    }

    pub fn is_quick_sos(&self) -> bool {
        return self.is(&["/qs", "/quicksos"]);
    }

    pub fn is_share(&self) -> bool {
        return self.is(&["/share"]);
    }

    pub fn is_checkin(&self) -> bool {
        return self.is(&["/ci", "/checkin"]);
    }

    pub fn is_name(&self) -> bool {
        return self.is(&["/n", "/name"]);
    }

    pub fn is_contact_add(&self) -> bool {
        return self.is(&["/c", "/contact"]) && self.subcommand() == Some("add");
    }

    pub fn is_contact_remove(&self) -> bool {
        return self.is(&["/c", "/contact"])
            && (self.subcommand() == Some("remove") || self.subcommand() == Some("rm"));
    }

    pub fn is_contacts(&self) -> bool {
        return self.is(&["/contacts"]);
    }

    pub fn is_history(&self) -> bool {
        return self.is(&["/history"]);
    }

    pub fn is_status(&self) -> bool {
        return self.is(&["/status"]);
    }
}
