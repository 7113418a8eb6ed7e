#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::collections::HashMap;
use std::collections::VecDeque;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::actions::help_text;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Confirmation;
use crate::domain::models::Coordinate;
use crate::domain::models::Event;
use crate::domain::models::Modal;
use crate::domain::models::Panel;
use crate::domain::models::PromptKind;
use crate::domain::models::Row;
use crate::domain::models::Section;
use crate::domain::models::SlashCommand;

const DEFAULT_USER_NAME: &str = "User";

/// What the UI should do with the prompt after a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    Quit,
    Clear,
    /// Kept until the worker confirms, so a rejected entry can be fixed.
    Keep,
}

pub struct AppState {
    pub active_section: Option<Section>,
    pub contacts: Vec<String>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub loading: bool,
    /// The one cached position, replaced by every successful fix.
    pub location: Option<Coordinate>,
    pub modals: VecDeque<Modal>,
    pub panels: HashMap<Section, Panel>,
    pub safety_latitude: String,
    pub safety_longitude: String,
    pub scroll: Scroll,
    pub show_help: bool,
    pub clear_prompt: bool,
    pub user_name: String,
}

impl AppState {
    pub fn new(user_name: &str, section: Option<Section>) -> AppState {
        return AppState {
            active_section: section,
            contacts: vec![],
            last_known_height: 0,
            last_known_width: 0,
            loading: false,
            location: None,
            modals: VecDeque::new(),
            panels: HashMap::new(),
            safety_latitude: "".to_string(),
            safety_longitude: "".to_string(),
            scroll: Scroll::default(),
            show_help: false,
            clear_prompt: false,
            user_name: user_name.trim().to_string(),
        };
    }

    /// Activates the section named `name`. Unknown names leave no section
    /// active.
    pub fn navigate_to_section(&mut self, name: &str) {
        self.active_section = Section::parse(name);
        self.show_help = false;
        self.scroll.reset();
        self.sync_dependants();
        tracing::debug!(section = name, found = self.active_section.is_some(), "Navigate");
    }

    fn activate(&mut self, section: Section) {
        self.navigate_to_section(&section.to_string());
    }

    pub fn next_section(&mut self) {
        let section = match self.active_section {
            Some(section) => section.next(),
            None => Section::Toxicity,
        };
        self.activate(section);
    }

    pub fn prev_section(&mut self) {
        let section = match self.active_section {
            Some(section) => section.prev(),
            None => Section::Sos,
        };
        self.activate(section);
    }

    pub fn modal(&self) -> Option<&Modal> {
        return self.modals.front();
    }

    pub fn alert(&mut self, message: &str) {
        self.modals.push_back(Modal::Alert(message.to_string()));
    }

    fn user_name_or_default(&self) -> String {
        if self.user_name.is_empty() {
            return DEFAULT_USER_NAME.to_string();
        }

        return self.user_name.to_string();
    }

    /// Applies an event published by the actions worker.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Alert(message) => self.alert(&message),
            Event::ContactAdded() => self.clear_prompt = true,
            Event::Contacts(contacts) => {
                self.contacts = contacts;
                self.sync_dependants();
            }
            Event::Loading(loading) => self.loading = loading,
            Event::LocationUpdated(location) => {
                self.location = Some(location);
                self.safety_latitude = location.latitude.to_string();
                self.safety_longitude = location.longitude.to_string();
                self.sync_dependants();
            }
            Event::Panel(section, panel) => {
                self.panels.insert(section, panel);
                if self.active_section == Some(section) {
                    self.show_help = false;
                    self.scroll.reset();
                }
                self.sync_dependants();
            }
            _ => (),
        }
    }

    /// Keys go to the front modal while one is open.
    pub fn handle_modal_input(
        &mut self,
        input: Input,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let modal = match self.modals.pop_front() {
            Some(modal) => modal,
            None => return Ok(()),
        };

        match modal {
            Modal::Alert(_) => (),
            Modal::Confirm {
                message,
                confirmation,
            } => match input.key {
                Key::Char('y') | Key::Char('Y') | Key::Enter => {
                    self.confirm(confirmation, tx)?;
                }
                Key::Char('n') | Key::Char('N') | Key::Esc => {
                    tracing::debug!(?confirmation, "Declined");
                }
                _ => self.modals.push_front(Modal::Confirm {
                    message,
                    confirmation,
                }),
            },
            Modal::Prompt {
                message,
                mut value,
                kind,
            } => match input.key {
                Key::Enter => self.answer(kind, &value, tx)?,
                // Cancelling still answers, with an empty value.
                Key::Esc => self.answer(kind, "", tx)?,
                Key::Backspace => {
                    value.pop();
                    self.modals.push_front(Modal::Prompt {
                        message,
                        value,
                        kind,
                    });
                }
                Key::Char(c) if !input.ctrl => {
                    value.push(c);
                    self.modals.push_front(Modal::Prompt {
                        message,
                        value,
                        kind,
                    });
                }
                _ => self.modals.push_front(Modal::Prompt {
                    message,
                    value,
                    kind,
                }),
            },
        }

        return Ok(());
    }

    pub fn handle_modal_paste(&mut self, text: &str) {
        if let Some(Modal::Prompt { value, .. }) = self.modals.front_mut() {
            value.push_str(text.lines().next().unwrap_or_default());
        }
    }

    fn confirm(
        &mut self,
        confirmation: Confirmation,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        match confirmation {
            Confirmation::QuickSos => {
                self.modals
                    .push_front(Modal::prompt_quick_sos_name(&self.user_name_or_default()));
            }
            Confirmation::RemoveContact(phone) => {
                tx.send(Action::RemoveContact(phone))?;
            }
        }

        return Ok(());
    }

    fn answer(
        &mut self,
        kind: PromptKind,
        value: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        match kind {
            PromptKind::QuickSosName => {
                let mut user_name = value.trim().to_string();
                if user_name.is_empty() {
                    user_name = DEFAULT_USER_NAME.to_string();
                }

                tx.send(Action::SendQuickSos {
                    user_name,
                    location: self.location,
                })?;
            }
        }

        return Ok(());
    }

    /// Runs the main action of the active section for text entered without a
    /// command.
    fn submit_text(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let section = match self.active_section {
            Some(section) => section,
            None => {
                self.alert("Pick a section with /go first, or see /help for every command");
                return Ok(());
            }
        };

        match section {
            Section::Toxicity => tx.send(Action::AnalyzeToxicity(input.to_string()))?,
            Section::Emotion => tx.send(Action::AnalyzeEmotion(input.to_string()))?,
            Section::Safety => {
                let args = input
                    .split_whitespace()
                    .map(|e| return e.to_string())
                    .collect::<Vec<String>>();
                self.safety_action(&args, tx)?;
            }
            Section::Sos => tx.send(Action::SendSos {
                user_name: self.user_name.to_string(),
                message: input.trim().to_string(),
                location: self.location,
            })?,
        }

        return Ok(());
    }

    /// Four numbers ask for a route, anything else is scored as a single
    /// position. No numbers at all reuse the remembered coordinates.
    fn safety_action(&mut self, args: &[String], tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let arg = |idx: usize| return args.get(idx).cloned().unwrap_or_default();

        if args.len() == 4 {
            tx.send(Action::FindSafeRoute {
                start_latitude: arg(0),
                start_longitude: arg(1),
                end_latitude: arg(2),
                end_longitude: arg(3),
            })?;
            return Ok(());
        }

        if !args.is_empty() {
            self.safety_latitude = arg(0);
            self.safety_longitude = arg(1);
        }

        tx.send(Action::GetSafetyScore(
            self.safety_latitude.to_string(),
            self.safety_longitude.to_string(),
        ))?;

        return Ok(());
    }

    /// Same coordinate memory as scoring, with an optional third radius
    /// argument that is passed through for validation.
    fn map_action(&mut self, args: &[String], tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if !args.is_empty() {
            self.safety_latitude = args[0].to_string();
            self.safety_longitude = args.get(1).cloned().unwrap_or_default();
        }

        tx.send(Action::GenerateSafetyMap {
            latitude: self.safety_latitude.to_string(),
            longitude: self.safety_longitude.to_string(),
            radius: args.get(2).cloned().unwrap_or_default(),
        })?;

        return Ok(());
    }

    /// Accepts either a phone number or its position in the contact list.
    fn contact_by_reference(&self, reference: &str) -> String {
        if let Ok(idx) = reference.parse::<usize>() {
            if idx >= 1 && idx <= self.contacts.len() {
                return self.contacts[idx - 1].to_string();
            }
        }

        return reference.to_string();
    }

    pub fn submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<Submission> {
        let command = match SlashCommand::parse(input) {
            Some(command) => command,
            None => {
                self.submit_text(input, tx)?;
                return Ok(Submission::Clear);
            }
        };

        if command.is_quit() {
            return Ok(Submission::Quit);
        }

        if command.is_help() {
            self.show_help = true;
            self.scroll.reset();
            self.sync_dependants();
            return Ok(Submission::Clear);
        }

        if command.is_go() {
            self.navigate_to_section(&command.body);
            if self.active_section.is_none() {
                self.alert(&format!("Unknown section '{}'", command.body.trim()));
            }
            return Ok(Submission::Clear);
        }

        if command.is_toxicity() {
            self.activate(Section::Toxicity);
            tx.send(Action::AnalyzeToxicity(command.body))?;
        } else if command.is_conversation() {
            self.activate(Section::Toxicity);
            tx.send(Action::AnalyzeConversation(command.body))?;
        } else if command.is_emotion() {
            self.activate(Section::Emotion);
            tx.send(Action::AnalyzeEmotion(command.body))?;
        } else if command.is_emotion_conversation() {
            self.activate(Section::Emotion);
            tx.send(Action::AnalyzeEmotionConversation(command.body))?;
        } else if command.is_locate() {
            self.activate(Section::Safety);
            tx.send(Action::GetCurrentLocation())?;
        } else if command.is_score() {
            self.activate(Section::Safety);
            let args = command.args.iter().take(2).cloned().collect::<Vec<String>>();
            self.safety_action(&args, tx)?;
        } else if command.is_route() {
            self.activate(Section::Safety);
            let mut args = command.args.clone();
            args.resize(4, "".to_string());
            self.safety_action(&args, tx)?;
        } else if command.is_map() {
            self.activate(Section::Safety);
            let args = command.args.clone();
            self.map_action(&args, tx)?;
        } else if command.is_sos() {
            self.activate(Section::Sos);
            tx.send(Action::SendSos {
                user_name: self.user_name.to_string(),
                message: command.body.trim().to_string(),
                location: self.location,
            })?;
        } else if command.is_quick_sos() {
            self.activate(Section::Sos);
            self.modals.push_back(Modal::confirm_quick_sos());
        } else if command.is_share() {
            self.activate(Section::Sos);
            tx.send(Action::ShareLocation(self.user_name.to_string()))?;
        } else if command.is_checkin() {
            self.activate(Section::Sos);
            tx.send(Action::SendCheckin {
                user_name: self.user_name.to_string(),
                status: command.body.trim().to_string(),
            })?;
        } else if command.is_name() {
            self.user_name = command.body.trim().to_string();
            self.sync_dependants();
        } else if command.is_contact_add() {
            self.activate(Section::Sos);
            let args = command.subcommand_args();
            tx.send(Action::AddContact {
                phone: args.first().cloned().unwrap_or_default(),
                name: args.iter().skip(1).cloned().collect::<Vec<String>>().join(" "),
            })?;
            return Ok(Submission::Keep);
        } else if command.is_contact_remove() {
            self.activate(Section::Sos);
            let reference = command.subcommand_args().join(" ");
            if reference.trim().is_empty() {
                self.alert("Please enter a phone number");
            } else {
                let phone = self.contact_by_reference(reference.trim());
                self.modals.push_back(Modal::confirm_remove_contact(&phone));
            }
        } else if command.is_contacts() {
            self.activate(Section::Sos);
            tx.send(Action::LoadContacts())?;
        } else if command.is_history() {
            self.activate(Section::Sos);
            tx.send(Action::LoadSosHistory(command.body.trim().to_string()))?;
        } else if command.is_status() {
            tx.send(Action::CheckModules(
                self.active_section.unwrap_or(Section::Toxicity),
            ))?;
        }

        return Ok(Submission::Clear);
    }

    fn section_rows(&self, section: Section) -> Vec<Row> {
        let mut rows = vec![];
        match section {
            Section::Safety => {
                let location = match self.location {
                    Some(location) => location.to_string(),
                    None => "not located yet, use /locate".to_string(),
                };
                rows.push(Row::Field {
                    label: "Current Location".to_string(),
                    value: location,
                });
            }
            Section::Sos => {
                rows.push(Row::Field {
                    label: "Name".to_string(),
                    value: self.user_name_or_default(),
                });
                rows.push(Row::Heading("Emergency Contacts:".to_string()));
                if self.contacts.is_empty() {
                    rows.push(Row::Text("No emergency contacts added yet".to_string()));
                }
                for (idx, contact) in self.contacts.iter().enumerate() {
                    rows.push(Row::Text(format!("({}) {contact}", idx + 1)));
                }
            }
            _ => (),
        }

        if let Some(panel) = self.panels.get(&section) {
            if !rows.is_empty() && !panel.is_empty() {
                rows.push(Row::Heading("Results:".to_string()));
            }
            rows.extend(panel.rows.iter().cloned());
        }

        return rows;
    }

    /// Everything shown in the results area.
    pub fn visible_panel(&self) -> Panel {
        if self.show_help {
            return Panel::new(
                help_text()
                    .lines()
                    .map(|line| return Row::Text(line.to_string()))
                    .collect(),
            );
        }

        match self.active_section {
            Some(section) => return Panel::new(self.section_rows(section)),
            None => {
                return Panel::new(vec![
                    Row::Heading("Welcome to SheSafe".to_string()),
                    Row::Text(
                        "Use Tab or /go [toxicity,emotion,safety,sos] to open a section."
                            .to_string(),
                    ),
                    Row::Text("Type /help to list every command.".to_string()),
                ]);
            }
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let length = self.visible_panel().as_lines().len();
        self.scroll.set_state(
            u16::try_from(length).unwrap_or(u16::MAX),
            self.last_known_height,
        );
    }
}
