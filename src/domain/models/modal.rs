use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    QuickSos,
    RemoveContact(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    QuickSosName,
}

/// Blocking dialogs. While one is open all keyboard input goes to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modal {
    Alert(String),
    Confirm {
        message: String,
        confirmation: Confirmation,
    },
    Prompt {
        message: String,
        value: String,
        kind: PromptKind,
    },
}

fn centered(rect: Rect, width_percentage: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(rect);

    return Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - width_percentage) / 2),
            Constraint::Percentage(width_percentage),
            Constraint::Percentage((100 - width_percentage) / 2),
        ])
        .split(vertical[1])[1];
}

impl Modal {
    pub fn confirm_remove_contact(phone: &str) -> Modal {
        return Modal::Confirm {
            message: format!("Remove {phone} from emergency contacts?"),
            confirmation: Confirmation::RemoveContact(phone.to_string()),
        };
    }

    pub fn confirm_quick_sos() -> Modal {
        return Modal::Confirm {
            message: "Send emergency SOS alert to all contacts?".to_string(),
            confirmation: Confirmation::QuickSos,
        };
    }

    pub fn prompt_quick_sos_name(default_name: &str) -> Modal {
        return Modal::Prompt {
            message: "Your name:".to_string(),
            value: default_name.to_string(),
            kind: PromptKind::QuickSosName,
        };
    }

    fn title(&self) -> &'static str {
        match self {
            Modal::Alert(_) => return "Notice",
            Modal::Confirm { .. } => return "Confirm",
            Modal::Prompt { .. } => return "Input",
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let hint = Style::default().add_modifier(Modifier::DIM);
        match self {
            Modal::Alert(message) => {
                let mut lines = message
                    .lines()
                    .map(|line| return Line::from(line.to_string()))
                    .collect::<Vec<Line>>();
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Press any key to continue", hint)));
                return lines;
            }
            Modal::Confirm { message, .. } => {
                return vec![
                    Line::from(message.to_string()),
                    Line::from(""),
                    Line::from(Span::styled("[y] Yes    [n] No", hint)),
                ];
            }
            Modal::Prompt { message, value, .. } => {
                return vec![
                    Line::from(message.to_string()),
                    Line::from(Span::styled(
                        format!("> {value}_"),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled("[Enter] OK    [Esc] Cancel", hint)),
                ];
            }
        }
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let lines = self.lines();
        // Borders and padding take four rows.
        let height = u16::try_from(lines.len() + 4).unwrap_or(u16::MAX);
        let area = centered(rect, 60, height);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .title(self.title())
                        .padding(Padding::new(1, 1, 1, 1)),
                )
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}
