use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

use super::Section;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn for_section(section: Option<Section>) -> tui_textarea::TextArea<'a> {
        let title = match section {
            Some(Section::Toxicity) => "Text to analyze, or /help",
            Some(Section::Emotion) => "Text to analyze, or /help",
            Some(Section::Safety) => "LAT LNG to score, or /help",
            Some(Section::Sos) => "SOS message, or /help",
            None => "Enter a command, /go SECTION to pick a section",
        };

        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }
}
