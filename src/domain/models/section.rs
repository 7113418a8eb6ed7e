#[cfg(test)]
#[path = "section_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    Toxicity,
    Emotion,
    Safety,
    Sos,
}

impl Section {
    pub fn parse(text: &str) -> Option<Section> {
        return Section::iter().find(|e| return e.to_string() == text.trim());
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Toxicity => return "Toxicity",
            Section::Emotion => return "Emotion",
            Section::Safety => return "Safety",
            Section::Sos => return "SOS",
        }
    }

    pub fn index(&self) -> usize {
        return Section::iter().position(|e| return e == *self).unwrap_or(0);
    }

    pub fn next(&self) -> Section {
        let sections = Section::iter().collect::<Vec<Section>>();
        return sections[(self.index() + 1) % sections.len()];
    }

    pub fn prev(&self) -> Section {
        let sections = Section::iter().collect::<Vec<Section>>();
        return sections[(self.index() + sections.len() - 1) % sections.len()];
    }
}
