#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

const SCORE_BAR_WIDTH: usize = 20;
const SCORE_LABEL_WIDTH: usize = 24;

/// Fixed point formatting that rounds halves away from zero. `format!`
/// alone rounds exact halves to even, so `6.25` would render as `6.2`.
pub fn fixed(value: f64, decimals: usize) -> String {
    let scale = 10_f64.powi(i32::try_from(decimals).unwrap_or(0));
    return format!("{:.*}", decimals, (value * scale).round() / scale);
}

/// Formats a 0..1 score as a percentage with one decimal.
pub fn percentage(value: f64) -> String {
    return format!("{}%", fixed(value * 100.0, 1));
}

/// Badge colour for server provided risk and safety levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Low,
    Medium,
    High,
    Critical,
    Neutral,
}

impl Tone {
    pub fn from_risk_level(level: &str) -> Tone {
        match level.to_lowercase().as_str() {
            "low" => return Tone::Low,
            "medium" | "moderate" => return Tone::Medium,
            "high" => return Tone::High,
            "critical" => return Tone::Critical,
            _ => return Tone::Neutral,
        }
    }

    pub fn from_safety_level(level: &str) -> Tone {
        match level {
            "SAFE" => return Tone::Low,
            "MODERATE" => return Tone::Medium,
            "CAUTION" => return Tone::High,
            _ => return Tone::Critical,
        }
    }

    fn color(&self) -> Color {
        match self {
            Tone::Low => return Color::Green,
            Tone::Medium => return Color::Yellow,
            Tone::High => return Color::LightRed,
            Tone::Critical => return Color::Red,
            Tone::Neutral => return Color::Gray,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreColor {
    Red,
    Orange,
    Green,
}

impl ScoreColor {
    /// Threshold used for toxicity labels.
    pub fn from_toxicity(value: f64) -> ScoreColor {
        if value > 0.7 {
            return ScoreColor::Red;
        }
        if value > 0.4 {
            return ScoreColor::Orange;
        }

        return ScoreColor::Green;
    }

    /// Only distress emotions above 0.6 are flagged.
    pub fn from_emotion(emotion: &str, value: f64) -> ScoreColor {
        if ["sadness", "fear", "anger"].contains(&emotion) && value > 0.6 {
            return ScoreColor::Red;
        }

        return ScoreColor::Green;
    }

    fn color(&self) -> Color {
        match self {
            ScoreColor::Red => return Color::Rgb(244, 67, 54),
            ScoreColor::Orange => return Color::Rgb(255, 152, 0),
            ScoreColor::Green => return Color::Rgb(76, 175, 80),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    Badge { text: String, tone: Tone },
    Field { label: String, value: String },
    Heading(String),
    /// A labelled 0..1 score. Scores with a colour also render a bar.
    Score {
        label: String,
        value: f64,
        bar: Option<ScoreColor>,
    },
    Bullet(String),
    Warning(String),
    Success(String),
    Link {
        label: String,
        text: String,
        url: String,
    },
    Text(String),
    Error(String),
}

impl Row {
    pub fn to_text(&self) -> String {
        match self {
            Row::Badge { text, .. } => return format!("[ {text} ]"),
            Row::Field { label, value } => return format!("{label}: {value}"),
            Row::Heading(text) => return text.to_string(),
            Row::Score { label, value, .. } => return format!("{label}: {}", percentage(*value)),
            Row::Bullet(text) => return format!("- {text}"),
            Row::Warning(text) => return text.to_string(),
            Row::Success(text) => return text.to_string(),
            Row::Link { label, text, url } => return format!("{label}: {text} ({url})"),
            Row::Text(text) => return text.to_string(),
            Row::Error(text) => return format!("Error: {text}"),
        }
    }

    fn as_line(&self) -> Line<'static> {
        match self {
            Row::Badge { text, tone } => {
                return Line::from(Span::styled(
                    format!(" {text} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(tone.color())
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Row::Field { label, value } => {
                return Line::from(vec![
                    Span::styled(
                        format!("{label}: "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::from(value.to_string()),
                ]);
            }
            Row::Heading(text) => {
                return Line::from(Span::styled(
                    text.to_string(),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ));
            }
            Row::Score { label, value, bar } => {
                let mut spans = vec![
                    Span::from(format!("{:<width$}", label, width = SCORE_LABEL_WIDTH)),
                    Span::styled(
                        format!("{:>6} ", percentage(*value)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ];

                if let Some(score_color) = bar {
                    let filled = ((value.clamp(0.0, 1.0) * SCORE_BAR_WIDTH as f64).round()) as usize;
                    spans.push(Span::styled(
                        "█".repeat(filled),
                        Style::default().fg(score_color.color()),
                    ));
                    spans.push(Span::styled(
                        "░".repeat(SCORE_BAR_WIDTH - filled),
                        Style::default().fg(Color::DarkGray),
                    ));
                }

                return Line::from(spans);
            }
            Row::Bullet(text) => return Line::from(format!("  • {text}")),
            Row::Warning(text) => {
                return Line::from(Span::styled(
                    text.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Row::Success(text) => {
                return Line::from(Span::styled(
                    text.to_string(),
                    Style::default().fg(Color::Green),
                ));
            }
            Row::Link { label, text, url } => {
                return Line::from(vec![
                    Span::styled(
                        format!("{label}: "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{text} "),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                    Span::styled(url.to_string(), Style::default().fg(Color::Cyan)),
                ]);
            }
            Row::Text(text) => return Line::from(text.to_string()),
            Row::Error(text) => {
                return Line::from(Span::styled(
                    format!("Error: {text}"),
                    Style::default().fg(Color::Red),
                ));
            }
        }
    }
}

/// View model for one results area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Panel {
    pub rows: Vec<Row>,
}

impl Panel {
    pub fn new(rows: Vec<Row>) -> Panel {
        return Panel { rows };
    }

    pub fn error(message: &str) -> Panel {
        return Panel::new(vec![Row::Error(message.to_string())]);
    }

    pub fn is_empty(&self) -> bool {
        return self.rows.is_empty();
    }

    pub fn to_text(&self) -> String {
        return self
            .rows
            .iter()
            .map(|row| return row.to_text())
            .collect::<Vec<String>>()
            .join("\n");
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![];
        for (idx, row) in self.rows.iter().enumerate() {
            // Breathing room above headings, except at the very top.
            if idx > 0 && matches!(row, Row::Heading(_)) {
                lines.push(Line::from(""));
            }
            lines.push(row.as_line());
        }

        return lines;
    }
}
