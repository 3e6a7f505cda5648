//! Screen rendering and input handling.
//!
//! Each input mode screen is the same form: a source input, a Summarize
//! button, and the settings panel, with the submission outcome underneath.
//! The shared pieces live here; the screens own their source input.

mod direct;
mod landing;
mod sample;
mod url;

pub use direct::DirectScreen;
pub use landing::LandingScreen;
pub use sample::SampleScreen;
pub use url::UrlScreen;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::client::SentimentLabel;
use crate::options::{
    Algorithm, SummarizeOptions, SummaryLength, RATIO_MAX, RATIO_MIN, RATIO_STEP,
};
use crate::submission::SubmissionState;

/// What a mode screen asks the app to do in response to a key.
#[derive(Debug, PartialEq)]
pub(crate) enum ModeCommand {
    /// Return to the landing screen.
    Back,
    /// Start a submission with the current source.
    Submit,
    /// Replace the shared options with this new value.
    ReplaceOptions(SummarizeOptions),
}

/// One row of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsRow {
    Algorithm,
    /// Summary length for abstractive algorithms, compression ratio
    /// otherwise. The same slot in the form either way.
    Tuning,
    Entities,
    Sentiment,
}

/// Focus position within a mode screen's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormFocus {
    Input,
    Submit,
    Settings(SettingsRow),
}

impl FormFocus {
    pub(crate) fn next(self) -> Self {
        match self {
            FormFocus::Input => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Settings(SettingsRow::Algorithm),
            FormFocus::Settings(SettingsRow::Algorithm) => FormFocus::Settings(SettingsRow::Tuning),
            FormFocus::Settings(SettingsRow::Tuning) => FormFocus::Settings(SettingsRow::Entities),
            FormFocus::Settings(SettingsRow::Entities) => {
                FormFocus::Settings(SettingsRow::Sentiment)
            }
            FormFocus::Settings(SettingsRow::Sentiment) => FormFocus::Input,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            FormFocus::Input => FormFocus::Settings(SettingsRow::Sentiment),
            FormFocus::Submit => FormFocus::Input,
            FormFocus::Settings(SettingsRow::Algorithm) => FormFocus::Submit,
            FormFocus::Settings(SettingsRow::Tuning) => FormFocus::Settings(SettingsRow::Algorithm),
            FormFocus::Settings(SettingsRow::Entities) => FormFocus::Settings(SettingsRow::Tuning),
            FormFocus::Settings(SettingsRow::Sentiment) => {
                FormFocus::Settings(SettingsRow::Entities)
            }
        }
    }
}

/// Build the replacement options for an adjustment of `row` by `delta`.
///
/// The shared object is never edited in place; callers hand the returned
/// value to the app's replace entry point.
pub(crate) fn adjust(options: &SummarizeOptions, row: SettingsRow, delta: i8) -> SummarizeOptions {
    let mut next = options.clone();
    match row {
        SettingsRow::Algorithm => {
            next.algorithm = cycle(&Algorithm::ALL, next.algorithm, delta);
        }
        SettingsRow::Tuning => {
            if next.algorithm.is_abstractive() {
                next.summary_length = cycle(&SummaryLength::ALL, next.summary_length, delta);
            } else {
                let ratio =
                    i16::from(next.compression_ratio) + i16::from(delta) * i16::from(RATIO_STEP);
                next.compression_ratio =
                    ratio.clamp(i16::from(RATIO_MIN), i16::from(RATIO_MAX)) as u8;
            }
        }
        SettingsRow::Entities => next.recognize_entities = !next.recognize_entities,
        SettingsRow::Sentiment => next.analyze_sentiment = !next.analyze_sentiment,
    }
    next
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i8) -> T {
    let len = all.len() as i8;
    let index = all.iter().position(|item| *item == current).unwrap_or(0) as i8;
    all[(index + delta).rem_euclid(len) as usize]
}

/// Shared key handling for a focused settings row.
pub(crate) fn settings_key(
    key: KeyEvent,
    row: SettingsRow,
    options: &SummarizeOptions,
) -> Option<ModeCommand> {
    match key.code {
        KeyCode::Left => Some(ModeCommand::ReplaceOptions(adjust(options, row, -1))),
        KeyCode::Right => Some(ModeCommand::ReplaceOptions(adjust(options, row, 1))),
        KeyCode::Char(' ') | KeyCode::Enter
            if matches!(row, SettingsRow::Entities | SettingsRow::Sentiment) =>
        {
            Some(ModeCommand::ReplaceOptions(adjust(options, row, 1)))
        }
        _ => None,
    }
}

pub(crate) fn focused_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Number of terminal rows the settings panel occupies.
pub(crate) const SETTINGS_HEIGHT: u16 = 6;

/// Render the settings panel, highlighting the focused row if any.
pub(crate) fn render_settings(
    frame: &mut Frame,
    area: Rect,
    options: &SummarizeOptions,
    focus: Option<SettingsRow>,
) {
    let muted = Style::default().fg(Color::DarkGray);
    let marker = |row| if focus == Some(row) { "› " } else { "  " };
    let style = |row| focused_style(focus == Some(row));

    let tuning = if options.algorithm.is_abstractive() {
        format!("Summary length  ‹ {} ›", options.summary_length.label())
    } else {
        format!("Compression     ‹ {}% ›", options.compression_ratio)
    };
    let checkbox = |on: bool| if on { "[x]" } else { "[ ]" };

    let lines = vec![
        Line::from(Span::styled(
            "Summarization Settings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(marker(SettingsRow::Algorithm)),
            Span::styled(
                format!("Algorithm       ‹ {} ›", options.algorithm.label()),
                style(SettingsRow::Algorithm),
            ),
        ]),
        Line::from(vec![
            Span::raw(marker(SettingsRow::Tuning)),
            Span::styled(tuning, style(SettingsRow::Tuning)),
        ]),
        Line::from(vec![
            Span::raw(marker(SettingsRow::Entities)),
            Span::styled(
                format!("{} Recognize entities", checkbox(options.recognize_entities)),
                style(SettingsRow::Entities),
            ),
        ]),
        Line::from(vec![
            Span::raw(marker(SettingsRow::Sentiment)),
            Span::styled(
                format!("{} Analyze sentiment", checkbox(options.analyze_sentiment)),
                style(SettingsRow::Sentiment),
            ),
        ]),
        Line::from(Span::styled(options.algorithm.description(), muted)),
    ];

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(Block::default().padding(Padding::new(2, 2, 0, 0))),
        area,
    );
}

/// Render the submission outcome for a mode screen.
pub(crate) fn render_outcome(frame: &mut Frame, area: Rect, state: &SubmissionState) {
    let mut lines: Vec<Line> = Vec::new();

    match state {
        SubmissionState::Idle => {}
        SubmissionState::Pending => {
            lines.push(Line::from(Span::styled(
                "Summarizing...",
                Style::default().fg(Color::Yellow),
            )));
        }
        SubmissionState::Failed { message } => {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        SubmissionState::Succeeded { result, .. } => {
            lines.push(Line::from(Span::styled(
                "Summary",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(result.summary.clone()));

            if let Some(entities) = state.visible_entities() {
                lines.push(Line::default());
                if entities.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "No entities found.",
                        Style::default().fg(Color::DarkGray),
                    )));
                } else {
                    let mut spans = vec![Span::styled(
                        "Entities: ",
                        Style::default().add_modifier(Modifier::BOLD),
                    )];
                    for entity in entities {
                        spans.push(Span::styled(
                            entity.text.clone(),
                            Style::default().fg(Color::Cyan),
                        ));
                        spans.push(Span::styled(
                            format!(" [{}]  ", entity.label.as_str()),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    lines.push(Line::from(spans));
                }
            }

            if let Some(sentiment) = state.visible_sentiment() {
                let color = match sentiment.label {
                    SentimentLabel::Positive => Color::Green,
                    SentimentLabel::Negative => Color::Red,
                    SentimentLabel::Neutral => Color::DarkGray,
                };
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled("Sentiment: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("{} ({:.2})", sentiment.label.as_str(), sentiment.score),
                        Style::default().fg(color),
                    ),
                ]));
            }
        }
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().padding(Padding::new(2, 2, 0, 0))),
        area,
    );
}

/// Render the title row shared by the mode screens.
pub(crate) fn render_title(frame: &mut Frame, area: Rect, title: &str) {
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                title.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Esc to go back)", Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0))),
        area,
    );
}

/// Render the Summarize button line.
pub(crate) fn render_submit(frame: &mut Frame, area: Rect, focused: bool, pending: bool) {
    let label = if pending {
        "[ Summarizing... ]"
    } else {
        "[ Summarize ]"
    };
    let style = if pending {
        Style::default().fg(Color::DarkGray)
    } else {
        focused_style(focused)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style)))
            .block(Block::default().padding(Padding::new(2, 2, 0, 0))),
        area,
    );
}
