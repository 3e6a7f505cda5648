//! Sample text mode.
//!
//! Mounting this screen kicks off the sample fetch; until it lands the
//! selector is disabled. The fetched text becomes a single selectable option,
//! and submitting summarizes the selected text through the text operation.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};
use ratatui::Frame;

use crate::client::Source;
use crate::options::SummarizeOptions;
use crate::submission::SubmissionController;

use super::{
    render_outcome, render_settings, render_submit, render_title, settings_key, FormFocus,
    ModeCommand, SETTINGS_HEIGHT,
};

/// A preloaded sample offered in the selector.
struct SampleText {
    title: String,
    text: String,
}

/// Selector contents, tracking the fetch.
enum SampleStore {
    Loading,
    Failed(String),
    Loaded {
        samples: Vec<SampleText>,
        cursor: usize,
        selected: Option<usize>,
    },
}

pub struct SampleScreen {
    store: SampleStore,
    focus: FormFocus,
    pub(crate) submission: SubmissionController,
}

impl SampleScreen {
    pub fn new() -> Self {
        Self {
            store: SampleStore::Loading,
            focus: FormFocus::Input,
            submission: SubmissionController::new(),
        }
    }

    /// Apply the result of the mount-time fetch.
    ///
    /// The service returns one sample document; it is offered as a single
    /// titled option.
    pub fn apply_fetch(&mut self, outcome: Result<String, String>) {
        self.store = match outcome {
            Ok(text) => SampleStore::Loaded {
                samples: vec![SampleText {
                    title: "Sample Article".to_string(),
                    text,
                }],
                cursor: 0,
                selected: None,
            },
            Err(message) => SampleStore::Failed(message),
        };
    }

    /// The fetch error, if the fetch failed.
    pub fn fetch_error(&self) -> Option<&str> {
        match &self.store {
            SampleStore::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The selected sample's text; empty until something is selected.
    pub fn source(&self) -> Source {
        let text = match &self.store {
            SampleStore::Loaded {
                samples,
                selected: Some(index),
                ..
            } => samples.get(*index).map(|s| s.text.clone()).unwrap_or_default(),
            _ => String::new(),
        };
        Source::Text(text)
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        options: &SummarizeOptions,
    ) -> Option<ModeCommand> {
        match key.code {
            KeyCode::Esc => Some(ModeCommand::Back),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            _ => match self.focus {
                FormFocus::Input => {
                    self.selector_key(key);
                    None
                }
                FormFocus::Submit => match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') => Some(ModeCommand::Submit),
                    _ => None,
                },
                FormFocus::Settings(row) => settings_key(key, row, options),
            },
        }
    }

    /// Selector interaction; inert unless the fetch has landed.
    fn selector_key(&mut self, key: KeyEvent) {
        let SampleStore::Loaded {
            samples,
            cursor,
            selected,
        } = &mut self.store
        else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if *cursor > 0 {
                    *cursor -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if *cursor + 1 < samples.len() {
                    *cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                *selected = Some(*cursor);
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, options: &SummarizeOptions) {
        let chunks = Layout::vertical([
            Constraint::Length(3),               // title
            Constraint::Length(4),               // selector
            Constraint::Length(1),               // submit
            Constraint::Length(SETTINGS_HEIGHT), // settings
            Constraint::Min(0),                  // outcome
        ])
        .split(frame.area());

        render_title(frame, chunks[0], "Sample Text");
        self.render_selector(frame, chunks[1]);

        render_submit(
            frame,
            chunks[2],
            self.focus == FormFocus::Submit,
            self.submission.is_pending(),
        );

        let settings_focus = match self.focus {
            FormFocus::Settings(row) => Some(row),
            _ => None,
        };
        render_settings(frame, chunks[3], options, settings_focus);

        render_outcome(frame, chunks[4], self.submission.state());
    }

    fn render_selector(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let muted = Style::default().fg(Color::DarkGray);
        let lines = match &self.store {
            SampleStore::Loading => vec![Line::from(Span::styled("Loading samples...", muted))],
            SampleStore::Failed(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))],
            SampleStore::Loaded {
                samples,
                cursor,
                selected,
            } => samples
                .iter()
                .enumerate()
                .map(|(i, sample)| {
                    let style = if i == *cursor && self.focus == FormFocus::Input {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    let mark = if *selected == Some(i) { "(•) " } else { "( ) " };
                    Line::from(vec![
                        Span::styled(mark, style),
                        Span::styled(sample.title.clone(), style),
                    ])
                })
                .collect(),
        };

        frame.render_widget(
            Paragraph::new(lines).block(Block::default().padding(Padding::new(2, 2, 0, 0))),
            area,
        );
    }
}
