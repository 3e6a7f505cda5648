//! Direct text input mode.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::client::Source;
use crate::options::SummarizeOptions;
use crate::submission::SubmissionController;

use super::{
    render_outcome, render_settings, render_submit, render_title, settings_key, FormFocus,
    ModeCommand, SETTINGS_HEIGHT,
};

pub struct DirectScreen {
    text: String,
    focus: FormFocus,
    pub(crate) submission: SubmissionController,
}

impl DirectScreen {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            focus: FormFocus::Input,
            submission: SubmissionController::new(),
        }
    }

    pub fn source(&self) -> Source {
        Source::Text(self.text.clone())
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
                    match key.code {
                        KeyCode::Char(c) => self.text.push(c),
                        KeyCode::Enter => self.text.push('\n'),
                        KeyCode::Backspace => {
                            self.text.pop();
                        }
                        _ => {}
                    }
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

    pub fn render(&self, frame: &mut Frame, options: &SummarizeOptions) {
        let chunks = Layout::vertical([
            Constraint::Length(3),               // title
            Constraint::Length(8),               // text input
            Constraint::Length(1),               // submit
            Constraint::Length(SETTINGS_HEIGHT), // settings
            Constraint::Min(0),                  // outcome
        ])
        .split(frame.area());

        render_title(frame, chunks[0], "Direct Text Input");

        let input_style = if self.focus == FormFocus::Input {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        let placeholder = self.text.is_empty();
        let shown = if placeholder {
            "Paste your text here...".to_string()
        } else {
            self.text.clone()
        };
        let input = Paragraph::new(shown)
            .style(if placeholder {
                Style::default().fg(Color::DarkGray)
            } else {
                input_style
            })
            .wrap(Wrap { trim: false })
            .block(Block::bordered().border_style(input_style));
        frame.render_widget(input, chunks[1]);

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
}
