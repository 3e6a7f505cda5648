//! URL input mode.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::client::Source;
use crate::options::SummarizeOptions;
use crate::submission::SubmissionController;

use super::{
    render_outcome, render_settings, render_submit, render_title, settings_key, FormFocus,
    ModeCommand, SETTINGS_HEIGHT,
};

pub struct UrlScreen {
    url: String,
    focus: FormFocus,
    pub(crate) submission: SubmissionController,
}

impl UrlScreen {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            focus: FormFocus::Input,
            submission: SubmissionController::new(),
        }
    }

    pub fn source(&self) -> Source {
        Source::Url(self.url.clone())
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
                FormFocus::Input => match key.code {
                    // Enter submits directly from the single-line field.
                    KeyCode::Enter => Some(ModeCommand::Submit),
                    KeyCode::Char(c) => {
                        self.url.push(c);
                        None
                    }
                    KeyCode::Backspace => {
                        self.url.pop();
                        None
                    }
                    _ => None,
                },
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
            Constraint::Length(3),               // url input
            Constraint::Length(1),               // submit
            Constraint::Length(SETTINGS_HEIGHT), // settings
            Constraint::Min(0),                  // outcome
        ])
        .split(frame.area());

        render_title(frame, chunks[0], "URL Input");

        let input_style = if self.focus == FormFocus::Input {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        let placeholder = self.url.is_empty();
        let shown = if placeholder {
            "Enter URL...".to_string()
        } else {
            self.url.clone()
        };
        let input = Paragraph::new(shown)
            .style(if placeholder {
                Style::default().fg(Color::DarkGray)
            } else {
                input_style
            })
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
