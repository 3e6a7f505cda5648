//! Landing screen: input mode cards and the session history.

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Padding, Paragraph};
use ratatui::Frame;

use crate::history::HistoryLedger;
use crate::ui::app::View;

/// The three ways into the workspace.
const CARDS: [(&str, &str, View); 3] = [
    (
        "Direct Text",
        "Paste or type your text directly",
        View::Direct,
    ),
    ("URL Input", "Extract text from web pages", View::Url),
    ("Sample Text", "Try with pre-loaded examples", View::Sample),
];

pub struct LandingScreen {
    selected: usize,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < CARDS.len() {
            self.selected += 1;
        }
    }

    pub fn select(&self) -> View {
        CARDS[self.selected].2
    }

    pub fn render(&self, frame: &mut Frame, ledger: &HistoryLedger) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(4),                         // title
            Constraint::Length(CARDS.len() as u16 + 1),    // cards
            Constraint::Min(0),                            // history
            Constraint::Length(1),                         // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Text Summarizer",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Choose an input method to get started.",
                muted,
            )),
        ])
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(title, chunks[0]);

        let cards: Vec<ListItem> = CARDS
            .iter()
            .enumerate()
            .map(|(i, (name, description, _))| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let pointer = if i == self.selected { "› " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(pointer, style),
                    Span::styled(format!("{name:<14}"), style),
                    Span::styled((*description).to_string(), muted),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(cards).block(Block::default().padding(Padding::new(2, 2, 0, 0))),
            chunks[1],
        );

        self.render_history(frame, chunks[2], ledger);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " ↑↓ navigate  ⏎ select  q quit",
                muted,
            ))),
            chunks[3],
        );
    }

    fn render_history(
        &self,
        frame: &mut Frame,
        area: ratatui::layout::Rect,
        ledger: &HistoryLedger,
    ) {
        let muted = Style::default().fg(Color::DarkGray);
        let mut lines = vec![Line::from(Span::styled(
            "Summary History",
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        if ledger.is_empty() {
            lines.push(Line::from(Span::styled("No summaries generated yet.", muted)));
        } else {
            for entry in ledger.entries() {
                lines.push(Line::from(vec![
                    Span::styled(
                        entry.timestamp.format("%Y-%m-%d %H:%M  ").to_string(),
                        muted,
                    ),
                    Span::styled(entry.text.clone(), Style::default().fg(Color::Gray)),
                ]));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).block(Block::default().padding(Padding::new(2, 2, 1, 0))),
            area,
        );
    }
}
