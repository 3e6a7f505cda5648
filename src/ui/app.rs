//! Application state and event loop.
//!
//! `App` owns the three shared pieces (the summarize options, the session
//! history, and the service client) and mounts exactly one screen at a
//! time. Keyboard input and async completions arrive over one channel;
//! completions are tagged with the mount sequence so a response for a screen
//! the user has already left is discarded along with that screen's state.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;

use crate::client::{self, AnalysisApi, AnalysisResult, Source};
use crate::history::HistoryLedger;
use crate::options::SummarizeOptions;

use super::screens::{DirectScreen, LandingScreen, ModeCommand, SampleScreen, UrlScreen};

/// The four top-level views of the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Direct,
    Url,
    Sample,
}

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// Raw terminal input, forwarded by the input thread.
    Input(Event),
    /// A summarize call finished. Carries the mode it was submitted from,
    /// the mount sequence at dispatch time, and the options snapshot the
    /// request was made with.
    Resolved {
        view: View,
        seq: u64,
        outcome: Result<AnalysisResult, String>,
        options: SummarizeOptions,
    },
    /// The sample-text fetch finished.
    SampleFetched {
        seq: u64,
        outcome: Result<String, String>,
    },
}

/// Which screen is currently mounted.
enum Screen {
    Landing(LandingScreen),
    Direct(DirectScreen),
    Url(UrlScreen),
    Sample(SampleScreen),
}

impl Screen {
    fn view(&self) -> View {
        match self {
            Screen::Landing(_) => View::Landing,
            Screen::Direct(_) => View::Direct,
            Screen::Url(_) => View::Url,
            Screen::Sample(_) => View::Sample,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// What a key press asks the app to do, computed while the screen is
/// borrowed and applied afterwards.
enum AfterKey {
    Nothing,
    Quit,
    Navigate(View),
    Apply(View, ModeCommand),
}

pub struct App {
    client: Arc<dyn AnalysisApi + Send + Sync>,
    options: SummarizeOptions,
    ledger: HistoryLedger,
    screen: Screen,
    /// Bumped on every navigation; completions carrying an older value
    /// belong to an unmounted screen and are dropped.
    seq: u64,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(client: Arc<dyn AnalysisApi + Send + Sync>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            options: SummarizeOptions::default(),
            ledger: HistoryLedger::new(),
            screen: Screen::Landing(LandingScreen::new()),
            seq: 0,
            tx,
            rx,
        }
    }

    /// Drive the event loop until the user quits.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        spawn_input_thread(self.tx.clone());

        loop {
            terminal.draw(|frame| self.render(frame))?;

            let Some(event) = self.rx.recv().await else {
                return Ok(());
            };
            if self.on_event(event) == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Landing(screen) => screen.render(frame, &self.ledger),
            Screen::Direct(screen) => screen.render(frame, &self.options),
            Screen::Url(screen) => screen.render(frame, &self.options),
            Screen::Sample(screen) => screen.render(frame, &self.options),
        }
    }

    pub(crate) fn on_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key)
            }
            AppEvent::Input(_) => Flow::Continue,
            AppEvent::Resolved {
                view,
                seq,
                outcome,
                options,
            } => {
                self.on_resolved(view, seq, outcome, options);
                Flow::Continue
            }
            AppEvent::SampleFetched { seq, outcome } => {
                self.on_sample_fetched(seq, outcome);
                Flow::Continue
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match self.route_key(key) {
            AfterKey::Nothing => Flow::Continue,
            AfterKey::Quit => Flow::Quit,
            AfterKey::Navigate(view) => {
                self.navigate(view);
                Flow::Continue
            }
            AfterKey::Apply(view, command) => {
                self.apply(view, command);
                Flow::Continue
            }
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> AfterKey {
        match &mut self.screen {
            Screen::Landing(landing) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => AfterKey::Quit,
                KeyCode::Up | KeyCode::Char('k') => {
                    landing.move_up();
                    AfterKey::Nothing
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    landing.move_down();
                    AfterKey::Nothing
                }
                KeyCode::Enter => AfterKey::Navigate(landing.select()),
                _ => AfterKey::Nothing,
            },
            Screen::Direct(screen) => match screen.handle_key(key, &self.options) {
                Some(command) => AfterKey::Apply(View::Direct, command),
                None => AfterKey::Nothing,
            },
            Screen::Url(screen) => match screen.handle_key(key, &self.options) {
                Some(command) => AfterKey::Apply(View::Url, command),
                None => AfterKey::Nothing,
            },
            Screen::Sample(screen) => match screen.handle_key(key, &self.options) {
                Some(command) => AfterKey::Apply(View::Sample, command),
                None => AfterKey::Nothing,
            },
        }
    }

    fn apply(&mut self, view: View, command: ModeCommand) {
        match command {
            ModeCommand::Back => self.navigate(View::Landing),
            ModeCommand::ReplaceOptions(next) => self.replace_options(next),
            ModeCommand::Submit => self.submit(view),
        }
    }

    /// Mount a screen. The previous screen's local state is discarded;
    /// options and history persist.
    fn navigate(&mut self, view: View) {
        self.seq += 1;
        self.screen = match view {
            View::Landing => Screen::Landing(LandingScreen::new()),
            View::Direct => Screen::Direct(DirectScreen::new()),
            View::Url => Screen::Url(UrlScreen::new()),
            View::Sample => {
                self.fetch_sample();
                Screen::Sample(SampleScreen::new())
            }
        };
    }

    /// The single entry point for options changes.
    fn replace_options(&mut self, next: SummarizeOptions) {
        self.options = next;
    }

    /// Start a submission for the mounted mode, unless its controller
    /// refuses (empty source or already pending).
    fn submit(&mut self, view: View) {
        let (source, controller) = match &mut self.screen {
            Screen::Direct(screen) => (screen.source(), &mut screen.submission),
            Screen::Url(screen) => (screen.source(), &mut screen.submission),
            Screen::Sample(screen) => (screen.source(), &mut screen.submission),
            Screen::Landing(_) => return,
        };
        if let Some(snapshot) = controller.begin(&source, &self.options) {
            self.dispatch(view, source, snapshot);
        }
    }

    fn dispatch(&self, view: View, source: Source, snapshot: SummarizeOptions) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let seq = self.seq;
        tokio::spawn(async move {
            let outcome = client::submit(client.as_ref(), &source, &snapshot)
                .await
                .map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::Resolved {
                view,
                seq,
                outcome,
                options: snapshot,
            });
        });
    }

    fn fetch_sample(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let seq = self.seq;
        tokio::spawn(async move {
            let outcome = client.fetch_sample().await.map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::SampleFetched { seq, outcome });
        });
    }

    fn on_resolved(
        &mut self,
        view: View,
        seq: u64,
        outcome: Result<AnalysisResult, String>,
        options: SummarizeOptions,
    ) {
        if seq != self.seq || view != self.screen.view() {
            return;
        }
        let controller = match &mut self.screen {
            Screen::Direct(screen) => &mut screen.submission,
            Screen::Url(screen) => &mut screen.submission,
            Screen::Sample(screen) => &mut screen.submission,
            Screen::Landing(_) => return,
        };
        match outcome {
            Ok(result) => {
                self.ledger.append(&result.summary);
                controller.succeed(result, options);
            }
            Err(message) => controller.fail(message),
        }
    }

    fn on_sample_fetched(&mut self, seq: u64, outcome: Result<String, String>) {
        if seq != self.seq {
            return;
        }
        if let Screen::Sample(screen) = &mut self.screen {
            screen.apply_fetch(outcome);
        }
    }
}

/// Forward terminal input into the app channel from a dedicated thread,
/// leaving the async runtime free for service calls.
fn spawn_input_thread(tx: mpsc::UnboundedSender<AppEvent>) {
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(event) => {
                if tx.send(AppEvent::Input(event)).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
