use crate::{
    feeders::spawn_tui_feeders,
    form::{DigestForm, FormInput},
    panel::ResultPanel,
    view::{self, ViewSnap},
};
use anyhow::Result;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use roundup_core::{DigestError, DigestOutcome, DigestPipeline, PostSource, Summarizer};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const MAILBOX: usize = 256;

pub enum TuiMsg {
    InputEvent(CtEvent),
    Tick,
    DigestDone(Result<DigestOutcome, DigestError>),
    OpError(String),
}

/// Capabilities a digest run needs; cloned into each background run.
#[derive(Clone)]
pub struct DigestDeps {
    pub source: Arc<dyn PostSource>,
    pub summarizer: Arc<dyn Summarizer>,
    pub pipeline: DigestPipeline,
}

enum Action {
    Generate(FormInput),
    Quit,
}

/// Terminal-independent UI state.
struct TuiState {
    form: DigestForm,
    panel: ResultPanel,
    scroll: usize,
    busy: bool,
    spin_idx: usize,
    dirty: bool,
}

impl TuiState {
    fn new(form: DigestForm) -> Self {
        Self {
            form,
            panel: ResultPanel::Hint,
            scroll: 0,
            busy: false,
            spin_idx: 0,
            dirty: true,
        }
    }

    fn spinner(&self) -> &'static str {
        if self.busy {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn step_spinner(&mut self) {
        if self.busy {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn show(&mut self, panel: ResultPanel) {
        self.panel = panel;
        self.scroll = 0;
        self.dirty = true;
    }

    /// A second Generate while a run is in flight is ignored.
    fn submit(&mut self) -> Option<Action> {
        if self.busy {
            return None;
        }
        match self.form.validate() {
            Ok(input) => {
                self.busy = true;
                self.show(ResultPanel::Running {
                    list_id: input.list_id.clone(),
                });
                Some(Action::Generate(input))
            }
            Err(e) => {
                self.show(ResultPanel::InvalidInput(e.to_string()));
                None
            }
        }
    }

    fn finish(&mut self, result: Result<DigestOutcome, DigestError>) {
        self.busy = false;
        self.show(ResultPanel::from_result(&result));
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(Action::Quit),
            (KeyCode::Tab, _) => self.form.focus_next(),
            (KeyCode::BackTab, _) => self.form.focus_prev(),
            (KeyCode::Enter, _) => return self.submit(),
            (KeyCode::Up, _) => self.scroll = self.scroll.saturating_sub(1),
            (KeyCode::Down, _) => self.scroll = self.scroll.saturating_add(1),
            (KeyCode::PageUp, _) => self.scroll = self.scroll.saturating_sub(5),
            (KeyCode::PageDown, _) => self.scroll = self.scroll.saturating_add(5),
            (code, _) => {
                let Some(input) = self.form.focused_input_mut() else {
                    return None;
                };
                match code {
                    KeyCode::Left => input.left(),
                    KeyCode::Right => input.right(),
                    KeyCode::Home => input.home(),
                    KeyCode::End => input.end(),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Esc => input.clear(),
                    KeyCode::Char(ch) => input.insert(ch),
                    _ => return None,
                }
            }
        }
        self.dirty = true;
        None
    }
}

pub struct TuiApp {
    state: TuiState,
    deps: DigestDeps,
    tx: mpsc::Sender<TuiMsg>,
    shutdown: CancellationToken,

    term: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,
}

impl TuiApp {
    pub fn new(
        deps: DigestDeps,
        form: DigestForm,
        tx: mpsc::Sender<TuiMsg>,
        shutdown: CancellationToken,
    ) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        Ok(Self {
            state: TuiState::new(form),
            deps,
            tx,
            shutdown,
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
        })
    }

    /// Process messages until shutdown or until every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::Receiver<TuiMsg>) -> Result<()> {
        while let Some(msg) = rx.recv().await {
            if !self.handle(msg)? {
                break;
            }
        }
        self.shutdown.cancel();
        Ok(())
    }

    fn handle(&mut self, msg: TuiMsg) -> Result<bool> {
        match msg {
            TuiMsg::InputEvent(CtEvent::Key(key)) => match self.state.handle_key(key) {
                Some(Action::Generate(input)) => self.spawn_digest(input),
                Some(Action::Quit) => return Ok(false),
                None => {}
            },
            TuiMsg::InputEvent(CtEvent::Resize(..)) => self.state.dirty = true,
            TuiMsg::InputEvent(_) => {}
            TuiMsg::DigestDone(result) => self.state.finish(result),
            TuiMsg::OpError(e) => warn!(error = %e, "tui feeder error"),
            TuiMsg::Tick => {
                self.state.step_spinner();
                if self.state.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.state.dirty = false;
                }
            }
        }
        Ok(true)
    }

    fn draw(&mut self) -> Result<()> {
        let snap = ViewSnap {
            form: &self.state.form,
            panel: &self.state.panel,
            scroll: self.state.scroll,
            busy: self.state.busy,
            spinner: self.state.spinner(),
        };
        self.state.scroll = view::draw(&mut self.term, &snap)?;
        Ok(())
    }

    fn spawn_digest(&self, input: FormInput) {
        let deps = self.deps.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match input.window() {
                Ok(window) => {
                    info!(
                        list_id = %input.list_id,
                        start = %window.start(),
                        end = %window.end(),
                        "digest requested"
                    );
                    deps.pipeline
                        .digest_from_source(
                            deps.source.as_ref(),
                            &input.list_id,
                            window.start(),
                            window.end(),
                            deps.summarizer.as_ref(),
                        )
                        .await
                }
                Err(e) => Err(e),
            };
            match &result {
                Ok(DigestOutcome::Digest(text)) => {
                    info!(list_id = %input.list_id, chars = text.len(), "digest ready")
                }
                Ok(DigestOutcome::NothingToSummarize) => {
                    info!(list_id = %input.list_id, "no posts in window")
                }
                Err(e) => warn!(list_id = %input.list_id, error = %e, "digest failed"),
            }
            let _ = tx.send(TuiMsg::DigestDone(result)).await;
        });
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Take over the terminal and run the form until the user quits.
pub async fn run_tui(deps: DigestDeps, form: DigestForm) -> Result<()> {
    let (tx, rx) = mpsc::channel(MAILBOX);
    let shutdown = CancellationToken::new();
    let app = TuiApp::new(deps, form, tx.clone(), shutdown.clone())?;
    spawn_tui_feeders(tx, shutdown);
    app.run(rx).await
}
