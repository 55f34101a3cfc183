use std::time::{Duration, Instant};

use blockfall_engine::{GameSession, SessionState, SpinDirection};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{best_score::BestScoreStore, ui::GameDisplay};

/// Cadence of the main loop (~60 Hz). Gravity is driven by the elapsed time
/// handed to the engine, not by the frame count, so a late frame never skips
/// game time.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub struct App {
    session: GameSession,
    store: BestScoreStore,
    show_ghost: bool,
    best_recorded: bool,
    is_exiting: bool,
}

impl App {
    pub fn new(seed: Option<u64>, show_ghost: bool, store: BestScoreStore) -> Self {
        let session = match seed {
            Some(seed) => GameSession::with_seed(seed),
            None => GameSession::new(),
        };
        Self {
            session,
            store,
            show_ghost,
            best_recorded: false,
            is_exiting: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let mut last_tick = Instant::now();
        while !self.is_exiting {
            terminal.draw(|frame| self.draw(frame))?;

            let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                self.handle_event(&event::read()?);
            }
            if last_tick.elapsed() >= TICK_INTERVAL {
                self.session.advance(last_tick.elapsed());
                last_tick = Instant::now();
            }

            self.record_best_if_over()?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        let is_running = self.session.state().is_running();
        match key.code {
            KeyCode::Left if is_running => _ = self.session.move_left(),
            KeyCode::Right if is_running => _ = self.session.move_right(),
            KeyCode::Down if is_running => self.session.soft_drop(),
            KeyCode::Up if is_running => _ = self.session.rotate(SpinDirection::Clockwise),
            KeyCode::Char(' ') if is_running => self.session.hard_drop(),
            KeyCode::Char('z') if is_running => {
                _ = self.session.rotate(SpinDirection::CounterClockwise);
            }
            KeyCode::Char('x') if is_running => _ = self.session.rotate(SpinDirection::Clockwise),
            KeyCode::Enter if self.session.state().is_ready() => self.session.start(),
            KeyCode::Char('p') => match self.session.state() {
                SessionState::Ready => self.session.start(),
                _ => self.session.toggle_pause(),
            },
            KeyCode::Char('r') if self.session.state().is_game_over() => self.reset(),
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.session.reset();
        self.best_recorded = false;
    }

    /// Persists the best score once per game, on the edge into game over.
    fn record_best_if_over(&mut self) -> anyhow::Result<()> {
        if self.session.state().is_game_over() && !self.best_recorded {
            self.best_recorded = true;
            self.store
                .record_if_beaten(self.session.progression().snapshot())?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let display = GameDisplay::new(&self.session, self.store.best_score())
            .show_ghost(self.show_ghost);
        let help_text = match self.session.state() {
            SessionState::Ready => "Controls: Enter (Start) | Q (Quit)",
            SessionState::Running => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ Z X (Rotate) | Space (Hard Drop) | P (Pause) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::GameOver => "Controls: R (New Game) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(24), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(help_text, help_area);
    }
}
