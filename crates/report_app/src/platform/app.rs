use std::time::Duration;

use anyhow::Context;
use ratatui::crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use report_core::{update, AppState, AppViewModel, Msg};
use report_logging::{report_debug, report_info};

use super::config::AppConfig;
use super::controller::{Controller, Intent};
use super::effects::EffectRunner;
use super::persistence;
use super::ui;

/// Owns the state, the effect runner and the presenter for one session.
struct App {
    state: AppState,
    view: AppViewModel,
    effects: EffectRunner,
    controller: Controller,
    poll_interval: Duration,
    exit: bool,
}

impl App {
    fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let state = AppState::with_settings(config.view_settings());
        let view = state.view();
        Ok(Self {
            state,
            view,
            effects: EffectRunner::new(config).context("starting engine")?,
            controller: Controller::new(),
            poll_interval: Duration::from_millis(config.event_poll_ms.max(10)),
            exit: false,
        })
    }

    fn dispatch(&mut self, msg: Msg) {
        report_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.effects.run(effects);
    }

    fn drain_engine(&mut self) {
        while let Some(msg) = self.effects.poll_engine() {
            self.dispatch(msg);
        }
    }

    fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                match self.controller.handle_key(key, &self.view) {
                    Some(Intent::Dispatch(msg)) => self.dispatch(msg),
                    Some(Intent::Quit) => self.exit = true,
                    None => {}
                }
            }
        }
        Ok(())
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.exit {
            terminal.draw(|frame| ui::render::draw(frame, &self.view, self.controller.focus()))?;
            self.handle_events()?;
            self.drain_engine();
        }
        Ok(())
    }
}

pub fn run_app(config: &AppConfig) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.dispatch(Msg::ThemeRestored(persistence::load_theme(&config.state_dir)));
    app.dispatch(Msg::AppStarted);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    report_info!("Session finished");
    result
}
