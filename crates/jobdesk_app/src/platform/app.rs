use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event};
use jobdesk_core::{update, AppState, Msg};
use jobdesk_logging::{desk_error, desk_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{is_interrupt, key_input, mouse_msg};
use super::logging;
use super::terminal::{install_panic_hook, TerminalGuard, Tui};
use super::ui::{self, constants::EVENT_POLL, HitMap};

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    logging::initialize(&cwd, logging::level_from_env());

    let config = AppConfig::load(&cwd);
    desk_info!(
        "Starting jobdesk against {} (poll every {}s)",
        config.api_url,
        config.poll_secs
    );

    let runner = EffectRunner::new(config.client_settings(), config.export_dir(&cwd))
        .with_context(|| format!("cannot use API url {:?}", config.api_url))?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    if let Some(interval) = config.poll_interval() {
        spawn_poll_timer(msg_tx.clone(), interval);
    }

    install_panic_hook();
    let (mut terminal, _guard) = TerminalGuard::enter()?;
    let result = event_loop(&mut terminal, &runner, &msg_tx, &msg_rx);
    if let Err(err) = &result {
        desk_error!("Event loop ended with error: {err:#}");
    }
    desk_info!("Shutting down");
    result
}

fn spawn_poll_timer(msg_tx: mpsc::Sender<Msg>, interval: Duration) {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if msg_tx.send(Msg::PollElapsed).is_err() {
            break;
        }
    });
}

fn event_loop(
    terminal: &mut Tui,
    runner: &EffectRunner,
    msg_tx: &mpsc::Sender<Msg>,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let mut state = AppState::new();
    let mut hits = HitMap::default();
    let mut redraw = true;
    let _ = msg_tx.send(Msg::Mounted);

    loop {
        let mut inbox: Vec<Msg> = msg_rx.try_iter().collect();
        inbox.extend(runner.completed());
        for msg in inbox {
            let (next, effects) = update(state, msg);
            state = next;
            runner.run(effects, msg_tx);
        }

        if state.should_quit() {
            return Ok(());
        }
        if state.consume_dirty() || redraw {
            let view = state.view();
            terminal.draw(|frame| hits = ui::render(frame, &view))?;
            redraw = false;
        }

        if !event::poll(EVENT_POLL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if is_interrupt(&key) => return Ok(()),
            Event::Key(key) => {
                if let Some(input) = key_input(&key) {
                    let _ = msg_tx.send(Msg::Key(input));
                }
            }
            Event::Mouse(mouse) => {
                if let Some(msg) = mouse_msg(&mouse, &hits) {
                    let _ = msg_tx.send(msg);
                }
            }
            Event::Resize(..) => redraw = true,
            _ => {}
        }
    }
}
