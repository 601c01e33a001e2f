//! A terminal client for logging into the campus rides service

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

/// Form field cycling helper
mod form_fields;

use app::{App, Effect, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use rides_core::auth::Client;
use rides_core::store::{FileStore, TokenStore};
use std::{fs, io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    let data_dir = config.data_dir();
    fs::create_dir_all(&data_dir)?;

    // The terminal owns stdout, so diagnostics go to a file instead. The
    // guard has to outlive the app or buffered lines get dropped.
    let (log_writer, _log_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&data_dir, "rides.log"));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(log_writer)
        .with_ansi(false)
        .init();

    let store = Arc::new(FileStore::new(&data_dir));

    let saved_token = store.get().unwrap_or_else(|err| {
        tracing::warn!(?err, "could not read the saved token");
        None
    });

    let client = Client::with_auth(config.server.clone(), saved_token);
    let context = Arc::new(EffectContext::new(store));

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, App::new(client), context).await;
    ratatui::restore();
    res
}

/// Manage the lifecycle of the app
async fn run(
    mut terminal: DefaultTerminal,
    mut app: App,
    context: Arc<EffectContext>,
) -> io::Result<ExitCode> {
    // We expect side-effectful behaviors (that is, things like FS or
    // network access) to take place via async tasks. Once those tasks are
    // done, we read their results off of a channel. We keep track of
    // outstanding effects so we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects = Vec::with_capacity(1);

    // Initialize the app, spawn tasks for its startup effects, and render
    // the first frame.
    for effect in app.init() {
        outstanding_effects.push(spawn_effect_task(
            effect_tx.clone(),
            Arc::clone(&context),
            effect,
        ));
    }
    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Start our event loop!
    loop {
        // First thing we do is wait for an event. This can be either
        // external input or the async result of an effect. This is an
        // `Option<_>` because we don't necessarily need to pay attention
        // to every single piece of external input.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        // Once we have an action, we send it to `app.handle` and spawn a
        // task for each effect that comes back, the same way we handled
        // init.
        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&context),
                    effect,
                ));
            }
        }

        // Now that we handled the event, we re-render to display any
        // changes the app cares about.
        terminal.draw(|frame| app.render(frame))?;

        // If the message we just handled was from an outstanding effect,
        // we need to remove the completed `JoinHandle` from the list.
        // This list should never be too long (since we do this on every
        // pass through the event loop) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // Finally, if the app indicates that it should exit, we wait for
        // all outstanding effects to finish (e.g. so we can persist final
        // state to disk) before exiting the loop with the exit code from
        // the app.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                let _ = effect.await;
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    context: Arc<EffectContext>,
    effect: Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&context).await {
            // The channel only closes when we're shutting down, and it's
            // fine to drop messages then.
            let _ = effect_tx.send(next_action);
        }
    })
}
