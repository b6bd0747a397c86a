use crate::tui::TuiMsg;
use crossterm::event;
use std::time::Duration;
use tokio::{sync::mpsc, time};
use tokio_util::sync::CancellationToken;

const INPUT_POLL: Duration = Duration::from_millis(100);
const TICK: Duration = Duration::from_millis(80);

/// Start the terminal-input and redraw-tick feeders; both exit once `shutdown` is cancelled.
pub fn spawn_tui_feeders(tx: mpsc::Sender<TuiMsg>, shutdown: CancellationToken) {
    let tx_in = tx.clone();
    let shutdown_input = shutdown.clone();
    // One blocking thread for the session; polling lets it notice cancellation.
    tokio::task::spawn_blocking(move || {
        while !shutdown_input.is_cancelled() {
            match event::poll(INPUT_POLL) {
                Ok(true) => {
                    let msg = match event::read() {
                        Ok(ev) => TuiMsg::InputEvent(ev),
                        Err(e) => TuiMsg::OpError(format!("input: {e}")),
                    };
                    if tx_in.blocking_send(msg).is_err() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    let _ = tx_in.blocking_send(TuiMsg::OpError(format!("input: {e}")));
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        let mut interval = time::interval(TICK);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {
                    let _ = tx.try_send(TuiMsg::Tick);
                }
            }
        }
    });
}
