//! Fixed-rate tick loop on a dedicated thread.
//!
//! Each iteration drains the control channel, runs one tick with
//! `dt = interval`, then sleeps for whatever is left of the interval. A tick
//! that overruns is followed immediately by the next one; missed ticks are
//! not made up.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use warsim_sim::SimulationEngine;

/// Control messages for the loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    /// Stop between ticks.
    Shutdown,
}

/// Summary returned when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopReport {
    pub ticks: u64,
    /// Ticks that took longer than the interval.
    pub overruns: u64,
}

pub struct TickLoopHandle {
    commands: mpsc::Sender<LoopCommand>,
    thread: JoinHandle<LoopReport>,
}

impl TickLoopHandle {
    /// Ask the loop to stop and wait for it.
    pub fn stop(self) -> LoopReport {
        // A send error means the loop already exited.
        let _ = self.commands.send(LoopCommand::Shutdown);
        match self.thread.join() {
            Ok(report) => report,
            Err(_) => {
                tracing::error!("tick loop thread panicked");
                LoopReport::default()
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}

/// Move `engine` onto a new thread and tick it every `interval`.
pub fn spawn_tick_loop(engine: SimulationEngine, interval: Duration) -> io::Result<TickLoopHandle> {
    let (commands, receiver) = mpsc::channel::<LoopCommand>();

    let thread = std::thread::Builder::new()
        .name("warsim-tick-loop".into())
        .spawn(move || run_tick_loop(engine, interval, receiver))?;

    Ok(TickLoopHandle { commands, thread })
}

fn run_tick_loop(
    mut engine: SimulationEngine,
    interval: Duration,
    receiver: mpsc::Receiver<LoopCommand>,
) -> LoopReport {
    let dt = interval.as_secs_f64();
    let mut report = LoopReport::default();
    tracing::info!(interval_ms = interval.as_millis() as u64, "tick loop started");

    loop {
        match receiver.try_recv() {
            Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => break,
            Err(mpsc::TryRecvError::Empty) => {}
        }

        let started = Instant::now();
        let state = engine.tick(dt);
        report.ticks += 1;

        let elapsed = started.elapsed();
        match interval.checked_sub(elapsed) {
            Some(remaining) => std::thread::sleep(remaining),
            None => {
                report.overruns += 1;
                tracing::warn!(
                    tick = state.tick,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "tick overran its interval"
                );
            }
        }
    }

    tracing::info!(ticks = report.ticks, overruns = report.overruns, "tick loop stopped");
    report
}
