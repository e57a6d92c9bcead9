//! Game loop thread — runs the session at a fixed tick rate and logs what
//! the wave engine reports.
//!
//! The session moves into the thread. Commands arrive over an `mpsc`
//! channel and the latest snapshot is shared for polling. Time is simulated:
//! every tick advances the session by `DT`, and realtime mode only adds a
//! sleep to the tick boundary.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use horde_core::commands::WaveCommand;
use horde_core::constants::{DT, TICK_RATE};
use horde_core::events::WaveEvent;
use horde_core::state::WaveSnapshot;
use horde_sim::Session;

use crate::state::{GameLoopCommand, LoopOptions, LoopOutcome, LoopReport};

/// Wall-clock duration of one tick in realtime mode.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawn the game loop on a new thread.
///
/// Returns the command sender and a handle that yields the run's report.
pub fn spawn_game_loop(
    session: Session,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<WaveSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("horde-game-loop".into())
        .spawn(move || run_game_loop(session, cmd_rx, &options, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// Runs until victory, game over, the time limit, or a shutdown.
pub fn run_game_loop(
    mut session: Session,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    options: &LoopOptions,
    latest_snapshot: &Mutex<Option<WaveSnapshot>>,
) -> LoopReport {
    let tick_limit = options.max_seconds.map(|secs| (secs / DT).round() as u64);
    let mut ticks: u64 = 0;
    let mut next_tick_time = Instant::now();
    let mut final_wave = None;

    let outcome = 'run: loop {
        // 1. Drain pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Wave(command)) => session.queue_command(command),
                Ok(GameLoopCommand::SetAutoDefend(enabled)) => session.set_auto_defend(enabled),
                Ok(GameLoopCommand::Shutdown) => break 'run LoopOutcome::Stopped,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run LoopOutcome::Stopped,
            }
        }

        // 2. Advance one tick
        let events = session.tick(DT);
        ticks += 1;

        // 3. Report events
        let mut finished = None;
        for event in &events {
            log_event(event);
            match event {
                WaveEvent::WaveCompleted { .. } if options.auto_advance => {
                    session.queue_command(WaveCommand::NextWave);
                }
                WaveEvent::AllWavesCompleted { .. } => finished = Some(LoopOutcome::Victory),
                WaveEvent::GameOverAcknowledged { stats, .. } => {
                    final_wave = Some(stats.clone());
                    finished = Some(LoopOutcome::GameOver);
                }
                _ => {}
            }
        }

        // 4. Publish the latest snapshot
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(session.snapshot());
        }

        if let Some(outcome) = finished {
            break outcome;
        }
        if tick_limit.is_some_and(|limit| ticks >= limit) {
            warn!("time limit reached on wave {}", session.snapshot().wave);
            break LoopOutcome::TimedOut;
        }

        // 5. Sleep until the next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; skip ahead instead of catching up.
                next_tick_time = now;
            }
        }
    };

    LoopReport {
        outcome,
        simulated_secs: ticks as f64 * DT,
        ticks,
        snapshot: session.snapshot(),
        waves: session.wave_history().to_vec(),
        final_wave,
    }
}

fn log_event(event: &WaveEvent) {
    match event {
        WaveEvent::PhaseChanged { from, to } => debug!("phase {from:?} -> {to:?}"),
        WaveEvent::WaveCountdownTick { value } => info!("countdown {value}"),
        WaveEvent::WaveStarted { wave_number } => info!("wave {wave_number} begins"),
        WaveEvent::SpawnRequested(req) => debug!(
            "spawn {} hp={} speed={} damage={} at ({:.1}, {:.1})",
            req.enemy_name, req.hp, req.speed, req.damage, req.position.x, req.position.y
        ),
        WaveEvent::WaveCompleted {
            wave_number,
            total_waves,
            stats,
        } => info!(
            "wave {wave_number}/{total_waves} complete: {} defeated, {} damage taken, {:.1}s",
            stats.enemies_defeated, stats.damage_received, stats.elapsed_secs
        ),
        WaveEvent::AllWavesCompleted { stats } => info!(
            "victory after wave {} ({} defeated in the last wave)",
            stats.wave_number, stats.enemies_defeated
        ),
        WaveEvent::GameOverAcknowledged {
            wave_number,
            total_waves,
            ..
        } => warn!("game over on wave {wave_number}/{total_waves}"),
    }
}
