//! Tick driver for session players.
//!
//! A player lives inside exactly one tokio task. The task owns it, applies
//! commands from an mpsc channel, ticks it on an interval and broadcasts
//! every event. Completed records go straight to the history store.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::state::{CompletedRecord, PlayerAction, SessionPlayer, SessionSnapshot};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::storage::HistoryStore;

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 256;

enum Command<I> {
    Start(I),
    Pause,
    Resume,
    Act(PlayerAction),
    Cancel,
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}

pub struct SessionDriver<P: SessionPlayer> {
    player: P,
    history: Option<HistoryStore>,
    events: broadcast::Sender<Event>,
}

impl<P: SessionPlayer> SessionDriver<P> {
    /// Spawn the driver task on the current runtime.
    ///
    /// `tick` is the wall-clock length of one session second.
    pub fn spawn(player: P, tick: Duration, history: Option<HistoryStore>) -> SessionHandle<P::Item> {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);
        let driver = Self {
            player,
            history,
            events: event_tx.clone(),
        };
        let task = tokio::spawn(driver.run(command_rx, tick));
        SessionHandle {
            commands: command_tx,
            events: event_tx,
            task,
        }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command<P::Item>>, tick: Duration) {
        let mut ticker = interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval fires immediately.
        ticker.tick().await;
        tracing::debug!(kind = self.player.kind().as_str(), ?tick, "session driver started");

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    // A full second must pass before the first tick after a
                    // start or resume, but only when the state changed.
                    let mut restart_clock = false;
                    match command {
                        Command::Start(item) => {
                            let events = self.player.start(item);
                            restart_clock = !events.is_empty();
                            self.publish(events);
                        }
                        Command::Pause => {
                            let events = self.player.pause();
                            self.publish(events);
                        }
                        Command::Resume => {
                            let events = self.player.resume();
                            restart_clock = !events.is_empty();
                            self.publish(events);
                        }
                        Command::Act(action) => {
                            let events = self.player.act(action);
                            self.publish(events);
                        }
                        Command::Cancel => {
                            let events = self.player.cancel();
                            self.publish(events);
                        }
                        Command::Snapshot(reply) => {
                            let snapshot = self.player.snapshot();
                            self.publish(vec![Event::StateSnapshot {
                                snapshot: snapshot.clone(),
                                at: Utc::now(),
                            }]);
                            let _ = reply.send(snapshot);
                        }
                        Command::Shutdown => break,
                    }
                    if restart_clock {
                        ticker.reset();
                    }
                }
                _ = ticker.tick() => {
                    let events = self.player.tick();
                    self.publish(events);
                }
            }
            self.flush_completed();
        }
        tracing::debug!(kind = self.player.kind().as_str(), "session driver stopped");
    }

    fn publish(&self, events: Vec<Event>) {
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
    }

    fn flush_completed(&mut self) {
        let Some(record) = self.player.take_completed() else {
            return;
        };
        let Some(history) = self.history.as_ref() else {
            return;
        };
        match record {
            CompletedRecord::Workout(workout) => history.append_workout(workout),
            CompletedRecord::Meditation(session) => history.append_meditation(session),
        }
    }
}

/// Control side of a running [`SessionDriver`]. Dropping every handle
/// stops the task.
pub struct SessionHandle<I> {
    commands: mpsc::Sender<Command<I>>,
    events: broadcast::Sender<Event>,
    task: JoinHandle<()>,
}

impl<I: Send + 'static> SessionHandle<I> {
    /// Receive every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    async fn send(&self, command: Command<I>) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CoreError::DriverStopped)
    }

    pub async fn start(&self, item: I) -> Result<()> {
        self.send(Command::Start(item)).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.send(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<()> {
        self.send(Command::Resume).await
    }

    pub async fn skip(&self) -> Result<()> {
        self.send(Command::Act(PlayerAction::Skip)).await
    }

    pub async fn good_form(&self) -> Result<()> {
        self.send(Command::Act(PlayerAction::GoodForm)).await
    }

    pub async fn poor_form(&self) -> Result<()> {
        self.send(Command::Act(PlayerAction::PoorForm)).await
    }

    pub async fn respond(&self, success: bool) -> Result<()> {
        self.send(Command::Act(PlayerAction::Respond(success))).await
    }

    pub async fn cancel(&self) -> Result<()> {
        self.send(Command::Cancel).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| CoreError::DriverStopped)
    }

    /// Stop the driver and wait for the task to finish.
    pub async fn shutdown(self) -> Result<()> {
        // Already stopped is fine.
        let _ = self.commands.send(Command::Shutdown).await;
        self.task.await.map_err(|_| CoreError::DriverStopped)
    }
}
