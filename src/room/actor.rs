//! Room actor implementation with async message handling.

use super::{
    RoomId,
    errors::RoomError,
    messages::{RoomMessage, RoomResponse, RoomStatus},
};
use crate::game::{
    Game, GameState,
    entities::{Answer, Player, Score},
};
use crate::stats::{GameReport, ScoreSink};
use chrono::Utc;
use std::sync::Arc;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, interval},
};

/// Room actor handle for sending messages
#[derive(Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    room_id: RoomId,
}

impl RoomHandle {
    /// Create a new room handle
    #[must_use]
    pub fn new(sender: mpsc::Sender<RoomMessage>, room_id: RoomId) -> Self {
        Self { sender, room_id }
    }

    /// Get room ID
    #[must_use]
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Send a message to the room
    pub async fn send(&self, message: RoomMessage) -> Result<(), RoomError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| RoomError::RoomUnavailable)
    }

    /// Admit a player to the round
    pub async fn join(&self, player: Player) -> Result<(), RoomError> {
        self.request(|response| RoomMessage::Join { player, response })
            .await
    }

    /// Open the submission window
    pub async fn start(&self) -> Result<(), RoomError> {
        self.request(|response| RoomMessage::Start { response }).await
    }

    /// Grade one player's answer batch
    pub async fn submit_answers(
        &self,
        player: Player,
        answers: Vec<Answer>,
    ) -> Result<(), RoomError> {
        self.request(|response| RoomMessage::SubmitAnswers {
            player,
            answers,
            response,
        })
        .await
    }

    /// Fetch the ranked results of a closed round
    pub async fn results(&self) -> Result<Vec<Score>, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::GetResults { response: tx }).await?;
        let scores = rx.await.map_err(|_| RoomError::RoomUnavailable)??;
        Ok(scores)
    }

    /// Get a snapshot of the room
    pub async fn status(&self) -> Result<RoomStatus, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::GetStatus { response: tx }).await?;
        rx.await.map_err(|_| RoomError::RoomUnavailable)
    }

    /// End the round ahead of its deadline
    pub async fn end_round(&self) -> Result<(), RoomError> {
        self.request(|response| RoomMessage::EndRound { response })
            .await
    }

    /// Shut the room down
    pub async fn close(&self) -> Result<(), RoomError> {
        self.request(|response| RoomMessage::Close { response }).await
    }

    async fn request(
        &self,
        message: impl FnOnce(oneshot::Sender<RoomResponse>) -> RoomMessage,
    ) -> Result<(), RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(message(tx)).await?;
        match rx.await.map_err(|_| RoomError::RoomUnavailable)? {
            RoomResponse::Success => Ok(()),
            RoomResponse::Rejected(error) => Err(RoomError::Game(error)),
        }
    }
}

/// Room actor hosting a single live game
pub struct RoomActor {
    /// Room ID
    id: RoomId,

    /// Room name
    name: String,

    /// The round being played; owned exclusively, so all access is
    /// serialized through the inbox
    game: Game,

    /// Message inbox
    inbox: mpsc::Receiver<RoomMessage>,

    /// Recording backend for finished rounds
    sink: Arc<dyn ScoreSink>,

    /// Whether the final scores have reached the sink
    results_published: bool,

    /// Shutdown flag
    is_shutdown: bool,
}

impl RoomActor {
    /// Create a new room actor and the handle for talking to it
    pub fn new(
        id: RoomId,
        name: String,
        game: Game,
        sink: Arc<dyn ScoreSink>,
    ) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(100);

        let actor = Self {
            id,
            name,
            game,
            inbox,
            sink,
            results_published: false,
            is_shutdown: false,
        };

        let handle = RoomHandle::new(sender, id);

        (actor, handle)
    }

    /// Run the room actor event loop
    pub async fn run(mut self) {
        log::info!("room {} '{}' open", self.id, self.name);

        // Drives the deadline-based closure of the game's lazy lifecycle
        let mut tick_interval = interval(Duration::from_secs(1));

        loop {
            tokio::select! {
                maybe_message = self.inbox.recv() => match maybe_message {
                    Some(message) => {
                        self.handle_message(message).await;
                        if self.is_shutdown {
                            break;
                        }
                    }
                    // All handles dropped; nobody can reach this room anymore
                    None => break,
                },

                _ = tick_interval.tick() => {
                    self.tick().await;
                }
            }
        }

        log::info!("room {} '{}' closed", self.id, self.name);
    }

    /// Handle a room message
    async fn handle_message(&mut self, message: RoomMessage) {
        match message {
            RoomMessage::Join { player, response } => {
                log::debug!("room {}: {player} joining", self.id);
                self.game.add_player(player);
                let _ = response.send(RoomResponse::Success);
            }

            RoomMessage::Start { response } => {
                self.game.start();
                let _ = response.send(RoomResponse::Success);
            }

            RoomMessage::SubmitAnswers {
                player,
                answers,
                response,
            } => {
                let result = match self.game.evaluate_answers(&player, &answers) {
                    Ok(()) => RoomResponse::Success,
                    Err(error) => RoomResponse::Rejected(error),
                };
                let _ = response.send(result);
            }

            RoomMessage::GetResults { response } => {
                let _ = response.send(self.game.check_scores());
            }

            RoomMessage::GetStatus { response } => {
                let status = self.status();
                let _ = response.send(status);
            }

            RoomMessage::EndRound { response } => {
                self.game.close();
                let _ = response.send(RoomResponse::Success);
                self.publish_results().await;
            }

            RoomMessage::Close { response } => {
                self.game.close();
                self.publish_results().await;
                self.is_shutdown = true;
                let _ = response.send(RoomResponse::Success);
            }

            RoomMessage::Tick => {
                self.tick().await;
            }
        }

        self.log_events();
    }

    /// Advance the game's lazy lifecycle (called periodically)
    async fn tick(&mut self) {
        if self.game.current_state() == GameState::Closed {
            self.publish_results().await;
        }
        self.log_events();
    }

    /// Hand the final scores to the sink, exactly once. A failed record
    /// attempt is retried on a later tick.
    async fn publish_results(&mut self) {
        if self.results_published {
            return;
        }
        if let Ok(scores) = self.game.check_scores() {
            let report = GameReport {
                room_id: self.id,
                category: self.game.category().clone(),
                scores,
                finished_at: Utc::now(),
            };
            match self.sink.record(report).await {
                Ok(()) => {
                    self.results_published = true;
                    log::info!("room {}: final scores recorded", self.id);
                }
                Err(error) => {
                    log::error!("room {}: failed to record final scores: {error}", self.id);
                }
            }
        }
    }

    fn status(&mut self) -> RoomStatus {
        RoomStatus {
            room_id: self.id,
            name: self.name.clone(),
            state: self.game.current_state(),
            category: self.game.category().name.clone(),
            question_count: self.game.questions().len(),
            player_count: self.game.player_count(),
            players: self
                .game
                .players()
                .iter()
                .map(|player| player.name.to_string())
                .collect(),
            scored_count: self.game.scored_count(),
        }
    }

    fn log_events(&mut self) {
        for event in self.game.drain_events() {
            log::info!("room {}: {event}", self.id);
        }
    }
}
