//! Room manager for spawning and managing multiple room actors.

use super::{
    RoomId,
    actor::{RoomActor, RoomHandle},
    config::RoomConfig,
    errors::RoomError,
    messages::RoomStatus,
};
use crate::catalog::Catalog;
use crate::game::Game;
use crate::stats::ScoreSink;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Room manager for running many concurrent rooms
pub struct RoomManager {
    /// Supplies categories and question draws
    catalog: Arc<dyn Catalog>,

    /// Receives every finished round's scores
    sink: Arc<dyn ScoreSink>,

    /// Active room handles
    rooms: Arc<RwLock<HashMap<RoomId, RoomHandle>>>,
}

impl RoomManager {
    /// Create a new room manager
    pub fn new(catalog: Arc<dyn Catalog>, sink: Arc<dyn ScoreSink>) -> Self {
        Self {
            catalog,
            sink,
            rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create and spawn a new room: draw the category and its questions
    /// from the catalog, build the game, and start the actor.
    pub async fn create_room(&self, config: RoomConfig) -> Result<RoomId, RoomError> {
        config.validate()?;

        let category = self.catalog.category(config.category_id).await?;
        let questions = self
            .catalog
            .draw_questions(config.category_id, config.question_count)
            .await?;
        let game = Game::with_settings(category, questions, config.settings.clone())?;

        let room_id = RoomId::new_v4();
        let (actor, handle) = RoomActor::new(
            room_id,
            config.name.clone(),
            game,
            Arc::clone(&self.sink),
        );

        let mut rooms = self.rooms.write().await;
        rooms.insert(room_id, handle);
        drop(rooms);

        tokio::spawn(actor.run());

        log::info!("created room {room_id} '{}'", config.name);

        Ok(room_id)
    }

    /// Get a room handle
    pub async fn get_room(&self, room_id: RoomId) -> Option<RoomHandle> {
        let rooms = self.rooms.read().await;
        rooms.get(&room_id).cloned()
    }

    /// Snapshot every active room
    pub async fn list_rooms(&self) -> Vec<RoomStatus> {
        let handles: Vec<RoomHandle> = {
            let rooms = self.rooms.read().await;
            rooms.values().cloned().collect()
        };

        let mut statuses = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Ok(status) = handle.status().await {
                statuses.push(status);
            }
        }
        statuses
    }

    /// Shut a room down and stop tracking it. The room publishes whatever
    /// results exist before it goes.
    pub async fn close_room(&self, room_id: RoomId) -> Result<(), RoomError> {
        let handle = self
            .get_room(room_id)
            .await
            .ok_or(RoomError::RoomNotFound(room_id))?;

        handle.close().await?;

        let mut rooms = self.rooms.write().await;
        rooms.remove(&room_id);
        drop(rooms);

        log::info!("closed room {room_id}");

        Ok(())
    }

    /// Get active room count
    pub async fn active_room_count(&self) -> usize {
        let rooms = self.rooms.read().await;
        rooms.len()
    }
}
