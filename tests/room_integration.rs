/// Integration tests for room actor flows
///
/// These tests verify that the actor layer serializes concurrent access
/// to a live game: simultaneous submissions from one player collapse to
/// a single graded entry, distinct players are all graded, and finished
/// rounds are published to the score sink exactly once.
use async_trait::async_trait;
use pub_quiz::{
    Answer, CatalogError, Category, GameError, GameReport, GameState, InMemoryCatalog, Player,
    Question, RoomConfig, RoomError, RoomManager, ScoreSink, StatsError,
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct RecordingSink {
    reports: Mutex<Vec<GameReport>>,
}

#[async_trait]
impl ScoreSink for RecordingSink {
    async fn record(&self, report: GameReport) -> Result<(), StatsError> {
        self.reports.lock().await.push(report);
        Ok(())
    }
}

fn seeded_catalog() -> InMemoryCatalog {
    let questions = (0..12)
        .map(|i| Question::new(i, 1, &format!("question {i}")))
        .collect();
    InMemoryCatalog::new().with_category(Category::new(1, "General Knowledge"), questions)
}

fn manager_with_sink() -> (RoomManager, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let manager = RoomManager::new(Arc::new(seeded_catalog()), sink.clone());
    (manager, sink)
}

fn batch(correct: usize, total: usize) -> Vec<Answer> {
    (0..total)
        .map(|i| {
            if i < correct {
                Answer::correct(i as u64)
            } else {
                Answer::incorrect(i as u64)
            }
        })
        .collect()
}

#[tokio::test]
async fn test_full_round_through_room() {
    let (manager, sink) = manager_with_sink();
    let room_id = manager
        .create_room(RoomConfig::new("pub night", 1))
        .await
        .unwrap();
    let room = manager.get_room(room_id).await.unwrap();

    let alice = Player::new(1, "alice");
    let bob = Player::new(2, "bob");
    room.join(alice.clone()).await.unwrap();
    room.join(bob.clone()).await.unwrap();
    room.start().await.unwrap();

    room.submit_answers(alice.clone(), batch(1, 10)).await.unwrap();
    room.submit_answers(bob.clone(), batch(0, 10)).await.unwrap();

    room.end_round().await.unwrap();

    let scores = room.results().await.unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].player, alice);
    assert!(scores[0].is_highest);
    assert_eq!(scores[1].player, bob);
    assert!(!scores[1].is_highest);

    let reports = sink.reports.lock().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].category.name, "General Knowledge");
    assert_eq!(reports[0].scores, scores);
}

#[tokio::test]
async fn test_same_player_concurrent_submissions_grade_once() {
    let (manager, _sink) = manager_with_sink();
    let room_id = manager
        .create_room(RoomConfig::new("retransmitters", 1))
        .await
        .unwrap();
    let room = manager.get_room(room_id).await.unwrap();

    let alice = Player::new(1, "alice");
    room.join(alice.clone()).await.unwrap();
    room.start().await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let room = room.clone();
        let alice = alice.clone();
        tasks.push(tokio::spawn(async move {
            room.submit_answers(alice, batch(3, 10)).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    room.end_round().await.unwrap();
    let scores = room.results().await.unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].correct_count, 3);
}

#[tokio::test]
async fn test_distinct_players_are_all_graded() {
    let (manager, _sink) = manager_with_sink();
    let room_id = manager
        .create_room(RoomConfig::new("full house", 1))
        .await
        .unwrap();
    let room = manager.get_room(room_id).await.unwrap();

    let players: Vec<Player> = (0..5)
        .map(|i| Player::new(i, &format!("player{i}")))
        .collect();
    for player in &players {
        room.join(player.clone()).await.unwrap();
    }
    room.start().await.unwrap();

    let mut tasks = Vec::new();
    for (i, player) in players.iter().enumerate() {
        let room = room.clone();
        let player = player.clone();
        tasks.push(tokio::spawn(async move {
            room.submit_answers(player, batch(i, 10)).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    room.end_round().await.unwrap();
    let scores = room.results().await.unwrap();
    assert_eq!(scores.len(), 5);
    assert_eq!(scores.iter().filter(|s| s.is_highest).count(), 1);
    assert_eq!(scores[0].correct_count, 4);
}

#[tokio::test]
async fn test_submission_rejected_before_start() {
    let (manager, _sink) = manager_with_sink();
    let room_id = manager
        .create_room(RoomConfig::new("eager beavers", 1))
        .await
        .unwrap();
    let room = manager.get_room(room_id).await.unwrap();

    let alice = Player::new(1, "alice");
    room.join(alice.clone()).await.unwrap();

    let result = room.submit_answers(alice, batch(1, 10)).await;
    assert!(matches!(
        result,
        Err(RoomError::Game(GameError::AnswerSubmissionOutOfWindow))
    ));
}

#[tokio::test]
async fn test_results_gated_until_round_ends() {
    let (manager, _sink) = manager_with_sink();
    let room_id = manager
        .create_room(RoomConfig::new("impatient", 1))
        .await
        .unwrap();
    let room = manager.get_room(room_id).await.unwrap();
    room.start().await.unwrap();

    let result = room.results().await;
    assert!(matches!(
        result,
        Err(RoomError::Game(GameError::ScoresNotYetAvailable))
    ));

    room.end_round().await.unwrap();
    assert!(room.results().await.is_ok());
}

#[tokio::test]
async fn test_deadline_closes_the_room() {
    let (manager, sink) = manager_with_sink();
    let mut config = RoomConfig::new("sudden death", 1);
    // A zero-second budget puts the deadline at the start instant; the
    // actor's next tick sees the expired deadline and closes the round.
    config.settings.seconds_per_question = 0;
    let room_id = manager.create_room(config).await.unwrap();
    let room = manager.get_room(room_id).await.unwrap();
    room.start().await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    let status = room.status().await.unwrap();
    assert_eq!(status.state, GameState::Closed);
    assert!(room.results().await.unwrap().is_empty());
    assert_eq!(sink.reports.lock().await.len(), 1);
}

#[tokio::test]
async fn test_results_published_to_sink_once() {
    let (manager, sink) = manager_with_sink();
    let room_id = manager
        .create_room(RoomConfig::new("one report", 1))
        .await
        .unwrap();
    let room = manager.get_room(room_id).await.unwrap();

    let alice = Player::new(1, "alice");
    room.join(alice.clone()).await.unwrap();
    room.start().await.unwrap();
    room.submit_answers(alice, batch(2, 10)).await.unwrap();

    room.end_round().await.unwrap();
    room.end_round().await.unwrap();
    room.results().await.unwrap();
    room.results().await.unwrap();

    assert_eq!(sink.reports.lock().await.len(), 1);
}

#[tokio::test]
async fn test_closed_room_is_removed_and_unreachable() {
    let (manager, _sink) = manager_with_sink();
    let room_id = manager
        .create_room(RoomConfig::new("short lived", 1))
        .await
        .unwrap();
    let room = manager.get_room(room_id).await.unwrap();

    manager.close_room(room_id).await.unwrap();
    assert!(manager.get_room(room_id).await.is_none());
    assert_eq!(manager.active_room_count().await, 0);

    // The actor has shut down; the stale handle gets a clean error.
    let result = room.join(Player::new(1, "late")).await;
    assert!(matches!(result, Err(RoomError::RoomUnavailable)));
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let (manager, _sink) = manager_with_sink();
    let result = manager.create_room(RoomConfig::new("lost", 42)).await;
    assert!(matches!(
        result,
        Err(RoomError::Catalog(CatalogError::UnknownCategory(42)))
    ));
}

#[tokio::test]
async fn test_oversized_draw_is_rejected() {
    let (manager, _sink) = manager_with_sink();
    let mut config = RoomConfig::new("greedy", 1);
    config.question_count = 50;
    let result = manager.create_room(config).await;
    assert!(matches!(
        result,
        Err(RoomError::Catalog(CatalogError::NotEnoughQuestions { .. }))
    ));
}

#[tokio::test]
async fn test_list_rooms_reports_each_room() {
    let (manager, _sink) = manager_with_sink();
    manager
        .create_room(RoomConfig::new("room one", 1))
        .await
        .unwrap();
    manager
        .create_room(RoomConfig::new("room two", 1))
        .await
        .unwrap();

    let statuses = manager.list_rooms().await;
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.state == GameState::NotStarted));
    assert!(statuses.iter().all(|s| s.question_count == 10));
}
