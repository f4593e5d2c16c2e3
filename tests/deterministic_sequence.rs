use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use grid_snake::collision::RunEnd;
use grid_snake::config::GameConfig;
use grid_snake::game::{Game, GameStatus, TickEvent};
use grid_snake::geometry::Point;
use grid_snake::input::{Direction, RestartChoice};
use grid_snake::score::{JsonFileStore, MemoryStore};
use grid_snake::snake::Snake;

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let config = GameConfig {
        grid_width: 120,
        grid_height: 80,
        ..GameConfig::default()
    };
    let mut game = Game::with_seed(config, MemoryStore::default(), 42)
        .expect("config is valid");
    *game.snake_mut() = Snake::new(Point::new(40, 20), Direction::Right, 2, 20);
    game.set_food(Point::new(60, 20));

    assert!(matches!(game.tick(None), TickEvent::AteFood));
    assert_eq!(game.score(), 1);
    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.snake().head(), Point::new(60, 20));
    assert!(!game.snake().occupies(game.food()));

    game.set_food(Point::new(0, 60));
    game.tick(Some(Direction::Up));
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.snake().head(), Point::new(60, 0));
    assert_eq!(game.snake().len(), 3);

    assert!(matches!(
        game.tick(None),
        TickEvent::RunEnded(RunEnd::WallCollision)
    ));
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.score(), 1);
}

#[test]
fn full_session_persists_high_score_across_games() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after epoch")
        .as_nanos();
    let path = std::env::temp_dir()
        .join("grid-snake-session-tests")
        .join(format!("session-{nanos}.json"));

    let mut game = Game::with_seed(GameConfig::default(), JsonFileStore::new(&path), 7)
        .expect("config is valid");
    assert_eq!(game.high_score(), 0);

    *game.snake_mut() = Snake::new(Point::new(60, 0), Direction::Right, 3, 20);
    game.set_food(Point::new(80, 0));
    game.tick(None);
    game.tick(Some(Direction::Up));
    assert_eq!(game.status(), GameStatus::GameOver);

    assert!(matches!(
        game.tick(None),
        TickEvent::RunConcluded {
            new_high_score: true
        }
    ));
    assert_eq!(game.status(), GameStatus::AwaitingRestartChoice);

    assert_eq!(game.choose(RestartChoice::Restart), GameStatus::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.high_score(), 1);

    let reloaded = Game::with_seed(GameConfig::default(), JsonFileStore::new(&path), 8)
        .expect("config is valid");
    assert_eq!(reloaded.high_score(), 1);

    let _ = fs::remove_file(&path);
    if let Some(parent) = path.parent() {
        let _ = fs::remove_dir(parent);
    }
}

#[test]
fn seeded_games_place_food_identically() {
    let first = Game::with_seed(GameConfig::default(), MemoryStore::default(), 99)
        .expect("config is valid");
    let second = Game::with_seed(GameConfig::default(), MemoryStore::default(), 99)
        .expect("config is valid");

    assert_eq!(first.food(), second.food());
    assert_eq!(first.snapshot(), second.snapshot());
}
