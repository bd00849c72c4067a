//! The JSON-lines stream produced in headless mode

use std::time::Duration;

use serde_json::Value;
use tui_blockfall::engine::{Command, GameConfig, GameSession, JsonLinesAdapter, ManualScheduler};

fn lines(buf: &[u8]) -> Vec<Value> {
    std::str::from_utf8(buf)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn headless_stream_has_one_frame_per_tick() {
    let mut buf = Vec::new();
    {
        let clock = ManualScheduler::new();
        let mut session = GameSession::new(
            GameConfig::default(),
            11,
            clock.clone(),
            JsonLinesAdapter::new(&mut buf),
        );
        session.start();
        for t in clock.advance(Duration::from_millis(1500)) {
            session.dispatch(Command::Tick(t));
        }
        assert_eq!(session.adapter().frames(), 4);
        session.dispatch(Command::Quit);
    }

    let events = lines(&buf);
    let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        vec!["frame", "phase", "frame", "frame", "frame", "phase"]
    );
    assert_eq!(events[1]["phase"], "running");
    assert_eq!(events[5]["phase"], "stopped");

    let first_y = events[0]["active"]["y"].as_i64().unwrap();
    let last_y = events[4]["active"]["y"].as_i64().unwrap();
    assert_eq!(last_y, first_y + 3);
}

#[test]
fn headless_frames_describe_the_whole_board() {
    let mut buf = Vec::new();
    {
        let config = GameConfig {
            cols: 6,
            rows: 8,
            ..GameConfig::default()
        };
        let mut session =
            GameSession::new(config, 3, ManualScheduler::new(), JsonLinesAdapter::new(&mut buf));
        session.start();
    }

    let frame = &lines(&buf)[0];
    assert_eq!(frame["cols"], 6);
    assert_eq!(frame["rows"], 8);
    let board = frame["board"].as_array().unwrap();
    assert_eq!(board.len(), 8);
    assert!(board
        .iter()
        .all(|row| row.as_array().unwrap().iter().all(Value::is_null)));

    let active = &frame["active"];
    assert_eq!(active["cells"].as_array().unwrap().len(), 4);
    assert!(active["color"].as_str().unwrap().starts_with('#'));
}
