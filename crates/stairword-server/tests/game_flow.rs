//! End-to-end tests: a real WebSocket client talking to a served listener.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use stairword_core::{
    ChainRules, OfflineDictionary, PuzzleProvider, TodaysPuzzle, TrustedWordList, WordValidator,
};
use stairword_server::application::GameService;
use stairword_server::infrastructure::ws_server::MAX_MESSAGE_SIZE;
use stairword_server::infrastructure::{bind, serve, InMemoryResultStore};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct FixedPuzzle;

impl PuzzleProvider for FixedPuzzle {
    fn todays_puzzle(&self) -> TodaysPuzzle {
        TodaysPuzzle {
            start_word: "zinger".to_string(),
            end_word: "nestle".to_string(),
            number: 42,
        }
    }
}

/// Starts a server on an ephemeral port; clearing the returned flag stops it.
async fn start_server() -> (SocketAddr, Arc<AtomicBool>) {
    let trusted = TrustedWordList::new(["zinger", "gerbil", "billy", "lysine", "nestle"]);
    let service = GameService::new(
        ChainRules::default(),
        Arc::new(FixedPuzzle),
        WordValidator::new(Arc::new(trusted), Arc::new(OfflineDictionary)),
        Arc::new(InMemoryResultStore::new()),
        "https://stairword.example.com",
    );

    let listener = bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let running = Arc::new(AtomicBool::new(true));
    tokio::spawn(serve(listener, Arc::new(service), Arc::clone(&running)));
    (addr, running)
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    ws
}

/// Sends one frame and waits for its reply.
async fn request(ws: &mut Client, frame: String) -> Value {
    ws.send(Message::Text(frame)).await.unwrap();
    let reply = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("reply within 5 s")
        .expect("stream open")
        .expect("frame ok");
    match reply {
        Message::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

async fn send(ws: &mut Client, msg: Value) -> Value {
    request(ws, msg.to_string()).await
}

#[tokio::test]
async fn test_play_submit_and_share_over_websocket() {
    // Arrange
    let (addr, running) = start_server().await;
    let mut ws = connect(addr).await;

    // Act / Assert: today's puzzle
    let puzzle = send(&mut ws, json!({"type": "GetPuzzle"})).await;
    assert_eq!(puzzle["type"], "Puzzle");
    assert_eq!(puzzle["number"], 42);
    assert_eq!(puzzle["start_word"], "ZINGER");
    assert!(puzzle["stats"].is_null());

    // Fill the three blanks.
    let mut board = Value::Null;
    for word in ["gerbil", "billy", "lysine"] {
        board = send(&mut ws, json!({"type": "PlaceWord", "word": word})).await;
        assert_eq!(board["type"], "Board", "placing {word}: {board}");
    }
    assert_eq!(board["complete"], true);
    assert_eq!(board["score"], 15);
    assert!(board["current_index"].is_null());

    // Submit the connection's own chain.
    let submitted = send(&mut ws, json!({"type": "Submit"})).await;
    assert_eq!(submitted["type"], "Submitted");
    assert_eq!(submitted["score"], 15);
    assert_eq!(submitted["stats"]["max_score"], 15);
    let share_id = submitted["share_id"].as_str().unwrap().to_string();
    assert_eq!(share_id.len(), 5);
    assert!(submitted["share_text"]
        .as_str()
        .unwrap()
        .ends_with(&format!("https://stairword.example.com/{share_id}")));

    // A second browser opens the shared result.
    let mut other = connect(addr).await;
    let shared = send(&mut other, json!({"type": "GetShared", "share_id": share_id})).await;
    assert_eq!(shared["type"], "Shared");
    assert_eq!(
        shared["words"],
        json!(["ZINGER", "GERBIL", "BILLY", "LYSINE", "NESTLE"])
    );
    assert_eq!(shared["rows"][4]["indent"], 13);

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_bad_frames_do_not_close_the_connection() {
    let (addr, running) = start_server().await;
    let mut ws = connect(addr).await;

    let garbage = request(&mut ws, "this is not json".to_string()).await;
    assert_eq!(garbage["type"], "Error");

    let rejected = send(&mut ws, json!({"type": "PlaceWord", "word": "apple"})).await;
    assert_eq!(rejected["type"], "Rejected");
    assert_eq!(
        rejected["reason"],
        "\"apple\" must overlap with the end of \"zinger\""
    );

    // Still usable afterwards.
    let puzzle = send(&mut ws, json!({"type": "GetPuzzle"})).await;
    assert_eq!(puzzle["type"], "Puzzle");

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_submitting_a_foreign_chain_reports_rule_violations() {
    let (addr, running) = start_server().await;
    let mut ws = connect(addr).await;

    let reply = send(
        &mut ws,
        json!({"type": "Submit", "words": ["zinger", "gerbil", "gerbil", "lysine", "nestle"]}),
    )
    .await;

    assert_eq!(reply["type"], "Rejected");

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_unknown_share_id_is_rejected() {
    let (addr, running) = start_server().await;
    let mut ws = connect(addr).await;

    let reply = send(&mut ws, json!({"type": "GetShared", "share_id": "nOpE1"})).await;

    assert_eq!(reply["type"], "Rejected");
    assert_eq!(reply["reason"], "no result found for share id nOpE1");

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_layout_with_oversized_word_is_rejected() {
    // Arrange: two long words whose overlap check would be quadratic.
    let (addr, running) = start_server().await;
    let mut ws = connect(addr).await;
    let first = "a".repeat(1000);
    let second = format!("{}{}", "a".repeat(500), "b".repeat(500));

    // Act
    let reply = send(&mut ws, json!({"type": "Layout", "words": [first, second]})).await;

    // Assert
    assert_eq!(reply["type"], "Rejected");
    assert_eq!(
        reply["reason"],
        "words must be at most 45 letters long, got 1000"
    );

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_binary_frame_gets_error_reply() {
    let (addr, running) = start_server().await;
    let mut ws = connect(addr).await;

    ws.send(Message::Binary(vec![1, 2, 3])).await.unwrap();
    let reply = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("reply within 5 s")
        .expect("stream open")
        .expect("frame ok");

    match reply {
        Message::Text(text) => {
            let reply: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(reply["type"], "Error");
        }
        other => panic!("expected text frame, got {other:?}"),
    }

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_message_over_size_limit_closes_the_connection() {
    let (addr, running) = start_server().await;
    let mut ws = connect(addr).await;
    let huge = "a".repeat(MAX_MESSAGE_SIZE * 2);

    // The send itself may already fail if the server hangs up first.
    let _ = ws
        .send(Message::Text(json!({"type": "Layout", "words": [huge]}).to_string()))
        .await;
    let next = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("connection ends within 5 s");

    assert!(
        matches!(next, None | Some(Err(_)) | Some(Ok(Message::Close(_)))),
        "expected the connection to close, got {next:?}"
    );

    running.store(false, Ordering::Relaxed);
}
