#![cfg(target_arch = "wasm32")]

use classic_games::wasm::{OthelloSession, TicTacToeSession};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn wasm_ready_returns_true() {
    assert!(classic_games::wasm_ready());
}

#[wasm_bindgen_test]
fn othello_session_plays_a_human_and_a_computer_move() {
    let mut session = OthelloSession::new(JsValue::UNDEFINED, 7).unwrap();
    assert!(!session.is_computer_turn());

    let report = session.place(2, 3).unwrap();
    assert_eq!(get(&report, "black_count").as_f64(), Some(4.0));
    assert!(session.is_computer_turn());

    let report = session.computer_move().unwrap();
    assert_eq!(get(&report, "player").as_string().as_deref(), Some("white"));
    assert!(session.result().unwrap().is_null());
}

#[wasm_bindgen_test]
fn othello_session_surfaces_errors_as_strings() {
    let mut session = OthelloSession::new(JsValue::UNDEFINED, 7).unwrap();

    let err = session.place(0, 0).unwrap_err();
    assert!(err.as_string().unwrap().contains("illegal move"));
    assert!(session.set_difficulty("expert").is_err());
    assert!(session.set_difficulty("basic").is_ok());
}

#[wasm_bindgen_test]
fn tictactoe_session_records_wins_on_the_scoreboard() {
    let mut session = TicTacToeSession::new(false, 1);
    for index in [0, 3, 1, 4, 2] {
        session.place(index).unwrap();
    }

    let scores = session.scoreboard().unwrap();
    assert_eq!(get(&scores, "x_wins").as_f64(), Some(1.0));

    session.reset_scores();
    let scores = session.scoreboard().unwrap();
    assert_eq!(get(&scores, "x_wins").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn tictactoe_computer_does_not_move_for_the_player() {
    let mut session = TicTacToeSession::new(true, 3);

    let err = session.computer_move().unwrap_err();
    assert!(err.as_string().unwrap().contains("player's turn"));
    let board = js_sys::Array::from(&get(&session.state().unwrap(), "board"));
    assert!(board.iter().all(|cell| cell.as_f64() == Some(0.0)));

    session.place(4).unwrap();
    let board = js_sys::Array::from(&get(&session.computer_move().unwrap(), "board"));
    let marks = board.iter().filter(|cell| cell.as_f64() == Some(2.0)).count();
    assert_eq!(marks, 1);
}
