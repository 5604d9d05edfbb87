#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).expect("field must exist")
}

#[wasm_bindgen_test]
fn engine_is_ready() {
    assert!(othello_engine::wasm_ready());
}

#[wasm_bindgen_test]
fn duo_game_plays_an_opening_move() {
    othello_engine::wasm::new_game("duo").expect("mode must be accepted");
    othello_engine::wasm::submit_move(2, 3).expect("opening move must be legal");

    let state = othello_engine::wasm::game_state().expect("state must serialize");
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
    assert_eq!(field(&state, "black_count").as_f64(), Some(4.0));
    assert_eq!(field(&state, "white_count").as_f64(), Some(1.0));
    assert_eq!(field(&state, "mode").as_string().as_deref(), Some("duo"));
}

#[wasm_bindgen_test]
fn rejected_click_is_an_error_without_state_change() {
    othello_engine::wasm::new_game("duo").expect("mode must be accepted");

    assert!(othello_engine::wasm::submit_move(0, 0).is_err());

    let state = othello_engine::wasm::game_state().expect("state must serialize");
    assert_eq!(field(&state, "black_count").as_f64(), Some(2.0));
    assert_eq!(field(&state, "white_count").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn stats_round_trip_through_the_export_blob() {
    let bytes = othello_engine::wasm::export_stats().expect("export must succeed");
    othello_engine::wasm::import_stats(&bytes).expect("import must accept its own blob");
}
