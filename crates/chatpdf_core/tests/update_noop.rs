use chatpdf_core::{update, AppState, Msg, Route};

#[test]
fn cancelled_file_picker_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::FileChosen(None));

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn dismissing_nothing_changes_nothing() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::ErrorDismissed);
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(next, Msg::UploadStatusDismissed);
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn navigating_to_current_page_is_noop() {
    let state = AppState::new();
    assert_eq!(state.route(), Route::Home);
    let (mut next, effects) = update(state.clone(), Msg::Navigate(Route::Home));

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
