use std::sync::Once;

use chatpdf_core::{
    update, AppState, AuthRequest, AuthToken, Effect, LoginForm, LoginMode, Msg, RequestFailure,
    Route,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chatpdf_logging::initialize_for_tests);
}

fn on_login_page() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Login));
    state
}

fn register_form() -> LoginForm {
    LoginForm {
        username: "reader".to_string(),
        email: "reader@example.com".to_string(),
        password: "hunter2".to_string(),
        confirm_password: "hunter2".to_string(),
    }
}

#[test]
fn sign_in_success_persists_token_and_opens_chat() {
    init_logging();
    let form = LoginForm {
        email: "reader".to_string(),
        password: "hunter2".to_string(),
        ..LoginForm::default()
    };
    let (state, effects) = update(on_login_page(), Msg::LoginSubmitted(form));
    assert_eq!(
        effects,
        vec![Effect::Authenticate {
            request_id: 1,
            request: AuthRequest::SignIn {
                login: "reader".to_string(),
                password: "hunter2".to_string(),
            },
        }]
    );
    assert!(state.view().login.pending);

    let (state, effects) = update(
        state,
        Msg::AuthFinished {
            request_id: 1,
            result: Ok(AuthToken::new("fresh")),
        },
    );
    assert_eq!(effects, vec![Effect::PersistToken(AuthToken::new("fresh"))]);
    assert_eq!(state.route(), Route::Chat);
    assert_eq!(state.session(), Some(&AuthToken::new("fresh")));
    assert!(!state.view().login.pending);
}

#[test]
fn register_validation_stays_local() {
    init_logging();
    let (state, _) = update(on_login_page(), Msg::LoginModeToggled);
    assert_eq!(state.view().login.mode, LoginMode::Register);

    let mismatched = LoginForm {
        confirm_password: "other".to_string(),
        ..register_form()
    };
    let (state, effects) = update(state, Msg::LoginSubmitted(mismatched));
    assert!(effects.is_empty());
    assert_eq!(
        state.view().login.error.as_deref(),
        Some("Passwords do not match")
    );

    let bad_email = LoginForm {
        email: "reader.example.com".to_string(),
        ..register_form()
    };
    let (state, effects) = update(state, Msg::LoginSubmitted(bad_email));
    assert!(effects.is_empty());
    assert_eq!(
        state.view().login.error.as_deref(),
        Some("Please enter a valid email address")
    );
    assert!(!state.view().login.pending);
}

#[test]
fn register_rejection_reports_registration_failed() {
    init_logging();
    let (state, _) = update(on_login_page(), Msg::LoginModeToggled);
    let (state, effects) = update(state, Msg::LoginSubmitted(register_form()));
    let request_id = match effects.as_slice() {
        [Effect::Authenticate {
            request_id,
            request: AuthRequest::Register { username, email, .. },
        }] => {
            assert_eq!(username, "reader");
            assert_eq!(email, "reader@example.com");
            *request_id
        }
        other => panic!("unexpected effects {other:?}"),
    };

    // Toggling mid-flight is ignored so the reply is judged in register mode.
    let (state, _) = update(state, Msg::LoginModeToggled);
    let (state, effects) = update(
        state,
        Msg::AuthFinished {
            request_id,
            result: Err(RequestFailure::Rejected { error: None }),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().login.error.as_deref(), Some("Registration failed"));
    assert_eq!(state.route(), Route::Login);
    assert!(!state.is_signed_in());
}

#[test]
fn sign_in_failures_map_to_messages() {
    init_logging();
    let form = LoginForm {
        email: "reader@example.com".to_string(),
        password: "wrong".to_string(),
        ..LoginForm::default()
    };
    let (state, _) = update(on_login_page(), Msg::LoginSubmitted(form.clone()));
    let (state, _) = update(
        state,
        Msg::AuthFinished {
            request_id: 1,
            result: Err(RequestFailure::Rejected { error: None }),
        },
    );
    assert_eq!(state.view().login.error.as_deref(), Some("Invalid credentials"));

    let (state, _) = update(state, Msg::LoginSubmitted(form));
    assert_eq!(state.view().login.error, None);
    let (state, _) = update(
        state,
        Msg::AuthFinished {
            request_id: 2,
            result: Err(RequestFailure::Transport {
                message: Some("dns error".to_string()),
            }),
        },
    );
    assert_eq!(state.view().login.error.as_deref(), Some("dns error"));
}

#[test]
fn duplicate_submit_while_pending_is_ignored() {
    init_logging();
    let (state, effects) = update(on_login_page(), Msg::LoginSubmitted(register_form()));
    assert_eq!(effects.len(), 1);
    let (next, effects) = update(state.clone(), Msg::LoginSubmitted(register_form()));
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn sign_out_clears_token_and_transcript() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SessionRestored(AuthToken::new("tok")));
    let (state, _) = update(state, Msg::Navigate(Route::Chat));
    let (state, _) = update(state, Msg::ChatInputChanged("hi".to_string()));
    let (state, _) = update(state, Msg::QuestionSubmitted);

    let (state, effects) = update(state, Msg::SignedOut);
    assert_eq!(effects, vec![Effect::ClearToken]);
    assert!(!state.is_signed_in());
    assert_eq!(state.route(), Route::Login);
    assert!(state.view().chat.transcript.is_empty());

    let (_state, effects) = update(state, Msg::SignedOut);
    assert!(effects.is_empty());
}
