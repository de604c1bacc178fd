use leptos::prelude::*;

use super::storage;
use crate::system::gateway::browser::on_logout;
use crate::system::gateway::transport::normalize_credential;

pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please sign in again.";

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    /// Shown once on the login page after a forced logout
    pub session_notice: Option<String>,
}

impl AuthState {
    pub fn signed_in(token: String) -> Self {
        Self {
            access_token: Some(token),
            session_notice: None,
        }
    }

    pub fn expired() -> Self {
        Self {
            access_token: None,
            session_notice: Some(SESSION_EXPIRED_NOTICE.to_string()),
        }
    }

    /// Hand out the notice and forget it
    pub fn take_notice(&mut self) -> Option<String> {
        self.session_notice.take()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let restored = normalize_credential(storage::get_access_token());
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: restored,
        session_notice: None,
    });

    // The gateway decided the session is gone; storage is already cleared
    on_logout(move || {
        log::info!("Session ended by gateway");
        let _ = set_auth_state.try_set(AuthState::expired());
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Read the "session expired" notice once, without notifying subscribers
pub fn take_session_notice(set_auth_state: WriteSignal<AuthState>) -> Option<String> {
    set_auth_state.update_untracked(|s| s.take_notice())
}

/// Helper: Perform a user-initiated logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
