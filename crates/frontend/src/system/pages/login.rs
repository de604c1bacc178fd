use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::api_base;
use crate::system::auth::context::{take_session_notice, use_auth, AuthState};
use crate::system::auth::{api, storage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (server, set_server) = signal(api_base());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    // Consume the "session expired" notice so it only appears once
    let session_notice = take_session_notice(set_auth_state);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();

        // Point the whole app at another API server before signing in
        let server_val = server.get();
        let server_val = server_val.trim();
        if !server_val.is_empty() && server_val != api_base() {
            log::info!("Using API server {}", server_val);
            storage::save_api_base_url(server_val);
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(email_val, password_val).await {
                Ok(token) => {
                    storage::save_access_token(&token);
                    // Switches the routes over to the main layout
                    set_auth_state.set(AuthState::signed_in(token));
                }
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error_message.set(Some(format!("Login failed: {}", e)));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Lab Admin"</h1>
                <h2>"Sign in"</h2>

                {session_notice.map(|text| view! { <div class="notice">{text}</div> })}

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="server">"API server"</label>
                        <input
                            type="url"
                            id="server"
                            value=move || server.get()
                            on:input=move |ev| set_server.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
