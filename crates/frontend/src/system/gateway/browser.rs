//! Browser implementations of the gateway seams: fetch via gloo-net,
//! timers via gloo-timers, credentials in localStorage.

use super::coordinator::{LogoutCoordinator, LogoutHandler, LogoutScheduler};
use super::transport::{
    normalize_credential, CredentialStore, HttpRequest, HttpTransport, Method, RawResponse,
    TransportError,
};
use super::Gateway;
use crate::shared::api_utils::api_base;
use crate::shared::config::config;
use crate::system::auth::storage;
use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;

pub struct FetchTransport;

fn map_error(error: gloo_net::Error) -> TransportError {
    match error {
        gloo_net::Error::JsError(js) if js.name == "AbortError" => TransportError::Aborted,
        other => TransportError::Network(other.to_string()),
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(map_error)?;

        let response = prepared.send().await.map_err(map_error)?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

pub struct TimerScheduler;

impl LogoutScheduler for TimerScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            task();
        });
    }
}

pub struct LocalStorageCredentials;

impl CredentialStore for LocalStorageCredentials {
    fn token(&self) -> Option<String> {
        normalize_credential(storage::get_access_token())
    }

    fn base_url(&self) -> String {
        api_base()
    }
}

/// Clears stored credentials and notifies subscribers (the auth context)
#[derive(Default)]
pub struct BrowserLogout {
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl BrowserLogout {
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }
}

impl LogoutHandler for BrowserLogout {
    fn logout(&self) {
        storage::clear_tokens();
        let listeners: Vec<_> = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }
}

struct BrowserGateway {
    gateway: Gateway,
    logout: Rc<BrowserLogout>,
}

thread_local! {
    static BROWSER: BrowserGateway = {
        let cfg = config();
        let logout = Rc::new(BrowserLogout::default());
        let coordinator = LogoutCoordinator::new(
            Rc::new(TimerScheduler),
            logout.clone(),
            cfg.timing.logout_debounce_ms,
        );
        let gateway = Gateway::new(
            Rc::new(FetchTransport),
            Rc::new(LocalStorageCredentials),
            coordinator,
            cfg.api.tenant_header.clone(),
            cfg.api.tenant_id.clone(),
        );
        BrowserGateway { gateway, logout }
    };
}

/// The application's gateway instance
pub fn gateway() -> Gateway {
    BROWSER.with(|b| b.gateway.clone())
}

/// Run `listener` after every completed logout
pub fn on_logout(listener: impl Fn() + 'static) {
    BROWSER.with(|b| b.logout.subscribe(listener));
}
