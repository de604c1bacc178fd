use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "token";
const API_BASE_URL_KEY: &str = "api_base_url";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save access token to localStorage
pub fn save_access_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

/// Get access token from localStorage (raw, may be a placeholder)
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

/// Get the API base URL stored for this browser
pub fn get_api_base_url() -> Option<String> {
    get_local_storage()?.get_item(API_BASE_URL_KEY).ok()?
}

pub fn save_api_base_url(url: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(API_BASE_URL_KEY, url);
    }
}

/// Clear the stored session token
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
    }
}
