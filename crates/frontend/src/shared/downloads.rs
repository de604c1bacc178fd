//! File download capability.
//!
//! Bulk actions only see [`DownloadTarget`]; the browser implementation injects a
//! hidden anchor, a desktop shell could open a save dialog instead.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

#[async_trait(?Send)]
pub trait DownloadTarget {
    /// Start downloading `url`, saved as `filename`
    fn trigger_download(&self, url: &str, filename: &str) -> Result<(), String>;

    /// Wait between consecutive downloads
    async fn pause(&self, ms: u32);
}

pub struct BrowserDownloads;

#[async_trait(?Send)]
impl DownloadTarget for BrowserDownloads {
    fn trigger_download(&self, url: &str, filename: &str) -> Result<(), String> {
        trigger_anchor_download(url, filename)
    }

    async fn pause(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

/// Click a temporary hidden `<a download>` pointing at `url`
pub fn trigger_anchor_download(url: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Ok(())
}
