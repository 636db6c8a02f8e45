//! Anchor-click downloads through a transient object URL.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use vocable_core::{AudioBlob, DownloadError, FileSaver};

use crate::js::{has_js_host, js_message};

/// Saves blobs by clicking a hidden `<a download>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorDownloadSaver;

impl FileSaver for AnchorDownloadSaver {
    fn save(&self, blob: &AudioBlob, filename: &str) -> Result<(), DownloadError> {
        let host = |e: wasm_bindgen::JsValue| DownloadError::Host(js_message(&e));

        if !has_js_host() {
            return Err(DownloadError::Host("no browser document".to_string()));
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DownloadError::Host("no browser document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| DownloadError::Host("document has no body".to_string()))?;

        let parts = Array::of1(&Uint8Array::from(blob.bytes()));
        let options = BlobPropertyBag::new();
        options.set_type(blob.mime());
        let js_blob =
            Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(host)?;

        let url = Url::create_object_url_with_blob(&js_blob).map_err(host)?;
        let clicked = document
            .create_element("a")
            .map_err(host)
            .and_then(|el| {
                el.dyn_into::<HtmlAnchorElement>().map_err(|_| {
                    DownloadError::Host("created element is not an anchor".to_string())
                })
            })
            .and_then(|anchor| {
                anchor.set_href(&url);
                anchor.set_download(filename);
                body.append_child(&anchor).map_err(host)?;
                anchor.click();
                anchor.remove();
                Ok(())
            });

        // Revoke even when the click failed so the blob is not leaked.
        if let Err(e) = Url::revoke_object_url(&url) {
            tracing::warn!(message = %js_message(&e), "Failed to revoke object URL");
        }
        clicked
    }
}
