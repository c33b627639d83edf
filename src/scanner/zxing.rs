// ============================================================================
// ZXING SCAN SOURCE - ScanSource real sobre el puente JS de ZXing
// ============================================================================

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{js_error_text, KioskError};
use crate::scanner::source::{DecodeCallback, ErrorCallback, ScanSource, VideoDevice};
use crate::utils::zxing_ffi;

type JsCallback = Closure<dyn FnMut(JsValue)>;

pub struct ZxingScanSource {
    preview_id: &'static str,
    /// Closures del bucle activo; se sueltan al arrancar el siguiente
    callbacks: RefCell<Option<(JsCallback, JsCallback)>>,
}

impl ZxingScanSource {
    pub fn new(preview_id: &'static str) -> Self {
        Self {
            preview_id,
            callbacks: RefCell::new(None),
        }
    }
}

impl ScanSource for ZxingScanSource {
    async fn list_devices(&self) -> Result<Vec<VideoDevice>, KioskError> {
        let value = zxing_ffi::list_video_input_devices()
            .await
            .map_err(|e| KioskError::Scanner(js_error_text(&e)))?;
        let entries: js_sys::Array = value
            .dyn_into()
            .map_err(|_| KioskError::Scanner("listVideoInputDevices did not return an array".to_string()))?;

        Ok(entries.iter().filter_map(|entry| device_from_js(&entry)).collect())
    }

    async fn start(
        &self,
        device: &VideoDevice,
        time_between_scans_ms: u32,
        on_decoded: DecodeCallback,
        on_error: ErrorCallback,
    ) -> Result<(), KioskError> {
        let decoded = Closure::wrap(Box::new(move |text: JsValue| {
            if let Some(code) = text.as_string() {
                log::info!("📱 [SCANNER] Código detectado: {}", code);
                on_decoded(code);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let failed = Closure::wrap(Box::new(move |error: JsValue| {
            on_error(KioskError::Scanner(js_error_text(&error)));
        }) as Box<dyn FnMut(JsValue)>);

        let started = zxing_ffi::start_voucher_scanner(
            &device.device_id,
            self.preview_id,
            time_between_scans_ms,
            decoded.as_ref().unchecked_ref(),
            failed.as_ref().unchecked_ref(),
        )
        .await;

        *self.callbacks.borrow_mut() = Some((decoded, failed));
        started
            .map(|_| ())
            .map_err(|e| KioskError::Scanner(js_error_text(&e)))
    }

    fn stop(&self) {
        log::debug!("⏹️ [SCANNER] Deteniendo decodificador");
        zxing_ffi::stop_voucher_scanner();
    }
}

fn device_from_js(entry: &JsValue) -> Option<VideoDevice> {
    let field = |name: &str| {
        js_sys::Reflect::get(entry, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_string())
    };
    let device_id = field("deviceId")?;
    let label = field("label")
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| device_id.clone());
    Some(VideoDevice { device_id, label })
}
