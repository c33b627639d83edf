// ============================================================================
// ZXING FFI - Foreign Function Interface para el puente JavaScript
// ============================================================================
// Wrappers para las funciones de static/js/zxing_bridge.js - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Resuelve a un array `[{deviceId, label}]`
    #[wasm_bindgen(js_name = listVideoInputDevices, catch)]
    pub async fn list_video_input_devices() -> Result<JsValue, JsValue>;

    /// Arranca el bucle de decodificación continua sobre `preview_id`
    #[wasm_bindgen(js_name = startVoucherScanner, catch)]
    pub async fn start_voucher_scanner(
        device_id: &str,
        preview_id: &str,
        time_between_scans_ms: u32,
        on_decoded: &js_sys::Function,
        on_error: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = stopVoucherScanner)]
    pub fn stop_voucher_scanner();
}
