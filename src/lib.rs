// ============================================================================
// VOUCHER KIOSK - Cliente navegador del quiosco de canje de vales (Rust + WASM)
// ============================================================================
// Flujo: escáner / botón → dispatcher → session client → store → render
// - Models: Session State tal como lo envía el servidor
// - Services: dispatcher de acciones + cliente de sesión (HTTP)
// - State: store propietario con reemplazo total + guardia de petición en curso
// - Views: proyección pura + render sobre las regiones fijas de la página
// - Scanner: cámara/decodificador inyectable, pausa tras canjear
// ============================================================================

mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod scanner;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;

pub use crate::error::KioskError;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Voucher kiosk - Rust + WASM");

    let app = App::new(&CONFIG)?;
    app.launch();

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Procesa un código como si lo hubiera leído la cámara (llamable desde JavaScript)
#[wasm_bindgen]
pub fn kiosk_process_code(code: String) {
    APP.with(|app_cell| match app_cell.borrow().as_ref() {
        Some(app) => app.process_code(code),
        None => log::warn!("⚠️ [KIOSK] App no está inicializada"),
    });
}

/// Re-render completo (llamable desde JavaScript)
#[wasm_bindgen]
pub fn rerender_kiosk() {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow().as_ref() {
            app.render();
        }
    });
}
