// ============================================================================
// APP - Cableado del quiosco: store, cliente, escáner, render y eventos
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::KioskConfig;
use crate::dom::{location_hash, on_click, DomSurface, ElementBuilder, Region, Surface};
use crate::scanner::{fragment_code, ScanController, ScanSettings, VideoDevice, ZxingScanSource};
use crate::services::{ActionDispatcher, ApiClient, SessionClient};
use crate::state::SessionStore;
use crate::utils::timers::GlooDelay;
use crate::views::{close_dialog, hide_camera_selector, render_store, show_history};

type Scanner = ScanController<ZxingScanSource, GlooDelay, ApiClient>;

/// Aplicación principal
pub struct App {
    store: SessionStore,
    dispatcher: ActionDispatcher<ApiClient>,
    scanner: Rc<Scanner>,
    surface: DomSurface,
}

impl App {
    /// Crear aplicación y registrar listeners (una sola vez por página)
    pub fn new(config: &KioskConfig) -> Result<Self, JsValue> {
        let store = SessionStore::new();

        // Cada reemplazo del estado (o del aviso del escáner) re-renderiza
        {
            let reader = store.clone();
            store.subscribe(move || render_store(&DomSurface, &reader));
        }

        let client = SessionClient::new(ApiClient::new(config.backend_url.clone()), store.clone());
        let dispatcher = ActionDispatcher::new(Rc::new(client));

        let scanner = ScanController::new(
            ZxingScanSource::new(Region::ScanPreview.element_id()),
            GlooDelay,
            dispatcher.clone(),
            ScanSettings::from(config),
        );
        scanner.on_first_scan(|| {
            if let Err(e) = hide_camera_selector(&DomSurface) {
                log::warn!("⚠️ [APP] No se pudo ocultar el selector de cámara: {}", e);
            }
        });

        let app = Self {
            store,
            dispatcher,
            scanner,
            surface: DomSurface,
        };
        app.bind_events(config.debug_fragment_scan)?;
        Ok(app)
    }

    fn bind_events(&self, debug_fragment_scan: bool) -> Result<(), JsValue> {
        if let Some(button) = self.surface.node(Region::Action) {
            let dispatcher = self.dispatcher.clone();
            on_click(&button, move |_| {
                let dispatcher = dispatcher.clone();
                spawn_local(async move {
                    dispatcher.process_button().await;
                });
            })?;
        }

        // Salir = volver a empezar la sesión
        if let Some(exit) = self.surface.node(Region::Exit) {
            let dispatcher = self.dispatcher.clone();
            on_click(&exit, move |_| {
                let dispatcher = dispatcher.clone();
                spawn_local(async move {
                    dispatcher.client().start().await;
                });
            })?;
        }

        if let Some(history) = self.surface.node(Region::History) {
            let store = self.store.clone();
            on_click(&history, move |_| {
                if let Err(e) = show_history(&DomSurface, &store) {
                    log::error!("❌ [APP] Error mostrando historial: {}", e);
                }
            })?;
        }

        if let Some(dialog) = self.surface.node(Region::Dialog) {
            on_click(&dialog, move |_| {
                if let Err(e) = close_dialog(&DomSurface) {
                    log::warn!("⚠️ [APP] Error cerrando diálogo: {}", e);
                }
            })?;
        }

        // Depuración: clic en la vista previa = escanear el fragmento de la URL (#codigo)
        if debug_fragment_scan {
            if let Some(preview) = self.surface.node(Region::ScanPreview) {
                let scanner = self.scanner.clone();
                on_click(&preview, move |_| {
                    let hash = location_hash();
                    if let Some(code) = fragment_code(&hash) {
                        let code = code.to_string();
                        let scanner = scanner.clone();
                        spawn_local(async move {
                            scanner.process_code(&code).await;
                        });
                    }
                })?;
            }
        }

        Ok(())
    }

    /// Render inicial, `GET /api/start` y arranque del escáner
    pub fn launch(&self) {
        self.render();

        let dispatcher = self.dispatcher.clone();
        spawn_local(async move {
            dispatcher.client().start().await;
        });

        let scanner = self.scanner.clone();
        spawn_local(async move {
            let Ok(devices) = scanner.setup().await else {
                return;
            };
            if devices.len() > 1 {
                if let Err(e) = render_camera_selector(&scanner, &devices) {
                    log::warn!("⚠️ [APP] Selector de cámara no disponible: {:?}", e);
                }
            }
        });
    }

    /// Procesar un código como si viniera del escáner (automatización de pruebas)
    pub fn process_code(&self, code: String) {
        let scanner = self.scanner.clone();
        spawn_local(async move {
            scanner.process_code(&code).await;
        });
    }

    /// Re-render completo desde el estado actual
    pub fn render(&self) {
        render_store(&self.surface, &self.store);
    }
}

/// Un botón por cámara; clic = reiniciar la decodificación en esa cámara
fn render_camera_selector(scanner: &Rc<Scanner>, devices: &[VideoDevice]) -> Result<(), JsValue> {
    let Some(selector) = DomSurface.node(Region::CameraSelector) else {
        return Ok(());
    };

    for device in devices {
        let button = ElementBuilder::new("button")?
            .class("camera-option")
            .attr("type", "button")?
            .text(&device.label)
            .append_to(&selector)?;

        let scanner = scanner.clone();
        let device = device.clone();
        on_click(&button, move |_| {
            let scanner = scanner.clone();
            let device = device.clone();
            spawn_local(async move {
                log::info!("📷 [APP] Cambiando a cámara \"{}\"", device.label);
                // El fallo ya se muestra en el banner del escáner
                let _ = scanner.use_device(device).await;
            });
        })?;
    }
    Ok(())
}
