// ============================================================================
// SCAN CONTROLLER - Escáner → dispatcher, con pausa tras canjear un vale
// ============================================================================
// Tras un escaneo cuyo nuevo estado trae un vale: parar el decodificador,
// esperar la pausa fija, refrescar la autenticación y reanudar en la misma
// cámara. Los fallos de cámara/decodificador se muestran en `scan-notice`.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::KioskConfig;
use crate::error::KioskError;
use crate::models::{Message, Severity};
use crate::scanner::source::{CameraPreference, DecodeCallback, ErrorCallback, ScanSource, VideoDevice};
use crate::services::{ActionDispatcher, HttpTransport, RoundTrip};
use crate::state::SessionStore;
use crate::utils::timers::Delay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    pub time_between_scans_ms: u32,
    pub cooldown_ms: u32,
    pub camera: CameraPreference,
}

impl From<&KioskConfig> for ScanSettings {
    fn from(config: &KioskConfig) -> Self {
        Self {
            time_between_scans_ms: config.time_between_scans_ms,
            cooldown_ms: config.redeem_cooldown_ms,
            camera: config.camera,
        }
    }
}

pub struct ScanController<S, D, T> {
    source: S,
    delay: D,
    dispatcher: ActionDispatcher<T>,
    settings: ScanSettings,
    device: RefCell<Option<VideoDevice>>,
    cooling_down: Cell<bool>,
    on_first_scan: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl<S, D, T> ScanController<S, D, T>
where
    S: ScanSource + 'static,
    D: Delay + 'static,
    T: HttpTransport + 'static,
{
    pub fn new(source: S, delay: D, dispatcher: ActionDispatcher<T>, settings: ScanSettings) -> Rc<Self> {
        Rc::new(Self {
            source,
            delay,
            dispatcher,
            settings,
            device: RefCell::new(None),
            cooling_down: Cell::new(false),
            on_first_scan: RefCell::new(None),
        })
    }

    /// Se ejecuta una sola vez, con el primer código procesado
    pub fn on_first_scan(&self, hook: impl FnOnce() + 'static) {
        *self.on_first_scan.borrow_mut() = Some(Box::new(hook));
    }

    pub fn current_device(&self) -> Option<VideoDevice> {
        self.device.borrow().clone()
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooling_down.get()
    }

    fn store(&self) -> &SessionStore {
        self.dispatcher.store()
    }

    /// Enumera cámaras, elige según la preferencia y arranca la decodificación
    pub async fn setup(self: &Rc<Self>) -> Result<Vec<VideoDevice>, KioskError> {
        log::info!("📷 [SCANNER] Buscando cámaras...");
        let devices = self
            .source
            .list_devices()
            .await
            .map_err(|e| self.fail(e))?;

        let device = self
            .settings
            .camera
            .select(&devices)
            .cloned()
            .ok_or_else(|| self.fail(KioskError::NoCamera))?;

        log::info!("📷 [SCANNER] {} cámara(s), usando \"{}\"", devices.len(), device.label);
        self.use_device(device).await?;
        Ok(devices)
    }

    /// Cambia de cámara: un solo bucle de decodificación a la vez
    pub async fn use_device(self: &Rc<Self>, device: VideoDevice) -> Result<(), KioskError> {
        self.source.stop();
        *self.device.borrow_mut() = Some(device.clone());
        self.start_decoding(&device).await
    }

    async fn start_decoding(self: &Rc<Self>, device: &VideoDevice) -> Result<(), KioskError> {
        let (on_decoded, on_error) = self.callbacks();
        match self
            .source
            .start(device, self.settings.time_between_scans_ms, on_decoded, on_error)
            .await
        {
            Ok(()) => {
                log::info!("✅ [SCANNER] Decodificando con \"{}\"", device.label);
                self.store().set_scan_notice(None);
                Ok(())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    fn callbacks(self: &Rc<Self>) -> (DecodeCallback, ErrorCallback) {
        let on_decoded: DecodeCallback = {
            let this = Rc::clone(self);
            Rc::new(move |code: String| {
                let this = Rc::clone(&this);
                wasm_bindgen_futures::spawn_local(async move {
                    this.process_code(&code).await;
                });
            })
        };
        let on_error: ErrorCallback = {
            let this = Rc::clone(self);
            Rc::new(move |error: KioskError| this.report(&error))
        };
        (on_decoded, on_error)
    }

    /// Código decodificado (o fragmento de depuración) → acción de escaneo
    pub async fn process_code(self: &Rc<Self>, code: &str) -> RoundTrip {
        if self.cooling_down.get() {
            log::debug!("⏸️ [SCANNER] En pausa, se ignora {}", code);
            return RoundTrip::Skipped;
        }

        let hook = self.on_first_scan.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }

        let outcome = self.dispatcher.process_scan(code).await;
        if outcome.is_applied() && self.store().has_voucher() {
            self.cooldown().await;
        }
        outcome
    }

    async fn cooldown(self: &Rc<Self>) {
        log::info!("⏸️ [SCANNER] Vale escaneado, pausa de {} ms", self.settings.cooldown_ms);
        self.cooling_down.set(true);
        self.source.stop();

        self.delay.sleep(self.settings.cooldown_ms).await;

        if let RoundTrip::Busy = self.dispatcher.client().refresh_auth().await {
            log::warn!("⚠️ [SCANNER] Refresco de autenticación omitido: petición en curso");
        }

        self.cooling_down.set(false);
        if let Some(device) = self.current_device() {
            // El fallo ya queda en el banner
            let _ = self.start_decoding(&device).await;
        }
    }

    /// Registra el fallo y lo muestra en el banner del escáner
    pub fn report(&self, error: &KioskError) {
        log::error!("❌ [SCANNER] {}", error);
        self.store()
            .set_scan_notice(Some(Message::new(error.to_string(), Severity::Critical)));
    }

    fn fail(&self, error: KioskError) -> KioskError {
        self.report(&error);
        error
    }
}
