// ============================================================================
// SCAN SOURCE - Capacidad de escaneo inyectable (cámara + decodificador)
// ============================================================================

use std::rc::Rc;
use std::str::FromStr;

use crate::error::KioskError;

/// Cámara disponible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDevice {
    pub device_id: String,
    pub label: String,
}

pub type DecodeCallback = Rc<dyn Fn(String)>;
pub type ErrorCallback = Rc<dyn Fn(KioskError)>;

/// Productor opaco de códigos decodificados.
/// Solo un bucle de decodificación activo: `start` sobre otro dispositivo exige `stop` antes.
#[allow(async_fn_in_trait)]
pub trait ScanSource {
    async fn list_devices(&self) -> Result<Vec<VideoDevice>, KioskError>;

    async fn start(
        &self,
        device: &VideoDevice,
        time_between_scans_ms: u32,
        on_decoded: DecodeCallback,
        on_error: ErrorCallback,
    ) -> Result<(), KioskError>;

    fn stop(&self);
}

/// Qué cámara usar al arrancar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreference {
    First,
    /// Normalmente la trasera en móviles y tablets
    Last,
    Index(usize),
}

impl CameraPreference {
    /// Índice fuera de rango cae en la última cámara
    pub fn select<'a>(&self, devices: &'a [VideoDevice]) -> Option<&'a VideoDevice> {
        match self {
            CameraPreference::First => devices.first(),
            CameraPreference::Last => devices.last(),
            CameraPreference::Index(index) => devices.get(*index).or_else(|| devices.last()),
        }
    }
}

impl FromStr for CameraPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(CameraPreference::First),
            "last" => Ok(CameraPreference::Last),
            other => other
                .parse::<usize>()
                .map(CameraPreference::Index)
                .map_err(|_| format!("invalid camera preference: {}", other)),
        }
    }
}

/// Código de depuración a partir del fragmento de la URL (`#V-123` → `V-123`)
pub fn fragment_code(hash: &str) -> Option<&str> {
    let code = hash.strip_prefix('#').unwrap_or(hash).trim();
    (!code.is_empty()).then_some(code)
}
