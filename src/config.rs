use crate::scanner::CameraPreference;

// ============================================================================
// CONFIG - Configuración del quiosco (tiempo de compilación, vía build.rs/.env)
// ============================================================================

pub const DEFAULT_TIME_BETWEEN_SCANS_MS: u32 = 3000;
pub const DEFAULT_REDEEM_COOLDOWN_MS: u32 = 5000;

/// Intervalo admitido entre lecturas del decodificador
pub const MIN_TIME_BETWEEN_SCANS_MS: u32 = 1000;
pub const MAX_TIME_BETWEEN_SCANS_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct KioskConfig {
    /// Base para rutas relativas; vacío = mismo origen
    pub backend_url: String,
    pub time_between_scans_ms: u32,
    pub redeem_cooldown_ms: u32,
    pub camera: CameraPreference,
    pub debug_fragment_scan: bool,
    pub enable_logging: bool,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            time_between_scans_ms: DEFAULT_TIME_BETWEEN_SCANS_MS,
            redeem_cooldown_ms: DEFAULT_REDEEM_COOLDOWN_MS,
            camera: CameraPreference::Last,
            debug_fragment_scan: true,
            enable_logging: true,
        }
    }
}

impl KioskConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(|key| match key {
            "BACKEND_URL" => option_env!("BACKEND_URL"),
            "TIME_BETWEEN_SCANS_MS" => option_env!("TIME_BETWEEN_SCANS_MS"),
            "REDEEM_COOLDOWN_MS" => option_env!("REDEEM_COOLDOWN_MS"),
            "CAMERA_PREFERENCE" => option_env!("CAMERA_PREFERENCE"),
            "DEBUG_FRAGMENT_SCAN" => option_env!("DEBUG_FRAGMENT_SCAN"),
            "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
            _ => None,
        })
    }

    /// Valores inválidos o ausentes caen en los valores por defecto
    pub fn from_values<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let defaults = Self::default();
        Self {
            backend_url: lookup("BACKEND_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            time_between_scans_ms: lookup("TIME_BETWEEN_SCANS_MS")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .map(|ms| ms.clamp(MIN_TIME_BETWEEN_SCANS_MS, MAX_TIME_BETWEEN_SCANS_MS))
                .unwrap_or(defaults.time_between_scans_ms),
            redeem_cooldown_ms: lookup("REDEEM_COOLDOWN_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.redeem_cooldown_ms),
            camera: lookup("CAMERA_PREFERENCE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.camera),
            debug_fragment_scan: lookup("DEBUG_FRAGMENT_SCAN")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.debug_fragment_scan),
            enable_logging: lookup("ENABLE_LOGGING")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    /// Nivel máximo de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: KioskConfig = KioskConfig::from_env();
}
