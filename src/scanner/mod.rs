// ============================================================================
// SCANNER - Integración con la cámara y el decodificador externo
// ============================================================================

pub mod controller;
pub mod source;
pub mod zxing;

pub use controller::{ScanController, ScanSettings};
pub use source::{fragment_code, CameraPreference, ScanSource, VideoDevice};
pub use zxing::ZxingScanSource;
