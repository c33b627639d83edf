// Rutas y cabeceras fijas del protocolo con el servidor

/// Inicializa la sesión y devuelve el estado completo
pub const START_PATH: &str = "/api/start";

/// Refresco de autenticación tras la pausa de canje
pub const AUTH_PATH_PREFIX: &str = "/api/auth/";

/// Marcador de la plantilla de URL sustituido por el código escaneado
pub const CODE_PLACEHOLDER: &str = "{code}";

pub const ACCEPT_HEADER: &str = "application/json, */*;q=0.5";
pub const CONTENT_TYPE_HEADER: &str = "application/json;charset=utf-8";

/// Clase CSS que oculta una región
pub const INVISIBLE_CLASS: &str = "invisible";

pub const HISTORY_DIALOG_TITLE: &str = "History";
