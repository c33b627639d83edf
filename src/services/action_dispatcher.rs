// ============================================================================
// ACTION DISPATCHER - Acción declarada por el servidor → petición HTTP
// ============================================================================

use std::rc::Rc;

use crate::error::KioskError;
use crate::models::{Action, Verb};
use crate::services::api_client::HttpTransport;
use crate::services::session_client::{RoundTrip, SessionClient};
use crate::state::SessionStore;
use crate::utils::constants::CODE_PLACEHOLDER;

/// Llamada resuelta a partir de una acción (+ código escaneado)
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCall {
    pub verb: Verb,
    pub url: String,
    pub body: Option<String>,
}

/// Sustituye `{code}` (primera aparición) solo si hay código no vacío.
/// Sin código la plantilla queda literal: evitarlo es cosa del servidor.
pub fn expand_url(template: &str, code: Option<&str>) -> String {
    match code {
        Some(code) if !code.is_empty() => template.replacen(CODE_PLACEHOLDER, code, 1),
        _ => template.to_string(),
    }
}

/// Verbo, URL expandida y cuerpo JSON serializado
pub fn resolve(action: &Action, code: Option<&str>) -> Result<ActionCall, KioskError> {
    let body = action
        .body
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| KioskError::Serialize(e.to_string()))?;

    Ok(ActionCall {
        verb: action.verb,
        url: expand_url(&action.url, code),
        body,
    })
}

pub struct ActionDispatcher<T> {
    client: Rc<SessionClient<T>>,
}

impl<T> Clone for ActionDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport> ActionDispatcher<T> {
    pub fn new(client: Rc<SessionClient<T>>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SessionClient<T> {
        &self.client
    }

    pub fn store(&self) -> &SessionStore {
        self.client.store()
    }

    /// Acción ausente = canal deshabilitado por el servidor: no-op silencioso
    pub async fn dispatch(&self, action: Option<Action>, code: Option<&str>) -> RoundTrip {
        let Some(action) = action else {
            return RoundTrip::Skipped;
        };

        let call = match resolve(&action, code) {
            Ok(call) => call,
            Err(error) => {
                log::error!("❌ [DISPATCH] Acción inválida {} {}: {}", action.verb, action.url, error);
                return RoundTrip::Failed(error);
            }
        };

        self.client.query(call.verb, call.url, call.body).await
    }

    /// Código escaneado → acción `next_actions.scan`
    pub async fn process_scan(&self, code: &str) -> RoundTrip {
        log::info!("📱 [DISPATCH] Código escaneado: {}", code);
        let action = self.store().scan_action();
        if action.is_none() {
            log::debug!("ℹ️ [DISPATCH] Canal de escaneo inerte, se ignora {}", code);
        }
        self.dispatch(action, Some(code)).await
    }

    /// Clic en el botón de acción → `next_actions.button`
    pub async fn process_button(&self) -> RoundTrip {
        let action = self.store().button_action();
        self.dispatch(action, None).await
    }
}
