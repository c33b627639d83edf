// ============================================================================
// SESSION CLIENT - Ida y vuelta con el servidor + reemplazo del estado
// ============================================================================
// Adjunta cabeceras (y bearer si hay usuario), envía, y ante 2xx reemplaza el
// Session State completo. Cualquier fallo se registra y el estado no cambia.
// ============================================================================

use crate::error::KioskError;
use crate::models::{SessionState, Verb};
use crate::services::api_client::{HttpTransport, PreparedRequest};
use crate::state::SessionStore;
use crate::utils::constants::{ACCEPT_HEADER, AUTH_PATH_PREFIX, CONTENT_TYPE_HEADER, START_PATH};

/// Resultado observable de una ida y vuelta
#[derive(Debug, Clone, PartialEq)]
pub enum RoundTrip {
    /// No había nada que enviar (canal inerte, sin usuario...)
    Skipped,
    /// Otra petición estaba en curso; no se envió nada
    Busy,
    /// Estado reemplazado
    Applied,
    /// Fallo registrado; estado intacto
    Failed(KioskError),
}

impl RoundTrip {
    pub fn is_applied(&self) -> bool {
        matches!(self, RoundTrip::Applied)
    }
}

pub struct SessionClient<T> {
    transport: T,
    store: SessionStore,
}

impl<T: HttpTransport> SessionClient<T> {
    pub fn new(transport: T, store: SessionStore) -> Self {
        Self { transport, store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// `GET /api/start`: crea (o reinicia) la sesión
    pub async fn start(&self) -> RoundTrip {
        log::info!("🚀 [SESSION] Iniciando sesión...");
        self.query(Verb::Get, START_PATH.to_string(), None).await
    }

    /// `GET /api/auth/{userId}` tras la pausa de canje. Sin usuario no hay nada que refrescar.
    pub async fn refresh_auth(&self) -> RoundTrip {
        let Some(user_id) = self.store.bearer_token() else {
            log::debug!("ℹ️ [SESSION] Sin usuario, no se refresca la autenticación");
            return RoundTrip::Skipped;
        };
        log::info!("🔐 [SESSION] Refrescando autenticación de {}", user_id);
        self.query(Verb::Get, format!("{}{}", AUTH_PATH_PREFIX, user_id), None)
            .await
    }

    /// Envía una petición y, si tiene éxito, reemplaza el estado.
    /// Como mucho una en curso: las demás se descartan (`Busy`).
    pub async fn query(&self, verb: Verb, url: String, body: Option<String>) -> RoundTrip {
        let Some(_guard) = self.store.begin_round_trip() else {
            log::warn!("⏳ [SESSION] Petición en curso, se descarta {} {}", verb, url);
            return RoundTrip::Busy;
        };

        let request = self.prepare(verb, url, body);
        let label = format!("{} {}", request.verb, request.url);

        match self.round_trip(request).await {
            Ok(state) => {
                log::info!("✅ [SESSION] {} → estado reemplazado", label);
                self.store.replace(state);
                RoundTrip::Applied
            }
            Err(error) => {
                log::error!("❌ [SESSION] {} falló: {}", label, error);
                RoundTrip::Failed(error)
            }
        }
    }

    /// Cabeceras fijas + `Authorization: Bearer <user.id>` si hay usuario
    pub fn prepare(&self, verb: Verb, url: String, body: Option<String>) -> PreparedRequest {
        let mut headers = vec![
            ("Accept", ACCEPT_HEADER.to_string()),
            ("Content-Type", CONTENT_TYPE_HEADER.to_string()),
        ];
        if let Some(token) = self.store.bearer_token() {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        PreparedRequest {
            verb,
            url,
            headers,
            body,
        }
    }

    async fn round_trip(&self, request: PreparedRequest) -> Result<SessionState, KioskError> {
        let reply = self.transport.send(request).await?;
        if !reply.ok() {
            return Err(KioskError::Status {
                status: reply.status,
                status_text: reply.status_text,
            });
        }
        serde_json::from_str::<SessionState>(&reply.body)
            .map_err(|e| KioskError::Parse(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use serde_json::json;

    use super::testing::ScriptedTransport;
    use super::*;

    fn client() -> (SessionClient<ScriptedTransport>, ScriptedTransport, SessionStore) {
        let transport = ScriptedTransport::default();
        let store = SessionStore::new();
        (
            SessionClient::new(transport.clone(), store.clone()),
            transport,
            store,
        )
    }

    #[test]
    fn start_sends_fixed_headers_without_bearer() {
        let (client, transport, store) = client();
        transport.reply_json(200, json!({"user": null, "voucher": null, "next_actions": {}}));

        assert_eq!(block_on(client.start()), RoundTrip::Applied);

        let request = transport.last_sent();
        assert_eq!(request.verb, Verb::Get);
        assert_eq!(request.url, "/api/start");
        assert_eq!(request.header("Accept"), Some("application/json, */*;q=0.5"));
        assert_eq!(
            request.header("Content-Type"),
            Some("application/json;charset=utf-8")
        );
        assert!(request.header("Authorization").is_none());
        assert!(store.snapshot().unwrap().next_actions.is_inert());
    }

    #[test]
    fn known_user_is_sent_as_bearer() {
        let (client, transport, _store) = client();
        transport
            .reply_json(200, json!({"user": {"id": "u-7", "description": "Caisse"}}))
            .reply_json(200, json!({"user": {"id": "u-7", "description": "Caisse"}}));

        block_on(client.start());
        block_on(client.query(Verb::Post, "/api/anything".to_string(), None));

        assert_eq!(
            transport.last_sent().header("Authorization"),
            Some("Bearer u-7")
        );
    }

    #[test]
    fn server_error_leaves_state_and_skips_render() {
        let (client, transport, store) = client();
        transport
            .reply_json(200, json!({"user": {"id": "u-1", "description": "A"}}))
            .reply_json(500, json!({"detail": "boom"}));
        block_on(client.start());
        let before = store.snapshot();

        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        store.subscribe(move || counter.set(counter.get() + 1));

        let outcome = block_on(client.query(Verb::Get, "/api/start".to_string(), None));

        assert!(matches!(
            outcome,
            RoundTrip::Failed(KioskError::Status { status: 500, .. })
        ));
        assert_eq!(store.snapshot(), before);
        assert_eq!(renders.get(), 0);
    }

    #[test]
    fn unparsable_body_is_a_failure() {
        let (client, transport, store) = client();
        transport.reply_raw(200, "<html>oops</html>");

        let outcome = block_on(client.start());
        assert!(matches!(outcome, RoundTrip::Failed(KioskError::Parse(_))));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn network_error_releases_in_flight_slot() {
        let (client, transport, store) = client();
        transport
            .fail(KioskError::Network("offline".to_string()))
            .reply_json(200, json!({}));

        assert!(matches!(block_on(client.start()), RoundTrip::Failed(_)));
        assert!(!store.is_in_flight());
        assert_eq!(block_on(client.start()), RoundTrip::Applied);
    }

    #[test]
    fn concurrent_query_is_dropped() {
        let (client, transport, store) = client();
        let _held = store.begin_round_trip().unwrap();

        assert_eq!(block_on(client.start()), RoundTrip::Busy);
        assert_eq!(transport.sent_count(), 0);
    }

    #[test]
    fn refresh_auth_needs_a_user() {
        let (client, transport, _store) = client();
        assert_eq!(block_on(client.refresh_auth()), RoundTrip::Skipped);
        assert_eq!(transport.sent_count(), 0);

        transport
            .reply_json(200, json!({"user": {"id": "u-9", "description": "B"}}))
            .reply_json(200, json!({"user": {"id": "u-9", "description": "B"}}));
        block_on(client.start());
        assert_eq!(block_on(client.refresh_auth()), RoundTrip::Applied);
        assert_eq!(transport.last_sent().url, "/api/auth/u-9");
    }
}
