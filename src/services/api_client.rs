// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio: envía la petición preparada y devuelve
// status + cuerpo. La interpretación la hace el SessionClient.
// ============================================================================

use gloo_net::http::Request;

use crate::error::KioskError;
use crate::models::Verb;

/// Petición lista para enviar
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Respuesta cruda del servidor
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    /// Equivalente a `Response.ok` de fetch
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transporte HTTP; los tests lo sustituyen por uno guionizado
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: PreparedRequest) -> Result<HttpReply, KioskError>;
}

/// Cliente API sobre fetch (gloo-net)
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HttpTransport for ApiClient {
    async fn send(&self, request: PreparedRequest) -> Result<HttpReply, KioskError> {
        let url = absolute_url(&self.base_url, &request.url);

        log::debug!("🌐 [API] {} {}", request.verb, url);

        let mut builder = match request.verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
            Verb::Patch => Request::patch(&url),
            Verb::Delete => Request::delete(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| KioskError::Network(format!("Request build error: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| KioskError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| KioskError::Network(format!("Body read error: {}", e)))?;

        Ok(HttpReply {
            status,
            status_text,
            body,
        })
    }
}

/// Resuelve una ruta del servidor contra la URL base.
/// URLs absolutas se usan tal cual; base vacía = mismo origen.
pub fn absolute_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || base_url.is_empty() {
        return url.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_keeps_path() {
        assert_eq!(absolute_url("", "/api/start"), "/api/start");
    }

    #[test]
    fn relative_paths_join_base() {
        assert_eq!(
            absolute_url("https://kiosk.example.org/", "/api/start"),
            "https://kiosk.example.org/api/start"
        );
        assert_eq!(
            absolute_url("https://kiosk.example.org", "api/start"),
            "https://kiosk.example.org/api/start"
        );
    }

    #[test]
    fn absolute_action_urls_are_untouched() {
        assert_eq!(
            absolute_url("https://kiosk.example.org", "https://other.example.org/redeem/1"),
            "https://other.example.org/redeem/1"
        );
    }

    #[test]
    fn ok_matches_2xx_only() {
        let reply = |status| HttpReply {
            status,
            status_text: String::new(),
            body: String::new(),
        };
        assert!(reply(200).ok());
        assert!(reply(204).ok());
        assert!(!reply(304).ok());
        assert!(!reply(500).ok());
    }
}
