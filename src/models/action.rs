use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::session::Message;

// ============================================================================
// ACCIONES - Siguiente paso legal declarado por el servidor
// ============================================================================

/// Verbo HTTP de una acción. El servidor lo envía como texto ("POST", "patch"...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "PATCH" => Ok(Verb::Patch),
            "DELETE" => Ok(Verb::Delete),
            other => Err(format!("unsupported HTTP verb: {}", other)),
        }
    }
}

impl TryFrom<String> for Verb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Verb> for String {
    fn from(verb: Verb) -> Self {
        verb.as_str().to_string()
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acción declarada por el servidor (escaneo o botón)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub verb: Verb,

    /// Plantilla de URL, puede contener `{code}`
    pub url: String,

    /// Cuerpo JSON opcional (`null` equivale a ausente)
    #[serde(default)]
    pub body: Option<serde_json::Value>,

    /// Etiqueta del botón de acción
    #[serde(default)]
    pub message: Option<Message>,
}

/// Canales de interacción habilitados por el servidor.
/// Un canal ausente es inerte: escaneos o clics se ignoran.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NextActions {
    #[serde(default)]
    pub scan: Option<Action>,

    #[serde(default)]
    pub button: Option<Action>,
}

impl NextActions {
    pub fn is_inert(&self) -> bool {
        self.scan.is_none() && self.button.is_none()
    }
}

/// `null` en el JSON se trata igual que un campo ausente
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verb_is_case_insensitive() {
        let action: Action = serde_json::from_value(json!({
            "verb": "patch",
            "url": "/vouchers/{code}"
        }))
        .unwrap();
        assert_eq!(action.verb, Verb::Patch);
        assert!(action.body.is_none());
        assert!(action.message.is_none());
    }

    #[test]
    fn unknown_verb_is_rejected() {
        let result = serde_json::from_value::<Action>(json!({
            "verb": "TRACE",
            "url": "/x"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn null_body_is_absent() {
        let action: Action = serde_json::from_value(json!({
            "verb": "POST",
            "url": "/api/redeem/{code}",
            "body": null
        }))
        .unwrap();
        assert!(action.body.is_none());
    }

    #[test]
    fn server_action_with_label_parses() {
        let actions: NextActions = serde_json::from_value(json!({
            "scan": {
                "url": "/vouchers/{code}",
                "verb": "PATCH",
                "body": {"state": 1},
                "message": {"text": "Scan to distribute a voucher", "severity": 0}
            },
            "button": null
        }))
        .unwrap();

        let scan = actions.scan.unwrap();
        assert_eq!(scan.body, Some(json!({"state": 1})));
        assert_eq!(scan.message.unwrap().text, "Scan to distribute a voucher");
        assert!(actions.button.is_none());
    }
}
