use serde::{Deserialize, Serialize};

use crate::models::action::{null_as_default, Action, NextActions};

// ============================================================================
// SESSION STATE - Instantánea completa devuelta por cada llamada al servidor
// ============================================================================
// Se reemplaza entera en cada ida y vuelta, nunca se fusiona campo a campo.
// Un campo ausente significa "ocultar la región correspondiente".
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Operador autenticado; ausente oculta la cabecera
    #[serde(default)]
    pub user: Option<User>,

    /// Vale escaneado actualmente
    #[serde(default)]
    pub voucher: Option<Voucher>,

    #[serde(default)]
    pub message_main: Option<Message>,

    #[serde(default)]
    pub message_detail: Option<Message>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub next_actions: NextActions,
}

impl SessionState {
    pub fn scan_action(&self) -> Option<&Action> {
        self.next_actions.scan.as_ref()
    }

    pub fn button_action(&self) -> Option<&Action> {
        self.next_actions.button.as_ref()
    }

    /// Token bearer enviado al servidor.
    /// Es el id del usuario tal cual (contrato heredado del servidor, no un token opaco).
    pub fn bearer_token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: String,

    #[serde(default)]
    pub expiration_date: Option<String>,

    /// Saldo del vale
    #[serde(default)]
    pub value: Option<f64>,

    /// Historial, en el orden enviado por el servidor
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<String>,
}

/// Banner de texto con severidad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Severidad 0..=3, de menos a más urgente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    #[default]
    Neutral,
    Action,
    Warning,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Neutral,
        Severity::Action,
        Severity::Warning,
        Severity::Critical,
    ];

    pub fn level(self) -> u8 {
        match self {
            Severity::Neutral => 0,
            Severity::Action => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }

    /// Clase CSS del banner: `severity-0` .. `severity-3`
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Neutral => "severity-0",
            Severity::Action => "severity-1",
            Severity::Warning => "severity-2",
            Severity::Critical => "severity-3",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Severity::ALL
            .get(usize::from(level))
            .copied()
            .ok_or_else(|| format!("severity out of range: {}", level))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.level()
    }
}
