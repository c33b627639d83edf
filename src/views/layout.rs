// ============================================================================
// LAYOUT - Proyección pura Session State → vista del quiosco
// ============================================================================
// Sin memoria entre llamadas: misma entrada, misma vista.
// ============================================================================

use crate::models::{Message, SessionState, Severity, Voucher};

/// Texto + severidad de un banner o del botón de acción
#[derive(Debug, Clone, PartialEq)]
pub struct BannerView {
    pub text: String,
    pub severity: Severity,
}

impl From<&Message> for BannerView {
    fn from(message: &Message) -> Self {
        Self {
            text: message.text.clone(),
            severity: message.severity,
        }
    }
}

/// Resumen del vale (id, caducidad, saldo)
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherView {
    pub id: String,
    pub expiration: String,
    pub value: String,
}

impl From<&Voucher> for VoucherView {
    fn from(voucher: &Voucher) -> Self {
        Self {
            id: voucher.id.clone(),
            expiration: voucher.expiration_date.clone().unwrap_or_default(),
            value: voucher.value.map(format_value).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KioskView {
    pub header_visible: bool,
    pub user_label: Option<String>,
    pub voucher: Option<VoucherView>,
    pub history_visible: bool,
    pub message: Option<BannerView>,
    pub detail: Option<BannerView>,
    pub action_visible: bool,
    /// Etiqueta del botón; puede faltar aunque el botón sea visible
    pub action_label: Option<BannerView>,
    pub scan_notice: Option<BannerView>,
}

/// Proyecta el estado (None = aún sin `start`) y el aviso local del escáner
pub fn project(state: Option<&SessionState>, scan_notice: Option<&Message>) -> KioskView {
    let scan_notice = scan_notice.map(BannerView::from);
    let Some(state) = state else {
        return KioskView {
            scan_notice,
            ..KioskView::default()
        };
    };

    let button = state.button_action();
    KioskView {
        header_visible: state.user.is_some(),
        user_label: state.user.as_ref().map(|u| u.description.clone()),
        voucher: state.voucher.as_ref().map(VoucherView::from),
        history_visible: state.voucher.is_some(),
        message: state.message_main.as_ref().map(BannerView::from),
        detail: state.message_detail.as_ref().map(BannerView::from),
        action_visible: button.is_some(),
        action_label: button
            .and_then(|action| action.message.as_ref())
            .map(BannerView::from),
        scan_notice,
    }
}

/// Entradas del historial en el orden del servidor (vacío sin vale)
pub fn history_entries(state: Option<&SessionState>) -> Vec<String> {
    state
        .and_then(|s| s.voucher.as_ref())
        .map(|v| v.history.clone())
        .unwrap_or_default()
}

/// Saldo sin decimales superfluos: 20 → "20", 12.5 → "12.50"
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(value: serde_json::Value) -> SessionState {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_start_hides_everything() {
        let view = project(
            Some(&state(json!({"user": null, "voucher": null, "next_actions": {}}))),
            None,
        );
        assert!(!view.header_visible);
        assert!(view.voucher.is_none());
        assert!(!view.history_visible);
        assert!(!view.action_visible);
        assert!(view.message.is_none());
        assert!(view.detail.is_none());
    }

    #[test]
    fn view_depends_only_on_new_state() {
        let full = state(json!({
            "user": {"id": "u", "description": "Caisse 2"},
            "voucher": {"id": "V-1", "expiration_date": "2026-12-31", "value": 12.5, "history": []},
            "message_main": {"text": "OK", "severity": 1},
            "next_actions": {"button": {"verb": "POST", "url": "/next", "message": {"text": "Next", "severity": 0}}}
        }));
        let empty = state(json!({}));

        let after_full = project(Some(&full), None);
        assert!(after_full.header_visible);
        assert_eq!(after_full.user_label.as_deref(), Some("Caisse 2"));
        assert_eq!(
            after_full.voucher,
            Some(VoucherView {
                id: "V-1".to_string(),
                expiration: "2026-12-31".to_string(),
                value: "12.50".to_string(),
            })
        );
        assert!(after_full.action_visible);
        assert_eq!(after_full.action_label.unwrap().text, "Next");

        // Misma proyección que desde cero
        assert_eq!(project(Some(&empty), None), project(Some(&state(json!({}))), None));
        assert_eq!(project(Some(&empty), None), KioskView::default());
    }

    #[test]
    fn button_without_label_is_still_visible() {
        let view = project(
            Some(&state(json!({"next_actions": {"button": {"verb": "GET", "url": "/x"}}}))),
            None,
        );
        assert!(view.action_visible);
        assert!(view.action_label.is_none());
    }

    #[test]
    fn scan_notice_is_projected_before_start() {
        let notice = Message::new("No camera available", Severity::Critical);
        let view = project(None, Some(&notice));
        assert_eq!(view.scan_notice.unwrap().severity, Severity::Critical);
        assert!(!view.header_visible);
    }

    #[test]
    fn whole_values_have_no_decimals() {
        assert_eq!(format_value(20.0), "20");
        assert_eq!(format_value(0.5), "0.50");
    }

    #[test]
    fn history_keeps_server_order() {
        let s = state(json!({"voucher": {"id": "V", "history": ["created", "redeemed"]}}));
        assert_eq!(history_entries(Some(&s)), vec!["created", "redeemed"]);
        assert!(history_entries(None).is_empty());
    }
}
