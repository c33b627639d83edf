// ============================================================================
// RENDER - Escribe una KioskView sobre las regiones fijas de la página
// ============================================================================

use crate::dom::{Node, Region, Surface};
use crate::error::KioskError;
use crate::models::Severity;
use crate::state::SessionStore;
use crate::utils::constants::{HISTORY_DIALOG_TITLE, INVISIBLE_CLASS};
use crate::views::layout::{history_entries, project, BannerView, KioskView};

/// Render completo desde el store (subscriber de cada reemplazo de estado)
pub fn render_store<S: Surface>(surface: &S, store: &SessionStore) {
    let view = project(store.snapshot().as_ref(), store.scan_notice().as_ref());
    render(surface, &view);
}

/// Aplica la vista. Regiones ausentes en la plantilla se ignoran.
pub fn render<S: Surface>(surface: &S, view: &KioskView) {
    if let Err(error) = apply(surface, view) {
        log::warn!("⚠️ [RENDER] Render incompleto: {}", error);
    }
}

fn apply<S: Surface>(surface: &S, view: &KioskView) -> Result<(), KioskError> {
    if let Some(header) = surface.node(Region::Header) {
        set_visible(&header, view.header_visible)?;
    }
    if let (Some(user), Some(label)) = (surface.node(Region::User), &view.user_label) {
        user.set_text(label);
    }

    if let Some(panel) = surface.node(Region::Voucher) {
        set_visible(&panel, view.voucher.is_some())?;
    }
    let voucher = view.voucher.as_ref();
    for (region, text) in [
        (Region::VoucherId, voucher.map(|v| v.id.as_str())),
        (Region::VoucherExpiration, voucher.map(|v| v.expiration.as_str())),
        (Region::VoucherValue, voucher.map(|v| v.value.as_str())),
    ] {
        if let Some(node) = surface.node(region) {
            node.set_text(text.unwrap_or_default());
        }
    }

    if let Some(history) = surface.node(Region::History) {
        set_visible(&history, view.history_visible)?;
    }

    for (region, banner) in [
        (Region::Message, view.message.as_ref()),
        (Region::Detail, view.detail.as_ref()),
        (Region::ScanNotice, view.scan_notice.as_ref()),
    ] {
        if let Some(node) = surface.node(region) {
            set_message(&node, banner)?;
            set_visible(&node, banner.is_some())?;
        }
    }

    if let Some(action) = surface.node(Region::Action) {
        set_message(&action, view.action_label.as_ref())?;
        set_visible(&action, view.action_visible)?;
    }
    Ok(())
}

/// Visibilidad mediante la clase `invisible`
pub fn set_visible<N: Node>(node: &N, visible: bool) -> Result<(), KioskError> {
    if visible {
        node.remove_class(INVISIBLE_CLASS)
    } else {
        node.add_class(INVISIBLE_CLASS)
    }
}

/// Texto + clase de severidad; sin mensaje solo se vacía el texto
pub fn set_message<N: Node>(node: &N, message: Option<&BannerView>) -> Result<(), KioskError> {
    match message {
        Some(message) => {
            node.set_text(&message.text);
            set_severity_class(node, message.severity)
        }
        None => {
            node.set_text("");
            Ok(())
        }
    }
}

/// Exactamente una clase `severity-N` tras la llamada
pub fn set_severity_class<N: Node>(node: &N, severity: Severity) -> Result<(), KioskError> {
    for other in Severity::ALL {
        node.remove_class(other.css_class())?;
    }
    node.add_class(severity.css_class())
}

/// Rellena el diálogo con un bloque por entrada del historial y lo abre
pub fn show_history<S: Surface>(surface: &S, store: &SessionStore) -> Result<(), KioskError> {
    let entries = history_entries(store.snapshot().as_ref());
    log::debug!("📜 [RENDER] Historial: {} entradas", entries.len());

    if let Some(title) = surface.node(Region::DialogTitle) {
        title.set_text(HISTORY_DIALOG_TITLE);
    }

    let content = surface
        .node(Region::DialogContent)
        .ok_or_else(|| KioskError::Dom("No #dialog-content element found".to_string()))?;
    content.clear();
    for entry in &entries {
        content.append_text_block(entry)?;
    }

    surface
        .node(Region::Dialog)
        .ok_or_else(|| KioskError::Dom("No #dialog element found".to_string()))?
        .set_open(true)
}

pub fn close_dialog<S: Surface>(surface: &S) -> Result<(), KioskError> {
    match surface.node(Region::Dialog) {
        Some(dialog) => dialog.set_open(false),
        None => Ok(()),
    }
}

/// La cámara elegida se mantiene el resto de la sesión tras el primer escaneo
pub fn hide_camera_selector<S: Surface>(surface: &S) -> Result<(), KioskError> {
    match surface.node(Region::CameraSelector) {
        Some(selector) => set_visible(&selector, false),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dom::testing::FakeSurface;
    use crate::models::{Message, SessionState};

    fn store_with(value: serde_json::Value) -> SessionStore {
        let store = SessionStore::new();
        store.replace(serde_json::from_value::<SessionState>(value).unwrap());
        store
    }

    #[test]
    fn exactly_one_severity_class_after_set_message() {
        let surface = FakeSurface::default();
        let node = surface.get(Region::Message);

        for severity in Severity::ALL {
            let banner = BannerView {
                text: "x".to_string(),
                severity,
            };
            set_message(&node, Some(&banner)).unwrap();
            assert_eq!(node.severity_classes(), vec![severity.css_class().to_string()]);
        }
    }

    #[test]
    fn empty_start_hides_header_voucher_and_action() {
        let surface = FakeSurface::default();
        let store = store_with(json!({"user": null, "voucher": null, "next_actions": {}}));

        render_store(&surface, &store);

        assert!(!surface.get(Region::Header).is_visible());
        assert!(!surface.get(Region::Voucher).is_visible());
        assert!(!surface.get(Region::Action).is_visible());
        assert!(!surface.get(Region::History).is_visible());
        assert!(!surface.get(Region::Message).is_visible());
    }

    #[test]
    fn render_reflects_only_latest_state() {
        let surface = FakeSurface::default();
        let store = store_with(json!({
            "user": {"id": "u", "description": "Caisse 3"},
            "voucher": {"id": "V-9", "value": 20, "history": ["created"]},
            "message_main": {"text": "Voucher valid", "severity": 1},
            "message_detail": {"text": "Expired soon", "severity": 2},
            "next_actions": {"button": {"verb": "POST", "url": "/cashin", "message": {"text": "Cash in", "severity": 1}}}
        }));
        render_store(&surface, &store);

        assert!(surface.get(Region::Header).is_visible());
        assert_eq!(surface.get(Region::User).text(), "Caisse 3");
        assert_eq!(surface.get(Region::VoucherId).text(), "V-9");
        assert_eq!(surface.get(Region::VoucherValue).text(), "20");
        assert_eq!(surface.get(Region::Action).text(), "Cash in");
        assert!(surface.get(Region::Detail).has_class("severity-2"));

        store.replace(serde_json::from_value(json!({})).unwrap());
        render_store(&surface, &store);

        for region in [Region::Header, Region::Voucher, Region::History, Region::Message, Region::Detail, Region::Action] {
            assert!(!surface.get(region).is_visible(), "{:?} should be hidden", region);
        }
        assert_eq!(surface.get(Region::Message).text(), "");
        assert_eq!(surface.get(Region::VoucherId).text(), "");
    }

    #[test]
    fn render_is_idempotent() {
        let surface = FakeSurface::default();
        let store = store_with(json!({"message_main": {"text": "Scan a voucher", "severity": 0}}));

        render_store(&surface, &store);
        let classes = surface.get(Region::Message).0.borrow().classes.clone();
        render_store(&surface, &store);

        assert_eq!(surface.get(Region::Message).0.borrow().classes, classes);
        assert_eq!(surface.get(Region::Message).text(), "Scan a voucher");
    }

    #[test]
    fn missing_regions_are_skipped() {
        let surface = FakeSurface::without(&[Region::VoucherExpiration, Region::ScanNotice]);
        let store = store_with(json!({"voucher": {"id": "V", "expiration_date": "2027-01-01"}}));

        render_store(&surface, &store);
        assert!(surface.get(Region::Voucher).is_visible());
    }

    #[test]
    fn scan_notice_is_rendered_as_critical_banner() {
        let surface = FakeSurface::default();
        let store = SessionStore::new();
        store.set_scan_notice(Some(Message::new("No camera available", Severity::Critical)));

        render_store(&surface, &store);

        let notice = surface.get(Region::ScanNotice);
        assert!(notice.is_visible());
        assert_eq!(notice.text(), "No camera available");
        assert_eq!(notice.severity_classes(), vec!["severity-3".to_string()]);
    }

    #[test]
    fn history_dialog_lists_entries_in_order() {
        let surface = FakeSurface::default();
        let store = store_with(json!({"voucher": {"id": "V", "history": ["created", "redeemed"]}}));
        surface.get(Region::DialogContent).append_text_block("stale").unwrap();

        show_history(&surface, &store).unwrap();

        assert_eq!(surface.get(Region::DialogTitle).text(), "History");
        assert_eq!(surface.get(Region::DialogContent).blocks(), vec!["created", "redeemed"]);
        assert!(surface.get(Region::Dialog).is_open());

        close_dialog(&surface).unwrap();
        assert!(!surface.get(Region::Dialog).is_open());
    }

    #[test]
    fn history_without_voucher_opens_empty_dialog() {
        let surface = FakeSurface::default();
        show_history(&surface, &SessionStore::new()).unwrap();
        assert!(surface.get(Region::DialogContent).blocks().is_empty());
        assert!(surface.get(Region::Dialog).is_open());
    }
}
