// ============================================================================
// SURFACE - Regiones fijas de la página y acceso abstracto a sus nodos
// ============================================================================
// El render escribe contra `Surface`/`Node`; en el navegador son elementos
// web_sys, en los tests nodos en memoria.
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDialogElement};

use crate::dom::{add_class, append_child, create_element, get_element_by_id, remove_class, set_text_content};
use crate::error::KioskError;

/// Regiones de la plantilla del quiosco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Header,
    User,
    Exit,
    Voucher,
    VoucherId,
    VoucherExpiration,
    VoucherValue,
    History,
    Message,
    Detail,
    ScanNotice,
    Action,
    Dialog,
    DialogTitle,
    DialogContent,
    ScanPreview,
    CameraSelector,
}

impl Region {
    pub fn element_id(self) -> &'static str {
        match self {
            Region::Header => "header",
            Region::User => "user",
            Region::Exit => "exit",
            Region::Voucher => "voucher",
            Region::VoucherId => "voucher-id",
            Region::VoucherExpiration => "voucher-expiration",
            Region::VoucherValue => "voucher-value",
            Region::History => "history",
            Region::Message => "message",
            Region::Detail => "detail",
            Region::ScanNotice => "scan-notice",
            Region::Action => "action",
            Region::Dialog => "dialog",
            Region::DialogTitle => "dialog-title",
            Region::DialogContent => "dialog-content",
            Region::ScanPreview => "scan-preview",
            Region::CameraSelector => "camera-selector",
        }
    }
}

/// Operaciones mínimas que el render necesita sobre un nodo
pub trait Node {
    fn add_class(&self, class: &str) -> Result<(), KioskError>;
    fn remove_class(&self, class: &str) -> Result<(), KioskError>;
    fn set_text(&self, text: &str);
    /// Vacía el contenido (hijos incluidos)
    fn clear(&self);
    /// Añade un bloque de texto (`<p>`)
    fn append_text_block(&self, text: &str) -> Result<(), KioskError>;
    fn set_open(&self, open: bool) -> Result<(), KioskError>;
}

pub trait Surface {
    type Node: Node;

    /// None si la plantilla no tiene esa región
    fn node(&self, region: Region) -> Option<Self::Node>;
}

impl Node for Element {
    fn add_class(&self, class: &str) -> Result<(), KioskError> {
        add_class(self, class).map_err(KioskError::from)
    }

    fn remove_class(&self, class: &str) -> Result<(), KioskError> {
        remove_class(self, class).map_err(KioskError::from)
    }

    fn set_text(&self, text: &str) {
        set_text_content(self, text);
    }

    fn clear(&self) {
        self.set_inner_html("");
    }

    fn append_text_block(&self, text: &str) -> Result<(), KioskError> {
        let paragraph = create_element("p")?;
        set_text_content(&paragraph, text);
        append_child(self, &paragraph)?;
        Ok(())
    }

    fn set_open(&self, open: bool) -> Result<(), KioskError> {
        let dialog = self
            .dyn_ref::<HtmlDialogElement>()
            .ok_or_else(|| KioskError::Dom("Element is not a <dialog>".to_string()))?;
        dialog.set_open(open);
        Ok(())
    }
}

/// Página real: cada región se busca por id en cada acceso
#[derive(Debug, Clone, Copy, Default)]
pub struct DomSurface;

impl Surface for DomSurface {
    type Node = Element;

    fn node(&self, region: Region) -> Option<Element> {
        get_element_by_id(region.element_id())
    }
}
