// ============================================================================
// SESSION STORE - Contenedor propietario del Session State
// ============================================================================
// Sustituye al estado global: se pasa explícitamente a cliente, escáner y render.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{Action, Message, SessionState};
use crate::state::reactivity::ReactiveState;

#[derive(Clone)]
pub struct SessionStore {
    session: ReactiveState<Option<SessionState>>,
    /// Aviso local del escáner (no forma parte del estado del servidor)
    scan_notice: ReactiveState<Option<Message>>,
    in_flight: Rc<Cell<bool>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            session: ReactiveState::new(None),
            scan_notice: ReactiveState::new(None),
            in_flight: Rc::new(Cell::new(false)),
        }
    }

    /// Copia del estado actual (None antes del primer `start`)
    pub fn snapshot(&self) -> Option<SessionState> {
        self.session.get()
    }

    /// Reemplazo total y notificación (render)
    pub fn replace(&self, state: SessionState) {
        self.session.set(Some(state));
    }

    pub fn scan_action(&self) -> Option<Action> {
        self.session
            .with(|s| s.as_ref().and_then(|s| s.scan_action().cloned()))
    }

    pub fn button_action(&self) -> Option<Action> {
        self.session
            .with(|s| s.as_ref().and_then(|s| s.button_action().cloned()))
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.session
            .with(|s| s.as_ref().and_then(|s| s.bearer_token().map(str::to_string)))
    }

    pub fn has_voucher(&self) -> bool {
        self.session
            .with(|s| s.as_ref().map_or(false, |s| s.voucher.is_some()))
    }

    pub fn scan_notice(&self) -> Option<Message> {
        self.scan_notice.get()
    }

    /// Solo notifica si el aviso cambia
    pub fn set_scan_notice(&self, notice: Option<Message>) {
        if self.scan_notice.with(|current| *current != notice) {
            self.scan_notice.set(notice);
        }
    }

    /// Suscribirse a cambios del estado o del aviso
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback = Rc::new(callback);
        let on_session = callback.clone();
        self.session.subscribe(move || on_session());
        self.scan_notice.subscribe(move || callback());
    }

    /// Reserva el único hueco de ida y vuelta. None si ya hay una en curso.
    pub fn begin_round_trip(&self) -> Option<InFlightGuard> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(InFlightGuard {
            flag: self.in_flight.clone(),
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Libera el hueco al soltarse, sea cual sea el resultado de la petición
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Rc<Cell<bool>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
