use log::debug;
use web_sys::window;

pub const POPUP_SEEN_KEY: &str = "popupSeen";

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `window.sessionStorage`; silently empty when storage is unavailable.
#[derive(Clone, Copy, Default)]
pub struct BrowserSession;

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        window()
            .and_then(|w| w.session_storage().ok().flatten())
            .and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = window().and_then(|w| w.session_storage().ok().flatten()) {
            let _ = storage.set_item(key, value);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    CloseButton,
    Backdrop,
    Escape,
}

/// Once-per-session state of the timed popup.
///
/// `armed` stands for the pending open timer: it starts armed unless the
/// visitor already saw the popup this session, and any close disarms it.
pub struct PopupSession<S = BrowserSession> {
    store: S,
    seen: bool,
    open: bool,
    armed: bool,
}

/// An empty stored value does not count as seen.
fn marked_seen(store: &impl SessionStore) -> bool {
    store.get(POPUP_SEEN_KEY).is_some_and(|value| !value.is_empty())
}

impl<S: SessionStore> PopupSession<S> {
    pub fn load(store: S) -> Self {
        let seen = marked_seen(&store);
        Self {
            store,
            seen,
            open: false,
            armed: !seen,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn seen(&self) -> bool {
        self.seen
    }

    /// Open timer elapsed. Returns whether the popup opened.
    pub fn fire(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        if marked_seen(&self.store) {
            self.seen = true;
            return false;
        }
        self.open = true;
        true
    }

    /// Open transition finished; only now does the popup count as seen.
    pub fn shown(&mut self) {
        if self.open {
            self.store.set(POPUP_SEEN_KEY, "true");
            self.seen = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.armed = false;
    }

    pub fn dismiss(&mut self, how: Dismissal) {
        debug!("Popup dismissed via {:?}", how);
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemorySession(Rc<RefCell<HashMap<String, String>>>);

    impl SessionStore for MemorySession {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn already_seen_never_opens() {
        let store = MemorySession::default();
        store.set(POPUP_SEEN_KEY, "true");
        let mut session = PopupSession::load(store);
        assert!(!session.is_armed());
        assert!(!session.fire());
        assert!(!session.is_open());
    }

    #[test]
    fn flag_is_written_after_the_transition_not_on_open() {
        let store = MemorySession::default();
        let mut session = PopupSession::load(store.clone());
        assert!(session.is_armed());

        assert!(session.fire());
        assert!(session.is_open());
        assert_eq!(store.get(POPUP_SEEN_KEY), None);

        session.shown();
        assert_eq!(store.get(POPUP_SEEN_KEY).as_deref(), Some("true"));
        assert!(session.seen());
    }

    #[test]
    fn early_escape_cancels_the_timer() {
        let store = MemorySession::default();
        let mut session = PopupSession::load(store.clone());
        session.dismiss(Dismissal::Escape);
        assert!(!session.fire());
        assert!(!session.is_open());
        assert_eq!(store.get(POPUP_SEEN_KEY), None);
    }

    #[test]
    fn transition_after_close_does_not_mark_seen() {
        let store = MemorySession::default();
        let mut session = PopupSession::load(store.clone());
        session.fire();
        session.dismiss(Dismissal::Backdrop);
        session.shown();
        assert_eq!(store.get(POPUP_SEEN_KEY), None);
    }

    #[test]
    fn flag_set_elsewhere_before_timer_suppresses_open() {
        let store = MemorySession::default();
        let mut session = PopupSession::load(store.clone());
        store.set(POPUP_SEEN_KEY, "true");
        assert!(!session.fire());
        assert!(session.seen());
    }

    #[test]
    fn empty_flag_does_not_suppress_the_popup() {
        let store = MemorySession::default();
        store.set(POPUP_SEEN_KEY, "");
        let mut session = PopupSession::load(store);
        assert!(session.is_armed());
        assert!(session.fire());
        assert!(session.is_open());
    }

    #[test]
    fn flag_is_never_cleared() {
        let store = MemorySession::default();
        let mut session = PopupSession::load(store.clone());
        session.fire();
        session.shown();
        session.close();
        assert_eq!(store.get(POPUP_SEEN_KEY).as_deref(), Some("true"));
    }
}
