//! Dialog presentation service.
//!
//! The service decides what is mounted into the overlay host. The host only
//! knows it through [`DialogPresenter`], which keeps the host testable with a
//! recording stand-in.

use std::cell::RefCell;
use std::rc::Rc;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::mount::{DialogContent, MountNode};
use crate::message::AppMessage;
use crate::store::DialogStore;

/// Calls the overlay host makes into the presentation service.
pub trait DialogPresenter {
    /// Register the host's live mount node. Called on every host render.
    fn set_host(&self, node: &MountNode);

    /// Ask for the active dialog to be hidden.
    fn hide_dialog(&self);
}

struct Inner {
    host: Option<MountNode>,
    store: DialogStore,
    message_tx: UnboundedSender<AppMessage>,
}

/// Mounts dialog content into the registered host and flips the store's
/// `showing` flag.
///
/// Cloning yields another handle to the same service.
#[derive(Clone)]
pub struct DialogService {
    inner: Rc<RefCell<Inner>>,
}

impl DialogService {
    pub fn new(store: DialogStore, message_tx: UnboundedSender<AppMessage>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                host: None,
                store,
                message_tx,
            })),
        }
    }

    /// Mount `content` into the host and present it.
    ///
    /// The host is told the content was rendered only after mounting has
    /// completed, through [`AppMessage::DialogRendered`].
    pub fn show_dialog(&self, content: DialogContent) -> Result<()> {
        let inner = self.inner.borrow();
        let host = inner
            .host
            .as_ref()
            .ok_or_else(|| eyre!("dialog host has not been rendered yet"))?;

        debug!(title = ?content.title, "Mounting dialog");
        if !host.is_empty() {
            debug!("Replacing the mounted dialog");
        }
        host.mount(content);
        inner.store.set_showing(true);
        inner.message_tx.send(AppMessage::DialogRendered)?;
        Ok(())
    }

    /// Apply `f` to the mounted content. Returns `None` when nothing is mounted.
    pub fn update_content<R>(&self, f: impl FnOnce(&mut DialogContent) -> R) -> Option<R> {
        let inner = self.inner.borrow();
        inner.host.as_ref()?.with_content_mut(f)
    }
}

impl DialogPresenter for DialogService {
    fn set_host(&self, node: &MountNode) {
        let mut inner = self.inner.borrow_mut();
        if inner.host.as_ref().is_some_and(|host| host.same_node(node)) {
            return;
        }
        debug!("Dialog host registered");
        inner.host = Some(node.clone());
    }

    fn hide_dialog(&self) {
        let inner = self.inner.borrow();
        match &inner.host {
            Some(host) => {
                if host.unmount().is_some() {
                    debug!("Dialog hidden");
                }
            }
            None => warn!("Hide requested before a dialog host was registered"),
        }
        inner.store.set_showing(false);
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::dialog::element::Element;

    fn content() -> DialogContent {
        DialogContent::new(Element::group("root", [Element::button("ok", "OK")]))
    }

    #[test]
    fn test_show_requires_a_host() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let store = DialogStore::new();
        let service = DialogService::new(store.clone(), tx);

        assert!(service.show_dialog(content()).is_err());
        assert!(!store.showing());
    }

    #[test]
    fn test_show_mounts_then_signals() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let store = DialogStore::new();
        let service = DialogService::new(store.clone(), tx);
        let node = MountNode::new();
        service.set_host(&node);

        service.show_dialog(content()).unwrap();

        assert!(store.showing());
        assert!(!node.is_empty());
        assert_eq!(rx.try_recv().unwrap(), AppMessage::DialogRendered);
    }

    #[test]
    fn test_hide_unmounts_and_is_idempotent() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let store = DialogStore::new();
        let service = DialogService::new(store.clone(), tx);
        let node = MountNode::new();
        service.set_host(&node);
        service.show_dialog(content()).unwrap();

        service.hide_dialog();
        assert!(!store.showing());
        assert!(node.is_empty());

        service.hide_dialog();
        assert!(!store.showing());
    }

    #[test]
    fn test_set_host_switches_to_new_node() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let service = DialogService::new(DialogStore::new(), tx);
        let first = MountNode::new();
        let second = MountNode::new();

        service.set_host(&first);
        service.set_host(&second);
        service.show_dialog(content()).unwrap();

        assert!(first.is_empty());
        assert!(!second.is_empty());
    }

    #[test]
    fn test_update_content() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let service = DialogService::new(DialogStore::new(), tx);
        assert!(service.update_content(|_| ()).is_none());

        let node = MountNode::new();
        service.set_host(&node);
        service.show_dialog(content()).unwrap();
        service.update_content(|content| content.max_width = 30);

        assert_eq!(node.with_content(|content| content.max_width), Some(30));
    }
}
