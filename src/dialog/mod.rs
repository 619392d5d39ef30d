//! Modal dialog presentation: the overlay host, the content it presents and
//! the service that mounts it.

pub mod element;
pub mod focus;
pub mod host;
pub mod modal;
pub mod mount;
pub mod service;

pub use element::{Element, ElementId};
pub use host::{DialogHost, HostEvent};
pub use modal::Modal;
pub use mount::DialogContent;
pub use service::{DialogPresenter, DialogService};
