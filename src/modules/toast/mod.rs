//! Ephemeral toast notifications.
//!
//! [`ToastStack`] owns a bounded, newest-first set of entries and drives each
//! one through `Entrance -> Visible -> Dismissing -> Removed`. Rendering is
//! delegated to a [`PresentationAdapter`], which reports the end of every exit
//! animation through the [`ExitToken`] it was handed.
//!
//! ```ignore
//! let stack = ToastStack::new(layer.clone());
//! let dismiss = stack.show(ToastRequest::new().title("Tasks synced").variant(Variant::Success));
//! dismiss.dismiss();
//! ```

mod presentation;
mod request;
mod stack;

pub use presentation::{Announcement, Presentation, PresentationAdapter, Slot, ToastView};
pub use request::{DEFAULT_TIMEOUT, DEFAULT_TITLE, Toast, ToastRequest, Variant};
pub use stack::{BASE_Z, DismissHandle, ExitToken, MAX_VISIBLE, ToastId, ToastState, ToastStack};
