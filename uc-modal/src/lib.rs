//! `uc-modal`: a confirmation modal custom element.
//!
//! ```ignore
//! let mut registry = CustomElementRegistry::new();
//! uc_modal::define(&mut registry)?;
//! let mut doc = Document::with_registry(registry);
//!
//! let modal = ModalHandle::create(&mut doc)?;
//! doc.append_child(doc.root(), modal.host())?;
//! modal.on_confirm(&mut doc, |_, _| log::info!("paid"));
//! modal.open(&mut doc);
//! ```

mod config;
mod modal;
mod styles;

pub use config::ModalConfig;
pub use modal::{
    define, define_with_config, Modal, ModalHandle, ModalParts, CANCEL, CONFIRM, OPENED, TAG,
    TITLE_SLOT,
};
pub use styles::stylesheet;
