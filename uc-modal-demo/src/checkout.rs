//! The demo page: a pay button, a status line and one `uc-modal`.

use uc_modal::{ModalHandle, CANCEL};
use ucdom::{
    Color, CustomElementRegistry, Declarations, Document, DomError, Edges, Key, Modifiers, NodeId,
    Selector, Size, Stylesheet, CLICK,
};

const IDLE: &str = "Nothing purchased yet.";
const PENDING: &str = "Waiting for confirmation...";
const CANCELLED: &str = "Payment cancelled.";
const CONFIRMED: &str = "Payment confirmed. Thank you!";
const CLOSED: &str = "Dialog closed, nothing charged.";

/// What the main loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Checkout {
    pub page: NodeId,
    pub pay_button: NodeId,
    pub status: NodeId,
    pub modal: ModalHandle,
}

impl Checkout {
    /// Build the page into a fresh document using every registered element.
    pub fn build() -> Result<(Document, Self), DomError> {
        let mut doc = Document::with_registry(CustomElementRegistry::with_registered()?);
        let root = doc.root();
        doc.set_stylesheet(root, page_stylesheet())?;

        let page = doc.create_element("main");
        doc.append_child(root, page)?;

        let heading = doc.create_element("h1");
        let heading_text = doc.create_text("Checkout");
        doc.append_child(heading, heading_text)?;
        doc.append_child(page, heading)?;

        let hint = doc.create_element("p");
        let hint_text = doc.create_text(
            "Click \"Pay now\" or press o to open the dialog. Esc closes it, q quits.",
        );
        doc.append_child(hint, hint_text)?;
        doc.append_child(page, hint)?;

        let pay_button = doc.create_element_with_attributes("button", [("id", "pay")]);
        let pay_label = doc.create_text("Pay now");
        doc.append_child(pay_button, pay_label)?;
        doc.append_child(page, pay_button)?;

        let status_line = doc.create_element_with_attributes("p", [("id", "status")]);
        let status = doc.create_text(IDLE);
        doc.append_child(status_line, status)?;
        doc.append_child(page, status_line)?;

        let modal = ModalHandle::create(&mut doc)?;
        doc.append_child(page, modal.host())?;
        modal.set_title(&mut doc, "Confirm purchase")?;
        let body = doc.create_element("p");
        let body_text = doc.create_text("Charge $42.00 to the card ending in 4242?");
        doc.append_child(body, body_text)?;
        modal.set_content(&mut doc, [body])?;

        let checkout = Self {
            page,
            pay_button,
            status,
            modal,
        };
        checkout.wire(&mut doc);
        Ok((doc, checkout))
    }

    fn wire(&self, doc: &mut Document) {
        let status = self.status;
        let modal = self.modal;

        doc.add_event_listener(self.pay_button, CLICK, move |doc, _| {
            modal.open(doc);
            set_status(doc, status, PENDING);
        });
        // Listening on the page shows that cancel crosses the shadow boundary.
        doc.add_event_listener(self.page, CANCEL, move |doc, event| {
            log::info!("cancel from {}", doc.describe(event.target()));
            set_status(doc, status, CANCELLED);
        });
        modal.on_confirm(doc, move |doc, _| {
            log::info!("purchase confirmed");
            set_status(doc, status, CONFIRMED);
        });
    }

    pub fn status_text<'d>(&self, doc: &'d Document) -> &'d str {
        doc.text(self.status).unwrap_or_default()
    }

    pub fn handle_key(&self, doc: &mut Document, key: Key, modifiers: Modifiers) -> Flow {
        match key {
            Key::Char('q') if modifiers.none() => return Flow::Quit,
            Key::Char('c') if modifiers.ctrl => return Flow::Quit,
            Key::Char('o') if modifiers.none() => {
                self.modal.open(doc);
                set_status(doc, self.status, PENDING);
            }
            Key::Escape if self.modal.is_open(doc) => {
                self.modal.hide(doc);
                set_status(doc, self.status, CLOSED);
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Deliver a pointer click to whatever the hit test found.
    pub fn handle_click(&self, doc: &mut Document, target: Option<NodeId>) {
        let Some(target) = target else { return };
        log::debug!("click on {}", doc.describe(target));
        if let Err(e) = doc.click(target) {
            log::warn!("click dispatch failed: {e}");
        }
    }
}

fn set_status(doc: &mut Document, status: NodeId, text: &str) {
    if let Err(e) = doc.set_text(status, text) {
        log::warn!("cannot update status: {e}");
    }
}

fn page_stylesheet() -> Stylesheet {
    Stylesheet::new()
        .rule(
            Selector::tag("main"),
            Declarations::new()
                .width(Size::Fill)
                .height(Size::Fill)
                .padding(Edges::symmetric(1, 2))
                .gap(1)
                .background(Color::oklch(0.25, 0.04, 250.0))
                .foreground(Color::oklch(0.92, 0.02, 250.0)),
        )
        .rule(
            Selector::id("pay"),
            Declarations::new()
                .width(Size::Fixed(11))
                .background(Color::oklch(0.6, 0.15, 145.0))
                .foreground(Color::black()),
        )
        .rule(
            Selector::id("status"),
            Declarations::new().foreground(Color::oklch(0.75, 0.1, 85.0)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout() -> (Document, Checkout) {
        Checkout::build().unwrap()
    }

    #[test]
    fn test_pay_button_opens_modal() {
        let (mut doc, checkout) = checkout();
        assert!(!checkout.modal.is_open(&doc));
        assert_eq!(checkout.status_text(&doc), IDLE);

        checkout.handle_click(&mut doc, Some(checkout.pay_button));
        assert!(checkout.modal.is_open(&doc));
        assert_eq!(checkout.status_text(&doc), PENDING);
    }

    #[test]
    fn test_backdrop_click_reports_cancel_on_page() {
        let (mut doc, checkout) = checkout();
        checkout.modal.open(&mut doc);

        let backdrop = checkout.modal.backdrop(&doc);
        checkout.handle_click(&mut doc, backdrop);
        assert!(!checkout.modal.is_open(&doc));
        assert_eq!(checkout.status_text(&doc), CANCELLED);
    }

    #[test]
    fn test_confirm_reports_on_host() {
        let (mut doc, checkout) = checkout();
        checkout.modal.open(&mut doc);

        let confirm = checkout.modal.confirm_button(&doc);
        checkout.handle_click(&mut doc, confirm);
        assert!(!checkout.modal.is_open(&doc));
        assert_eq!(checkout.status_text(&doc), CONFIRMED);
    }

    #[test]
    fn test_keys() {
        let (mut doc, checkout) = checkout();
        let none = Modifiers::default();

        assert_eq!(checkout.handle_key(&mut doc, Key::Char('o'), none), Flow::Continue);
        assert!(checkout.modal.is_open(&doc));

        assert_eq!(checkout.handle_key(&mut doc, Key::Escape, none), Flow::Continue);
        assert!(!checkout.modal.is_open(&doc));
        assert_eq!(checkout.status_text(&doc), CLOSED);

        // Escape with nothing open leaves the last outcome alone.
        checkout.handle_click(&mut doc, Some(checkout.pay_button));
        let confirm = checkout.modal.confirm_button(&doc);
        checkout.handle_click(&mut doc, confirm);
        checkout.handle_key(&mut doc, Key::Escape, none);
        assert_eq!(checkout.status_text(&doc), CONFIRMED);

        assert_eq!(checkout.handle_key(&mut doc, Key::Char('q'), none), Flow::Quit);
    }

    #[test]
    fn test_missing_target_is_ignored() {
        let (mut doc, checkout) = checkout();
        checkout.handle_click(&mut doc, None);
        assert_eq!(checkout.status_text(&doc), IDLE);
    }
}
