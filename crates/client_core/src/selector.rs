//! Category picking and navigation between the picker and the order form.

use std::sync::Arc;

use shared::domain::CakeSize;
use tracing::debug;

use crate::{form::OrderForm, service::OrderService};

pub const STOREFRONT_TITLE: &str = "Divine Flavours Bakery";
pub const STOREFRONT_TAGLINE: &str = "Bespoke cakes in a pink & white dream.";

/// Fixed list of cake sizes; activating one hands it to `on_select`.
pub struct Selector<F: FnMut(CakeSize)> {
    on_select: F,
}

impl<F: FnMut(CakeSize)> Selector<F> {
    pub fn new(on_select: F) -> Self {
        Self { on_select }
    }

    pub fn options(&self) -> &'static [CakeSize] {
        &CakeSize::ALL
    }

    pub fn activate(&mut self, size: CakeSize) {
        (self.on_select)(size);
    }

    /// Activates the size whose key is `key`. Unknown keys select nothing.
    pub fn activate_key(&mut self, key: &str) -> Option<CakeSize> {
        let size = key.parse::<CakeSize>().ok()?;
        self.activate(size);
        Some(size)
    }

    /// Zero-based position in `options`. Out of range selects nothing.
    pub fn activate_index(&mut self, index: usize) -> Option<CakeSize> {
        let size = *self.options().get(index)?;
        self.activate(size);
        Some(size)
    }
}

pub enum View {
    Selecting,
    Ordering(Arc<OrderForm>),
}

/// Owns at most one draft at a time. Going back drops it.
pub struct Storefront {
    service: Arc<dyn OrderService>,
    view: View,
}

impl Storefront {
    pub fn new(service: Arc<dyn OrderService>) -> Self {
        Self {
            service,
            view: View::Selecting,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn current_form(&self) -> Option<&Arc<OrderForm>> {
        match &self.view {
            View::Ordering(form) => Some(form),
            View::Selecting => None,
        }
    }

    pub fn selector(&mut self) -> Selector<impl FnMut(CakeSize) + '_> {
        Selector::new(move |size| {
            self.open(size);
        })
    }

    /// Opens a fresh draft for `size`, discarding any draft already open.
    pub fn open(&mut self, size: CakeSize) -> Arc<OrderForm> {
        debug!(%size, "opening order form");
        let form = OrderForm::new(size, Arc::clone(&self.service));
        self.view = View::Ordering(Arc::clone(&form));
        form
    }

    /// Back to the size picker. The current draft is dropped without asking,
    /// whatever its status.
    pub fn back(&mut self) {
        if matches!(self.view, View::Ordering(_)) {
            debug!("discarding draft order");
        }
        self.view = View::Selecting;
    }
}
