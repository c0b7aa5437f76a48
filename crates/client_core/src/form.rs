//! One in-progress cake order, from photo selection to the service's answer.

use std::{fmt, path::Path, sync::Arc};

use shared::{
    domain::{CakeSize, OrderId},
    protocol::CreateCakeRequest,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{error::OrderError, image::read_data_uri, service::OrderService};

pub const FORM_HINT: &str = "Upload a reference photo and describe your dream cake.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftStatus {
    Editing,
    Submitting,
    Submitted { id: OrderId },
}

/// Why a `submit` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingImage,
    BlankDescription,
    InFlight,
    AlreadySubmitted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::MissingImage => "a reference photo is required",
            SkipReason::BlankDescription => "a description is required",
            SkipReason::InFlight => "the order is already being saved",
            SkipReason::AlreadySubmitted => "the order has already been placed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(OrderId),
    Skipped(SkipReason),
}

#[derive(Debug, Clone)]
pub enum FormEvent {
    ImageAcquired,
    ImageFailed(String),
    Submitting,
    Submitted(OrderId),
    SubmitFailed(String),
}

/// Draft state as last entered. `OrderForm::snapshot` hands out copies of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftOrder {
    pub category: CakeSize,
    pub image_payload: Option<String>,
    pub description: String,
    pub customer_name: Option<String>,
    pub contact: Option<String>,
    pub status: DraftStatus,
}

impl DraftOrder {
    fn new(category: CakeSize) -> Self {
        Self {
            category,
            image_payload: None,
            description: String::new(),
            customer_name: None,
            contact: None,
            status: DraftStatus::Editing,
        }
    }

    fn blocked_by(&self) -> Option<SkipReason> {
        match self.status {
            DraftStatus::Submitting => return Some(SkipReason::InFlight),
            DraftStatus::Submitted { .. } => return Some(SkipReason::AlreadySubmitted),
            DraftStatus::Editing => {}
        }
        if self.image_payload.is_none() {
            Some(SkipReason::MissingImage)
        } else if self.description.trim().is_empty() {
            Some(SkipReason::BlankDescription)
        } else {
            None
        }
    }

    fn to_request(&self, image_base64: String) -> CreateCakeRequest {
        CreateCakeRequest {
            size: self.category,
            description: self.description.clone(),
            image_base64,
            customer_name: non_empty(&self.customer_name),
            contact: non_empty(&self.contact),
        }
    }

    pub fn can_submit(&self) -> bool {
        self.blocked_by().is_none()
    }

    pub fn result_id(&self) -> Option<&OrderId> {
        match &self.status {
            DraftStatus::Submitted { id } => Some(id),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&str> {
        self.image_payload.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.status == DraftStatus::Submitting {
            "Saving..."
        } else {
            "Place order"
        }
    }

    pub fn confirmation(&self) -> Option<String> {
        self.result_id().map(|id| format!("Saved! #{id}"))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

pub struct OrderForm {
    category: CakeSize,
    service: Arc<dyn OrderService>,
    inner: Mutex<DraftOrder>,
    events: broadcast::Sender<FormEvent>,
}

impl OrderForm {
    pub fn new(category: CakeSize, service: Arc<dyn OrderService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            category,
            service,
            inner: Mutex::new(DraftOrder::new(category)),
            events,
        })
    }

    pub fn category(&self) -> CakeSize {
        self.category
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> DraftOrder {
        self.inner.lock().await.clone()
    }

    /// Reads the picked file and replaces the held image with it. `None` means
    /// the picker was dismissed. A failed read leaves the held image untouched.
    pub async fn acquire_image(&self, file: Option<&Path>) -> Result<(), OrderError> {
        let Some(path) = file else {
            return Ok(());
        };

        let payload = match read_data_uri(path).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "image acquisition failed");
                let _ = self.events.send(FormEvent::ImageFailed(err.user_message()));
                return Err(err);
            }
        };

        debug!(path = %path.display(), encoded_len = payload.len(), "image acquired");
        self.inner.lock().await.image_payload = Some(payload);
        let _ = self.events.send(FormEvent::ImageAcquired);
        Ok(())
    }

    pub async fn set_description(&self, description: impl Into<String>) {
        self.inner.lock().await.description = description.into();
    }

    pub async fn set_customer_name(&self, customer_name: impl Into<String>) {
        self.inner.lock().await.customer_name = Some(customer_name.into());
    }

    pub async fn set_contact(&self, contact: impl Into<String>) {
        self.inner.lock().await.contact = Some(contact.into());
    }

    /// Sends the draft to the order service once. Guards that fail are not
    /// errors: the call returns `Skipped` and nothing is sent.
    pub async fn submit(&self) -> Result<SubmitOutcome, OrderError> {
        let request = {
            let mut draft = self.inner.lock().await;
            if let Some(reason) = draft.blocked_by() {
                debug!(?reason, "submit skipped");
                return Ok(SubmitOutcome::Skipped(reason));
            }
            let Some(image) = draft.image_payload.clone() else {
                return Ok(SubmitOutcome::Skipped(SkipReason::MissingImage));
            };
            draft.status = DraftStatus::Submitting;
            draft.to_request(image)
        };
        let _ = self.events.send(FormEvent::Submitting);
        info!(size = %self.category, "submitting cake order");

        let result = self.service.create_order(request).await;

        let mut draft = self.inner.lock().await;
        match result {
            Ok(id) => {
                info!(size = %self.category, order_id = %id, "cake order saved");
                draft.status = DraftStatus::Submitted { id: id.clone() };
                let _ = self.events.send(FormEvent::Submitted(id.clone()));
                Ok(SubmitOutcome::Submitted(id))
            }
            Err(err) => {
                warn!(size = %self.category, error = %err, "cake order failed");
                draft.status = DraftStatus::Editing;
                let err = OrderError::from(err);
                let _ = self.events.send(FormEvent::SubmitFailed(err.user_message()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
