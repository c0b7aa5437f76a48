use serde::{Deserialize, Serialize};

use crate::domain::{CakeSize, OrderId};

/// Relative path of the create-order endpoint on the order service.
pub const CREATE_CAKE_PATH: &str = "/api/cakes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCakeRequest {
    pub size: CakeSize,
    pub description: String,
    pub image_base64: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCakeResponse {
    pub id: OrderId,
}
