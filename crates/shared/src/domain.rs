use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiException, ErrorCode};

/// Cake size categories offered by the storefront, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CakeSize {
    #[serde(rename = "small_1_layer")]
    Small1Layer,
    #[serde(rename = "big_1_layer")]
    Big1Layer,
    MultiLayer,
}

impl CakeSize {
    pub const ALL: [CakeSize; 3] = [
        CakeSize::Small1Layer,
        CakeSize::Big1Layer,
        CakeSize::MultiLayer,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CakeSize::Small1Layer => "small_1_layer",
            CakeSize::Big1Layer => "big_1_layer",
            CakeSize::MultiLayer => "multi_layer",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CakeSize::Small1Layer => "Small • 1 layer",
            CakeSize::Big1Layer => "Big • 1 layer",
            CakeSize::MultiLayer => "2+ layers",
        }
    }
}

impl fmt::Display for CakeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CakeSize {
    type Err = ApiException;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CakeSize::ALL
            .into_iter()
            .find(|size| size.key() == value.trim())
            .ok_or_else(|| {
                ApiException::new(
                    ErrorCode::Validation,
                    format!("unknown cake size '{value}'"),
                )
            })
    }
}

/// Opaque order identifier handed back by the order service.
///
/// The service may encode it as a JSON string or number; both normalise to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Ok(OrderId(text)),
            RawId::Number(number) => Ok(OrderId(number.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
