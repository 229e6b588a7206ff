//! Image payload encoding for span dumps and JSON output.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Image bytes as they appear in a span dump: base64 text or a byte array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum ImagePayload {
    Base64(String),
    Bytes(Vec<u8>),
}

impl ImagePayload {
    pub(crate) fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ImagePayload::Bytes(bytes) => Ok(bytes),
            ImagePayload::Base64(text) => STANDARD
                .decode(text.trim())
                .map_err(|e| Error::MalformedBlock(format!("invalid base64 image: {}", e))),
        }
    }
}

/// Serde adapter writing bytes as base64 and reading either form.
pub(crate) mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<u8>, D::Error> {
        ImagePayload::deserialize(deserializer)?
            .into_bytes()
            .map_err(serde::de::Error::custom)
    }
}
