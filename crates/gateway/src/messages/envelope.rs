use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::codec::Encoding;
use crate::error::CodecError;

/// A value in transfer form, tagged for routing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: Uuid,
    /// Logical subject, see [`Subjects`](crate::transport::Subjects)
    pub subject: String,
    /// Encoding of `payload`
    pub encoding: Encoding,
    pub created_at: DateTime<Utc>,
    pub payload: Vec<u8>,
}

impl Envelope {
    /// Encode `value` and wrap it under `subject`
    pub fn seal<T: Serialize>(
        subject: impl Into<String>,
        value: &T,
        encoding: Encoding,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            encoding,
            created_at: Utc::now(),
            payload: encoding.encode(value)?,
        })
    }

    /// Decode the payload with the envelope's own encoding
    pub fn open<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        self.encoding.decode(&self.payload)
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
