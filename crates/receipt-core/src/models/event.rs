//! Upload trigger events.

use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Reference to a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Bucket (storage container) name.
    pub bucket: String,
    /// Object key within the bucket.
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Lower-cased extension of the key, without the dot.
    ///
    /// Keys without a dot in their final path segment have no extension.
    pub fn extension(&self) -> Option<String> {
        let name = self.key.rsplit('/').next().unwrap_or(&self.key);
        name.rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// One object-created notification for a single upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEvent {
    pub object: ObjectRef,
}

impl UploadEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            object: ObjectRef::new(bucket, key),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.object.bucket
    }

    pub fn key(&self) -> &str {
        &self.object.key
    }

    /// Decode every record of an object-created notification document.
    ///
    /// Keys are URL-decoded (`+` is a space) the way storage notifications
    /// encode them.
    pub fn from_notification(json: &str) -> Result<Vec<Self>, EventError> {
        let notification: Notification =
            serde_json::from_str(json).map_err(|e| EventError::Parse(e.to_string()))?;

        if notification.records.is_empty() {
            return Err(EventError::NoRecords);
        }

        notification
            .records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let s3 = record.s3.ok_or(EventError::MissingField { index, field: "s3" })?;
                let bucket = s3
                    .bucket
                    .and_then(|b| b.name)
                    .filter(|n| !n.is_empty())
                    .ok_or(EventError::MissingField { index, field: "bucket.name" })?;
                let raw_key = s3
                    .object
                    .and_then(|o| o.key)
                    .filter(|k| !k.is_empty())
                    .ok_or(EventError::MissingField { index, field: "object.key" })?;

                Ok(Self::new(bucket, decode_key(&raw_key)))
            })
            .collect()
    }
}

fn decode_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[derive(Deserialize)]
struct Notification {
    #[serde(rename = "Records", default)]
    records: Vec<NotificationRecord>,
}

#[derive(Deserialize)]
struct NotificationRecord {
    s3: Option<S3Entity>,
}

#[derive(Deserialize)]
struct S3Entity {
    bucket: Option<BucketEntity>,
    object: Option<ObjectEntity>,
}

#[derive(Deserialize)]
struct BucketEntity {
    name: Option<String>,
}

#[derive(Deserialize)]
struct ObjectEntity {
    key: Option<String>,
}
