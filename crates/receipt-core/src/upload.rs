//! Upload grants: scoped, size-capped, time-limited write permissions.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::config::UploadConfig;

/// One condition a grant places on the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "condition", rename_all = "kebab-case")]
pub enum UploadCondition {
    /// The object key must start with `prefix`.
    StartsWith { field: String, prefix: String },
    /// The object size must lie in `min..=max` bytes.
    ContentLengthRange { min: u64, max: u64 },
}

/// Write permission for a single object key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadGrant {
    pub bucket: String,
    pub key: String,
    pub conditions: Vec<UploadCondition>,
    pub expires_at: DateTime<Utc>,
}

impl UploadGrant {
    /// Whether an upload of `size` bytes to `key` at `at` satisfies the grant.
    pub fn permits(&self, key: &str, size: u64, at: DateTime<Utc>) -> bool {
        if key != self.key || at >= self.expires_at {
            return false;
        }
        self.conditions.iter().all(|c| match c {
            UploadCondition::StartsWith { prefix, .. } => key.starts_with(prefix.as_str()),
            UploadCondition::ContentLengthRange { min, max } => (*min..=*max).contains(&size),
        })
    }
}

/// Issues upload grants under a fixed prefix.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    bucket: String,
    key_prefix: String,
    max_object_bytes: u64,
    expires_in: Duration,
    default_extension: String,
}

impl UploadPolicy {
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone(),
            max_object_bytes: config.max_object_bytes,
            expires_in: Duration::seconds(config.expires_in_secs),
            default_extension: config.default_extension.clone(),
        }
    }

    /// Grant for a fresh key `<prefix><uuid>.<ext>`.
    ///
    /// `ext` is lower-cased and stripped of dots; `None` or an empty value
    /// uses the default extension.
    pub fn issue(&self, ext: Option<&str>, now: DateTime<Utc>) -> UploadGrant {
        let ext = ext
            .map(|e| e.replace('.', "").trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| self.default_extension.clone());
        let key = format!("{}{}.{}", self.key_prefix, Uuid::new_v4(), ext);

        info!("Issued upload grant for {}", key);

        UploadGrant {
            bucket: self.bucket.clone(),
            key,
            conditions: vec![
                UploadCondition::StartsWith {
                    field: "$key".to_string(),
                    prefix: self.key_prefix.clone(),
                },
                UploadCondition::ContentLengthRange {
                    min: 0,
                    max: self.max_object_bytes,
                },
            ],
            expires_at: now + self.expires_in,
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_config(&UploadConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key_shape() {
        let now = Utc::now();
        let grant = UploadPolicy::default().issue(Some(".JPG"), now);

        assert!(grant.key.starts_with("uploads/"));
        assert!(grant.key.ends_with(".jpg"));
        assert_eq!(grant.expires_at - now, Duration::minutes(5));

        let grant = UploadPolicy::default().issue(None, now);
        assert!(grant.key.ends_with(".bin"));
    }

    #[test]
    fn test_permits() {
        let now = Utc::now();
        let grant = UploadPolicy::default().issue(Some("png"), now);
        let key = grant.key.clone();

        assert!(grant.permits(&key, 2_000_000, now));
        assert!(grant.permits(&key, 10 * 1024 * 1024, now + Duration::seconds(299)));
        assert!(!grant.permits(&key, 10 * 1024 * 1024 + 1, now));
        assert!(!grant.permits(&key, 10, now + Duration::seconds(300)));
        assert!(!grant.permits("uploads/other.png", 10, now));
    }

    #[test]
    fn test_distinct_keys() {
        let policy = UploadPolicy::default();
        let now = Utc::now();
        assert_ne!(policy.issue(Some("jpg"), now).key, policy.issue(Some("jpg"), now).key);
    }
}
