//! Cross-posting to external CMS platforms.
//!
//! Each platform implements [`Publisher`]; the dispatcher walks the list and
//! collects one outcome per platform. Platforms are independent, so a failed
//! publish never affects the others. The concrete HTTP clients plug in
//! behind the trait and are out of scope here.

mod platform;

pub use platform::PlatformKind;

use crate::errors::CoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The portable shape of a post handed to publishers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// What a platform reports back for a successful publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub external_id: String,
    pub external_url: String,
}

/// One result row per platform, in dispatch order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishOutcome {
    pub platform: String,
    pub success: bool,
    pub external_url: Option<String>,
    pub error: Option<String>,
}

/// The capability "publish(post) -> result", one implementation per platform.
#[async_trait]
pub trait Publisher: Send + Sync {
    fn platform(&self) -> &str;

    async fn publish(&self, post: &Post) -> Result<PublishReceipt, CoreError>;
}

/// Publishes `post` to every target in order, collecting per-platform
/// outcomes. Failures are isolated: an error becomes a failed outcome row
/// and the loop continues.
pub async fn dispatch(post: &Post, publishers: &[Box<dyn Publisher>]) -> Vec<PublishOutcome> {
    let mut results = Vec::with_capacity(publishers.len());
    for publisher in publishers {
        let platform = publisher.platform().to_string();
        match publisher.publish(post).await {
            Ok(receipt) => {
                log::info!("cross-posted {} to {platform} at {}", post.id, receipt.external_url);
                results.push(PublishOutcome {
                    platform,
                    success: true,
                    external_url: Some(receipt.external_url),
                    error: None,
                });
            }
            Err(e) => {
                log::error!("cross-posting {} to {platform} failed: {e}", post.id);
                results.push(PublishOutcome {
                    platform,
                    success: false,
                    external_url: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }
    results
}
