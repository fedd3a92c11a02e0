//! S3 sink for failure screenshots.
//!
//! Implements the pipeline's [`ArtifactSink`] boundary: upload a local PNG,
//! hand back the public URL, and swallow every failure — a debug artifact
//! is never worth failing (or delaying) the error it documents.
//!
//! Credentials come from the AWS SDK's default provider chain
//! (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, profiles, or instance
//! roles); only the bucket and region are seatscan configuration.

use std::path::Path;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use seatscan_scraper::ArtifactSink;

pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3ArtifactStore {
    /// Builds a store against the given bucket and region, resolving
    /// credentials from the default provider chain.
    pub async fn new(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            region,
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[async_trait]
impl ArtifactSink for S3ArtifactStore {
    async fn store(&self, local_path: &Path) -> Option<String> {
        let key = local_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("artifact.png")
            .to_owned();

        let body = match ByteStream::from_path(local_path).await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(
                    path = %local_path.display(),
                    error = %error,
                    "could not read screenshot for upload"
                );
                return None;
            }
        };

        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(body)
            .acl(ObjectCannedAcl::PublicRead)
            .content_type("image/png")
            .send()
            .await;

        match result {
            Ok(_) => {
                let url = self.public_url(&key);
                tracing::info!(url = %url, "uploaded screenshot");
                Some(url)
            }
            Err(error) => {
                tracing::warn!(
                    bucket = %self.bucket,
                    key = %key,
                    error = %error,
                    "screenshot upload failed"
                );
                None
            }
        }
    }
}
