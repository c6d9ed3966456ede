// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Samples managing the retention policy of a Cloud Storage bucket.
//!
//! All the functions receive a [StorageControl] client. Create one when the
//! application starts and reuse it, or create one from a stub in tests.

pub mod args;
mod error;
mod get_retention_policy;
mod lock_retention_policy;
mod policy;
mod remove_retention_policy;
mod set_retention_policy;

pub use error::{Error, ErrorKind, Result};
pub use get_retention_policy::get_retention_policy;
pub use lock_retention_policy::lock_retention_policy;
pub use policy::PolicySummary;
pub use remove_retention_policy::remove_retention_policy;
pub use set_retention_policy::set_retention_policy;

use google_cloud_gax::error::rpc::Code;
use google_cloud_storage::client::StorageControl;
use google_cloud_storage::model::Bucket;
use rand::{Rng, distr::Distribution};

pub const BUCKET_ID_LENGTH: usize = 63;

/// Returns the full resource name for a bucket id.
pub fn bucket_name(bucket_id: &str) -> String {
    format!("projects/_/buckets/{bucket_id}")
}

pub(crate) fn check_bucket_id(bucket_id: &str) -> Result<()> {
    if bucket_id.is_empty() {
        return Err(Error::EmptyBucketName);
    }
    Ok(())
}

/// Creates a bucket in `project_id`, labeled so stale test buckets can be
/// found and removed.
pub async fn create_bucket(
    client: &StorageControl,
    project_id: &str,
    bucket_id: &str,
) -> anyhow::Result<Bucket> {
    let bucket = client
        .create_bucket()
        .set_parent("projects/_")
        .set_bucket_id(bucket_id)
        .set_bucket(
            Bucket::new()
                .set_project(format!("projects/{project_id}"))
                .set_labels([("integration-test", "true")]),
        )
        .send()
        .await?;
    tracing::info!("successfully created bucket {bucket:?}");
    Ok(bucket)
}

/// Returns true if the bucket exists.
pub async fn bucket_exists(client: &StorageControl, bucket_id: &str) -> anyhow::Result<bool> {
    match client
        .get_bucket()
        .set_name(bucket_name(bucket_id))
        .send()
        .await
    {
        Ok(_) => Ok(true),
        Err(e) if e.status().is_some_and(|s| s.code == Code::NotFound) => Ok(false),
        Err(e) if e.http_status_code() == Some(404) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Deletes a bucket created by [create_bucket].
///
/// The bucket must be empty. Buckets with a locked retention policy can be
/// deleted as long as they contain no objects.
pub async fn cleanup_bucket(client: StorageControl, name: String) -> anyhow::Result<()> {
    client.delete_bucket().set_name(&name).send().await?;
    Ok(())
}

pub fn random_bucket_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let distr = RandomChars { chars: CHARSET };
    const PREFIX: &str = "rust-sdk-testing-";
    let bucket_id: String = rand::rng()
        .sample_iter(distr)
        .take(BUCKET_ID_LENGTH - PREFIX.len())
        .map(char::from)
        .collect();
    format!("{PREFIX}{bucket_id}")
}

pub struct RandomChars {
    chars: &'static [u8],
}

impl RandomChars {
    pub fn new(chars: &'static [u8]) -> Self {
        Self { chars }
    }
}

impl Distribution<u8> for RandomChars {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let index = rng.random_range(0..self.chars.len());
        self.chars[index]
    }
}
