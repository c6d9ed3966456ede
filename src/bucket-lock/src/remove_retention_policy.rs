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

// [START storage_remove_retention_policy]
use crate::policy::retention_policy_mask;
use crate::{Result, bucket_name, check_bucket_id};
use google_cloud_storage::client::StorageControl;
use google_cloud_storage::model::Bucket;

/// Removes the retention policy from the bucket.
///
/// Only unlocked policies can be removed, the service rejects the request
/// otherwise. The current metadata is fetched for logging, the update is
/// not conditioned on it.
pub async fn remove_retention_policy(client: &StorageControl, bucket_id: &str) -> Result<Bucket> {
    check_bucket_id(bucket_id)?;
    let current = client
        .get_bucket()
        .set_name(bucket_name(bucket_id))
        .send()
        .await?;
    tracing::info!("metadata {current:?}");
    if current
        .retention_policy
        .as_ref()
        .is_some_and(|p| p.is_locked)
    {
        tracing::warn!(bucket_id, "the retention policy is locked and cannot be removed");
    }

    let bucket = client
        .update_bucket()
        .set_bucket(Bucket::new().set_name(bucket_name(bucket_id)))
        .set_update_mask(retention_policy_mask())
        .send()
        .await?;
    tracing::info!(
        bucket_id,
        metageneration = bucket.metageneration,
        "retention policy removed"
    );
    Ok(bucket)
}
// [END storage_remove_retention_policy]
