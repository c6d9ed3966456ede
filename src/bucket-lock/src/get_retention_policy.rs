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

// [START storage_get_retention_policy]
use crate::{Result, bucket_name, check_bucket_id};
use google_cloud_storage::client::StorageControl;
use google_cloud_storage::model::Bucket;

/// Fetches the bucket metadata, including its retention policy.
pub async fn get_retention_policy(client: &StorageControl, bucket_id: &str) -> Result<Bucket> {
    check_bucket_id(bucket_id)?;
    let bucket = client
        .get_bucket()
        .set_name(bucket_name(bucket_id))
        .send()
        .await?;
    tracing::info!(
        bucket_id,
        metageneration = bucket.metageneration,
        "retention policy {:?}",
        bucket.retention_policy
    );
    Ok(bucket)
}
// [END storage_get_retention_policy]
