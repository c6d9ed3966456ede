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

// [START storage_set_retention_policy]
use crate::policy::retention_policy_mask;
use crate::{Error, Result, bucket_name, check_bucket_id};
use google_cloud_storage::client::StorageControl;
use google_cloud_storage::model::Bucket;
use google_cloud_storage::model::bucket::RetentionPolicy;
use google_cloud_wkt::Duration;

/// Sets a retention policy of `period` seconds on the bucket.
///
/// The new policy is unlocked. The service rejects the request if the
/// bucket has a locked policy with a longer period.
pub async fn set_retention_policy(
    client: &StorageControl,
    bucket_id: &str,
    period: i64,
) -> Result<Bucket> {
    check_bucket_id(bucket_id)?;
    if period <= 0 {
        return Err(Error::InvalidPeriod(period));
    }
    let duration =
        Duration::new(period, 0).map_err(|source| Error::PeriodOutOfRange { period, source })?;
    let bucket = client
        .update_bucket()
        .set_bucket(
            Bucket::new()
                .set_name(bucket_name(bucket_id))
                .set_retention_policy(RetentionPolicy::new().set_retention_duration(duration)),
        )
        .set_update_mask(retention_policy_mask())
        .send()
        .await?;
    tracing::info!(
        bucket_id,
        period,
        metageneration = bucket.metageneration,
        "retention policy set"
    );
    Ok(bucket)
}
// [END storage_set_retention_policy]
