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

use google_cloud_storage::model::Bucket;
use google_cloud_wkt::{FieldMask, Timestamp};

/// The field mask path for the retention policy in a bucket update.
pub(crate) const RETENTION_POLICY_PATH: &str = "retention_policy";

pub(crate) fn retention_policy_mask() -> FieldMask {
    FieldMask::default().set_paths(vec![RETENTION_POLICY_PATH.to_string()])
}

/// The retention policy attached to a bucket, as reported by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct PolicySummary {
    /// The minimum lifetime of the objects in the bucket.
    pub period_seconds: i64,
    /// Once locked, the policy cannot be removed and its period can only grow.
    pub is_locked: bool,
    /// When the policy (or its last period increase) took effect.
    pub effective_time: Option<Timestamp>,
}

impl PolicySummary {
    /// Extracts the retention policy from the bucket metadata.
    ///
    /// Returns `None` if the bucket has no retention policy.
    pub fn from_bucket(bucket: &Bucket) -> Option<Self> {
        let policy = bucket.retention_policy.as_ref()?;
        Some(Self {
            period_seconds: policy
                .retention_duration
                .as_ref()
                .map(|d| d.seconds())
                .unwrap_or_default(),
            is_locked: policy.is_locked,
            effective_time: policy.effective_time,
        })
    }
}

impl std::fmt::Display for PolicySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} seconds, locked: {}",
            self.period_seconds, self.is_locked
        )?;
        if let Some(t) = self.effective_time {
            write!(f, ", effective as of {}", String::from(t))?;
        }
        Ok(())
    }
}
