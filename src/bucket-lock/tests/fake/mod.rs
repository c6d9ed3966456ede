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

//! An in-memory implementation of the bucket RPCs used by the samples.
//!
//! The fake enforces the retention policy rules the service enforces:
//! locked policies cannot be removed, unlocked, or shortened; locking
//! requires a policy and a matching metageneration; updates carrying an
//! etag require a matching etag. Every successful mutation increments the
//! metageneration and changes the etag.

use google_cloud_gax::Result;
use google_cloud_gax::error::Error;
use google_cloud_gax::error::rpc::{Code, Status};
use google_cloud_gax::options::RequestOptions;
use google_cloud_gax::response::Response;
use google_cloud_storage::model::bucket::RetentionPolicy;
use google_cloud_storage::model::{
    Bucket, CreateBucketRequest, DeleteBucketRequest, GetBucketRequest,
    LockBucketRetentionPolicyRequest, UpdateBucketRequest,
};
use google_cloud_storage::stub;
use google_cloud_wkt::Timestamp;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug, Default)]
pub struct FakeStorageControl {
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
    concurrent_writer: bool,
}

impl FakeStorageControl {
    /// Adds an empty bucket, without a retention policy.
    pub fn with_bucket(self, bucket_id: &str) -> Self {
        let name = format!("projects/_/buckets/{bucket_id}");
        let mut bucket = Bucket::new().set_name(&name);
        bucket.bucket_id = bucket_id.to_string();
        bucket.metageneration = 1;
        bucket.etag = etag(bucket.metageneration);
        self.buckets
            .lock()
            .expect("fake state is not poisoned")
            .insert(name, bucket);
        self
    }

    /// Changes the bucket metadata right after each `get_bucket` returns, as
    /// another client would.
    pub fn with_concurrent_writer(mut self) -> Self {
        self.concurrent_writer = true;
        self
    }

    /// Returns a snapshot of the bucket metadata.
    pub fn bucket(&self, bucket_id: &str) -> Option<Bucket> {
        self.buckets
            .lock()
            .expect("fake state is not poisoned")
            .get(&format!("projects/_/buckets/{bucket_id}"))
            .cloned()
    }
}

impl stub::StorageControl for FakeStorageControl {
    async fn create_bucket(
        &self,
        req: CreateBucketRequest,
        _options: RequestOptions,
    ) -> Result<Response<Bucket>> {
        let name = format!("projects/_/buckets/{}", req.bucket_id);
        let mut buckets = self.buckets.lock().expect("fake state is not poisoned");
        if buckets.contains_key(&name) {
            return Err(error(Code::AlreadyExists, "bucket already exists"));
        }
        let mut bucket = req.bucket.unwrap_or_default().set_name(&name);
        bucket.bucket_id = req.bucket_id;
        bucket.metageneration = 1;
        bucket.etag = etag(bucket.metageneration);
        buckets.insert(name, bucket.clone());
        Ok(Response::from(bucket))
    }

    async fn delete_bucket(
        &self,
        req: DeleteBucketRequest,
        _options: RequestOptions,
    ) -> Result<Response<()>> {
        let mut buckets = self.buckets.lock().expect("fake state is not poisoned");
        match buckets.remove(&req.name) {
            Some(_) => Ok(Response::from(())),
            None => Err(not_found(&req.name)),
        }
    }

    async fn get_bucket(
        &self,
        req: GetBucketRequest,
        _options: RequestOptions,
    ) -> Result<Response<Bucket>> {
        let mut buckets = self.buckets.lock().expect("fake state is not poisoned");
        let bucket = buckets
            .get_mut(&req.name)
            .ok_or_else(|| not_found(&req.name))?;
        if req
            .if_metageneration_match
            .is_some_and(|m| m != bucket.metageneration)
        {
            return Err(metageneration_mismatch());
        }
        let response = bucket.clone();
        if self.concurrent_writer {
            bucket.metageneration += 1;
            bucket.etag = etag(bucket.metageneration);
        }
        Ok(Response::from(response))
    }

    async fn update_bucket(
        &self,
        req: UpdateBucketRequest,
        _options: RequestOptions,
    ) -> Result<Response<Bucket>> {
        let update = req
            .bucket
            .ok_or_else(|| error(Code::InvalidArgument, "missing bucket in update request"))?;
        let mut buckets = self.buckets.lock().expect("fake state is not poisoned");
        let current = buckets
            .get_mut(&update.name)
            .ok_or_else(|| not_found(&update.name))?;
        if req
            .if_metageneration_match
            .is_some_and(|m| m != current.metageneration)
        {
            return Err(metageneration_mismatch());
        }
        if !update.etag.is_empty() && update.etag != current.etag {
            return Err(error(Code::FailedPrecondition, "etag does not match"));
        }
        let paths = req.update_mask.map(|m| m.paths).unwrap_or_default();
        if paths.is_empty() {
            return Err(error(Code::InvalidArgument, "empty update mask"));
        }
        for path in paths {
            match path.as_str() {
                "retention_policy" => {
                    update_retention_policy(current, update.retention_policy.clone())?
                }
                _ => {
                    return Err(error(
                        Code::InvalidArgument,
                        &format!("unsupported field in update mask: {path}"),
                    ));
                }
            }
        }
        current.metageneration += 1;
        current.etag = etag(current.metageneration);
        Ok(Response::from(current.clone()))
    }

    async fn lock_bucket_retention_policy(
        &self,
        req: LockBucketRetentionPolicyRequest,
        _options: RequestOptions,
    ) -> Result<Response<Bucket>> {
        let mut buckets = self.buckets.lock().expect("fake state is not poisoned");
        let current = buckets
            .get_mut(&req.bucket)
            .ok_or_else(|| not_found(&req.bucket))?;
        if req.if_metageneration_match != current.metageneration {
            return Err(metageneration_mismatch());
        }
        match current.retention_policy.as_mut() {
            None => {
                return Err(error(
                    Code::FailedPrecondition,
                    "the bucket has no retention policy",
                ));
            }
            Some(p) if p.is_locked => {
                return Err(error(
                    Code::FailedPrecondition,
                    "the retention policy is already locked",
                ));
            }
            Some(p) => p.is_locked = true,
        }
        current.metageneration += 1;
        current.etag = etag(current.metageneration);
        Ok(Response::from(current.clone()))
    }
}

fn update_retention_policy(current: &mut Bucket, wanted: Option<RetentionPolicy>) -> Result<()> {
    let locked_period = current
        .retention_policy
        .as_ref()
        .filter(|p| p.is_locked)
        .map(period);
    match (locked_period, wanted) {
        (Some(_), None) => Err(error(
            Code::FailedPrecondition,
            "cannot remove a locked retention policy",
        )),
        (Some(locked), Some(w)) if period(&w) < locked => Err(error(
            Code::FailedPrecondition,
            "cannot reduce the period of a locked retention policy",
        )),
        (Some(_), Some(w)) => {
            if let Some(p) = current.retention_policy.as_mut() {
                p.retention_duration = w.retention_duration;
                p.effective_time = Some(now());
            }
            Ok(())
        }
        (None, Some(w)) if period(&w) <= 0 => Err(error(
            Code::InvalidArgument,
            "the retention period must be positive",
        )),
        (None, Some(w)) => {
            let mut policy = RetentionPolicy::new();
            policy.retention_duration = w.retention_duration;
            policy.effective_time = Some(now());
            current.retention_policy = Some(policy);
            Ok(())
        }
        (None, None) => {
            current.retention_policy = None;
            Ok(())
        }
    }
}

fn period(policy: &RetentionPolicy) -> i64 {
    policy
        .retention_duration
        .as_ref()
        .map(|d| d.seconds())
        .unwrap_or_default()
}

fn etag(metageneration: i64) -> String {
    format!("CA{metageneration}=")
}

fn now() -> Timestamp {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("the clock is after the epoch");
    Timestamp::clamp(now.as_secs() as i64, 0)
}

fn error(code: Code, message: &str) -> Error {
    Error::service(Status::default().set_code(code).set_message(message))
}

fn not_found(name: &str) -> Error {
    error(Code::NotFound, &format!("{name} not found"))
}

fn metageneration_mismatch() -> Error {
    error(Code::FailedPrecondition, "metageneration does not match")
}
