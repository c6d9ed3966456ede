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

use google_cloud_gax::error::rpc::{Code, Status};
use google_cloud_wkt::DurationError;

/// The result type for the retention policy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors reported by the retention policy operations.
///
/// Errors are reported once. None of the operations retry, the caller
/// decides what to do with a failed request.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The bucket name was empty.
    #[error("the bucket name cannot be empty")]
    EmptyBucketName,

    /// The retention period was zero or negative.
    #[error("the retention period must be a positive number of seconds, got {0}")]
    InvalidPeriod(i64),

    /// The retention period cannot be represented as a `google.protobuf.Duration`.
    #[error("the retention period ({period} seconds) is out of range")]
    PeriodOutOfRange {
        period: i64,
        #[source]
        source: DurationError,
    },

    /// The service, the transport, or the credentials reported an error.
    #[error(transparent)]
    Service(#[from] google_cloud_gax::error::Error),
}

/// Classifies [Error] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The arguments were rejected before making any request.
    Usage,
    /// The service rejected the request because the bucket is not in the
    /// expected state.
    ///
    /// For example, the metageneration changed since it was read, the
    /// policy is locked, or there is no policy to lock.
    Precondition,
    /// Any other error from the service, the transport, or the credentials.
    Service,
}

impl Error {
    /// Returns the category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyBucketName | Self::InvalidPeriod(_) | Self::PeriodOutOfRange { .. } => {
                ErrorKind::Usage
            }
            Self::Service(e) if is_precondition(e) => ErrorKind::Precondition,
            Self::Service(_) => ErrorKind::Service,
        }
    }

    /// The status returned by the service, if any.
    pub fn status(&self) -> Option<&Status> {
        match self {
            Self::Service(e) => e.status(),
            _ => None,
        }
    }
}

fn is_precondition(e: &google_cloud_gax::error::Error) -> bool {
    const PRECONDITION_FAILED: u16 = 412;
    e.status()
        .is_some_and(|s| s.code == Code::FailedPrecondition)
        || e.http_status_code() == Some(PRECONDITION_FAILED)
}
