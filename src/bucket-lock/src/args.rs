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

//! Command-line arguments for the `bucket-lock` program.

use crate::{
    PolicySummary, Result, get_retention_policy, lock_retention_policy, remove_retention_policy,
    set_retention_policy,
};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use google_cloud_storage::client::StorageControl;

const EPILOGUE: &str = "For more information, see https://cloud.google.com/storage/docs";

const SET_EXAMPLE: &str = concat!(
    "Example:\n",
    "  bucket-lock set-retention-policy my-bucket 5\n",
    "      Defines a retention policy of 5 seconds on \"my-bucket\"."
);

/// Manages the retention policy of Cloud Storage buckets.
#[derive(Clone, Debug, Parser)]
#[command(version, after_help = EPILOGUE, arg_required_else_help = true)]
pub struct Args {
    /// Override the default Cloud Storage endpoint.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Log the requests and their results.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Creates the client used by all the commands.
    pub async fn client(&self) -> anyhow::Result<StorageControl> {
        let builder = StorageControl::builder();
        let builder = match &self.endpoint {
            Some(endpoint) => builder.with_endpoint(endpoint),
            None => builder,
        };
        Ok(builder.build().await?)
    }
}

#[derive(Clone, Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Defines a retention policy on a given bucket.
    #[command(after_help = SET_EXAMPLE)]
    SetRetentionPolicy {
        /// The bucket id, without the `gs://` prefix.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        bucket: String,
        /// The retention period, in seconds.
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        period: i64,
    },
    /// Removes an unlocked retention policy from a given bucket.
    RemoveRetentionPolicy {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        bucket: String,
    },
    /// Locks the retention policy of a given bucket. This cannot be undone.
    LockRetentionPolicy {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        bucket: String,
    },
    /// Prints the retention policy of a given bucket.
    GetRetentionPolicy {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        bucket: String,
    },
}

impl Command {
    /// Runs the command, returning the message to print on success.
    pub async fn run(self, client: &StorageControl) -> Result<String> {
        match self {
            Self::SetRetentionPolicy { bucket, period } => {
                set_retention_policy(client, &bucket, period).await?;
                Ok(format!(
                    "Bucket {bucket} retention period set for {period} seconds"
                ))
            }
            Self::RemoveRetentionPolicy { bucket } => {
                remove_retention_policy(client, &bucket).await?;
                Ok(format!("Removed bucket {bucket} retention policy"))
            }
            Self::LockRetentionPolicy { bucket } => {
                let updated = lock_retention_policy(client, &bucket).await?;
                let effective_time = updated
                    .retention_policy
                    .as_ref()
                    .and_then(|p| p.effective_time);
                let message = match effective_time {
                    Some(t) => format!(
                        "Retention policy for {bucket} is now locked\nRetention policy effective as of {}",
                        String::from(t)
                    ),
                    None => format!("Retention policy for {bucket} is now locked"),
                };
                Ok(message)
            }
            Self::GetRetentionPolicy { bucket } => {
                let metadata = get_retention_policy(client, &bucket).await?;
                let message = match PolicySummary::from_bucket(&metadata) {
                    Some(policy) => format!("Retention policy for {bucket}: {policy}"),
                    None => format!("Bucket {bucket} has no retention policy"),
                };
                Ok(message)
            }
        }
    }
}
