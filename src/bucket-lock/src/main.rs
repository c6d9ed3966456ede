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

//! A command-line tool to manage the retention policy of a Cloud Storage
//! bucket.

use anyhow::Result;
use clap::Parser;
use storage_bucket_lock::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = enable_tracing(&args);
    tracing::info!("Configuration: {args:?}");

    let client = args.client().await?;
    match args.command.run(&client).await {
        Ok(message) => println!("{message}"),
        // Operation errors are reported once, they do not change the exit code.
        Err(e) => {
            tracing::error!("{:?} error: {e:?}", e.kind());
            eprintln!("ERROR: {e}");
        }
    }
    Ok(())
}

fn enable_tracing(args: &Args) -> tracing::dispatcher::DefaultGuard {
    use tracing_subscriber::fmt::format::FmtSpan;

    let max_level = if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_max_level(max_level)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
