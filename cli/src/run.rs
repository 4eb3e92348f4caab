//! The single walk sequence: resolve the endpoint, walk, report.

use std::io::{self, Write};
use std::ops::ControlFlow;

use anyhow::{bail, Context};
use remotewalk_core::config::WalkConfig;
use remotewalk_core::files::local::LocalLister;
use remotewalk_core::globus::{AccessTokenAuthorizer, TransferClient};
use remotewalk_core::walker::{walk, WalkSummary};
use tracing::info;

use crate::args::Args;

/// Writes one path per line and stops the walk at the first write failure.
pub struct PathWriter<W: Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> PathWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    pub fn emit(&mut self, path: &str) -> ControlFlow<()> {
        if self.error.is_some() {
            return ControlFlow::Break(());
        }
        match writeln!(self.inner, "{path}") {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Resolve the endpoint named by the arguments or config, then walk it,
/// writing every file path to `out`.
pub async fn run<W: Write>(
    args: &Args,
    config: &WalkConfig,
    out: W,
) -> anyhow::Result<WalkSummary> {
    let options = config.walk_options();
    let mut writer = PathWriter::new(out);

    let summary = if let Some(dir) = &args.local {
        let root = dir.to_string_lossy();
        info!("Walking local directory {}", root);
        walk(&LocalLister::new(), &root, &options, |p| writer.emit(p)).await?
    } else {
        let token = args
            .token
            .as_deref()
            .context("No access token: pass --token or set GLOBUS_TRANSFER_TOKEN")?;
        let client = TransferClient::new(&config.base_url, AccessTokenAuthorizer::new(token))?;

        let endpoint_id = match (&args.endpoint_id, &config.endpoint_name) {
            (Some(id), _) => id.clone(),
            (None, Some(name)) => client.find_endpoint(name, config.search_limit).await?.id,
            (None, None) => bail!(
                "No endpoint: pass --endpoint or --endpoint-id, or set endpointName in the config file"
            ),
        };

        let lister = client.endpoint(endpoint_id);
        info!(
            "Walking {} on endpoint {}",
            config.root_path,
            lister.endpoint_id()
        );
        walk(&lister, &config.root_path, &options, |p| writer.emit(p)).await?
    };

    writer.finish().context("Failed to write file list")?;
    Ok(summary)
}
