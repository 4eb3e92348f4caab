use std::path::PathBuf;

use clap::Parser;
use remotewalk_core::config::WalkConfig;

/// List every file under a directory on a Globus endpoint.
#[derive(Debug, Clone, Parser)]
#[command(name = "remotewalk", version)]
pub struct Args {
    /// Config file (defaults to ~/.config/remotewalk/config.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Transfer API access token
    #[arg(long, env = "GLOBUS_TRANSFER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Endpoint display name to search for
    #[arg(long, conflicts_with = "endpoint_id")]
    pub endpoint: Option<String>,

    /// Endpoint id, skipping the search
    #[arg(long)]
    pub endpoint_id: Option<String>,

    /// Remote directory to walk
    #[arg(long)]
    pub root: Option<String>,

    /// Deepest directory level to list (root is 0)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Transfer API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Walk a local directory instead of a remote endpoint
    #[arg(long, value_name = "DIR", conflicts_with_all = ["endpoint", "endpoint_id"])]
    pub local: Option<PathBuf>,
}

impl Args {
    /// Overlay command-line values on top of the file configuration.
    pub fn apply_overrides(&self, mut config: WalkConfig) -> WalkConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint_name = Some(endpoint.clone());
        }
        if let Some(root) = &self.root {
            config.root_path = root.clone();
        }
        if self.max_depth.is_some() {
            config.max_depth = self.max_depth;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let args = Args::parse_from([
            "remotewalk",
            "--endpoint",
            "FRDR-Prod-2",
            "--root",
            "/~/5/published/publication_170/submitted_data/",
            "--max-depth",
            "4",
        ]);
        let file = WalkConfig {
            endpoint_name: Some("from-file".into()),
            ..WalkConfig::default()
        };

        let config = args.apply_overrides(file);
        assert_eq!(config.endpoint_name.as_deref(), Some("FRDR-Prod-2"));
        assert_eq!(
            config.root_path,
            "/~/5/published/publication_170/submitted_data/"
        );
        assert_eq!(config.max_depth, Some(4));
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let args = Args::parse_from(["remotewalk"]);
        let file = WalkConfig {
            endpoint_name: Some("from-file".into()),
            max_depth: Some(2),
            ..WalkConfig::default()
        };

        assert_eq!(args.apply_overrides(file.clone()), file);
    }

    #[test]
    fn endpoint_and_endpoint_id_conflict() {
        let result =
            Args::try_parse_from(["remotewalk", "--endpoint", "a", "--endpoint-id", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn local_conflicts_with_endpoint() {
        let result = Args::try_parse_from(["remotewalk", "--local", "/tmp", "--endpoint", "a"]);
        assert!(result.is_err());
    }
}
