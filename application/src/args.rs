//! [`Args`] definitions.

use clap::Parser;

#[cfg(doc)]
use crate::Config;

/// GraphQL server of the pet shop administration.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Base URL of the remote store, overriding the one from [`Config`].
    #[arg(long, value_name = "URL")]
    pub store_url: Option<String>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn store_url_is_optional() {
        let args = Args::try_parse_from(["petshop"]).unwrap();
        assert_eq!(args.config, "config.toml");
        assert_eq!(args.store_url, None);

        let args = Args::try_parse_from([
            "petshop",
            "-c",
            "prod.toml",
            "--store-url",
            "http://store.local/api/",
        ])
        .unwrap();
        assert_eq!(args.config, "prod.toml");
        assert_eq!(args.store_url.as_deref(), Some("http://store.local/api/"));
    }
}
