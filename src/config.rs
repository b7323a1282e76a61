use crate::Args;
use std::path::PathBuf;

/// Destination bucket for processed readings
pub const OUTPUT_BUCKET: &str = "garden-watermeter-readings";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_root: PathBuf,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            storage_root: args.storage_root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_output_bucket_cannot_be_overridden() {
        let result = Args::try_parse_from(["watermeter-preprocess", "--output-bucket", "other"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_default_args() {
        let config = Config::from(Args::try_parse_from(["watermeter-preprocess"]).unwrap());
        assert_eq!(config.storage_root, PathBuf::from("./buckets"));
        assert_eq!(OUTPUT_BUCKET, "garden-watermeter-readings");
    }
}
