//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

use crate::cache::{CACHE_TTL_SECS, MAX_CACHE_SIZE};

/// Default maximum accepted upload size (5 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Default region used to build object URLs.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Errors raised while loading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),

    /// The bucket name breaks the naming rules
    #[error("Invalid bucket name '{name}': {reason}")]
    InvalidBucket { name: String, reason: &'static str },
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of images the cache can hold
    pub max_cache_size: usize,
    /// Seconds a cached image stays fresh
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Bucket holding the images
    pub bucket_name: String,
    /// Region of the bucket
    pub region: String,
    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CACHE_SIZE` - Maximum cached images (default: 100)
    /// - `CACHE_TTL` - Cache freshness window in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `S3_BUCKET_NAME` - Bucket name (required)
    /// - `AWS_REGION` - Bucket region (default: us-east-1)
    /// - `MAX_UPLOAD_BYTES` - Upload size limit (default: 5 MB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Numbers that fail to parse fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bucket_name = lookup("S3_BUCKET_NAME")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("S3_BUCKET_NAME"))?;
        validate_bucket_name(&bucket_name)?;

        Ok(Self {
            max_cache_size: parse_or(&lookup, "MAX_CACHE_SIZE", defaults.max_cache_size),
            cache_ttl: parse_or(&lookup, "CACHE_TTL", defaults.cache_ttl),
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port),
            bucket_name,
            region: lookup("AWS_REGION")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.region),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_size: MAX_CACHE_SIZE,
            cache_ttl: CACHE_TTL_SECS,
            server_port: 3000,
            bucket_name: "image-upload-bucket".to_string(),
            region: DEFAULT_REGION.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// == Bucket Name Validation ==
/// Checks a bucket name against the object store naming rules.
pub fn validate_bucket_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidBucket {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("Bucket name cannot be empty"));
    }
    if !(3..=63).contains(&name.len()) {
        return Err(invalid(
            "Bucket name must be between 3 and 63 characters long",
        ));
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid(
            "Bucket name cannot be formatted as an IP address",
        ));
    }
    if name.contains("..") {
        return Err(invalid("Bucket name cannot contain consecutive periods"));
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-';
    let edge = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !name.chars().all(allowed) || !edge(name.chars().next()) || !edge(name.chars().last()) {
        return Err(invalid("Invalid bucket name format"));
    }

    Ok(())
}
