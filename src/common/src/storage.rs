use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use object_store::{ObjectStore, aws::AmazonS3Builder, local::LocalFileSystem, memory::InMemory};
use url::Url;

use crate::config::StorageConfig;

/// Open the object store holding a bucket of deployment prefixes.
///
/// `target` is usually a plain S3 bucket name. `file:///path` and
/// `memory://` targets are supported for local runs and tests.
pub fn open_store(
    target: &str,
    endpoint: Option<&str>,
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>> {
    if !target.contains("://") {
        return s3_store(target, endpoint, config);
    }

    let url = Url::parse(target).with_context(|| format!("Invalid storage target '{target}'"))?;

    match url.scheme() {
        "memory" => Ok(Arc::new(InMemory::new())),
        "file" => {
            let path = url.path();
            if path.is_empty() || path == "/" {
                return Err(anyhow!(
                    "File target must specify a path: file:///path/to/deployments"
                ));
            }
            Ok(Arc::new(LocalFileSystem::new_with_prefix(path)?))
        }
        scheme => Err(anyhow!(
            "Unsupported storage scheme: {scheme}. Supported: plain S3 bucket name, file, memory"
        )),
    }
}

/// Build an S3 client for `bucket`, honoring an optional S3-compatible
/// endpoint (MinIO and friends).
fn s3_store(
    bucket: &str,
    endpoint: Option<&str>,
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>> {
    let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

    // The AWS environment wins; the configured region is a fallback
    if std::env::var("AWS_REGION").is_err() && std::env::var("AWS_DEFAULT_REGION").is_err() {
        builder = builder.with_region(config.region.clone());
    }

    let endpoint = endpoint.or(config.endpoint.as_deref());
    if let Some(endpoint) = endpoint {
        let url =
            Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL '{endpoint}'"))?;

        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(url.scheme() == "http")
            .with_virtual_hosted_style_request(false); // MinIO requires path-style URLs
    }

    Ok(Arc::new(
        builder
            .build()
            .with_context(|| format!("Failed to open S3 bucket '{bucket}'"))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_target() {
        let store = open_store("memory://", None, &StorageConfig::default()).unwrap();
        assert!(Arc::strong_count(&store) == 1);
    }

    #[test]
    fn test_file_target() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let target = format!("file://{}", temp_dir.path().to_string_lossy());

        let store = open_store(&target, None, &StorageConfig::default()).unwrap();
        assert!(Arc::strong_count(&store) == 1);
    }

    #[test]
    fn test_file_target_without_path() {
        let result = open_store("file://", None, &StorageConfig::default());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("must specify a path")
        );
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = open_store("gcs://bucket", None, &StorageConfig::default());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Unsupported storage scheme")
        );
    }

    #[test]
    fn test_plain_bucket_name() {
        let store = open_store("deployments", None, &StorageConfig::default());
        assert!(store.is_ok());
    }

    #[test]
    fn test_bucket_with_custom_endpoint() {
        let store = open_store(
            "deployments",
            Some("http://localhost:9000"),
            &StorageConfig::default(),
        );
        assert!(store.is_ok());
    }

    #[test]
    fn test_invalid_endpoint_url() {
        let result = open_store("deployments", Some("not a url"), &StorageConfig::default());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid endpoint URL")
        );
    }

    #[test]
    fn test_cli_endpoint_wins_over_config() {
        let config = StorageConfig {
            endpoint: Some("bad;;endpoint".to_string()),
            ..StorageConfig::default()
        };

        // The configured endpoint is invalid, but the CLI endpoint shadows it
        let store = open_store("deployments", Some("http://localhost:9000"), &config);
        assert!(store.is_ok());
    }
}
