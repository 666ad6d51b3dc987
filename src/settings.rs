//! Node registry configuration.
//!
//! The registry is a `[[nodes]]` table in a config file:
//!
//! ```toml
//! [[nodes]]
//! zone = "us-east"
//! family = "storage"
//! address = "http://storage-1:9100"
//! status = "success"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use gaugeview_client::{Node, NodeRegistry};

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    nodes: Vec<Node>,
}

/// Load the node registry from a config file.
///
/// `GAUGEVIEW_*` environment variables override file settings.
pub fn load_registry(path: &Path) -> Result<NodeRegistry> {
    let settings = Config::builder()
        .add_source(File::from(path))
        .add_source(Environment::with_prefix("GAUGEVIEW"))
        .build()
        .with_context(|| format!("failed to load {}", path.display()))?;

    let file: RegistryFile = settings
        .try_deserialize()
        .with_context(|| format!("invalid node registry in {}", path.display()))?;

    Ok(NodeRegistry::from_nodes(file.nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_nodes_from_toml() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[[nodes]]
zone = "us-east"
family = "storage"
address = "http://storage-1:9100"
status = "success"

[[nodes]]
zone = "us-east"
family = "gateway"
address = "http://gateway-1:9100"
"#
        )
        .unwrap();

        let registry = load_registry(file.path()).unwrap();
        assert_eq!(registry.nodes().len(), 2);
        let node = registry.lookup_node("us-east", "storage").unwrap();
        assert_eq!(node.address, "http://storage-1:9100");
        // Status is optional in the file.
        let node = registry.lookup_node("us-east", "gateway").unwrap();
        assert_eq!(node.status, "");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_registry(Path::new("/nonexistent/gaugeview.toml")).is_err());
    }

    #[test]
    fn empty_file_yields_empty_registry() {
        let file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        let registry = load_registry(file.path()).unwrap();
        assert!(registry.nodes().is_empty());
    }
}
