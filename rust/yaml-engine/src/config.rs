// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

/// Options for deserialization and serialization.
///
/// Passed as `Option<&Configuration>`; `None` means the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Replace the value of a repeated mapping key instead of failing.
    pub allow_duplicate_keys: bool,
    /// Write `---` before every document, even without directives.
    pub explicit_document_start: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_from_json() {
        let config: Configuration =
            serde_json::from_str(r#"{"allow_duplicate_keys": true}"#).unwrap();
        assert!(config.allow_duplicate_keys);
        assert!(!config.explicit_document_start);

        let config: Configuration = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Configuration::default());
    }
}
