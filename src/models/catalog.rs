//! Whisper model metadata catalog.
//!
//! Static metadata for the ggml Whisper models published on HuggingFace:
//! sizes, SHA-1 checksums, and download URLs. The `.en` variants are
//! English-only and slightly faster.

/// Base URL for ggml model downloads.
const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Metadata for a Whisper model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Model identifier (e.g., "tiny", "base.en", "large-v3")
    pub name: &'static str,
    /// Model size in megabytes
    pub size_mb: u32,
    /// SHA-1 checksum for integrity verification
    pub sha1: &'static str,
    /// Whether this model supports English only
    pub english_only: bool,
}

impl ModelInfo {
    /// Download URL for this model.
    pub fn url(&self) -> String {
        format!("{MODEL_BASE_URL}/ggml-{}.bin", self.name)
    }
}

/// Catalog of available Whisper models, smallest first.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        name: "tiny",
        size_mb: 75,
        sha1: "bd577a113a864445d4c299885e0cb97d4ba92b5f",
        english_only: false,
    },
    ModelInfo {
        name: "tiny.en",
        size_mb: 75,
        sha1: "c78c86eb1a8faa21b369bcd33207cc90d64ae9df",
        english_only: true,
    },
    ModelInfo {
        name: "base",
        size_mb: 142,
        sha1: "465707469ff3a37a2b9b8d8f89f2f99de7299dac",
        english_only: false,
    },
    ModelInfo {
        name: "base.en",
        size_mb: 142,
        sha1: "137c40403d78fd54d454da0f9bd998f78703390c",
        english_only: true,
    },
    ModelInfo {
        name: "small",
        size_mb: 466,
        sha1: "55356645c2b361a969dfd0ef2c5a50d530afd8d5",
        english_only: false,
    },
    ModelInfo {
        name: "small.en",
        size_mb: 466,
        sha1: "db8a495a91d927739e50b3fc1cc4c6b8f6c2d022",
        english_only: true,
    },
    ModelInfo {
        name: "medium",
        size_mb: 1533,
        sha1: "fd9727b6e1217c2f614f9b698455c4ffd82463b4",
        english_only: false,
    },
    ModelInfo {
        name: "medium.en",
        size_mb: 1533,
        sha1: "8c30f0e44ce9560643ebd10bbe50cd20eafd3723",
        english_only: true,
    },
    ModelInfo {
        name: "large-v3",
        size_mb: 3094,
        sha1: "ad82bf6a9043ceed055076d0fd39f5f186ff8062",
        english_only: false,
    },
];

/// Resolve convenience aliases to catalog names.
pub fn resolve_name(name: &str) -> &str {
    match name {
        "large" => "large-v3",
        other => other,
    }
}

/// Find a model by name (aliases resolved).
pub fn get_model(name: &str) -> Option<&'static ModelInfo> {
    let resolved = resolve_name(name);
    MODELS.iter().find(|m| m.name == resolved)
}

/// All models in the catalog.
pub fn list_models() -> &'static [ModelInfo] {
    MODELS
}

/// The default model: `tiny`, small enough to download quickly while still
/// producing a usable lecture transcript.
pub fn default_model() -> &'static ModelInfo {
    #[allow(clippy::expect_used)]
    get_model(crate::defaults::DEFAULT_MODEL).expect("default model present in catalog")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_model_exists() {
        let model = get_model("tiny").unwrap();
        assert_eq!(model.name, "tiny");
        assert_eq!(model.size_mb, 75);
        assert!(!model.english_only);
    }

    #[test]
    fn test_get_model_not_found() {
        assert!(get_model("nonexistent").is_none());
    }

    #[test]
    fn test_large_alias_resolves() {
        let model = get_model("large").unwrap();
        assert_eq!(model.name, "large-v3");
    }

    #[test]
    fn test_default_model_is_tiny() {
        let default = default_model();
        assert_eq!(default.name, "tiny");
    }

    #[test]
    fn test_all_models_have_huggingface_urls() {
        for model in list_models() {
            let url = model.url();
            assert!(url.starts_with("https://huggingface.co"), "{url}");
            assert!(url.ends_with(&format!("ggml-{}.bin", model.name)), "{url}");
        }
    }

    #[test]
    fn test_english_models_have_en_suffix() {
        for model in list_models() {
            assert_eq!(
                model.english_only,
                model.name.ends_with(".en"),
                "Model {} english flag mismatches its name",
                model.name
            );
        }
    }

    #[test]
    fn test_all_models_carry_checksums() {
        for model in list_models() {
            assert_eq!(
                model.sha1.len(),
                40,
                "Model {} has malformed SHA-1: {}",
                model.name,
                model.sha1
            );
        }
    }

    #[test]
    fn test_model_names_are_unique() {
        let mut names: Vec<_> = list_models().iter().map(|m| m.name).collect();
        let len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), len, "Model names are not unique");
    }

    #[test]
    fn test_get_model_case_sensitive() {
        assert!(get_model("tiny").is_some());
        assert!(get_model("Tiny").is_none());
    }
}
