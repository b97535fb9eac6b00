//! Curated model catalog.
//!
//! A fixed table mapping friendly model ids to concrete Ollama tags with
//! use-case metadata, used by the model selector. Installed models are
//! queried live from the provider; this table only adds display metadata
//! and recommendations.

use serde::{Deserialize, Serialize};

/// Broad use-case bucket of a curated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Coding,
    General,
    Automation,
    Documentation,
}

/// Which interface languages a model handles well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCoverage {
    It,
    En,
    Both,
}

/// One entry of the curated catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Friendly identifier used in configuration and the UI
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    pub category: ModelCategory,
    pub languages: LanguageCoverage,
    /// Concrete Ollama model tag
    pub ollama_name: &'static str,
    /// Approximate download size
    pub size: &'static str,
    /// Shown first in selectors
    pub recommended: bool,
}

/// The curated catalog, recommended entries first.
pub const CURATED_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "magicoder",
        name: "Magicoder",
        description: "Fast and efficient code generation model optimized for programming tasks",
        category: ModelCategory::Coding,
        languages: LanguageCoverage::Both,
        ollama_name: "magicoder:7b-s-cl",
        size: "3.8GB",
        recommended: true,
    },
    ModelInfo {
        id: "deepseek-coder",
        name: "DeepSeek Coder",
        description: "Advanced coding model with excellent PLC and automation expertise",
        category: ModelCategory::Automation,
        languages: LanguageCoverage::Both,
        ollama_name: "deepseek-coder:6.7b",
        size: "3.8GB",
        recommended: true,
    },
    ModelInfo {
        id: "codellama",
        name: "Code Llama",
        description: "Meta's specialized coding model with strong reasoning capabilities",
        category: ModelCategory::Coding,
        languages: LanguageCoverage::En,
        ollama_name: "codellama:13b-instruct",
        size: "7.4GB",
        recommended: false,
    },
    ModelInfo {
        id: "llama2-chat",
        name: "Llama 2 Chat",
        description: "General purpose conversational model for questions and explanations",
        category: ModelCategory::General,
        languages: LanguageCoverage::Both,
        ollama_name: "llama2:13b-chat",
        size: "7.4GB",
        recommended: false,
    },
    ModelInfo {
        id: "mistral-docs",
        name: "Mistral",
        description: "Compact model suited to documentation generation and technical writing",
        category: ModelCategory::Documentation,
        languages: LanguageCoverage::Both,
        ollama_name: "mistral:7b-instruct",
        size: "4.1GB",
        recommended: false,
    },
];

/// Looks up a catalog entry by friendly id or by concrete Ollama tag.
pub fn resolve(id: &str) -> Option<&'static ModelInfo> {
    CURATED_MODELS
        .iter()
        .find(|m| m.id == id || m.ollama_name == id)
}

/// Recommended entries, in catalog order.
pub fn recommended() -> impl Iterator<Item = &'static ModelInfo> {
    CURATED_MODELS.iter().filter(|m| m.recommended)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_id_and_tag() {
        assert_eq!(resolve("magicoder").unwrap().ollama_name, "magicoder:7b-s-cl");
        assert_eq!(resolve("deepseek-coder:6.7b").unwrap().id, "deepseek-coder");
        assert!(resolve("gpt-4").is_none());
    }

    #[test]
    fn test_recommended_come_first() {
        let first_non_recommended = CURATED_MODELS.iter().position(|m| !m.recommended);
        let last_recommended = CURATED_MODELS.iter().rposition(|m| m.recommended);
        if let (Some(first_nr), Some(last_r)) = (first_non_recommended, last_recommended) {
            assert!(last_r < first_nr);
        }
        assert!(recommended().count() >= 1);
    }
}
