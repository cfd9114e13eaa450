//! Embedding model wrapper for fastembed.
//!
//! Provides a high-level interface for generating embeddings:
//! - Model download into a configurable cache directory on first use
//! - Batch embedding generation

use fastembed::{InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::Mutex;

/// Wrapper around fastembed's TextEmbedding model.
/// Uses a Mutex because fastembed's embed() requires &mut self.
pub struct EmbeddingModel {
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimensions: usize,
}

/// Error type for embedding operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("Model initialization failed: {0}")]
    InitFailed(String),

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),

    #[error("Invalid model name: {0}")]
    InvalidModel(String),
}

impl EmbeddingModel {
    /// Load `model_name` from `cache_dir/models`, downloading it on first use.
    pub fn new(
        model_name: &str,
        cache_dir: PathBuf,
        show_download_progress: bool,
    ) -> Result<Self, EmbeddingError> {
        let model_enum = Self::supports(model_name)
            .ok_or_else(|| EmbeddingError::InvalidModel(model_name.to_string()))?;

        let models_dir = cache_dir.join("models");
        std::fs::create_dir_all(&models_dir).map_err(|e| {
            EmbeddingError::InitFailed(format!("cannot create {}: {e}", models_dir.display()))
        })?;

        log::debug!("loading embedding model {model_name} from {}", models_dir.display());
        let options = InitOptions::new(model_enum)
            .with_cache_dir(models_dir)
            .with_show_download_progress(show_download_progress);

        let model = Mutex::new(
            TextEmbedding::try_new(options).map_err(|e| EmbeddingError::InitFailed(e.to_string()))?,
        );

        let mut this = Self {
            model,
            model_name: model_name.to_string(),
            dimensions: 0,
        };
        this.dimensions = this
            .embed("dimensions")
            .map_err(|e| EmbeddingError::InitFailed(e.to_string()))?
            .len();

        Ok(this)
    }

    pub fn name(&self) -> &str {
        &self.model_name
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Embed a single text.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.run(vec![text])?
            .pop()
            .ok_or_else(|| EmbeddingError::EmbeddingFailed("no embedding returned".to_string()))
    }

    /// Embed several texts in one model call, in input order.
    pub fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        self.run(texts.iter().map(String::as_str).collect())
    }

    fn run(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| EmbeddingError::EmbeddingFailed(format!("model lock poisoned: {e}")))?;

        model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::EmbeddingFailed(e.to_string()))
    }

    /// Map a model name to the fastembed model, if supported.
    pub fn supports(name: &str) -> Option<fastembed::EmbeddingModel> {
        use fastembed::EmbeddingModel as Fe;

        let model = match name.to_lowercase().replace(['-', '.'], "").as_str() {
            "allminilml6v2" => Fe::AllMiniLML6V2,
            "allminilml6v2q" => Fe::AllMiniLML6V2Q,
            "bgesmallenv15" => Fe::BGESmallENV15,
            "bgesmallenv15q" => Fe::BGESmallENV15Q,
            "bgebaseenv15" => Fe::BGEBaseENV15,
            "bgebaseenv15q" => Fe::BGEBaseENV15Q,
            _ => return None,
        };
        Some(model)
    }
}
