use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

/// Generates one fixed-dimensional vector per input text.
///
/// The production backend is a transformer model; tokenization with
/// truncation to the model maximum and attention-masked mean pooling over
/// token outputs happen inside the model runtime. Any backend returning one
/// vector per text, all of the same dimension, satisfies the pipeline.
pub trait Embedder {
    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, String>;
}

/// Normalize a vector to unit length.
///
/// Returns the original vector when the norm is zero.
pub(crate) fn normalize_embedding(vec: &[f32]) -> Vec<f32> {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        vec.to_vec()
    } else {
        vec.iter().map(|x| x / norm).collect()
    }
}

/// [`Embedder`] backed by a local fastembed model.
///
/// Uses a 768-dimensional multilingual model. Texts are embedded in one
/// batched call; output vectors are normalized to unit length, which leaves
/// cosine distances unchanged.
pub struct FastembedEmbedder {
    model: TextEmbedding,
}

impl FastembedEmbedder {
    pub fn try_new() -> Result<Self, String> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::MultilingualE5Base))
            .map_err(|error| format!("Failed to initialize embedding model: {error:?}"))?;

        Ok(Self { model })
    }
}

impl Embedder for FastembedEmbedder {
    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, String> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self
            .model
            .embed(texts.to_vec(), None)
            .map_err(|error| format!("Failed to generate embeddings: {error:?}"))?;

        Ok(embeddings
            .iter()
            .map(|embedding| normalize_embedding(embedding))
            .collect())
    }
}
