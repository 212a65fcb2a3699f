use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct RemapEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RemapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting caption remap");

        // Extract
        tracing::info!("Reading source metadata...");
        let document = self.pipeline.extract()?;
        tracing::info!("Loaded document with {} top-level keys", document.data.len());

        // Transform
        tracing::info!("Remapping sentences and videos...");
        let result = self.pipeline.transform(document)?;
        let summary = &result.summary;
        match summary.images {
            Some(images) => tracing::info!(
                "Remapped {} annotations and {} images",
                summary.annotations,
                images
            ),
            None => tracing::info!(
                "Remapped {} annotations; `videos` was not an array and was copied as-is",
                summary.annotations
            ),
        }
        if !summary.passthrough_keys.is_empty() {
            tracing::debug!("Pass-through keys: {:?}", summary.passthrough_keys);
        }

        // Load
        tracing::info!("Writing annotations...");
        let output_path = self.pipeline.load(result)?;

        Ok(output_path)
    }
}
