use crate::core::remap::remap_document;
use crate::core::{ConfigProvider, Document, Pipeline, Storage, TransformResult};
use crate::utils::error::{RemapError, Result};

pub struct CaptionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CaptionPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CaptionPipeline<S, C> {
    fn extract(&self) -> Result<Document> {
        let path = self.config.input_path();
        tracing::debug!("Reading metadata from: {}", path);

        let raw = self.storage.read_file(path)?;
        tracing::debug!("Read {} bytes", raw.len());

        let value: serde_json::Value =
            serde_json::from_slice(&raw).map_err(|source| RemapError::ParseError {
                path: path.to_string(),
                source,
            })?;

        Document::try_from(value)
    }

    fn transform(&self, document: Document) -> Result<TransformResult> {
        tracing::debug!("Remapping document with {} top-level keys", document.data.len());
        remap_document(document)
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        // Serialized before the output file is touched, so a failed run never
        // leaves a truncated file behind.
        let payload = if self.config.pretty_output() {
            serde_json::to_vec_pretty(&result.document)?
        } else {
            serde_json::to_vec(&result.document)?
        };

        if self.config.dry_run() {
            tracing::info!(
                "Dry run: skipping write of {} bytes to {}",
                payload.len(),
                output_path
            );
            return Ok(output_path);
        }

        tracing::debug!("Writing {} bytes to storage", payload.len());
        self.storage.write_file(&output_path, &payload)?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                RemapError::NotFoundError {
                    path: path.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                }
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        pretty: bool,
        dry_run: bool,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input_path: "videodatainfo.json".to_string(),
                output_path: "annotations.json".to_string(),
                pretty: false,
                dry_run: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn pretty_output(&self) -> bool {
            self.pretty
        }

        fn dry_run(&self) -> bool {
            self.dry_run
        }
    }

    fn sample_input() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "info": {"version": "1.0"},
            "sentences": [
                {"video_id": "video7205", "sen_id": 1, "caption": "a woman is cooking"},
                {"video_id": "video12", "sen_id": 2, "caption": "people are dancing"}
            ],
            "videos": [{"id": 12}, {"id": 7205}]
        }))
        .unwrap()
    }

    #[test]
    fn test_extract_parses_object() {
        let storage = MockStorage::with_file("videodatainfo.json", &sample_input());
        let pipeline = CaptionPipeline::new(storage, MockConfig::new());

        let document = pipeline.extract().unwrap();

        assert_eq!(document.data.len(), 3);
        assert!(document.data.contains_key("sentences"));
    }

    #[test]
    fn test_extract_missing_file_is_not_found() {
        let pipeline = CaptionPipeline::new(MockStorage::default(), MockConfig::new());

        assert!(matches!(
            pipeline.extract(),
            Err(RemapError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_extract_invalid_json_is_parse_error() {
        let storage = MockStorage::with_file("videodatainfo.json", b"{\"sentences\": [");
        let pipeline = CaptionPipeline::new(storage, MockConfig::new());

        match pipeline.extract() {
            Err(RemapError::ParseError { path, .. }) => assert_eq!(path, "videodatainfo.json"),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_transform_and_load_write_output() {
        let storage = MockStorage::with_file("videodatainfo.json", &sample_input());
        let pipeline = CaptionPipeline::new(storage.clone(), MockConfig::new());

        let document = pipeline.extract().unwrap();
        let result = pipeline.transform(document).unwrap();
        assert_eq!(result.summary.annotations, 2);
        assert_eq!(result.summary.images, Some(2));
        assert_eq!(result.summary.passthrough_keys, vec!["info"]);

        let output_path = pipeline.load(result).unwrap();
        assert_eq!(output_path, "annotations.json");

        let written = storage.get_file("annotations.json").unwrap();
        let output: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(output["annotations"][1]["image_id"], json!(12));
        assert_eq!(output["annotations"][1]["id"], json!(2));
        assert_eq!(output["images"], json!([{"id": 12}, {"id": 7205}]));
        assert_eq!(output["info"], json!({"version": "1.0"}));
        // compact by default
        assert!(!String::from_utf8(written).unwrap().contains('\n'));
    }

    #[test]
    fn test_load_pretty_output() {
        let storage = MockStorage::with_file("videodatainfo.json", &sample_input());
        let mut config = MockConfig::new();
        config.pretty = true;
        let pipeline = CaptionPipeline::new(storage.clone(), config);

        let result = pipeline.transform(pipeline.extract().unwrap()).unwrap();
        pipeline.load(result).unwrap();

        let written = String::from_utf8(storage.get_file("annotations.json").unwrap()).unwrap();
        assert!(written.contains("\n  \"annotations\""));
    }

    #[test]
    fn test_load_dry_run_writes_nothing() {
        let storage = MockStorage::with_file("videodatainfo.json", &sample_input());
        let mut config = MockConfig::new();
        config.dry_run = true;
        let pipeline = CaptionPipeline::new(storage.clone(), config);

        let result = pipeline.transform(pipeline.extract().unwrap()).unwrap();
        let output_path = pipeline.load(result).unwrap();

        assert_eq!(output_path, "annotations.json");
        assert!(storage.get_file("annotations.json").is_none());
    }
}
