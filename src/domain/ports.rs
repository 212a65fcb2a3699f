use crate::domain::model::{Document, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn pretty_output(&self) -> bool;
    fn dry_run(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Document>;
    fn transform(&self, document: Document) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
