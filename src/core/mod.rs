pub mod etl;
pub mod pipeline;
pub mod remap;

pub use crate::domain::model::{Document, RemapSummary, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
