//! 评测核心：代码提取、提示词、评分解析、相似度与参与度分析

pub mod archive;
pub mod participation;
pub mod pipeline;
pub mod prompt;
pub mod reference;
pub mod scoring;
pub mod similarity;

pub use pipeline::{EvaluationPipeline, PipelineSettings};
pub use reference::ReferenceSet;
