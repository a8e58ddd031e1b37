//! SeaORM 实体定义
//!
//! 仅供存储层使用；对外统一转换为 `models` 中的业务实体。

pub mod prelude;

pub mod assignments;
pub mod evaluation_logs;
pub mod feedback;
pub mod grades;
pub mod instructors;
pub mod plagiarism_detections;
pub mod sections;
pub mod students;
pub mod submissions;
