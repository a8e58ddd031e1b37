//! 预导入模块

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::evaluation_logs::{
    ActiveModel as EvaluationLogActiveModel, Entity as EvaluationLogs, Model as EvaluationLogModel,
};
pub use super::feedback::{
    ActiveModel as FeedbackActiveModel, Entity as Feedback, Model as FeedbackModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::instructors::{
    ActiveModel as InstructorActiveModel, Entity as Instructors, Model as InstructorModel,
};
pub use super::plagiarism_detections::{
    ActiveModel as PlagiarismActiveModel, Entity as PlagiarismDetections,
    Model as PlagiarismModel,
};
pub use super::sections::{
    ActiveModel as SectionActiveModel, Entity as Sections, Model as SectionModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
