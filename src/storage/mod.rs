use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    evaluation::entities::EvaluationLog,
    feedback::entities::Feedback,
    grades::{
        entities::Grade,
        requests::{GradeListParams, NewAutoGrade, ReviewGradeRequest},
        responses::GradeListResponse,
    },
    instructors::{
        entities::Instructor,
        requests::{CreateInstructorRequest, InstructorListParams},
        responses::InstructorListResponse,
    },
    plagiarism::{
        entities::{PlagiarismDetection, PlagiarismStatus},
        requests::{NewDetection, PlagiarismListParams},
        responses::PlagiarismListResponse,
    },
    sections::{
        entities::Section,
        requests::{CreateSectionRequest, SectionListParams},
        responses::SectionListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams},
        responses::StudentListResponse,
    },
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{NewSubmission, SubmissionListParams},
        responses::SubmissionListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教师管理方法
    // 创建教师
    async fn create_instructor(&self, req: CreateInstructorRequest) -> Result<Instructor>;
    // 通过ID获取教师
    async fn get_instructor_by_id(&self, id: i64) -> Result<Option<Instructor>>;
    // 通过邮箱获取教师
    async fn get_instructor_by_email(&self, email: &str) -> Result<Option<Instructor>>;
    // 列出教师
    async fn list_instructors_with_pagination(
        &self,
        params: InstructorListParams,
    ) -> Result<InstructorListResponse>;
    // 教师总数
    async fn count_instructors(&self) -> Result<u64>;

    /// 教学班管理方法
    async fn create_section(&self, req: CreateSectionRequest) -> Result<Section>;
    async fn get_section_by_id(&self, section_id: &str) -> Result<Option<Section>>;
    async fn list_sections_with_pagination(
        &self,
        params: SectionListParams,
    ) -> Result<SectionListResponse>;

    /// 学生管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, student_id: &str) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        params: StudentListParams,
    ) -> Result<StudentListResponse>;

    /// 作业管理方法
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        params: AssignmentListParams,
    ) -> Result<AssignmentListResponse>;
    // 部分更新，作业不存在时返回 None
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 未删除的提交数量
    async fn count_assignment_submissions(&self, assignment_id: i64) -> Result<u64>;

    /// 提交管理方法
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        params: SubmissionListParams,
    ) -> Result<SubmissionListResponse>;
    // 作业下所有未删除的提交，可限定 ID 集合，按 ID 升序
    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
        only_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Submission>>;
    // 记录上传后的对象路径
    async fn set_submission_paths(
        &self,
        id: i64,
        project_path: Option<String>,
        video_path: Option<String>,
    ) -> Result<Option<Submission>>;
    async fn update_submission_status(&self, id: i64, status: SubmissionStatus) -> Result<bool>;
    // 物理删除，仅用于上传失败时回滚
    async fn remove_submission(&self, id: i64) -> Result<bool>;

    /// 评分管理方法
    // 原子地写入自动评分、反馈，并把提交标记为 evaluated
    async fn create_auto_grade(&self, grade: NewAutoGrade) -> Result<(Grade, Feedback)>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, params: GradeListParams)
    -> Result<GradeListResponse>;
    async fn review_grade(&self, id: i64, review: ReviewGradeRequest) -> Result<Option<Grade>>;
    async fn publish_grade(&self, id: i64) -> Result<Option<Grade>>;

    /// 反馈查询方法
    async fn get_feedback_by_id(&self, id: i64) -> Result<Option<Feedback>>;
    async fn list_feedback(
        &self,
        grade_id: Option<i64>,
        submission_id: Option<i64>,
    ) -> Result<Vec<Feedback>>;

    /// 查重结果方法
    // 同一对提交的旧结果会被替换
    async fn save_detections(&self, detections: Vec<NewDetection>)
    -> Result<Vec<PlagiarismDetection>>;
    async fn get_detection_by_id(&self, id: i64) -> Result<Option<PlagiarismDetection>>;
    async fn list_detections_with_pagination(
        &self,
        params: PlagiarismListParams,
    ) -> Result<PlagiarismListResponse>;
    async fn review_detection(
        &self,
        id: i64,
        status: PlagiarismStatus,
        reviewed_by: Option<i64>,
    ) -> Result<Option<PlagiarismDetection>>;

    /// 评测日志方法
    async fn append_evaluation_log(
        &self,
        submission_id: Option<i64>,
        step: &str,
        status: &str,
        message: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Result<EvaluationLog>;
    async fn list_submission_logs(&self, submission_id: i64) -> Result<Vec<EvaluationLog>>;

    /// 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
