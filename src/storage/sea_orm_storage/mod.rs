//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod evaluation_logs;
mod feedback;
mod grades;
mod instructors;
mod plagiarism;
mod sections;
mod students;
mod submissions;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::config::AppConfig;
use crate::errors::{CodeMentorError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 按 URL 连接数据库并执行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("Storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// 测试用内存数据库
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        Self::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory sqlite should open")
    }

    /// SQLite 专用连接（文件库启用 WAL）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CodeMentorError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000");
        }

        // 内存库只存在于单个连接中，连接不能被回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CodeMentorError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| CodeMentorError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CodeMentorError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    pub(crate) async fn ping_impl(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| CodeMentorError::database_connection(format!("数据库不可用: {e}")))?;
        Ok(())
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 教师模块
    async fn create_instructor(&self, req: CreateInstructorRequest) -> Result<Instructor> {
        self.create_instructor_impl(req).await
    }

    async fn get_instructor_by_id(&self, id: i64) -> Result<Option<Instructor>> {
        self.get_instructor_by_id_impl(id).await
    }

    async fn get_instructor_by_email(&self, email: &str) -> Result<Option<Instructor>> {
        self.get_instructor_by_email_impl(email).await
    }

    async fn list_instructors_with_pagination(
        &self,
        params: InstructorListParams,
    ) -> Result<InstructorListResponse> {
        self.list_instructors_with_pagination_impl(params).await
    }

    async fn count_instructors(&self) -> Result<u64> {
        self.count_instructors_impl().await
    }

    // 教学班模块
    async fn create_section(&self, req: CreateSectionRequest) -> Result<Section> {
        self.create_section_impl(req).await
    }

    async fn get_section_by_id(&self, section_id: &str) -> Result<Option<Section>> {
        self.get_section_by_id_impl(section_id).await
    }

    async fn list_sections_with_pagination(
        &self,
        params: SectionListParams,
    ) -> Result<SectionListResponse> {
        self.list_sections_with_pagination_impl(params).await
    }

    // 学生模块
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, student_id: &str) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn list_students_with_pagination(
        &self,
        params: StudentListParams,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(params).await
    }

    // 作业模块
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        params: AssignmentListParams,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(params).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn count_assignment_submissions(&self, assignment_id: i64) -> Result<u64> {
        self.count_assignment_submissions_impl(assignment_id).await
    }

    // 提交模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        params: SubmissionListParams,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(params).await
    }

    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
        only_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Submission>> {
        self.list_assignment_submissions_impl(assignment_id, only_ids)
            .await
    }

    async fn set_submission_paths(
        &self,
        id: i64,
        project_path: Option<String>,
        video_path: Option<String>,
    ) -> Result<Option<Submission>> {
        self.set_submission_paths_impl(id, project_path, video_path)
            .await
    }

    async fn update_submission_status(&self, id: i64, status: SubmissionStatus) -> Result<bool> {
        self.update_submission_status_impl(id, status).await
    }

    async fn remove_submission(&self, id: i64) -> Result<bool> {
        self.remove_submission_impl(id).await
    }

    // 评分模块
    async fn create_auto_grade(&self, grade: NewAutoGrade) -> Result<(Grade, Feedback)> {
        self.create_auto_grade_impl(grade).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        params: GradeListParams,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(params).await
    }

    async fn review_grade(&self, id: i64, review: ReviewGradeRequest) -> Result<Option<Grade>> {
        self.review_grade_impl(id, review).await
    }

    async fn publish_grade(&self, id: i64) -> Result<Option<Grade>> {
        self.publish_grade_impl(id).await
    }

    // 反馈模块
    async fn get_feedback_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_id_impl(id).await
    }

    async fn list_feedback(
        &self,
        grade_id: Option<i64>,
        submission_id: Option<i64>,
    ) -> Result<Vec<Feedback>> {
        self.list_feedback_impl(grade_id, submission_id).await
    }

    // 查重模块
    async fn save_detections(
        &self,
        detections: Vec<NewDetection>,
    ) -> Result<Vec<PlagiarismDetection>> {
        self.save_detections_impl(detections).await
    }

    async fn get_detection_by_id(&self, id: i64) -> Result<Option<PlagiarismDetection>> {
        self.get_detection_by_id_impl(id).await
    }

    async fn list_detections_with_pagination(
        &self,
        params: PlagiarismListParams,
    ) -> Result<PlagiarismListResponse> {
        self.list_detections_with_pagination_impl(params).await
    }

    async fn review_detection(
        &self,
        id: i64,
        status: PlagiarismStatus,
        reviewed_by: Option<i64>,
    ) -> Result<Option<PlagiarismDetection>> {
        self.review_detection_impl(id, status, reviewed_by).await
    }

    // 评测日志模块
    async fn append_evaluation_log(
        &self,
        submission_id: Option<i64>,
        step: &str,
        status: &str,
        message: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Result<EvaluationLog> {
        self.append_evaluation_log_impl(submission_id, step, status, message, details)
            .await
    }

    async fn list_submission_logs(&self, submission_id: i64) -> Result<Vec<EvaluationLog>> {
        self.list_submission_logs_impl(submission_id).await
    }

    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("codementor.db").unwrap(),
            "sqlite://codementor.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/cm").unwrap(),
            "postgres://u:p@localhost/cm"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[tokio::test]
    async fn test_in_memory_migrates_and_pings() {
        let storage = SeaOrmStorage::in_memory().await;
        storage.ping().await.unwrap();
        assert_eq!(storage.count_instructors().await.unwrap(), 0);
    }
}
