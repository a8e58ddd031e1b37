use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建教师表
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructors::Name).string().not_null())
                    .col(
                        ColumnDef::new(Instructors::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Instructors::Role).string().null())
                    .col(
                        ColumnDef::new(Instructors::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教学班表
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::SectionId)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::SectionCode).string().not_null())
                    .col(ColumnDef::new(Sections::Semester).string().not_null())
                    .col(ColumnDef::new(Sections::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Sections::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sections::Table, Sections::InstructorId)
                            .to(Instructors::Table, Instructors::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::SectionId).string_len(20).not_null())
                    .col(ColumnDef::new(Students::GroupNumber).integer().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::SectionId)
                            .to(Sections::Table, Sections::SectionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::DueDate).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::MaxScore).double().not_null())
                    .col(ColumnDef::new(Assignments::Requirements).text().null())
                    .col(ColumnDef::new(Assignments::Rubric).text().not_null())
                    .col(
                        ColumnDef::new(Assignments::SectionId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SectionId)
                            .to(Sections::Table, Sections::SectionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::SectionId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::GroupNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedBy)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::ProjectPath).string().null())
                    .col(ColumnDef::new(Submissions::VideoPath).string().null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::SectionId)
                            .to(Sections::Table, Sections::SectionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::SubmittedBy)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::SubmissionId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::StudentId).string_len(20).null())
                    .col(ColumnDef::new(Grades::AiComprehensionScore).double().null())
                    .col(ColumnDef::new(Grades::AiDesignScore).double().null())
                    .col(ColumnDef::new(Grades::AiImplementationScore).double().null())
                    .col(ColumnDef::new(Grades::AiFunctionalityScore).double().null())
                    .col(ColumnDef::new(Grades::AiTotalScore).double().null())
                    .col(
                        ColumnDef::new(Grades::FinalComprehensionScore)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(Grades::FinalDesignScore).double().null())
                    .col(
                        ColumnDef::new(Grades::FinalImplementationScore)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Grades::FinalFunctionalityScore)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(Grades::FinalTotalScore).double().null())
                    .col(
                        ColumnDef::new(Grades::ParticipationPercentage)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(Grades::AdjustedFinalScore).double().null())
                    .col(ColumnDef::new(Grades::Status).string().not_null())
                    .col(ColumnDef::new(Grades::ReviewedBy).big_integer().null())
                    .col(ColumnDef::new(Grades::ReviewedAt).big_integer().null())
                    .col(ColumnDef::new(Grades::InstructorNotes).text().null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::PublishedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::ReviewedBy)
                            .to(Instructors::Table, Instructors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建反馈表
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::GradeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Feedback::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Feedback::ComprehensionComments).text().null())
                    .col(ColumnDef::new(Feedback::DesignComments).text().null())
                    .col(
                        ColumnDef::new(Feedback::ImplementationComments)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(Feedback::FunctionalityComments).text().null())
                    .col(ColumnDef::new(Feedback::GeneralComments).text().null())
                    .col(
                        ColumnDef::new(Feedback::GeneratedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedback::Table, Feedback::GradeId)
                            .to(Grades::Table, Grades::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedback::Table, Feedback::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建查重结果表
        manager
            .create_table(
                Table::create()
                    .table(PlagiarismDetections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlagiarismDetections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::SubmissionId1)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::SubmissionId2)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::SimilarityScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::SemanticSimilarity)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::StructuralSimilarity)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::ReviewedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismDetections::DetectedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                PlagiarismDetections::Table,
                                PlagiarismDetections::AssignmentId,
                            )
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                PlagiarismDetections::Table,
                                PlagiarismDetections::SubmissionId1,
                            )
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                PlagiarismDetections::Table,
                                PlagiarismDetections::SubmissionId2,
                            )
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                PlagiarismDetections::Table,
                                PlagiarismDetections::ReviewedBy,
                            )
                            .to(Instructors::Table, Instructors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组参与度表
        manager
            .create_table(
                Table::create()
                    .table(TeamParticipation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamParticipation::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeamParticipation::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamParticipation::StudentId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamParticipation::ParticipationPercentage)
                            .double()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamParticipation::Table, TeamParticipation::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamParticipation::Table, TeamParticipation::StudentId)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 提交表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_assignment_id")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_status")
                    .table(Submissions::Table)
                    .col(Submissions::Status)
                    .to_owned(),
            )
            .await?;

        // 评分表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_submission_id")
                    .table(Grades::Table)
                    .col(Grades::SubmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feedback_grade_id")
                    .table(Feedback::Table)
                    .col(Feedback::GradeId)
                    .to_owned(),
            )
            .await?;

        // 查重结果索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_plagiarism_assignment_id")
                    .table(PlagiarismDetections::Table)
                    .col(PlagiarismDetections::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_plagiarism_pair")
                    .table(PlagiarismDetections::Table)
                    .col(PlagiarismDetections::SubmissionId1)
                    .col(PlagiarismDetections::SubmissionId2)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(TeamParticipation::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PlagiarismDetections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Instructors {
    #[sea_orm(iden = "instructors")]
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sections {
    #[sea_orm(iden = "sections")]
    Table,
    SectionId,
    SectionCode,
    Semester,
    Year,
    InstructorId,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    StudentId,
    FirstName,
    LastName,
    Email,
    SectionId,
    GroupNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    Title,
    Description,
    DueDate,
    MaxScore,
    Requirements,
    Rubric,
    SectionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    SectionId,
    GroupNumber,
    SubmittedBy,
    ProjectPath,
    VideoPath,
    Status,
    SubmittedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    SubmissionId,
    StudentId,
    AiComprehensionScore,
    AiDesignScore,
    AiImplementationScore,
    AiFunctionalityScore,
    AiTotalScore,
    FinalComprehensionScore,
    FinalDesignScore,
    FinalImplementationScore,
    FinalFunctionalityScore,
    FinalTotalScore,
    ParticipationPercentage,
    AdjustedFinalScore,
    Status,
    ReviewedBy,
    ReviewedAt,
    InstructorNotes,
    CreatedAt,
    PublishedAt,
}

#[derive(DeriveIden)]
enum Feedback {
    #[sea_orm(iden = "feedback")]
    Table,
    Id,
    GradeId,
    SubmissionId,
    ComprehensionComments,
    DesignComments,
    ImplementationComments,
    FunctionalityComments,
    GeneralComments,
    GeneratedAt,
}

#[derive(DeriveIden)]
enum PlagiarismDetections {
    #[sea_orm(iden = "plagiarism_detections")]
    Table,
    Id,
    AssignmentId,
    #[sea_orm(iden = "submission_id_1")]
    SubmissionId1,
    #[sea_orm(iden = "submission_id_2")]
    SubmissionId2,
    SimilarityScore,
    SemanticSimilarity,
    StructuralSimilarity,
    Status,
    ReviewedBy,
    DetectedAt,
}

#[derive(DeriveIden)]
enum TeamParticipation {
    #[sea_orm(iden = "team_participation")]
    Table,
    Id,
    SubmissionId,
    StudentId,
    ParticipationPercentage,
}
