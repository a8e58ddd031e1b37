//! 存储层测试数据

use super::SeaOrmStorage;
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    instructors::{entities::Instructor, requests::CreateInstructorRequest},
    sections::{entities::Section, requests::CreateSectionRequest},
    students::{entities::Student, requests::CreateStudentRequest},
    submissions::{entities::Submission, requests::NewSubmission},
};
use crate::storage::Storage;

pub async fn instructor(storage: &SeaOrmStorage) -> Instructor {
    storage
        .create_instructor(CreateInstructorRequest {
            name: "Prof. Test".to_string(),
            email: "prof@uni.edu".to_string(),
            role: None,
        })
        .await
        .unwrap()
}

/// 教师 + 教学班 SEC001
pub async fn section(storage: &SeaOrmStorage) -> Section {
    let instructor = instructor(storage).await;
    storage
        .create_section(CreateSectionRequest {
            section_id: "SEC001".to_string(),
            section_code: "POO-01".to_string(),
            semester: "2025-1".to_string(),
            year: 2025,
            instructor_id: instructor.id,
        })
        .await
        .unwrap()
}

pub async fn add_student(storage: &SeaOrmStorage, student_id: &str, group: i32) -> Student {
    storage
        .create_student(CreateStudentRequest {
            student_id: student_id.to_string(),
            first_name: "Student".to_string(),
            last_name: student_id.to_string(),
            email: format!("{}@uni.edu", student_id.to_lowercase()),
            section_id: "SEC001".to_string(),
            group_number: group,
        })
        .await
        .unwrap()
}

/// 教学班 + 学生 EST001 + 一个使用默认细则的作业
pub async fn assignment(storage: &SeaOrmStorage) -> Assignment {
    section(storage).await;
    add_student(storage, "EST001", 1).await;
    storage
        .create_assignment(CreateAssignmentRequest {
            title: "Bank account".to_string(),
            description: Some("Model a bank account".to_string()),
            due_date: chrono::Utc::now(),
            max_score: None,
            requirements: Some("Deposit and withdraw".to_string()),
            rubric: None,
            section_id: "SEC001".to_string(),
        })
        .await
        .unwrap()
}

pub async fn submission(
    storage: &SeaOrmStorage,
    assignment_id: i64,
    submitted_by: &str,
) -> Submission {
    storage
        .create_submission(NewSubmission {
            assignment_id,
            section_id: "SEC001".to_string(),
            group_number: 1,
            submitted_by: submitted_by.to_string(),
        })
        .await
        .unwrap()
}
