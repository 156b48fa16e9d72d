use std::sync::Arc;

use crate::models::{
    PaginatedResponse,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    attendance::{
        entities::Attendance,
        requests::{CreateAttendanceRequest, UpdateAttendanceRequest},
    },
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    common::ListParams,
    exams::{
        entities::Exam,
        requests::{CreateExamRequest, UpdateExamRequest},
    },
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, UpdateLessonRequest},
    },
    messages::{entities::Message, requests::CreateMessageRequest},
    results::{
        entities::ExamResult,
        requests::{CreateResultRequest, UpdateResultRequest},
    },
    stats::responses::UserStatsResponse,
    subjects::{entities::Subject, requests::SubjectRequest},
    users::{
        entities::{Principal, User, UserRole},
        requests::{NewPerson, PersonChanges},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 数据访问接口
///
/// 带 `principal` 参数的读取方法只返回调用者可见的行；
/// 不带的方法不做范围限制，由服务层在调用前完成校验。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户与人员管理方法
    // 创建人员
    async fn create_person(&self, person: NewPerson) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 按角色分页列出可见人员
    async fn list_people(
        &self,
        principal: &Principal,
        role: UserRole,
        params: &ListParams,
    ) -> Result<PaginatedResponse<User>>;
    // 获取可见人员
    async fn get_person(
        &self,
        principal: &Principal,
        role: UserRole,
        id: i64,
    ) -> Result<Option<User>>;
    // 更新人员信息
    async fn update_person(&self, id: i64, changes: PersonChanges) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 家长名下的学生数
    async fn count_children(&self, parent_id: i64) -> Result<u64>;
    // 班级学生数
    async fn count_class_students(&self, class_id: i64) -> Result<u64>;

    /// 班级管理方法
    async fn create_class(&self, req: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn get_class(&self, principal: &Principal, id: i64) -> Result<Option<Class>>;
    async fn list_classes(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Class>>;
    async fn update_class(&self, id: i64, req: UpdateClassRequest) -> Result<Option<Class>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;

    /// 科目管理方法
    async fn create_subject(&self, req: SubjectRequest) -> Result<Subject>;
    async fn get_subject(&self, principal: &Principal, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Subject>>;
    async fn update_subject(&self, id: i64, req: SubjectRequest) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson(&self, principal: &Principal, id: i64) -> Result<Option<Lesson>>;
    async fn list_lessons(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Lesson>>;
    async fn update_lesson(&self, id: i64, req: UpdateLessonRequest) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, id: i64) -> Result<bool>;
    // 教师任课数
    async fn count_teacher_lessons(&self, teacher_id: i64) -> Result<u64>;

    /// 考试管理方法
    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam>;
    async fn get_exam(&self, principal: &Principal, id: i64) -> Result<Option<Exam>>;
    async fn list_exams(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Exam>>;
    async fn update_exam(&self, id: i64, req: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 作业管理方法
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment(&self, principal: &Principal, id: i64)
    -> Result<Option<Assignment>>;
    async fn list_assignments(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        req: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 成绩管理方法
    async fn create_result(&self, req: CreateResultRequest) -> Result<ExamResult>;
    async fn get_result(&self, principal: &Principal, id: i64) -> Result<Option<ExamResult>>;
    async fn list_results(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<ExamResult>>;
    async fn update_result(&self, id: i64, req: UpdateResultRequest)
    -> Result<Option<ExamResult>>;
    async fn delete_result(&self, id: i64) -> Result<bool>;

    /// 考勤管理方法
    async fn create_attendance(&self, req: CreateAttendanceRequest) -> Result<Attendance>;
    async fn get_attendance(&self, principal: &Principal, id: i64)
    -> Result<Option<Attendance>>;
    async fn list_attendance(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Attendance>>;
    async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    // 时间窗口内可见的考勤记录（统计用）
    async fn list_attendance_between(
        &self,
        principal: &Principal,
        class_id: Option<i64>,
        from: i64,
        to: i64,
    ) -> Result<Vec<Attendance>>;

    /// 消息方法
    async fn create_message(&self, sender_id: i64, req: CreateMessageRequest) -> Result<Message>;
    async fn get_message(&self, principal: &Principal, id: i64) -> Result<Option<Message>>;
    async fn list_messages(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Message>>;
    async fn mark_message_read(&self, id: i64) -> Result<Option<Message>>;
    async fn delete_message(&self, id: i64) -> Result<bool>;

    /// 统计方法
    async fn user_stats(&self) -> Result<UserStatsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
