//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendances;
mod classes;
mod exams;
mod lessons;
mod messages;
mod results;
mod stats;
mod subjects;
mod users;

use crate::config::AppConfig;
use crate::errors::{SchoolError, Result};
use crate::models::PageRequest;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect,
    Select, SqlErr, TransactionTrait,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 单连接的内存 SQLite，测试用
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(e.to_string()))?;
        Self::from_connection(db).await
    }

    /// 在同一个只读事务中读取一页数据与总数
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: &PageRequest,
    ) -> Result<(Vec<E::Model>, u64)>
    where
        E: EntityTrait,
        E::Model: Send + Sync,
    {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let total = select
            .clone()
            .count(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询总数失败: {e}")))?;

        // 越界页直接返回空列表，不再下发查询
        let offset = page.offset();
        let rows = if offset >= total {
            Vec::new()
        } else {
            select
                .limit(page.limit)
                .offset(offset)
                .all(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询列表失败: {e}")))?
        };

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((rows, total))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写操作错误转换：唯一约束与外键约束冲突视为 409
pub(crate) fn write_error(action: &str, err: DbErr) -> SchoolError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            SchoolError::conflict("Resource already exists")
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            SchoolError::conflict("Resource is still referenced by other records")
        }
        _ => SchoolError::database_operation(format!("{action}: {err}")),
    }
}

// Storage trait 实现
use crate::models::{
    ListParams, PaginatedResponse,
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_person(&self, person: NewPerson) -> Result<User> {
        self.create_person_impl(person).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_people(
        &self,
        principal: &Principal,
        role: UserRole,
        params: &ListParams,
    ) -> Result<PaginatedResponse<User>> {
        self.list_people_impl(principal, role, params).await
    }

    async fn get_person(
        &self,
        principal: &Principal,
        role: UserRole,
        id: i64,
    ) -> Result<Option<User>> {
        self.get_person_impl(principal, role, id).await
    }

    async fn update_person(&self, id: i64, changes: PersonChanges) -> Result<Option<User>> {
        self.update_person_impl(id, changes).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_children(&self, parent_id: i64) -> Result<u64> {
        self.count_children_impl(parent_id).await
    }

    async fn count_class_students(&self, class_id: i64) -> Result<u64> {
        self.count_class_students_impl(class_id).await
    }

    // 班级模块
    async fn create_class(&self, req: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(req).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn get_class(&self, principal: &Principal, id: i64) -> Result<Option<Class>> {
        self.get_class_impl(principal, id).await
    }

    async fn list_classes(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Class>> {
        self.list_classes_impl(principal, params).await
    }

    async fn update_class(&self, id: i64, req: UpdateClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, req).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, req: SubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject(&self, principal: &Principal, id: i64) -> Result<Option<Subject>> {
        self.get_subject_impl(principal, id).await
    }

    async fn list_subjects(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Subject>> {
        self.list_subjects_impl(principal, params).await
    }

    async fn update_subject(&self, id: i64, req: SubjectRequest) -> Result<Option<Subject>> {
        self.update_subject_impl(id, req).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 课程模块
    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(req).await
    }

    async fn get_lesson(&self, principal: &Principal, id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_impl(principal, id).await
    }

    async fn list_lessons(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Lesson>> {
        self.list_lessons_impl(principal, params).await
    }

    async fn update_lesson(&self, id: i64, req: UpdateLessonRequest) -> Result<Option<Lesson>> {
        self.update_lesson_impl(id, req).await
    }

    async fn delete_lesson(&self, id: i64) -> Result<bool> {
        self.delete_lesson_impl(id).await
    }

    async fn count_teacher_lessons(&self, teacher_id: i64) -> Result<u64> {
        self.count_teacher_lessons_impl(teacher_id).await
    }

    // 考试模块
    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam> {
        self.create_exam_impl(req).await
    }

    async fn get_exam(&self, principal: &Principal, id: i64) -> Result<Option<Exam>> {
        self.get_exam_impl(principal, id).await
    }

    async fn list_exams(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Exam>> {
        self.list_exams_impl(principal, params).await
    }

    async fn update_exam(&self, id: i64, req: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, req).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 作业模块
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(req).await
    }

    async fn get_assignment(&self, principal: &Principal, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(principal, id).await
    }

    async fn list_assignments(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Assignment>> {
        self.list_assignments_impl(principal, params).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        req: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, req).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 成绩模块
    async fn create_result(&self, req: CreateResultRequest) -> Result<ExamResult> {
        self.create_result_impl(req).await
    }

    async fn get_result(&self, principal: &Principal, id: i64) -> Result<Option<ExamResult>> {
        self.get_result_impl(principal, id).await
    }

    async fn list_results(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<ExamResult>> {
        self.list_results_impl(principal, params).await
    }

    async fn update_result(
        &self,
        id: i64,
        req: UpdateResultRequest,
    ) -> Result<Option<ExamResult>> {
        self.update_result_impl(id, req).await
    }

    async fn delete_result(&self, id: i64) -> Result<bool> {
        self.delete_result_impl(id).await
    }

    // 考勤模块
    async fn create_attendance(&self, req: CreateAttendanceRequest) -> Result<Attendance> {
        self.create_attendance_impl(req).await
    }

    async fn get_attendance(&self, principal: &Principal, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_impl(principal, id).await
    }

    async fn list_attendance(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Attendance>> {
        self.list_attendance_impl(principal, params).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(id, req).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn list_attendance_between(
        &self,
        principal: &Principal,
        class_id: Option<i64>,
        from: i64,
        to: i64,
    ) -> Result<Vec<Attendance>> {
        self.list_attendance_between_impl(principal, class_id, from, to)
            .await
    }

    // 消息模块
    async fn create_message(&self, sender_id: i64, req: CreateMessageRequest) -> Result<Message> {
        self.create_message_impl(sender_id, req).await
    }

    async fn get_message(&self, principal: &Principal, id: i64) -> Result<Option<Message>> {
        self.get_message_impl(principal, id).await
    }

    async fn list_messages(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Message>> {
        self.list_messages_impl(principal, params).await
    }

    async fn mark_message_read(&self, id: i64) -> Result<Option<Message>> {
        self.mark_message_read_impl(id).await
    }

    async fn delete_message(&self, id: i64) -> Result<bool> {
        self.delete_message_impl(id).await
    }

    // 统计模块
    async fn user_stats(&self) -> Result<UserStatsResponse> {
        self.user_stats_impl().await
    }
}
