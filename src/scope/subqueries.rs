//! 范围条件使用的子查询
//!
//! 每个函数返回单列 SELECT，配合 `in_subquery` 使用。

use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{ColumnTrait, Condition, EntityTrait};

use crate::entity::{assignments, classes, exams, lessons, users};
use crate::models::users::entities::UserRole;

fn select<E, C>(entity: E, column: C, cond: Condition) -> SelectStatement
where
    E: EntityTrait + 'static,
    C: ColumnTrait + 'static,
{
    Query::select()
        .column(column)
        .from(entity)
        .cond_where(cond)
        .to_owned()
}

pub(super) fn lesson_ids(cond: Condition) -> SelectStatement {
    select(lessons::Entity, lessons::Column::Id, cond)
}

pub(super) fn lesson_class_ids(cond: Condition) -> SelectStatement {
    select(lessons::Entity, lessons::Column::ClassId, cond)
}

pub(super) fn lesson_subject_ids(cond: Condition) -> SelectStatement {
    select(lessons::Entity, lessons::Column::SubjectId, cond)
}

pub(super) fn lesson_teacher_ids(cond: Condition) -> SelectStatement {
    select(lessons::Entity, lessons::Column::TeacherId, cond)
}

pub(super) fn class_supervisor_ids(cond: Condition) -> SelectStatement {
    select(classes::Entity, classes::Column::SupervisorId, cond)
}

pub(super) fn supervised_class_ids(teacher_id: i64) -> SelectStatement {
    select(
        classes::Entity,
        classes::Column::Id,
        Condition::all().add(classes::Column::SupervisorId.eq(teacher_id)),
    )
}

pub(super) fn exam_ids(cond: Condition) -> SelectStatement {
    select(exams::Entity, exams::Column::Id, cond)
}

pub(super) fn assignment_ids(cond: Condition) -> SelectStatement {
    select(assignments::Entity, assignments::Column::Id, cond)
}

pub(super) fn user_ids(cond: Condition) -> SelectStatement {
    select(users::Entity, users::Column::Id, cond)
}

/// 学生所在班级（未分班时子查询结果为 NULL，不匹配任何行）
pub(super) fn student_class_id(student_id: i64) -> SelectStatement {
    select(
        users::Entity,
        users::Column::ClassId,
        Condition::all().add(users::Column::Id.eq(student_id)),
    )
}

fn children(parent_id: i64) -> Condition {
    Condition::all()
        .add(users::Column::ParentId.eq(parent_id))
        .add(users::Column::Role.eq(UserRole::STUDENT))
}

pub(super) fn children_ids(parent_id: i64) -> SelectStatement {
    select(users::Entity, users::Column::Id, children(parent_id))
}

pub(super) fn children_class_ids(parent_id: i64) -> SelectStatement {
    select(users::Entity, users::Column::ClassId, children(parent_id))
}

/// 满足条件的学生的家长
pub(super) fn student_parent_ids(cond: Condition) -> SelectStatement {
    select(
        users::Entity,
        users::Column::ParentId,
        Condition::all()
            .add(cond)
            .add(users::Column::Role.eq(UserRole::STUDENT)),
    )
}
