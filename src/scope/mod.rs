//! 角色范围查询
//!
//! 根据调用者的角色与关联关系生成可见行的 WHERE 条件，
//! 再与用户提供的过滤参数按 AND 组合。
//!
//! - 管理员：除消息外不受限制
//! - 教师：经由自己任课的课程（或担任班主任的班级）
//! - 学生：经由自己所在的班级，成绩与考勤只看自己的
//! - 家长：经由自己孩子
//!
//! 消息对所有角色都只包含自己收发的。

mod filters;
mod subqueries;

#[cfg(test)]
mod tests;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition};

use crate::entity::{assignments, attendances, classes, exams, lessons, messages, results, users};
use crate::models::ListParams;
use crate::models::permissions::Resource;
use crate::models::users::entities::{Principal, UserRole};

use subqueries::*;

pub struct QueryScope;

impl QueryScope {
    /// 角色条件 AND 过滤条件
    pub fn build(principal: &Principal, resource: Resource, params: &ListParams) -> Condition {
        Condition::all()
            .add(Self::role_condition(principal, resource))
            .add(filters::filter_condition(principal, resource, params))
    }

    /// 仅角色条件，用于单条读取与引用校验
    pub fn role_condition(principal: &Principal, resource: Resource) -> Condition {
        match resource {
            Resource::Student => students(principal),
            Resource::Teacher => teachers(principal),
            Resource::Parent => parents(principal),
            Resource::Class => visible_classes(classes::Column::Id, principal),
            Resource::Subject => subjects(principal),
            Resource::Lesson => visible_lessons(principal),
            Resource::Exam => match principal.role {
                UserRole::Admin => Condition::all(),
                _ => Condition::all()
                    .add(exams::Column::LessonId.in_subquery(lesson_ids(visible_lessons(principal)))),
            },
            Resource::Assignment => match principal.role {
                UserRole::Admin => Condition::all(),
                _ => Condition::all().add(
                    assignments::Column::LessonId
                        .in_subquery(lesson_ids(visible_lessons(principal))),
                ),
            },
            Resource::Result => results_scope(principal),
            Resource::Attendance => attendance_scope(principal),
            Resource::Message => Condition::any()
                .add(messages::Column::SenderId.eq(principal.id))
                .add(messages::Column::RecipientId.eq(principal.id)),
            // 统计不是行数据来源
            Resource::Statistics => deny_all(),
        }
    }
}

fn deny_all() -> Condition {
    Condition::all().add(Expr::cust("1 = 0"))
}

/// `column` 属于调用者可见的班级
fn visible_classes<C: ColumnTrait>(column: C, principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher => Condition::any()
            .add(column.in_subquery(lesson_class_ids(
                Condition::all().add(lessons::Column::TeacherId.eq(principal.id)),
            )))
            .add(column.in_subquery(supervised_class_ids(principal.id))),
        UserRole::Student => Condition::all().add(column.in_subquery(student_class_id(principal.id))),
        UserRole::Parent => {
            Condition::all().add(column.in_subquery(children_class_ids(principal.id)))
        }
    }
}

/// lessons 表上的可见条件
fn visible_lessons(principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher => Condition::all().add(lessons::Column::TeacherId.eq(principal.id)),
        UserRole::Student | UserRole::Parent => {
            visible_classes(lessons::Column::ClassId, principal)
        }
    }
}

fn students(principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher | UserRole::Student => {
            visible_classes(users::Column::ClassId, principal)
        }
        UserRole::Parent => Condition::all().add(users::Column::ParentId.eq(principal.id)),
    }
}

fn teachers(principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher => Condition::all().add(users::Column::Id.eq(principal.id)),
        // 给孩子/自己上课的教师与班主任
        UserRole::Student | UserRole::Parent => Condition::any()
            .add(users::Column::Id.in_subquery(lesson_teacher_ids(visible_lessons(principal))))
            .add(users::Column::Id.in_subquery(class_supervisor_ids(visible_classes(
                classes::Column::Id,
                principal,
            )))),
    }
}

fn parents(principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher => Condition::all().add(users::Column::Id.in_subquery(
            student_parent_ids(visible_classes(users::Column::ClassId, principal)),
        )),
        UserRole::Student => Condition::all().add(users::Column::Id.in_subquery(
            student_parent_ids(Condition::all().add(users::Column::Id.eq(principal.id))),
        )),
        UserRole::Parent => Condition::all().add(users::Column::Id.eq(principal.id)),
    }
}

fn subjects(principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher | UserRole::Student | UserRole::Parent => Condition::all().add(
            crate::entity::subjects::Column::Id
                .in_subquery(lesson_subject_ids(visible_lessons(principal))),
        ),
    }
}

fn results_scope(principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher => {
            let taught = || lesson_ids(visible_lessons(principal));
            Condition::any()
                .add(results::Column::ExamId.in_subquery(exam_ids(
                    Condition::all().add(exams::Column::LessonId.in_subquery(taught())),
                )))
                .add(results::Column::AssignmentId.in_subquery(assignment_ids(
                    Condition::all().add(assignments::Column::LessonId.in_subquery(taught())),
                )))
        }
        UserRole::Student => Condition::all().add(results::Column::StudentId.eq(principal.id)),
        UserRole::Parent => Condition::all()
            .add(results::Column::StudentId.in_subquery(children_ids(principal.id))),
    }
}

fn attendance_scope(principal: &Principal) -> Condition {
    match principal.role {
        UserRole::Admin => Condition::all(),
        UserRole::Teacher => Condition::all()
            .add(attendances::Column::LessonId.in_subquery(lesson_ids(visible_lessons(principal)))),
        UserRole::Student => Condition::all().add(attendances::Column::StudentId.eq(principal.id)),
        UserRole::Parent => Condition::all()
            .add(attendances::Column::StudentId.in_subquery(children_ids(principal.id))),
    }
}
