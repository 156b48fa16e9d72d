//! 用户提供的过滤参数
//!
//! 每个资源只读取与自己相关的参数，其余参数忽略。

use sea_orm::{ColumnTrait, Condition};

use super::subqueries::*;
use crate::entity::{
    assignments, attendances, classes, exams, lessons, messages, results, subjects, users,
};
use crate::models::permissions::Resource;
use crate::models::users::entities::Principal;
use crate::models::{ListParams, MessageBox};
use crate::utils::contains_pattern;

pub(super) fn filter_condition(
    principal: &Principal,
    resource: Resource,
    params: &ListParams,
) -> Condition {
    let mut cond = Condition::all();
    let search = params.search_term();

    match resource {
        Resource::Student => {
            if let Some(class_id) = params.class_id {
                cond = cond.add(users::Column::ClassId.eq(class_id));
            }
            if let Some(parent_id) = params.parent_id {
                cond = cond.add(users::Column::ParentId.eq(parent_id));
            }
            if let Some(teacher_id) = params.teacher_id {
                cond = cond.add(users::Column::ClassId.in_subquery(lesson_class_ids(
                    Condition::all().add(lessons::Column::TeacherId.eq(teacher_id)),
                )));
            }
            if let Some(term) = search {
                cond = cond.add(person_search(term));
            }
        }
        Resource::Teacher => {
            if let Some(class_id) = params.class_id {
                cond = cond.add(users::Column::Id.in_subquery(lesson_teacher_ids(
                    Condition::all().add(lessons::Column::ClassId.eq(class_id)),
                )));
            }
            if let Some(subject_id) = params.subject_id {
                cond = cond.add(users::Column::Id.in_subquery(lesson_teacher_ids(
                    Condition::all().add(lessons::Column::SubjectId.eq(subject_id)),
                )));
            }
            if let Some(term) = search {
                cond = cond.add(person_search(term));
            }
        }
        Resource::Parent => {
            if let Some(student_id) = params.student_id {
                cond = cond.add(users::Column::Id.in_subquery(student_parent_ids(
                    Condition::all().add(users::Column::Id.eq(student_id)),
                )));
            }
            if let Some(class_id) = params.class_id {
                cond = cond.add(users::Column::Id.in_subquery(student_parent_ids(
                    Condition::all().add(users::Column::ClassId.eq(class_id)),
                )));
            }
            if let Some(term) = search {
                cond = cond.add(person_search(term));
            }
        }
        Resource::Class => {
            if let Some(teacher_id) = params.teacher_id {
                cond = cond.add(classes::Column::SupervisorId.eq(teacher_id));
            }
            if let Some(grade) = params.grade {
                cond = cond.add(classes::Column::GradeLevel.eq(grade));
            }
            if let Some(term) = search {
                cond = cond.add(classes::Column::Name.like(contains_pattern(term)));
            }
        }
        Resource::Subject => {
            if let Some(teacher_id) = params.teacher_id {
                cond = cond.add(subjects::Column::Id.in_subquery(lesson_subject_ids(
                    Condition::all().add(lessons::Column::TeacherId.eq(teacher_id)),
                )));
            }
            if let Some(term) = search {
                cond = cond.add(subjects::Column::Name.like(contains_pattern(term)));
            }
        }
        Resource::Lesson => {
            cond = cond.add(lesson_filters(params));
            if let Some(term) = search {
                cond = cond.add(lessons::Column::Name.like(contains_pattern(term)));
            }
        }
        Resource::Exam => {
            if let Some(lesson_id) = params.lesson_id {
                cond = cond.add(exams::Column::LessonId.eq(lesson_id));
            }
            if let Some(lessons) = lesson_filter_subquery(params) {
                cond = cond.add(exams::Column::LessonId.in_subquery(lessons));
            }
            if let Some(term) = search {
                cond = cond.add(exams::Column::Title.like(contains_pattern(term)));
            }
        }
        Resource::Assignment => {
            if let Some(lesson_id) = params.lesson_id {
                cond = cond.add(assignments::Column::LessonId.eq(lesson_id));
            }
            if let Some(lessons) = lesson_filter_subquery(params) {
                cond = cond.add(assignments::Column::LessonId.in_subquery(lessons));
            }
            if let Some(term) = search {
                cond = cond.add(assignments::Column::Title.like(contains_pattern(term)));
            }
        }
        Resource::Result => {
            if let Some(student_id) = params.student_id {
                cond = cond.add(results::Column::StudentId.eq(student_id));
            }
            if let Some(exam_id) = params.exam_id {
                cond = cond.add(results::Column::ExamId.eq(exam_id));
            }
            if let Some(assignment_id) = params.assignment_id {
                cond = cond.add(results::Column::AssignmentId.eq(assignment_id));
            }
            // 按课程或班级过滤时，考试成绩与作业成绩都要覆盖
            let mut lesson_cond = Condition::all();
            if let Some(lesson_id) = params.lesson_id {
                lesson_cond = lesson_cond.add(lessons::Column::Id.eq(lesson_id));
            }
            if let Some(class_id) = params.class_id {
                lesson_cond = lesson_cond.add(lessons::Column::ClassId.eq(class_id));
            }
            if !lesson_cond.is_empty() {
                let lesson_set = || lesson_ids(lesson_cond.clone());
                cond = cond.add(
                    Condition::any()
                        .add(results::Column::ExamId.in_subquery(exam_ids(
                            Condition::all().add(exams::Column::LessonId.in_subquery(lesson_set())),
                        )))
                        .add(results::Column::AssignmentId.in_subquery(assignment_ids(
                            Condition::all()
                                .add(assignments::Column::LessonId.in_subquery(lesson_set())),
                        ))),
                );
            }
            if let Some(term) = search {
                cond = cond.add(
                    results::Column::StudentId.in_subquery(user_ids(person_search(term))),
                );
            }
        }
        Resource::Attendance => {
            if let Some(student_id) = params.student_id {
                cond = cond.add(attendances::Column::StudentId.eq(student_id));
            }
            if let Some(lesson_id) = params.lesson_id {
                cond = cond.add(attendances::Column::LessonId.eq(lesson_id));
            }
            if let Some(class_id) = params.class_id {
                cond = cond.add(attendances::Column::LessonId.in_subquery(lesson_ids(
                    Condition::all().add(lessons::Column::ClassId.eq(class_id)),
                )));
            }
        }
        Resource::Message => {
            match params.mailbox {
                Some(MessageBox::Inbox) => {
                    cond = cond.add(messages::Column::RecipientId.eq(principal.id));
                }
                Some(MessageBox::Sent) => {
                    cond = cond.add(messages::Column::SenderId.eq(principal.id));
                }
                None => {}
            }
            if let Some(term) = search {
                cond = cond.add(messages::Column::Subject.like(contains_pattern(term)));
            }
        }
        Resource::Statistics => {}
    }

    cond
}

/// 姓名或用户名包含搜索词
fn person_search(term: &str) -> Condition {
    Condition::any()
        .add(users::Column::Username.like(contains_pattern(term)))
        .add(users::Column::FirstName.like(contains_pattern(term)))
        .add(users::Column::Surname.like(contains_pattern(term)))
}

fn lesson_filters(params: &ListParams) -> Condition {
    let mut cond = Condition::all();
    if let Some(class_id) = params.class_id {
        cond = cond.add(lessons::Column::ClassId.eq(class_id));
    }
    if let Some(teacher_id) = params.teacher_id {
        cond = cond.add(lessons::Column::TeacherId.eq(teacher_id));
    }
    if let Some(subject_id) = params.subject_id {
        cond = cond.add(lessons::Column::SubjectId.eq(subject_id));
    }
    cond
}

/// 考试与作业按课程属性过滤
fn lesson_filter_subquery(params: &ListParams) -> Option<sea_orm::sea_query::SelectStatement> {
    let cond = lesson_filters(params);
    if cond.is_empty() {
        None
    } else {
        Some(lesson_ids(cond))
    }
}
