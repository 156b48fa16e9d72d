//! 权限表
//!
//! (角色, 资源, 操作) 的静态白名单。未列出的组合一律拒绝。

use std::fmt;

use super::users::entities::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Student,
    Teacher,
    Parent,
    Class,
    Subject,
    Lesson,
    Exam,
    Assignment,
    Result,
    Attendance,
    Message,
    Statistics,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Student => "student",
            Resource::Teacher => "teacher",
            Resource::Parent => "parent",
            Resource::Class => "class",
            Resource::Subject => "subject",
            Resource::Lesson => "lesson",
            Resource::Exam => "exam",
            Resource::Assignment => "assignment",
            Resource::Result => "result",
            Resource::Attendance => "attendance",
            Resource::Message => "message",
            Resource::Statistics => "statistics",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        f.write_str(s)
    }
}

use Action::*;
use Resource::*;

const ALL_ACTIONS: &[Action] = &[Read, Create, Update, Delete];
const READ_ONLY: &[Action] = &[Read];

// 教师可维护的教学数据
const TEACHER_TABLE: &[(Resource, &[Action])] = &[
    (Student, READ_ONLY),
    (Teacher, READ_ONLY),
    (Parent, READ_ONLY),
    (Class, READ_ONLY),
    (Subject, READ_ONLY),
    (Lesson, READ_ONLY),
    (Exam, ALL_ACTIONS),
    (Assignment, ALL_ACTIONS),
    (Result, ALL_ACTIONS),
    (Attendance, ALL_ACTIONS),
    (Message, ALL_ACTIONS),
    (Statistics, READ_ONLY),
];

// 学生与家长：只读，消息除外
const LEARNER_TABLE: &[(Resource, &[Action])] = &[
    (Student, READ_ONLY),
    (Teacher, READ_ONLY),
    (Parent, READ_ONLY),
    (Class, READ_ONLY),
    (Subject, READ_ONLY),
    (Lesson, READ_ONLY),
    (Exam, READ_ONLY),
    (Assignment, READ_ONLY),
    (Result, READ_ONLY),
    (Attendance, READ_ONLY),
    (Message, ALL_ACTIONS),
];

fn table_for(role: UserRole) -> Option<&'static [(Resource, &'static [Action])]> {
    match role {
        UserRole::Admin => None,
        UserRole::Teacher => Some(TEACHER_TABLE),
        UserRole::Student | UserRole::Parent => Some(LEARNER_TABLE),
    }
}

/// 纯查表，无副作用
pub fn has_permission(role: UserRole, resource: Resource, action: Action) -> bool {
    match table_for(role) {
        // 管理员拥有全部权限
        None => true,
        Some(table) => table
            .iter()
            .find(|(r, _)| *r == resource)
            .is_some_and(|(_, actions)| actions.contains(&action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCES: &[Resource] = &[
        Student, Teacher, Parent, Class, Subject, Lesson, Exam, Assignment, Result, Attendance,
        Message, Statistics,
    ];

    #[test]
    fn test_admin_allowed_everything() {
        for resource in RESOURCES {
            for action in ALL_ACTIONS {
                assert!(has_permission(UserRole::Admin, *resource, *action));
            }
        }
    }

    #[test]
    fn test_teacher_cannot_manage_people() {
        for resource in [Student, Teacher, Parent, Class, Subject, Lesson] {
            assert!(has_permission(UserRole::Teacher, resource, Read));
            assert!(!has_permission(UserRole::Teacher, resource, Create));
            assert!(!has_permission(UserRole::Teacher, resource, Delete));
        }
        assert!(has_permission(UserRole::Teacher, Result, Create));
        assert!(has_permission(UserRole::Teacher, Attendance, Update));
    }

    #[test]
    fn test_learners_only_write_messages() {
        for role in [UserRole::Student, UserRole::Parent] {
            for resource in RESOURCES {
                let expected = *resource == Message;
                assert_eq!(has_permission(role, *resource, Create), expected);
                assert_eq!(has_permission(role, *resource, Update), expected);
                assert_eq!(has_permission(role, *resource, Delete), expected);
            }
            assert!(!has_permission(role, Statistics, Read));
        }
    }

    #[test]
    fn test_lookup_is_deterministic() {
        for role in UserRole::all_roles() {
            for resource in RESOURCES {
                for action in ALL_ACTIONS {
                    let first = has_permission(*role, *resource, *action);
                    assert_eq!(first, has_permission(*role, *resource, *action));
                }
            }
        }
    }
}
