use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, Set};

use crate::models::{
    ListParams, MessageBox,
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    attendance::{entities::Attendance, requests::CreateAttendanceRequest},
    classes::{entities::Class, requests::CreateClassRequest},
    exams::{entities::Exam, requests::CreateExamRequest},
    lessons::{
        entities::{Lesson, LessonDay},
        requests::CreateLessonRequest,
    },
    messages::{entities::Message, requests::CreateMessageRequest},
    results::{entities::ExamResult, requests::CreateResultRequest},
    subjects::{entities::Subject, requests::SubjectRequest},
    users::{
        entities::{Principal, User, UserRole},
        requests::NewPerson,
    },
};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

fn at(hours: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_740_000_000 + hours * 3600, 0).unwrap()
}

fn all_rows() -> ListParams {
    ListParams {
        limit: Some(100),
        ..Default::default()
    }
}

async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::in_memory().await.unwrap()
}

struct Fixture {
    storage: SeaOrmStorage,
    users: Vec<User>,
    classes: Vec<Class>,
    subjects: Vec<Subject>,
    lessons: Vec<Lesson>,
    exams: Vec<Exam>,
    assignments: Vec<Assignment>,
    results: Vec<ExamResult>,
    attendance: Vec<Attendance>,
    messages: Vec<Message>,
}

impl Fixture {
    async fn person(
        &mut self,
        username: &str,
        role: UserRole,
        class_id: Option<i64>,
        parent_id: Option<i64>,
    ) -> User {
        let user = self
            .storage
            .create_person(NewPerson {
                username: username.to_string(),
                password_hash: "hash".to_string(),
                role,
                email: None,
                first_name: username.to_string(),
                surname: "Fixture".to_string(),
                phone: None,
                address: None,
                birthday: None,
                sex: None,
                class_id,
                parent_id,
            })
            .await
            .unwrap();
        self.users.push(user.clone());
        user
    }

    async fn class(&mut self, name: &str, supervisor_id: Option<i64>) -> Class {
        let class = self
            .storage
            .create_class(CreateClassRequest {
                name: name.to_string(),
                grade_level: 3,
                capacity: 30,
                supervisor_id,
            })
            .await
            .unwrap();
        self.classes.push(class.clone());
        class
    }

    async fn lesson(&mut self, name: &str, subject: &Subject, class: &Class, teacher: &User) -> Lesson {
        let lesson = self
            .storage
            .create_lesson(CreateLessonRequest {
                name: name.to_string(),
                day: LessonDay::Monday,
                start_time: at(0),
                end_time: at(1),
                subject_id: subject.id,
                class_id: class.id,
                teacher_id: teacher.id,
            })
            .await
            .unwrap();
        self.lessons.push(lesson.clone());
        lesson
    }

    async fn exam(&mut self, lesson: &Lesson) -> Exam {
        let exam = self
            .storage
            .create_exam(CreateExamRequest {
                title: format!("exam-{}", lesson.name),
                start_time: at(2),
                end_time: at(3),
                lesson_id: lesson.id,
            })
            .await
            .unwrap();
        self.exams.push(exam.clone());
        exam
    }

    async fn assignment(&mut self, lesson: &Lesson) -> Assignment {
        let assignment = self
            .storage
            .create_assignment(CreateAssignmentRequest {
                title: format!("homework-{}", lesson.name),
                start_date: at(2),
                due_date: at(48),
                lesson_id: lesson.id,
            })
            .await
            .unwrap();
        self.assignments.push(assignment.clone());
        assignment
    }

    async fn result(&mut self, student: &User, exam_id: Option<i64>, assignment_id: Option<i64>) {
        let result = self
            .storage
            .create_result(CreateResultRequest {
                score: 75.0,
                student_id: student.id,
                exam_id,
                assignment_id,
            })
            .await
            .unwrap();
        self.results.push(result);
    }

    async fn attend(&mut self, student: &User, lesson: &Lesson, day: i64, present: bool) {
        let attendance = self
            .storage
            .create_attendance(CreateAttendanceRequest {
                date: at(day * 24),
                present,
                student_id: student.id,
                lesson_id: lesson.id,
            })
            .await
            .unwrap();
        self.attendance.push(attendance);
    }

    async fn message(&mut self, from: &User, to: &User) {
        let message = self
            .storage
            .create_message(
                from.id,
                CreateMessageRequest {
                    recipient_id: to.id,
                    subject: format!("from {}", from.username),
                    body: "hello".to_string(),
                },
            )
            .await
            .unwrap();
        self.messages.push(message);
    }

    fn principal(&self, username: &str) -> Principal {
        let user = self.users.iter().find(|u| u.username == username).unwrap();
        Principal::from(user)
    }

    fn user(&self, username: &str) -> &User {
        self.users.iter().find(|u| u.username == username).unwrap()
    }

    /// 两个班、三位教师、两位家长、四名学生
    async fn school() -> Self {
        let mut f = Fixture {
            storage: memory_storage().await,
            users: Vec::new(),
            classes: Vec::new(),
            subjects: Vec::new(),
            lessons: Vec::new(),
            exams: Vec::new(),
            assignments: Vec::new(),
            results: Vec::new(),
            attendance: Vec::new(),
            messages: Vec::new(),
        };

        let admin = f.person("admin", UserRole::Admin, None, None).await;
        let t1 = f.person("teacher1", UserRole::Teacher, None, None).await;
        let t2 = f.person("teacher2", UserRole::Teacher, None, None).await;
        let t3 = f.person("teacher3", UserRole::Teacher, None, None).await;
        let p1 = f.person("parent1", UserRole::Parent, None, None).await;
        let p2 = f.person("parent2", UserRole::Parent, None, None).await;

        let c1 = f.class("1A", None).await;
        let c2 = f.class("2B", Some(t3.id)).await;

        for name in ["Math", "Art"] {
            let subject = f
                .storage
                .create_subject(SubjectRequest {
                    name: name.to_string(),
                })
                .await
                .unwrap();
            f.subjects.push(subject);
        }
        let math = f.subjects[0].clone();
        let art = f.subjects[1].clone();

        let s1 = f.person("student1", UserRole::Student, Some(c1.id), Some(p1.id)).await;
        let s2 = f.person("student2", UserRole::Student, Some(c1.id), Some(p2.id)).await;
        let s3 = f.person("student3", UserRole::Student, Some(c2.id), Some(p2.id)).await;
        let s4 = f.person("student4", UserRole::Student, None, None).await;

        let l1 = f.lesson("math-1a", &math, &c1, &t1).await;
        let l2 = f.lesson("art-1a", &art, &c1, &t2).await;
        let l3 = f.lesson("math-2b", &math, &c2, &t2).await;

        let e1 = f.exam(&l1).await;
        let e2 = f.exam(&l2).await;
        let e3 = f.exam(&l3).await;
        let a1 = f.assignment(&l1).await;
        let a2 = f.assignment(&l3).await;

        f.result(&s1, Some(e1.id), None).await;
        f.result(&s2, Some(e2.id), None).await;
        f.result(&s1, None, Some(a1.id)).await;
        f.result(&s3, Some(e3.id), None).await;
        f.result(&s3, None, Some(a2.id)).await;
        f.result(&s2, None, Some(a1.id)).await;

        f.attend(&s1, &l1, 0, true).await;
        f.attend(&s2, &l2, 0, false).await;
        f.attend(&s3, &l3, 1, true).await;
        f.attend(&s1, &l2, 1, false).await;
        f.attend(&s2, &l1, 2, true).await;

        f.message(&t1, &s1).await;
        f.message(&s1, &t1).await;
        f.message(&p1, &t2).await;
        f.message(&admin, &p2).await;
        f.message(&s4, &admin).await;

        f
    }

    fn everyone(&self) -> Vec<Principal> {
        self.users.iter().map(Principal::from).collect()
    }

    fn students_of_parent(&self, parent_id: i64) -> HashSet<i64> {
        self.users
            .iter()
            .filter(|u| u.role == UserRole::Student && u.parent_id == Some(parent_id))
            .map(|u| u.id)
            .collect()
    }

    // 以下为逐行的可见性判定

    fn can_see_class(&self, p: &Principal, class_id: i64) -> bool {
        match p.role {
            UserRole::Admin => true,
            UserRole::Teacher => {
                self.lessons
                    .iter()
                    .any(|l| l.teacher_id == p.id && l.class_id == class_id)
                    || self
                        .classes
                        .iter()
                        .any(|c| c.id == class_id && c.supervisor_id == Some(p.id))
            }
            UserRole::Student => self.user_by_id(p.id).class_id == Some(class_id),
            UserRole::Parent => self
                .users
                .iter()
                .any(|u| u.parent_id == Some(p.id) && u.class_id == Some(class_id)),
        }
    }

    fn user_by_id(&self, id: i64) -> &User {
        self.users.iter().find(|u| u.id == id).unwrap()
    }

    fn can_see_lesson(&self, p: &Principal, lesson: &Lesson) -> bool {
        match p.role {
            UserRole::Admin => true,
            UserRole::Teacher => lesson.teacher_id == p.id,
            UserRole::Student | UserRole::Parent => self.can_see_class(p, lesson.class_id),
        }
    }

    fn lesson_by_id(&self, id: i64) -> &Lesson {
        self.lessons.iter().find(|l| l.id == id).unwrap()
    }

    fn can_see_user(&self, p: &Principal, user: &User) -> bool {
        match (user.role, p.role) {
            (UserRole::Admin, _) => false,
            (_, UserRole::Admin) => true,
            (UserRole::Student, UserRole::Parent) => user.parent_id == Some(p.id),
            (UserRole::Student, _) => user.class_id.is_some_and(|c| self.can_see_class(p, c)),
            (UserRole::Teacher, UserRole::Teacher) => user.id == p.id,
            (UserRole::Teacher, _) => {
                self.lessons
                    .iter()
                    .any(|l| l.teacher_id == user.id && self.can_see_lesson(p, l))
                    || self
                        .classes
                        .iter()
                        .any(|c| c.supervisor_id == Some(user.id) && self.can_see_class(p, c.id))
            }
            (UserRole::Parent, UserRole::Parent) => user.id == p.id,
            (UserRole::Parent, UserRole::Student) => {
                self.user_by_id(p.id).parent_id == Some(user.id)
            }
            (UserRole::Parent, UserRole::Teacher) => self.users.iter().any(|s| {
                s.role == UserRole::Student
                    && s.parent_id == Some(user.id)
                    && s.class_id.is_some_and(|c| self.can_see_class(p, c))
            }),
        }
    }

    fn can_see_subject(&self, p: &Principal, subject: &Subject) -> bool {
        p.is_admin()
            || self
                .lessons
                .iter()
                .any(|l| l.subject_id == subject.id && self.can_see_lesson(p, l))
    }

    fn can_see_result(&self, p: &Principal, result: &ExamResult) -> bool {
        match p.role {
            UserRole::Admin => true,
            UserRole::Teacher => {
                let lesson_id = result
                    .exam_id
                    .map(|id| self.exams.iter().find(|e| e.id == id).unwrap().lesson_id)
                    .or_else(|| {
                        result.assignment_id.map(|id| {
                            self.assignments
                                .iter()
                                .find(|a| a.id == id)
                                .unwrap()
                                .lesson_id
                        })
                    })
                    .unwrap();
                self.lesson_by_id(lesson_id).teacher_id == p.id
            }
            UserRole::Student => result.student_id == p.id,
            UserRole::Parent => self.students_of_parent(p.id).contains(&result.student_id),
        }
    }

    fn can_see_attendance(&self, p: &Principal, row: &Attendance) -> bool {
        match p.role {
            UserRole::Admin => true,
            UserRole::Teacher => self.lesson_by_id(row.lesson_id).teacher_id == p.id,
            UserRole::Student => row.student_id == p.id,
            UserRole::Parent => self.students_of_parent(p.id).contains(&row.student_id),
        }
    }
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> HashSet<i64> {
    items.iter().map(id).collect()
}

#[actix_web::test]
async fn test_scoped_lists_match_visibility_rules() {
    let f = Fixture::school().await;
    let params = all_rows();

    for p in f.everyone() {
        for role in [UserRole::Student, UserRole::Teacher, UserRole::Parent] {
            let listed = f.storage.list_people(&p, role, &params).await.unwrap();
            let expected: HashSet<i64> = f
                .users
                .iter()
                .filter(|u| u.role == role && f.can_see_user(&p, u))
                .map(|u| u.id)
                .collect();
            assert_eq!(
                ids(&listed.items, |u| u.id),
                expected,
                "{} listing {role}",
                p.username
            );
        }

        let classes = f.storage.list_classes(&p, &params).await.unwrap();
        let expected = f
            .classes
            .iter()
            .filter(|c| f.can_see_class(&p, c.id))
            .map(|c| c.id)
            .collect();
        assert_eq!(ids(&classes.items, |c| c.id), expected, "{} classes", p.username);

        let subjects = f.storage.list_subjects(&p, &params).await.unwrap();
        let expected = f
            .subjects
            .iter()
            .filter(|s| f.can_see_subject(&p, s))
            .map(|s| s.id)
            .collect();
        assert_eq!(ids(&subjects.items, |s| s.id), expected, "{} subjects", p.username);

        let lessons = f.storage.list_lessons(&p, &params).await.unwrap();
        let expected = f
            .lessons
            .iter()
            .filter(|l| f.can_see_lesson(&p, l))
            .map(|l| l.id)
            .collect();
        assert_eq!(ids(&lessons.items, |l| l.id), expected, "{} lessons", p.username);

        let exams = f.storage.list_exams(&p, &params).await.unwrap();
        let expected = f
            .exams
            .iter()
            .filter(|e| f.can_see_lesson(&p, f.lesson_by_id(e.lesson_id)))
            .map(|e| e.id)
            .collect();
        assert_eq!(ids(&exams.items, |e| e.id), expected, "{} exams", p.username);

        let assignments = f.storage.list_assignments(&p, &params).await.unwrap();
        let expected = f
            .assignments
            .iter()
            .filter(|a| f.can_see_lesson(&p, f.lesson_by_id(a.lesson_id)))
            .map(|a| a.id)
            .collect();
        assert_eq!(
            ids(&assignments.items, |a| a.id),
            expected,
            "{} assignments",
            p.username
        );

        let results = f.storage.list_results(&p, &params).await.unwrap();
        let expected = f
            .results
            .iter()
            .filter(|r| f.can_see_result(&p, r))
            .map(|r| r.id)
            .collect();
        assert_eq!(ids(&results.items, |r| r.id), expected, "{} results", p.username);

        let attendance = f.storage.list_attendance(&p, &params).await.unwrap();
        let expected = f
            .attendance
            .iter()
            .filter(|a| f.can_see_attendance(&p, a))
            .map(|a| a.id)
            .collect();
        assert_eq!(
            ids(&attendance.items, |a| a.id),
            expected,
            "{} attendance",
            p.username
        );

        let messages = f.storage.list_messages(&p, &params).await.unwrap();
        let expected = f
            .messages
            .iter()
            .filter(|m| m.sender_id == p.id || m.recipient_id == p.id)
            .map(|m| m.id)
            .collect();
        assert_eq!(ids(&messages.items, |m| m.id), expected, "{} messages", p.username);
    }
}

#[actix_web::test]
async fn test_scoped_get_hides_rows_outside_scope() {
    let f = Fixture::school().await;

    for p in f.everyone() {
        for lesson in &f.lessons {
            let found = f.storage.get_lesson(&p, lesson.id).await.unwrap();
            assert_eq!(found.is_some(), f.can_see_lesson(&p, lesson));
        }
        for result in &f.results {
            let found = f.storage.get_result(&p, result.id).await.unwrap();
            assert_eq!(found.is_some(), f.can_see_result(&p, result));
        }
    }
}

#[actix_web::test]
async fn test_teacher_results_filtered_by_class_stay_on_own_lessons() {
    let f = Fixture::school().await;
    let t1 = f.principal("teacher1");
    let c1 = f.classes.iter().find(|c| c.name == "1A").unwrap();
    let l1 = f.lessons.iter().find(|l| l.name == "math-1a").unwrap();

    let params = ListParams {
        class_id: Some(c1.id),
        ..all_rows()
    };
    let listed = f.storage.list_results(&t1, &params).await.unwrap();

    let l1_exams = ids(
        &f.exams.iter().filter(|e| e.lesson_id == l1.id).cloned().collect::<Vec<_>>(),
        |e| e.id,
    );
    let l1_assignments = ids(
        &f.assignments
            .iter()
            .filter(|a| a.lesson_id == l1.id)
            .cloned()
            .collect::<Vec<_>>(),
        |a| a.id,
    );

    // 同班另一位教师的考试成绩不可见
    assert_eq!(listed.pagination.total, 3);
    for result in &listed.items {
        let on_l1 = result.exam_id.is_some_and(|id| l1_exams.contains(&id))
            || result.assignment_id.is_some_and(|id| l1_assignments.contains(&id));
        assert!(on_l1, "result {} is not on lesson l1", result.id);
    }
}

#[actix_web::test]
async fn test_parent_attendance_only_shows_own_child() {
    let f = Fixture::school().await;
    let p1 = f.principal("parent1");
    let s1 = f.user("student1").id;
    let s2 = f.user("student2").id;
    let l1 = f.lessons.iter().find(|l| l.name == "math-1a").unwrap().id;
    let c1 = f.classes.iter().find(|c| c.name == "1A").unwrap().id;

    let attempts = [
        all_rows(),
        ListParams {
            student_id: Some(s2),
            ..all_rows()
        },
        ListParams {
            class_id: Some(c1),
            ..all_rows()
        },
        ListParams {
            lesson_id: Some(l1),
            ..all_rows()
        },
        ListParams {
            search: Some("student".to_string()),
            teacher_id: Some(f.user("teacher2").id),
            ..all_rows()
        },
    ];

    for params in attempts {
        let listed = f.storage.list_attendance(&p1, &params).await.unwrap();
        assert!(listed.items.iter().all(|a| a.student_id == s1));
    }

    let own = f.storage.list_attendance(&p1, &all_rows()).await.unwrap();
    assert_eq!(own.pagination.total, 2);
}

#[actix_web::test]
async fn test_page_sizes_follow_pagination_formula() {
    let f = Fixture::school().await;
    let admin = f.principal("admin");
    let total = f.results.len() as u64;

    for limit in 1..=7_i64 {
        for page in 1..=(total as i64 + 2) {
            let params = ListParams {
                page: Some(page),
                limit: Some(limit),
                ..Default::default()
            };
            let listed = f.storage.list_results(&admin, &params).await.unwrap();
            let skipped = (limit * (page - 1)) as u64;
            let expected = if skipped < total {
                (limit as u64).min(total - skipped)
            } else {
                0
            };
            assert_eq!(listed.items.len() as u64, expected, "limit {limit} page {page}");
            assert_eq!(listed.pagination.total, total as i64);
        }
    }
}

#[actix_web::test]
async fn test_huge_page_number_returns_empty_page() {
    let f = Fixture::school().await;
    let admin = f.principal("admin");
    let params = ListParams {
        page: Some(i64::MAX),
        limit: Some(100),
        ..Default::default()
    };

    let listed = f.storage.list_results(&admin, &params).await.unwrap();
    assert!(listed.items.is_empty());
    assert_eq!(listed.pagination.total, f.results.len() as i64);
    assert_eq!(listed.pagination.page, i64::MAX);
}

#[actix_web::test]
async fn test_repeated_list_returns_same_total() {
    let f = Fixture::school().await;
    let t2 = f.principal("teacher2");
    let params = ListParams {
        limit: Some(1),
        ..Default::default()
    };

    let first = f.storage.list_attendance(&t2, &params).await.unwrap();
    let second = f.storage.list_attendance(&t2, &params).await.unwrap();
    assert_eq!(first.pagination.total, second.pagination.total);
    assert_eq!(
        first.items.iter().map(|a| a.id).collect::<Vec<_>>(),
        second.items.iter().map(|a| a.id).collect::<Vec<_>>()
    );
}

#[actix_web::test]
async fn test_user_filters_narrow_scope() {
    let f = Fixture::school().await;
    let admin = f.principal("admin");
    let c2 = f.classes.iter().find(|c| c.name == "2B").unwrap().id;

    let params = ListParams {
        class_id: Some(c2),
        ..all_rows()
    };
    let students = f
        .storage
        .list_people(&admin, UserRole::Student, &params)
        .await
        .unwrap();
    assert_eq!(
        ids(&students.items, |u| u.id),
        HashSet::from([f.user("student3").id])
    );

    let params = ListParams {
        search: Some("student1".to_string()),
        ..all_rows()
    };
    let students = f
        .storage
        .list_people(&admin, UserRole::Student, &params)
        .await
        .unwrap();
    assert_eq!(students.items.len(), 1);

    // 通配符按字面匹配
    let params = ListParams {
        search: Some("%".to_string()),
        ..all_rows()
    };
    let students = f
        .storage
        .list_people(&admin, UserRole::Student, &params)
        .await
        .unwrap();
    assert!(students.items.is_empty());
}

#[actix_web::test]
async fn test_message_box_filter() {
    let f = Fixture::school().await;
    let s1 = f.principal("student1");

    let inbox = f
        .storage
        .list_messages(
            &s1,
            &ListParams {
                mailbox: Some(MessageBox::Inbox),
                ..all_rows()
            },
        )
        .await
        .unwrap();
    assert!(inbox.items.iter().all(|m| m.recipient_id == s1.id));
    assert_eq!(inbox.items.len(), 1);

    let sent = f
        .storage
        .list_messages(
            &s1,
            &ListParams {
                mailbox: Some(MessageBox::Sent),
                ..all_rows()
            },
        )
        .await
        .unwrap();
    assert!(sent.items.iter().all(|m| m.sender_id == s1.id));
    assert_eq!(sent.items.len(), 1);
}

#[actix_web::test]
async fn test_unknown_stored_role_never_becomes_a_user() {
    use crate::entity::users::ActiveModel;

    let storage = memory_storage().await;
    let model = ActiveModel {
        username: Set("intruder".to_string()),
        email: Set(None),
        password_hash: Set("hash".to_string()),
        role: Set("superuser".to_string()),
        status: Set("active".to_string()),
        first_name: Set("In".to_string()),
        surname: Set("Truder".to_string()),
        created_at: Set(0),
        updated_at: Set(0),
        ..Default::default()
    };
    let inserted = model.insert(&storage.db).await.unwrap();

    assert!(storage.get_user_by_id(inserted.id).await.unwrap().is_none());
    assert!(
        storage
            .get_user_by_username_or_email("intruder")
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn test_statistics_resource_matches_nothing() {
    use crate::entity::users::Entity as Users;
    use crate::models::permissions::Resource;
    use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter};

    let f = Fixture::school().await;
    let admin = f.principal("admin");
    let count = Users::find()
        .filter(super::QueryScope::role_condition(&admin, Resource::Statistics))
        .count(&f.storage.db)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
