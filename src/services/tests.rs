use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};

use super::*;
use crate::cache::object_cache::moka::MokaCacheWrapper;
use crate::cache::{self, CacheResult};
use crate::models::ListParams;
use crate::models::auth::requests::LoginRequest;
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::models::exams::requests::CreateExamRequest;
use crate::models::lessons::{
    entities::{Lesson, LessonDay},
    requests::CreateLessonRequest,
};
use crate::models::messages::requests::CreateMessageRequest;
use crate::models::results::requests::CreateResultRequest;
use crate::models::subjects::requests::SubjectRequest;
use crate::models::users::requests::{CreatePersonRequest, NewPerson, UpdatePersonRequest};
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::password::hash_password;

const PASSWORD: &str = "Blackboard42";

fn at(hours: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_740_000_000 + hours * 3600, 0).unwrap()
}

fn status_of(result: actix_web::Result<HttpResponse>) -> StatusCode {
    match result {
        Ok(response) => response.status(),
        Err(e) => e.as_response_error().status_code(),
    }
}

fn request_as(user: &User) -> HttpRequest {
    let request = TestRequest::default().to_http_request();
    request.extensions_mut().insert(Principal::from(user));
    request
}

struct School {
    storage: Arc<dyn Storage>,
    admin: User,
    teacher: User,
    other_teacher: User,
    parent: User,
    student: User,
    outsider: User,
    class: Class,
    other_class: Class,
    lesson: Lesson,
    other_lesson: Lesson,
}

async fn person(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    class_id: Option<i64>,
    parent_id: Option<i64>,
) -> User {
    storage
        .create_person(NewPerson {
            username: username.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role,
            email: Some(format!("{username}@school.test")),
            first_name: username.to_string(),
            surname: "Test".to_string(),
            phone: None,
            address: None,
            birthday: None,
            sex: None,
            class_id,
            parent_id,
        })
        .await
        .unwrap()
}

async fn class(storage: &Arc<dyn Storage>, name: &str, capacity: i32, supervisor: &User) -> Class {
    storage
        .create_class(CreateClassRequest {
            name: name.to_string(),
            grade_level: 4,
            capacity,
            supervisor_id: Some(supervisor.id),
        })
        .await
        .unwrap()
}

async fn lesson(storage: &Arc<dyn Storage>, subject_id: i64, class: &Class, teacher: &User) -> Lesson {
    storage
        .create_lesson(CreateLessonRequest {
            name: format!("lesson-{}", class.name),
            day: LessonDay::Tuesday,
            start_time: at(0),
            end_time: at(1),
            subject_id,
            class_id: class.id,
            teacher_id: teacher.id,
        })
        .await
        .unwrap()
}

async fn school() -> School {
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());

    let admin = person(&storage, "principal", UserRole::Admin, None, None).await;
    let teacher = person(&storage, "mrsmith", UserRole::Teacher, None, None).await;
    let other_teacher = person(&storage, "msjones", UserRole::Teacher, None, None).await;
    let parent = person(&storage, "parent", UserRole::Parent, None, None).await;

    let class_a = class(&storage, "4A", 2, &teacher).await;
    let class_b = class(&storage, "4B", 30, &other_teacher).await;

    let student = person(&storage, "alice", UserRole::Student, Some(class_a.id), Some(parent.id)).await;
    let outsider = person(&storage, "bob", UserRole::Student, Some(class_b.id), None).await;

    let subject = storage
        .create_subject(SubjectRequest {
            name: "Mathematics".to_string(),
        })
        .await
        .unwrap();
    let lesson_a = lesson(&storage, subject.id, &class_a, &teacher).await;
    let lesson_b = lesson(&storage, subject.id, &class_b, &other_teacher).await;

    School {
        storage,
        admin,
        teacher,
        other_teacher,
        parent,
        student,
        outsider,
        class: class_a,
        other_class: class_b,
        lesson: lesson_a,
        other_lesson: lesson_b,
    }
}

fn exam_on(lesson: &Lesson) -> CreateExamRequest {
    CreateExamRequest {
        title: "Midterm".to_string(),
        start_time: at(24),
        end_time: at(26),
        lesson_id: lesson.id,
    }
}

fn new_student(username: &str, class_id: Option<i64>) -> CreatePersonRequest {
    CreatePersonRequest {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        email: None,
        first_name: "New".to_string(),
        surname: "Student".to_string(),
        phone: None,
        address: None,
        birthday: None,
        sex: None,
        class_id,
        parent_id: None,
    }
}

#[actix_web::test]
async fn test_teacher_can_only_schedule_exams_for_own_lessons() {
    let school = school().await;
    let service = ExamService::with_storage(school.storage.clone());
    let request = request_as(&school.teacher);

    let own = service.create_exam(&request, exam_on(&school.lesson)).await;
    assert_eq!(status_of(own), StatusCode::CREATED);

    let foreign = service
        .create_exam(&request, exam_on(&school.other_lesson))
        .await;
    assert_eq!(status_of(foreign), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_result_requires_enrolled_student() {
    let school = school().await;
    let exam = school
        .storage
        .create_exam(exam_on(&school.lesson))
        .await
        .unwrap();
    let service = ResultService::with_storage(school.storage.clone());
    let request = request_as(&school.admin);

    let enrolled = service
        .create_result(
            &request,
            CreateResultRequest {
                score: 91.0,
                student_id: school.student.id,
                exam_id: Some(exam.id),
                assignment_id: None,
            },
        )
        .await;
    assert_eq!(status_of(enrolled), StatusCode::CREATED);

    let not_enrolled = service
        .create_result(
            &request,
            CreateResultRequest {
                score: 70.0,
                student_id: school.outsider.id,
                exam_id: Some(exam.id),
                assignment_id: None,
            },
        )
        .await;
    assert_eq!(status_of(not_enrolled), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_out_of_scope_rows_are_not_found() {
    let school = school().await;
    let service = LessonService::with_storage(school.storage.clone());
    let request = request_as(&school.teacher);

    let visible = service.get_lesson(&request, school.lesson.id).await;
    assert_eq!(status_of(visible), StatusCode::OK);

    let hidden = service.get_lesson(&request, school.other_lesson.id).await;
    assert_eq!(status_of(hidden), StatusCode::NOT_FOUND);

    let delete = service.delete_lesson(&request, school.other_lesson.id).await;
    assert_eq!(status_of(delete), StatusCode::NOT_FOUND);
    assert!(
        school
            .storage
            .get_lesson(&Principal::from(&school.admin), school.other_lesson.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_web::test]
async fn test_message_owner_rules() {
    let school = school().await;
    let service = MessageService::with_storage(school.storage.clone());

    let sent = service
        .send_message(
            &request_as(&school.teacher),
            CreateMessageRequest {
                recipient_id: school.parent.id,
                subject: "Field trip".to_string(),
                body: "Please sign the form.".to_string(),
            },
        )
        .await;
    assert_eq!(status_of(sent), StatusCode::CREATED);
    let message = school
        .storage
        .list_messages(&Principal::from(&school.teacher), &ListParams::default())
        .await
        .unwrap()
        .items
        .remove(0);

    // 非参与者看不到
    let stranger = service
        .get_message(&request_as(&school.other_teacher), message.id)
        .await;
    assert_eq!(status_of(stranger), StatusCode::NOT_FOUND);

    let sender_read = service
        .mark_read(&request_as(&school.teacher), message.id)
        .await;
    assert_eq!(status_of(sender_read), StatusCode::FORBIDDEN);

    let recipient_read = service
        .mark_read(&request_as(&school.parent), message.id)
        .await;
    assert_eq!(status_of(recipient_read), StatusCode::OK);

    let recipient_delete = service
        .delete_message(&request_as(&school.parent), message.id)
        .await;
    assert_eq!(status_of(recipient_delete), StatusCode::FORBIDDEN);

    let sender_delete = service
        .delete_message(&request_as(&school.teacher), message.id)
        .await;
    assert_eq!(status_of(sender_delete), StatusCode::OK);
}

#[actix_web::test]
async fn test_cannot_message_yourself() {
    let school = school().await;
    let service = MessageService::with_storage(school.storage.clone());
    let result = service
        .send_message(
            &request_as(&school.parent),
            CreateMessageRequest {
                recipient_id: school.parent.id,
                subject: "Note".to_string(),
                body: "To self".to_string(),
            },
        )
        .await;
    assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_delete_person_with_dependents_conflicts() {
    let school = school().await;
    let request = request_as(&school.admin);

    let parents = PersonService::with_storage(UserRole::Parent, school.storage.clone());
    let result = parents.delete_person(&request, school.parent.id).await;
    assert_eq!(status_of(result), StatusCode::CONFLICT);

    let teachers = PersonService::with_storage(UserRole::Teacher, school.storage.clone());
    let result = teachers.delete_person(&request, school.teacher.id).await;
    assert_eq!(status_of(result), StatusCode::CONFLICT);

    let students = PersonService::with_storage(UserRole::Student, school.storage.clone());
    let result = students.delete_person(&request, school.outsider.id).await;
    assert_eq!(status_of(result), StatusCode::OK);
}

#[actix_web::test]
async fn test_detached_child_unblocks_parent_delete() {
    let school = school().await;
    let request = request_as(&school.admin);
    let students = PersonService::with_storage(UserRole::Student, school.storage.clone());

    let result = students
        .update_person(
            &request,
            school.student.id,
            UpdatePersonRequest {
                class_id: Some(None),
                parent_id: Some(None),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(status_of(result), StatusCode::OK);

    let alice = school
        .storage
        .get_user_by_id(school.student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alice.class_id, None);
    assert_eq!(alice.parent_id, None);

    let parents = PersonService::with_storage(UserRole::Parent, school.storage.clone());
    let result = parents.delete_person(&request, school.parent.id).await;
    assert_eq!(status_of(result), StatusCode::OK);
}

#[actix_web::test]
async fn test_admin_cannot_delete_self() {
    let school = school().await;
    let admins = PersonService::with_storage(UserRole::Admin, school.storage.clone());
    let result = admins
        .delete_person(&request_as(&school.admin), school.admin.id)
        .await;
    assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_full_class_rejects_new_students() {
    let school = school().await;
    let students = PersonService::with_storage(UserRole::Student, school.storage.clone());
    let request = request_as(&school.admin);

    // 4A 容量为 2，已有 1 人
    let second = students
        .create_person(&request, new_student("carol", Some(school.class.id)))
        .await;
    assert_eq!(status_of(second), StatusCode::CREATED);

    let third = students
        .create_person(&request, new_student("dave", Some(school.class.id)))
        .await;
    assert_eq!(status_of(third), StatusCode::BAD_REQUEST);

    let elsewhere = students
        .create_person(&request, new_student("erin", Some(school.other_class.id)))
        .await;
    assert_eq!(status_of(elsewhere), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_teacher_cannot_have_class() {
    let school = school().await;
    let teachers = PersonService::with_storage(UserRole::Teacher, school.storage.clone());
    let result = teachers
        .create_person(
            &request_as(&school.admin),
            new_student("frank", Some(school.class.id)),
        )
        .await;
    assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_duplicate_username_conflicts() {
    let school = school().await;
    let students = PersonService::with_storage(UserRole::Student, school.storage.clone());
    let result = students
        .create_person(&request_as(&school.admin), new_student("alice", None))
        .await;
    assert_eq!(status_of(result), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_deactivation_evicts_cached_sessions() {
    let school = school().await;
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new());
    let key = cache::session_key(school.student.id, "token");
    cache::insert_json(
        cache.as_ref(),
        key.clone(),
        &Principal::from(&school.student),
        0,
    )
    .await;

    let request = TestRequest::default()
        .app_data(web::Data::new(cache.clone()))
        .to_http_request();
    request
        .extensions_mut()
        .insert(Principal::from(&school.admin));

    let students = PersonService::with_storage(UserRole::Student, school.storage.clone());
    let result = students
        .update_person(
            &request,
            school.student.id,
            UpdatePersonRequest {
                active: Some(false),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(status_of(result), StatusCode::OK);
    assert_eq!(cache.get_raw(&key).await, CacheResult::NotFound);
}

#[actix_web::test]
async fn test_class_capacity_cannot_drop_below_enrollment() {
    let school = school().await;
    let service = ClassService::with_storage(school.storage.clone());
    let request = request_as(&school.admin);

    let too_small = service
        .update_class(
            &request,
            school.class.id,
            crate::models::classes::requests::UpdateClassRequest {
                capacity: Some(0),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(status_of(too_small), StatusCode::BAD_REQUEST);

    let exact = service
        .update_class(
            &request,
            school.class.id,
            crate::models::classes::requests::UpdateClassRequest {
                capacity: Some(1),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(status_of(exact), StatusCode::OK);
}

#[actix_web::test]
async fn test_user_stats_are_admin_only() {
    let school = school().await;
    let service = StatsService::with_storage(school.storage.clone());

    let teacher = service.user_stats(&request_as(&school.teacher)).await;
    assert_eq!(status_of(teacher), StatusCode::FORBIDDEN);

    let admin = service.user_stats(&request_as(&school.admin)).await;
    assert_eq!(status_of(admin), StatusCode::OK);
}

#[actix_web::test]
async fn test_login() {
    let school = school().await;
    let service = AuthService::with_storage(school.storage.clone());
    let request = TestRequest::default().to_http_request();

    let wrong = service
        .login(
            &request,
            LoginRequest {
                username: "mrsmith".to_string(),
                password: "Wrongpass99".to_string(),
            },
        )
        .await;
    assert_eq!(status_of(wrong), StatusCode::UNAUTHORIZED);

    let unknown = service
        .login(
            &request,
            LoginRequest {
                username: "nobody".to_string(),
                password: PASSWORD.to_string(),
            },
        )
        .await;
    assert_eq!(status_of(unknown), StatusCode::UNAUTHORIZED);

    // 邮箱同样可以登录
    let response = service
        .login(
            &request,
            LoginRequest {
                username: "mrsmith@school.test".to_string(),
                password: PASSWORD.to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.cookies().any(|c| c.name() == "session-token"));

    let user = school
        .storage
        .get_user_by_id(school.teacher.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_login.is_some());
}

#[actix_web::test]
async fn test_deactivated_user_cannot_log_in() {
    let school = school().await;
    school
        .storage
        .update_person(
            school.parent.id,
            crate::models::users::requests::PersonChanges {
                status: Some(crate::models::users::entities::UserStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let service = AuthService::with_storage(school.storage.clone());
    let result = service
        .login(
            &TestRequest::default().to_http_request(),
            LoginRequest {
                username: "parent".to_string(),
                password: PASSWORD.to_string(),
            },
        )
        .await;
    assert_eq!(status_of(result), StatusCode::UNAUTHORIZED);
}
