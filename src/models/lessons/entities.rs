use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 上课日
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "lesson.ts")]
pub enum LessonDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl std::fmt::Display for LessonDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LessonDay::Monday => "monday",
            LessonDay::Tuesday => "tuesday",
            LessonDay::Wednesday => "wednesday",
            LessonDay::Thursday => "thursday",
            LessonDay::Friday => "friday",
            LessonDay::Saturday => "saturday",
            LessonDay::Sunday => "sunday",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for LessonDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(LessonDay::Monday),
            "tuesday" => Ok(LessonDay::Tuesday),
            "wednesday" => Ok(LessonDay::Wednesday),
            "thursday" => Ok(LessonDay::Thursday),
            "friday" => Ok(LessonDay::Friday),
            "saturday" => Ok(LessonDay::Saturday),
            "sunday" => Ok(LessonDay::Sunday),
            _ => Err(format!("Invalid lesson day: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct Lesson {
    pub id: i64,
    pub name: String,
    pub day: LessonDay,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: chrono::DateTime<chrono::Utc>,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
