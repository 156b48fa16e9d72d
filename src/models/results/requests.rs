use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;

pub const MAX_SCORE: f64 = 100.0;

fn check_score(errors: &mut FieldErrors, score: f64) {
    errors.check(
        score.is_finite() && (0.0..=MAX_SCORE).contains(&score),
        "score",
        "Score must be between 0 and 100",
    );
}

/// 考试与作业必须恰好提供一个
fn check_assessment(errors: &mut FieldErrors, exam_id: Option<i64>, assignment_id: Option<i64>) {
    if exam_id.is_some() == assignment_id.is_some() {
        errors.add(
            "examId",
            "Exactly one of examId or assignmentId must be provided",
        );
    }
}

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "result.ts")]
pub struct CreateResultRequest {
    pub score: f64,
    pub student_id: i64,
    pub exam_id: Option<i64>,
    pub assignment_id: Option<i64>,
}

impl CreateResultRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_score(&mut errors, self.score);
        check_assessment(&mut errors, self.exam_id, self.assignment_id);
        errors.into_result()
    }
}

/// 更新时若改动关联，同样需要恰好一个
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "result.ts")]
pub struct UpdateResultRequest {
    pub score: Option<f64>,
    pub exam_id: Option<i64>,
    pub assignment_id: Option<i64>,
}

impl UpdateResultRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(score) = self.score {
            check_score(&mut errors, score);
        }
        if self.exam_id.is_some() && self.assignment_id.is_some() {
            check_assessment(&mut errors, self.exam_id, self.assignment_id);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(exam_id: Option<i64>, assignment_id: Option<i64>) -> CreateResultRequest {
        CreateResultRequest {
            score: 88.5,
            student_id: 1,
            exam_id,
            assignment_id,
        }
    }

    #[test]
    fn test_result_requires_exactly_one_assessment() {
        assert!(request(Some(1), None).validate().is_ok());
        assert!(request(None, Some(1)).validate().is_ok());
        assert!(request(None, None).validate().is_err());
        assert!(request(Some(1), Some(2)).validate().is_err());
    }

    #[test]
    fn test_score_range() {
        let mut req = request(Some(1), None);
        req.score = -1.0;
        assert!(req.validate().is_err());
        req.score = f64::NAN;
        assert!(req.validate().is_err());
        req.score = 100.0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_both_assessments() {
        let req = UpdateResultRequest {
            score: None,
            exam_id: Some(1),
            assignment_id: Some(1),
        };
        assert!(req.validate().is_err());
        assert!(UpdateResultRequest::default().validate().is_ok());
    }
}
