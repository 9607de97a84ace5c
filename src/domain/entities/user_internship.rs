use serde::Serialize;
use serde_json::Value;
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::validation::{ErrorMap, Payload};
use super::internship::Internship;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserInternship {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub internship: Internship,
    pub application_status: String,
    pub notes: String,
}

/// Decodes a `user_internships` row joined with its internship, whose
/// columns are aliased with an `internship_` prefix.
impl<'r> FromRow<'r, PgRow> for UserInternship {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserInternship {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            internship: Internship {
                id: row.try_get("internship_id")?,
                title: row.try_get("internship_title")?,
                company: row.try_get("internship_company")?,
                start_date: row.try_get("internship_start_date")?,
                end_date: row.try_get("internship_end_date")?,
                status: row.try_get("internship_status")?,
            },
            application_status: row.try_get("application_status")?,
            notes: row.try_get("notes")?,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct UserInternshipInput {
    pub internship_id: i64,
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub application_status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserInternshipFields {
    pub internship_id: i64,
    pub application_status: String,
    pub notes: String,
}

impl UserInternshipInput {
    pub fn parse(data: &Value) -> Result<Self, ErrorMap> {
        let mut payload = Payload::new(data)?;
        let internship_id = payload.required_pk("internship_id");
        let application_status = payload.required_string("application_status");
        let notes = payload.optional_string("notes");

        payload.finish(UserInternshipInput {
            internship_id: internship_id.unwrap_or_default(),
            application_status: application_status.unwrap_or_default(),
            notes,
        })
    }

    pub fn into_fields(self, existing: Option<&UserInternship>) -> UserInternshipFields {
        UserInternshipFields {
            internship_id: self.internship_id,
            application_status: self.application_status,
            notes: self.notes
                .or_else(|| existing.map(|ui| ui.notes.clone()))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notes_default_to_blank() {
        let fields = UserInternshipInput::parse(&json!({"internship_id": 3, "application_status": "Applied"}))
            .unwrap()
            .into_fields(None);

        assert_eq!(fields.notes, "");
    }

    #[test]
    fn blank_notes_are_allowed_but_blank_status_is_not() {
        let errors = UserInternshipInput::parse(&json!({
            "internship_id": 3,
            "application_status": "",
            "notes": ""
        }))
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["application_status"], vec!["This field may not be blank."]);
    }

    #[test]
    fn internship_id_must_be_a_pk() {
        let errors = UserInternshipInput::parse(&json!({
            "internship_id": "three",
            "application_status": "Applied"
        }))
        .unwrap_err();

        assert_eq!(errors["internship_id"], vec!["Incorrect type. Expected pk value, received string."]);
    }
}
