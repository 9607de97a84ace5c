use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::validation::{ErrorMap, Payload};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Internship {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free text; Applied, Interviewing, Offered or Rejected by convention.
    pub status: String,
}

#[derive(Debug, Clone, Validate)]
pub struct InternshipInput {
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub title: String,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub status: String,
}

/// Every internship column is required, so the validated input is written as is.
pub type InternshipFields = InternshipInput;

impl InternshipInput {
    pub fn parse(data: &Value) -> Result<Self, ErrorMap> {
        let mut payload = Payload::new(data)?;
        let title = payload.required_string("title");
        let company = payload.required_string("company");
        let start_date = payload.required_date("start_date");
        let end_date = payload.required_date("end_date");
        let status = payload.required_string("status");

        payload.finish(InternshipInput {
            title: title.unwrap_or_default(),
            company: company.unwrap_or_default(),
            start_date: start_date.unwrap_or_default(),
            end_date: end_date.unwrap_or_default(),
            status: status.unwrap_or_default(),
        })
    }
}
