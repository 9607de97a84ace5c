use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::validation::{ErrorMap, Payload};
use super::skill::Skill;

/// A skill on a user's profile. The owner is never part of the wire form.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserSkill {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub skill: Skill,
    pub progress: i32,
    pub last_updated: DateTime<Utc>,
}

/// Decodes a `user_skills` row joined with its skill, whose columns are
/// aliased with a `skill_` prefix.
impl<'r> FromRow<'r, PgRow> for UserSkill {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserSkill {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            skill: Skill {
                id: row.try_get("skill_id")?,
                name: row.try_get("skill_name")?,
                description: row.try_get("skill_description")?,
                proficiency_level: row.try_get("skill_proficiency_level")?,
            },
            progress: row.try_get("progress")?,
            last_updated: row.try_get("last_updated")?,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct UserSkillInput {
    pub skill_id: i64,
    pub progress: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSkillFields {
    pub skill_id: i64,
    pub progress: i32,
}

impl UserSkillInput {
    /// Any `user` or `last_updated` in the body is ignored.
    pub fn parse(data: &Value) -> Result<Self, ErrorMap> {
        let mut payload = Payload::new(data)?;
        let skill_id = payload.required_pk("skill_id");
        let progress = payload.optional_integer("progress");

        payload.finish(UserSkillInput {
            skill_id: skill_id.unwrap_or_default(),
            progress,
        })
    }

    pub fn into_fields(self, existing: Option<&UserSkill>) -> UserSkillFields {
        UserSkillFields {
            skill_id: self.skill_id,
            progress: self.progress
                .or_else(|| existing.map(|us| us.progress))
                .unwrap_or(0),
        }
    }
}
