use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::validation::{ErrorMap, Payload};

/// A catalog skill. `proficiency_level` is meant to be 0-100 but no bound is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub proficiency_level: i32,
}

/// Validated write shape of a skill.
#[derive(Debug, Clone, Validate)]
pub struct SkillInput {
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub name: String,
    pub description: Option<String>,
    pub proficiency_level: Option<i32>,
}

/// Column values written to the `skills` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillFields {
    pub name: String,
    pub description: String,
    pub proficiency_level: i32,
}

impl SkillInput {
    pub fn parse(data: &Value) -> Result<Self, ErrorMap> {
        let mut payload = Payload::new(data)?;
        let name = payload.required_string("name");
        let description = payload.optional_string("description");
        let proficiency_level = payload.optional_integer("proficiency_level");

        payload.finish(SkillInput {
            name: name.unwrap_or_default(),
            description,
            proficiency_level,
        })
    }

    /// Omitted optional fields keep the stored value on update and take
    /// their defaults on create.
    pub fn into_fields(self, existing: Option<&Skill>) -> SkillFields {
        SkillFields {
            name: self.name,
            description: self.description
                .or_else(|| existing.map(|s| s.description.clone()))
                .unwrap_or_default(),
            proficiency_level: self.proficiency_level
                .or_else(|| existing.map(|s| s.proficiency_level))
                .unwrap_or(0),
        }
    }
}
