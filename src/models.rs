use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored recipe. `id` is assigned by the store and never changes.
#[derive(Queryable, Selectable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub cooking_time_minutes: i32,
    pub dietary_tags: Option<String>,
}

/// Every field of a recipe except its id, already validated.
///
/// Used both for inserts and for full-overwrite updates, so a `None`
/// `dietary_tags` is written as NULL rather than skipped.
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub cooking_time_minutes: i32,
    pub dietary_tags: Option<String>,
}

impl NewRecipe {
    pub fn with_id(self, id: i32) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            steps: self.steps,
            cooking_time_minutes: self.cooking_time_minutes,
            dietary_tags: self.dietary_tags,
        }
    }
}

/// Request body for create and update.
///
/// Every field is optional at the JSON level so that a missing field is
/// reported through [`RecipePayload::validate`] alongside the other
/// per-field problems instead of failing deserialization outright.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    /// Ignored on create. Must match the path id on update.
    pub id: Option<i32>,
    pub title: Option<String>,
    /// Comma-separated by convention
    pub ingredients: Option<String>,
    pub steps: Option<String>,
    /// Must be at least 1
    pub cooking_time_minutes: Option<i32>,
    /// Free-form, comma-separated (e.g. "vegetarian,gluten-free")
    pub dietary_tags: Option<String>,
}

/// A single constraint violation on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Text columns can't store NUL, so it is rejected up front.
fn has_nul(value: &str) -> bool {
    value.contains('\0')
}

fn nul_error(field: &'static str) -> FieldError {
    FieldError::new(field, format!("{field} must not contain NUL characters"))
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(v) if has_nul(&v) => {
            errors.push(nul_error(field));
            None
        }
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}

impl RecipePayload {
    /// Check every field constraint, collecting all violations rather than
    /// stopping at the first one.
    pub fn validate(self) -> Result<NewRecipe, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = required_text("title", self.title, &mut errors);
        let ingredients = required_text("ingredients", self.ingredients, &mut errors);
        let steps = required_text("steps", self.steps, &mut errors);

        let cooking_time_minutes = match self.cooking_time_minutes {
            Some(minutes) if minutes >= 1 => Some(minutes),
            Some(_) => {
                errors.push(FieldError::new(
                    "cookingTimeMinutes",
                    "cookingTimeMinutes must be at least 1",
                ));
                None
            }
            None => {
                errors.push(FieldError::new(
                    "cookingTimeMinutes",
                    "cookingTimeMinutes is required",
                ));
                None
            }
        };

        if self.dietary_tags.as_deref().is_some_and(has_nul) {
            errors.push(nul_error("dietaryTags"));
        }

        match (title, ingredients, steps, cooking_time_minutes) {
            (Some(title), Some(ingredients), Some(steps), Some(cooking_time_minutes))
                if errors.is_empty() =>
            {
                Ok(NewRecipe {
                    title,
                    ingredients,
                    steps,
                    cooking_time_minutes,
                    dietary_tags: self.dietary_tags,
                })
            }
            _ => Err(errors),
        }
    }
}
