use db::models::class_schedule::SlotInput;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "subject_code must be 1-32 characters"))]
    pub subject_code: String,

    #[validate(length(min = 1, message = "room is required"))]
    pub room: String,

    #[validate(length(min = 1, max = 32, message = "section must be 1-32 characters"))]
    pub section: String,

    /// Required when an admin creates the class; instructors always own what they create.
    pub instructor_id: Option<i64>,

    #[serde(default)]
    pub schedules: Vec<SlotInput>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 32, message = "subject_code must be 1-32 characters"))]
    pub subject_code: Option<String>,

    #[validate(length(min = 1, message = "room cannot be empty"))]
    pub room: Option<String>,

    #[validate(length(min = 1, max = 32, message = "section must be 1-32 characters"))]
    pub section: Option<String>,

    /// Admin only.
    pub instructor_id: Option<i64>,

    /// Replaces every slot when present.
    pub schedules: Option<Vec<SlotInput>>,
}
