use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use sha2::Sha256;

use super::class_schedule::{self, SlotInput};
use super::user::{self, Role};
use super::{attendance_event, class_enrollment, report, student};
use crate::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// QR payload prefix; the full payload is `rollcall:{class_id}:{code}`.
pub const QR_PREFIX: &str = "rollcall";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub subject_code: String,
    pub room: String,
    pub section: String,
    pub instructor_id: i64,
    /// Hex-encoded HMAC key for the rotating check-in code.
    #[serde(skip_serializing)]
    pub qr_secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::InstructorId",
        to = "super::user::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::class_schedule::Entity")]
    Schedules,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::class_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub subject_code: String,
    pub room: String,
    pub section: String,
    pub instructor_id: i64,
    pub schedules: Vec<SlotInput>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassChanges {
    pub name: Option<String>,
    pub subject_code: Option<String>,
    pub room: Option<String>,
    pub section: Option<String>,
    pub instructor_id: Option<i64>,
    /// `Some` replaces every slot, `None` keeps the current ones.
    pub schedules: Option<Vec<SlotInput>>,
}

/// A class together with its weekly slots.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDetail {
    #[serde(flatten)]
    pub class: Model,
    pub schedules: Vec<class_schedule::Model>,
}

const DUPLICATE_CLASS: &str = "A class with this subject code and section already exists";

fn random_secret() -> String {
    let mut buf = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value.to_owned())
}

async fn ensure_instructor<C: ConnectionTrait>(db: &C, user_id: i64) -> AppResult<()> {
    let user = user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("User", user_id))?;
    if user.role != Role::Instructor {
        return Err(AppError::Validation(format!(
            "User {} is not an instructor",
            user.username
        )));
    }
    Ok(())
}

impl Model {
    pub async fn create(db: &DatabaseConnection, new: NewClass) -> AppResult<ClassDetail> {
        let name = required("name", &new.name)?;
        let subject_code = required("subject_code", &new.subject_code)?.to_uppercase();
        let room = required("room", &new.room)?;
        let section = required("section", &new.section)?;
        for slot in &new.schedules {
            slot.normalize()?;
        }

        let txn = db.begin().await?;
        ensure_instructor(&txn, new.instructor_id).await?;

        let now = Utc::now();
        let class = ActiveModel {
            name: Set(name),
            subject_code: Set(subject_code),
            room: Set(room),
            section: Set(section),
            instructor_id: Set(new.instructor_id),
            qr_secret: Set(random_secret()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_db_with_conflict(e, DUPLICATE_CLASS))?;

        let schedules =
            class_schedule::Model::replace_for_class(&txn, class.id, &new.schedules).await?;
        txn.commit().await?;

        Ok(ClassDetail { class, schedules })
    }

    pub async fn find_detail(db: &DatabaseConnection, id: i64) -> AppResult<ClassDetail> {
        let class = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Class", id))?;
        let schedules = class_schedule::Model::for_class(db, id).await?;
        Ok(ClassDetail { class, schedules })
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        changes: ClassChanges,
    ) -> AppResult<ClassDetail> {
        let txn = db.begin().await?;
        let existing = Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Class", id))?;

        let mut active: ActiveModel = existing.into();
        if let Some(v) = changes.name {
            active.name = Set(required("name", &v)?);
        }
        if let Some(v) = changes.subject_code {
            active.subject_code = Set(required("subject_code", &v)?.to_uppercase());
        }
        if let Some(v) = changes.room {
            active.room = Set(required("room", &v)?);
        }
        if let Some(v) = changes.section {
            active.section = Set(required("section", &v)?);
        }
        if let Some(instructor_id) = changes.instructor_id {
            ensure_instructor(&txn, instructor_id).await?;
            active.instructor_id = Set(instructor_id);
        }
        active.updated_at = Set(Utc::now());

        let class = active
            .update(&txn)
            .await
            .map_err(|e| AppError::from_db_with_conflict(e, DUPLICATE_CLASS))?;

        let schedules = match changes.schedules {
            Some(slots) => class_schedule::Model::replace_for_class(&txn, id, &slots).await?,
            None => class_schedule::Model::for_class(&txn, id).await?,
        };
        txn.commit().await?;

        Ok(ClassDetail { class, schedules })
    }

    /// Deletes the class with its slots, enrollments, events and reports.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> AppResult<()> {
        let txn = db.begin().await?;
        if Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("Class", id));
        }

        let events = attendance_event::Entity::find()
            .filter(attendance_event::Column::ClassId.eq(id))
            .all(&txn)
            .await?;
        for event in &events {
            student::Model::adjust_counters(&txn, event.student_id, Some(event.status), None)
                .await?;
        }
        attendance_event::Entity::delete_many()
            .filter(attendance_event::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;
        class_enrollment::Entity::delete_many()
            .filter(class_enrollment::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;
        report::Entity::delete_many()
            .filter(report::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;
        class_schedule::Entity::delete_many()
            .filter(class_schedule::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;
        Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Admins see every class, instructors their own, students the ones they are enrolled in.
    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: i64,
        role: Role,
    ) -> Result<Vec<Self>, DbErr> {
        let query = Entity::find().order_by_asc(Column::SubjectCode).order_by_asc(Column::Section);
        match role {
            Role::Admin => query.all(db).await,
            Role::Instructor => query.filter(Column::InstructorId.eq(user_id)).all(db).await,
            Role::Student => {
                let Some(student) = student::Model::find_by_user(db, user_id).await? else {
                    return Ok(Vec::new());
                };
                let ids = class_enrollment::Model::class_ids_for_student(db, student.id).await?;
                if ids.is_empty() {
                    return Ok(Vec::new());
                }
                query.filter(Column::Id.is_in(ids)).all(db).await
            }
        }
    }

    /// Admin or the owning instructor.
    pub fn is_staff(&self, user_id: i64, role: Role) -> bool {
        match role {
            Role::Admin => true,
            Role::Instructor => self.instructor_id == user_id,
            Role::Student => false,
        }
    }

    /// Staff, or a student enrolled in the class.
    pub async fn is_member<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i64,
        role: Role,
    ) -> Result<bool, DbErr> {
        if self.is_staff(user_id, role) {
            return Ok(true);
        }
        if role != Role::Student {
            return Ok(false);
        }
        match student::Model::find_by_user(db, user_id).await? {
            Some(student) => class_enrollment::Model::is_enrolled(db, self.id, student.id).await,
            None => Ok(false),
        }
    }

    pub fn window(now: DateTime<Utc>, rotation_seconds: i64) -> i64 {
        now.timestamp().div_euclid(rotation_seconds.max(1))
    }

    /// Six-digit code derived from the class secret and the rotation window.
    pub fn code_for_window(&self, window: i64) -> String {
        const DIGITS: u32 = 6;
        // HMAC accepts keys of any length.
        let mut mac =
            HmacSha256::new_from_slice(self.qr_secret.as_bytes()).expect("HMAC key");
        mac.update(&window.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let offset = (digest[31] & 0x0f) as usize;
        let slice = &digest[offset..offset + 4];
        let val = u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]) & 0x7fff_ffff;

        format!("{:0width$}", val % 10u32.pow(DIGITS), width = DIGITS as usize)
    }

    pub fn current_code(&self, now: DateTime<Utc>, rotation_seconds: i64) -> String {
        self.code_for_window(Self::window(now, rotation_seconds))
    }

    pub fn qr_payload(&self, now: DateTime<Utc>, rotation_seconds: i64) -> String {
        format!(
            "{QR_PREFIX}:{}:{}",
            self.id,
            self.current_code(now, rotation_seconds)
        )
    }

    /// Accepts a bare code or a full `rollcall:{id}:{code}` payload for this class.
    pub fn verify_code(
        &self,
        submitted: &str,
        now: DateTime<Utc>,
        rotation_seconds: i64,
        tolerance: i64,
    ) -> bool {
        let submitted = submitted.trim();
        let code = match submitted.rsplit_once(':') {
            Some((head, code)) => {
                if head != format!("{QR_PREFIX}:{}", self.id) {
                    return false;
                }
                code
            }
            None => submitted,
        };

        let current = Self::window(now, rotation_seconds);
        let tolerance = tolerance.max(0);
        (-tolerance..=tolerance).any(|delta| self.code_for_window(current + delta) == code)
    }
}
