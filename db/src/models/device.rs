use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryOrder, Set};
use serde::Serialize;

use super::attendance_event::validate_coordinates;
use crate::error::{AppError, AppResult};

/// An instructor's phone or tablet, with its last reported location.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub instructor_id: i64,
    pub device_identifier: String,
    pub label: Option<String>,
    pub platform: Option<String>,
    pub active: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy_m: Option<f64>,
    pub fix_at: Option<DateTime<Utc>>,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default)]
pub struct DeviceChanges {
    pub label: Option<String>,
    pub platform: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
    pub fix_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Registers a device, or refreshes it when the instructor already has one with this
    /// identifier.
    pub async fn register(
        db: &DatabaseConnection,
        instructor_id: i64,
        device_identifier: &str,
        label: Option<String>,
        platform: Option<String>,
    ) -> AppResult<Self> {
        let identifier = device_identifier.trim();
        if identifier.is_empty() {
            return Err(AppError::Validation("device_identifier cannot be empty".into()));
        }

        let existing = Entity::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .filter(Column::DeviceIdentifier.eq(identifier))
            .one(db)
            .await?;

        let now = Utc::now();
        let result = match existing {
            Some(device) => {
                let mut active: ActiveModel = device.into();
                if label.is_some() {
                    active.label = Set(label);
                }
                if platform.is_some() {
                    active.platform = Set(platform);
                }
                active.active = Set(true);
                active.updated_at = Set(now);
                active.update(db).await
            }
            None => {
                ActiveModel {
                    instructor_id: Set(instructor_id),
                    device_identifier: Set(identifier.to_owned()),
                    label: Set(label),
                    platform: Set(platform),
                    active: Set(true),
                    latitude: Set(None),
                    longitude: Set(None),
                    accuracy_m: Set(None),
                    fix_at: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await
            }
        };
        result.map_err(|e| AppError::from_db_with_conflict(e, "Device is already registered"))
    }

    pub async fn find(db: &DatabaseConnection, id: i64) -> AppResult<Self> {
        Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Device", id))
    }

    pub async fn list_for_instructor(
        db: &DatabaseConnection,
        instructor_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        changes: DeviceChanges,
    ) -> AppResult<Self> {
        let mut active: ActiveModel = Self::find(db, id).await?.into();
        if let Some(label) = changes.label {
            active.label = Set(Some(label));
        }
        if let Some(platform) = changes.platform {
            active.platform = Set(Some(platform));
        }
        if let Some(flag) = changes.active {
            active.active = Set(flag);
        }
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }

    pub async fn record_fix(db: &DatabaseConnection, id: i64, fix: LocationFix) -> AppResult<Self> {
        validate_coordinates(fix.latitude, fix.longitude)?;
        if fix.accuracy_m.is_some_and(|a| a < 0.0) {
            return Err(AppError::Validation("accuracy_m cannot be negative".into()));
        }

        let mut active: ActiveModel = Self::find(db, id).await?.into();
        let now = Utc::now();
        active.latitude = Set(Some(fix.latitude));
        active.longitude = Set(Some(fix.longitude));
        active.accuracy_m = Set(fix.accuracy_m);
        active.fix_at = Set(Some(fix.fix_at.unwrap_or(now)));
        active.updated_at = Set(now);
        Ok(active.update(db).await?)
    }

    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> AppResult<()> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("Device", id));
        }
        Ok(())
    }

    /// Newest fix across the instructor's active devices.
    pub async fn latest_location(
        db: &DatabaseConnection,
        instructor_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .filter(Column::Active.eq(true))
            .filter(Column::FixAt.is_not_null())
            .order_by_desc(Column::FixAt)
            .one(db)
            .await
    }
}
