use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use super::attendance_event::{self, AttendanceStatus};
use super::{class, class_enrollment};
use crate::error::{AppError, AppResult};

/// Saved roster snapshot for one class and day. Not kept in sync with later edits.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub day: NaiveDate,
    pub generated_by: i64,
    pub present: i32,
    pub absent: i32,
    pub late: i32,
    pub unmarked: i32,
    pub entries: Json,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Present,
    Absent,
    Late,
    Unmarked,
}

impl From<AttendanceStatus> for EntryStatus {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => EntryStatus::Present,
            AttendanceStatus::Absent => EntryStatus::Absent,
            AttendanceStatus::Late => EntryStatus::Late,
        }
    }
}

/// One roster line in a report.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportEntry {
    pub student_id: i64,
    pub student_number: String,
    pub name: String,
    pub status: EntryStatus,
}

impl Model {
    /// Roster for `day` from live data; students without an event are `unmarked`.
    pub async fn build_entries(
        db: &DatabaseConnection,
        class_id: i64,
        day: NaiveDate,
    ) -> Result<Vec<ReportEntry>, DbErr> {
        let roster = class_enrollment::Model::roster(db, class_id).await?;
        let events = attendance_event::Entity::find()
            .filter(attendance_event::Column::ClassId.eq(class_id))
            .filter(attendance_event::Column::Day.eq(day))
            .all(db)
            .await?;

        Ok(roster
            .into_iter()
            .map(|s| ReportEntry {
                status: events
                    .iter()
                    .find(|e| e.student_id == s.id)
                    .map(|e| e.status.into())
                    .unwrap_or(EntryStatus::Unmarked),
                student_id: s.id,
                student_number: s.student_number,
                name: s.name,
            })
            .collect())
    }

    /// Saves a snapshot. `entries` overrides the live roster when given.
    pub async fn save(
        db: &DatabaseConnection,
        class_id: i64,
        day: NaiveDate,
        generated_by: i64,
        entries: Option<Vec<ReportEntry>>,
    ) -> AppResult<Self> {
        if class::Entity::find_by_id(class_id).one(db).await?.is_none() {
            return Err(AppError::not_found("Class", class_id));
        }
        let entries = match entries {
            Some(entries) => entries,
            None => Self::build_entries(db, class_id, day).await?,
        };

        let count =
            |status: EntryStatus| entries.iter().filter(|e| e.status == status).count() as i32;
        let json = serde_json::to_value(&entries)
            .map_err(|e| AppError::Validation(format!("invalid report entries: {e}")))?;

        Ok(ActiveModel {
            class_id: Set(class_id),
            day: Set(day),
            generated_by: Set(generated_by),
            present: Set(count(EntryStatus::Present)),
            absent: Set(count(EntryStatus::Absent)),
            late: Set(count(EntryStatus::Late)),
            unmarked: Set(count(EntryStatus::Unmarked)),
            entries: Set(json),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?)
    }

    pub async fn list_for_class(
        db: &DatabaseConnection,
        class_id: i64,
        day: Option<NaiveDate>,
    ) -> Result<Vec<Self>, DbErr> {
        let mut sel = Entity::find().filter(Column::ClassId.eq(class_id));
        if let Some(day) = day {
            sel = sel.filter(Column::Day.eq(day));
        }
        sel.order_by_desc(Column::Day)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_in_class(
        db: &DatabaseConnection,
        class_id: i64,
        report_id: i64,
    ) -> AppResult<Self> {
        Entity::find_by_id(report_id)
            .filter(Column::ClassId.eq(class_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Report", report_id))
    }

    pub async fn delete_in_class(
        db: &DatabaseConnection,
        class_id: i64,
        report_id: i64,
    ) -> AppResult<()> {
        let res = Entity::delete_many()
            .filter(Column::Id.eq(report_id))
            .filter(Column::ClassId.eq(class_id))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("Report", report_id));
        }
        Ok(())
    }
}
