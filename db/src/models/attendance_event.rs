use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use util::dates::day_of;

use super::student::{self, Counters};
use super::{class, class_enrollment};
use crate::error::{AppError, AppResult};

/// One student's attendance mark for one class on one calendar day.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
    /// UTC calendar day of `recorded_at`.
    pub day: NaiveDate,
    pub status: AttendanceStatus,
    pub method: Method,
    pub device_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "late")]
    Late,
}

/// How the mark was captured.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Method {
    #[sea_orm(string_value = "scan")]
    Scan,
    #[sea_orm(string_value = "manual")]
    Manual,
    #[sea_orm(string_value = "location")]
    Location,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct RecordInput {
    pub class_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub method: Method,
    pub recorded_at: DateTime<Utc>,
    pub device_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RecordInput {
    pub fn now(class_id: i64, student_id: i64, status: AttendanceStatus, method: Method) -> Self {
        Self {
            class_id,
            student_id,
            status,
            method,
            recorded_at: Utc::now(),
            device_id: None,
            latitude: None,
            longitude: None,
        }
    }
}

/// Count of events per status for one class and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tally {
    pub present: u64,
    pub absent: u64,
    pub late: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recorded {
    pub event: Model,
    pub tally: Tally,
    pub counters: Counters,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkOutcome {
    pub student_id: i64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
    pub day: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

const DUPLICATE_EVENT: &str = "Attendance for this student was already recorded for this day";

impl Model {
    /// Inserts a fresh event. A row already holding (class, student, day) is a `Conflict`.
    async fn insert_new<C: ConnectionTrait>(
        db: &C,
        input: &RecordInput,
        day: NaiveDate,
    ) -> AppResult<Self> {
        let now = Utc::now();
        ActiveModel {
            class_id: Set(input.class_id),
            student_id: Set(input.student_id),
            day: Set(day),
            status: Set(input.status),
            method: Set(input.method),
            device_id: Set(input.device_id.clone()),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            recorded_at: Set(input.recorded_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_db_with_conflict(e, DUPLICATE_EVENT))
    }

    /// Upserts the event for (class, student, day) and keeps the student's counters in step.
    pub async fn record(db: &DatabaseConnection, input: RecordInput) -> AppResult<Recorded> {
        match (input.latitude, input.longitude) {
            (Some(lat), Some(lon)) => validate_coordinates(lat, lon)?,
            (None, None) => {}
            _ => {
                return Err(AppError::Validation(
                    "latitude and longitude must be given together".into(),
                ));
            }
        }
        let day = day_of(input.recorded_at);

        let txn = db.begin().await?;
        if class::Entity::find_by_id(input.class_id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("Class", input.class_id));
        }
        if !class_enrollment::Model::is_enrolled(&txn, input.class_id, input.student_id).await? {
            return Err(AppError::NotEnrolled {
                class_id: input.class_id,
                student_id: input.student_id,
            });
        }

        let existing = Entity::find()
            .filter(Column::ClassId.eq(input.class_id))
            .filter(Column::StudentId.eq(input.student_id))
            .filter(Column::Day.eq(day))
            .one(&txn)
            .await?;

        let (event, previous) = match existing {
            Some(current) => {
                let previous = current.status;
                let mut active: ActiveModel = current.into();
                active.status = Set(input.status);
                active.method = Set(input.method);
                active.recorded_at = Set(input.recorded_at);
                active.device_id = Set(input.device_id);
                active.latitude = Set(input.latitude);
                active.longitude = Set(input.longitude);
                active.updated_at = Set(Utc::now());
                (active.update(&txn).await?, Some(previous))
            }
            None => (Self::insert_new(&txn, &input, day).await?, None),
        };

        let student =
            student::Model::adjust_counters(&txn, input.student_id, previous, Some(input.status))
                .await?;
        txn.commit().await?;

        let tally = Self::day_tally(db, event.class_id, event.day).await?;
        Ok(Recorded {
            event,
            tally,
            counters: student.counters(),
        })
    }

    /// Applies each entry independently; one failure does not undo the others.
    pub async fn record_bulk(
        db: &DatabaseConnection,
        class_id: i64,
        recorded_at: DateTime<Utc>,
        entries: Vec<BulkEntry>,
    ) -> Vec<BulkOutcome> {
        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            let input = RecordInput {
                recorded_at,
                ..RecordInput::now(class_id, entry.student_id, entry.status, Method::Manual)
            };
            outcomes.push(match Self::record(db, input).await {
                Ok(rec) => BulkOutcome {
                    student_id: entry.student_id,
                    ok: true,
                    event: Some(rec.event),
                    error: None,
                },
                Err(e) => BulkOutcome {
                    student_id: entry.student_id,
                    ok: false,
                    event: None,
                    error: Some(e.to_string()),
                },
            });
        }
        outcomes
    }

    /// Recomputed from the stored events, not from counters.
    pub async fn day_tally<C: ConnectionTrait>(
        db: &C,
        class_id: i64,
        day: NaiveDate,
    ) -> Result<Tally, DbErr> {
        let events = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Day.eq(day))
            .all(db)
            .await?;

        let mut tally = Tally::default();
        for e in events {
            match e.status {
                AttendanceStatus::Present => tally.present += 1,
                AttendanceStatus::Absent => tally.absent += 1,
                AttendanceStatus::Late => tally.late += 1,
            }
        }
        Ok(tally)
    }

    /// Newest day first, then by student.
    pub async fn query(
        db: &DatabaseConnection,
        filter: &EventFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Self>, u64), DbErr> {
        let mut sel = Entity::find();
        if let Some(id) = filter.class_id {
            sel = sel.filter(Column::ClassId.eq(id));
        }
        if let Some(id) = filter.student_id {
            sel = sel.filter(Column::StudentId.eq(id));
        }
        if let Some(day) = filter.day {
            sel = sel.filter(Column::Day.eq(day));
        }
        if let Some(from) = filter.from {
            sel = sel.filter(Column::Day.gte(from));
        }
        if let Some(to) = filter.to {
            sel = sel.filter(Column::Day.lte(to));
        }
        if let Some(status) = filter.status {
            sel = sel.filter(Column::Status.eq(status));
        }

        let paginator = sel
            .order_by_desc(Column::Day)
            .order_by_asc(Column::StudentId)
            .paginate(db, per_page.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }

    pub async fn find_in_class<C: ConnectionTrait>(
        db: &C,
        class_id: i64,
        event_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(event_id)
            .filter(Column::ClassId.eq(class_id))
            .one(db)
            .await
    }

    /// Deletes one event and takes it back out of the student's counters.
    pub async fn delete_in_class(
        db: &DatabaseConnection,
        class_id: i64,
        event_id: i64,
    ) -> AppResult<Counters> {
        let txn = db.begin().await?;
        let event = Self::find_in_class(&txn, class_id, event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Attendance event", event_id))?;
        Entity::delete_by_id(event.id).exec(&txn).await?;
        let student =
            student::Model::adjust_counters(&txn, event.student_id, Some(event.status), None)
                .await?;
        txn.commit().await?;
        Ok(student.counters())
    }
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> AppResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::Validation(
            "latitude must be between -90 and 90".into(),
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::Validation(
            "longitude must be between -180 and 180".into(),
        ));
    }
    Ok(())
}
