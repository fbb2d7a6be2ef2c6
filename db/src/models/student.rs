use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, Condition, ConnectionTrait, DatabaseConnection, PaginatorTrait, QueryOrder,
    Set, TransactionTrait,
};
use serde::Serialize;

use super::attendance_event::{self, AttendanceStatus};
use super::class_enrollment;
use super::user::{self, Role};
use crate::error::{AppError, AppResult};

/// A student record. May exist without a login account (`user_id` is null).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_number: String,
    pub name: String,
    pub user_id: Option<i64>,
    pub present_count: i32,
    pub absent_count: i32,
    pub late_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::class_enrollment::Entity")]
    Enrollments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::class_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Running per-status totals stored on the student row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counters {
    pub present: i32,
    pub absent: i32,
    pub late: i32,
}

const DUPLICATE_STUDENT: &str = "A student with this student number already exists";

impl Model {
    pub fn counters(&self) -> Counters {
        Counters {
            present: self.present_count,
            absent: self.absent_count,
            late: self.late_count,
        }
    }

    fn validate_number(student_number: &str) -> AppResult<String> {
        let number = student_number.trim();
        user::Model::validate_username(Role::Student, number)?;
        Ok(number.to_owned())
    }

    /// Student account whose username equals `student_number`, if any.
    async fn linked_user<C: ConnectionTrait>(
        db: &C,
        student_number: &str,
    ) -> Result<Option<i64>, DbErr> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(student_number))
            .filter(user::Column::Role.eq(Role::Student))
            .one(db)
            .await?
            .map(|u| u.id))
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        student_number: &str,
        name: &str,
    ) -> AppResult<Self> {
        let number = Self::validate_number(student_number)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".into()));
        }

        let now = Utc::now();
        ActiveModel {
            user_id: Set(Self::linked_user(db, &number).await?),
            student_number: Set(number),
            name: Set(name.to_owned()),
            present_count: Set(0),
            absent_count: Set(0),
            late_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_db_with_conflict(e, DUPLICATE_STUDENT))
    }

    pub async fn find_by_number<C: ConnectionTrait>(
        db: &C,
        student_number: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::StudentNumber.eq(student_number.trim()))
            .one(db)
            .await
    }

    /// Student record backing a login account.
    pub async fn find_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        student_number: Option<String>,
        name: Option<String>,
    ) -> AppResult<Self> {
        let existing = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Student", id))?;

        let mut active: ActiveModel = existing.into();
        if let Some(number) = student_number {
            let number = Self::validate_number(&number)?;
            active.user_id = Set(Self::linked_user(db, &number).await?);
            active.student_number = Set(number);
        }
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name cannot be empty".into()));
            }
            active.name = Set(name.trim().to_owned());
        }
        active.updated_at = Set(Utc::now());

        active
            .update(db)
            .await
            .map_err(|e| AppError::from_db_with_conflict(e, DUPLICATE_STUDENT))
    }

    /// Removes the student with every enrollment and attendance event.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> AppResult<()> {
        let txn = db.begin().await?;
        if Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("Student", id));
        }
        attendance_event::Entity::delete_many()
            .filter(attendance_event::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        class_enrollment::Entity::delete_many()
            .filter(class_enrollment::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn list(
        db: &DatabaseConnection,
        query: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Self>, u64), DbErr> {
        let mut sel = Entity::find();
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            sel = sel.filter(
                Condition::any()
                    .add(Column::StudentNumber.contains(q))
                    .add(Column::Name.contains(q)),
            );
        }
        let paginator = sel
            .order_by_asc(Column::StudentNumber)
            .paginate(db, per_page.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }

    /// Moves one unit from `old` to `new`. Either side may be absent; counts never drop below zero.
    pub async fn adjust_counters<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        old: Option<AttendanceStatus>,
        new: Option<AttendanceStatus>,
    ) -> AppResult<Self> {
        let student = Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Student", student_id))?;
        if old == new {
            return Ok(student);
        }

        let mut counters = student.counters();
        fn slot(c: &mut Counters, status: AttendanceStatus) -> &mut i32 {
            match status {
                AttendanceStatus::Present => &mut c.present,
                AttendanceStatus::Absent => &mut c.absent,
                AttendanceStatus::Late => &mut c.late,
            }
        }
        if let Some(old) = old {
            let n = slot(&mut counters, old);
            *n = (*n - 1).max(0);
        }
        if let Some(new) = new {
            *slot(&mut counters, new) += 1;
        }
        tracing::debug!(student_id, ?old, ?new, "adjusting attendance counters");

        let mut active: ActiveModel = student.into();
        active.present_count = Set(counters.present);
        active.absent_count = Set(counters.absent);
        active.late_count = Set(counters.late);
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }
}
