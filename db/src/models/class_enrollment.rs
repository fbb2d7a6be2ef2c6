use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::Serialize;

use super::{attendance_event, class, student};
use crate::error::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "class_enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,
    pub enrolled_at: DateTime<Utc>,
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

pub const ALREADY_ENROLLED: &str = "Student is already enrolled in this class";

impl Model {
    pub async fn is_enrolled<C: ConnectionTrait>(
        db: &C,
        class_id: i64,
        student_id: i64,
    ) -> Result<bool, DbErr> {
        Ok(Entity::find_by_id((class_id, student_id))
            .one(db)
            .await?
            .is_some())
    }

    /// Enrolls the student identified by `student_number`, creating the record when
    /// `name` is given and no student has that number yet.
    pub async fn enroll(
        db: &DatabaseConnection,
        class_id: i64,
        student_number: &str,
        name: Option<&str>,
    ) -> AppResult<(student::Model, Self)> {
        let txn = db.begin().await?;
        if class::Entity::find_by_id(class_id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("Class", class_id));
        }

        let student = match student::Model::find_by_number(&txn, student_number).await? {
            Some(s) => s,
            None => match name {
                Some(name) => student::Model::create(&txn, student_number, name).await?,
                None => {
                    return Err(AppError::not_found("Student", student_number.trim()));
                }
            },
        };

        if Self::is_enrolled(&txn, class_id, student.id).await? {
            return Err(AppError::Conflict(ALREADY_ENROLLED.into()));
        }

        let enrollment = ActiveModel {
            class_id: Set(class_id),
            student_id: Set(student.id),
            enrolled_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_db_with_conflict(e, ALREADY_ENROLLED))?;
        txn.commit().await?;

        Ok((student, enrollment))
    }

    /// Drops the enrollment and the student's events in this class only.
    pub async fn remove(db: &DatabaseConnection, class_id: i64, student_id: i64) -> AppResult<()> {
        let txn = db.begin().await?;
        if !Self::is_enrolled(&txn, class_id, student_id).await? {
            return Err(AppError::NotEnrolled {
                class_id,
                student_id,
            });
        }

        let events = attendance_event::Entity::find()
            .filter(attendance_event::Column::ClassId.eq(class_id))
            .filter(attendance_event::Column::StudentId.eq(student_id))
            .all(&txn)
            .await?;
        for event in &events {
            student::Model::adjust_counters(&txn, student_id, Some(event.status), None).await?;
        }
        attendance_event::Entity::delete_many()
            .filter(attendance_event::Column::ClassId.eq(class_id))
            .filter(attendance_event::Column::StudentId.eq(student_id))
            .exec(&txn)
            .await?;
        Entity::delete_by_id((class_id, student_id)).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Enrolled students ordered by student number.
    pub async fn roster<C: ConnectionTrait>(
        db: &C,
        class_id: i64,
    ) -> Result<Vec<student::Model>, DbErr> {
        student::Entity::find()
            .inner_join(Entity)
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(student::Column::StudentNumber)
            .all(db)
            .await
    }

    pub async fn class_ids_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::ClassId)
            .filter(Column::StudentId.eq(student_id))
            .into_tuple()
            .all(db)
            .await
    }
}
