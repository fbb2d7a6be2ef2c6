use chrono::Weekday;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{AppError, AppResult};

/// One weekly time slot of a class.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "class_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    /// Comma-separated weekday abbreviations, e.g. `Mon,Wed,Fri`.
    pub days: String,
    /// `HH:MM` on a 12-hour clock.
    pub start_time: String,
    pub end_time: String,
    pub meridiem: Meridiem,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
#[strum(ascii_case_insensitive)]
pub enum Meridiem {
    #[sea_orm(string_value = "AM")]
    AM,
    #[sea_orm(string_value = "PM")]
    PM,
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

/// Incoming slot definition before it is attached to a class.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SlotInput {
    pub days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub meridiem: Meridiem,
}

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Mon"),
    (Weekday::Tue, "Tue"),
    (Weekday::Wed, "Wed"),
    (Weekday::Thu, "Thu"),
    (Weekday::Fri, "Fri"),
    (Weekday::Sat, "Sat"),
    (Weekday::Sun, "Sun"),
];

/// Accepts `Mon`, `monday`, `MON` ...; returns the canonical abbreviation.
fn canonical_day(raw: &str) -> Option<&'static str> {
    let day: Weekday = raw.trim().parse().ok()?;
    WEEKDAYS.iter().find(|(d, _)| *d == day).map(|(_, s)| *s)
}

fn valid_clock(raw: &str) -> bool {
    let Some((h, m)) = raw.split_once(':') else {
        return false;
    };
    m.len() == 2
        && matches!(
            (h.parse::<u8>(), m.parse::<u8>()),
            (Ok(h), Ok(m)) if (1..=12).contains(&h) && m < 60
        )
}

impl SlotInput {
    /// Normalizes the day set (deduplicated, week order) and checks both clock values.
    pub fn normalize(&self) -> AppResult<(String, String, String)> {
        let mut days: Vec<&'static str> = Vec::new();
        for raw in &self.days {
            let day = canonical_day(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown weekday '{raw}'")))?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        if days.is_empty() {
            return Err(AppError::Validation("A schedule slot needs at least one day".into()));
        }
        days.sort_by_key(|d| WEEKDAYS.iter().position(|(_, s)| s == d));

        for t in [&self.start_time, &self.end_time] {
            if !valid_clock(t) {
                return Err(AppError::Validation(format!(
                    "Invalid time '{t}', expected HH:MM on a 12-hour clock"
                )));
            }
        }
        Ok((days.join(","), self.start_time.clone(), self.end_time.clone()))
    }
}

impl Model {
    /// Parsed weekday set.
    pub fn weekdays(&self) -> Vec<Weekday> {
        self.days.split(',').filter_map(|d| d.trim().parse().ok()).collect()
    }

    pub async fn for_class<C: ConnectionTrait>(db: &C, class_id: i64) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Replaces every slot of `class_id` with `slots`.
    pub async fn replace_for_class<C: ConnectionTrait>(
        db: &C,
        class_id: i64,
        slots: &[SlotInput],
    ) -> AppResult<Vec<Self>> {
        let normalized = slots
            .iter()
            .map(SlotInput::normalize)
            .collect::<AppResult<Vec<_>>>()?;

        Entity::delete_many()
            .filter(Column::ClassId.eq(class_id))
            .exec(db)
            .await?;

        let mut out = Vec::with_capacity(normalized.len());
        for ((days, start, end), slot) in normalized.into_iter().zip(slots) {
            let row = ActiveModel {
                class_id: Set(class_id),
                days: Set(days),
                start_time: Set(start),
                end_time: Set(end),
                meridiem: Set(slot.meridiem),
                ..Default::default()
            }
            .insert(db)
            .await?;
            out.push(row);
        }
        Ok(out)
    }
}
