use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, PaginatorTrait, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::AppResult;

/// Append-only audit row for a login or logout.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "session_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    /// Shared by a login row and the logout row that closes it.
    pub session_id: String,
    pub event: SessionEvent,
    pub status: SessionStatus,
    pub occurred_at: DateTime<Utc>,
    pub duration_seconds: Option<i64>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SessionEvent {
    #[sea_orm(string_value = "login")]
    Login,
    #[sea_orm(string_value = "logout")]
    Logout,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SessionStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Closed by the stale-session sweep rather than a logout.
    #[sea_orm(string_value = "terminated")]
    Terminated,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Where a request came from.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub user_id: Option<i64>,
    pub event: Option<SessionEvent>,
    pub status: Option<SessionStatus>,
}

/// A login joined with the logout that closed it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPair {
    pub session_id: String,
    pub user_id: i64,
    pub login_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub status: SessionStatus,
}

impl Model {
    /// Opens a session: writes an `active` login row under a fresh session id.
    pub async fn login(
        db: &DatabaseConnection,
        user_id: i64,
        client: ClientInfo,
    ) -> AppResult<Self> {
        Ok(ActiveModel {
            user_id: Set(user_id),
            session_id: Set(Uuid::new_v4().to_string()),
            event: Set(SessionEvent::Login),
            status: Set(SessionStatus::Active),
            occurred_at: Set(Utc::now()),
            duration_seconds: Set(None),
            ip_address: Set(client.ip_address),
            user_agent: Set(client.user_agent),
            ..Default::default()
        }
        .insert(db)
        .await?)
    }

    /// Closes the user's session. Prefers the login matching `session_id`, falling back to
    /// the most recent active login; with none, writes a standalone completed logout.
    pub async fn logout(
        db: &DatabaseConnection,
        user_id: i64,
        session_id: Option<&str>,
        client: ClientInfo,
    ) -> AppResult<Self> {
        let txn = db.begin().await?;
        let active_logins = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Event.eq(SessionEvent::Login))
            .filter(Column::Status.eq(SessionStatus::Active))
            .order_by_desc(Column::OccurredAt)
            .order_by_desc(Column::Id);

        let mut login = match session_id {
            Some(sid) => active_logins
                .clone()
                .filter(Column::SessionId.eq(sid))
                .one(&txn)
                .await?,
            None => None,
        };
        if login.is_none() {
            login = active_logins.one(&txn).await?;
        }

        let now = Utc::now();
        let (sid, duration) = match login {
            Some(login) => {
                let duration = (now - login.occurred_at).num_seconds().max(0);
                let sid = login.session_id.clone();
                let mut active: ActiveModel = login.into();
                active.status = Set(SessionStatus::Completed);
                active.update(&txn).await?;
                (sid, Some(duration))
            }
            None => (Uuid::new_v4().to_string(), None),
        };

        let row = ActiveModel {
            user_id: Set(user_id),
            session_id: Set(sid),
            event: Set(SessionEvent::Logout),
            status: Set(SessionStatus::Completed),
            occurred_at: Set(now),
            duration_seconds: Set(duration),
            ip_address: Set(client.ip_address),
            user_agent: Set(client.user_agent),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(row)
    }

    /// Marks every login still active after `threshold_hours` as terminated. Returns how many.
    pub async fn sweep_stale(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        threshold_hours: i64,
    ) -> AppResult<u64> {
        let cutoff = now - Duration::hours(threshold_hours);
        let txn = db.begin().await?;
        let stale = Entity::find()
            .filter(Column::Event.eq(SessionEvent::Login))
            .filter(Column::Status.eq(SessionStatus::Active))
            .filter(Column::OccurredAt.lt(cutoff))
            .all(&txn)
            .await?;

        let count = stale.len() as u64;
        for login in stale {
            let duration = (now - login.occurred_at).num_seconds().max(0);
            let mut active: ActiveModel = login.into();
            active.status = Set(SessionStatus::Terminated);
            active.duration_seconds = Set(Some(duration));
            active.update(&txn).await?;
        }
        txn.commit().await?;
        Ok(count)
    }

    /// Raw rows, newest first.
    pub async fn list(
        db: &DatabaseConnection,
        filter: &LogFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Self>, u64), DbErr> {
        let mut sel = Entity::find();
        if let Some(user_id) = filter.user_id {
            sel = sel.filter(Column::UserId.eq(user_id));
        }
        if let Some(event) = filter.event {
            sel = sel.filter(Column::Event.eq(event));
        }
        if let Some(status) = filter.status {
            sel = sel.filter(Column::Status.eq(status));
        }
        let paginator = sel
            .order_by_desc(Column::OccurredAt)
            .order_by_desc(Column::Id)
            .paginate(db, per_page.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }

    /// Login rows joined with their logout rows by session id, newest login first.
    pub async fn sessions(
        db: &DatabaseConnection,
        user_id: Option<i64>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<SessionPair>, u64), DbErr> {
        let mut logins = Entity::find().filter(Column::Event.eq(SessionEvent::Login));
        if let Some(user_id) = user_id {
            logins = logins.filter(Column::UserId.eq(user_id));
        }
        let paginator = logins
            .order_by_desc(Column::OccurredAt)
            .order_by_desc(Column::Id)
            .paginate(db, per_page.max(1));
        let total = paginator.num_items().await?;
        let logins = paginator.fetch_page(page.saturating_sub(1)).await?;

        let ids: Vec<String> = logins.iter().map(|l| l.session_id.clone()).collect();
        let logouts = if ids.is_empty() {
            Vec::new()
        } else {
            Entity::find()
                .filter(Column::Event.eq(SessionEvent::Logout))
                .filter(Column::SessionId.is_in(ids))
                .all(db)
                .await?
        };

        let pairs = logins
            .into_iter()
            .map(|login| {
                let logout = logouts.iter().find(|l| l.session_id == login.session_id);
                SessionPair {
                    duration_seconds: logout
                        .and_then(|l| l.duration_seconds)
                        .or(login.duration_seconds),
                    logout_at: logout.map(|l| l.occurred_at),
                    session_id: login.session_id,
                    user_id: login.user_id,
                    login_at: login.occurred_at,
                    status: login.status,
                }
            })
            .collect();
        Ok((pairs, total))
    }

    /// Deletes every row, or only rows that occurred before `before`.
    pub async fn clear(db: &DatabaseConnection, before: Option<DateTime<Utc>>) -> AppResult<u64> {
        let mut del = Entity::delete_many();
        if let Some(before) = before {
            del = del.filter(Column::OccurredAt.lt(before));
        }
        Ok(del.exec(db).await?.rows_affected)
    }
}
