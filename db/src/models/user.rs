use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use regex::Regex;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::student;
use crate::error::{AppError, AppResult};

const DUPLICATE_USER: &str = "A user with this ID or email already exists";

/// Represents an account in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External-facing ID; its format depends on `role`.
    pub username: String,
    pub display_name: String,
    /// User's unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Account role. Stored as lowercase text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,

    #[sea_orm(string_value = "instructor")]
    Instructor,

    #[sea_orm(string_value = "student")]
    Student,
}

static ADMIN_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ADM-\d{4}$").expect("admin id regex"));
static INSTRUCTOR_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^INS-\d{4}$").expect("instructor id regex"));
static STUDENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{5}$").expect("student id regex"));

impl Role {
    /// Human-readable example of the ID format required for this role.
    pub fn id_format(&self) -> &'static str {
        match self {
            Role::Admin => "ADM-0001",
            Role::Instructor => "INS-0001",
            Role::Student => "2024-00001",
        }
    }

    /// Whether `username` matches the ID format for this role.
    pub fn accepts_id(&self, username: &str) -> bool {
        match self {
            Role::Admin => ADMIN_ID.is_match(username),
            Role::Instructor => INSTRUCTOR_ID.is_match(username),
            Role::Student => STUDENT_ID.is_match(username),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Partial update for an account; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl Model {
    /// Rejects a username that does not match the role's ID format.
    pub fn validate_username(role: Role, username: &str) -> AppResult<()> {
        if role.accepts_id(username) {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "{} IDs must look like {}",
                role,
                role.id_format()
            )))
        }
    }

    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        display_name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<Self> {
        let username = username.trim();
        Self::validate_username(role, username)?;
        if display_name.trim().is_empty() {
            return Err(AppError::Validation("display_name cannot be empty".into()));
        }

        let now = Utc::now();
        let active = ActiveModel {
            username: Set(username.to_owned()),
            display_name: Set(display_name.trim().to_owned()),
            email: Set(email.trim().to_lowercase()),
            password_hash: Set(Self::hash_password(password)?),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = db.begin().await?;
        let user = active
            .insert(&txn)
            .await
            .map_err(|e| AppError::from_db_with_conflict(e, DUPLICATE_USER))?;
        Self::link_student_record(&txn, &user).await?;
        txn.commit().await?;
        Ok(user)
    }

    /// Points the student record numbered like a student account's username at that
    /// account. Links left over from a previous username or role are cleared.
    async fn link_student_record<C: ConnectionTrait>(db: &C, user: &Self) -> Result<(), DbErr> {
        student::Entity::update_many()
            .col_expr(student::Column::UserId, Expr::value(Option::<i64>::None))
            .filter(student::Column::UserId.eq(user.id))
            .exec(db)
            .await?;
        if user.role == Role::Student {
            student::Entity::update_many()
                .col_expr(student::Column::UserId, Expr::value(user.id))
                .filter(student::Column::StudentNumber.eq(user.username.as_str()))
                .exec(db)
                .await?;
        }
        Ok(())
    }

    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username.trim()))
            .one(db)
            .await
    }

    /// Returns the account when `username`/`password` match, `None` otherwise.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<Option<Self>, DbErr> {
        Ok(Self::find_by_username(db, username)
            .await?
            .filter(|user| user.verify_password(password)))
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        if password.len() < 8 {
            return Err(AppError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        changes: UserChanges,
    ) -> AppResult<Self> {
        let existing = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))?;

        let role = changes.role.unwrap_or(existing.role);
        let username = changes
            .username
            .as_deref()
            .map(str::trim)
            .unwrap_or(&existing.username)
            .to_owned();
        // Changing either the role or the ID must leave a consistent pair.
        Self::validate_username(role, &username)?;

        let mut active: ActiveModel = existing.into();
        active.username = Set(username);
        active.role = Set(role);
        if let Some(name) = changes.display_name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("display_name cannot be empty".into()));
            }
            active.display_name = Set(name.trim().to_owned());
        }
        if let Some(email) = changes.email {
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(password) = changes.password {
            active.password_hash = Set(Self::hash_password(&password)?);
        }
        active.updated_at = Set(Utc::now());

        let txn = db.begin().await?;
        let user = active
            .update(&txn)
            .await
            .map_err(|e| AppError::from_db_with_conflict(e, DUPLICATE_USER))?;
        Self::link_student_record(&txn, &user).await?;
        txn.commit().await?;
        Ok(user)
    }

    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> AppResult<()> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("User", id));
        }
        Ok(())
    }

    /// Paginated listing, newest first. `query` matches username, name or email.
    pub async fn list(
        db: &DatabaseConnection,
        role: Option<Role>,
        query: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Self>, u64), DbErr> {
        let mut sel = Entity::find();
        if let Some(role) = role {
            sel = sel.filter(Column::Role.eq(role));
        }
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            sel = sel.filter(
                Condition::any()
                    .add(Column::Username.contains(q))
                    .add(Column::DisplayName.contains(q))
                    .add(Column::Email.contains(q)),
            );
        }
        let paginator = sel.order_by_desc(Column::Id).paginate(db, per_page.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }
}
