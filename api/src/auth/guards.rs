use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use db::models::{
    attendance_event, class, device, report, student,
    user::{self, Role},
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use std::collections::HashMap;
use util::state::AppState;

type GuardError = (StatusCode, Json<ApiResponse<Empty>>);

fn deny(status: StatusCode, message: impl Into<String>) -> GuardError {
    (status, Json(ApiResponse::error(message)))
}

fn db_failure(e: DbErr) -> GuardError {
    tracing::warn!(error = %e, "DB error while checking access; denying");
    deny(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Database error: {e}"),
    )
}

/// Helper to extract and validate the user, then insert it back into the request.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| deny(StatusCode::UNAUTHORIZED, "Authentication required"))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

async fn allow_roles(
    req: Request<Body>,
    next: Next,
    roles: &[Role],
    failure_msg: &str,
) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;
    if !roles.contains(&user.role()) {
        return Err(deny(StatusCode::FORBIDDEN, failure_msg));
    }
    Ok(next.run(req).await)
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    allow_roles(req, next, &[Role::Admin], "Admin access required").await
}

/// Admins and instructors.
pub async fn allow_staff(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    allow_roles(
        req,
        next,
        &[Role::Admin, Role::Instructor],
        "Admin or instructor access required",
    )
    .await
}

pub async fn allow_instructor(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    allow_roles(req, next, &[Role::Instructor], "Instructor access required").await
}

pub async fn allow_student(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    allow_roles(req, next, &[Role::Student], "Student access required").await
}

fn param_id(params: &HashMap<String, String>, key: &str) -> Result<i64, GuardError> {
    params
        .get(key)
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| deny(StatusCode::BAD_REQUEST, format!("Missing or invalid {key}")))
}

async fn load_class(db: &DatabaseConnection, class_id: i64) -> Result<class::Model, GuardError> {
    class::Entity::find_by_id(class_id)
        .one(db)
        .await
        .map_err(db_failure)?
        .ok_or_else(|| deny(StatusCode::NOT_FOUND, format!("Class {class_id} not found")))
}

/// Admin or the instructor who owns `{class_id}`.
pub async fn allow_class_staff(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;
    let class = load_class(app_state.db(), param_id(&params, "class_id")?).await?;

    if class.is_staff(user.id(), user.role()) {
        Ok(next.run(req).await)
    } else {
        Err(deny(
            StatusCode::FORBIDDEN,
            "Only the class instructor or an admin can do this",
        ))
    }
}

/// Class staff, or a student enrolled in `{class_id}`.
pub async fn allow_class_member(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let db = app_state.db();
    let (req, user) = extract_and_insert_authuser(req).await?;
    let class = load_class(db, param_id(&params, "class_id")?).await?;

    match class.is_member(db, user.id(), user.role()).await {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err(deny(
            StatusCode::FORBIDDEN,
            "You are not a member of this class",
        )),
        Err(e) => Err(db_failure(e)),
    }
}

/// Admin, or the instructor who registered `{device_id}`.
pub async fn allow_device_owner(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;
    let device_id = param_id(&params, "device_id")?;

    if user.is_admin() {
        return Ok(next.run(req).await);
    }
    let device = device::Entity::find_by_id(device_id)
        .one(app_state.db())
        .await
        .map_err(db_failure)?
        .ok_or_else(|| deny(StatusCode::NOT_FOUND, format!("Device {device_id} not found")))?;

    if device.instructor_id == user.id() {
        Ok(next.run(req).await)
    } else {
        Err(deny(StatusCode::FORBIDDEN, "You do not own this device"))
    }
}

// --- Path id validation ---

async fn check_exists<E>(db: &DatabaseConnection, id: i64, label: &str) -> Result<(), GuardError>
where
    E: EntityTrait,
    <E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType: From<i64>,
{
    match E::find_by_id(id).one(db).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(deny(StatusCode::NOT_FOUND, format!("{label} {id} not found"))),
        Err(e) => Err(db_failure(e)),
    }
}

/// Rejects non-integer path ids with `400`, and unknown ids (or ids outside their
/// parent class) with `404`, before any handler runs.
pub async fn validate_known_ids(
    State(app_state): State<AppState>,
    params: Option<Path<HashMap<String, String>>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let db = app_state.db();
    let params = params.map(|Path(p)| p).unwrap_or_default();

    let mut ids: HashMap<&str, i64> = HashMap::new();
    for (key, raw) in &params {
        match key.as_str() {
            "class_id" | "student_id" | "event_id" | "report_id" | "user_id" | "device_id" => {
                let id = raw.parse::<i64>().map_err(|_| {
                    deny(
                        StatusCode::BAD_REQUEST,
                        format!("Invalid {key}: '{raw}'. Must be an integer."),
                    )
                    .into_response()
                })?;
                ids.insert(key.as_str(), id);
            }
            _ => {
                return Err(deny(
                    StatusCode::BAD_REQUEST,
                    format!("Unexpected parameter: '{key}'."),
                )
                .into_response());
            }
        }
    }

    let checks = async {
        if let Some(&uid) = ids.get("user_id") {
            check_exists::<user::Entity>(db, uid, "User").await?;
        }
        if let Some(&cid) = ids.get("class_id") {
            check_exists::<class::Entity>(db, cid, "Class").await?;
        }
        if let Some(&sid) = ids.get("student_id") {
            check_exists::<student::Entity>(db, sid, "Student").await?;
        }
        if let Some(&did) = ids.get("device_id") {
            check_exists::<device::Entity>(db, did, "Device").await?;
        }
        if let (Some(&cid), Some(&eid)) = (ids.get("class_id"), ids.get("event_id")) {
            match attendance_event::Model::find_in_class(db, cid, eid).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Err(deny(
                        StatusCode::NOT_FOUND,
                        format!("Attendance event {eid} not found in class {cid}"),
                    ));
                }
                Err(e) => return Err(db_failure(e)),
            }
        }
        if let (Some(&cid), Some(&rid)) = (ids.get("class_id"), ids.get("report_id")) {
            match report::Model::find_in_class(db, cid, rid).await {
                Ok(_) => {}
                Err(db::AppError::Database(e)) => return Err(db_failure(e)),
                Err(_) => {
                    return Err(deny(
                        StatusCode::NOT_FOUND,
                        format!("Report {rid} not found in class {cid}"),
                    ));
                }
            }
        }
        Ok::<(), GuardError>(())
    };
    checks.await.map_err(IntoResponse::into_response)?;

    Ok(next.run(req).await)
}
