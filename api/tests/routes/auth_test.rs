#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{
        app::send_with_auth, fixtures::PASSWORD, make_test_app, seed_world, send,
    };
    use axum::http::StatusCode;
    use db::models::session_log::{self, SessionStatus};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use serde_json::{Value, json};

    async fn login(app: &axum::Router, username: &str, password: &str) -> (StatusCode, Value) {
        send(
            app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    #[tokio::test]
    async fn login_issues_token_and_opens_session() {
        let (app, state) = make_test_app().await;
        seed_world(state.db()).await;

        let (status, json) = login(&app, "INS-0001", PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"]["role"], "instructor");
        assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));

        let sid = json["data"]["session_id"].as_str().unwrap();
        let row = session_log::Entity::find()
            .filter(session_log::Column::SessionId.eq(sid))
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.status, SessionStatus::Active);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_user() {
        let (app, state) = make_test_app().await;
        seed_world(state.db()).await;

        for (username, password) in [("INS-0001", "wrong-password"), ("INS-9999", PASSWORD)] {
            let (status, json) = login(&app, username, password).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(json["success"], false);
            assert_eq!(json["message"], "Invalid username or password");
        }
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let (app, _) = make_test_app().await;
        let (status, _) = login(&app, "", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn logout_closes_session_then_records_standalone_logout() {
        let (app, state) = make_test_app().await;
        seed_world(state.db()).await;

        let (_, json) = login(&app, "2024-00001", PASSWORD).await;
        let token = json["data"]["token"].as_str().unwrap().to_owned();
        let sid = json["data"]["session_id"].as_str().unwrap().to_owned();
        let auth = format!("Bearer {token}");

        let (status, first) =
            send_with_auth(&app, "POST", "/api/auth/logout", Some(&auth), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["data"]["event"], "logout");
        assert_eq!(first["data"]["status"], "completed");
        assert_eq!(first["data"]["session_id"], sid.as_str());
        assert!(first["data"]["duration_seconds"].as_i64().unwrap() >= 0);

        let login_row = session_log::Entity::find()
            .filter(session_log::Column::SessionId.eq(sid.as_str()))
            .filter(session_log::Column::Event.eq(session_log::SessionEvent::Login))
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(login_row.status, SessionStatus::Completed);

        // Nothing active any more: a standalone logout without duration.
        let (status, second) =
            send_with_auth(&app, "POST", "/api/auth/logout", Some(&auth), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["data"]["status"], "completed");
        assert!(second["data"]["duration_seconds"].is_null());
        assert_ne!(second["data"]["session_id"], sid.as_str());
    }

    #[tokio::test]
    async fn me_returns_account_with_student_record() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, json) =
            send(&app, "GET", "/api/auth/me", Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["username"], "2024-00001");
        assert_eq!(json["data"]["student"]["id"], world.student.id);
        assert_eq!(json["data"]["session_id"], "test-session");
        assert!(json["data"].get("password_hash").is_none());

        let (_, json) = send(&app, "GET", "/api/auth/me", Some(&world.instructor), None).await;
        assert!(json["data"]["student"].is_null());
    }

    #[tokio::test]
    async fn me_requires_token() {
        let (app, _) = make_test_app().await;

        let (status, _) = send(&app, "GET", "/api/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            send_with_auth(&app, "GET", "/api/auth/me", Some("Bearer not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
