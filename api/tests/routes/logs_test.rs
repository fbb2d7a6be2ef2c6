#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{make_test_app, seed_world, send};
    use api::sweeper::run_once;
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::models::session_log::{ClientInfo, Model as SessionLogModel};
    use serial_test::serial;
    use util::config::AppConfig;

    #[tokio::test]
    #[serial]
    async fn sweep_terminates_stale_logins() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        SessionLogModel::login(db, world.instructor.id, ClientInfo::default())
            .await
            .unwrap();

        assert_eq!(run_once(db, Utc::now()).await.unwrap(), 0);
        assert_eq!(run_once(db, Utc::now() + Duration::hours(25)).await.unwrap(), 1);
        // Already terminated rows are left alone.
        assert_eq!(run_once(db, Utc::now() + Duration::hours(50)).await.unwrap(), 0);

        let (status, json) =
            send(&app, "GET", "/api/logs?status=terminated", Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        assert!(json["data"]["items"][0]["duration_seconds"].as_i64().unwrap() >= 25 * 3600);
    }

    #[tokio::test]
    #[serial]
    async fn sweep_threshold_follows_config() {
        let (_, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        SessionLogModel::login(db, world.student_user.id, ClientInfo::default())
            .await
            .unwrap();

        AppConfig::set_stale_session_hours(1);
        let swept = run_once(db, Utc::now() + Duration::hours(2)).await;
        AppConfig::set_stale_session_hours(24);
        assert_eq!(swept.unwrap(), 1);
    }

    #[tokio::test]
    async fn sessions_pair_logins_with_logouts() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;

        let login = SessionLogModel::login(db, world.instructor.id, ClientInfo::default())
            .await
            .unwrap();
        SessionLogModel::logout(
            db,
            world.instructor.id,
            Some(&login.session_id),
            ClientInfo::default(),
        )
        .await
        .unwrap();
        SessionLogModel::login(db, world.student_user.id, ClientInfo::default())
            .await
            .unwrap();

        let uri = format!("/api/logs/sessions?user_id={}", world.instructor.id);
        let (status, json) = send(&app, "GET", &uri, Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        let pair = &json["data"]["items"][0];
        assert_eq!(pair["session_id"], login.session_id.as_str());
        assert_eq!(pair["status"], "completed");
        assert!(!pair["logout_at"].is_null());

        let (_, json) = send(&app, "GET", "/api/logs/sessions", Some(&world.admin), None).await;
        assert_eq!(json["data"]["total"], 2);

        let (_, json) = send(&app, "GET", "/api/logs?event=logout", Some(&world.admin), None).await;
        assert_eq!(json["data"]["total"], 1);
    }

    #[tokio::test]
    async fn clear_removes_rows_before_cutoff() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        SessionLogModel::login(db, world.instructor.id, ClientInfo::default())
            .await
            .unwrap();

        let (status, json) = send(
            &app,
            "DELETE",
            "/api/logs?before=2000-01-01T00:00:00Z",
            Some(&world.admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["deleted"], 0);

        let (_, json) = send(&app, "DELETE", "/api/logs", Some(&world.admin), None).await;
        assert_eq!(json["data"]["deleted"], 1);

        let (_, json) = send(&app, "GET", "/api/logs", Some(&world.admin), None).await;
        assert_eq!(json["data"]["total"], 0);
    }

    #[tokio::test]
    async fn logs_are_admin_only() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, _) = send(&app, "GET", "/api/logs", Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, "DELETE", "/api/logs", Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
