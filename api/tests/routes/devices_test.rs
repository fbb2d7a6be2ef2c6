#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{make_test_app, seed_world, send};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    async fn register(app: &axum::Router, world: &crate::helpers::World) -> i64 {
        let (status, json) = send(
            app,
            "POST",
            "/api/devices",
            Some(&world.instructor),
            Some(json!({
                "device_identifier": "pixel-7a",
                "label": "Office",
                "platform": "android"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        json["data"]["id"].as_i64().unwrap()
    }

    fn fix(lat: f64, lon: f64) -> Value {
        json!({ "latitude": lat, "longitude": lon, "accuracy_m": 5.0 })
    }

    #[tokio::test]
    async fn register_is_an_upsert_per_identifier() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let id = register(&app, &world).await;
        let (_, json) = send(
            &app,
            "POST",
            "/api/devices",
            Some(&world.instructor),
            Some(json!({ "device_identifier": "pixel-7a", "label": "Lab" })),
        )
        .await;
        assert_eq!(json["data"]["id"], id);
        assert_eq!(json["data"]["label"], "Lab");

        let (_, json) = send(&app, "GET", "/api/devices", Some(&world.instructor), None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            "POST",
            "/api/devices",
            Some(&world.student_user),
            Some(json!({ "device_identifier": "phone" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn owner_posts_fixes_and_others_cannot() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let id = register(&app, &world).await;
        let uri = format!("/api/devices/{id}/location");

        let (status, json) =
            send(&app, "PUT", &uri, Some(&world.instructor), Some(fix(14.6, 121.0))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!json["data"]["fix_at"].is_null());

        let (status, _) =
            send(&app, "PUT", &uri, Some(&world.instructor), Some(fix(91.0, 0.0))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&app, "PUT", &uri, Some(&world.other_instructor), Some(fix(1.0, 1.0))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let meta = format!("/api/devices/{id}");
        let (status, _) = send(
            &app,
            "PUT",
            &meta,
            Some(&world.other_instructor),
            Some(json!({ "label": "mine" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn location_lookup_uses_active_devices_only() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let id = register(&app, &world).await;
        let lookup = format!("/api/instructors/{}/location", world.instructor.id);

        let (status, _) = send(&app, "GET", &lookup, Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(
            &app,
            "PUT",
            &format!("/api/devices/{id}/location"),
            Some(&world.instructor),
            Some(fix(14.6, 121.0)),
        )
        .await;
        let (status, json) = send(&app, "GET", &lookup, Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["latitude"], 14.6);
        assert_eq!(json["data"]["device_id"], id);

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/devices/{id}"),
            Some(&world.admin),
            Some(json!({ "active": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", &lookup, Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let not_instructor = format!("/api/instructors/{}/location", world.student_user.id);
        let (status, _) = send(&app, "GET", &not_instructor, Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn owner_deletes_device() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let id = register(&app, &world).await;
        let uri = format!("/api/devices/{id}");

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.other_instructor), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
