#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{fixtures::class_for, make_test_app, seed_world, send};
    use axum::http::StatusCode;
    use db::models::{
        attendance_event::{self, AttendanceStatus, Method, Model as EventModel, RecordInput},
        class_enrollment,
    };
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::json;

    #[tokio::test]
    async fn present_then_late_keeps_one_event_and_moves_counters() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/attendance", world.class.id);

        let body = json!({ "student_id": world.student.id, "status": "present" });
        let (status, json) = send(&app, "POST", &uri, Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["tally"]["present"], 1);
        assert_eq!(json["data"]["counters"]["present"], 1);
        assert_eq!(json["data"]["event"]["method"], "manual");

        let body = json!({ "student_id": world.student.id, "status": "late" });
        let (status, json) = send(&app, "POST", &uri, Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["tally"], json!({ "present": 0, "absent": 0, "late": 1 }));
        assert_eq!(json["data"]["counters"], json!({ "present": 0, "absent": 0, "late": 1 }));

        let events = attendance_event::Entity::find()
            .filter(attendance_event::Column::ClassId.eq(world.class.id))
            .count(state.db())
            .await
            .unwrap();
        assert_eq!(events, 1);
    }

    #[tokio::test]
    async fn same_status_resubmit_leaves_counters_alone() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/attendance", world.class.id);

        for method in ["manual", "scan"] {
            let body = json!({
                "student_id": world.student.id,
                "status": "absent",
                "method": method,
            });
            send(&app, "POST", &uri, Some(&world.instructor), Some(body)).await;
        }
        let (_, json) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({ "student_id": world.student.id, "status": "absent" })),
        )
        .await;
        assert_eq!(json["data"]["counters"]["absent"], 1);
        assert_eq!(json["data"]["tally"]["absent"], 1);
    }

    #[tokio::test]
    async fn record_rejects_bad_input() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/attendance", world.class.id);

        let (status, json) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({ "student_id": world.outsider.id, "status": "present" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["message"].as_str().unwrap().contains("not enrolled"));

        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({ "student_id": world.student.id, "status": "excused" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({ "student_id": world.student.id, "status": "present", "latitude": 10.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({
                "student_id": world.student.id,
                "status": "present",
                "latitude": 95.0,
                "longitude": 10.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn only_class_staff_may_record() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/attendance", world.class.id);
        let body = json!({ "student_id": world.student.id, "status": "present" });

        for user in [&world.student_user, &world.other_instructor] {
            let (status, _) = send(&app, "POST", &uri, Some(user), Some(body.clone())).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
        }
        let (status, _) = send(&app, "POST", &uri, Some(&world.admin), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn recorded_at_decides_the_day() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/attendance", world.class.id);

        let body = json!({
            "student_id": world.student.id,
            "status": "present",
            "recorded_at": "2025-03-04T23:59:00Z"
        });
        let (status, json) = send(&app, "POST", &uri, Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["event"]["day"], "2025-03-04");
    }

    #[tokio::test]
    async fn bulk_reports_each_entry() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/attendance/bulk", world.class.id);

        let body = json!({
            "entries": [
                { "student_id": world.student.id, "status": "present" },
                { "student_id": world.outsider.id, "status": "absent" }
            ]
        });
        let (status, json) = send(&app, "POST", &uri, Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let outcomes = json["data"].as_array().unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0]["ok"], true);
        assert_eq!(outcomes[1]["ok"], false);
        assert!(outcomes[1]["error"].as_str().unwrap().contains("not enrolled"));

        let (status, _) =
            send(&app, "POST", &uri, Some(&world.instructor), Some(json!({ "entries": [] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_counts_unmarked_students() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        class_enrollment::Model::enroll(db, world.class.id, "2024-00002", None)
            .await
            .unwrap();
        EventModel::record(
            db,
            RecordInput::now(
                world.class.id,
                world.student.id,
                AttendanceStatus::Late,
                Method::Manual,
            ),
        )
        .await
        .unwrap();

        let uri = format!("/api/classes/{}/attendance/summary", world.class.id);
        let (status, json) = send(&app, "GET", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["enrolled"], 2);
        assert_eq!(json["data"]["late"], 1);
        assert_eq!(json["data"]["unmarked"], 1);

        let (_, json) = send(
            &app,
            "GET",
            &format!("{uri}?day=2001-01-01"),
            Some(&world.instructor),
            None,
        )
        .await;
        assert_eq!(json["data"]["unmarked"], 2);
        assert_eq!(json["data"]["day"], "2001-01-01");
    }

    #[tokio::test]
    async fn list_filters_and_paginates() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        for (day, status) in [
            ("2025-03-03T08:00:00Z", AttendanceStatus::Present),
            ("2025-03-04T08:00:00Z", AttendanceStatus::Late),
            ("2025-03-05T08:00:00Z", AttendanceStatus::Late),
        ] {
            EventModel::record(
                db,
                RecordInput {
                    recorded_at: day.parse().unwrap(),
                    ..RecordInput::now(world.class.id, world.student.id, status, Method::Manual)
                },
            )
            .await
            .unwrap();
        }
        let base = format!("/api/classes/{}/attendance", world.class.id);

        let (status, json) = send(
            &app,
            "GET",
            &format!("{base}?status=late&per_page=1"),
            Some(&world.instructor),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 2);
        assert_eq!(json["data"]["items"][0]["day"], "2025-03-05");

        let (_, json) = send(
            &app,
            "GET",
            &format!("{base}?from=2025-03-04&to=2025-03-04"),
            Some(&world.instructor),
            None,
        )
        .await;
        assert_eq!(json["data"]["total"], 1);

        let (status, _) = send(
            &app,
            "GET",
            &format!("{base}?from=2025-03-05&to=2025-03-01"),
            Some(&world.instructor),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            &format!("{base}?day=yesterday"),
            Some(&world.instructor),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_event_restores_counters_and_checks_class() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        let recorded = EventModel::record(
            db,
            RecordInput::now(
                world.class.id,
                world.student.id,
                AttendanceStatus::Absent,
                Method::Manual,
            ),
        )
        .await
        .unwrap();

        let other = class_for(db, world.instructor.id, "MATH102", "A").await;
        let wrong = format!("/api/classes/{}/attendance/{}", other.id, recorded.event.id);
        let (status, _) = send(&app, "DELETE", &wrong, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/api/classes/{}/attendance/{}", world.class.id, recorded.event.id);
        let (status, json) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["absent"], 0);

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_class_id_is_bad_request() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, _) =
            send(&app, "GET", "/api/classes/abc/attendance", Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
