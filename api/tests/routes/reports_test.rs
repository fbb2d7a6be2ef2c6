#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{fixtures::class_for, make_test_app, seed_world, send};
    use axum::http::StatusCode;
    use db::models::{
        attendance_event::{AttendanceStatus, Method, Model as EventModel, RecordInput},
        class_enrollment,
    };
    use serde_json::json;

    #[tokio::test]
    async fn report_snapshots_roster_with_unmarked_students() {
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
                AttendanceStatus::Present,
                Method::Manual,
            ),
        )
        .await
        .unwrap();

        let uri = format!("/api/classes/{}/reports", world.class.id);
        let (status, json) =
            send(&app, "POST", &uri, Some(&world.instructor), Some(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let data = &json["data"];
        assert_eq!(data["present"], 1);
        assert_eq!(data["unmarked"], 1);
        assert_eq!(data["generated_by"], world.instructor.id);
        let entries = data["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["student_number"], "2024-00001");
        assert_eq!(entries[0]["status"], "present");
        assert_eq!(entries[1]["status"], "unmarked");
    }

    #[tokio::test]
    async fn client_entries_are_stored_as_given() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/reports", world.class.id);

        let body = json!({
            "day": "2025-03-04",
            "entries": [{
                "student_id": world.student.id,
                "student_number": "2024-00001",
                "name": "Ada Lovelace",
                "status": "absent"
            }]
        });
        let (status, json) = send(&app, "POST", &uri, Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["day"], "2025-03-04");
        assert_eq!(json["data"]["absent"], 1);
        assert_eq!(json["data"]["present"], 0);

        let (_, json) = send(
            &app,
            "GET",
            &format!("{uri}?day=2025-03-04"),
            Some(&world.instructor),
            None,
        )
        .await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (_, json) = send(
            &app,
            "GET",
            &format!("{uri}?day=2025-03-05"),
            Some(&world.instructor),
            None,
        )
        .await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_and_delete_are_scoped_to_class() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        let other = class_for(db, world.instructor.id, "MATH102", "B").await;

        let (_, json) = send(
            &app,
            "POST",
            &format!("/api/classes/{}/reports", world.class.id),
            Some(&world.instructor),
            Some(json!({})),
        )
        .await;
        let report_id = json["data"]["id"].as_i64().unwrap();

        let wrong = format!("/api/classes/{}/reports/{report_id}", other.id);
        let (status, _) = send(&app, "GET", &wrong, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/api/classes/{}/reports/{report_id}", world.class.id);
        let (status, json) = send(&app, "GET", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], report_id);

        let (status, _) = send(&app, "GET", &uri, Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
