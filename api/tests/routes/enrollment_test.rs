#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{fixtures::class_for, make_test_app, seed_world, send};
    use axum::http::StatusCode;
    use db::models::{
        attendance_event::{self, AttendanceStatus, Method, Model as EventModel, RecordInput},
        class_enrollment,
        student,
    };
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::json;

    #[tokio::test]
    async fn roster_lists_enrolled_students() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/students", world.class.id);

        let (status, json) = send(&app, "GET", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);
        let roster = json["data"].as_array().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0]["student_number"], "2024-00001");

        let (status, _) = send(&app, "GET", &uri, Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn enroll_creates_missing_student_and_rejects_duplicates() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}/students", world.class.id);

        let body = json!({ "student_number": "2024-00050", "name": "Katherine Johnson" });
        let (status, json) = send(&app, "POST", &uri, Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["student"]["name"], "Katherine Johnson");

        let (status, json) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({ "student_number": "2024-00001" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], class_enrollment::ALREADY_ENROLLED);

        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({ "student_number": "2024-09999" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&world.instructor),
            Some(json!({ "student_number": "not-a-number", "name": "Nobody" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn removing_enrollment_drops_only_that_class_events() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;

        let other = class_for(db, world.other_instructor.id, "HIST200", "A").await;
        class_enrollment::Model::enroll(db, other.id, "2024-00001", None)
            .await
            .unwrap();
        for class_id in [world.class.id, other.id] {
            EventModel::record(
                db,
                RecordInput::now(
                    class_id,
                    world.student.id,
                    AttendanceStatus::Present,
                    Method::Manual,
                ),
            )
            .await
            .unwrap();
        }

        let uri = format!("/api/classes/{}/students/{}", world.class.id, world.student.id);
        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);

        let remaining = attendance_event::Entity::find()
            .filter(attendance_event::Column::StudentId.eq(world.student.id))
            .all(db)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].class_id, other.id);

        let enrolled = class_enrollment::Entity::find()
            .filter(class_enrollment::Column::StudentId.eq(world.student.id))
            .count(db)
            .await
            .unwrap();
        assert_eq!(enrolled, 1);

        let reloaded = student::Entity::find_by_id(world.student.id)
            .one(db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.present_count, 1);
    }

    #[tokio::test]
    async fn removing_a_non_enrolled_student_is_not_found() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let uri = format!("/api/classes/{}/students/{}", world.class.id, world.outsider.id);
        let (status, json) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["message"].as_str().unwrap().contains("not enrolled"));

        // Student ids are checked before the handler runs.
        let uri = format!("/api/classes/{}/students/424242", world.class.id);
        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
