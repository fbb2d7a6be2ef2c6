#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{fixtures::user, make_test_app, seed_world, send};
    use axum::http::StatusCode;
    use db::models::{
        attendance_event::{AttendanceStatus, Method, Model as EventModel, RecordInput},
        user::Role,
    };

    #[tokio::test]
    async fn student_sees_own_attendance() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let world = seed_world(db).await;
        EventModel::record(
            db,
            RecordInput::now(
                world.class.id,
                world.student.id,
                AttendanceStatus::Present,
                Method::Scan,
            ),
        )
        .await
        .unwrap();

        let (status, json) =
            send(&app, "GET", "/api/me/attendance", Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"][0]["class_id"], world.class.id);

        let (_, json) = send(
            &app,
            "GET",
            "/api/me/attendance?status=absent",
            Some(&world.student_user),
            None,
        )
        .await;
        assert_eq!(json["data"]["total"], 0);

        let (_, json) =
            send(&app, "GET", "/api/me/attendance", Some(&world.outsider_user), None).await;
        assert_eq!(json["data"]["total"], 0);
    }

    #[tokio::test]
    async fn attendance_view_is_for_students_with_a_record() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, _) =
            send(&app, "GET", "/api/me/attendance", Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let orphan = user(state.db(), "2024-00088", Role::Student).await;
        let (status, _) = send(&app, "GET", "/api/me/attendance", Some(&orphan), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn my_classes_follows_role() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, json) =
            send(&app, "GET", "/api/me/classes", Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["subject_code"], "MATH101");

        let (_, json) =
            send(&app, "GET", "/api/me/classes", Some(&world.other_instructor), None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
