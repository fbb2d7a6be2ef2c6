#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{make_test_app, seed_world, send};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    fn physics() -> Value {
        json!({
            "name": "Physics",
            "subject_code": "phy101",
            "room": "L1",
            "section": "B",
            "schedules": [
                {
                    "days": ["wed", "Mon", "mon"],
                    "start_time": "08:00",
                    "end_time": "09:30",
                    "meridiem": "AM"
                }
            ]
        })
    }

    #[tokio::test]
    async fn instructor_creates_own_class_with_schedule() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, json) =
            send(&app, "POST", "/api/classes", Some(&world.instructor), Some(physics())).await;
        assert_eq!(status, StatusCode::CREATED);
        let data = &json["data"];
        assert_eq!(data["subject_code"], "PHY101");
        assert_eq!(data["instructor_id"], world.instructor.id);
        assert_eq!(data["schedules"][0]["days"], "Mon,Wed");
        assert!(data.get("qr_secret").is_none());
    }

    #[tokio::test]
    async fn instructor_cannot_create_for_someone_else() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let mut body = physics();
        body["instructor_id"] = json!(world.other_instructor.id);
        let (status, _) =
            send(&app, "POST", "/api/classes", Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_must_name_an_instructor() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, _) =
            send(&app, "POST", "/api/classes", Some(&world.admin), Some(physics())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = physics();
        body["instructor_id"] = json!(world.student_user.id);
        let (status, _) = send(&app, "POST", "/api/classes", Some(&world.admin), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = physics();
        body["instructor_id"] = json!(world.other_instructor.id);
        let (status, json) =
            send(&app, "POST", "/api/classes", Some(&world.admin), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["instructor_id"], world.other_instructor.id);
    }

    #[tokio::test]
    async fn create_rejects_students_duplicates_and_bad_slots() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, _) =
            send(&app, "POST", "/api/classes", Some(&world.student_user), Some(physics())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let mut dup = physics();
        dup["subject_code"] = json!("math101");
        dup["section"] = json!("A");
        let (status, _) =
            send(&app, "POST", "/api/classes", Some(&world.instructor), Some(dup)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let mut bad = physics();
        bad["schedules"][0]["start_time"] = json!("13:00");
        let (status, _) =
            send(&app, "POST", "/api/classes", Some(&world.instructor), Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut bad = physics();
        bad["schedules"][0]["days"] = json!(["Funday"]);
        let (status, _) =
            send(&app, "POST", "/api/classes", Some(&world.instructor), Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_is_scoped_by_role() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let expected = [
            (&world.admin, 1),
            (&world.instructor, 1),
            (&world.other_instructor, 0),
            (&world.student_user, 1),
            (&world.outsider_user, 0),
        ];
        for (user, count) in expected {
            let (status, json) = send(&app, "GET", "/api/classes", Some(user), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                json["data"].as_array().unwrap().len(),
                count,
                "user {}",
                user.username
            );
        }
    }

    #[tokio::test]
    async fn get_class_requires_membership() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}", world.class.id);

        for user in [&world.admin, &world.instructor, &world.student_user] {
            let (status, json) = send(&app, "GET", &uri, Some(user), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["id"], world.class.id);
        }
        for user in [&world.other_instructor, &world.outsider_user] {
            let (status, _) = send(&app, "GET", &uri, Some(user), None).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
        }

        let (status, _) = send(&app, "GET", "/api/classes/9999", Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_replaces_schedule_and_is_staff_only() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}", world.class.id);

        let body = json!({
            "room": "C3",
            "schedules": [
                { "days": ["Tue"], "start_time": "01:00", "end_time": "02:00", "meridiem": "PM" }
            ]
        });
        let (status, json) = send(&app, "PUT", &uri, Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["room"], "C3");
        assert_eq!(json["data"]["schedules"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"]["schedules"][0]["meridiem"], "PM");

        let (status, json) = send(
            &app,
            "PUT",
            &uri,
            Some(&world.instructor),
            Some(json!({ "schedules": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["schedules"].as_array().unwrap().is_empty());

        let (status, _) = send(
            &app,
            "PUT",
            &uri,
            Some(&world.other_instructor),
            Some(json!({ "room": "X" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "PUT",
            &uri,
            Some(&world.instructor),
            Some(json!({ "instructor_id": world.other_instructor.id })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn delete_class_removes_it() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/classes/{}", world.class.id);

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", &uri, Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
