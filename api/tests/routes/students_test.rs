#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::helpers::{make_test_app, seed_world, send};
    use axum::http::StatusCode;
    use db::models::class_enrollment;
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::json;

    #[tokio::test]
    async fn staff_list_and_search_students() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (status, json) =
            send(&app, "GET", "/api/students", Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 2);

        let (_, json) =
            send(&app, "GET", "/api/students?query=turing", Some(&world.instructor), None).await;
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"][0]["student_number"], "2024-00002");

        let (status, _) =
            send(&app, "GET", "/api/students", Some(&world.student_user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn create_validates_number_and_rejects_duplicates() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let body = json!({ "student_number": "2024-00010", "name": "Mary Jackson" });
        let (status, json) =
            send(&app, "POST", "/api/students", Some(&world.instructor), Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["present_count"], 0);
        assert!(json["data"]["user_id"].is_null());

        let (status, _) =
            send(&app, "POST", "/api/students", Some(&world.instructor), Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "POST",
            "/api/students",
            Some(&world.instructor),
            Some(json!({ "student_number": "24-1", "name": "Short" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn linked_account_is_resolved_by_username() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;

        let (_, json) = send(
            &app,
            "GET",
            &format!("/api/students/{}", world.student.id),
            Some(&world.instructor),
            None,
        )
        .await;
        assert_eq!(json["data"]["user_id"], world.student_user.id);
    }

    #[tokio::test]
    async fn update_and_delete_are_admin_only() {
        let (app, state) = make_test_app().await;
        let world = seed_world(state.db()).await;
        let uri = format!("/api/students/{}", world.student.id);

        let (status, _) = send(
            &app,
            "PUT",
            &uri,
            Some(&world.instructor),
            Some(json!({ "name": "Augusta Ada King" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(
            &app,
            "PUT",
            &uri,
            Some(&world.admin),
            Some(json!({ "name": "Augusta Ada King" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Augusta Ada King");

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.instructor), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::OK);

        let enrollments = class_enrollment::Entity::find()
            .filter(class_enrollment::Column::StudentId.eq(world.student.id))
            .count(state.db())
            .await
            .unwrap();
        assert_eq!(enrollments, 0);

        let (status, _) = send(&app, "GET", &uri, Some(&world.admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
