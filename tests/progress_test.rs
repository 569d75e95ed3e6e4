//! Integration tests for lecture-level progress tracking.

mod helpers;

use http::StatusCode;
use uuid::Uuid;

/// Instructor with one published two-lecture course, plus an enrolled
/// student. Returns (course_id, lecture ids, student token).
async fn seed_enrolled_course(app: &helpers::TestApp, tag: &str) -> (Uuid, Uuid, Uuid, String) {
    let instructor = app
        .create_test_user(
            "Instructor",
            &format!("instructor-{tag}@test.com"),
            "password123",
            "instructor",
        )
        .await;
    let student = app
        .create_test_user(
            "Student",
            &format!("student-{tag}@test.com"),
            "password123",
            "student",
        )
        .await;
    let course_id = app
        .create_test_course(instructor, "Progress Course", 1000, true)
        .await;
    let lecture_1 = app.add_test_lecture(course_id, "One", 1).await;
    let lecture_2 = app.add_test_lecture(course_id, "Two", 2).await;
    app.enroll(student, course_id).await;
    let token = app
        .login(&format!("student-{tag}@test.com"), "password123")
        .await;
    (course_id, lecture_1, lecture_2, token)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn progress_requires_course_ownership() {
    let app = helpers::TestApp::new().await;
    let instructor = app
        .create_test_user("Instructor", "gate-i@test.com", "password123", "instructor")
        .await;
    app.create_test_user("Outsider", "gate-s@test.com", "password123", "student")
        .await;
    let course_id = app
        .create_test_course(instructor, "Gated", 1000, true)
        .await;
    let token = app.login("gate-s@test.com", "password123").await;

    let response = app
        .request(
            "GET",
            &format!("/api/progress/{course_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn untouched_course_reports_empty_progress() {
    let app = helpers::TestApp::new().await;
    let (course_id, _, _, token) = seed_enrolled_course(&app, "empty").await;

    let response = app
        .request(
            "GET",
            &format!("/api/progress/{course_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["completed"], false);
    assert_eq!(
        response.body["data"]["lectures"].as_array().map(Vec::len),
        Some(0)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn viewing_one_lecture_does_not_complete_the_course() {
    let app = helpers::TestApp::new().await;
    let (course_id, lecture_1, _, token) = seed_enrolled_course(&app, "partial").await;

    let response = app
        .request(
            "POST",
            &format!("/api/progress/{course_id}/lectures/{lecture_1}/view"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["completed"], false);

    let response = app
        .request(
            "GET",
            &format!("/api/progress/{course_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        response.body["data"]["lectures"].as_array().map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn viewing_every_lecture_completes_the_course() {
    let app = helpers::TestApp::new().await;
    let (course_id, lecture_1, lecture_2, token) = seed_enrolled_course(&app, "full").await;

    app.request(
        "POST",
        &format!("/api/progress/{course_id}/lectures/{lecture_1}/view"),
        None,
        Some(&token),
    )
    .await;
    let response = app
        .request(
            "POST",
            &format!("/api/progress/{course_id}/lectures/{lecture_2}/view"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["completed"], true);
    assert!(response.body["data"]["completed_at"].is_string());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn repeat_views_are_idempotent() {
    let app = helpers::TestApp::new().await;
    let (course_id, lecture_1, _, token) = seed_enrolled_course(&app, "repeat").await;

    for _ in 0..3 {
        let response = app
            .request(
                "POST",
                &format!("/api/progress/{course_id}/lectures/{lecture_1}/view"),
                None,
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request(
            "GET",
            &format!("/api/progress/{course_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        response.body["data"]["lectures"].as_array().map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn viewing_a_lecture_from_another_course_is_rejected() {
    let app = helpers::TestApp::new().await;
    let (course_id, _, _, token) = seed_enrolled_course(&app, "cross").await;
    let other_instructor = app
        .create_test_user("Other", "cross-i@test.com", "password123", "instructor")
        .await;
    let other_course = app
        .create_test_course(other_instructor, "Other Course", 1000, true)
        .await;
    let foreign_lecture = app.add_test_lecture(other_course, "Foreign", 1).await;

    let response = app
        .request(
            "POST",
            &format!("/api/progress/{course_id}/lectures/{foreign_lecture}/view"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn manual_complete_and_reset_round_trip() {
    let app = helpers::TestApp::new().await;
    let (course_id, _, _, token) = seed_enrolled_course(&app, "manual").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/progress/{course_id}/complete"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["completed"], true);

    let response = app
        .request(
            "GET",
            &format!("/api/progress/{course_id}"),
            None,
            Some(&token),
        )
        .await;
    // Manual completion marks every lecture viewed.
    assert_eq!(
        response.body["data"]["lectures"].as_array().map(Vec::len),
        Some(2)
    );

    let response = app
        .request(
            "PUT",
            &format!("/api/progress/{course_id}/incomplete"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["completed"], false);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn progress_listing_covers_all_tracked_courses() {
    let app = helpers::TestApp::new().await;
    let (course_id, lecture_1, _, token) = seed_enrolled_course(&app, "listing").await;

    app.request(
        "POST",
        &format!("/api/progress/{course_id}/lectures/{lecture_1}/view"),
        None,
        Some(&token),
    )
    .await;

    let response = app.request("GET", "/api/progress", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let entries = response.body["data"].as_array().expect("progress array");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0]["course_id"].as_str(),
        Some(course_id.to_string().as_str())
    );
}
