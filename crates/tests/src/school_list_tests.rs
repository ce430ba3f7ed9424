use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{add_classes, create_school, get, names, test_app};

#[tokio::test]
async fn default_filter_lists_active_schools_by_name() {
    let (app, _pool, users, _guard) = test_app().await;

    create_school(&app, &users, "Westview High", "office@westview.edu", true).await;
    create_school(&app, &users, "Ashford Primary", "hello@ashford.edu", true).await;
    create_school(&app, &users, "Closed Academy", "closed@academy.edu", false).await;

    let (status, body) = get(&app, "/api/schools").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Ashford Primary", "Westview High"]);
}

#[tokio::test]
async fn status_filter_never_leaks_other_statuses() {
    let (app, _pool, users, _guard) = test_app().await;

    create_school(&app, &users, "Open One", "one@open.edu", true).await;
    create_school(&app, &users, "Shut Two", "two@shut.edu", false).await;
    create_school(&app, &users, "Shut Three", "three@shut.edu", false).await;

    let (_, inactive) = get(&app, "/api/schools?status=inactive").await;
    let statuses: Vec<&str> = inactive
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["inactive", "inactive"]);

    let (_, all) = get(&app, "/api/schools?status=all").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn search_matches_name_email_or_phone_case_insensitively() {
    let (app, _pool, users, _guard) = test_app().await;

    create_school(&app, &users, "Lincoln Elementary", "office@lincoln.edu", true).await;
    create_school(&app, &users, "Riverside School", "admin@LINCOLN-district.org", true).await;
    create_school(&app, &users, "Unrelated Prep", "desk@prep.edu", true).await;

    let (status, body) = get(&app, "/api/schools?search=lincoln").await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 2);
    for school in found {
        let haystack = format!(
            "{} {} {}",
            school["name"].as_str().unwrap(),
            school["email"].as_str().unwrap(),
            school["phone"].as_str().unwrap_or_default()
        )
        .to_lowercase();
        assert!(haystack.contains("lincoln"), "unexpected match: {school}");
    }
}

#[tokio::test]
async fn whitespace_search_is_ignored() {
    let (app, _pool, users, _guard) = test_app().await;

    create_school(&app, &users, "Alpha School", "a@alpha.edu", true).await;
    create_school(&app, &users, "Beta School", "b@beta.edu", true).await;

    let (_, body) = get(&app, "/api/schools?search=%20%20").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn like_metacharacters_match_literally() {
    let (app, _pool, users, _guard) = test_app().await;

    create_school(&app, &users, "100% Science", "lab@science.edu", true).await;
    create_school(&app, &users, "Plain School", "plain@school.edu", true).await;

    let (_, body) = get(&app, "/api/schools?search=%25").await;
    assert_eq!(names(&body), vec!["100% Science"]);
}

#[tokio::test]
async fn sort_by_name_descending() {
    let (app, _pool, users, _guard) = test_app().await;

    create_school(&app, &users, "Alpha School", "a@alpha.edu", true).await;
    create_school(&app, &users, "Gamma School", "g@gamma.edu", true).await;
    create_school(&app, &users, "Beta School", "b@beta.edu", true).await;

    let (_, body) = get(&app, "/api/schools?sort_field=name&sort_order=desc").await;
    assert_eq!(names(&body), vec!["Gamma School", "Beta School", "Alpha School"]);
}

#[tokio::test]
async fn most_classes_first_uses_derived_counts() {
    let (app, pool, users, _guard) = test_app().await;

    let small = create_school(&app, &users, "Small School", "s@small.edu", true).await;
    let big = create_school(&app, &users, "Big School", "b@big.edu", true).await;
    add_classes(&pool, small["id"].as_str().unwrap(), 1).await;
    add_classes(&pool, big["id"].as_str().unwrap(), 3).await;

    let (_, body) = get(&app, "/api/schools?sort_field=classes_count&sort_order=desc").await;
    assert_eq!(names(&body), vec!["Big School", "Small School"]);
    assert_eq!(body[0]["classes_count"], 3);
    assert_eq!(body[0]["admins_count"], 0);
}

#[tokio::test]
async fn empty_store_returns_empty_list() {
    let (app, _pool, _users, _guard) = test_app().await;

    let (status, body) = get(&app, "/api/schools").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}
