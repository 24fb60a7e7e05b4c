//! GitHub REST client against a local mock server

use cla_signatures::adapters::GitHubClient;
use cla_signatures::core::ports::{CommitState, CommitStatus, GitHubApi, GitHubError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(server.uri(), Some("test-token".to_string())).unwrap()
}

#[tokio::test]
async fn test_membership_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/memberships/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let membership = client(&server).await.membership("ghost", "acme").await.unwrap();
    assert!(membership.is_none());
}

#[tokio::test]
async fn test_membership_found_sends_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/memberships/octocat"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "active",
            "role": "member",
            "url": "https://api.github.com/orgs/acme/memberships/octocat"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let membership = client(&server)
        .await
        .membership("octocat", "acme")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(membership.state, "active");
    assert_eq!(membership.role, "member");
}

#[tokio::test]
async fn test_user_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 583_231,
            "email": null,
            "type": "User"
        })))
        .mount(&server)
        .await;

    let user = client(&server).await.user_details("octocat").await.unwrap().unwrap();
    assert_eq!(user.id, Some(583_231));
    assert_eq!(user.login.as_deref(), Some("octocat"));
    assert!(user.email.is_none());
}

#[tokio::test]
async fn test_repository_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 101,
            "name": "widgets",
            "full_name": "acme/widgets",
            "owner": { "login": "acme", "id": 9 }
        })))
        .mount(&server)
        .await;

    let repository = client(&server).await.repository(7, 101).await.unwrap();
    assert_eq!(repository.id, 101);
    assert_eq!(repository.owner, "acme");
    assert_eq!(repository.name, "widgets");
}

#[tokio::test]
async fn test_pull_request_commit_authors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "sha": "abc",
                "author": { "login": "octocat", "id": 583_231 },
                "commit": { "author": { "name": "Octo Cat", "email": "octo@acme.com" } }
            },
            {
                "sha": "def",
                "author": null,
                "commit": { "author": { "name": "Anon", "email": "anon@nowhere.org" } }
            }
        ])))
        .mount(&server)
        .await;

    let authors = client(&server)
        .await
        .pull_request_commit_authors(7, 5, "acme", "widgets")
        .await
        .unwrap();
    assert_eq!(authors.len(), 2);
    assert!(authors[0].is_valid());
    assert_eq!(authors[0].login(), Some("octocat"));
    assert_eq!(authors[0].author_email.as_deref(), Some("octo@acme.com"));
    assert!(!authors[1].is_valid());
    assert_eq!(authors[1].sha, "def");
}

#[tokio::test]
async fn test_pull_request_commits_follow_next_link() {
    let server = MockServer::start().await;
    let next = format!(
        "<{}/repos/acme/widgets/pulls/5/commits?per_page=100&page=2>; rel=\"next\"",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/commits"))
        .and(query_param("per_page", "100"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(json!([{
                    "sha": "p1",
                    "author": { "login": "first", "id": 1 },
                    "commit": { "author": { "name": "First", "email": "first@acme.com" } }
                }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/commits"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "sha": "p2",
            "author": { "login": "second", "id": 2 },
            "commit": { "author": { "name": "Second", "email": "second@acme.com" } }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let authors = client(&server)
        .await
        .pull_request_commit_authors(7, 5, "acme", "widgets")
        .await
        .unwrap();
    let shas: Vec<&str> = authors.iter().map(|a| a.sha.as_str()).collect();
    assert_eq!(shas, vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_next_link_to_another_host_is_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/commits"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", "<https://elsewhere.example.com/steal?page=2>; rel=\"next\"")
                .set_body_json(json!([{
                    "sha": "only",
                    "author": { "login": "first", "id": 1 },
                    "commit": { "author": { "name": "First", "email": "first@acme.com" } }
                }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let authors = client(&server)
        .await
        .pull_request_commit_authors(7, 5, "acme", "widgets")
        .await
        .unwrap();
    assert_eq!(authors.len(), 1);
}

#[tokio::test]
async fn test_names_with_reserved_characters_stay_in_their_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme%2Fadmin/memberships/octo%3Fcat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "active",
            "role": "member"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let membership = client(&server)
        .await
        .membership("octo?cat", "acme/admin")
        .await
        .unwrap();
    assert!(membership.is_some());
}

#[tokio::test]
async fn test_create_commit_status_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/statuses/abc"))
        .and(body_json(json!({
            "state": "success",
            "description": "all good",
            "context": "cla/signatures"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let status = CommitStatus {
        state: CommitState::Success,
        description: "all good".to_string(),
        context: "cla/signatures".to_string(),
    };
    client(&server)
        .await
        .create_commit_status(7, "acme", "widgets", "abc", &status)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/101"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).await.repository(7, 101).await.unwrap_err();
    match err {
        GitHubError::Status { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/101"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).await.repository(7, 101).await.unwrap_err();
    assert!(matches!(err, GitHubError::Decode(_)));
}

#[tokio::test]
async fn test_user_organizations_uses_caller_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "login": "acme", "id": 1 },
            { "login": "acme-eng", "id": 2 }
        ])))
        .mount(&server)
        .await;

    let orgs = client(&server).await.user_organizations("user-token").await.unwrap();
    assert_eq!(orgs, vec!["acme".to_string(), "acme-eng".to_string()]);
}

#[tokio::test]
async fn test_user_organizations_without_token() {
    let server = MockServer::start().await;
    let err = client(&server).await.user_organizations("").await.unwrap_err();
    assert!(matches!(err, GitHubError::Unauthenticated(_)));
}
