mod common;

use chrono::Duration;
use serde_json::{Value, json};

use apna_server::auth::TokenSigner;
use apna_server::store::Store;
use apna_server::types::{Project, ProjectSeo};
use common::test_server::{ADMIN_EMAIL, TOKEN_SECRET, TestServer};

#[tokio::test]
async fn health_check() {
    let server = TestServer::start().await;

    let body = reqwest::get(format!("{}/health", server.base_url))
        .await
        .expect("health request")
        .text()
        .await
        .expect("health body");
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn submit_rejects_missing_required_fields() {
    let server = TestServer::start().await;
    let client = server.client();

    let incomplete_bodies = [
        json!({"mobile": "9999999999", "email": "ravi@example.com"}),
        json!({"fullName": "Ravi Kumar", "email": "ravi@example.com"}),
        json!({"fullName": "Ravi Kumar", "mobile": "9999999999"}),
        json!({"fullName": "  ", "mobile": "9999999999", "email": "ravi@example.com"}),
    ];

    for body in incomplete_bodies {
        let response = client
            .post(format!("{}/api/v1/inquiry/addInquiry", server.base_url))
            .json(&body)
            .send()
            .await
            .expect("submit request");
        assert_eq!(response.status(), 400);

        let envelope: Value = response.json().await.expect("error envelope");
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["message"], "All fields are required.");
    }

    // Nothing persisted, no email attempted.
    assert!(server.store.list_inquiries().unwrap().is_empty());
    assert!(server.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn submit_creates_record_and_sends_confirmation() {
    let server = TestServer::start().await;
    let client = server.client();

    let response = client
        .post(format!("{}/api/v1/inquiry/addInquiry", server.base_url))
        .json(&json!({
            "fullName": "Ravi Kumar",
            "mobile": "9999999999",
            "email": "ravi@example.com",
            "source": "Green Valley",
        }))
        .send()
        .await
        .expect("submit request");
    assert_eq!(response.status(), 201);

    let envelope: Value = response.json().await.expect("success envelope");
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["message"], "Form submitted successfully.");
    assert_eq!(envelope["data"]["fullName"], "Ravi Kumar");
    assert_eq!(envelope["data"]["source"], "Green Valley");
    assert!(envelope["data"]["createdAt"].is_string());

    let stored = server.store.list_inquiries().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].full_name, "Ravi Kumar");

    server.wait_for_emails(1).await;
    let sent = server.mailer.sent.lock().unwrap();
    assert_eq!(sent[0].to, "ravi@example.com");
    assert_eq!(sent[0].subject, "धन्यवाद! आपके विवरण प्राप्त हो गए हैं।");
    assert!(sent[0].html.contains("नमस्ते Ravi जी!"));
    assert!(sent[0].html.contains("Green Valley"));
}

#[tokio::test]
async fn submit_succeeds_when_mail_provider_fails() {
    let server = TestServer::start().await;
    server
        .mailer
        .fail
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let response = server
        .client()
        .post(format!("{}/api/v1/inquiry/addInquiry", server.base_url))
        .json(&json!({
            "fullName": "Ravi Kumar",
            "mobile": "9999999999",
            "email": "ravi@example.com",
        }))
        .send()
        .await
        .expect("submit request");

    assert_eq!(response.status(), 201);
    assert_eq!(server.store.list_inquiries().unwrap().len(), 1);
}

#[tokio::test]
async fn listing_requires_valid_token() {
    let server = TestServer::start().await;
    let client = server.client();

    // No cookie at all.
    let response = client
        .get(format!("{}/api/v1/inquiry/getInquiry", server.base_url))
        .send()
        .await
        .expect("list request");
    assert_eq!(response.status(), 401);
    let envelope: Value = response.json().await.expect("error envelope");
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["message"], "Access denied. No token provided.");

    // Garbage cookie.
    let response = client
        .get(format!("{}/api/v1/inquiry/getInquiry", server.base_url))
        .header("Cookie", "token=not-a-real-token")
        .send()
        .await
        .expect("list request");
    assert_eq!(response.status(), 401);

    // Expired token signed with the right secret.
    let expired = TokenSigner::new(TOKEN_SECRET)
        .sign("some-admin", Duration::seconds(-10))
        .unwrap();
    let response = client
        .get(format!("{}/api/v1/inquiry/getInquiry", server.base_url))
        .header("Cookie", format!("token={expired}"))
        .send()
        .await
        .expect("list request");
    assert_eq!(response.status(), 401);

    // Valid token for an admin that does not exist.
    let unknown = TokenSigner::new(TOKEN_SECRET)
        .sign("ghost-admin", Duration::days(1))
        .unwrap();
    let response = client
        .get(format!("{}/api/v1/inquiry/getInquiry", server.base_url))
        .header("Cookie", format!("token={unknown}"))
        .send()
        .await
        .expect("list request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn listing_returns_newest_first() {
    let server = TestServer::start().await;
    let client = server.client();
    server.login(&client).await;

    for name in ["First Lead", "Second Lead", "Third Lead"] {
        let response = client
            .post(format!("{}/api/v1/inquiry/addInquiry", server.base_url))
            .json(&json!({
                "fullName": name,
                "mobile": "9999999999",
                "email": "lead@example.com",
            }))
            .send()
            .await
            .expect("submit request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/api/v1/inquiry/getInquiry", server.base_url))
        .send()
        .await
        .expect("list request");
    assert_eq!(response.status(), 200);

    let envelope: Value = response.json().await.expect("list envelope");
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["message"], "Inquiry fetched successfully");

    let listed = envelope["inquiry"].as_array().expect("inquiry array");
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0]["fullName"], "Third Lead");
    assert_eq!(listed[1]["fullName"], "Second Lead");
    assert_eq!(listed[2]["fullName"], "First Lead");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let server = TestServer::start().await;
    let client = server.client();
    server.login(&client).await;

    let response = client
        .post(format!("{}/api/v1/inquiry/addInquiry", server.base_url))
        .json(&json!({
            "fullName": "Ravi Kumar",
            "mobile": "9999999999",
            "email": "ravi@example.com",
        }))
        .send()
        .await
        .expect("submit request");
    let envelope: Value = response.json().await.expect("success envelope");
    let id = envelope["data"]["id"].as_str().expect("inquiry id");

    let response = client
        .delete(format!(
            "{}/api/v1/inquiry/deleteInquiry/{}",
            server.base_url, id
        ))
        .send()
        .await
        .expect("delete request");
    assert_eq!(response.status(), 200);
    assert!(server.store.list_inquiries().unwrap().is_empty());

    // Deleting the same id again still reports success.
    let response = client
        .delete(format!(
            "{}/api/v1/inquiry/deleteInquiry/{}",
            server.base_url, id
        ))
        .send()
        .await
        .expect("delete request");
    assert_eq!(response.status(), 200);
    let envelope: Value = response.json().await.expect("delete envelope");
    assert_eq!(envelope["success"], true);

    // Missing id responds 401, not 400.
    let response = client
        .delete(format!("{}/api/v1/inquiry/deleteInquiry", server.base_url))
        .send()
        .await
        .expect("delete request");
    assert_eq!(response.status(), 401);
    let envelope: Value = response.json().await.expect("error envelope");
    assert_eq!(envelope["message"], "Inquiry id is required.");
}

#[tokio::test]
async fn delete_requires_auth() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .delete(format!(
            "{}/api/v1/inquiry/deleteInquiry/some-id",
            server.base_url
        ))
        .send()
        .await
        .expect("delete request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let server = TestServer::start().await;
    let client = server.client();

    let response = client
        .post(format!("{}/api/v1/auth/login", server.base_url))
        .json(&json!({"email": ADMIN_EMAIL, "password": "wrong-password"}))
        .send()
        .await
        .expect("login request");
    assert_eq!(response.status(), 401);

    let response = client
        .post(format!("{}/api/v1/auth/login", server.base_url))
        .json(&json!({"email": "nobody@example.com", "password": "123456789"}))
        .send()
        .await
        .expect("login request");
    assert_eq!(response.status(), 401);

    let response = client
        .post(format!("{}/api/v1/auth/login", server.base_url))
        .json(&json!({"email": ADMIN_EMAIL}))
        .send()
        .await
        .expect("login request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn is_authenticated_returns_identity() {
    let server = TestServer::start().await;
    let client = server.client();
    server.login(&client).await;

    let response = client
        .get(format!("{}/api/v1/auth/isAuthenticated", server.base_url))
        .send()
        .await
        .expect("isAuthenticated request");
    assert_eq!(response.status(), 200);

    let envelope: Value = response.json().await.expect("identity envelope");
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["data"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn logout_clears_cookie() {
    let server = TestServer::start().await;
    let client = server.client();
    server.login(&client).await;

    let response = client
        .get(format!("{}/api/v1/inquiry/getInquiry", server.base_url))
        .send()
        .await
        .expect("list request");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/api/v1/auth/logout", server.base_url))
        .send()
        .await
        .expect("logout request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/v1/inquiry/getInquiry", server.base_url))
        .send()
        .await
        .expect("list request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn ssr_renders_default_title_for_unknown_slug() {
    let server = TestServer::start().await;

    let response = reqwest::get(format!("{}/some-unknown-slug", server.base_url))
        .await
        .expect("page request");
    assert_eq!(response.status(), 200);

    let document = response.text().await.expect("page body");
    assert!(document.contains("<title>Apna Project</title>"));
    assert!(document.contains(r#"href="/assets/index-C3YQxwvO.css""#));
    assert!(document.contains(r#"src="/assets/index-D8fk3PqN.js""#));
    assert!(document.contains(r#"<div id="root"></div>"#));
}

#[tokio::test]
async fn ssr_renders_project_seo_record() {
    let server = TestServer::start().await;

    let project = Project {
        id: "proj-1".to_string(),
        name: "Green Valley".to_string(),
        seo: Some(ProjectSeo {
            slug: "green-valley".to_string(),
            title: Some("Green Valley Plots in Patna".to_string()),
            meta_description: Some("Residential plots in Green Valley".to_string()),
            canonical: Some("https://apnaprojectpatna.com/green-valley".to_string()),
            robots: Some("index, follow".to_string()),
            og_title: None,
            og_description: None,
            scripts: vec![r#"<script>console.log("head")</script>"#.to_string()],
            body_scripts: vec![],
        }),
        created_at: chrono::Utc::now(),
    };
    server.store.create_project(&project).unwrap();

    let response = reqwest::get(format!("{}/green-valley", server.base_url))
        .await
        .expect("page request");
    assert_eq!(response.status(), 200);

    let document = response.text().await.expect("page body");
    assert!(document.contains("<title>Green Valley Plots in Patna</title>"));
    assert!(document.contains(r#"content="Residential plots in Green Valley""#));
    assert!(document.contains(r#"href="https://apnaprojectpatna.com/green-valley""#));
    // Head snippets are injected verbatim.
    assert!(document.contains(r#"<script>console.log("head")</script>"#));
}

#[tokio::test]
async fn ssr_missing_shell_is_plain_500() {
    let server = TestServer::start().await;
    std::fs::remove_file(server.temp_dir.path().join("dist/index.html")).unwrap();

    let response = reqwest::get(format!("{}/any-page", server.base_url))
        .await
        .expect("page request");
    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.expect("body"), "Internal Server Error");
}
