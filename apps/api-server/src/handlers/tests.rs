//! End-to-end tests for the content routes against the in-memory store.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use folio_core::permission::ADMIN_ROLE;
use folio_core::ports::TokenService;
use folio_infra::{JwtConfig, JwtTokenService};
use folio_shared::dto::PostResponse;

use crate::app;
use crate::state::AppState;

struct Harness {
    state: AppState,
    tokens: Arc<JwtTokenService>,
}

impl Harness {
    fn new() -> Self {
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            ..JwtConfig::default()
        }));
        Self {
            state: AppState::in_memory(tokens.clone()),
            tokens,
        }
    }

    fn token(&self, roles: Vec<String>) -> String {
        self.tokens
            .generate_token(Uuid::new_v4(), "someone@example.com", roles)
            .expect("token")
    }

    fn admin(&self) -> String {
        format!("Bearer {}", self.token(vec![ADMIN_ROLE.to_string()]))
    }

    fn user(&self) -> String {
        format!("Bearer {}", self.token(Vec::new()))
    }
}

async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, req).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

fn get(uri: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(uri)
}

fn write(
    method: actix_test::TestRequest,
    uri: &str,
    auth: &str,
    body: impl serde::Serialize,
) -> actix_test::TestRequest {
    method
        .uri(uri)
        .insert_header((header::AUTHORIZATION, auth.to_string()))
        .set_json(body)
}

fn author_body(fullname: &str) -> Value {
    json!({
        "fullname": fullname,
        "description": "Writes things",
        "thumbnail": "authors/a.png",
    })
}

fn post_body(slug: &str, author_id: i32) -> Value {
    json!({
        "title": "T",
        "slug": slug,
        "description": "x",
        "author_id": author_id,
    })
}

#[actix_web::test]
async fn created_author_gets_id_and_timestamp_and_is_listed() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = write(actix_test::TestRequest::post(), "/authors/", &h.admin(), author_body("A"));
    let (status, created) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert!(created["timestamp"].is_string());

    let (status, listed) = send(&app, get("/authors/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));
}

#[actix_web::test]
async fn post_with_unknown_author_is_rejected_and_not_persisted() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = write(actix_test::TestRequest::post(), "/posts/", &h.admin(), post_body("t", 42));
    let (status, body) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["author_id"],
        json!(["Invalid pk \"42\" - object does not exist."])
    );

    let (_, listed) = send(&app, get("/posts/").to_request()).await;
    assert_eq!(listed, json!([]));
    let (status, _) = send(&app, get("/posts/t/").to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_slug_is_rejected_and_first_post_survives() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;
    let admin = h.admin();

    let req = write(actix_test::TestRequest::post(), "/authors/", &admin, author_body("A"));
    send(&app, req.to_request()).await;
    let req = write(actix_test::TestRequest::post(), "/posts/", &admin, post_body("t", 1));
    let (status, first) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = write(actix_test::TestRequest::post(), "/posts/", &admin, post_body("t", 1));
    let (status, body) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["slug"],
        json!(["post with this slug already exists."])
    );

    let (status, fetched) = send(&app, get("/posts/t/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, first);
}

#[actix_web::test]
async fn deleting_an_author_deletes_their_posts() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;
    let admin = h.admin();

    let req = write(actix_test::TestRequest::post(), "/authors/", &admin, author_body("A"));
    send(&app, req.to_request()).await;
    for slug in ["one", "two"] {
        let req = write(actix_test::TestRequest::post(), "/posts/", &admin, post_body(slug, 1));
        let (status, _) = send(&app, req.to_request()).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = actix_test::TestRequest::delete()
        .uri("/authors/1/")
        .insert_header((header::AUTHORIZATION, admin.clone()));
    let (status, body) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    for uri in ["/posts/one/", "/posts/two/", "/authors/1/"] {
        let (status, _) = send(&app, get(uri).to_request()).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn anonymous_callers_can_read_but_not_write() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = actix_test::TestRequest::post().uri("/features/").set_json(json!({
        "name": "n",
        "title": "t",
        "url": "https://example.com",
    }));
    let (status, body) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["detail"],
        "You do not have permission to perform this action."
    );

    let (status, listed) = send(&app, get("/features/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn authenticated_non_admins_cannot_write() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = write(actix_test::TestRequest::post(), "/authors/", &h.user(), author_body("A"));
    let (status, _) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, listed) = send(&app, get("/authors/").to_request()).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[case("Bearer not-a-jwt")]
#[case("Basic dXNlcjpwYXNz")]
#[actix_web::test]
async fn unusable_credentials_are_unauthorized(#[case] auth: &str) {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = get("/authors/").insert_header((header::AUTHORIZATION, auth.to_string()));
    let (status, body) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[actix_web::test]
async fn patch_changes_only_the_given_fields() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;
    let admin = h.admin();

    let req = write(
        actix_test::TestRequest::post(),
        "/projects/",
        &admin,
        json!({"title": "Old", "description": "d", "thumbnail": "projects/p.png"}),
    );
    let (_, created) = send(&app, req.to_request()).await;

    let req = write(
        actix_test::TestRequest::patch(),
        "/projects/1/",
        &admin,
        json!({"title": "New"}),
    );
    let (status, updated) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "New");
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["thumbnail"], created["thumbnail"]);
    assert_eq!(updated["timestamp"], created["timestamp"]);
}

#[actix_web::test]
async fn patching_a_post_keeps_its_creation_time() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;
    let admin = h.admin();

    let req = write(actix_test::TestRequest::post(), "/authors/", &admin, author_body("A"));
    send(&app, req.to_request()).await;
    let req = write(actix_test::TestRequest::post(), "/posts/", &admin, post_body("t", 1));
    let (_, created) = send(&app, req.to_request()).await;

    let req = write(
        actix_test::TestRequest::patch(),
        "/posts/t/",
        &admin,
        json!({"slug": "renamed"}),
    );
    let (status, updated) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "renamed");
    assert_eq!(updated["title"], "T");
    assert_eq!(updated["timestamp"], created["timestamp"]);

    let (status, _) = send(&app, get("/posts/t/").to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get("/posts/renamed/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn put_requires_every_field() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;
    let admin = h.admin();

    let req = write(
        actix_test::TestRequest::post(),
        "/about/",
        &admin,
        json!({"title": "t", "description": "d", "mission": "m", "thumbnail": "about/a.png"}),
    );
    send(&app, req.to_request()).await;

    let req = write(
        actix_test::TestRequest::put(),
        "/about/1/",
        &admin,
        json!({"title": "Only"}),
    );
    let (status, body) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["description", "mission", "thumbnail"] {
        assert_eq!(body["errors"][field], json!(["This field is required."]));
    }

    let (_, unchanged) = send(&app, get("/about/1/").to_request()).await;
    assert_eq!(unchanged["title"], "t");
}

#[actix_web::test]
async fn invalid_feature_url_is_a_field_error() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = write(
        actix_test::TestRequest::post(),
        "/features/",
        &h.admin(),
        json!({"name": "n", "title": "t", "url": "not a url"}),
    );
    let (status, body) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["url"], json!(["Enter a valid URL."]));
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = actix_test::TestRequest::post()
        .uri("/authors/")
        .insert_header((header::AUTHORIZATION, h.admin()))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"fullname\": ");
    let (status, body) = send(&app, req.to_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["non_field_errors"][0].is_string());
}

#[rstest]
#[case("/authors/abc/", "No Author found with id abc")]
#[case("/authors/999/", "No Author found with id 999")]
#[case("/posts/missing/", "No Post found with slug missing")]
#[case("/nowhere/", "Not found.")]
#[actix_web::test]
async fn unknown_resources_are_not_found(#[case] uri: &str, #[case] detail: &str) {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let (status, body) = send(&app, get(uri).to_request()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["detail"], detail);
}

#[rstest]
#[case(actix_test::TestRequest::delete(), "/authors/", "DELETE", "GET, POST, HEAD, OPTIONS")]
#[case(actix_test::TestRequest::put(), "/features/", "PUT", "GET, POST, HEAD, OPTIONS")]
#[case(
    actix_test::TestRequest::post(),
    "/posts/some-slug/",
    "POST",
    "GET, PUT, PATCH, DELETE, HEAD, OPTIONS"
)]
#[actix_web::test]
async fn unrouted_methods_are_problem_documents(
    #[case] req: actix_test::TestRequest,
    #[case] uri: &str,
    #[case] method: &str,
    #[case] allow: &str,
) {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = req
        .uri(uri)
        .insert_header((header::AUTHORIZATION, h.admin()))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers().get(header::ALLOW).unwrap(), allow);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["status"], 405);
    assert_eq!(body["detail"], format!("Method \"{method}\" not allowed."));
}

#[actix_web::test]
async fn missing_trailing_slash_is_normalized() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let (status, body) = send(&app, get("/projects").to_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[case("/authors/", "GET, POST, HEAD, OPTIONS")]
#[case("/posts/some-slug/", "GET, PUT, PATCH, DELETE, HEAD, OPTIONS")]
#[actix_web::test]
async fn options_advertises_allowed_methods(#[case] uri: &str, #[case] allow: &str) {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = actix_test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri(uri)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(header::ALLOW).unwrap(), allow);
}

#[actix_web::test]
async fn responses_carry_a_request_id() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let req = get("/health/")
        .insert_header(("x-request-id", "abc-123"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.headers().get("x-request-id").unwrap(), "abc-123");

    let res = actix_test::call_service(&app, get("/health/").to_request()).await;
    let generated = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
}

#[actix_web::test]
async fn health_reports_storage_backend() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;

    let (status, body) = send(&app, get("/health/").to_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn author_and_post_lifecycle() {
    let h = Harness::new();
    let app = actix_test::init_service(app::build(h.state.clone())).await;
    let admin = h.admin();

    let req = write(actix_test::TestRequest::post(), "/authors/", &admin, author_body("A"));
    let (status, author) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(author["id"], 1);

    let req = write(actix_test::TestRequest::post(), "/posts/", &admin, post_body("t", 1));
    let (status, post) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::CREATED);
    let rendered: PostResponse = serde_json::from_value(post.clone()).expect("post body");
    assert_eq!(rendered.author.fullname, "A");
    assert_eq!(rendered.slug, "t");
    assert_eq!(post["author"], author);

    let (status, fetched) = send(&app, get("/posts/t/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, post);

    let req = actix_test::TestRequest::delete()
        .uri("/authors/1/")
        .insert_header((header::AUTHORIZATION, admin.clone()));
    let (status, _) = send(&app, req.to_request()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get("/posts/t/").to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
