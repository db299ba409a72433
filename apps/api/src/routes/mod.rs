pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers::handle_compatibility;
use crate::profiles::handlers::handle_list_profiles;
use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        .route("/api/v1/sessions/:id/result", get(handlers::handle_get_result))
        // Matching and stored profiles
        .route("/api/v1/compatibility", post(handle_compatibility))
        .route("/api/v1/profiles", get(handle_list_profiles))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::ChatModel;
    use crate::profiles::store::MemoryProfileStore;
    use crate::state::test_state;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn submit(app: &Router, id: &str, form: Value) -> Response {
        send(
            app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/submit"),
            Some(form),
        )
        .await
    }

    fn form_steps() -> Vec<Value> {
        vec![
            json!({"page": "login", "user_id": "camille"}),
            json!({
                "page": "questions_part1",
                "relationship_priority": "C) La communication",
                "sociability": "Introverti(e)"
            }),
            json!({"page": "questions_part2", "ideal_day": "Culture et musées", "seriousness": 6}),
            json!({
                "page": "lifestyle",
                "activity_level": 3,
                "wants_children": false,
                "smoker": false,
                "accepts_smoker": true,
                "values": ["Créativité", "Humour"]
            }),
        ]
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), None));
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_full_form_without_chat() {
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), None));

        let created = send(&app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let view = json_body(created).await;
        assert_eq!(view["page"], "login");
        let id = view["session_id"].as_str().unwrap().to_string();

        let mut last = Value::Null;
        for step in form_steps() {
            let response = submit(&app, &id, step).await;
            assert_eq!(response.status(), StatusCode::OK);
            last = json_body(response).await;
        }
        assert_eq!(last["page"], "result");

        let result = json_body(
            send(&app, Method::GET, &format!("/api/v1/sessions/{id}/result"), None).await,
        )
        .await;
        // 7 + 4 + 3 + 6
        assert_eq!(result["base_score"], 20);
        assert_eq!(result["profile_saved"], true);
        assert!(result["best_match"].is_null());

        let profiles = json_body(send(&app, Method::GET, "/api/v1/profiles", None).await).await;
        assert_eq!(profiles.as_array().unwrap().len(), 1);
        assert_eq!(profiles[0]["user_id"], "camille");
        assert_eq!(profiles[0]["score"], "20");
    }

    #[tokio::test]
    async fn test_chat_page_with_model() {
        let model: Arc<dyn ChatModel> = Arc::new(ScriptedModel::new(vec![
            "Tu préfères la mer ou la montagne ?",
            "Et ton dernier fou rire ?",
            "Ton rêve le plus fou ?",
            r#"{"score": 68, "feedback": "Curieuse et douce."}"#,
        ]));
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), Some(model)));
        let id = json_body(send(&app, Method::POST, "/api/v1/sessions", None).await).await
            ["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let mut view = Value::Null;
        for step in form_steps() {
            view = json_body(submit(&app, &id, step).await).await;
        }
        assert_eq!(view["page"], "chat");
        assert_eq!(view["chat"][0]["content"], "Tu préfères la mer ou la montagne ?");

        for message in ["La mer", "Hier soir", "Le tour du monde"] {
            view = json_body(submit(&app, &id, json!({"page": "chat", "message": message})).await)
                .await;
        }
        assert_eq!(view["page"], "result");
        assert_eq!(view["chat_finished"], true);
        assert_eq!(view["questions_asked"], 3);

        let result = json_body(
            send(&app, Method::GET, &format!("/api/v1/sessions/{id}/result"), None).await,
        )
        .await;
        assert_eq!(result["assessment"]["score"], 68);
    }

    #[tokio::test]
    async fn test_blank_login_is_bad_request() {
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), None));
        let id = json_body(send(&app, Method::POST, "/api/v1/sessions", None).await).await
            ["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = submit(&app, &id, json!({"page": "login", "user_id": "  "})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");

        let view = json_body(
            send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await,
        )
        .await;
        assert_eq!(view["page"], "login");
    }

    #[tokio::test]
    async fn test_out_of_order_submission_is_conflict() {
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), None));
        let id = json_body(send(&app, Method::POST, "/api/v1/sessions", None).await).await
            ["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = submit(&app, &id, form_steps().remove(2)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_and_deleted_sessions_are_not_found() {
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), None));
        let missing = send(
            &app,
            Method::GET,
            "/api/v1/sessions/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let id = json_body(send(&app, Method::POST, "/api/v1/sessions", None).await).await
            ["session_id"]
            .as_str()
            .unwrap()
            .to_string();
        let deleted = send(&app, Method::DELETE, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        let gone = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_compatibility_endpoint() {
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), None));
        let record = json!({"seriousness": 7, "smoker": true, "values": ["Humour"]});
        let body = json_body(
            send(
                &app,
                Method::POST,
                "/api/v1/compatibility",
                Some(json!({"a": record, "b": record})),
            )
            .await,
        )
        .await;
        assert_eq!(body["percentage"], 100);
        assert_eq!(body["passes_dealbreakers"], true);
    }

    #[tokio::test]
    async fn test_compatibility_accepts_float_and_null_sliders() {
        let app = build_router(test_state(Arc::new(MemoryProfileStore::default()), None));
        let response = send(
            &app,
            Method::POST,
            "/api/v1/compatibility",
            Some(json!({
                "a": {"seriousness": 6.5, "activity_level": null},
                "b": {"seriousness": 7, "activity_level": 5}
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["percentage"], 100);
    }
}
