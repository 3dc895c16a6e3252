//! Run with
//!
//! ```not_rust
//! cargo run --example resource_controller --features="axum"
//! ```
//!

use std::{borrow::Cow, sync::Arc};

use axum::{
    extract::{Path, State},
    handler::Handler,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use composable_tower_authz::{
    authorize::ResourceAuthorizer,
    caller::Caller,
    error::AuthorizationError,
    gate::{Arguments, Gate, GateResponse, Subject},
    middleware::MiddlewareRegistry,
    resource::{Resource, ResourceType},
};

#[path = "../util/util.rs"]
mod util;

struct Post;

impl Resource for Post {
    fn resource_name() -> Cow<'static, str> {
        Cow::Borrowed("blog::Post")
    }
}

/// Everyone may view posts, only `admin` may change them.
#[derive(Debug, Clone, Default)]
struct PolicyGate {
    user: Option<String>,
}

impl Gate for PolicyGate {
    type User = String;

    type Error = AuthorizationError;

    async fn authorize(
        &self,
        ability: &str,
        arguments: &Arguments,
    ) -> Result<GateResponse, Self::Error> {
        let user = self.user.as_deref().unwrap_or("guest");

        let subject = arguments
            .first()
            .map(ToString::to_string)
            .unwrap_or_default();

        let response = match ability {
            "view" => GateResponse::allow(),
            _ if user == "admin" => GateResponse::allow(),
            "delete" => GateResponse::deny_as_not_found(),
            _ => GateResponse::deny()
                .with_message(format!("{user} may not {ability} {subject}"))
                .with_code("post.forbidden"),
        };

        response.authorize()
    }

    fn for_user(&self, user: Self::User) -> Self {
        Self { user: Some(user) }
    }
}

#[derive(Debug, Clone)]
struct AppState {
    authorizer: ResourceAuthorizer<PolicyGate>,
    registry: Arc<MiddlewareRegistry>,
}

fn user(headers: &HeaderMap) -> String {
    headers
        .get("x-user")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("guest")
        .to_owned()
}

fn post_subject(post: String) -> Subject {
    Subject::model(ResourceType::of::<Post>(), post)
}

async fn show(
    State(state): State<AppState>,
    caller: Caller,
    headers: HeaderMap,
    Path(post): Path<String>,
) -> Result<String, AuthorizationError> {
    state
        .authorizer
        .authorize_for_user(&caller, user(&headers), post_subject(post.clone()), ())
        .await?;

    Ok(format!("Post {post}"))
}

async fn update(
    State(state): State<AppState>,
    caller: Caller,
    headers: HeaderMap,
    Path(post): Path<String>,
) -> Result<String, AuthorizationError> {
    state
        .authorizer
        .authorize_for_user(&caller, user(&headers), post_subject(post.clone()), ())
        .await?;

    Ok(format!("Updated post {post}"))
}

async fn destroy(
    State(state): State<AppState>,
    caller: Caller,
    headers: HeaderMap,
    Path(post): Path<String>,
) -> Result<String, AuthorizationError> {
    state
        .authorizer
        .authorize_for_user(&caller, user(&headers), post_subject(post.clone()), ())
        .await?;

    Ok(format!("Deleted post {post}"))
}

async fn store(
    State(state): State<AppState>,
    caller: Caller,
    headers: HeaderMap,
) -> Result<String, AuthorizationError> {
    state
        .authorizer
        .authorize_for_user(&caller, user(&headers), ResourceType::of::<Post>(), ())
        .await?;

    Ok(String::from("Stored post"))
}

async fn middleware(
    State(state): State<AppState>,
    Path(method): Path<String>,
) -> Json<Vec<String>> {
    Json(
        state
            .registry
            .middleware_for(&method)
            .map(ToOwned::to_owned)
            .collect(),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    util::init("resource_controller")?;

    let authorizer = ResourceAuthorizer::with_config(PolicyGate::default(), util::authorizer_config()?);

    let mut registry = MiddlewareRegistry::new();

    authorizer.authorize_resource(&mut registry, &authorizer.resource(ResourceType::of::<Post>()));

    for registered in registry.registered() {
        tracing::info!(middleware = %registered.middleware, options = ?registered.options, "Registered");
    }

    let state = AppState {
        authorizer,
        registry: Arc::new(registry),
    };

    let app = Router::new()
        // curl -X POST -H "x-user: admin" localhost:5000/posts
        .route(
            "/posts",
            post(store.layer(Caller::new("store").layer())),
        )
        // curl localhost:5000/posts/1
        // curl -X PUT localhost:5000/posts/1
        // curl -X DELETE -H "x-user: admin" localhost:5000/posts/1
        .route(
            "/posts/:post",
            get(show.layer(Caller::new("show").layer()))
                .put(update.layer(Caller::new("update").layer()))
                .delete(destroy.layer(Caller::new("destroy").layer())),
        )
        // curl localhost:5000/middleware/show
        .route("/middleware/:method", get(middleware))
        .with_state(state)
        .layer(util::trace_layer());

    util::serve(app).await
}
