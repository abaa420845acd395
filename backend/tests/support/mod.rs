//! Shared harness for HTTP integration tests.
//!
//! Builds the application over the in-memory adapters and drives it through
//! `actix_web::test`, carrying the session cookie between requests the way
//! a browser would.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use carnet::Trace;
use carnet::domain::ports::{CategoryCacheScope, PasswordHasher, UserRepository};
use carnet::domain::{
    AccountService, CategoryService, ContactService, Role, User, UserDraft, Validate,
};
use carnet::inbound::http::configure;
use carnet::inbound::http::state::HttpState;
use carnet::outbound::cache::InMemoryCategoryCache;
use carnet::outbound::memory::{
    InMemoryCategoryRepository, InMemoryContactRepository, InMemoryUserRepository,
};
use carnet::outbound::security::Argon2PasswordHasher;

/// Password given to every account registered through [`World::register`].
pub const PASSWORD: &str = "correct horse battery";

/// In-memory adapters shared by one test's application instance.
pub struct World {
    pub users: Arc<InMemoryUserRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub contacts: Arc<InMemoryContactRepository>,
    pub cache: Arc<InMemoryCategoryCache>,
    pub hasher: Arc<Argon2PasswordHasher>,
    scope: CategoryCacheScope,
    key: Key,
}

impl World {
    pub fn new(scope: CategoryCacheScope) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
            contacts: Arc::new(InMemoryContactRepository::new()),
            cache: Arc::new(InMemoryCategoryCache::new()),
            hasher: Arc::new(Argon2PasswordHasher::new()),
            scope,
            key: Key::generate(),
        }
    }

    /// Store an account holding `roles` with password [`PASSWORD`].
    pub async fn register(&self, username: &str, roles: &[&str]) -> User {
        let draft = UserDraft {
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: self.hasher.hash(PASSWORD).expect("hash password"),
            roles: roles.iter().map(|role| (*role).to_owned()).collect(),
        };
        let user = draft.validate().expect("valid fixture account");
        self.users.insert(&user).await.expect("store account");
        user
    }

    /// Store an account holding `ROLE_USER`.
    pub async fn member(&self, username: &str) -> User {
        self.register(username, &[Role::USER]).await
    }

    fn state(&self) -> web::Data<HttpState> {
        web::Data::new(HttpState::from_services(
            Arc::new(AccountService::new(self.users.clone(), self.hasher.clone())),
            Arc::new(CategoryService::with_scope(
                self.categories.clone(),
                self.cache.clone(),
                self.scope,
            )),
            Arc::new(ContactService::new(self.contacts.clone())),
        ))
    }

    /// Application wired the same way as the server binary.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(self.state())
            .wrap(Trace)
            .service(web::scope("").wrap(session).configure(configure))
    }
}

/// Cookie jar holding the latest session cookie.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    /// Send `request`, attaching and then refreshing the session cookie.
    pub async fn send<S, B>(&mut self, app: &S, request: actix_test::TestRequest) -> ServiceResponse<B>
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let response = actix_test::call_service(app, request.to_request()).await;
        if let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            self.cookie = Some(cookie.into_owned());
        }
        response
    }

    /// Log in as `username` with [`PASSWORD`].
    pub async fn login<S, B>(&mut self, app: &S, username: &str)
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let response = self
            .send(
                app,
                actix_test::TestRequest::post()
                    .uri("/login")
                    .set_json(serde_json::json!({ "username": username, "password": PASSWORD })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "login as {username}");
    }

    /// `GET path`, asserting 200 and decoding the JSON body.
    pub async fn get_json<S, B>(&mut self, app: &S, path: &str) -> Value
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let response = self
            .send(app, actix_test::TestRequest::get().uri(path))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        actix_test::read_body_json(response).await
    }

    /// Submit `form` to `path` as `application/x-www-form-urlencoded`.
    pub async fn post_form<S, B, F>(&mut self, app: &S, path: &str, form: &F) -> ServiceResponse<B>
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
        F: serde::Serialize,
    {
        self.send(app, actix_test::TestRequest::post().uri(path).set_form(form))
            .await
    }

    /// `DELETE path` with an optional `_token` field.
    pub async fn delete<S, B>(&mut self, app: &S, path: &str, token: Option<&str>) -> ServiceResponse<B>
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let request = actix_test::TestRequest::delete().uri(path);
        let request = match token {
            Some(token) => request.set_form([("_token", token)]),
            None => request,
        };
        self.send(app, request).await
    }
}

/// `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

/// String field `name` of every entry in a JSON array.
pub fn field(list: &Value, name: &str) -> Vec<String> {
    list.as_array()
        .expect("json array")
        .iter()
        .map(|item| item[name].as_str().expect("string field").to_owned())
        .collect()
}
