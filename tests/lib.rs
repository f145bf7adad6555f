//! Harness for driving the full router against an in-memory database.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool};
use roster_server::{AppConfig, AppState, build_router};
use sea_orm::Database;
use tower::ServiceExt;

const MEMORY_URL: &str = "sqlite::memory:";

pub struct TestApp {
    pub pool: DbPool,
    router: Router,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// `Set-Cookie` headers, verbatim.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// Non-empty cookies from `Set-Cookie`, as a `Cookie` request header
    /// value.
    pub fn cookie_header(&self) -> Option<String> {
        let pairs = self
            .set_cookies()
            .iter()
            .filter_map(|raw| raw.split(';').next().map(str::trim).map(str::to_string))
            .filter(|pair| pair.split_once('=').is_some_and(|(_, v)| !v.is_empty()))
            .collect::<Vec<_>>();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let pool = Database::connect(MEMORY_URL)
            .await
            .context("connect sqlite")?;
        Migrator::up(&pool, None).await.context("migrate")?;
        let config = AppConfig::ephemeral(DatabaseSettings::new(MEMORY_URL));
        let router = build_router(AppState::new(pool.clone(), Arc::new(config)));
        Ok(Self { pool, router })
    }

    pub async fn request(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes();
        Ok(TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec())?,
        })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.get_with_cookies(uri, None).await
    }

    pub async fn get_with_cookies(&self, uri: &str, cookies: Option<&str>) -> Result<TestResponse> {
        let mut builder = Request::get(uri);
        if let Some(cookies) = cookies {
            builder = builder.header(header::COOKIE, cookies);
        }
        self.request(builder.body(Body::empty())?).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Result<TestResponse> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))?;
        self.request(request).await
    }

    /// Follow a redirect the way a browser would, carrying the cookies it set.
    pub async fn follow(&self, response: &TestResponse) -> Result<TestResponse> {
        let location = response
            .location()
            .context("response is not a redirect")?;
        let cookies = response.cookie_header();
        self.get_with_cookies(location, cookies.as_deref()).await
    }
}
