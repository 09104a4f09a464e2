//! Scriptable in-memory transport.
//!
//! Routes are matched on method and exact path, optionally narrowed by a
//! predicate over the request. Each route replays its scripted replies in
//! order and then repeats the last one. Every request is recorded.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Value, json};

use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};

type Predicate = Box<dyn Fn(&ApiRequest) -> bool + Send + Sync>;

#[derive(Clone)]
enum Reply {
    Response(ApiResponse),
    NetworkError(String),
}

struct Route {
    method: HttpMethod,
    path: String,
    predicate: Option<Predicate>,
    replies: VecDeque<Reply>,
}

impl Route {
    fn matches(&self, request: &ApiRequest) -> bool {
        self.method == request.method
            && self.path == request.path
            && self.predicate.as_ref().is_none_or(|p| p(request))
    }

    fn next_reply(&mut self) -> Option<Reply> {
        if self.replies.len() > 1 {
            self.replies.pop_front()
        } else {
            self.replies.front().cloned()
        }
    }
}

/// In-memory [`HttpTransport`] for tests.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("requests", &lock(&self.requests).len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Transport with no routes; unmatched requests answer 404.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: HttpMethod, path: &str, predicate: Option<Predicate>, reply: Reply) {
        let mut routes = lock(&self.routes);
        let existing = routes.iter_mut().find(|r| {
            r.method == method && r.path == path && r.predicate.is_none() && predicate.is_none()
        });
        match existing {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                predicate,
                replies: VecDeque::from([reply]),
            }),
        }
    }

    /// Script a reply. Repeated calls for the same route queue further replies.
    pub fn on(&self, method: HttpMethod, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, None, Reply::Response(ApiResponse { status, body }));
        self
    }

    /// Script a reply for requests that also satisfy `predicate`. Routes are
    /// tried in registration order, so register narrow routes first.
    pub fn on_when<F>(
        &self,
        method: HttpMethod,
        path: &str,
        predicate: F,
        status: u16,
        body: Value,
    ) -> &Self
    where
        F: Fn(&ApiRequest) -> bool + Send + Sync + 'static,
    {
        self.push(
            method,
            path,
            Some(Box::new(predicate)),
            Reply::Response(ApiResponse { status, body }),
        );
        self
    }

    /// Script a transport failure.
    pub fn fail(&self, method: HttpMethod, path: &str, message: &str) -> &Self {
        self.push(method, path, None, Reply::NetworkError(message.to_string()));
        self
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// Requests received for one method and path.
    pub fn requests_to(&self, method: HttpMethod, path: &str) -> Vec<ApiRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        lock(&self.requests).push(request.clone());

        let reply = {
            let mut routes = lock(&self.routes);
            routes
                .iter_mut()
                .find(|r| r.matches(&request))
                .and_then(Route::next_reply)
        };

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::NetworkError(message)) => Err(AppError::network(message)),
            None => Ok(ApiResponse {
                status: 404,
                body: json!({
                    "message": format!("no mock route for {} {}", request.method, request.path)
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_queue_then_repeat() {
        let mock = MockTransport::new();
        mock.on(HttpMethod::Get, "/a", 200, json!(1))
            .on(HttpMethod::Get, "/a", 200, json!(2));

        let get = || mock.execute(ApiRequest::new(HttpMethod::Get, "/a"));
        assert_eq!(get().await.unwrap().body, json!(1));
        assert_eq!(get().await.unwrap().body, json!(2));
        assert_eq!(get().await.unwrap().body, json!(2));
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_predicate_routes() {
        let mock = MockTransport::new();
        mock.on_when(
            HttpMethod::Post,
            "/s",
            |r| r.json_body().is_some_and(|b| b["n"] == 2),
            500,
            json!({"message": "nope"}),
        )
        .on(HttpMethod::Post, "/s", 201, json!({}));

        let post = |n: i64| mock.execute(ApiRequest::new(HttpMethod::Post, "/s").with_json(json!({"n": n})));
        assert_eq!(post(1).await.unwrap().status, 201);
        assert_eq!(post(2).await.unwrap().status, 500);
    }

    #[tokio::test]
    async fn test_unmatched_is_404() {
        let mock = MockTransport::new();
        let response = mock
            .execute(ApiRequest::new(HttpMethod::Delete, "/nowhere"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }
}
