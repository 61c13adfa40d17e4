//! # HTTP Service Adapter
//!
//! [`MappingService`] puts a [`Router`] behind an `http::Request` /
//! `http::Response` boundary so it can sit inside any server loop:
//!
//! 1. the request method selects the route table,
//! 2. the URI path is percent-decoded (`400 Bad Request` if that is not UTF-8),
//! 3. the decoded path is matched and the route's handler runs with an [`Exchange`],
//! 4. a request no route claims gets `404 Not Found`,
//! 5. every error (unsupported method, conversion failure, handler failure)
//!    goes to the service's [`ExceptionHandler`], which writes the response.
//!
//! ```rust
//! use http::{Request, StatusCode};
//! use urlmap::service::MappingService;
//! use urlmap::{Router, VarType};
//!
//! let mut router = Router::default();
//! router.get("show", "/products/{id}", |m, ex: &mut urlmap::service::Exchange| {
//!     *ex.response.body_mut() = format!("product {}", m.variable::<i32>("id")?);
//!     Ok(())
//! }, &[VarType::Integer])?;
//!
//! let service = MappingService::new(router);
//! let res = service.handle(Request::get("/products/13").body(String::new())?);
//! assert_eq!(res.status(), StatusCode::OK);
//! assert_eq!(res.body(), "product 13");
//!
//! let res = service.handle(Request::get("/nope").body(String::new())?);
//! assert_eq!(res.status(), StatusCode::NOT_FOUND);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;

use http::{Request, Response, StatusCode};
use tracing::{error, warn};

use crate::error::RouterError;
use crate::router::{HttpMethod, Router, SharedRouter};

/// Handler argument for routes served by a [`MappingService`].
///
/// Handlers read the request and fill in the response, which starts out as an
/// empty `200 OK`.
#[derive(Debug)]
pub struct Exchange {
    pub request: Request<String>,
    pub response: Response<String>,
}

impl Exchange {
    #[must_use]
    pub fn new(request: Request<String>) -> Self {
        Self {
            request,
            response: Response::new(String::new()),
        }
    }

    /// Replace the response with an empty one carrying `status`.
    pub fn send_status(&mut self, status: StatusCode) {
        let mut response = Response::new(String::new());
        *response.status_mut() = status;
        self.response = response;
    }
}

/// Turns a failed request into a response.
pub trait ExceptionHandler: Send + Sync {
    fn handle_exception(&self, exchange: &mut Exchange, error: &RouterError);
}

impl<F> ExceptionHandler for F
where
    F: Fn(&mut Exchange, &RouterError) + Send + Sync,
{
    fn handle_exception(&self, exchange: &mut Exchange, error: &RouterError) {
        self(exchange, error)
    }
}

/// Default [`ExceptionHandler`]: logs the error and answers
/// `405 Method Not Allowed` for unsupported methods, `500` for anything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingExceptionHandler;

impl ExceptionHandler for LoggingExceptionHandler {
    fn handle_exception(&self, exchange: &mut Exchange, err: &RouterError) {
        let status = match err {
            RouterError::UnsupportedMethod { .. } => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(
            method = %exchange.request.method(),
            path = %exchange.request.uri().path(),
            error_kind = err.kind(),
            error = %err,
            status = status.as_u16(),
            "Request failed"
        );
        exchange.send_status(status);
    }
}

/// Dispatches `http` requests through a swappable [`Router`].
pub struct MappingService {
    router: SharedRouter<Exchange>,
    exception_handler: Arc<dyn ExceptionHandler>,
}

impl MappingService {
    /// A service using [`LoggingExceptionHandler`].
    #[must_use]
    pub fn new(router: Router<Exchange>) -> Self {
        Self::with_exception_handler(router, LoggingExceptionHandler)
    }

    #[must_use]
    pub fn with_exception_handler(
        router: Router<Exchange>,
        exception_handler: impl ExceptionHandler + 'static,
    ) -> Self {
        Self {
            router: SharedRouter::new(router),
            exception_handler: Arc::new(exception_handler),
        }
    }

    /// The live router; [`SharedRouter::store`] replaces it for later requests.
    #[must_use]
    pub fn router(&self) -> &SharedRouter<Exchange> {
        &self.router
    }

    /// Serve one request.
    pub fn handle(&self, request: Request<String>) -> Response<String> {
        let method = request.method().clone();
        let path = match urlencoding::decode(request.uri().path()) {
            Ok(path) => path.into_owned(),
            Err(err) => {
                warn!(method = %method, path = %request.uri().path(), error = %err, "Path is not valid UTF-8");
                let mut exchange = Exchange::new(request);
                exchange.send_status(StatusCode::BAD_REQUEST);
                return exchange.response;
            }
        };
        let mut exchange = Exchange::new(request);

        let router = self.router.load();
        let outcome = HttpMethod::try_from(&method)
            .and_then(|m| router.dispatch_method(m, path.as_str(), &mut exchange));

        match outcome {
            Ok(matched) if matched.is_not_found() => {
                warn!(method = %method, path = %path, "No route for request");
                exchange.send_status(StatusCode::NOT_FOUND);
            }
            Ok(_) => {}
            Err(err) => self.exception_handler.handle_exception(&mut exchange, &err),
        }
        exchange.response
    }
}

impl std::fmt::Debug for MappingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingService")
            .field("router", &self.router.load())
            .finish_non_exhaustive()
    }
}
