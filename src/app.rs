//! Request orchestrator
//!
//! Runs the preprocessor chain, then dispatches into the domain application with a
//! fresh result interface and a lazy command provider. Whatever the domain does, the
//! caller gets a well-formed response in the negotiated format.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::domain::DomainApplication;
use crate::handler::RequestContext;
use crate::http::build_rendered_response;
use crate::interface::{InterfaceProvider, ResponseFormat};
use crate::preprocess::PreprocessorChain;
use crate::render::{DomainResult, RenderedResponse};
use crate::routing::{PathCommandProvider, RouteTable};

/// Failures raised at the dispatch boundary rather than by the domain itself
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no response was produced for '{path}'")]
    NoResponse { path: String },

    #[error("domain application panicked: {0}")]
    Panicked(String),
}

pub struct BrochureHttpApplication {
    domain: Arc<dyn DomainApplication>,
    preprocessors: PreprocessorChain,
    routes: RouteTable,
    interface_provider: InterfaceProvider,
}

impl BrochureHttpApplication {
    /// Brochure routes, no preprocessors
    pub fn new(domain: Arc<dyn DomainApplication>) -> Self {
        Self {
            domain,
            preprocessors: PreprocessorChain::new(),
            routes: RouteTable::brochure(),
            interface_provider: InterfaceProvider::new(),
        }
    }

    #[must_use]
    pub fn with_preprocessors(mut self, preprocessors: PreprocessorChain) -> Self {
        self.preprocessors = preprocessors;
        self
    }

    #[must_use]
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub const fn preprocessors(&self) -> &PreprocessorChain {
        &self.preprocessors
    }

    pub fn handle(&self, request: &RequestContext<'_>) -> Response<Full<Bytes>> {
        if let Some(response) = self.preprocessors.run(request) {
            return response;
        }

        let mut ui = self
            .interface_provider
            .make_interface(request.path, request.accept());
        let format = ui.format();
        let provider =
            PathCommandProvider::new(&self.routes, request.method, request.path).into_provider();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.domain.process_command(provider, &mut ui)
        }));

        let rendered = match outcome {
            Ok(Ok(())) => ui.get_response().unwrap_or_else(|| {
                let error = DispatchError::NoResponse {
                    path: request.path.to_string(),
                };
                render_failure(format, &error)
            }),
            Ok(Err(error)) => render_failure(format, &error),
            Err(payload) => render_failure(format, &DispatchError::Panicked(panic_message(&*payload))),
        };

        build_rendered_response(rendered)
    }
}

/// Render the exception outcome; basics are not available at this level
fn render_failure(format: ResponseFormat, error: &(dyn std::error::Error + 'static)) -> RenderedResponse {
    tracing::error!(error = %error, "domain dispatch failed");
    format.render(&DomainResult::UnexpectedException {
        error,
        basics: None,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommandProvider, DomainError, UserInterface};
    use hyper::{Request, StatusCode};

    struct Silent;

    impl DomainApplication for Silent {
        fn process_command(
            &self,
            provider: CommandProvider<'_>,
            _ui: &mut dyn UserInterface,
        ) -> Result<(), DomainError> {
            let _ = provider();
            Ok(())
        }
    }

    struct Panicking;

    impl DomainApplication for Panicking {
        fn process_command(
            &self,
            _provider: CommandProvider<'_>,
            _ui: &mut dyn UserInterface,
        ) -> Result<(), DomainError> {
            panic!("cover section exploded");
        }
    }

    struct Failing;

    impl DomainApplication for Failing {
        fn process_command(
            &self,
            _provider: CommandProvider<'_>,
            _ui: &mut dyn UserInterface,
        ) -> Result<(), DomainError> {
            Err(DomainError::Processing("store offline".to_string()))
        }
    }

    fn body_of(response: Response<Full<Bytes>>) -> String {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            use http_body_util::BodyExt;
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            String::from_utf8(bytes.to_vec()).unwrap()
        })
    }

    fn json_get(app: &BrochureHttpApplication, path: &str) -> Response<Full<Bytes>> {
        let req = Request::builder()
            .uri(path)
            .header("Accept", "application/json")
            .body(())
            .unwrap();
        app.handle(&RequestContext::from_request(&req))
    }

    #[test]
    fn test_silent_domain_becomes_exception() {
        let app = BrochureHttpApplication::new(Arc::new(Silent));
        let response = json_get(&app, "/");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response), r#"{"error": "no response was produced for '/'"}"#);
    }

    #[test]
    fn test_domain_error_becomes_exception() {
        let app = BrochureHttpApplication::new(Arc::new(Failing));
        let response = json_get(&app, "/");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(body_of(response), r#"{"error": "store offline"}"#);
    }

    #[test]
    fn test_panic_becomes_exception() {
        let app = BrochureHttpApplication::new(Arc::new(Panicking));
        let req = Request::builder().uri("/").body(()).unwrap();
        let response = app.handle(&RequestContext::from_request(&req));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["content-type"], "text/html; charset=utf-8");
        let body = body_of(response);
        assert!(body.contains("<title>Error | 500</title>"));
        assert!(body.contains("cover section exploded"));
    }

    #[test]
    fn test_panic_message_payloads() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&"owned".to_string()), "owned");
        assert_eq!(panic_message(&42_u8), "unknown panic");
    }
}
