use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use responder_core::HttpResponse;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod config;

pub use config::Config;

const INDEX_PAGE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Responder</title></head>
<body>
<h1>Responder</h1>
<p>Serve any response straight from the URL: <code>/poc.html?s=200&amp;ct=text%2Fhtml&amp;cors=1&amp;b=%3Ch1%3Ehi%3C%2Fh1%3E</code></p>
<p>Keys: <code>s</code> status, <code>t</code> content type, <code>b</code> body,
<code>b64</code> base64 body, <code>cors</code> CORS bundle. Header keys:
<code>ct</code>, <code>c</code>, <code>l</code>, <code>csp</code> or the full lowercase header name.</p>
</body>
</html>
"#;

/// Router answering every path and method from its query string.
pub fn app() -> Router {
    Router::new().fallback(respond)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let app = app().layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }));
    axum::serve(listener, app).await
}

async fn respond(uri: Uri) -> Response {
    let path = uri.path();
    let query = uri.query().unwrap_or_default();

    if query.is_empty() {
        match path {
            "/" => return Html(INDEX_PAGE).into_response(),
            "/favicon.ico" => return StatusCode::NO_CONTENT.into_response(),
            _ => {}
        }
    }

    let spec = match responder_core::decode(query) {
        Ok(spec) => spec,
        Err(err) => {
            tracing::debug!(error = %err, "rejected share link");
            return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
        }
    };

    match to_axum(spec.materialize(path)) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "response could not be built");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

fn to_axum(response: HttpResponse) -> Result<Response, axum::http::Error> {
    let mut builder = Response::builder().status(response.status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_bytes());
    }
    builder.body(Body::from(response.body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materialized_response_converts() {
        let response = to_axum(HttpResponse {
            status: 302,
            headers: vec![("location".to_string(), "/next".to_string())],
            body: Vec::new(),
        })
        .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()["location"], "/next");
    }

    #[test]
    fn non_ascii_header_value_is_accepted() {
        let response = to_axum(HttpResponse {
            status: 200,
            headers: vec![("content-disposition".to_string(), "attachment; filename=ü.txt".to_string())],
            body: Vec::new(),
        })
        .unwrap();
        assert_eq!(
            response.headers()["content-disposition"].as_bytes(),
            "attachment; filename=ü.txt".as_bytes()
        );
    }
}
