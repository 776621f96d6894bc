//! HTTP source tests against a local hyper server

use fedgate_transport::{GraphQLRequest, GraphQLSource, HeaderMap, HttpSource, TransportError};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Spawn a one-route server returning `status` and `body` for every request,
/// echoing nothing. Returns the bound address.
fn spawn_server(status: StatusCode, body: &'static str) -> SocketAddr {
    let make_svc = make_service_fn(move |_conn| async move {
        Ok::<_, Infallible>(service_fn(move |_req: Request<Body>| async move {
            Ok::<_, Infallible>(
                Response::builder()
                    .status(status)
                    .body(Body::from(body))
                    .expect("static response"),
            )
        }))
    });
    let server = Server::bind(&([127, 0, 0, 1], 0).into()).serve(make_svc);
    let addr = server.local_addr();
    tokio::spawn(server);
    addr
}

#[tokio::test]
async fn fetches_service_definition_over_http() {
    let addr = spawn_server(
        StatusCode::OK,
        r#"{"data": {"_service": {"sdl": "type Query { ok: Boolean }"}}}"#,
    );

    let source = HttpSource::new();
    let request = GraphQLRequest::introspection(format!("http://{addr}/graphql"), HeaderMap::new());
    let response = source.process(request).await.unwrap();

    assert!(response.is_clean());
    assert_eq!(response.service_sdl(), Some("type Query { ok: Boolean }"));
}

#[tokio::test]
async fn caller_headers_are_attached_to_the_outbound_request() {
    // The server only answers cleanly when the shared header arrived.
    let make_svc = make_service_fn(move |_conn| async move {
        Ok::<_, Infallible>(service_fn(move |req: Request<Body>| async move {
            let authorized = req
                .headers()
                .get("x-gateway")
                .is_some_and(|v| v.as_bytes() == b"fedgate");
            let response = if authorized {
                Response::new(Body::from(
                    r#"{"data": {"_service": {"sdl": "type Query { ok: Boolean }"}}}"#,
                ))
            } else {
                Response::builder()
                    .status(StatusCode::FORBIDDEN)
                    .body(Body::from("missing header"))
                    .expect("static response")
            };
            Ok::<_, Infallible>(response)
        }))
    });
    let server = Server::bind(&([127, 0, 0, 1], 0).into()).serve(make_svc);
    let addr = server.local_addr();
    tokio::spawn(server);

    let mut headers = HeaderMap::new();
    headers.insert("x-gateway", "fedgate".parse().unwrap());

    let source = HttpSource::new();
    let request = GraphQLRequest::introspection(format!("http://{addr}/graphql"), headers);
    let response = source.process(request).await.unwrap();
    assert!(response.is_clean());

    // Without the header the same endpoint refuses the request.
    let bare = GraphQLRequest::introspection(format!("http://{addr}/graphql"), HeaderMap::new());
    let err = source.process(bare).await.unwrap_err();
    assert!(matches!(err, TransportError::Status(StatusCode::FORBIDDEN)));
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let addr = spawn_server(StatusCode::INTERNAL_SERVER_ERROR, "boom");

    let source = HttpSource::new();
    let request = GraphQLRequest::introspection(format!("http://{addr}/graphql"), HeaderMap::new());
    let err = source.process(request).await.unwrap_err();

    assert!(matches!(
        err,
        TransportError::Status(StatusCode::INTERNAL_SERVER_ERROR)
    ));
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let addr = spawn_server(StatusCode::OK, "<html>not graphql</html>");

    let source = HttpSource::new();
    let request = GraphQLRequest::introspection(format!("http://{addr}/graphql"), HeaderMap::new());
    let err = source.process(request).await.unwrap_err();

    assert!(matches!(err, TransportError::Json(_)));
}

#[tokio::test]
async fn invalid_url_is_rejected_before_any_io() {
    let source = HttpSource::new();
    let request = GraphQLRequest::introspection("not a url", HeaderMap::new());
    let err = source.process(request).await.unwrap_err();

    assert!(matches!(err, TransportError::InvalidUrl(_)));
}
