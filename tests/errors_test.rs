use google_plus::{Client, ClientConfig, Error, ListOptions};
use mockito::{Matcher, Server};

fn client(server: &Server) -> Client {
    let config = ClientConfig::new()
        .with_api_key("AIzaSyTestKey")
        .with_api_endpoint(format!("{}/plus", server.url()));
    Client::new(config).unwrap()
}

#[tokio::test]
async fn test_not_found_is_an_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/plus/v1/people/0")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"errors":[{"domain":"global","reason":"notFound","message":"Not Found"}],"code":404,"message":"Not Found"}}"#)
        .create_async()
        .await;

    let err = client(&server).get_person("0").await.unwrap_err();
    match err {
        Error::Api { status, ref message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        ref other => panic!("Expected API error, got {:?}", other),
    }
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_server_error_keeps_raw_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/plus/v1/activities/z12abc")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = client(&server).get_activity("z12abc").await.unwrap_err();
    match err {
        Error::Api { status, ref message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        ref other => panic!("Expected API error, got {:?}", other),
    }
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/plus/v1/activities/z12abc/comments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"kind":"plus#commentFeed","items":["#)
        .create_async()
        .await;

    let err = client(&server)
        .list_comments("z12abc", &ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{:?}", err);
}

#[tokio::test]
async fn test_unreachable_server_is_an_http_error() {
    let config = ClientConfig::new()
        .with_api_key("AIzaSyTestKey")
        .with_api_endpoint("http://127.0.0.1:1/plus");
    let client = Client::new(config).unwrap();

    let err = client.get_person("me").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)), "{:?}", err);
}

#[tokio::test]
async fn test_missing_required_parameter_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = client(&server)
        .search_people("", &ListOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    mock.assert_async().await;
}
