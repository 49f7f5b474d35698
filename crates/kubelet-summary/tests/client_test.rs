//! Tests for `KubeletClient` against a scripted transport.

use std::time::Duration;

use http::{Method, StatusCode};
use proven_kubelet_summary::{
    DEFAULT_KUBELET_PORT, DEFAULT_READ_ONLY_PORT, Error, KubeletClient, KubeletClientOptions,
    is_not_found,
};
use proven_kubelet_summary_mock::{MockReply, MockTransport};
use tokio_util::sync::CancellationToken;

fn client(transport: &MockTransport, insecure: bool) -> KubeletClient<MockTransport> {
    KubeletClient::new(KubeletClientOptions {
        insecure,
        port: if insecure {
            DEFAULT_READ_ONLY_PORT
        } else {
            DEFAULT_KUBELET_PORT
        },
        transport: transport.clone(),
    })
}

#[tokio::test]
async fn test_requests_https_summary_path_by_default() {
    let transport = MockTransport::replying(MockReply::ok("{}"));
    let client = client(&transport, false);

    client.get_summary("10.0.4.17").await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(
        requests[0].uri.to_string(),
        "https://10.0.4.17:10250/stats/summary/"
    );
    assert!(requests[0].uri.query().is_none());
}

#[tokio::test]
async fn test_requests_http_when_insecure() {
    let transport = MockTransport::replying(MockReply::ok("{}"));
    let client = client(&transport, true);

    for host in ["node-a", "node-b.internal", "fd00::12"] {
        client.get_summary(host).await.unwrap();
    }

    for request in transport.requests() {
        assert_eq!(request.uri.scheme_str(), Some("http"));
        assert_eq!(request.uri.port_u16(), Some(DEFAULT_READ_ONLY_PORT));
        assert_eq!(request.uri.path(), "/stats/summary/");
    }
    assert_eq!(
        transport.requests()[2].uri.to_string(),
        "http://[fd00::12]:10255/stats/summary/"
    );
}

#[tokio::test]
async fn test_success_decodes_summary() {
    let transport = MockTransport::replying(MockReply::ok(r#"{"node":{"nodeName":"n1"}}"#));
    let client = client(&transport, false);

    let summary = client.get_summary("n1.cluster.local").await.unwrap();

    assert_eq!(summary.node.node_name, "n1");
    assert!(summary.pods.is_empty());
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_not_found_is_classified() {
    let transport = MockTransport::replying(MockReply::not_found());
    let client = client(&transport, false);

    let err = client.get_summary("10.0.4.17").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(is_not_found(&err));
    assert!(
        matches!(err, Error::NotFound { ref endpoint } if endpoint == "https://10.0.4.17:10250/stats/summary/"),
        "{err}"
    );
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_invalid_json_reports_raw_body() {
    let transport = MockTransport::replying(MockReply::ok("not json"));
    let client = client(&transport, false);

    let err = client.get_summary("10.0.4.17").await.unwrap_err();

    assert!(!is_not_found(&err));
    assert!(matches!(err, Error::Decode { .. }), "{err}");
    assert!(err.to_string().contains("not json"), "{err}");
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_schema_mismatch_is_decode_error() {
    let transport = MockTransport::replying(MockReply::ok(r#"{"node":{"nodeName":["n1"]}}"#));
    let client = client(&transport, false);

    let err = client.get_summary("10.0.4.17").await.unwrap_err();

    assert!(matches!(err, Error::Decode { ref body, .. } if body.contains("nodeName")));
}

#[tokio::test]
async fn test_server_error_reports_status_and_body() {
    let transport = MockTransport::replying(MockReply::status(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal error",
    ));
    let client = client(&transport, false);

    let err = client.get_summary("10.0.4.17").await.unwrap_err();
    let message = err.to_string();

    assert!(!is_not_found(&err));
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("internal error"), "{message}");
    assert!(matches!(
        err,
        Error::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            ..
        }
    ));
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_other_statuses_are_not_not_found() {
    for status in [
        StatusCode::UNAUTHORIZED,
        StatusCode::FORBIDDEN,
        StatusCode::NO_CONTENT,
        StatusCode::SERVICE_UNAVAILABLE,
    ] {
        let transport = MockTransport::replying(MockReply::status(status, "nope"));
        let client = client(&transport, false);

        let err = client.get_summary("10.0.4.17").await.unwrap_err();

        assert!(!err.is_not_found(), "{status}: {err}");
        assert!(matches!(err, Error::Status { status: s, .. } if s == status));
    }
}

#[tokio::test]
async fn test_transport_failure_keeps_cause() {
    let transport = MockTransport::replying(MockReply::Refuse);
    let client = client(&transport, false);

    let err = client.get_summary("10.0.4.17").await.unwrap_err();

    assert!(!is_not_found(&err));
    assert!(matches!(err, Error::Transport { .. }), "{err}");
    assert!(
        err.to_string().contains("connection refused by 10.0.4.17"),
        "{err}"
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_broken_body_is_body_error() {
    let transport = MockTransport::replying(MockReply::BrokenBody {
        status: StatusCode::OK,
    });
    let client = client(&transport, false);

    let err = client.get_summary("10.0.4.17").await.unwrap_err();

    assert!(!is_not_found(&err));
    assert!(matches!(err, Error::Body { .. }), "{err}");
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_invalid_host_sends_nothing() {
    let transport = MockTransport::replying(MockReply::ok("{}"));
    let client = client(&transport, false);

    for host in ["", "10.0.0.1:9999"] {
        let err = client.get_summary(host).await.unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }), "{err}");
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_repeated_fetches_are_independent() {
    let transport = MockTransport::replying(MockReply::ok(r#"{"node":{"nodeName":"n1"}}"#));
    let client = client(&transport, false);

    let first = client.get_summary("10.0.4.17").await.unwrap();
    let second = client.get_summary("10.0.4.17").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.calls(), 2);
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_one_outcome_per_call_in_sequence() {
    let transport = MockTransport::new();
    transport.push_reply(MockReply::not_found());
    transport.push_reply(MockReply::ok(r#"{"node":{"nodeName":"n2"}}"#));
    transport.push_reply(MockReply::status(StatusCode::BAD_GATEWAY, "upstream"));
    let client = client(&transport, false);

    assert!(client.get_summary("n1").await.unwrap_err().is_not_found());
    assert_eq!(
        client.get_summary("n2").await.unwrap().node.node_name,
        "n2"
    );
    assert!(matches!(
        client.get_summary("n3").await.unwrap_err(),
        Error::Status { .. }
    ));
    assert_eq!(transport.calls(), 3);
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_concurrent_fetches_share_client() {
    let transport = MockTransport::replying(MockReply::ok(r#"{"node":{"nodeName":"n1"}}"#));
    let client = client(&transport, false);

    let handles = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.get_summary(&format!("10.0.4.{i}")).await })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().node.node_name, "n1");
    }

    assert_eq!(transport.calls(), 8);
    assert_eq!(transport.outstanding_bodies(), 0);
}

#[tokio::test]
async fn test_cancellation_drops_in_flight_request() {
    let transport = MockTransport::replying(
        MockReply::ok(r#"{"node":{"nodeName":"n1"}}"#).delayed(Duration::from_secs(30)),
    );
    let client = client(&transport, false);
    let token = CancellationToken::new();

    let cancel = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        })
    };

    let err = client
        .get_summary_with_cancellation("10.0.4.17", &token)
        .await
        .unwrap_err();
    cancel.await.unwrap();

    assert!(matches!(err, Error::Cancelled { .. }), "{err}");
    assert!(!is_not_found(&err));
    assert_eq!(transport.calls(), 1);
    assert_eq!(transport.outstanding_bodies(), 0);
}
