//! Tests for `NetworkChannel` dispatch.

use super::*;
use crate::advisor::NetworkAdvisor;
use crate::network::test_fixtures::MockProbe;
use crate::network::{ProbeReport, Transport};
use serde_json::{Value, json};

fn channel(report: ProbeReport) -> NetworkChannel<MockProbe> {
    NetworkChannel::new(NetworkAdvisor::new(MockProbe::returning_reports(vec![
        report,
    ])))
}

fn failing_channel() -> NetworkChannel<MockProbe> {
    NetworkChannel::new(NetworkAdvisor::new(MockProbe::failing(
        "connectivity service",
    )))
}

mod is_active_network_metered {
    use super::*;

    #[test]
    fn unmetered_wifi_answers_false() {
        let channel = channel(ProbeReport::online(Transport::Wifi, Some(false)));

        let response = channel.handle(&MethodCall::new("isActiveNetworkMetered"));

        assert_eq!(response, MethodResponse::success(false));
    }

    #[test]
    fn cellular_answers_true() {
        let channel = channel(ProbeReport::online(Transport::Cellular, Some(true)));

        let response = channel.handle(&MethodCall::new("isActiveNetworkMetered"));

        assert!(response.is_success());
        assert_eq!(response, MethodResponse::success(true));
    }

    #[test]
    fn offline_answers_true() {
        let channel = channel(ProbeReport::offline());

        let response = channel.handle(&MethodCall::new("isActiveNetworkMetered"));

        assert_eq!(response, MethodResponse::success(true));
    }

    #[test]
    fn arguments_are_ignored() {
        let channel = channel(ProbeReport::online(Transport::Wifi, Some(false)));
        let call = MethodCall {
            method: "isActiveNetworkMetered".to_string(),
            arguments: json!({"unexpected": true}),
        };

        assert_eq!(channel.handle(&call), MethodResponse::success(false));
    }

    #[test]
    fn probe_failure_is_platform_error() {
        let response = failing_channel().handle(&MethodCall::new("isActiveNetworkMetered"));

        assert!(!response.is_success());
        match response {
            MethodResponse::Error { code, message } => {
                assert_eq!(code, PLATFORM_ERROR);
                assert!(message.contains("connectivity service"));
            }
            other => panic!("expected platform error, got {other:?}"),
        }
    }

    #[test]
    fn each_call_probes_once() {
        let channel = channel(ProbeReport::online(Transport::Wifi, Some(false)));

        let _ = channel.handle(&MethodCall::new("isActiveNetworkMetered"));
        let _ = channel.handle(&MethodCall::new("isActiveNetworkMetered"));

        assert_eq!(channel.advisor().probe().call_count(), 2);
    }
}

mod get_network_status {
    use super::*;

    #[test]
    fn returns_full_classification() {
        let channel = channel(ProbeReport::online(Transport::Ethernet, Some(false)));

        let response = channel.handle(&MethodCall::new("getNetworkStatus"));

        assert_eq!(
            response,
            MethodResponse::success(
                json!({"connected": true, "metered": false, "transport": "ethernet"})
            )
        );
    }

    #[test]
    fn disconnected_is_reported_metered() {
        let channel = channel(ProbeReport::offline());

        let response = channel.handle(&MethodCall::new("getNetworkStatus"));

        assert_eq!(
            response,
            MethodResponse::success(
                json!({"connected": false, "metered": true, "transport": "unknown"})
            )
        );
    }
}

mod unknown_methods {
    use super::*;

    #[test]
    fn unknown_method_is_not_implemented() {
        let channel = channel(ProbeReport::offline());

        let response = channel.handle(&MethodCall::new("isActiveNetworkFast"));

        assert_eq!(
            response,
            MethodResponse::NotImplemented {
                method: "isActiveNetworkFast".to_string()
            }
        );
    }

    #[test]
    fn unknown_method_does_not_probe() {
        let channel = channel(ProbeReport::offline());

        let _ = channel.handle(&MethodCall::new("isActiveNetworkFast"));

        assert_eq!(channel.advisor().probe().call_count(), 0);
    }

    #[test]
    fn unknown_method_is_not_a_platform_error_even_when_probe_fails() {
        let response = failing_channel().handle(&MethodCall::new("reboot"));

        assert!(!response.is_success());
        assert!(matches!(response, MethodResponse::NotImplemented { .. }));
    }
}

mod lines {
    use super::*;

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[tokio::test]
    async fn answers_request_line() {
        let channel = channel(ProbeReport::online(Transport::Wifi, Some(false)));

        let line = channel
            .handle_line(r#"{"method":"isActiveNetworkMetered"}"#)
            .await
            .unwrap();

        assert_eq!(parse(&line), json!({"status": "success", "result": false}));
    }

    #[tokio::test]
    async fn malformed_line_is_invalid_request() {
        let channel = channel(ProbeReport::offline());

        let line = channel.handle_line("not json").await.unwrap();
        let value = parse(&line);

        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], INVALID_REQUEST);
        assert_eq!(channel.advisor().probe().call_count(), 0);
    }

    #[tokio::test]
    async fn missing_method_field_is_invalid_request() {
        let channel = channel(ProbeReport::offline());

        let line = channel.handle_line(r#"{"arguments":null}"#).await.unwrap();

        assert_eq!(parse(&line)["code"], INVALID_REQUEST);
    }

    #[tokio::test]
    async fn blank_line_is_skipped() {
        let channel = channel(ProbeReport::offline());

        assert!(channel.handle_line("   \r").await.is_none());
    }

    #[tokio::test]
    async fn unknown_method_line_is_not_implemented() {
        let channel = channel(ProbeReport::offline());

        let line = channel
            .handle_line(r#"{"method":"isActiveNetworkFast"}"#)
            .await
            .unwrap();

        assert_eq!(
            parse(&line),
            json!({"status": "not_implemented", "method": "isActiveNetworkFast"})
        );
    }

    #[tokio::test]
    async fn probe_failure_line_is_platform_error() {
        let line = failing_channel()
            .handle_line(r#"{"method":"getNetworkStatus"}"#)
            .await
            .unwrap();

        assert_eq!(parse(&line)["code"], PLATFORM_ERROR);
    }
}
