// ABOUTME: Integration tests for the blocking client against a mock transport.
// ABOUTME: Covers decoding, error mapping, and the blocking rate limit behavior.

mod common;

use std::time::Duration;

use common::*;
use openaq::prelude::*;

fn client(transport: MockTransport) -> BlockingOpenAq {
    BlockingOpenAq::with_transport(config(), transport)
}

#[test]
fn test_get_location() {
    let transport = MockTransport::ok(page(LOCATION));
    let client = client(transport.clone());

    let response = client.locations().get(2178).unwrap();

    assert_eq!(response.results[0].name.as_deref(), Some("Del Norte"));
    let request = &transport.requests()[0];
    assert_eq!(request.url, "https://api.openaq.org/v3/locations/2178");
    assert_eq!(request.header("X-API-Key"), Some("test-key"));
}

#[test]
fn test_list_with_filters() {
    let transport = MockTransport::ok(page(OWNER));
    let client = client(transport.clone());

    let _ = client
        .countries()
        .list(&CountriesQuery::new().providers([119]).limit(20));
    let _ = client
        .providers()
        .list(&ProvidersQuery::new().bbox(-1.0, -1.0, 1.0, 1.0));
    let _ = client
        .parameters()
        .list(&ParametersQuery::new().parameter_type(ParameterType::Meteorological));

    let requests = transport.requests();
    assert_eq!(requests[0].param("providers_id"), Some("119"));
    assert_eq!(requests[0].param("limit"), Some("20"));
    assert_eq!(requests[1].param("bbox"), Some("-1,-1,1,1"));
    assert_eq!(requests[2].param("parameter_type"), Some("meteorological"));
}

#[test]
fn test_validation_fails_before_sending() {
    let transport = MockTransport::ok(page(OWNER));
    let client = client(transport.clone());

    let err = client
        .measurements()
        .list(&MeasurementsQuery::new(1).data(Data::Years).rollup(Rollup::Daily))
        .unwrap_err();
    assert!(matches!(err, OpenAqError::InvalidParameter(_)));
    assert_eq!(transport.count(), 0);
    assert_eq!(client.governor().remaining(), 60.0);
}

#[test]
fn test_http_error_mapping() {
    let client = BlockingOpenAq::with_transport(config(), MockTransport::status(504, "upstream"));
    let err = client.owners().list(&PageQuery::new()).unwrap_err();

    match err {
        OpenAqError::Api(ApiError::GatewayTimeout(message)) => {
            assert!(message.contains("Consider reducing the complexity"));
        }
        other => panic!("expected GatewayTimeout, got {other:?}"),
    }
}

#[test]
fn test_reconcile_from_headers() {
    let transport = MockTransport::new(|_, _| {
        Ok(with_limits(RawResponse::new(200, page(OWNER)), 120, 100, 30))
    });
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, true, clock.clone());
    let client = BlockingOpenAq::with_transport(config(), transport).with_governor(governor);

    client.owners().get(4).unwrap();

    assert_eq!(client.governor().capacity(), 120.0);
    assert_eq!(client.governor().remaining(), 100.0);
    assert_eq!(client.governor().reset_in_secs(), 30);
}

#[test]
fn test_exhausted_without_auto_wait() {
    let transport = MockTransport::new(|_, _| {
        Ok(with_limits(RawResponse::new(200, page(OWNER)), 60, 0, 20))
    });
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, false, clock.clone());
    let client = BlockingOpenAq::with_transport(config_with(|b| b.auto_wait(false)), transport.clone())
        .with_governor(governor);

    client.owners().get(4).unwrap();
    let err = client.owners().get(4).unwrap_err();

    match err {
        OpenAqError::RateLimit(exceeded) => assert_eq!(exceeded.retry_after_secs, Some(20)),
        other => panic!("expected RateLimit, got {other:?}"),
    }
    assert_eq!(transport.count(), 1);
    assert!(clock.slept().is_empty());
}

#[test]
fn test_exhausted_with_auto_wait_sleeps_until_reset() {
    let transport = MockTransport::new(|index, _| {
        let remaining = if index == 0 { 0 } else { 59 };
        Ok(with_limits(RawResponse::new(200, page(OWNER)), 60, remaining, 20))
    });
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, true, clock.clone());
    let client = BlockingOpenAq::with_transport(config(), transport.clone()).with_governor(governor);

    client.owners().get(4).unwrap();
    client.owners().get(4).unwrap();

    assert_eq!(transport.count(), 2);
    assert_eq!(clock.slept(), vec![Duration::from_secs(20)]);
    assert_eq!(client.governor().remaining(), 59.0);
}

#[test]
fn test_transport_error_propagates() {
    let transport = MockTransport::new(|_, _| Err(OpenAqError::Transport("refused".into())));
    let client = client(transport);

    let err = client.licenses().get(1).unwrap_err();
    assert!(matches!(err, OpenAqError::Transport(_)));
}
