// ABOUTME: Tests for the response envelope and pagination metadata.
// ABOUTME: Found may be a number or a lower-bound string like ">1000".

use super::*;

const META: &str = r#"{"name": "openaq-api", "website": "/", "page": 1, "limit": 100, "found": 2}"#;

#[test]
fn test_from_json_reads_meta_and_results() {
    let body = format!(
        r#"{{"meta": {META}, "results": [{{"id": 1, "name": "Owner A"}}, {{"id": 2, "name": "Owner B"}}]}}"#
    );

    let response = OwnersResponse::from_json(&body).unwrap();

    assert_eq!(response.meta.name, "openaq-api");
    assert_eq!(response.meta.page, 1);
    assert_eq!(response.meta.limit, 100);
    assert_eq!(response.meta.found, Some(Found::Count(2)));
    assert_eq!(response.len(), 2);
    assert_eq!(response.first().map(|o| o.name.as_str()), Some("Owner A"));
}

#[test]
fn test_found_lower_bound() {
    let body = r#"{"meta": {"name": "openaq-api", "website": "/", "page": 1, "limit": 1000, "found": ">1000"}, "results": []}"#;

    let response = OwnersResponse::from_json(body).unwrap();
    let found = response.meta.found.clone().unwrap();

    assert_eq!(found, Found::Text(">1000".to_string()));
    assert_eq!(found.exact(), None);
    assert_eq!(found.at_least(), Some(1000));
    assert!(response.is_empty());
}

#[test]
fn test_missing_results_and_meta_fields_default() {
    let response = OwnersResponse::from_json(r#"{"meta": {}}"#).unwrap();

    assert_eq!(response.meta, Meta::default());
    assert!(response.results.is_empty());
}

#[test]
fn test_malformed_body_is_deserialize_error() {
    let err = OwnersResponse::from_json("<html>bad gateway</html>").unwrap_err();
    assert!(matches!(err, crate::error::OpenAqError::Deserialize(_)));
}

#[test]
fn test_to_json_keeps_wire_shape() {
    let body = format!(r#"{{"meta": {META}, "results": [{{"id": 9, "name": "CC BY 4.0", "commercialUseAllowed": true, "attributionRequired": true, "shareAlikeRequired": false, "modificationAllowed": true, "redistributionAllowed": true, "sourceUrl": null}}]}}"#);

    let response = LicensesResponse::from_json(&body).unwrap();
    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

    assert_eq!(json["meta"]["found"], 2);
    assert_eq!(json["results"][0]["commercialUseAllowed"], true);
    assert_eq!(json["results"][0]["shareAlikeRequired"], false);
}

#[test]
fn test_into_iterator() {
    let body = format!(r#"{{"meta": {META}, "results": [{{"id": 1, "name": "a"}}, {{"id": 2, "name": "b"}}]}}"#);
    let ids: Vec<u32> = OwnersResponse::from_json(&body).unwrap().into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2]);
}
