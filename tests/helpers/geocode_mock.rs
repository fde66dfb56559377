//! Mock place-search server for geocoding tests

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a place-search endpoint returning a single match for any query
pub async fn mount_single_match(server: &MockServer, expected_requests: u64) {
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [{
                "properties": {
                    "name": "Uhuru Park",
                    "city": "Nairobi",
                    "country": "Kenya"
                },
                "geometry": {
                    "coordinates": [36.8219, -1.2921]
                }
            }]
        })))
        .expect(expected_requests)
        .mount(server)
        .await;
}

/// Mount a place-search endpoint that matches nothing
pub async fn mount_no_match(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(server)
        .await;
}
