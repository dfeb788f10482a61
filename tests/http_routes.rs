//! End-to-end tests for every route group, over a real listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use quicksearch::config::IntelConfig;
use quicksearch::intel::NetworkIntelResolver;
use quicksearch::lifecycle::Services;
use serde_json::json;

mod common;

use common::StaticDirectory;

async fn get(url: String) -> (StatusCode, Option<String>, String) {
    let res = common::client().get(url).send().await.unwrap();
    let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
    let location = res
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap().to_string());
    (status, location, res.text().await.unwrap())
}

#[tokio::test]
async fn test_mac_vendor_routes() {
    let addr: SocketAddr = "127.0.0.1:28301".parse().unwrap();
    let registry = common::write_registry(&[
        "OUI/MA-L            Organization",
        "3C-D9-2B   (hex)\t\tExample Corp",
        "3CD92B     (base 16)\t\tExample Corp",
        "0A-00-00   (hex)\t\tShadowed Vendor",
        "00-AA-BB   (hex)",
    ]);

    let mut config = common::offline_config();
    config.oui.registry_path = registry.path().display().to_string();
    let services = Services::from_config(&config);
    let shutdown = common::start_server(addr, config, services).await;

    let (status, _, body) = get(format!("http://{addr}/mac/3cd92b123456")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "3C-D9-2B\nExample Corp\n");

    let (status, _, body) = get(format!("http://{addr}/mac/02:00:00:00:00:01")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "02-00-00\nlocally administered address\n");

    // Locally administered wins even when the table has the prefix.
    let (_, _, body) = get(format!("http://{addr}/mac/0a0000000000")).await;
    assert_eq!(body, "0A-00-00\nlocally administered address\n");

    let (status, _, body) = get(format!("http://{addr}/mac/zz")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error\nInvalid input (not an EUI)\n");

    let (status, _, body) = get(format!("http://{addr}/mac/01-00-5e-00-00-01")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "01-00-5E\nNo organisation found, multicast\n");

    let (status, _, body) = get(format!("http://{addr}/mac/00aabb")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error\nFormat error in OUI file\n");

    // The table is re-read per lookup, so removing it is noticed.
    registry.close().unwrap();
    let (status, _, body) = get(format!("http://{addr}/mac/3cd92b")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error\nOUI file missing\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_canonical_url_routes() {
    let addr: SocketAddr = "127.0.0.1:28302".parse().unwrap();
    let config = common::offline_config();
    let services = Services::from_config(&config);
    let shutdown = common::start_server(addr, config, services).await;

    let (status, _, body) = get(format!(
        "http://{addr}/url/https://www.amazon.de/Foo-Bar/dp/B074Y6M67F/ref=xyz?_encoding=UTF8"
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "https://www.amazon.de/dp/B074Y6M67F/\n");

    let (status, location, _) = get(format!(
        "http://{addr}/url-go/https://www.google.com/amp/s/www.golem.de/news/a.amp.html"
    ))
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("https://www.golem.de/news/a.html"));

    // The query string carries the wrapped target.
    let (status, _, body) = get(format!(
        "http://{addr}/url/https://www.google.com/url?sa=t&url=https%3A%2F%2Fexample.org%2Fx&usg=abc"
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "https://example.org/x\n");

    let (status, _, body) = get(format!("http://{addr}/url/https://example.com/page")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error\nInvalid input (URL format not recognised)\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_network_intel_routes() {
    let addr: SocketAddr = "127.0.0.1:28303".parse().unwrap();
    let directory = StaticDirectory::default()
        .with_ptr("192.0.2.1", "host.example.net")
        .with_txt(
            "1.2.0.192.origin.asn.cymru.com",
            &["\"64500 64501 | 192.0.2.0/24 | ZZ | test | 2020-01-01\""],
        )
        .with_txt("AS64500.asn.cymru.com", &["\"64500 | ZZ | test | 2020-01-01 | EXAMPLE-NET\""]);

    let mut services = Services::from_config(&common::offline_config());
    services.network_intel = Some(NetworkIntelResolver::new(
        Arc::new(directory),
        IntelConfig::default(),
    ));
    let shutdown = common::start_server(addr, common::offline_config(), services).await;

    let (status, _, body) = get(format!("http://{addr}/ip/192.0.2.1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "4 | 192.0.2.1 | host.example.net\n\
         64500 64501 | 192.0.2.0/24 | ZZ | test | 2020-01-01\n\
         64500 | ZZ | test | 2020-01-01 | EXAMPLE-NET\n\
         No information available\n"
    );

    // IPv4-mapped input is reported as the IPv4 address.
    let (_, _, body) = get(format!("http://{addr}/ip/::ffff:192.0.2.1")).await;
    assert!(body.starts_with("4 | 192.0.2.1 | host.example.net\n"));

    let (status, _, body) = get(format!("http://{addr}/ip/2001:db8::1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "6 | 2001:db8::1 | no PTR\nNo information available\n");

    let (status, _, body) = get(format!("http://{addr}/ip/not-an-address")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error\nInvalid input (not an IP address)\n");

    shutdown.trigger();
}

/// Two runs of 623 starting in Germany and one in Austria, plus a bus.
fn journeys() -> String {
    json!([
        {"journeys": 1},
        [2, 3, 4],
        {"journeyNumber": 5, "category": 6, "trainName": 7, "journeyId": 8, "firstStop": 9, "lastStop": 10},
        {"journeyNumber": 5, "category": 6, "trainName": 7, "journeyId": 11, "firstStop": 12, "lastStop": 13},
        {"journeyNumber": 5, "category": 14, "trainName": 15, "journeyId": 16, "firstStop": 9, "lastStop": 10},
        623,
        "ICE",
        "ICE 623",
        "1|100|0|80",
        {"evaNumber": 17, "name": 18},
        {"evaNumber": 19, "name": 20},
        "1|200|0|81",
        {"evaNumber": 21, "name": 22},
        {"evaNumber": 23, "name": 24},
        "Bus",
        "Bus SEV",
        "1|300|0|80",
        "8000261",
        "München Hbf",
        "8000207",
        "Köln Hbf",
        "8100002",
        "Wien Hbf",
        "8101081",
        "Innsbruck Hbf",
    ])
    .to_string()
}

#[tokio::test]
async fn test_train_journey_routes() {
    let backend: SocketAddr = "127.0.0.1:28304".parse().unwrap();
    let addr: SocketAddr = "127.0.0.1:28305".parse().unwrap();
    common::start_json_backend(backend, journeys()).await;

    let mut config = common::offline_config();
    config.modules.train_journey = true;
    config.journey.endpoint = format!("http://{backend}/find/{{number}}?date={{date}}");
    let services = Services::from_config(&config);
    let shutdown = common::start_server(addr, config, services).await;

    let (status, location, _) = get(format!("http://{addr}/train/623/2026-10-17")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("https://bahn.expert/details/ICE%20623/j/1%7C100%7C0%7C80")
    );

    let (status, location, _) = get(format!("http://{addr}/train/623/2026-10-17/AT")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.unwrap().ends_with("/j/1%7C200%7C0%7C81"));

    let (status, _, body) = get(format!("http://{addr}/train/623/2026-10-17/CH")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "No matching train journey found\n");

    let (status, _, body) = get(format!("http://{addr}/train/623/2026-10-17/XX")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error\nInvalid input (unknown country code)\n");

    let (status, _, body) = get(format!("http://{addr}/train/623/17.10.2026")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error\nInvalid input (date must be YYYY-MM-DD)\n");

    // Default date: the backend answers regardless of the query.
    let (status, _, _) = get(format!("http://{addr}/train/623")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    shutdown.trigger();
}

#[tokio::test]
async fn test_train_journey_upstream_failure_is_generic() {
    let backend: SocketAddr = "127.0.0.1:28306".parse().unwrap();
    let addr: SocketAddr = "127.0.0.1:28307".parse().unwrap();
    common::start_programmable_backend(backend, || async { (503, "{}".to_string()) }).await;

    let mut config = common::offline_config();
    config.modules.train_journey = true;
    config.journey.endpoint = format!("http://{backend}/find/{{number}}?date={{date}}");
    let services = Services::from_config(&config);
    let shutdown = common::start_server(addr, config, services).await;

    let (status, _, body) = get(format!("http://{addr}/train/623/2026-10-17")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error\nCould not look up train journey\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_train_journey_lists_choices() {
    let backend: SocketAddr = "127.0.0.1:28308".parse().unwrap();
    let addr: SocketAddr = "127.0.0.1:28309".parse().unwrap();
    let body = json!([
        [1, 2],
        {"journeyNumber": 3, "category": 4, "trainName": 5, "journeyId": 6, "firstStop": 8, "lastStop": 9},
        {"journeyNumber": 3, "category": 4, "trainName": 5, "journeyId": 7, "firstStop": 9, "lastStop": 8},
        "77",
        "RE",
        "RE 77",
        "b",
        "a",
        {"evaNumber": 10, "name": 11},
        {"evaNumber": 12, "name": 13},
        "8000001",
        "Aachen Hbf",
        "8800004",
        "Liège",
    ]);
    common::start_json_backend(backend, body.to_string()).await;

    let mut config = common::offline_config();
    config.modules.train_journey = true;
    config.journey.endpoint = format!("http://{backend}/find/{{number}}?date={{date}}");
    config.journey.link_template = "https://trains.example/{journey_id}".to_string();
    let services = Services::from_config(&config);
    let shutdown = common::start_server(addr, config, services).await;

    let (status, _, body) = get(format!("http://{addr}/train/77/2026-10-17")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "* [RE 77: Aachen Hbf → Liège](https://trains.example/b)\n\
         * [RE 77: Liège → Aachen Hbf](https://trains.example/a)\n"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_index_and_search_routes() {
    let addr: SocketAddr = "127.0.0.1:28310".parse().unwrap();
    let config = common::offline_config();
    let services = Services::from_config(&config);
    let shutdown = common::start_server(addr, config, services).await;

    let res = common::client().get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/markdown"));
    let page = res.text().await.unwrap();
    assert!(page.starts_with("QuickSearch\n===========\n"));
    assert!(page.contains(&format!("http://{addr}/freshports/")));
    assert!(page.contains(&format!("http://{addr}/url-go/")));
    assert!(!page.contains("/mac/"));

    let (status, location, _) = get(format!("http://{addr}/deb/linux-image?arch=amd64")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("https://qa.debian.org/madison.php?table=debian&g=on&package=linux-image%3Farch%3Damd64")
    );

    let (status, _, _) = get(format!("http://{addr}/mac/3cd92b")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    shutdown.trigger();
}
