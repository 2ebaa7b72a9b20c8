use serde_json::{json, Value as Json};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use water_extent::{
    render_chart, ChartOptions, ClientConfig, DateRange, EarthEngineError, Region, WaterExtent,
    WaterExtentError,
};

/// A request as seen by the mock server.
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Json,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Answers every request with a fixed status and JSON body.
struct MockEarthEngine {
    url: String,
    requests: mpsc::UnboundedReceiver<Captured>,
}

impl MockEarthEngine {
    async fn start(status: u16, body: Json) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let body = body.to_string();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let tx = tx.clone();
                let body = body.clone();
                tokio::spawn(handle_connection(stream, status, body, tx));
            }
        });

        Self {
            url: format!("http://{}", addr),
            requests: rx,
        }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::builder()
            .project("lake-monitoring")
            .access_token("test-token")
            .api_url(self.url.as_str())
            .build()
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    status: u16,
    body: String,
    tx: mpsc::UnboundedSender<Captured>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let request_body = serde_json::from_slice(&buf[header_end..]).unwrap_or(Json::Null);
    let _ = tx.send(Captured {
        request_line,
        headers,
        body: request_body,
    });

    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn lake() -> Region {
    Region::from_geojson_str(
        r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {},
            "geometry": {"type": "Polygon", "coordinates":
            [[[77.55, 12.95], [77.60, 12.95], [77.60, 13.00], [77.55, 13.00], [77.55, 12.95]]]}}]}"#,
    )
    .unwrap()
}

fn period() -> DateRange {
    DateRange::parse("2001-01-01", "2004-01-01").unwrap()
}

fn feature_collection() -> Json {
    json!({
        "result": {
            "type": "FeatureCollection",
            "columns": {},
            "features": [
                {"type": "Feature", "geometry": null, "id": "2002_01_01", "properties": {"date": "2002-01-01", "water_area": 2150000.5}},
                {"type": "Feature", "geometry": null, "id": "2001_01_01", "properties": {"date": "2001-01-01", "water_area": 2310000.0}},
                {"type": "Feature", "geometry": null, "id": "2003_01_01", "properties": {"date": "2003-01-01", "water_area": 1987000.25}}
            ]
        }
    })
}

#[tokio::test]
async fn test_time_series_round_trip_through_compute_endpoint() {
    let mut server = MockEarthEngine::start(200, feature_collection()).await;
    let client = WaterExtent::new(server.config()).unwrap();

    let series = client
        .time_series()
        .region(&lake())
        .period(period())
        .call()
        .await
        .unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.areas(), &[2310000.0, 2150000.5, 1987000.25]);
    assert_eq!(series.dates()[0].to_string(), "2001-01-01");

    let request = server.requests.recv().await.unwrap();
    assert_eq!(
        request.request_line,
        "POST /v1/projects/lake-monitoring/value:compute HTTP/1.1"
    );
    assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    assert_eq!(request.header("x-goog-user-project"), Some("lake-monitoring"));

    let expression = &request.body["expression"];
    let result_id = expression["result"].as_str().unwrap();
    assert_eq!(
        expression["values"][result_id]["functionInvocationValue"]["functionName"],
        "Collection.filter"
    );
    let wire = expression.to_string();
    assert!(wire.contains("MODIS/006/MOD44W"));
    assert!(wire.contains("2004-01-01"));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockEarthEngine::start(
        400,
        json!({"error": {"code": 400, "message": "ImageCollection.load: Collection asset 'X' not found.", "status": "INVALID_ARGUMENT"}}),
    )
    .await;
    let client = WaterExtent::new(server.config()).unwrap();

    let err = client
        .time_series()
        .region(&lake())
        .period(period())
        .call()
        .await
        .unwrap_err();

    match err {
        WaterExtentError::EarthEngine(EarthEngineError::Api {
            status,
            code,
            message,
            ..
        }) => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(code.as_deref(), Some("INVALID_ARGUMENT"));
            assert!(message.contains("not found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_status_without_error_body() {
    let server = MockEarthEngine::start(503, json!("unavailable")).await;
    let client = WaterExtent::new(server.config()).unwrap();

    let err = client
        .time_series()
        .region(&lake())
        .period(period())
        .call()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WaterExtentError::EarthEngine(EarthEngineError::HttpStatus { status, .. }) if status.as_u16() == 503
    ));
}

#[tokio::test]
async fn test_response_without_result_is_rejected() {
    let server = MockEarthEngine::start(200, json!({"unexpected": true})).await;
    let client = WaterExtent::new(server.config()).unwrap();

    let err = client
        .time_series()
        .region(&lake())
        .period(period())
        .call()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WaterExtentError::EarthEngine(EarthEngineError::MissingResult(_))
    ));
}

#[tokio::test]
async fn test_fetched_series_renders_to_file() {
    let server = MockEarthEngine::start(200, feature_collection()).await;
    let client = WaterExtent::new(server.config()).unwrap();
    let series = client
        .time_series()
        .region(&lake())
        .period(period())
        .call()
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output").join("lake.html");
    render_chart(&series, &ChartOptions::default(), Path::new(&path))
        .await
        .unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("Surface Water Extent (square meters)"));
}
