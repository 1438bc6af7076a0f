// ABOUTME: In-process HTTP server speaking the subset of the Docker Engine API docklog uses.
// ABOUTME: Serves canned containers, images and multiplexed log bodies on a loopback port.

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use docklog::logs::{LogStream, encode_frame};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned daemon contents.
#[derive(Default)]
pub struct DaemonData {
    /// Entries of `GET /containers/json`, in Docker's wire format.
    pub containers: Vec<Value>,
    /// Image id to `RepoTags`.
    pub images: HashMap<String, Vec<String>>,
    /// Container id to raw log body.
    pub logs: HashMap<String, Vec<u8>>,
}

impl DaemonData {
    /// Add a container in wire format.
    pub fn container(mut self, id: &str, name: &str, image_id: &str, state: &str) -> Self {
        let status = if state == "running" {
            "Up 2 hours"
        } else {
            "Exited (0) 1 hour ago"
        };
        self.containers.push(json!({
            "Id": id,
            "Names": [format!("/{name}")],
            "Image": image_id,
            "ImageID": image_id,
            "State": state,
            "Status": status,
            "Created": 1_704_067_200,
        }));
        self
    }

    pub fn image(mut self, id: &str, tags: &[&str]) -> Self {
        self.images
            .insert(id.to_string(), tags.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Log body for `id`, one multiplexed frame per record.
    pub fn logs(mut self, id: &str, records: &[(LogStream, &str, &str)]) -> Self {
        let mut body = Vec::new();
        for (stream, ts, message) in records {
            body.extend(encode_frame(*stream, ts, message));
        }
        self.logs.insert(id.to_string(), body);
        self
    }
}

struct DaemonState {
    data: DaemonData,
    running: Mutex<HashSet<String>>,
    requests: Mutex<Vec<String>>,
}

pub struct FakeDaemon {
    addr: SocketAddr,
    state: Arc<DaemonState>,
    handle: JoinHandle<()>,
}

impl FakeDaemon {
    pub async fn start(data: DaemonData) -> Self {
        let running = data
            .containers
            .iter()
            .filter(|c| c["State"] == "running")
            .filter_map(|c| c["Id"].as_str().map(str::to_string))
            .collect();
        let state = Arc::new(DaemonState {
            data,
            running: Mutex::new(running),
            requests: Mutex::new(Vec::new()),
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Connection string pointing at this daemon.
    pub fn host(&self) -> String {
        format!("tcp://{}", self.addr)
    }

    /// Requests received so far, as `METHOD path?query` with the API version stripped.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn is_running(&self, id: &str) -> bool {
        self.state.running.lock().unwrap().contains(id)
    }
}

impl Drop for FakeDaemon {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Address of a loopback port with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn handle(State(state): State<Arc<DaemonState>>, method: Method, uri: Uri) -> Response {
    let segments: Vec<String> = uri
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).map(|d| d.into_owned()).unwrap_or_default())
        .skip_while(|s| is_version(s))
        .collect();
    let query = uri.query().unwrap_or_default();

    state.requests.lock().unwrap().push(format!(
        "{} /{}{}",
        method.as_str(),
        segments.join("/"),
        if query.is_empty() {
            String::new()
        } else {
            format!("?{query}")
        }
    ));

    let parts: Vec<&str> = segments.iter().map(String::as_str).collect();
    match (method.as_str(), parts.as_slice()) {
        ("GET" | "HEAD", ["_ping"]) => (StatusCode::OK, "OK").into_response(),
        ("GET", ["containers", "json"]) => list_containers(&state, query),
        ("GET", ["images", id, "json"]) => match state.data.images.get(*id) {
            Some(tags) => json_response(StatusCode::OK, json!({ "Id": id, "RepoTags": tags })),
            None => not_found(&format!("No such image: {id}")),
        },
        ("GET", ["containers", id, "json"]) => match find(&state, id) {
            Some(c) => {
                let status = if state.running.lock().unwrap().contains(*id) {
                    "running"
                } else {
                    "exited"
                };
                json_response(
                    StatusCode::OK,
                    json!({
                        "Id": c["Id"],
                        "Name": c["Names"][0],
                        "Image": c["ImageID"],
                        "State": { "Status": status },
                    }),
                )
            }
            None => not_found(&format!("No such container: {id}")),
        },
        ("GET", ["containers", id, "logs"]) => match state.data.logs.get(*id) {
            Some(body) => (
                StatusCode::OK,
                [(
                    header::CONTENT_TYPE,
                    "application/vnd.docker.multiplexed-stream",
                )],
                body.clone(),
            )
                .into_response(),
            None => not_found(&format!("No such container: {id}")),
        },
        ("POST", ["containers", id, action @ ("start" | "stop")]) => {
            if find(&state, id).is_none() {
                return not_found(&format!("No such container: {id}"));
            }
            let mut running = state.running.lock().unwrap();
            let changed = if *action == "start" {
                running.insert(id.to_string())
            } else {
                running.remove(*id)
            };
            if changed {
                StatusCode::NO_CONTENT.into_response()
            } else {
                StatusCode::NOT_MODIFIED.into_response()
            }
        }
        _ => not_found("page not found"),
    }
}

fn list_containers(state: &DaemonState, query: &str) -> Response {
    let all = query
        .split('&')
        .any(|pair| pair == "all=true" || pair == "all=1");
    let running = state.running.lock().unwrap();
    let containers: Vec<Value> = state
        .data
        .containers
        .iter()
        .filter(|c| all || c["Id"].as_str().is_some_and(|id| running.contains(id)))
        .cloned()
        .collect();
    json_response(StatusCode::OK, Value::Array(containers))
}

fn find<'a>(state: &'a DaemonState, id: &str) -> Option<&'a Value> {
    state.data.containers.iter().find(|c| c["Id"] == id)
}

fn is_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit() || c == '.'))
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}

fn not_found(message: &str) -> Response {
    json_response(StatusCode::NOT_FOUND, json!({ "message": message }))
}
