// ABOUTME: Canned container set served when the container runtime is unreachable.
// ABOUTME: Three running services and one exited container.

use crate::runtime::ContainerSummary;
use crate::types::{ContainerId, ContainerState};

/// Seconds between "now" and the reference point the demo ages are measured from.
const BASE_AGE: i64 = 86_400;

struct DemoContainer {
    id: &'static str,
    name: &'static str,
    image: &'static str,
    state: ContainerState,
    status: &'static str,
    /// Seconds before the reference point.
    age: i64,
}

const DEMO_CONTAINERS: &[DemoContainer] = &[
    DemoContainer {
        id: "a1b2c3d4e5f6789012345678901234567890abcdef1234567890",
        name: "web-app",
        image: "nginx:latest",
        state: ContainerState::Running,
        status: "Up 2 hours",
        age: 7_200,
    },
    DemoContainer {
        id: "f1e2d3c4b5a69788695041327958640213579864201357986",
        name: "database",
        image: "postgres:15",
        state: ContainerState::Running,
        status: "Up 5 hours",
        age: 18_000,
    },
    DemoContainer {
        id: "9a8b7c6d5e4f32102468135790246813579024681357902468",
        name: "redis-cache",
        image: "redis:alpine",
        state: ContainerState::Running,
        status: "Up 1 day",
        age: 86_400,
    },
    DemoContainer {
        id: "1234567890abcdef1234567890abcdef1234567890abcdef12",
        name: "old-app",
        image: "node:18",
        state: ContainerState::Exited,
        status: "Exited (0) 3 days ago",
        age: 259_200,
    },
];

/// Demo containers relative to `now`; stopped ones only when `all` is set.
pub fn demo_containers(now: i64, all: bool) -> Vec<ContainerSummary> {
    let base = now - BASE_AGE;
    DEMO_CONTAINERS
        .iter()
        .filter(|c| all || c.state.is_running())
        .map(|c| ContainerSummary {
            id: ContainerId::new(c.id),
            names: vec![c.name.to_string()],
            image: c.image.to_string(),
            state: c.state,
            status: c.status.to_string(),
            created: base - c.age,
        })
        .collect()
}

/// Detail document returned by `inspect` in demo mode, whatever the id.
pub fn demo_container_info() -> serde_json::Value {
    serde_json::json!({
        "names": ["web-app"],
        "image": "nginx:latest",
        "state": "running",
        "status": "Up 2 hours",
    })
}
