// Common test utilities

use std::sync::{Arc, Mutex};

use orchid_cli::{ProgressModel, ProgressView};
use orchid_core::kernel::{SearchHit, TestDependencies};
use orchid_core::server::build_app;
use serde_json::json;
use tokio::net::TcpListener;

pub const IDAHO_QUERY: &str = "idaho media companies with more than 25 ad sales employees";

/// Keeps a copy of the model after every transition.
#[derive(Clone, Default)]
pub struct RecordingView {
    snapshots: Arc<Mutex<Vec<ProgressModel>>>,
}

impl RecordingView {
    pub fn snapshots(&self) -> Vec<ProgressModel> {
        self.snapshots.lock().unwrap().clone()
    }
}

impl ProgressView for RecordingView {
    fn update(&mut self, model: &ProgressModel) {
        self.snapshots.lock().unwrap().push(model.clone());
    }
}

/// Serve the Orchid router, backed by `deps`, on an ephemeral port.
pub async fn serve_orchid(deps: &TestDependencies) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_app(deps.server_deps());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub fn plan_json(count: usize) -> String {
    let steps: Vec<_> = (1..=count)
        .map(|i| {
            json!({
                "step": i,
                "step_title": format!("Step {i}"),
                "queries": (1..=9).map(|q| format!("idaho media query {i}-{q}")).collect::<Vec<_>>()
            })
        })
        .collect();
    json!({ "steps": steps }).to_string()
}

pub fn hits(count: usize) -> Vec<SearchHit> {
    (0..count)
        .map(|i| SearchHit::new(format!("Idaho outlet {i}"), format!("https://outlet{i}.example.com")))
        .collect()
}

pub fn companies_json(count: usize) -> String {
    let companies: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "name": format!("Treasure Valley Media {i}"),
                "revenue": "$6M",
                "readiness": "81%",
                "location": "Boise",
                "growth": "+9% YoY",
                "employees": "60-80",
                "industry": "Radio",
                "logo": "📻",
                "sources": { "count": 0, "details": [] },
                "reasoning": "Hiring account executives.",
                "tags": ["Media"]
            })
        })
        .collect();
    json!({ "companies": companies }).to_string()
}
