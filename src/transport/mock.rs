//! Mock transport implementation for testing.
//!
//! An in-memory control plane serving the VPC and region endpoints, with
//! failure injection and a request log. It lets the harness be tested
//! without cassettes or network access.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use super::traits::{ApiRequest, ApiResponse, Method, Transport, TransportKind};
use crate::Error;
use crate::types::{Region, Vpc, VpcCreateOptions, VpcSubnet, VpcUpdateOptions};

/// Mock transport for testing.
pub struct MockTransport {
    vpcs: RwLock<BTreeMap<u64, Vpc>>,
    regions: RwLock<Vec<Region>>,
    next_id: AtomicU64,
    requests: Mutex<Vec<ApiRequest>>,
    failures: Mutex<Vec<(Method, String, ApiResponse)>>,
}

impl MockTransport {
    /// Creates a mock with a single VPC-capable region, `us-east`.
    pub fn new() -> Self {
        Self::with_regions(vec![Region {
            id: "us-east".into(),
            label: "Newark, NJ".into(),
            country: "us".into(),
            capabilities: vec!["Linodes".into(), "VPCs".into()],
            status: "ok".into(),
        }])
    }

    /// Creates a mock serving the given regions.
    pub fn with_regions(regions: Vec<Region>) -> Self {
        Self {
            vpcs: RwLock::new(BTreeMap::new()),
            regions: RwLock::new(regions),
            next_id: AtomicU64::new(1000),
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next request with `method` on `path` return `response`.
    ///
    /// Each injected failure is consumed by one request.
    pub fn fail_next(&self, method: Method, path: impl Into<String>, response: ApiResponse) {
        self.failures.lock().push((method, path.into(), response));
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns the VPCs currently stored.
    pub fn vpcs(&self) -> Vec<Vpc> {
        self.vpcs.read().values().cloned().collect()
    }

    fn take_failure(&self, request: &ApiRequest) -> Option<ApiResponse> {
        let mut failures = self.failures.lock();
        let index = failures
            .iter()
            .position(|(m, p, _)| *m == request.method && *p == request.path)?;
        Some(failures.remove(index).2)
    }

    fn vpc_id(path: &str) -> Option<u64> {
        path.strip_prefix("/v4/vpcs/")?.parse().ok()
    }

    fn create(&self, body: Option<&serde_json::Value>) -> ApiResponse {
        let Some(opts) = body
            .cloned()
            .and_then(|b| serde_json::from_value::<VpcCreateOptions>(b).ok())
        else {
            return ApiResponse::error(400, "Invalid request body");
        };
        if opts.label.is_empty() {
            return ApiResponse::error(400, "label is required");
        }
        if !self.regions.read().iter().any(|r| r.id == opts.region) {
            return ApiResponse::error(400, "region is not valid");
        }

        let now = Utc::now().naive_utc();
        let subnets = opts
            .subnets
            .iter()
            .map(|s| VpcSubnet {
                id: self.next_id.fetch_add(1, Ordering::Relaxed),
                label: s.label.clone(),
                ipv4: s.ipv4.clone(),
                created: Some(now),
                updated: Some(now),
            })
            .collect();
        let vpc = Vpc {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            label: opts.label,
            description: opts.description,
            region: opts.region,
            subnets,
            created: Some(now),
            updated: Some(now),
        };
        self.vpcs.write().insert(vpc.id, vpc.clone());
        vpc_response(&vpc)
    }

    fn update(&self, id: u64, body: Option<&serde_json::Value>) -> ApiResponse {
        let Some(opts) = body
            .cloned()
            .and_then(|b| serde_json::from_value::<VpcUpdateOptions>(b).ok())
        else {
            return ApiResponse::error(400, "Invalid request body");
        };
        let mut vpcs = self.vpcs.write();
        let Some(vpc) = vpcs.get_mut(&id) else {
            return ApiResponse::error(404, "Not found");
        };
        if !opts.label.is_empty() {
            vpc.label = opts.label;
        }
        vpc.description = opts.description;
        vpc.updated = Some(Utc::now().naive_utc());
        vpc_response(vpc)
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        match (request.method, request.path.as_str()) {
            (Method::Get, "/v4/regions") => page_response(&*self.regions.read()),
            (Method::Get, "/v4/vpcs") => {
                let vpcs: Vec<Vpc> = self.vpcs.read().values().cloned().collect();
                page_response(&vpcs)
            }
            (Method::Post, "/v4/vpcs") => self.create(request.body.as_ref()),
            (method, path) => match (method, Self::vpc_id(path)) {
                (Method::Get, Some(id)) => match self.vpcs.read().get(&id) {
                    Some(vpc) => vpc_response(vpc),
                    None => ApiResponse::error(404, "Not found"),
                },
                (Method::Put, Some(id)) => self.update(id, request.body.as_ref()),
                (Method::Delete, Some(id)) => match self.vpcs.write().remove(&id) {
                    Some(_) => ApiResponse::json(200, serde_json::json!({})),
                    None => ApiResponse::error(404, "Not found"),
                },
                _ => ApiResponse::error(404, "Not found"),
            },
        }
    }
}

fn vpc_response(vpc: &Vpc) -> ApiResponse {
    match serde_json::to_value(vpc) {
        Ok(body) => ApiResponse::json(200, body),
        Err(e) => ApiResponse::error(500, e.to_string()),
    }
}

fn page_response<T: serde::Serialize>(items: &[T]) -> ApiResponse {
    ApiResponse::json(
        200,
        serde_json::json!({
            "data": items,
            "page": 1,
            "pages": 1,
            "results": items.len(),
        }),
    )
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        self.requests.lock().push(request.clone());
        if let Some(response) = self.take_failure(&request) {
            return Ok(response);
        }
        Ok(self.route(&request))
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Mock
    }
}
