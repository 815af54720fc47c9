use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: &'static str,
    pub endpoints: usize,
    pub uptime_secs: u64,
}
