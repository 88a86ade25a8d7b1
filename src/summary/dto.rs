use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ConstraintsRequest {
    pub constraints: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub redirect: &'static str,
}
