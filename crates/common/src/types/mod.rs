use serde::Serialize;

/// Body of the `/health` check.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Health {
    pub status: &'static str,
}

/// Empty JSON object, returned by endpoints that acknowledge without a payload.
#[derive(Serialize, Debug, Default, Clone, Copy)]
pub struct Empty {}
