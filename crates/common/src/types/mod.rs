use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by HTTP handlers when an internal failure is hidden from the caller.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
