use anyhow::Error;
use rocket::{
    http::{ContentType, Status},
    request::Request,
    response::{self, Responder, Response},
    serde::json::json,
};
use std::io::Cursor;
use tracing::error;

#[derive(Debug)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub source: Option<Error>,
}

impl ApiError {
    pub fn new(code: u16, source: Error) -> ApiError {
        ApiError {
            code,
            message: source.to_string(),
            source: Some(source),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        if let Some(source) = self.source {
            error!(%source, "Error from controller");
        }

        let body = json!({ "success": false, "error": self.message }).to_string();

        Response::build()
            .header(ContentType::JSON)
            .status(Status::new(self.code))
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl From<Status> for ApiError {
    fn from(s: Status) -> Self {
        ApiError {
            code: s.code,
            message: s.reason().unwrap_or("").to_string(),
            source: None,
        }
    }
}
