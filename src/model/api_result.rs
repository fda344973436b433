use crate::model::ApiError;
use anyhow::Error;
use rocket::serde::Serialize;
use rocket::{http::Status, response::Responder, serde::json::Json};

#[derive(Responder)]
#[response(bound = "T: Serialize")]
pub enum ApiResult<T> {
    Ok(Json<T>),
    Err(ApiError),
}

impl<T> ApiResult<T> {
    pub fn new(result: Result<Option<T>, Error>) -> ApiResult<T> {
        match result {
            Ok(opt) => match opt {
                Some(val) => ApiResult::Ok(Json(val)),
                None => ApiResult::Err(Status::NotFound.into()),
            },
            Err(e) => ApiResult::Err(ApiError::new(500, e)),
        }
    }
}

impl<T> From<ApiError> for ApiResult<T> {
    fn from(e: ApiError) -> Self {
        ApiResult::Err(e)
    }
}
