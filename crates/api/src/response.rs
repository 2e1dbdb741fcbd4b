//! Success envelope.

use serde::Serialize;

/// Every successful JSON body is `{ "data": ... }`. Failures use the
/// `{ "error", "code" }` shape produced by [`crate::error::AppError`].
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
