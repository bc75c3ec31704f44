pub mod deliveries;

pub use deliveries::configure_delivery_routes;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};

// 未匹配的路由
pub async fn not_found() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, "接口不存在")))
}
