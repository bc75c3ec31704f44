use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::error;

use crate::errors::DeliveryError;
use crate::models::deliveries::requests::{
    DeliveryLookupQuery, ResubmitDeliveryBody, ReviewDeliveriesRequest, SubmitDeliveryBody,
};
use crate::models::deliveries::responses::{
    DeliveryLookupResponse, ReviewBatchResponse, ReviewFailure, ReviewOutcomeItem,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{DeliveryLifecycleManager, ReviewOutcome};

type Manager = web::Data<DeliveryLifecycleManager>;

/// 将业务错误映射为 HTTP 响应
pub fn error_response(err: &DeliveryError) -> HttpResponse {
    let code = ErrorCode::from(err);
    let body = ApiResponse::error_empty(code, err.message());
    match err {
        DeliveryError::Validation(_) => HttpResponse::BadRequest().json(body),
        DeliveryError::NotFound(_) => HttpResponse::NotFound().json(body),
        DeliveryError::InvalidState(_) | DeliveryError::DuplicateDelivery(_) => {
            HttpResponse::Conflict().json(body)
        }
        _ => {
            error!("Delivery request failed: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

// 首次提交
pub async fn submit_delivery(
    manager: Manager,
    body: web::Json<SubmitDeliveryBody>,
) -> ActixResult<HttpResponse> {
    let SubmitDeliveryBody { input, due_at } = body.into_inner();
    match manager.submit(input, due_at).await {
        Ok(delivery) => Ok(HttpResponse::Created().json(ApiResponse::success(delivery, "提交成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取提交详情
pub async fn get_delivery(manager: Manager, path: web::Path<String>) -> ActixResult<HttpResponse> {
    match manager.get_by_id(&path.into_inner()).await {
        Ok(delivery) => Ok(HttpResponse::Ok().json(ApiResponse::success(delivery, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 退回后重新提交
pub async fn resubmit_delivery(
    manager: Manager,
    path: web::Path<String>,
    body: web::Json<ResubmitDeliveryBody>,
) -> ActixResult<HttpResponse> {
    let ResubmitDeliveryBody { patch, due_at } = body.into_inner();
    match manager.resubmit(&path.into_inner(), patch, due_at).await {
        Ok(delivery) => Ok(HttpResponse::Ok().json(ApiResponse::success(delivery, "重新提交成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

fn outcome_item(outcome: ReviewOutcome) -> ReviewOutcomeItem {
    match outcome.result {
        Ok(delivery) => ReviewOutcomeItem {
            delivery_id: outcome.delivery_id,
            delivery: Some(delivery),
            error: None,
        },
        Err(e) => ReviewOutcomeItem {
            delivery_id: outcome.delivery_id,
            delivery: None,
            error: Some(ReviewFailure {
                code: e.code(),
                message: e.message().to_string(),
            }),
        },
    }
}

// 批量批改，单条失败不影响其他记录
pub async fn review_deliveries(
    manager: Manager,
    body: web::Json<ReviewDeliveriesRequest>,
) -> ActixResult<HttpResponse> {
    let req = body.into_inner();
    let outcomes = match manager
        .review(&req.delivery_ids, req.review_status, req.review_note.as_deref())
        .await
    {
        Ok(outcomes) => outcomes,
        Err(e) => return Ok(error_response(&e)),
    };

    let items: Vec<ReviewOutcomeItem> = outcomes.into_iter().map(outcome_item).collect();
    let failed = items.iter().filter(|i| i.error.is_some()).count();
    let response = ReviewBatchResponse {
        succeeded: items.len() - failed,
        failed,
        items,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "批改完成")))
}

// 查询学生对某内容的提交及展示状态
pub async fn lookup_delivery(
    manager: Manager,
    query: web::Query<DeliveryLookupQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();
    match manager
        .get_by_student_and_post(&query.student_id, &query.post_id)
        .await
    {
        Ok(lookup) => {
            let response = DeliveryLookupResponse {
                display_status: DeliveryLifecycleManager::compute_display_status(&lookup),
                lookup,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 某内容下的提交列表
pub async fn list_post_deliveries(
    manager: Manager,
    path: web::Path<String>, // post_id
) -> ActixResult<HttpResponse> {
    match manager.list_for_post(&path.into_inner()).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_delivery_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/deliveries")
            .route("", web::post().to(submit_delivery))
            // 固定路径需在 /{id} 之前注册
            .route("/review", web::post().to(review_deliveries))
            .route("/lookup", web::get().to(lookup_delivery))
            .route("/{id}", web::get().to(get_delivery))
            .route("/{id}", web::put().to(resubmit_delivery)),
    );

    cfg.service(
        web::scope("/api/v1/posts/{post_id}/deliveries")
            .route("", web::get().to(list_post_deliveries)),
    );
}
