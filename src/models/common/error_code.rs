use crate::errors::DeliveryError;

// 接口业务状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,

    // 提交相关
    DeliveryNotFound = 3001,
    DeliveryAlreadyExists = 3002,
    InvalidDeliveryState = 3003,

    // 服务端错误
    InternalServerError = 5000,
    PersistenceFailed = 5001,
}

impl From<&DeliveryError> for ErrorCode {
    fn from(err: &DeliveryError) -> Self {
        match err {
            DeliveryError::Validation(_) => ErrorCode::ValidationFailed,
            DeliveryError::NotFound(_) => ErrorCode::DeliveryNotFound,
            DeliveryError::DuplicateDelivery(_) => ErrorCode::DeliveryAlreadyExists,
            DeliveryError::InvalidState(_) => ErrorCode::InvalidDeliveryState,
            DeliveryError::Persistence(_)
            | DeliveryError::DatabaseConfig(_)
            | DeliveryError::DatabaseConnection(_) => ErrorCode::PersistenceFailed,
            DeliveryError::Serialization(_) | DeliveryError::Notification(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
