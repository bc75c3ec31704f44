//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_delivery_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum DeliveryError {
            $($variant(String),)*
        }

        impl DeliveryError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DeliveryError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DeliveryError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DeliveryError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DeliveryError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DeliveryError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_delivery_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    Persistence("E003", "Persistence Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    InvalidState("E006", "Invalid State Error"),
    DuplicateDelivery("E007", "Delivery Already Exists"),
    Serialization("E008", "Serialization Error"),
    Notification("E009", "Notification Error"),
}

impl DeliveryError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DeliveryError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DeliveryError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                DeliveryError::DuplicateDelivery(detail)
            }
            _ => DeliveryError::Persistence(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DeliveryError {
    fn from(err: serde_json::Error) -> Self {
        DeliveryError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeliveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DeliveryError::database_config("test").code(), "E001");
        assert_eq!(DeliveryError::persistence("test").code(), "E003");
        assert_eq!(DeliveryError::validation("test").code(), "E004");
        assert_eq!(DeliveryError::invalid_state("test").code(), "E006");
        assert_eq!(DeliveryError::duplicate_delivery("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DeliveryError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            DeliveryError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = DeliveryError::validation("review note is required");
        assert_eq!(err.message(), "review note is required");
    }

    #[test]
    fn test_format_simple() {
        let err = DeliveryError::invalid_state("delivery is already approved");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid State Error"));
        assert!(formatted.contains("delivery is already approved"));
    }

    #[test]
    fn test_db_err_maps_to_persistence() {
        let err: DeliveryError = sea_orm::DbErr::Custom("connection reset".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("connection reset"));
    }
}
