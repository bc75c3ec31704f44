//! 预导入模块，方便使用

pub use super::deliveries::{
    ActiveModel as DeliveryActiveModel, Entity as Deliveries, Model as DeliveryModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
