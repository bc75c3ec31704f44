//! 缓存层
//!
//! 只作为存储的只读投影：写操作之后必须显式失效，存储始终是唯一的数据来源。

mod delivery_cache;

pub use delivery_cache::DeliveryCache;
