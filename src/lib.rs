//! 班级提交与批改服务
//!
//! 管理学生对可评分内容的提交、教师批改与退回后的重新提交。
//!
//! # 架构
//! - `cache`: 按 (学生, 内容) 的查询缓存（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `notifications`: 通知发送
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 提交流程
//! - `storage`: 数据存储层（SeaORM / 内存）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
