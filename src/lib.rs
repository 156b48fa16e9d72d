//! 学校管理系统后端服务
//!
//! 基于 Actix Web 构建。每个请求先由会话解析出调用者，再经权限表放行，
//! 最后由范围查询保证只读写调用者可见的行。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `scope`: 按调用者角色生成的行级可见范围
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod scope;
pub mod services;
pub mod storage;
pub mod utils;
