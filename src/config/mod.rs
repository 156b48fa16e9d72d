//! 配置管理
//!
//! 静态配置来自默认值、配置文件与环境变量，启动时加载一次后全局只读。

mod r#impl;
mod structs;

pub use structs::*;
