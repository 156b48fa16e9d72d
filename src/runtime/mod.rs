//! 进程生命周期：启动准备与关停
pub mod lifetime;
