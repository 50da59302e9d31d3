//! navigator - debounced fuzzy search for a file navigator tree
//!
//! 模块结构：
//! - models: 导航树（NavigatorTree, SnapshotNode）
//! - kernel: 模糊匹配、防抖、搜索框、树装饰器
//! - kernel::services: 配置与异步定时器
//! - app: 事件循环组装（NavigatorApp）

pub mod app;
pub mod kernel;
pub mod models;
