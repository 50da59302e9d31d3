//! 应用层：事件循环组装

pub mod navigator;

pub use navigator::{render_label, AppError, DecoratedRow, NavigatorApp};
