//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (事件循环，持有平台资源)
//!     ↓
//! workflow::ScreenController (界面状态机)
//!     ↓
//! services (能力层：题目 / 答案 / 地图)
//!     ↓
//! infrastructure (基础设施：相机 / 网络 / 链接 / 终端)
//! ```

pub mod app;

pub use app::App;
