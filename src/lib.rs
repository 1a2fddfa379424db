//! # QR Quest
//!
//! 扫码寻宝：扫描二维码 → 获取题目 → 作答 → 答对后在地图中打开下一个地点
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有平台资源，只暴露能力
//! - `CameraScanner` / `HttpClient` / `UrlLauncher` / `UserInterface` - 四个能力接口
//! - `Terminal`、`ReqwestHttpClient`、`SystemUrlLauncher` - 真实实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心界面状态
//! - `QuestionService` - 获取并校验题目
//! - `AnswerService` - 提交答案并解析判题结果
//! - `MapService` - 拼接地图链接并打开
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 界面状态机
//! - `ScreenController` - 根据当前界面接受或忽略输入，驱动状态迁移
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 事件循环，负责渲染、读取输入和确认提示框

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, TransportError};
pub use models::{Alert, AnswerResult, Question, Screen, SessionState};
pub use orchestrator::App;
pub use workflow::{Outcome, ScreenController, UiEvent};
