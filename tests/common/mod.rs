//! 集成测试共用的平台能力替身

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use qr_quest::config::Config;
use qr_quest::infrastructure::{
    CameraScanner, HttpClient, HttpMethod, ScanEvent, UrlLauncher, UserAction, UserInterface,
};
use qr_quest::models::{Alert, Question, Screen};
use qr_quest::{AppError, AppResult, ScreenController, TransportError};
use serde_json::Value;

pub const ENDPOINT: &str = "https://quest.test/question";
pub const MAPS: &str = "https://www.google.com/maps/search/?api=1&query=";

pub fn config() -> Config {
    Config {
        submission_endpoint: ENDPOINT.to_string(),
        ..Config::default()
    }
}

// ========== 相机 ==========

pub struct FakeScanner {
    granted: bool,
    scans: Mutex<VecDeque<ScanEvent>>,
}

impl FakeScanner {
    pub fn new(granted: bool) -> Self {
        Self {
            granted,
            scans: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_scans(granted: bool, scans: &[&str]) -> Self {
        let scanner = Self::new(granted);
        scanner
            .scans
            .lock()
            .unwrap()
            .extend(scans.iter().map(|s| ScanEvent::qr(*s)));
        scanner
    }
}

#[async_trait]
impl CameraScanner for FakeScanner {
    async fn request_permission(&self) -> AppResult<bool> {
        Ok(self.granted)
    }

    async fn scan(&self) -> AppResult<Option<ScanEvent>> {
        Ok(self.scans.lock().unwrap().pop_front())
    }
}

// ========== 网络 ==========

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

type Response = Result<Value, TransportError>;

/// 按 "方法 + 地址" 依次返回响应（最后一个响应重复使用），并记录所有请求
#[derive(Default)]
pub struct FakeHttp {
    routes: Mutex<HashMap<(String, String), VecDeque<Response>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(&self, url: &str, response: Response) {
        self.route(HttpMethod::Get, url, vec![response]);
    }

    pub fn on_post(&self, url: &str, response: Response) {
        self.route(HttpMethod::Post, url, vec![response]);
    }

    pub fn on_post_sequence(&self, url: &str, responses: Vec<Response>) {
        self.route(HttpMethod::Post, url, responses);
    }

    fn route(&self, method: HttpMethod, url: &str, responses: Vec<Response>) {
        self.routes
            .lock()
            .unwrap()
            .insert((method.to_string(), url.to_string()), responses.into());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: HttpMethod) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });
        let mut routes = self.routes.lock().unwrap();
        let Some(queue) = routes.get_mut(&(method.to_string(), url.to_string())) else {
            return Err(TransportError::Connect(format!("no route for {}", url)));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}

// ========== 链接 ==========

#[derive(Default)]
pub struct FakeLauncher {
    fail: bool,
    opened: Mutex<Vec<String>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlLauncher for FakeLauncher {
    async fn launch(&self, url: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::launch_failed(url, "no handler"));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

// ========== 界面 ==========

/// 按脚本返回用户操作，并记录渲染过的界面和提示框
#[derive(Default)]
pub struct FakeUi {
    actions: Mutex<VecDeque<UserAction>>,
    screens: Mutex<Vec<Screen>>,
    alerts: Mutex<Vec<Alert>>,
}

impl FakeUi {
    pub fn with_actions(actions: &[UserAction]) -> Self {
        let ui = Self::default();
        ui.actions.lock().unwrap().extend(actions.iter().copied());
        ui
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.screens.lock().unwrap().clone()
    }

    pub fn screen_names(&self) -> Vec<&'static str> {
        self.screens.lock().unwrap().iter().map(Screen::name).collect()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserInterface for FakeUi {
    fn render(&self, screen: &Screen) {
        self.screens.lock().unwrap().push(screen.clone());
    }

    async fn show_alert(&self, alert: &Alert) -> AppResult<()> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }

    async fn next_action(&self, _question: &Question) -> AppResult<UserAction> {
        Ok(self
            .actions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(UserAction::Quit))
    }
}

// ========== 控制器装配 ==========

pub struct Harness {
    pub controller: ScreenController,
    pub http: Arc<FakeHttp>,
    pub launcher: Arc<FakeLauncher>,
}

impl Harness {
    pub fn new(granted: bool) -> Self {
        Self::with_launcher(granted, FakeLauncher::new())
    }

    pub fn with_launcher(granted: bool, launcher: FakeLauncher) -> Self {
        let http = Arc::new(FakeHttp::new());
        let launcher = Arc::new(launcher);
        let controller = ScreenController::new(
            &config(),
            Arc::new(FakeScanner::new(granted)),
            http.clone(),
            launcher.clone(),
        );
        Self {
            controller,
            http,
            launcher,
        }
    }
}

pub fn question_body() -> Value {
    serde_json::json!({"question": "2+2?", "choices": ["3", "4"]})
}
