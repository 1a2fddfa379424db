//! 终端界面
//!
//! 终端同时充当相机（每行输入是一段二维码解码文本）和显示界面，
//! 两种角色共用同一个输入流。

use std::io::Write;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{CameraScanner, ScanEvent, UserAction, UserInterface};
use crate::config::PermissionMode;
use crate::error::AppResult;
use crate::models::{Alert, Question, Screen};

pub const REQUESTING_PERMISSION_TEXT: &str = "Requesting camera permission";
pub const PERMISSION_DENIED_TEXT: &str = "No access to camera";
pub const SCAN_PROMPT_TEXT: &str = "Scan a QR code (paste its text and press Enter):";
pub const RESCAN_TEXT: &str = "Scan New QR Code";

pub struct Terminal<R, W> {
    input: Mutex<Lines<R>>,
    output: StdMutex<W>,
    permission: PermissionMode,
}

impl Terminal<BufReader<Stdin>, std::io::Stdout> {
    /// 标准输入输出上的终端
    pub fn stdio(permission: PermissionMode) -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            permission,
        )
    }
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(reader: R, writer: W, permission: PermissionMode) -> Self {
        Self {
            input: Mutex::new(reader.lines()),
            output: StdMutex::new(writer),
            permission,
        }
    }

    /// 取回输出端
    pub fn into_output(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn read_line(&self) -> AppResult<Option<String>> {
        let mut input = self.input.lock().await;
        Ok(input.next_line().await?)
    }

    fn write_line(&self, text: &str) {
        let mut out = match self.output.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!("终端输出失败: {}", e);
        }
    }
}

/// 解析题目界面的一行输入
///
/// 选项编号从 1 开始；无法识别时返回 `None`
fn parse_action(line: &str) -> Option<UserAction> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "rescan" => Some(UserAction::Rescan),
        "q" | "quit" => Some(UserAction::Quit),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Some(UserAction::Choose(n - 1)),
            _ => None,
        },
    }
}

#[async_trait]
impl<R, W> CameraScanner for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn request_permission(&self) -> AppResult<bool> {
        match self.permission {
            PermissionMode::Granted => Ok(true),
            PermissionMode::Denied => Ok(false),
            PermissionMode::Ask => {
                self.write_line("Allow camera access? [y/N]");
                let answer = self.read_line().await?.unwrap_or_default();
                Ok(matches!(
                    answer.trim().to_ascii_lowercase().as_str(),
                    "y" | "yes"
                ))
            }
        }
    }

    async fn scan(&self) -> AppResult<Option<ScanEvent>> {
        loop {
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            let data = line.trim();
            if data.is_empty() {
                continue;
            }
            debug!("扫码输入: {}", data);
            return Ok(Some(ScanEvent::qr(data)));
        }
    }
}

#[async_trait]
impl<R, W> UserInterface for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    fn render(&self, screen: &Screen) {
        match screen {
            Screen::RequestingPermission => self.write_line(REQUESTING_PERMISSION_TEXT),
            Screen::PermissionDenied => self.write_line(PERMISSION_DENIED_TEXT),
            Screen::Scanning => self.write_line(SCAN_PROMPT_TEXT),
            Screen::QuestionLoading { url } => {
                self.write_line(&format!("Loading question from {} ...", url))
            }
            Screen::QuestionDisplayed { question } => {
                self.write_line("");
                self.write_line(question.prompt_text());
                for (i, choice) in question.choices().iter().enumerate() {
                    self.write_line(&format!("  {}. {}", i + 1, choice));
                }
                self.write_line(&format!("  r. {}", RESCAN_TEXT));
                self.write_line("  q. Quit");
            }
            // 答对的提示框随后弹出，这里无需额外内容
            Screen::AnswerCorrect { .. } => {}
        }
    }

    async fn show_alert(&self, alert: &Alert) -> AppResult<()> {
        self.write_line(&format!("[{}] {}", alert.title(), alert.message()));
        self.write_line("Press Enter to continue");
        self.read_line().await?;
        Ok(())
    }

    async fn next_action(&self, question: &Question) -> AppResult<UserAction> {
        loop {
            self.write_line(&format!(
                "Choose 1-{}, r to rescan, q to quit:",
                question.choices().len()
            ));
            let Some(line) = self.read_line().await? else {
                return Ok(UserAction::Quit);
            };
            match parse_action(&line) {
                Some(action) => return Ok(action),
                None => self.write_line("Unknown choice"),
            }
        }
    }
}
