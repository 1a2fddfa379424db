//! 一次性提示框
//!
//! 每次操作失败或判题完成都只弹出一个提示，用户确认后才继续接受输入

/// 待确认的提示框
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// 获取题目失败，已回到扫码界面
    FetchFailed,
    /// 提交答案失败，仍停留在题目界面
    SubmitFailed,
    /// 答错，仍停留在题目界面
    Incorrect,
    /// 答对，确认后打开地图
    Correct { coordinates: String },
    /// 地图打开失败
    LaunchFailed,
}

impl Alert {
    pub fn title(&self) -> &'static str {
        match self {
            Alert::FetchFailed | Alert::SubmitFailed | Alert::LaunchFailed => "Error",
            Alert::Incorrect => "Incorrect",
            Alert::Correct { .. } => "Correct!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Alert::FetchFailed => "Failed to fetch question",
            Alert::SubmitFailed => "Failed to submit answer",
            Alert::Incorrect => "Try again",
            Alert::Correct { .. } => "Opening next location in maps",
            Alert::LaunchFailed => "Failed to open maps",
        }
    }

    /// 确认后需要打开地图的坐标
    pub fn map_handoff(&self) -> Option<&str> {
        match self {
            Alert::Correct { coordinates } => Some(coordinates),
            _ => None,
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texts_match_user_notices() {
        assert_eq!(Alert::FetchFailed.to_string(), "Error: Failed to fetch question");
        assert_eq!(Alert::SubmitFailed.to_string(), "Error: Failed to submit answer");
        assert_eq!(Alert::Incorrect.to_string(), "Incorrect: Try again");
        let correct = Alert::Correct {
            coordinates: "1,2".into(),
        };
        assert_eq!(correct.title(), "Correct!");
        assert_eq!(correct.map_handoff(), Some("1,2"));
        assert_eq!(Alert::Incorrect.map_handoff(), None);
    }
}
