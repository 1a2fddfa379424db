use serde::{Deserialize, Serialize};

use crate::utils::logging::truncate_text;

/// 扫码后 GET 得到的原始响应体
///
/// 字段全部可缺省，合法性在 [`Question::from_body`] 中校验
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBody {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

/// 已校验的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt_text: String,
    choices: Vec<String>,
}

impl Question {
    /// 直接构造题目，`choices` 为空时返回 `None`
    pub fn new(prompt_text: impl Into<String>, choices: Vec<String>) -> Option<Self> {
        if choices.is_empty() {
            return None;
        }
        Some(Self {
            prompt_text: prompt_text.into(),
            choices,
        })
    }

    /// 从响应体构造题目
    ///
    /// # 返回
    /// 缺少 `question`、缺少 `choices` 或 `choices` 为空时返回错误原因
    pub fn from_body(body: QuestionBody) -> Result<Self, String> {
        let prompt_text = body.question.ok_or_else(|| "缺少 question 字段".to_string())?;
        let choices = body.choices.ok_or_else(|| "缺少 choices 字段".to_string())?;
        Self::new(prompt_text, choices).ok_or_else(|| "choices 为空".to_string())
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// 按下标取选项
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{} 个选项]",
            truncate_text(&self.prompt_text, 80),
            self.choices.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Question, String> {
        let body: QuestionBody = serde_json::from_str(raw).unwrap();
        Question::from_body(body)
    }

    #[test]
    fn well_formed_body_keeps_choice_order() {
        let q = parse(r#"{"question":"2+2?","choices":["3","4"]}"#).unwrap();
        assert_eq!(q.prompt_text(), "2+2?");
        assert_eq!(q.choices(), ["3", "4"]);
        assert_eq!(q.choice(1), Some("4"));
        assert_eq!(q.choice(2), None);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let q = parse(r#"{"question":"Capital?","choices":["Paris"],"id":7}"#).unwrap();
        assert_eq!(q.choices().len(), 1);
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        assert!(parse(r#"{"choices":["a"]}"#).is_err());
        assert!(parse(r#"{"question":"?"}"#).is_err());
        assert_eq!(
            parse(r#"{"question":"?","choices":[]}"#).unwrap_err(),
            "choices 为空"
        );
    }

    #[test]
    fn display_truncates_long_prompt() {
        let q = Question::new("x".repeat(100), vec!["a".into()]).unwrap();
        let shown = q.to_string();
        assert!(shown.starts_with(&"x".repeat(80)));
        assert!(shown.contains("...") && shown.ends_with("[1 个选项]"));
    }
}
