use serde::{Deserialize, Serialize};

/// 提交答案的请求体：`{"answer": "<选项文本>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

impl AnswerRequest {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

/// 判题接口的原始响应体
///
/// 答错时服务端可能不返回坐标
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    pub is_correct: bool,
    #[serde(default)]
    pub coordinates: Option<String>,
}

/// 判题结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerResult {
    /// 答对，附带下一个地点的坐标
    Correct { coordinates: String },
    /// 答错
    Incorrect,
}

impl AnswerResult {
    /// 从响应体构造判题结果
    ///
    /// 答对但缺少坐标（或坐标为空白）视为格式错误
    pub fn from_response(response: AnswerResponse) -> Result<Self, String> {
        if !response.is_correct {
            return Ok(AnswerResult::Incorrect);
        }
        match response.coordinates {
            Some(c) if !c.trim().is_empty() => Ok(AnswerResult::Correct {
                coordinates: c.trim().to_string(),
            }),
            _ => Err("答对但缺少 coordinates 字段".to_string()),
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerResult::Correct { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<AnswerResult, String> {
        AnswerResult::from_response(serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(AnswerRequest::new("4")).unwrap();
        assert_eq!(body, serde_json::json!({"answer": "4"}));
    }

    #[test]
    fn correct_answer_carries_coordinates() {
        let result = parse(r#"{"is_correct":true,"coordinates":"40.7,-74.0"}"#).unwrap();
        assert_eq!(
            result,
            AnswerResult::Correct {
                coordinates: "40.7,-74.0".into()
            }
        );
        assert!(result.is_correct());
    }

    #[test]
    fn incorrect_answer_does_not_need_coordinates() {
        assert_eq!(parse(r#"{"is_correct":false}"#).unwrap(), AnswerResult::Incorrect);
        assert_eq!(
            parse(r#"{"is_correct":false,"coordinates":"1,2"}"#).unwrap(),
            AnswerResult::Incorrect
        );
    }

    #[test]
    fn correct_without_coordinates_is_malformed() {
        assert!(parse(r#"{"is_correct":true}"#).is_err());
        assert!(parse(r#"{"is_correct":true,"coordinates":"  "}"#).is_err());
    }
}
