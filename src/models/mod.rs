pub mod alert;
pub mod answer;
pub mod question;
pub mod session;

pub use alert::Alert;
pub use answer::{AnswerRequest, AnswerResponse, AnswerResult};
pub use question::{Question, QuestionBody};
pub use session::{CameraPermission, Screen, SessionState, SessionStats};
