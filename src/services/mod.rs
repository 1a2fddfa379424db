pub mod answer_service;
pub mod map_service;
pub mod question_service;

pub use answer_service::AnswerService;
pub use map_service::MapService;
pub use question_service::QuestionService;
