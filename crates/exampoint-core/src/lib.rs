//! ExamPoint core library.
//! Subscription tiers, session state, feature guards, billing links and the
//! study generation workflows (keyword-matched mocks and chat-completion backed).

pub mod billing;
pub mod chat;
pub mod config;
pub mod error;
pub mod guard;
pub mod mock;
pub mod plans;
pub mod session;
pub mod study;
pub mod tier;

pub use billing::{subscription_overview, BillingLinks, CheckoutOutcome, SubscriptionOverview};
pub use chat::{
    ChatBackend, ChatCompletionClient, ExplanationRequest, FlashcardRequest, QuizRequest, StudyGenerator,
};
pub use config::{ChatConfig, MockLatency, StudyConfig};
pub use error::{GenerationError, GenerationResult, MockError, SessionError};
pub use guard::{tutor_guard, Guard, GuardView, UpgradePrompt};
pub use mock::{MockStudio, UploadedFile};
pub use plans::{plan, Plan};
pub use session::{Session, SignupEvent, SignupStats, User};
pub use study::{Difficulty, Flashcard, QuestionType, QuizQuestion, TutorExplanation};
pub use tier::{has_access, Tier, TierParseError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
