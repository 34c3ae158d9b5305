pub mod category;
pub mod engagement;
pub mod hashtags;
pub mod platform;

pub use category::CategoryClassifier;
pub use engagement::{EngagementModel, QualityBreakdown, ViralityBreakdown};
pub use hashtags::HashtagGenerator;
pub use platform::{
    length_score, InstagramScorer, LinkedInScorer, PlatformRegistry, PlatformScorer, TwitterScorer,
};
