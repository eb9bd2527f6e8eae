pub mod domain;
pub mod ports;

pub use domain::{
    AccessFee, AiCourse, AiLearningConfig, Batch, BatchFee, DashboardStats, HybridConfig,
    HybridCourse, NewUser, OfflineConfig, OfflineCourse, OnlineConfig, OnlineCourse, PageConfig,
    PageId, PageInfo, PaymentConfig, PublicUser, SeatStats, Student, Subscription, User,
    VerifyOutcome,
};
pub use ports::{ConfigStore, Mailer, PortError, PortResult, StudentStore, UserStore};
