pub mod announcements;
pub mod credentials;
pub mod metrics;
pub mod validation;
pub mod visibility;
pub mod window;
