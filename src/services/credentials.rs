use std::sync::Arc;

use tracing::warn;

use crate::{
    db::teachers::TeacherStore, error::ServiceError, models::teacher::Principal,
    services::metrics::AUTH_FAILURES_COUNTER,
};

/// Single-factor check: a known teacher identifier is sufficient.
#[derive(Clone)]
pub struct CredentialGate {
    teachers: Arc<dyn TeacherStore>,
}

impl CredentialGate {
    pub fn new(teachers: Arc<dyn TeacherStore>) -> Self {
        Self { teachers }
    }

    pub async fn authorize(&self, identifier: Option<&str>) -> Result<Principal, ServiceError> {
        let Some(username) = identifier.filter(|s| !s.is_empty()) else {
            AUTH_FAILURES_COUNTER.with_label_values(&["missing"]).inc();
            return Err(ServiceError::AuthenticationMissing);
        };

        match self.teachers.find(username).await? {
            Some(teacher) => Ok(teacher.into()),
            None => {
                AUTH_FAILURES_COUNTER.with_label_values(&["invalid"]).inc();
                warn!("Rejected unknown teacher identifier {username:?}");
                Err(ServiceError::AuthenticationInvalid)
            }
        }
    }
}
