use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One response from the payment-status endpoint.
///
/// The provider reports two independent fields: `payment_status` tracks the
/// payment itself (`"paid"` once the charge settles) while the top-level
/// `status` tracks the checkout session (`"expired"` once the provider gives
/// up on it). Anything else counts as still pending.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct StatusReport {
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub status: String,
    /// Provider passthrough data; carries `course_id` on paid sessions.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl StatusReport {
    /// A report that is neither paid nor expired.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn paid(course_id: Option<&str>) -> Self {
        let mut metadata = HashMap::new();
        if let Some(course_id) = course_id {
            metadata.insert("course_id".to_owned(), Value::from(course_id));
        }
        Self {
            payment_status: "paid".to_owned(),
            status: "complete".to_owned(),
            metadata,
        }
    }

    pub fn expired() -> Self {
        Self {
            status: "expired".to_owned(),
            ..Self::default()
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    pub fn is_expired(&self) -> bool {
        self.status == "expired"
    }

    /// The course the session was opened for, if the provider echoed it back.
    pub fn course_id(&self) -> Option<String> {
        self.metadata
            .get("course_id")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}
