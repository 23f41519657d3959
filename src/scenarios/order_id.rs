use chrono::Utc;

/// Order identifier for one payment iteration: the current time in
/// milliseconds since the Unix epoch.
///
/// Two iterations started within the same millisecond get the same id. There
/// is no uniqueness check.
pub fn generate_order_id() -> String {
    Utc::now().timestamp_millis().to_string()
}
