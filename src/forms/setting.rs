use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SettingForm {
    pub value: serde_json::Value,
    #[validate(max_length = 500)]
    pub description: Option<String>,
}

/// Setting keys are dotted lowercase identifiers, e.g. `billing.grace_days`.
pub fn is_valid_setting_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 100
        && key
            .split('.')
            .all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_keys() {
        assert!(is_valid_setting_key("billing.grace_days"));
        assert!(is_valid_setting_key("maintenance"));
        assert!(!is_valid_setting_key(""));
        assert!(!is_valid_setting_key("Billing.Grace"));
        assert!(!is_valid_setting_key("billing..grace"));
        assert!(!is_valid_setting_key("drop table"));
    }
}
