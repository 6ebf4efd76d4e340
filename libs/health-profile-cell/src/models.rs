use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One profile per user. Every column may still be empty on a fresh account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
}

impl PatientProfile {
    /// Name shown in greetings; falls back to a neutral label.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("there")
    }

    pub fn is_complete(&self) -> bool {
        let filled = |value: &Option<String>| {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        };
        filled(&self.full_name) && filled(&self.gender)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileStatus {
    #[serde(default)]
    pub needs_profile: bool,
}

/// Body for `PUT /me/profile`. The backend rejects it without a name and gender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
}

impl UpdateProfileRequest {
    pub fn new(full_name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            gender: gender.into(),
            date_of_birth: None,
            phone: None,
            address: None,
            blood_group: None,
            conditions: None,
            allergies: None,
        }
    }

    /// Starts an edit from the stored profile, keeping its optional fields.
    pub fn from_profile(profile: &PatientProfile) -> Self {
        Self {
            full_name: profile.full_name.clone().unwrap_or_default(),
            gender: profile.gender.clone().unwrap_or_default(),
            date_of_birth: profile.date_of_birth,
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            blood_group: profile.blood_group.clone(),
            conditions: profile.conditions.clone(),
            allergies: profile.allergies.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_decodes() {
        let profile: PatientProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, PatientProfile::default());
        assert!(!profile.is_complete());
        assert_eq!(profile.display_name(), "there");
    }

    #[test]
    fn test_null_columns_decode_as_none() {
        let profile: PatientProfile = serde_json::from_value(serde_json::json!({
            "full_name": "Aoife Kelly",
            "gender": "female",
            "date_of_birth": "1980-04-12",
            "phone": null,
            "blood_group": null
        }))
        .unwrap();

        assert!(profile.is_complete());
        assert_eq!(profile.display_name(), "Aoife Kelly");
        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(1980, 4, 12));
        assert!(profile.phone.is_none());
    }

    #[test]
    fn test_update_always_sends_required_fields() {
        let body = serde_json::to_value(UpdateProfileRequest::new("Aoife Kelly", "female")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "full_name": "Aoife Kelly", "gender": "female" })
        );
    }
}
