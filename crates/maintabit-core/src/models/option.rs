//! Directory options: categories, departments, sub-categories.
//!
//! The web client stores every selectable value in one collection
//! distinguished by a `type` tag. Here the tag selects a variant of
//! [`OptionKind`], and each variant carries only the fields that make
//! sense for it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MaintabitError, MaintabitResult};

/// The `type` tag of an option, without its payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum OptionType {
    Category,
    FacilityType,
    Department,
    SubCategory,
    Other,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Category => "category",
            OptionType::FacilityType => "facilityType",
            OptionType::Department => "department",
            OptionType::SubCategory => "subCategory",
            OptionType::Other => "other",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(OptionType::Category),
            "facilityType" => Ok(OptionType::FacilityType),
            "department" => Ok(OptionType::Department),
            "subCategory" => Ok(OptionType::SubCategory),
            "other" => Ok(OptionType::Other),
            other => Err(format!("unknown option type: {other}")),
        }
    }
}

/// Variant-specific payload of a directory option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OptionKind {
    Category {
        value: String,
    },
    FacilityType {
        value: String,
    },
    Department {
        value: String,
        /// Numeric code used when composing tracking IDs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SubCategory {
        value: String,
        parent_category: String,
    },
    Other {
        value: String,
    },
}

impl OptionKind {
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionKind::Category { .. } => OptionType::Category,
            OptionKind::FacilityType { .. } => OptionType::FacilityType,
            OptionKind::Department { .. } => OptionType::Department,
            OptionKind::SubCategory { .. } => OptionType::SubCategory,
            OptionKind::Other { .. } => OptionType::Other,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            OptionKind::Category { value }
            | OptionKind::FacilityType { value }
            | OptionKind::Department { value, .. }
            | OptionKind::SubCategory { value, .. }
            | OptionKind::Other { value } => value,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            OptionKind::Department { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn parent_category(&self) -> Option<&str> {
        match self {
            OptionKind::SubCategory {
                parent_category, ..
            } => Some(parent_category),
            _ => None,
        }
    }

    /// Strip surrounding whitespace from every text field.
    pub fn normalize(&mut self) {
        match self {
            OptionKind::Category { value }
            | OptionKind::FacilityType { value }
            | OptionKind::Other { value } => trim_in_place(value),
            OptionKind::Department { value, code } => {
                trim_in_place(value);
                if let Some(code) = code {
                    trim_in_place(code);
                }
            }
            OptionKind::SubCategory {
                value,
                parent_category,
            } => {
                trim_in_place(value);
                trim_in_place(parent_category);
            }
        }
    }

    /// Boundary validation of the per-variant required fields.
    pub fn validate(&self) -> MaintabitResult<()> {
        if self.value().trim().is_empty() {
            return Err(MaintabitError::validation("Option value is required"));
        }
        match self {
            OptionKind::SubCategory {
                parent_category, ..
            } if parent_category.trim().is_empty() => Err(MaintabitError::validation(
                "Sub-category options require a parent category",
            )),
            OptionKind::Department {
                code: Some(code), ..
            } if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) => Err(
                MaintabitError::validation("Department code must be numeric"),
            ),
            _ => Ok(()),
        }
    }

    /// Apply a partial update in place. Fields that do not exist on this
    /// variant are rejected rather than silently dropped.
    pub fn apply(&mut self, patch: &UpdateOption) -> MaintabitResult<()> {
        if let Some(new_value) = &patch.value {
            match self {
                OptionKind::Category { value }
                | OptionKind::FacilityType { value }
                | OptionKind::Department { value, .. }
                | OptionKind::SubCategory { value, .. }
                | OptionKind::Other { value } => *value = new_value.clone(),
            }
        }

        if let Some(new_code) = &patch.code {
            match self {
                OptionKind::Department { code, .. } => *code = new_code.clone(),
                _ => {
                    return Err(MaintabitError::validation(
                        "Only department options carry a code",
                    ));
                }
            }
        }

        if let Some(new_parent) = &patch.parent_category {
            match self {
                OptionKind::SubCategory {
                    parent_category, ..
                } => *parent_category = new_parent.clone(),
                _ => {
                    return Err(MaintabitError::validation(
                        "Only sub-category options have a parent category",
                    ));
                }
            }
        }

        self.normalize();
        self.validate()
    }
}

fn trim_in_place(text: &mut String) {
    let trimmed = text.trim();
    if trimmed.len() != text.len() {
        *text = trimmed.to_owned();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOption {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: OptionKind,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update of an option. The variant itself cannot change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOption {
    pub value: Option<String>,
    /// `Some(Some(code))` = set, `Some(None)` = clear, `None` = no change.
    #[serde(default, with = "double_option")]
    pub code: Option<Option<String>>,
    pub parent_category: Option<String>,
    pub is_active: Option<bool>,
}

/// Filter for listing options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionFilter {
    #[serde(rename = "type")]
    pub option_type: Option<OptionType>,
    /// Only honoured together with `type = subCategory`.
    pub parent_category: Option<String>,
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tag_selects_variant() {
        let json = r#"{"type":"subCategory","value":"tap","parentCategory":"facility"}"#;
        let kind: OptionKind = serde_json::from_str(json).unwrap();
        assert_eq!(
            kind,
            OptionKind::SubCategory {
                value: "tap".into(),
                parent_category: "facility".into(),
            }
        );
        assert_eq!(kind.option_type(), OptionType::SubCategory);
    }

    #[test]
    fn sub_category_without_parent_is_rejected_at_parse() {
        let json = r#"{"type":"subCategory","value":"tap"}"#;
        assert!(serde_json::from_str::<OptionKind>(json).is_err());
    }

    #[test]
    fn normalize_trims_text_fields() {
        let mut kind = OptionKind::Department {
            value: "  Civil Engineering ".into(),
            code: Some(" 19110 ".into()),
        };
        kind.normalize();
        assert_eq!(kind.value(), "Civil Engineering");
        assert_eq!(kind.code(), Some("19110"));
    }

    #[test]
    fn blank_parent_is_rejected_by_validate() {
        let kind = OptionKind::SubCategory {
            value: "tap".into(),
            parent_category: "  ".into(),
        };
        assert!(matches!(
            kind.validate(),
            Err(MaintabitError::Validation { .. })
        ));
    }

    #[test]
    fn department_code_must_be_digits() {
        let kind = OptionKind::Department {
            value: "Civil Engineering".into(),
            code: Some("19a10".into()),
        };
        assert!(kind.validate().is_err());

        let kind = OptionKind::Department {
            value: "Civil Engineering".into(),
            code: None,
        };
        assert!(kind.validate().is_ok());
    }

    #[test]
    fn patch_rejects_code_on_category() {
        let mut kind = OptionKind::Category {
            value: "hostel".into(),
        };
        let patch = UpdateOption {
            code: Some(Some("123".into())),
            ..Default::default()
        };
        assert!(kind.apply(&patch).is_err());
    }

    #[test]
    fn patch_can_clear_department_code() {
        let mut kind = OptionKind::Department {
            value: "Civil Engineering".into(),
            code: Some("19110".into()),
        };
        let patch: UpdateOption = serde_json::from_str(r#"{"code":null}"#).unwrap();
        kind.apply(&patch).unwrap();
        assert_eq!(kind.code(), None);

        let untouched: UpdateOption = serde_json::from_str(r#"{"value":"Civil"}"#).unwrap();
        assert_eq!(untouched.code, None);
    }

    #[test]
    fn directory_option_flattens_kind() {
        let option = DirectoryOption {
            id: Uuid::new_v4(),
            kind: OptionKind::Department {
                value: "Computer Science".into(),
                code: Some("24510".into()),
            },
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["type"], "department");
        assert_eq!(json["code"], "24510");
        assert_eq!(json["isActive"], true);
    }
}
