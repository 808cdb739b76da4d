//! Static field schema for the prediction form

/// Inclusive bounds for scored fields
pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;

/// How a field's value is edited and validated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Any number, no range check
    NumericFree,
    /// A number that must fall within `[min, max]`
    NumericBounded { min: f64, max: f64 },
    /// One of a fixed list of options
    Enum(&'static [&'static str]),
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::NumericFree | Self::NumericBounded { .. })
    }

    /// Allowed options for enum fields (empty for numeric fields)
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Enum(options) => options,
            _ => &[],
        }
    }
}

/// Describes a single field of the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// State key and wire key
    pub key: &'static str,
    pub kind: FieldKind,
    /// Value the field starts the session with
    pub default: &'static str,
}

impl FieldDescriptor {
    /// Key with its first underscore replaced by a space (`diet_score` -> `diet score`)
    pub fn human_name(&self) -> String {
        self.key.replacen('_', " ", 1)
    }

    /// Upper-cased human name, used as the field's title
    pub fn label(&self) -> String {
        self.human_name().to_uppercase()
    }
}

const YES_NO: &[&str] = &["Yes", "No"];
const SMOKING: &[&str] = &["Smoker", "Non-Smoker"];
const ALCOHOL: &[&str] = &["Drinker", "Non-Drinker"];
const MRI: &[&str] = &["Normal", "Abnormal"];

const SCORE: FieldKind = FieldKind::NumericBounded {
    min: SCORE_MIN,
    max: SCORE_MAX,
};

/// Every field in display and wire order
pub const FIELD_SCHEMA: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "age",
        kind: FieldKind::NumericFree,
        default: "",
    },
    FieldDescriptor {
        key: "family_history",
        kind: FieldKind::Enum(YES_NO),
        default: "No",
    },
    FieldDescriptor {
        key: "smoking",
        kind: FieldKind::Enum(SMOKING),
        default: "Non-Smoker",
    },
    FieldDescriptor {
        key: "alcohol",
        kind: FieldKind::Enum(ALCOHOL),
        default: "Non-Drinker",
    },
    FieldDescriptor {
        key: "diet_score",
        kind: SCORE,
        default: "",
    },
    FieldDescriptor {
        key: "physical_activity",
        kind: SCORE,
        default: "",
    },
    FieldDescriptor {
        key: "symptom_score",
        kind: SCORE,
        default: "",
    },
    FieldDescriptor {
        key: "mri_abnormality",
        kind: FieldKind::Enum(MRI),
        default: "Normal",
    },
];

/// Look up a field descriptor by key
#[cfg(test)]
pub fn descriptor(key: &str) -> Option<&'static FieldDescriptor> {
    FIELD_SCHEMA.iter().find(|d| d.key == key)
}
