use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonnelType {
    RdPersonnel,
    Support,
    Other,
}

impl PersonnelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RdPersonnel => "RD_PERSONNEL",
            Self::Support => "SUPPORT",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RD_PERSONNEL" => Some(Self::RdPersonnel),
            "SUPPORT" => Some(Self::Support),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    /// Whether the employee falls under the R&D personnel incentive scheme.
    pub fn is_incentive_eligible(&self) -> bool {
        matches!(self, Self::RdPersonnel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    None,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Bachelor => "BACHELOR",
            Self::Master => "MASTER",
            Self::Phd => "PHD",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(Self::None),
            "BACHELOR" => Some(Self::Bachelor),
            "MASTER" => Some(Self::Master),
            "PHD" => Some(Self::Phd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraduationField {
    BasicSciences,
    Other,
}

impl GraduationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicSciences => "BASIC_SCIENCES",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BASIC_SCIENCES" => Some(Self::BasicSciences),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Education/field combination used as the key of the income tax exemption
/// rate table.
///
/// Serialized through its string form so it can be used as a map key in any
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExemptionProfile {
    Phd,
    MasterBasicSciences,
    MasterOther,
    BachelorBasicSciences,
    BachelorOther,
}

impl ExemptionProfile {
    pub const ALL: [ExemptionProfile; 5] = [
        Self::Phd,
        Self::MasterBasicSciences,
        Self::MasterOther,
        Self::BachelorBasicSciences,
        Self::BachelorOther,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phd => "phd",
            Self::MasterBasicSciences => "master_basic_sciences",
            Self::MasterOther => "master_other",
            Self::BachelorBasicSciences => "bachelor_basic_sciences",
            Self::BachelorOther => "bachelor_other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|profile| profile.as_str() == s)
    }

    /// Selects the table key for an education level and field.
    ///
    /// A doctorate qualifies regardless of field. Employees without a degree
    /// have no profile and receive no exemption.
    pub fn classify(
        education_level: EducationLevel,
        graduation_field: GraduationField,
    ) -> Option<Self> {
        match (education_level, graduation_field) {
            (EducationLevel::Phd, _) => Some(Self::Phd),
            (EducationLevel::Master, GraduationField::BasicSciences) => {
                Some(Self::MasterBasicSciences)
            }
            (EducationLevel::Master, GraduationField::Other) => Some(Self::MasterOther),
            (EducationLevel::Bachelor, GraduationField::BasicSciences) => {
                Some(Self::BachelorBasicSciences)
            }
            (EducationLevel::Bachelor, GraduationField::Other) => Some(Self::BachelorOther),
            (EducationLevel::None, _) => None,
        }
    }
}

impl TryFrom<String> for ExemptionProfile {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown exemption profile '{value}'"))
    }
}

impl From<ExemptionProfile> for String {
    fn from(profile: ExemptionProfile) -> Self {
        profile.as_str().to_string()
    }
}

/// The per-employee record the payroll calculator works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub gross_salary: Decimal,
    pub personnel_type: PersonnelType,
    pub education_level: EducationLevel,
    pub graduation_field: GraduationField,
}
