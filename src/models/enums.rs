//! Closed string vocabularies used by member and filter documents.

use serde::{Deserialize, Serialize};

/// Review status of a directory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "declined")]
    Declined,
}

impl Status {
    pub const ALLOWED: &'static [&'static str] = &["approved", "pending", "in_progress", "declined"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Approved => "approved",
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Declined => "declined",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(Status::Approved),
            "pending" => Some(Status::Pending),
            "in_progress" => Some(Status::InProgress),
            "declined" => Some(Status::Declined),
            _ => None,
        }
    }
}

/// Company-size bucket on a member profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2 - 9")]
    TwoToNine,
    #[serde(rename = "10 - 19")]
    TenToNineteen,
    #[serde(rename = "20 - 49")]
    TwentyToFortyNine,
    #[serde(rename = "50 - 99")]
    FiftyToNinetyNine,
    #[serde(rename = "100 - 999")]
    OneHundredToNineNinetyNine,
    #[serde(rename = "1000 - 4999")]
    OneThousandToFourNineNineNine,
    #[serde(rename = "5000 - 10000")]
    FiveThousandToTenThousand,
    #[serde(rename = "More than 10000")]
    MoreThanTenThousand,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl CompanySize {
    pub const ALLOWED: &'static [&'static str] = &[
        "1",
        "2 - 9",
        "10 - 19",
        "20 - 49",
        "50 - 99",
        "100 - 999",
        "1000 - 4999",
        "5000 - 10000",
        "More than 10000",
        "N/A",
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1" => Some(CompanySize::One),
            "2 - 9" => Some(CompanySize::TwoToNine),
            "10 - 19" => Some(CompanySize::TenToNineteen),
            "20 - 49" => Some(CompanySize::TwentyToFortyNine),
            "50 - 99" => Some(CompanySize::FiftyToNinetyNine),
            "100 - 999" => Some(CompanySize::OneHundredToNineNinetyNine),
            "1000 - 4999" => Some(CompanySize::OneThousandToFourNineNineNine),
            "5000 - 10000" => Some(CompanySize::FiveThousandToTenThousand),
            "More than 10000" => Some(CompanySize::MoreThanTenThousand),
            "N/A" => Some(CompanySize::NotApplicable),
            _ => None,
        }
    }
}

/// Years-of-experience bucket on a member profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearsOfExperience {
    #[serde(rename = "Less than a year")]
    LessThanOne,
    #[serde(rename = "1 - 2 years")]
    OneToTwo,
    #[serde(rename = "3 - 4 years")]
    ThreeToFour,
    #[serde(rename = "5 - 9 years")]
    FiveToNine,
    #[serde(rename = "10 - 19 years")]
    TenToNineteen,
    #[serde(rename = "More than 20 years")]
    MoreThanTwenty,
}

impl YearsOfExperience {
    pub const ALLOWED: &'static [&'static str] = &[
        "Less than a year",
        "1 - 2 years",
        "3 - 4 years",
        "5 - 9 years",
        "10 - 19 years",
        "More than 20 years",
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Less than a year" => Some(YearsOfExperience::LessThanOne),
            "1 - 2 years" => Some(YearsOfExperience::OneToTwo),
            "3 - 4 years" => Some(YearsOfExperience::ThreeToFour),
            "5 - 9 years" => Some(YearsOfExperience::FiveToNine),
            "10 - 19 years" => Some(YearsOfExperience::TenToNineteen),
            "More than 20 years" => Some(YearsOfExperience::MoreThanTwenty),
            _ => None,
        }
    }
}
