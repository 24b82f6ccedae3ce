use serde::{Deserialize, Serialize};

/// Age band of an individual taxpayer, selecting which slab schedule
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    BelowSixty,
    Senior,
    SuperSenior,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 3] = [Self::BelowSixty, Self::Senior, Self::SuperSenior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowSixty => "below_60",
            Self::Senior => "senior",
            Self::SuperSenior => "super_senior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "below_60" => Some(Self::BelowSixty),
            "senior" => Some(Self::Senior),
            "super_senior" => Some(Self::SuperSenior),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowSixty => "Below 60 years",
            Self::Senior => "60-80 years (Senior Citizen)",
            Self::SuperSenior => "Above 80 years (Super Senior)",
        }
    }
}

/// Legal form of a business taxpayer. Businesses are taxed at a flat rate
/// rather than through slabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    DomesticCompany,
    ForeignCompany,
    Partnership,
    Llp,
    SoleProprietorship,
}

impl BusinessType {
    pub const ALL: [BusinessType; 5] = [
        Self::DomesticCompany,
        Self::ForeignCompany,
        Self::Partnership,
        Self::Llp,
        Self::SoleProprietorship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DomesticCompany => "company_domestic",
            Self::ForeignCompany => "company_foreign",
            Self::Partnership => "partnership",
            Self::Llp => "llp",
            Self::SoleProprietorship => "sole_proprietorship",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "company_domestic" => Some(Self::DomesticCompany),
            "company_foreign" => Some(Self::ForeignCompany),
            "partnership" => Some(Self::Partnership),
            "llp" => Some(Self::Llp),
            "sole_proprietorship" => Some(Self::SoleProprietorship),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DomesticCompany => "Domestic Company",
            Self::ForeignCompany => "Foreign Company",
            Self::Partnership => "Partnership Firm",
            Self::Llp => "LLP",
            Self::SoleProprietorship => "Sole Proprietorship",
        }
    }
}
