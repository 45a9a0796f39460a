//! ACORD 125 field-name tables.
//!
//! Every field the filler touches outside the plain applicant data map is
//! named here, keyed by the role it plays.

/// Default template file name, looked up in the working directory.
pub const TEMPLATE: &str = "Acord-125-Commercial-Insurance-Application.pdf";

/// Default output directory.
pub const OUT_DIR: &str = "out";

/// Default number of generated samples.
pub const SAMPLE_COUNT: usize = 10;

/// Checkbox set when a record has no losses.
pub const NO_PRIOR_LOSSES: &str = "F[0].P4[0].LossHistory_NoPriorLossesIndicator_A[0]";

/// Total paid across the loss rows.
pub const LOSS_TOTAL: &str = "F[0].P4[0].LossHistory_TotalAmount_A[0]";

/// Legal form of the named insured. Exactly one is checked per application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalEntity {
    Corporation,
    Individual,
    JointVenture,
    LimitedLiabilityCompany,
    NotForProfit,
    Partnership,
    SubchapterSCorporation,
    Trust,
}

impl LegalEntity {
    /// All variants, in the order their checkboxes are written.
    pub const ALL: [LegalEntity; 8] = [
        LegalEntity::Corporation,
        LegalEntity::Individual,
        LegalEntity::JointVenture,
        LegalEntity::LimitedLiabilityCompany,
        LegalEntity::NotForProfit,
        LegalEntity::Partnership,
        LegalEntity::SubchapterSCorporation,
        LegalEntity::Trust,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Corporation => "F[0].P1[0].NamedInsured_LegalEntity_CorporationIndicator_A[0]",
            Self::Individual => "F[0].P1[0].NamedInsured_LegalEntity_IndividualIndicator_A[0]",
            Self::JointVenture => "F[0].P1[0].NamedInsured_LegalEntity_JointVentureIndicator_A[0]",
            Self::LimitedLiabilityCompany => {
                "F[0].P1[0].NamedInsured_LegalEntity_LimitedLiabilityCorporationIndicator_A[0]"
            }
            Self::NotForProfit => "F[0].P1[0].NamedInsured_LegalEntity_NotForProfitIndicator_A[0]",
            Self::Partnership => "F[0].P1[0].NamedInsured_LegalEntity_PartnershipIndicator_A[0]",
            Self::SubchapterSCorporation => {
                "F[0].P1[0].NamedInsured_LegalEntity_SubchapterSCorporationIndicator_A[0]"
            }
            Self::Trust => "F[0].P1[0].NamedInsured_LegalEntity_TrustIndicator_A[0]",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Corporation => "Corporation",
            Self::Individual => "Individual",
            Self::JointVenture => "Joint Venture",
            Self::LimitedLiabilityCompany => "LLC",
            Self::NotForProfit => "Not For Profit",
            Self::Partnership => "Partnership",
            Self::SubchapterSCorporation => "Subchapter S Corporation",
            Self::Trust => "Trust",
        }
    }
}

/// A line of business: its selection checkbox, its premium text field and
/// the premium range drawn when selected (lower bound inclusive, upper
/// exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOfBusiness {
    pub label: &'static str,
    pub checkbox: &'static str,
    pub premium: &'static str,
    pub premium_range: (u32, u32),
}

pub static LINES_OF_BUSINESS: [LineOfBusiness; 6] = [
    LineOfBusiness {
        label: "Commercial General Liability",
        checkbox: "F[0].P1[0].Policy_LineOfBusiness_CommercialGeneralLiability_A[0]",
        premium: "F[0].P1[0].GeneralLiabilityLineOfBusiness_TotalPremiumAmount_A[0]",
        premium_range: (1000, 6000),
    },
    LineOfBusiness {
        label: "Commercial Property",
        checkbox: "F[0].P1[0].Policy_LineOfBusiness_CommercialProperty_A[0]",
        premium: "F[0].P1[0].CommercialPropertyLineOfBusiness_PremiumAmount_A[0]",
        premium_range: (1500, 8000),
    },
    LineOfBusiness {
        label: "Commercial Inland Marine",
        checkbox: "F[0].P1[0].Policy_LineOfBusiness_CommercialInlandMarineIndicator_A[0]",
        premium: "F[0].P1[0].CommercialInlandMarineLineOfBusiness_PremiumAmount_A[0]",
        premium_range: (500, 4000),
    },
    LineOfBusiness {
        label: "Crime",
        checkbox: "F[0].P1[0].Policy_LineOfBusiness_CrimeIndicator_A[0]",
        premium: "F[0].P1[0].CrimeLineOfBusiness_PremiumAmount_A[0]",
        premium_range: (300, 2000),
    },
    LineOfBusiness {
        label: "Umbrella",
        checkbox: "F[0].P1[0].Policy_LineOfBusiness_UmbrellaIndicator_A[0]",
        premium: "F[0].P1[0].CommercialUmbrellaLineOfBusiness_PremiumAmount_A[0]",
        premium_range: (800, 4000),
    },
    LineOfBusiness {
        label: "Cyber and Privacy",
        checkbox: "F[0].P1[0].Policy_LineOfBusiness_CyberAndPrivacy_A[0]",
        premium: "F[0].P1[0].CyberAndPrivacyLineOfBusiness_PremiumAmount_A[0]",
        premium_range: (600, 3500),
    },
];

/// Field names of one loss-history row on page 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LossRowFields {
    pub occurrence_date: &'static str,
    pub line_of_business: &'static str,
    pub description: &'static str,
    pub claim_date: &'static str,
    pub paid: &'static str,
    pub reserved: &'static str,
    pub subrogation: &'static str,
    pub open: &'static str,
}

macro_rules! loss_row {
    ($row:literal) => {
        LossRowFields {
            occurrence_date: concat!("F[0].P4[0].LossHistory_OccurrenceDate_", $row, "[0]"),
            line_of_business: concat!("F[0].P4[0].LossHistory_LineOfBusiness_", $row, "[0]"),
            description: concat!("F[0].P4[0].LossHistory_OccurrenceDescription_", $row, "[0]"),
            claim_date: concat!("F[0].P4[0].LossHistory_ClaimDate_", $row, "[0]"),
            paid: concat!("F[0].P4[0].LossHistory_PaidAmount_", $row, "[0]"),
            reserved: concat!("F[0].P4[0].LossHistory_ReservedAmount_", $row, "[0]"),
            subrogation: concat!("F[0].P4[0].LossHistory_ClaimStatus_SubrogationCode_", $row, "[0]"),
            open: concat!("F[0].P4[0].LossHistory_ClaimStatus_OpenCode_", $row, "[0]"),
        }
    };
}

/// Loss rows A, B and C. Losses beyond the third are not written.
pub static LOSS_ROWS: [LossRowFields; 3] = [loss_row!("A"), loss_row!("B"), loss_row!("C")];

/// Industry/class of business with its NAICS code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Industry {
    pub name: &'static str,
    pub naics: &'static str,
}

/// Industries cycled through by sample index.
pub static INDUSTRIES: [Industry; 10] = [
    Industry { name: "Construction Contractor", naics: "236115" },
    Industry { name: "Restaurant", naics: "722511" },
    Industry { name: "Retail Clothing Store", naics: "448140" },
    Industry { name: "Medical Office", naics: "621111" },
    Industry { name: "IT Consulting Firm", naics: "541512" },
    Industry { name: "Real Estate Agency", naics: "531210" },
    Industry { name: "Trucking & Logistics", naics: "484110" },
    Industry { name: "Manufacturing", naics: "333120" },
    Industry { name: "Landscaping Services", naics: "561730" },
    Industry { name: "Non-Profit Organization", naics: "813110" },
];

/// Industry for a 0-based sample index.
pub fn industry_for(index: usize) -> &'static Industry {
    &INDUSTRIES[index % INDUSTRIES.len()]
}
