//! Fake applicant data.
//!
//! Every draw goes through the caller's [`Rng`], so a seeded generator
//! reproduces the same batch.

use chrono::{Datelike, Days, Months, NaiveDate};
use fake::Fake;
use fake::faker::address::en::{CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::{FirstName, LastName, Name};
use indexmap::IndexMap;
use rand::Rng;

use acroform_core::InputValue;

use crate::record::{ApplicationRecord, LineSelection, LossEntry, format_currency, format_date};
use crate::schema::{LINES_OF_BUSINESS, LegalEntity, industry_for};

/// Probability that a line of business is selected.
const LINE_SELECTED_P: f64 = 0.75;

/// Loss counts to draw from: 50 % none, 25 % one, 25 % two.
const LOSS_COUNTS: [usize; 4] = [0, 0, 1, 2];

const LOSS_LINES: [&str; 3] = ["Property", "General Liability", "Automobile"];

const LOSS_DESCRIPTIONS: [&str; 4] = [
    "Minor water damage at premises",
    "Slip-and-fall claim",
    "Small theft incident",
    "Low-speed vehicle collision",
];

const OPERATIONS: [&str; 4] = ["sales", "service", "installation", "consulting"];

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Dollar amount in `[lo, hi)`.
fn money<R: Rng + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> String {
    format_currency(u64::from(rng.gen_range(lo..hi)))
}

/// `(AAA) EEE-NNNN`.
fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "({}) {}-{}",
        rng.gen_range(201..=989),
        rng.gen_range(200..=999),
        rng.gen_range(1000..=9999)
    )
}

fn person<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

fn street<R: Rng + ?Sized>(rng: &mut R) -> String {
    let name: String = StreetName().fake_with_rng(rng);
    format!("{} {name}", rng.gen_range(100..=9899))
}

struct Address {
    street: String,
    city: String,
    state: String,
    zip: String,
}

fn address<R: Rng + ?Sized>(rng: &mut R) -> Address {
    Address {
        street: street(rng),
        city: CityName().fake_with_rng(rng),
        state: StateAbbr().fake_with_rng(rng),
        zip: ZipCode().fake_with_rng(rng),
    }
}

fn county<R: Rng + ?Sized>(rng: &mut R) -> String {
    let stem: String = LastName().fake_with_rng(rng);
    format!("{stem} County")
}

/// `https://` + the lowercase alphanumerics of the name + `.com`.
pub fn company_website(name: &str) -> String {
    format!("https://{}.com", domain_stem(name))
}

fn domain_stem(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Up to three uppercase initials of the words in `name`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .take(3)
        .collect()
}

/// One year later; Feb 29 becomes Feb 28.
pub fn plus_year(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(12)).unwrap_or(date)
}

/// One year earlier; Feb 29 becomes Feb 28.
pub fn minus_year(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(12)).unwrap_or(date)
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

fn synthesize_loss<R: Rng + ?Sized>(rng: &mut R, effective: NaiveDate) -> LossEntry {
    let occurrence = days_before(effective, rng.gen_range(400..=1800));
    let claim = days_after(occurrence, rng.gen_range(5..=60));
    LossEntry {
        occurrence,
        line_of_business: *pick(rng, &LOSS_LINES),
        description: *pick(rng, &LOSS_DESCRIPTIONS),
        claim,
        paid: rng.gen_range(1000..=15000),
        reserved: rng.gen_range(0..=7000),
        subrogation: rng.gen_bool(0.5),
        open: rng.gen_bool(0.5),
    }
}

/// Build the record for 0-based sample `index` with the given effective
/// date.
pub fn synthesize<R: Rng + ?Sized>(
    index: usize,
    effective: NaiveDate,
    rng: &mut R,
) -> ApplicationRecord {
    let industry = industry_for(index);
    let expiration = plus_year(effective);
    let prior_effective = minus_year(effective);
    let eff = format_date(effective);

    let insured = company(rng);
    let premises = address(rng);
    let producer_address = address(rng);
    let producer_agency = format!("{} Insurance Agency", company(rng));
    let contact_first: String = FirstName().fake_with_rng(rng);
    let contact_last: String = LastName().fake_with_rng(rng);

    let entity = *pick(rng, &LegalEntity::ALL);
    let losses = (0..*pick(rng, &LOSS_COUNTS))
        .map(|_| synthesize_loss(rng, effective))
        .collect();

    let mut f: IndexMap<String, InputValue> = IndexMap::new();
    let mut set = |name: &str, value: InputValue| {
        f.insert(format!("F[0].{name}"), value);
    };
    let text = |s: String| InputValue::Text(s);

    // Page 1: producer, insurer, policy, named insured.
    set("P1[0].Form_CompletionDate_A[0]", text(eff.clone()));
    set("P1[0].Producer_FullName_A[0]", text(producer_agency.clone()));
    set("P1[0].Producer_MailingAddress_LineOne_A[0]", text(producer_address.street.clone()));
    set("P1[0].Producer_MailingAddress_LineTwo_A[0]", InputValue::from(""));
    set("P1[0].Producer_MailingAddress_CityName_A[0]", text(producer_address.city.clone()));
    set("P1[0].Producer_MailingAddress_StateOrProvinceCode_A[0]", text(producer_address.state.clone()));
    set("P1[0].Producer_MailingAddress_PostalCode_A[0]", text(producer_address.zip.clone()));
    set("P1[0].Producer_ContactPerson_FullName_A[0]", text(format!("{contact_first} {contact_last}")));
    set("P1[0].Producer_ContactPerson_PhoneNumber_A[0]", text(phone(rng)));
    set("P1[0].Producer_FaxNumber_A[0]", text(phone(rng)));
    set(
        "P1[0].Producer_ContactPerson_EmailAddress_A[0]",
        text(format!(
            "{}.{}@{}.com",
            domain_stem(&contact_first),
            domain_stem(&contact_last),
            domain_stem(&producer_agency)
        )),
    );
    set("P1[0].Insurer_ProducerIdentifier_A[0]", text(rng.gen_range(100000..=999999).to_string()));
    set("P1[0].Insurer_SubProducerIdentifier_A[0]", text(rng.gen_range(1000..=9999).to_string()));
    set("P1[0].Producer_CustomerIdentifier_A[0]", text(rng.gen_range(10_000..=999_999).to_string()));
    set("P1[0].Insurer_FullName_A[0]", text(company(rng)));
    set("P1[0].Insurer_NAICCode_A[0]", text(rng.gen_range(10000..=99999).to_string()));
    set("P1[0].Insurer_ProductDescription_A[0]", InputValue::from("Commercial Package"));
    set("P1[0].Insurer_ProductCode_A[0]", InputValue::from("CPP"));
    set(
        "P1[0].Policy_PolicyNumberIdentifier_A[0]",
        text(format!("NEW-{}", rng.gen_range(1_000_000..=9_999_999))),
    );
    set("P1[0].Policy_Status_QuoteIndicator_A[0]", InputValue::Bool(true));
    set("P1[0].Policy_Status_IssueIndicator_A[0]", InputValue::Bool(false));
    set("P1[0].Policy_Status_RenewIndicator_A[0]", InputValue::Bool(false));
    set("P1[0].Policy_Status_BoundIndicator_A[0]", InputValue::Bool(false));
    set("P1[0].Policy_Status_ChangeIndicator_A[0]", InputValue::Bool(false));
    set("P1[0].Policy_Status_CancelIndicator_A[0]", InputValue::Bool(false));
    set("P1[0].Policy_Status_EffectiveDate_A[0]", text(eff.clone()));
    set("P1[0].Policy_Status_EffectiveTime_A[0]", InputValue::from("12:01"));
    set("P1[0].Policy_Status_EffectiveTimeAMIndicator_A[0]", InputValue::Bool(false));
    set("P1[0].Policy_Status_EffectiveTimePMIndicator_A[0]", InputValue::Bool(true));
    set("P1[0].Policy_EffectiveDate_A[0]", text(eff.clone()));
    set("P1[0].Policy_ExpirationDate_A[0]", text(format_date(expiration)));
    set("P1[0].Policy_Payment_DirectBillIndicator_A[0]", InputValue::Bool(true));
    set("P1[0].Policy_Payment_ProducerBillIndicator_A[0]", InputValue::Bool(false));
    set("P1[0].Policy_Payment_PaymentScheduleCode_A[0]", InputValue::from(*pick(rng, &["AN", "QT", "MO"])));
    set(
        "P1[0].Policy_PaymentMethod_MethodDescription_A[0]",
        InputValue::from(*pick(rng, &["ACH", "Check", "Credit Card"])),
    );
    set("P1[0].Policy_Audit_FrequencyCode_A[0]", InputValue::from(*pick(rng, &["AN", "QT", "SEMI", "MO"])));
    set("P1[0].Policy_Payment_DepositAmount_A[0]", text(money(rng, 500, 2500)));
    set("P1[0].Policy_Payment_MinimumPremiumAmount_A[0]", text(money(rng, 500, 1500)));
    set("P1[0].Policy_Payment_EstimatedTotalAmount_A[0]", text(money(rng, 3000, 19000)));

    set("P1[0].NamedInsured_FullName_A[0]", text(insured.clone()));
    set("P1[0].NamedInsured_MailingAddress_LineOne_A[0]", text(premises.street.clone()));
    set("P1[0].NamedInsured_MailingAddress_LineTwo_A[0]", InputValue::from(""));
    set("P1[0].NamedInsured_MailingAddress_CityName_A[0]", text(premises.city.clone()));
    set("P1[0].NamedInsured_MailingAddress_StateOrProvinceCode_A[0]", text(premises.state.clone()));
    set("P1[0].NamedInsured_MailingAddress_PostalCode_A[0]", text(premises.zip.clone()));
    set("P1[0].NamedInsured_GeneralLiabilityCode_A[0]", text(rng.gen_range(10000..=99999).to_string()));
    set("P1[0].NamedInsured_SICCode_A[0]", text(rng.gen_range(1000..=9999).to_string()));
    set("P1[0].NamedInsured_NAICSCode_A[0]", InputValue::from(industry.naics));
    set(
        "P1[0].NamedInsured_TaxIdentifier_A[0]",
        text(format!("{}-{}", rng.gen_range(10..=99), rng.gen_range(1_000_000..=9_999_999))),
    );
    set("P1[0].NamedInsured_Primary_PhoneNumber_A[0]", text(phone(rng)));
    set("P1[0].NamedInsured_Primary_WebsiteAddress_A[0]", text(company_website(&insured)));
    set("P1[0].NamedInsured_LegalEntity_MemberManagerCount_A[0]", text(rng.gen_range(1..=5).to_string()));
    set("P1[0].NamedInsured_LegalEntity_OtherDescription_A[0]", InputValue::from(""));

    // Page 2: premises and business information.
    set("P2[0].CommercialStructure_PhysicalAddress_LineOne_A[0]", text(premises.street.clone()));
    set("P2[0].CommercialStructure_PhysicalAddress_LineTwo_A[0]", InputValue::from(""));
    set("P2[0].CommercialStructure_PhysicalAddress_CityName_A[0]", text(premises.city.clone()));
    set(
        "P2[0].CommercialStructure_PhysicalAddress_CountyName_A[0]",
        text(county(rng)),
    );
    set("P2[0].CommercialStructure_PhysicalAddress_StateOrProvinceCode_A[0]", text(premises.state.clone()));
    set("P2[0].CommercialStructure_PhysicalAddress_PostalCode_A[0]", text(premises.zip.clone()));
    set("P2[0].CommercialStructure_RiskLocation_InsideCityLimitsIndicator_A[0]", InputValue::Bool(true));
    set("P2[0].CommercialStructure_RiskLocation_OutsideCityLimitsIndicator_A[0]", InputValue::Bool(false));
    set("P2[0].CommercialStructure_RiskLocation_OtherIndicator_A[0]", InputValue::Bool(false));
    set("P2[0].CommercialStructure_RiskLocation_OtherDescription_A[0]", InputValue::from(""));
    set("P2[0].CommercialStructure_InsuredInterest_OwnerIndicator_A[0]", InputValue::Bool(rng.gen_bool(0.5)));
    set("P2[0].CommercialStructure_InsuredInterest_TenantIndicator_A[0]", InputValue::Bool(rng.gen_bool(0.5)));
    set("P2[0].CommercialStructure_InsuredInterest_OtherIndicator_A[0]", InputValue::Bool(false));
    set("P2[0].CommercialStructure_InsuredInterest_OtherDescription_A[0]", InputValue::from(""));
    set("P2[0].BusinessInformation_FullTimeEmployeeCount_A[0]", text(rng.gen_range(3..=120).to_string()));
    set("P2[0].BusinessInformation_PartTimeEmployeeCount_A[0]", text(rng.gen_range(0..=50).to_string()));
    set("P2[0].CommercialStructure_AnnualRevenueAmount_A[0]", text(money(rng, 250_000, 8_000_000)));
    set("P2[0].BuildingOccupancy_OccupiedArea_A[0]", text(rng.gen_range(1500..=25000).to_string()));
    set("P2[0].BuildingOccupancy_OpenToPublicArea_A[0]", text(rng.gen_range(0..=8000).to_string()));
    set("P2[0].Construction_BuildingArea_A[0]", text(rng.gen_range(2000..=35000).to_string()));
    set(
        "P2[0].BuildingOccupancy_OperationsDescription_A[0]",
        text(format!("{} - typical operations, no unusual hazards.", industry.name)),
    );
    set(
        "P2[0].NamedInsured_BusinessStartDate_A[0]",
        text(format_date(days_before(effective, rng.gen_range(365..=365 * 15)))),
    );
    set(
        "P2[0].CommercialPolicy_OperationsDescription_A[0]",
        text(format!(
            "{}: primary operations include {}. Safety program in place.",
            industry.name,
            pick(rng, &OPERATIONS)
        )),
    );

    // Page 3: safety program, remarks, prior coverage.
    set("P3[0].CommercialPolicy_FormalSafetyProgram_SafetyManualIndicator_A[0]", InputValue::Bool(rng.gen_bool(0.5)));
    set("P3[0].CommercialPolicy_FormalSafetyProgram_SafetyPositionIndicator_B[0]", InputValue::Bool(rng.gen_bool(0.5)));
    set("P3[0].CommercialPolicy_FormalSafetyProgram_MonthlyMeetingsIndicator_B[0]", InputValue::Bool(rng.gen_bool(0.5)));
    set("P3[0].CommercialPolicy_FormalSafetyProgram_OSHAIndicator_B[0]", InputValue::Bool(rng.gen_bool(0.5)));
    set("P3[0].CommercialPolicy_FormalSafetyProgram_OtherIndicator_B[0]", InputValue::Bool(false));
    set("P3[0].CommercialPolicy_FormalSafetyProgram_OtherDescription_B[0]", InputValue::from(""));
    set(
        "P3[0].CommercialPolicy_RemarkText_A[0]",
        InputValue::from("No unusual exposures reported. Prior carriers listed below."),
    );
    set("P3[0].PriorCoverage_PolicyYear_A[0]", text((effective.year() - 1).to_string()));
    set("P3[0].PriorCoverage_GeneralLiability_InsurerFullName_A[0]", text(company(rng)));
    set(
        "P3[0].PriorCoverage_GeneralLiability_PolicyNumberIdentifier_A[0]",
        text(format!("GL-{}", rng.gen_range(100000..=999999))),
    );
    set("P3[0].PriorCoverage_GeneralLiability_TotalPremiumAmount_A[0]", text(money(rng, 900, 5000)));
    set("P3[0].PriorCoverage_GeneralLiability_EffectiveDate_A[0]", text(format_date(prior_effective)));
    set("P3[0].PriorCoverage_GeneralLiability_ExpirationDate_A[0]", text(eff.clone()));
    set("P3[0].PriorCoverage_Property_InsurerFullName_A[0]", text(company(rng)));
    set(
        "P3[0].PriorCoverage_Property_PolicyNumberIdentifier_A[0]",
        text(format!("PR-{}", rng.gen_range(100000..=999999))),
    );
    set("P3[0].PriorCoverage_Property_TotalPremiumAmount_A[0]", text(money(rng, 1200, 7000)));
    set("P3[0].PriorCoverage_Property_EffectiveDate_A[0]", text(format_date(prior_effective)));
    set("P3[0].PriorCoverage_Property_ExpirationDate_A[0]", text(eff.clone()));

    // Page 4: loss-history header and signatures.
    set("P4[0].LossHistory_InformationYearCount_A[0]", InputValue::from("5"));
    set("P4[0].Producer_AuthorizedRepresentative_FullName_A[0]", text(person(rng)));
    set("P4[0].Producer_StateLicenseIdentifier_A[0]", text(rng.gen_range(1_000_000..=9_999_999).to_string()));
    set("P4[0].Producer_NationalIdentifier_A[0]", text(rng.gen_range(100_000_000..=999_999_999).to_string()));
    set("P4[0].NamedInsured_Signature_A[0]", text(format!("/s/ {}", person(rng))));
    set("P4[0].NamedInsured_SignatureDate_A[0]", text(eff.clone()));
    set("P4[0].NamedInsured_Initials_A[0]", text(initials(&insured)));

    let lines = LINES_OF_BUSINESS
        .iter()
        .map(|line| {
            let selected = rng.gen_bool(LINE_SELECTED_P);
            LineSelection {
                line,
                premium: selected
                    .then(|| rng.gen_range(line.premium_range.0..line.premium_range.1)),
            }
        })
        .collect();

    ApplicationRecord {
        fields: f,
        industry,
        entity,
        lines,
        losses,
    }
}
