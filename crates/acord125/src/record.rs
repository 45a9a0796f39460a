//! Synthetic application records and the field assignments derived from
//! them.

use std::collections::HashSet;

use acroform_core::InputValue;
use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::schema::{Industry, LOSS_ROWS, LOSS_TOTAL, LegalEntity, LineOfBusiness, NO_PRIOR_LOSSES};

/// One line-of-business choice. `premium` is set only when selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    pub line: &'static LineOfBusiness,
    pub premium: Option<u32>,
}

impl LineSelection {
    pub fn selected(&self) -> bool {
        self.premium.is_some()
    }
}

/// One prior loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossEntry {
    pub occurrence: NaiveDate,
    pub line_of_business: &'static str,
    pub description: &'static str,
    pub claim: NaiveDate,
    pub paid: u32,
    pub reserved: u32,
    pub subrogation: bool,
    pub open: bool,
}

/// A complete synthetic application. Built once per sample and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRecord {
    /// Plain field name → value map, in write order.
    pub fields: IndexMap<String, InputValue>,
    pub industry: &'static Industry,
    pub entity: LegalEntity,
    pub lines: Vec<LineSelection>,
    pub losses: Vec<LossEntry>,
}

/// The ordered assignments a record turns into, plus the names that must be
/// written with checkbox semantics regardless of their declared type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillPlan {
    pub values: IndexMap<String, InputValue>,
    pub checkboxes: HashSet<String>,
}

impl FillPlan {
    fn text(&mut self, name: &str, value: impl Into<InputValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    fn checkbox(&mut self, name: &str, value: impl Into<InputValue>) {
        self.values.insert(name.to_string(), value.into());
        self.checkboxes.insert(name.to_string());
    }
}

impl ApplicationRecord {
    /// Sum of the paid amounts of the losses that fit on the form.
    pub fn total_paid(&self) -> u64 {
        self.losses
            .iter()
            .take(LOSS_ROWS.len())
            .map(|loss| u64::from(loss.paid))
            .sum()
    }

    /// Expand the record into field assignments.
    ///
    /// Order: the plain field map, the legal-entity group (exactly one
    /// checked), each line of business with its premium, then either the
    /// loss rows or the no-prior-losses indicator, then the loss total
    /// (cleared when it is zero).
    pub fn fill_plan(&self) -> FillPlan {
        let mut plan = FillPlan {
            values: self.fields.clone(),
            checkboxes: HashSet::new(),
        };

        for entity in LegalEntity::ALL {
            plan.checkbox(entity.field_name(), entity == self.entity);
        }

        for selection in &self.lines {
            plan.checkbox(selection.line.checkbox, selection.selected());
            plan.text(
                selection.line.premium,
                selection.premium.map(|p| format_currency(u64::from(p))),
            );
        }

        if self.losses.is_empty() {
            plan.checkbox(NO_PRIOR_LOSSES, true);
        }
        for (row, loss) in LOSS_ROWS.iter().zip(&self.losses) {
            plan.text(row.occurrence_date, format_date(loss.occurrence));
            plan.text(row.line_of_business, loss.line_of_business);
            plan.text(row.description, loss.description);
            plan.text(row.claim_date, format_date(loss.claim));
            plan.text(row.paid, format_currency(u64::from(loss.paid)));
            plan.text(row.reserved, format_currency(u64::from(loss.reserved)));
            plan.checkbox(row.subrogation, yes_no(loss.subrogation));
            plan.checkbox(row.open, yes_no(loss.open));
        }
        // A zero total clears whatever the template holds.
        let total = self.total_paid();
        plan.text(LOSS_TOTAL, (total > 0).then(|| format_currency(total)));
        plan
    }
}

/// `$` followed by the amount with comma thousands separators.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `MM/DD/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Y" } else { "N" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LINES_OF_BUSINESS, industry_for};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loss(paid: u32) -> LossEntry {
        LossEntry {
            occurrence: date(2022, 3, 14),
            line_of_business: "Property",
            description: "Small theft incident",
            claim: date(2022, 4, 2),
            paid,
            reserved: 0,
            subrogation: true,
            open: false,
        }
    }

    fn record(losses: Vec<LossEntry>) -> ApplicationRecord {
        ApplicationRecord {
            fields: IndexMap::new(),
            industry: industry_for(0),
            entity: LegalEntity::Trust,
            lines: vec![
                LineSelection {
                    line: &LINES_OF_BUSINESS[0],
                    premium: Some(2500),
                },
                LineSelection {
                    line: &LINES_OF_BUSINESS[1],
                    premium: None,
                },
            ],
            losses,
        }
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1000), "$1,000");
        assert_eq!(format_currency(3500), "$3,500");
        assert_eq!(format_currency(8_000_000), "$8,000,000");
    }

    #[test]
    fn date_is_month_day_year() {
        assert_eq!(format_date(date(2025, 2, 3)), "02/03/2025");
    }

    #[test]
    fn exactly_one_entity_checked() {
        let plan = record(vec![]).fill_plan();
        let checked: Vec<&LegalEntity> = LegalEntity::ALL
            .iter()
            .filter(|e| plan.values[e.field_name()] == InputValue::Bool(true))
            .collect();
        assert_eq!(checked, vec![&LegalEntity::Trust]);
        for entity in LegalEntity::ALL {
            assert!(plan.checkboxes.contains(entity.field_name()));
        }
    }

    #[test]
    fn no_losses_sets_indicator_and_no_rows() {
        let plan = record(vec![]).fill_plan();
        assert_eq!(plan.values[NO_PRIOR_LOSSES], InputValue::Bool(true));
        assert!(plan.checkboxes.contains(NO_PRIOR_LOSSES));
        for row in &LOSS_ROWS {
            assert!(!plan.values.contains_key(row.paid));
            assert!(!plan.values.contains_key(row.occurrence_date));
        }
        assert_eq!(plan.values[LOSS_TOTAL], InputValue::Absent);
    }

    #[test]
    fn losses_fill_rows_and_total() {
        let plan = record(vec![loss(1000), loss(2500)]).fill_plan();
        assert!(!plan.values.contains_key(NO_PRIOR_LOSSES));
        assert_eq!(plan.values[LOSS_ROWS[0].paid], InputValue::from("$1,000"));
        assert_eq!(plan.values[LOSS_ROWS[1].paid], InputValue::from("$2,500"));
        assert_eq!(plan.values[LOSS_ROWS[0].occurrence_date], InputValue::from("03/14/2022"));
        assert_eq!(plan.values[LOSS_TOTAL], InputValue::from("$3,500"));
        assert!(!plan.values.contains_key(LOSS_ROWS[2].paid));
    }

    #[test]
    fn loss_flags_are_forced_checkboxes() {
        let plan = record(vec![loss(1000)]).fill_plan();
        assert_eq!(plan.values[LOSS_ROWS[0].subrogation], InputValue::from("Y"));
        assert_eq!(plan.values[LOSS_ROWS[0].open], InputValue::from("N"));
        assert!(plan.checkboxes.contains(LOSS_ROWS[0].subrogation));
        assert!(plan.checkboxes.contains(LOSS_ROWS[0].open));
        assert!(!plan.checkboxes.contains(LOSS_ROWS[0].paid));
    }

    #[test]
    fn total_counts_only_first_three_losses() {
        let r = record(vec![loss(1000), loss(1000), loss(1000), loss(5000)]);
        assert_eq!(r.total_paid(), 3000);
        assert_eq!(r.fill_plan().values[LOSS_TOTAL], InputValue::from("$3,000"));
    }

    #[test]
    fn zero_total_clears_the_field() {
        let plan = record(vec![loss(0)]).fill_plan();
        assert_eq!(plan.values[LOSS_TOTAL], InputValue::Absent);
        assert!(!plan.checkboxes.contains(LOSS_TOTAL));
    }

    #[test]
    fn unselected_line_clears_premium() {
        let plan = record(vec![]).fill_plan();
        assert_eq!(plan.values[LINES_OF_BUSINESS[0].checkbox], InputValue::Bool(true));
        assert_eq!(plan.values[LINES_OF_BUSINESS[0].premium], InputValue::from("$2,500"));
        assert_eq!(plan.values[LINES_OF_BUSINESS[1].checkbox], InputValue::Bool(false));
        assert_eq!(plan.values[LINES_OF_BUSINESS[1].premium], InputValue::Absent);
    }
}
