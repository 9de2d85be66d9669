//! Shared fixtures for calculation tests.
//!
//! The rate figures mirror `config/default/rates/` so unit and integration
//! tests agree on expected premiums.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::RateTable;
use crate::models::{
    Allowance, AllowanceType, Company, Employee, RateBracket, RatePayload, Region, ValidityWindow,
};
use crate::store::Directory;

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const FY2024: ValidityWindow = ValidityWindow {
    from_year: 2024,
    from_month: 3,
    to_year: 2025,
    to_month: 2,
};

const FY2025: ValidityWindow = ValidityWindow {
    from_year: 2025,
    from_month: 3,
    to_year: 2026,
    to_month: 2,
};

// grade, standard amount, min, max, then (total, half) without and with care.
type HealthRow = (&'static str, &'static str, &'static str, Option<&'static str>, [&'static str; 4]);

const HEALTH_FY2024: [HealthRow; 6] = [
    ("1", "58000", "0", Some("62999"), ["5788.4", "2894.2", "6716.4", "3358.2"]),
    ("2", "68000", "63000", Some("72999"), ["6786.4", "3393.2", "7874.4", "3937.2"]),
    ("3", "78000", "73000", Some("82999"), ["7784.4", "3892.2", "9032.4", "4516.2"]),
    ("17", "200000", "83000", Some("209999"), ["19960", "9980", "23160", "11580"]),
    ("22", "300000", "210000", Some("309999"), ["29940", "14970", "34740", "17370"]),
    ("50", "1390000", "310000", None, ["138722", "69361", "160962", "80481"]),
];

const HEALTH_FY2025: [HealthRow; 6] = [
    ("1", "58000", "0", Some("62999"), ["5747.8", "2873.9", "6670", "3335"]),
    ("2", "68000", "63000", Some("72999"), ["6738.8", "3369.4", "7820", "3910"]),
    ("3", "78000", "73000", Some("82999"), ["7729.8", "3864.9", "8970", "4485"]),
    ("17", "200000", "83000", Some("209999"), ["19820", "9910", "23000", "11500"]),
    ("22", "300000", "210000", Some("309999"), ["29730", "14865", "34500", "17250"]),
    ("50", "1390000", "310000", None, ["137749", "68874.5", "159850", "79925"]),
];

const PENSION: [(&str, &str, &str, Option<&str>, &str, &str); 4] = [
    ("1", "88000", "0", Some("92999"), "16104", "8052"),
    ("8", "200000", "93000", Some("209999"), "36600", "18300"),
    ("17", "300000", "210000", Some("309999"), "54900", "27450"),
    ("32", "650000", "310000", None, "118950", "59475"),
];

fn health_brackets(window: ValidityWindow, rows: &[HealthRow]) -> Vec<RateBracket> {
    rows.iter()
        .map(|(grade, standard, min, max, [tn, hn, tc, hc])| RateBracket {
            region_id: "tokyo".to_string(),
            grade: grade.to_string(),
            standard_monthly_amount: dec(standard),
            min_amount: dec(min),
            max_amount: max.map(dec),
            window,
            payload: RatePayload::Health {
                total_no_care: dec(tn),
                half_no_care: dec(hn),
                total_with_care: dec(tc),
                half_with_care: dec(hc),
            },
        })
        .collect()
}

fn pension_brackets(window: ValidityWindow) -> Vec<RateBracket> {
    PENSION
        .iter()
        .map(|(grade, standard, min, max, total, half)| RateBracket {
            region_id: "tokyo".to_string(),
            grade: grade.to_string(),
            standard_monthly_amount: dec(standard),
            min_amount: dec(min),
            max_amount: max.map(dec),
            window,
            payload: RatePayload::Pension {
                total: dec(total),
                half: dec(half),
            },
        })
        .collect()
}

/// Tokyo health and pension brackets for fiscal years 2024 and 2025.
/// Osaka deliberately has none.
pub(crate) fn create_test_rates() -> RateTable {
    let mut brackets = health_brackets(FY2024, &HEALTH_FY2024);
    brackets.extend(health_brackets(FY2025, &HEALTH_FY2025));
    brackets.extend(pension_brackets(FY2024));
    brackets.extend(pension_brackets(FY2025));
    RateTable::new(brackets)
}

fn employee(id: &str, company_id: &str, name: &str, born: (i32, u32, u32)) -> Employee {
    Employee {
        id: id.to_string(),
        company_id: company_id.to_string(),
        name: name.to_string(),
        monthly_salary: dec("300000"),
        date_of_birth: NaiveDate::from_ymd_opt(born.0, born.1, born.2).unwrap(),
    }
}

fn allowance_type(id: &str, name: &str, tag: &str, rate: &str) -> AllowanceType {
    AllowanceType {
        id: id.to_string(),
        company_id: "comp_001".to_string(),
        name: name.to_string(),
        type_tag: tag.to_string(),
        description: String::new(),
        commission_rate: dec(rate),
    }
}

fn allowance(
    id: &str,
    employee_id: &str,
    type_id: &str,
    amount: &str,
    rate: Option<&str>,
) -> Allowance {
    Allowance {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        allowance_type_id: type_id.to_string(),
        amount: dec(amount),
        commission_rate: rate.map(dec),
        year: 2025,
        month: 4,
    }
}

pub(crate) fn create_test_directory() -> Directory {
    let mut directory = Directory::new();

    for (id, name) in [("tokyo", "Tokyo"), ("osaka", "Osaka")] {
        directory.insert_region(Region {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    for (id, name, region) in [
        ("comp_001", "Acme KK", Some("tokyo")),
        ("comp_002", "Nowhere GK", None),
        ("comp_003", "Naniwa KK", Some("osaka")),
    ] {
        directory.insert_company(Company {
            id: id.to_string(),
            name: name.to_string(),
            region_id: region.map(str::to_string),
        });
    }

    directory.insert_employee(employee("emp_young", "comp_001", "Sato Hanako", (1990, 1, 10)));
    directory.insert_employee(employee("emp_forty", "comp_001", "Suzuki Ichiro", (1985, 5, 1)));
    directory.insert_employee(employee("emp_senior", "comp_001", "Tanaka Jiro", (1960, 6, 1)));
    directory.insert_employee(employee("emp_nowhere", "comp_002", "Ito Yuki", (1990, 1, 10)));
    directory.insert_employee(employee("emp_osaka", "comp_003", "Yamada Ken", (1990, 1, 10)));

    directory.insert_allowance_type(allowance_type("at_commute", "Commute", "fixed", "0"));
    directory.insert_allowance_type(allowance_type("at_sales", "Sales", "commission", "0.05"));
    directory.insert_allowance_type(allowance_type("at_bonus", "Bonus", "bonus", "0"));

    directory.insert_allowance(allowance("al_001", "emp_young", "at_commute", "20000", None));
    directory.insert_allowance(allowance("al_002", "emp_forty", "at_sales", "100000", Some("0.1")));
    directory.insert_allowance(allowance("al_003", "emp_forty", "at_sales", "100000", None));
    directory.insert_allowance(allowance("al_004", "emp_forty", "at_bonus", "5000", None));
    directory.insert_allowance(allowance("al_005", "emp_forty", "at_missing", "7000", None));

    directory
}
