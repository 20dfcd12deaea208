//! Monthly salary breakdown.
//!
//! Turns one period's pay inputs into gross salary, employee and employer
//! contributions, net salary and the separately reported benefits.

use rust_decimal::Decimal;

use crate::config::ContributionConfig;
use crate::models::{
    AuditStep, ColorTag, CompositionShare, ResultLine, SalaryBreakdown, SalaryInput,
    SaturatingAmount,
};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Divides, yielding zero for a zero divisor.
fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.sat_div(denominator)
}

fn sum(amounts: &[Decimal]) -> Decimal {
    amounts.iter().fold(Decimal::ZERO, |total, amount| total.sat_add(*amount))
}

fn when(enabled: bool, amount: Decimal) -> Decimal {
    if enabled { amount } else { Decimal::ZERO }
}

fn money(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Calculates the salary breakdown for one period.
///
/// Social security uses `min(gross, cap)` as its base; the housing and
/// retirement funds use uncapped gross. Net salary is
/// `gross - (social_security_employee + housing_fund + other_deductions) + subsidy`.
/// Employer contributions and benefits are reported but never change net.
///
/// Zero work days or work hours yield zero daily and hourly rates. Amounts
/// beyond the `Decimal` range saturate rather than panic.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_salary_breakdown;
/// use nomina_engine::config::ConfigLoader;
/// use nomina_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/mx").unwrap();
/// let input = SalaryInput::with_base_salary(Decimal::from(15000));
///
/// let result = calculate_salary_breakdown(&input, &loader.latest_rates().contributions);
/// assert_eq!(result.gross_salary, Decimal::from(15000));
/// assert_eq!(result.net_salary, Decimal::from(13875));
/// ```
pub fn calculate_salary_breakdown(
    input: &SalaryInput,
    config: &ContributionConfig,
) -> SalaryBreakdown {
    if input.work_days.is_zero() || input.work_hours.is_zero() {
        tracing::warn!(
            work_days = %input.work_days,
            work_hours = %input.work_hours,
            "Zero work days or hours, daily and hourly rates default to zero"
        );
    }

    let daily_rate = ratio(input.base_salary, input.work_days);
    let hourly_rate = ratio(daily_rate, input.work_hours);
    let overtime_pay = hourly_rate
        .sat_mul(input.overtime_hours)
        .sat_mul(input.overtime_multiplier);
    let extras = sum(&[input.bonuses, input.allowances, input.commissions]);
    let gross_salary = sum(&[input.base_salary, overtime_pay, extras]);

    let social_security_base = gross_salary.min(config.social_security_base_cap);
    let social_security_employee = when(
        input.has_social_security,
        social_security_base.sat_mul(config.social_security_employee_rate),
    );
    let social_security_employer = when(
        input.has_social_security,
        social_security_base.sat_mul(config.social_security_employer_rate),
    );
    let housing_fund = when(input.has_housing_fund, gross_salary.sat_mul(config.housing_fund_rate));
    let retirement_fund = when(
        input.has_retirement_fund,
        gross_salary.sat_mul(config.retirement_fund_rate),
    );
    let employment_subsidy = when(
        input.has_employment_subsidy,
        gross_salary.sat_mul(config.employment_subsidy_rate),
    );

    let total_deductions = sum(&[social_security_employee, housing_fund, input.other_deductions]);
    let net_salary = gross_salary
        .sat_sub(total_deductions)
        .sat_add(employment_subsidy);

    let vacation_premium = when(
        input.has_vacation_premium,
        gross_salary.sat_mul(config.vacation_premium_rate),
    );
    let year_end_bonus = when(
        input.has_year_end_bonus,
        ratio(
            gross_salary.sat_mul(config.year_end_bonus_days),
            config.year_end_bonus_basis_days,
        ),
    );
    let profit_sharing = when(
        input.has_profit_sharing,
        ratio(
            gross_salary.sat_mul(input.profit_sharing_percentage),
            Decimal::ONE_HUNDRED,
        ),
    );
    let total_benefits = sum(&[vacation_premium, year_end_bonus, profit_sharing]);

    let annual_gross = gross_salary.sat_mul(MONTHS_PER_YEAR);
    let annual_net = net_salary.sat_mul(MONTHS_PER_YEAR);
    let annual_benefits = total_benefits.sat_mul(MONTHS_PER_YEAR);

    let lines = vec![
        ResultLine::currency("Daily Rate", daily_rate, ColorTag::Info, "Base salary per work day"),
        ResultLine::currency("Hourly Rate", hourly_rate, ColorTag::Info, "Daily rate per work hour"),
        ResultLine::currency(
            "Overtime Pay",
            overtime_pay,
            ColorTag::Success,
            format!(
                "{} hours at {}x the hourly rate",
                input.overtime_hours.normalize(),
                input.overtime_multiplier.normalize()
            ),
        ),
        ResultLine::currency(
            "Gross Salary",
            gross_salary,
            ColorTag::Primary,
            "Salary before deductions",
        ),
        ResultLine::currency(
            "Social Security (Employee)",
            social_security_employee,
            ColorTag::Warning,
            "IMSS employee share on the capped base",
        ),
        ResultLine::currency(
            "Social Security (Employer)",
            social_security_employer,
            ColorTag::Secondary,
            "IMSS employer share on the capped base",
        ),
        ResultLine::currency(
            "Housing Fund",
            housing_fund,
            ColorTag::Warning,
            "INFONAVIT contribution",
        ),
        ResultLine::currency(
            "Retirement Fund",
            retirement_fund,
            ColorTag::Secondary,
            "SAR contribution paid by the employer",
        ),
        ResultLine::currency(
            "Employment Subsidy",
            employment_subsidy,
            ColorTag::Success,
            "Subsidy credited to the employee",
        ),
        ResultLine::currency(
            "Other Deductions",
            input.other_deductions,
            ColorTag::Danger,
            "Additional withholdings",
        ),
        ResultLine::currency(
            "Total Deductions",
            total_deductions,
            ColorTag::Danger,
            "Sum of employee withholdings",
        ),
        ResultLine::currency(
            "Net Salary",
            net_salary,
            ColorTag::Success,
            "Salary received by the employee",
        ),
        ResultLine::currency(
            "Vacation Premium",
            vacation_premium,
            ColorTag::Info,
            "Premium on vacation pay",
        ),
        ResultLine::currency(
            "Year-End Bonus",
            year_end_bonus,
            ColorTag::Info,
            "Proportional aguinaldo",
        ),
        ResultLine::currency(
            "Profit Sharing",
            profit_sharing,
            ColorTag::Info,
            "PTU share of gross",
        ),
        ResultLine::currency(
            "Total Benefits",
            total_benefits,
            ColorTag::Success,
            "Benefits reported outside net salary",
        ),
        ResultLine::currency(
            "Annual Gross",
            annual_gross,
            ColorTag::Primary,
            "Gross salary over twelve months",
        ),
        ResultLine::currency(
            "Annual Net",
            annual_net,
            ColorTag::Success,
            "Net salary over twelve months",
        ),
        ResultLine::currency(
            "Annual Benefits",
            annual_benefits,
            ColorTag::Info,
            "Benefits over twelve months",
        ),
    ];

    let share = |category: &str, amount: Decimal, color: ColorTag| CompositionShare {
        category: category.to_string(),
        amount,
        percentage: ratio(amount, gross_salary).sat_mul(Decimal::ONE_HUNDRED),
        color,
    };
    let composition = vec![
        share("Gross Salary", gross_salary, ColorTag::Primary),
        share("Social Security", social_security_employee, ColorTag::Warning),
        share("Housing Fund", housing_fund, ColorTag::Warning),
        share("Other Deductions", input.other_deductions, ColorTag::Danger),
        share("Employment Subsidy", employment_subsidy, ColorTag::Success),
        share("Net Salary", net_salary, ColorTag::Success),
    ];

    let audit_steps = vec![
        AuditStep {
            step_number: 1,
            rule_id: "gross_salary".to_string(),
            rule_name: "Gross Salary".to_string(),
            legal_ref: "LFT Art. 67, 84".to_string(),
            input: serde_json::json!({
                "base_salary": money(input.base_salary),
                "work_days": money(input.work_days),
                "work_hours": money(input.work_hours),
                "overtime_hours": money(input.overtime_hours),
                "overtime_multiplier": money(input.overtime_multiplier),
                "bonuses": money(input.bonuses),
                "allowances": money(input.allowances),
                "commissions": money(input.commissions)
            }),
            output: serde_json::json!({
                "daily_rate": money(daily_rate),
                "hourly_rate": money(hourly_rate),
                "overtime_pay": money(overtime_pay),
                "gross_salary": money(gross_salary)
            }),
            reasoning: format!(
                "${} base + ${} overtime + ${} bonuses, allowances and commissions = ${}",
                money(input.base_salary),
                money(overtime_pay),
                money(extras),
                money(gross_salary)
            ),
        },
        AuditStep {
            step_number: 2,
            rule_id: "social_security".to_string(),
            rule_name: "Social Security Contributions".to_string(),
            legal_ref: "LSS Art. 28".to_string(),
            input: serde_json::json!({
                "gross_salary": money(gross_salary),
                "base_cap": money(config.social_security_base_cap),
                "enabled": input.has_social_security
            }),
            output: serde_json::json!({
                "base": money(social_security_base),
                "employee": money(social_security_employee),
                "employer": money(social_security_employer)
            }),
            reasoning: if input.has_social_security {
                format!(
                    "Capped base ${} x {} employee, x {} employer",
                    money(social_security_base),
                    config.social_security_employee_rate.normalize(),
                    config.social_security_employer_rate.normalize()
                )
            } else {
                "Social security not applicable".to_string()
            },
        },
        AuditStep {
            step_number: 3,
            rule_id: "housing_and_retirement".to_string(),
            rule_name: "Housing and Retirement Funds".to_string(),
            legal_ref: "Ley INFONAVIT Art. 29; LSS Art. 168".to_string(),
            input: serde_json::json!({
                "gross_salary": money(gross_salary),
                "housing_enabled": input.has_housing_fund,
                "retirement_enabled": input.has_retirement_fund
            }),
            output: serde_json::json!({
                "housing_fund": money(housing_fund),
                "retirement_fund": money(retirement_fund)
            }),
            reasoning: "Both funds apply to uncapped gross salary".to_string(),
        },
        AuditStep {
            step_number: 4,
            rule_id: "net_salary".to_string(),
            rule_name: "Net Salary".to_string(),
            legal_ref: "LFT Art. 110".to_string(),
            input: serde_json::json!({
                "gross_salary": money(gross_salary),
                "total_deductions": money(total_deductions),
                "employment_subsidy": money(employment_subsidy)
            }),
            output: serde_json::json!({ "net_salary": money(net_salary) }),
            reasoning: format!(
                "${} - ${} + ${} = ${}",
                money(gross_salary),
                money(total_deductions),
                money(employment_subsidy),
                money(net_salary)
            ),
        },
        AuditStep {
            step_number: 5,
            rule_id: "benefits".to_string(),
            rule_name: "Statutory Benefits".to_string(),
            legal_ref: "LFT Art. 80, 87, 117".to_string(),
            input: serde_json::json!({
                "gross_salary": money(gross_salary),
                "vacation_premium": input.has_vacation_premium,
                "year_end_bonus": input.has_year_end_bonus,
                "profit_sharing": input.has_profit_sharing
            }),
            output: serde_json::json!({
                "vacation_premium": money(vacation_premium),
                "year_end_bonus": money(year_end_bonus),
                "profit_sharing": money(profit_sharing),
                "total_benefits": money(total_benefits)
            }),
            reasoning: format!("Benefits of ${} reported separately from net", money(total_benefits)),
        },
    ];

    SalaryBreakdown {
        daily_rate,
        hourly_rate,
        overtime_pay,
        gross_salary,
        social_security_base,
        social_security_employee,
        social_security_employer,
        housing_fund,
        retirement_fund,
        employment_subsidy,
        other_deductions: input.other_deductions,
        total_deductions,
        net_salary,
        vacation_premium,
        year_end_bonus,
        profit_sharing,
        total_benefits,
        annual_gross,
        annual_net,
        annual_benefits,
        lines,
        composition,
        audit_steps,
    }
}
