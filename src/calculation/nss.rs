//! IMSS social security number (NSS) validation and generation.
//!
//! A number is 11 digits: a two-digit region code, the birth date as
//! `YYYYMMDD` and a Luhn-style check digit over the first ten.
//!
//! Validation never fails fast. Every readable segment is checked and each
//! problem is reported in the returned [`NssValidation`]; segments that are
//! too short or contain non-digits are skipped rather than guessed at.

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{GeneratedNss, NssBreakdown, NssGenerationRequest, NssValidation, RegionCode};

use super::sequence::SequenceSource;

/// Number of digits in an NSS.
pub const NSS_LENGTH: usize = 11;

const BASE_LENGTH: usize = NSS_LENGTH - 1;
const CHECK_WEIGHTS: [u32; BASE_LENGTH] = [1, 2, 1, 2, 1, 2, 1, 2, 1, 2];

const MIN_GENERATION_YEAR: i32 = 1900;
const MAX_GENERATION_YEAR: i32 = 2100;
const MIN_NAME_LENGTH: usize = 2;

/// Computes the check digit for a ten-digit base.
///
/// Each digit is multiplied by its weight (alternating 1 and 2); products of
/// 10 or more contribute the sum of their two digits. The check digit is
/// `(10 - sum % 10) % 10`.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::compute_check_digit;
///
/// assert_eq!(compute_check_digit(&[0, 9, 1, 9, 9, 0, 0, 1, 0, 1]), 8);
/// ```
pub fn compute_check_digit(digits: &[u8; BASE_LENGTH]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(CHECK_WEIGHTS)
        .map(|(&digit, weight)| {
            let product = u32::from(digit) * weight;
            product / 10 + product % 10
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn parse_base(base: &str) -> Option<[u8; BASE_LENGTH]> {
    if base.len() != BASE_LENGTH || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digits = [0u8; BASE_LENGTH];
    for (slot, byte) in digits.iter_mut().zip(base.bytes()) {
        *slot = byte - b'0';
    }
    Some(digits)
}

/// Computes the check digit for a ten-digit base given as text.
///
/// # Errors
///
/// Returns [`EngineError::InvalidNssComponent`] unless `base` is exactly ten
/// ASCII digits.
pub fn check_digit_for(base: &str) -> EngineResult<u8> {
    parse_base(base)
        .map(|digits| compute_check_digit(&digits))
        .ok_or_else(|| EngineError::InvalidNssComponent {
            field: "base".to_string(),
            message: format!("expected {} digits, got '{}'", BASE_LENGTH, base),
        })
}

/// Reads `chars[range]` as a number when every character is a digit.
fn segment(chars: &[char], start: usize, end: usize) -> Option<(u32, String)> {
    let slice = chars.get(start..end)?;
    if !slice.iter().all(char::is_ascii_digit) {
        return None;
    }
    let text: String = slice.iter().collect();
    text.parse().ok().map(|value| (value, text))
}

fn region_lookup<'a>(regions: &'a [RegionCode], code: &str) -> Option<&'a RegionCode> {
    regions.iter().find(|r| r.code == code)
}

/// Validates an NSS against today's date.
///
/// See [`validate_nss_as_of`].
pub fn validate_nss(nss: &str, regions: &[RegionCode]) -> NssValidation {
    validate_nss_as_of(nss, regions, Utc::now().date_naive())
}

/// Validates an NSS, treating `today` as the current date.
///
/// Checks, in order: length and digit-only content, the region code, the
/// embedded month, day and calendar date, and the check digit. A known
/// region is reported as a warning naming it; a birth year after `today`
/// or before 1900 is a warning.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::validate_nss_as_of;
/// use nomina_engine::models::RegionCode;
/// use chrono::NaiveDate;
///
/// let regions = vec![RegionCode { code: "09".to_string(), name: "Ciudad de México".to_string() }];
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// let result = validate_nss_as_of("09199001018", &regions, today);
/// assert!(result.is_valid);
///
/// let result = validate_nss_as_of("09199101018", &regions, today);
/// assert!(!result.is_valid);
/// ```
pub fn validate_nss_as_of(nss: &str, regions: &[RegionCode], today: NaiveDate) -> NssValidation {
    let chars: Vec<char> = nss.chars().collect();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if chars.len() != NSS_LENGTH {
        errors.push(format!(
            "NSS must have exactly {} digits, found {}",
            NSS_LENGTH,
            chars.len()
        ));
    }
    let all_digits = chars.iter().all(char::is_ascii_digit);
    if !all_digits {
        errors.push("NSS must contain only digits".to_string());
    }

    if let Some((_, code)) = segment(&chars, 0, 2) {
        match region_lookup(regions, &code) {
            Some(region) => warnings.push(format!("Region: {} ({})", region.name, code)),
            None => errors.push(format!("Unknown region code: {}", code)),
        }
    }

    let year = segment(&chars, 2, 6);
    let month = segment(&chars, 6, 8);
    let day = segment(&chars, 8, 10);

    if let Some((value, _)) = &year {
        let birth_year = *value as i32;
        if birth_year > today.year() {
            warnings.push(format!("Birth year {} is in the future", birth_year));
        } else if birth_year < MIN_GENERATION_YEAR {
            warnings.push(format!("Birth year {} looks implausible", birth_year));
        }
    }

    let month_ok = match &month {
        Some((value, text)) if !(1..=12).contains(value) => {
            errors.push(format!("Invalid month: {}", text));
            false
        }
        Some(_) => true,
        None => false,
    };
    let day_ok = match &day {
        Some((value, text)) if !(1..=31).contains(value) => {
            errors.push(format!("Invalid day: {}", text));
            false
        }
        Some(_) => true,
        None => false,
    };

    if let (Some((y, y_text)), Some((m, m_text)), Some((d, d_text))) = (&year, &month, &day) {
        if month_ok && day_ok && NaiveDate::from_ymd_opt(*y as i32, *m, *d).is_none() {
            errors.push(format!("Invalid date: {}-{}-{}", y_text, m_text, d_text));
        }
    }

    if chars.len() == NSS_LENGTH && all_digits {
        let base: String = chars[..BASE_LENGTH].iter().collect();
        if let Some(digits) = parse_base(&base) {
            let expected = compute_check_digit(&digits);
            let found = chars[BASE_LENGTH].to_digit(10).unwrap_or(u32::MAX);
            if u32::from(expected) != found {
                errors.push(format!(
                    "Invalid check digit: expected {}, found {}",
                    expected, chars[BASE_LENGTH]
                ));
            }
        }
    }

    NssValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn well_formed(nss: &str) -> EngineResult<&str> {
    if nss.len() == NSS_LENGTH && nss.bytes().all(|b| b.is_ascii_digit()) {
        Ok(nss)
    } else {
        Err(EngineError::InvalidNssComponent {
            field: "nss".to_string(),
            message: format!("expected {} digits, got '{}'", NSS_LENGTH, nss),
        })
    }
}

/// Decodes the fields embedded in an 11-digit NSS.
///
/// The check digit is reported as found; use [`validate_nss`] to verify it.
pub fn describe_nss(nss: &str, regions: &[RegionCode]) -> EngineResult<NssBreakdown> {
    let nss = well_formed(nss)?;
    let number = |range: std::ops::Range<usize>| nss[range].parse::<u32>().unwrap_or(0);

    let region_code = nss[0..2].to_string();
    Ok(NssBreakdown {
        nss: nss.to_string(),
        region_name: region_lookup(regions, &region_code).map(|r| r.name.clone()),
        region_code,
        year: number(2..6),
        month: number(6..8),
        day: number(8..10),
        check_digit: number(10..11) as u8,
    })
}

/// Renders an NSS as `RR-YYYY-MM-DD-C`.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::format_nss;
///
/// assert_eq!(format_nss("09199001018").unwrap(), "09-1990-01-01-8");
/// ```
pub fn format_nss(nss: &str) -> EngineResult<String> {
    let nss = well_formed(nss)?;
    Ok(format!(
        "{}-{}-{}-{}-{}",
        &nss[0..2],
        &nss[2..6],
        &nss[6..8],
        &nss[8..10],
        &nss[10..11]
    ))
}

fn normalize_region(region: &str, regions: &[RegionCode]) -> EngineResult<String> {
    let trimmed = region.trim();
    let invalid = || EngineError::InvalidRegion {
        code: region.to_string(),
    };

    if trimmed.is_empty() || trimmed.len() > 2 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let code = format!("{:0>2}", trimmed);
    region_lookup(regions, &code).ok_or_else(invalid)?;
    Ok(code)
}

fn require_name(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(EngineError::InvalidNssComponent {
            field: field.to_string(),
            message: format!("must be at least {} characters", MIN_NAME_LENGTH),
        });
    }
    Ok(())
}

/// Assembles a candidate NSS from demographic data.
///
/// The number is the zero-padded region, the birth date and the check
/// digit, so identical demographic input always yields the same `nss`.
/// The gender digit and a sequence digit drawn from `source` are returned
/// alongside it as metadata; `source` never changes `nss`. Names are
/// validated but not encoded.
///
/// # Errors
///
/// - [`EngineError::InvalidRegion`] when the region is not one or two digits
///   or is not in `regions`
/// - [`EngineError::InvalidNssComponent`] for a year outside 1900..=2100, an
///   out-of-range month or day, a date that does not exist, or a first name,
///   last name or mother's last name shorter than two characters
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::{generate_nss, FixedSequence};
/// use nomina_engine::models::{Gender, NssGenerationRequest, RegionCode};
///
/// let regions = vec![RegionCode { code: "09".to_string(), name: "Ciudad de México".to_string() }];
/// let request = NssGenerationRequest {
///     region: "9".to_string(),
///     year: 1990,
///     month: 1,
///     day: 1,
///     gender: Gender::Male,
///     first_name: "Juan".to_string(),
///     last_name: "Pérez".to_string(),
///     mother_last_name: "López".to_string(),
/// };
///
/// let generated = generate_nss(&request, &regions, &mut FixedSequence::new(vec![1])).unwrap();
/// assert_eq!(generated.nss, "09199001018");
/// assert_eq!(generated.sequence_digit, 1);
/// ```
pub fn generate_nss(
    request: &NssGenerationRequest,
    regions: &[RegionCode],
    source: &mut dyn SequenceSource,
) -> EngineResult<GeneratedNss> {
    let region = normalize_region(&request.region, regions)?;

    if !(MIN_GENERATION_YEAR..=MAX_GENERATION_YEAR).contains(&request.year) {
        return Err(EngineError::InvalidNssComponent {
            field: "year".to_string(),
            message: format!(
                "{} is outside {}..={}",
                request.year, MIN_GENERATION_YEAR, MAX_GENERATION_YEAR
            ),
        });
    }
    if !(1..=12).contains(&request.month) {
        return Err(EngineError::InvalidNssComponent {
            field: "month".to_string(),
            message: format!("{} is outside 1..=12", request.month),
        });
    }
    if !(1..=31).contains(&request.day) {
        return Err(EngineError::InvalidNssComponent {
            field: "day".to_string(),
            message: format!("{} is outside 1..=31", request.day),
        });
    }
    if NaiveDate::from_ymd_opt(request.year, request.month, request.day).is_none() {
        return Err(EngineError::InvalidNssComponent {
            field: "date".to_string(),
            message: format!(
                "{:04}-{:02}-{:02} is not a calendar date",
                request.year, request.month, request.day
            ),
        });
    }
    require_name("first_name", &request.first_name)?;
    require_name("last_name", &request.last_name)?;
    require_name("mother_last_name", &request.mother_last_name)?;

    let base = format!(
        "{}{:04}{:02}{:02}",
        region, request.year, request.month, request.day
    );
    let check_digit = check_digit_for(&base)?;
    let nss = format!("{}{}", base, check_digit);
    let formatted = format_nss(&nss)?;

    let sequence_digit = source.next_digit() % 10;
    tracing::debug!(region = %region, sequence_digit, "Generated NSS candidate");

    Ok(GeneratedNss {
        nss,
        formatted,
        gender_digit: request.gender.digit(),
        sequence_digit,
        check_digit,
    })
}
