//! Social Security Number (NSS) models.

use serde::{Deserialize, Serialize};

/// An IMSS subdelegación: the two-digit code that opens every NSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCode {
    /// Two-digit code, zero padded.
    pub code: String,
    /// Region name.
    pub name: String,
}

/// Itemized outcome of validating an NSS.
///
/// `warnings` also carries the matched region name on success.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NssValidation {
    /// True when `errors` is empty.
    pub is_valid: bool,
    /// Problems that make the number invalid.
    pub errors: Vec<String>,
    /// Informational findings.
    pub warnings: Vec<String>,
}

/// Gender flag used when assembling an NSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Encoded as `1`.
    #[serde(alias = "M")]
    Male,
    /// Encoded as `2`.
    #[serde(alias = "F")]
    Female,
}

impl Gender {
    /// The digit this gender is encoded as.
    pub fn digit(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }
}

/// Demographic data used to assemble a candidate NSS.
///
/// Names are accepted but not encoded into the number; real sequence numbers
/// are assigned by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NssGenerationRequest {
    /// Region code, one or two digits.
    pub region: String,
    /// Birth year.
    pub year: i32,
    /// Birth month.
    pub month: u32,
    /// Birth day.
    pub day: u32,
    /// Gender flag.
    pub gender: Gender,
    /// Given name.
    pub first_name: String,
    /// Paternal surname.
    pub last_name: String,
    /// Maternal surname; like the other names, at least two characters.
    pub mother_last_name: String,
}

/// A generated NSS together with the issuance digits drawn for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedNss {
    /// The 11-digit number: region, birth date and check digit.
    pub nss: String,
    /// The number rendered as `RR-YYYY-MM-DD-C`.
    pub formatted: String,
    /// The gender digit (1 or 2).
    pub gender_digit: u8,
    /// The sequence digit drawn from the sequence source.
    pub sequence_digit: u8,
    /// The check digit.
    pub check_digit: u8,
}

/// The fields embedded in a well-formed NSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NssBreakdown {
    /// The full number.
    pub nss: String,
    /// Region code.
    pub region_code: String,
    /// Region name, when the code is known.
    pub region_name: Option<String>,
    /// Embedded year.
    pub year: u32,
    /// Embedded month.
    pub month: u32,
    /// Embedded day.
    pub day: u32,
    /// Trailing check digit.
    pub check_digit: u8,
}
