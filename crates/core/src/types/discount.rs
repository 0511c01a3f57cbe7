//! Discount request and value types.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::generator::GenerationLimits;

/// Errors that can occur when parsing a [`DiscountRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty or whitespace.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// The title is too long.
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The discount type is not one of the supported kinds.
    #[error("discount type must be 'percentage' or 'fixed' (got '{0}')")]
    UnknownDiscountType(String),
    /// A numeric field could not be parsed.
    #[error("{field} must be a number (got '{value}')")]
    NotANumber {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// Percentage value is outside (0, 100].
    #[error("percentage must be greater than 0 and at most 100")]
    PercentageOutOfRange,
    /// Fixed amount is zero or negative.
    #[error("fixed amount must be greater than 0")]
    AmountNotPositive,
    /// A count field is not a positive whole number.
    #[error("{field} must be a positive whole number (got '{value}')")]
    NotAPositiveInteger {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// More codes were requested than the configured limit.
    #[error("number of codes must be at most {max}")]
    TooManyCodes {
        /// Configured maximum.
        max: usize,
    },
    /// Code length is longer than the configured limit.
    #[error("code length must be at most {max}")]
    CodeTooLong {
        /// Configured maximum.
        max: usize,
    },
    /// The start date is not an ISO `YYYY-MM-DD` date.
    #[error("start date must be formatted as YYYY-MM-DD (got '{0}')")]
    InvalidStartDate(String),
}

/// How the discount reduces the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percentage off the order.
    Percentage,
    /// Fixed amount off the order.
    Fixed,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for DiscountKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            other => Err(ValidationError::UnknownDiscountType(other.to_owned())),
        }
    }
}

/// The value a discount grants, in the shape the Admin API expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountValue {
    /// Fraction of the price taken off, in `[0, 1]`.
    Percentage {
        /// `0.10` means 10% off.
        fraction: f64,
    },
    /// Fixed amount taken off.
    FixedAmount {
        /// Decimal string with exactly two fraction digits.
        amount: String,
        /// Whether the amount applies to each item or once per order.
        applies_on_each_item: bool,
    },
}

impl DiscountValue {
    /// Map a discount kind and raw value to the remote value variant.
    ///
    /// Percentages are divided by 100. Fixed amounts are rounded half away
    /// from zero to two decimal places, so `19.999` becomes `"20.00"`.
    #[must_use]
    pub fn from_kind(kind: DiscountKind, value: Decimal) -> Self {
        match kind {
            DiscountKind::Percentage => Self::Percentage {
                fraction: (value / Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or_default(),
            },
            DiscountKind::Fixed => {
                let mut amount = round_to_cents(value);
                amount.rescale(2);
                Self::FixedAmount {
                    amount: amount.to_string(),
                    applies_on_each_item: false,
                }
            }
        }
    }
}

/// Raw form fields as submitted by the admin UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountRequestInput<'a> {
    pub title: &'a str,
    pub discount_type: &'a str,
    pub value: &'a str,
    pub number_of_codes: &'a str,
    pub code_length: &'a str,
    pub start_date: &'a str,
}

/// A validated request to create a discount with a batch of codes.
///
/// ## Constraints
///
/// - Title: 1-255 characters after trimming
/// - Percentage: greater than 0, at most 100
/// - Fixed amount: greater than 0
/// - Number of codes: 1 up to [`GenerationLimits::max_codes`]
/// - Code length: 1 up to [`GenerationLimits::max_code_length`]
/// - Start date: ISO `YYYY-MM-DD`
///
/// ## Examples
///
/// ```
/// use bulk_codes_core::{DiscountKind, DiscountRequest, DiscountRequestInput, GenerationLimits};
///
/// let request = DiscountRequest::parse(
///     &DiscountRequestInput {
///         title: "Promo",
///         discount_type: "percentage",
///         value: "10",
///         number_of_codes: "3",
///         code_length: "6",
///         start_date: "2024-01-01",
///     },
///     &GenerationLimits::default(),
/// )
/// .unwrap();
///
/// assert_eq!(request.kind(), DiscountKind::Percentage);
/// assert_eq!(request.number_of_codes(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRequest {
    title: String,
    kind: DiscountKind,
    value: Decimal,
    number_of_codes: usize,
    code_length: usize,
    start_date: NaiveDate,
}

impl DiscountRequest {
    /// Maximum length of a discount title.
    pub const MAX_TITLE_LENGTH: usize = 255;

    /// Parse and validate raw form fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking fields in form
    /// order.
    pub fn parse(
        input: &DiscountRequestInput<'_>,
        limits: &GenerationLimits,
    ) -> Result<Self, ValidationError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if title.chars().count() > Self::MAX_TITLE_LENGTH {
            return Err(ValidationError::TitleTooLong {
                max: Self::MAX_TITLE_LENGTH,
            });
        }

        let kind = input.discount_type.parse::<DiscountKind>()?;

        let value = Decimal::from_str(input.value.trim()).map_err(|_| {
            ValidationError::NotANumber {
                field: "value",
                value: input.value.to_owned(),
            }
        })?;
        match kind {
            DiscountKind::Percentage if value <= Decimal::ZERO || value > Decimal::ONE_HUNDRED => {
                return Err(ValidationError::PercentageOutOfRange);
            }
            // The amount sent is rounded to cents, so 0.004 would become 0.00.
            DiscountKind::Fixed if round_to_cents(value) <= Decimal::ZERO => {
                return Err(ValidationError::AmountNotPositive);
            }
            _ => {}
        }

        let number_of_codes = parse_positive(input.number_of_codes, "numberOfCodes")?;
        if number_of_codes > limits.max_codes() {
            return Err(ValidationError::TooManyCodes {
                max: limits.max_codes(),
            });
        }

        let code_length = parse_positive(input.code_length, "codeLength")?;
        if code_length > limits.max_code_length() {
            return Err(ValidationError::CodeTooLong {
                max: limits.max_code_length(),
            });
        }

        let start_date = NaiveDate::parse_from_str(input.start_date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidStartDate(input.start_date.to_owned()))?;

        Ok(Self {
            title: title.to_owned(),
            kind,
            value,
            number_of_codes,
            code_length,
            start_date,
        })
    }

    /// Returns the discount title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the discount kind.
    #[must_use]
    pub const fn kind(&self) -> DiscountKind {
        self.kind
    }

    /// Returns how many codes to generate.
    #[must_use]
    pub const fn number_of_codes(&self) -> usize {
        self.number_of_codes
    }

    /// Returns the length of each code.
    #[must_use]
    pub const fn code_length(&self) -> usize {
        self.code_length
    }

    /// Start of the discount: midnight UTC on the start date.
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start_date.and_time(NaiveTime::MIN).and_utc()
    }

    /// The remote value variant for this request.
    #[must_use]
    pub fn discount_value(&self) -> DiscountValue {
        DiscountValue::from_kind(self.kind, self.value)
    }
}

fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn parse_positive(raw: &str, field: &'static str) -> Result<usize, ValidationError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::NotAPositiveInteger {
            field,
            value: raw.to_owned(),
        }),
    }
}
