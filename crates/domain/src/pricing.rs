// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deterministic price breakdown calculation.
//!
//! Each occurrence is priced independently: base rate, actor-type
//! discount, weekend/evening surcharge, then VAT, in that fixed order.
//! The aggregate breakdown sums the per-occurrence lines without
//! discarding them.
//!
//! ## Invariants
//!
//! - Identical inputs produce identical breakdowns, line for line
//! - Discount lines carry negative amounts so every line list sums to
//!   its total
//! - The discount table exists only here; there is no second table
//!   anywhere in the system
//! - All amounts are rounded to 2 decimal places, midpoint away from zero

use crate::error::DomainError;
use crate::facility_calendar::FacilityCalendar;
use crate::time_slot::BookingOccurrence;
use crate::types::{ActorType, Zone};
use chrono::{Datelike, Weekday};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The kind of a priced line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceLineKind {
    /// Base rental rate.
    Base,
    /// Actor-type discount (negative amount).
    Discount,
    /// Weekend/evening surcharge.
    Surcharge,
    /// Value-added tax.
    Tax,
}

impl PriceLineKind {
    /// Returns the string representation of this line kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Discount => "discount",
            Self::Surcharge => "surcharge",
            Self::Tax => "tax",
        }
    }
}

/// One priced line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    /// Human-readable label.
    pub label: String,
    /// Signed amount. Discounts are negative.
    pub amount: Decimal,
    /// The kind of this line.
    pub kind: PriceLineKind,
}

/// The priced breakdown of a single occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrencePrice {
    /// The occurrence this breakdown belongs to.
    pub occurrence: BookingOccurrence,
    /// Ordered line items. Their amounts sum to `total`.
    pub lines: Vec<PriceLine>,
    /// Final price for this occurrence.
    pub total: Decimal,
}

/// The aggregate price breakdown of a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Per-occurrence breakdowns, in occurrence order. Never pre-aggregated
    /// away.
    pub per_occurrence: Vec<OccurrencePrice>,
    /// Aggregate line items summed across occurrences, in the fixed order
    /// base, discount, surcharge, tax. Zero lines are omitted.
    pub lines: Vec<PriceLine>,
    /// Grand total. Equals the sum of the per-occurrence totals.
    pub final_price: Decimal,
    /// Whether the actor type or an occurrence duration requires manual
    /// approval. The orchestrator extends this with the attendee rule.
    pub requires_approval: bool,
}

/// Returns the canonical discount percentage for an actor type.
///
/// This table is the single authoritative source for actor discounts.
#[must_use]
pub fn discount_rate(actor_type: ActorType) -> Decimal {
    match actor_type {
        ActorType::PrivatePerson | ActorType::PrivateFirma => Decimal::ZERO,
        ActorType::LagForeninger | ActorType::Paraply => Decimal::new(20, 0),
        ActorType::KommunaleEnheter => Decimal::new(15, 0),
    }
}

/// Calculates the deterministic price breakdown for a set of occurrences.
///
/// # Arguments
///
/// * `zone` - The booked zone (provides the hourly rate and surcharge
///   opt-in)
/// * `occurrences` - The occurrences to price, each priced independently
/// * `actor_type` - The requesting party's category
/// * `calendar` - Facility calendar providing VAT, surcharge, and
///   approval policy
///
/// # Returns
///
/// A `PriceBreakdown` whose per-occurrence breakdowns remain individually
/// inspectable.
///
/// # Errors
///
/// Returns `DomainError::InvalidCalendar` if the calendar's timezone
/// cannot be parsed.
pub fn calculate_price(
    zone: &Zone,
    occurrences: &[BookingOccurrence],
    actor_type: ActorType,
    calendar: &FacilityCalendar,
) -> Result<PriceBreakdown, DomainError> {
    let tz: Tz = calendar.tz()?;
    let rate: Decimal = discount_rate(actor_type);

    let mut per_occurrence: Vec<OccurrencePrice> = Vec::with_capacity(occurrences.len());
    let mut requires_approval: bool = actor_type.requires_approval();

    for occurrence in occurrences {
        let mut lines: Vec<PriceLine> = Vec::new();

        let base: Decimal = round_amount(zone.price_per_hour * occurrence.duration_hours());
        lines.push(PriceLine {
            label: String::from("Base rate"),
            amount: base,
            kind: PriceLineKind::Base,
        });

        let mut subtotal: Decimal = base;
        if rate > Decimal::ZERO {
            let discount: Decimal = round_amount(base * rate / Decimal::ONE_HUNDRED);
            lines.push(PriceLine {
                label: format!("Actor discount ({rate}%)"),
                amount: -discount,
                kind: PriceLineKind::Discount,
            });
            subtotal -= discount;
        }

        let surcharge_rate: Decimal = calendar.weekend_evening_surcharge();
        if zone.surcharge_opt_in
            && surcharge_rate > Decimal::ZERO
            && in_surcharge_window(occurrence, tz, calendar)
        {
            let surcharge: Decimal = round_amount(subtotal * surcharge_rate / Decimal::ONE_HUNDRED);
            lines.push(PriceLine {
                label: format!("Weekend/evening surcharge ({surcharge_rate}%)"),
                amount: surcharge,
                kind: PriceLineKind::Surcharge,
            });
            subtotal += surcharge;
        }

        let vat_rate: Decimal = calendar.vat_rate();
        let vat: Decimal = round_amount(subtotal * vat_rate / Decimal::ONE_HUNDRED);
        lines.push(PriceLine {
            label: format!("VAT ({vat_rate}%)"),
            amount: vat,
            kind: PriceLineKind::Tax,
        });

        let total: Decimal = subtotal + vat;

        if occurrence.duration_minutes() > i64::from(calendar.approval_duration_hours()) * 60 {
            requires_approval = true;
        }

        per_occurrence.push(OccurrencePrice {
            occurrence: occurrence.clone(),
            lines,
            total,
        });
    }

    let lines: Vec<PriceLine> = aggregate_lines(&per_occurrence);
    let final_price: Decimal = per_occurrence.iter().map(|p| p.total).sum();

    Ok(PriceBreakdown {
        per_occurrence,
        lines,
        final_price,
        requires_approval,
    })
}

/// Returns whether the occurrence starts on a weekend or inside the
/// evening band, evaluated in the facility's timezone.
fn in_surcharge_window(
    occurrence: &BookingOccurrence,
    tz: Tz,
    calendar: &FacilityCalendar,
) -> bool {
    let local = occurrence.start.with_timezone(&tz);
    let weekend: bool = matches!(local.weekday(), Weekday::Sat | Weekday::Sun);
    weekend || calendar.is_evening(local.time())
}

/// Sums per-occurrence lines into aggregate lines in fixed kind order.
fn aggregate_lines(per_occurrence: &[OccurrencePrice]) -> Vec<PriceLine> {
    let kinds = [
        PriceLineKind::Base,
        PriceLineKind::Discount,
        PriceLineKind::Surcharge,
        PriceLineKind::Tax,
    ];

    let mut aggregate: Vec<PriceLine> = Vec::new();
    for kind in kinds {
        let mut sum: Decimal = Decimal::ZERO;
        let mut label: Option<&str> = None;
        for price in per_occurrence {
            for line in &price.lines {
                if line.kind == kind {
                    sum += line.amount;
                    if label.is_none() {
                        label = Some(&line.label);
                    }
                }
            }
        }
        if let Some(label) = label {
            if sum != Decimal::ZERO {
                aggregate.push(PriceLine {
                    label: label.to_string(),
                    amount: sum,
                    kind,
                });
            }
        }
    }
    aggregate
}

/// Rounds a monetary amount to 2 decimal places, midpoint away from zero.
fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
