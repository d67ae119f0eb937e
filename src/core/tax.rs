use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ExportError;
use super::types::{DocumentTotals, InvoiceLine, TaxCategory, TaxMap};

/// One TaxSubtotal: all lines sharing a tax rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBucket {
    /// Percentage rate the bucket is keyed on.
    pub rate: Decimal,
    /// BT-116: Sum of the net amounts of the lines carrying this rate.
    pub taxable_amount: Decimal,
    /// BT-117: `taxable_amount * rate / 100`.
    pub tax_amount: Decimal,
    /// Display name of the first tax record seen at this rate.
    pub name: String,
    /// True when no line referenced a resolvable tax and the bucket was
    /// synthesized from the document totals.
    pub implicit: bool,
}

impl TaxBucket {
    pub fn category(&self) -> TaxCategory {
        TaxCategory::for_rate(self.rate)
    }
}

/// Round half away from zero to 2 decimals, the way ERP amounts are booked.
pub fn round_amount(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Group lines by tax **rate** and compute per-rate subtotals.
///
/// Buckets keep the order in which their rate was first seen. A line
/// contributes its full net amount to every distinct rate it references;
/// tax ids missing from `taxes` are ignored. When no line references a
/// resolvable tax, a single implicit "VAT" bucket is derived from `totals`
/// so the TaxTotal is never empty.
///
/// Fails with [`ExportError::AmountOutOfRange`] when a sum or product leaves
/// the `Decimal` range.
pub fn aggregate_taxes<'a, I>(
    lines: I,
    taxes: &TaxMap,
    totals: &DocumentTotals,
) -> Result<Vec<TaxBucket>, ExportError>
where
    I: IntoIterator<Item = &'a InvoiceLine>,
{
    let mut buckets: Vec<TaxBucket> = Vec::new();

    for line in lines {
        let mut seen: Vec<Decimal> = Vec::new();
        for tax in line.tax_ids.iter().filter_map(|id| taxes.get(id)) {
            if seen.contains(&tax.rate) {
                continue;
            }
            seen.push(tax.rate);

            match buckets.iter_mut().find(|b| b.rate == tax.rate) {
                Some(bucket) => {
                    bucket.taxable_amount = bucket
                        .taxable_amount
                        .checked_add(line.net_amount)
                        .ok_or_else(|| out_of_range("taxable amount", tax.rate))?;
                }
                None => buckets.push(TaxBucket {
                    rate: tax.rate,
                    taxable_amount: line.net_amount,
                    tax_amount: Decimal::ZERO,
                    name: tax.name.clone(),
                    implicit: false,
                }),
            }
        }
    }

    if buckets.is_empty() {
        tracing::debug!("no resolvable line taxes, deriving tax subtotal from document totals");
        return Ok(vec![implicit_bucket(totals)?]);
    }

    for bucket in &mut buckets {
        bucket.taxable_amount = round_amount(bucket.taxable_amount);
        let tax = bucket
            .taxable_amount
            .checked_mul(bucket.rate)
            .and_then(|d| d.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| out_of_range("tax amount", bucket.rate))?;
        bucket.tax_amount = round_amount(tax);
    }
    Ok(buckets)
}

fn out_of_range(what: &str, rate: Decimal) -> ExportError {
    ExportError::AmountOutOfRange(format!("{what} at rate {rate}"))
}

fn implicit_bucket(totals: &DocumentTotals) -> Result<TaxBucket, ExportError> {
    let rate = if totals.untaxed.is_zero() {
        Decimal::ZERO
    } else {
        let rate = totals
            .tax
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|d| d.checked_div(totals.untaxed))
            .ok_or_else(|| {
                ExportError::AmountOutOfRange(format!(
                    "implicit rate from tax {} over untaxed {}",
                    totals.tax, totals.untaxed
                ))
            })?;
        round_amount(rate)
    };
    Ok(TaxBucket {
        rate,
        taxable_amount: round_amount(totals.untaxed),
        tax_amount: round_amount(totals.tax),
        name: "VAT".to_string(),
        implicit: true,
    })
}
