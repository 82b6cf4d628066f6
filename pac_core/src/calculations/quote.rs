//! # Quote Totalization
//!
//! Combines labor and material costs into pre-tax (HT) and tax-included
//! (TTC) totals. Multiplication only, no intermediate rounding: two-decimal
//! rounding happens at display time in the report formatter.
//!
//! ## Example
//!
//! ```rust
//! use pac_core::calculations::quote::compute;
//!
//! let totals = compute(40.0, 45.0, 1000.0, 20.0);
//! assert!((totals.total_ht_eur - 2800.0).abs() < 1e-9);
//! assert!((totals.total_ttc_eur - 3360.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Labor, material and tax breakdown of a quote.
///
/// ## JSON Example
///
/// ```json
/// {
///   "labor_hours": 40.0,
///   "hourly_rate_eur": 45.0,
///   "material_total_ht_eur": 1000.0,
///   "total_ht_eur": 2800.0,
///   "tax_rate_percent": 20.0,
///   "total_ttc_eur": 3360.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Labor hours
    pub labor_hours: f64,

    /// Hourly labor rate in €
    pub hourly_rate_eur: f64,

    /// Material subtotal (covering line totals + flat extras), pre-tax
    pub material_total_ht_eur: f64,

    /// Labor + materials, pre-tax
    pub total_ht_eur: f64,

    /// Tax rate in percent (e.g., 20.0)
    pub tax_rate_percent: f64,

    /// Total including tax
    pub total_ttc_eur: f64,
}

impl QuoteTotals {
    /// Labor portion of the pre-tax total
    pub fn labor_total_ht_eur(&self) -> f64 {
        self.labor_hours * self.hourly_rate_eur
    }

    /// Displayed tax amount: TTC minus HT
    pub fn tax_amount_eur(&self) -> f64 {
        self.total_ttc_eur - self.total_ht_eur
    }
}

impl Default for QuoteTotals {
    /// Workshop defaults for a new bathroom sheet: 40h at 45 €/h, 20% VAT
    fn default() -> Self {
        compute(40.0, 45.0, 0.0, 20.0)
    }
}

/// Compute quote totals from labor and material figures.
///
/// `total_ht = hours × rate + materials`;
/// `total_ttc = total_ht × (1 + rate/100)`. Pure arithmetic, no failure
/// modes; non-numeric upstream inputs propagate as NaN unguarded.
pub fn compute(
    labor_hours: f64,
    hourly_rate_eur: f64,
    material_total_ht_eur: f64,
    tax_rate_percent: f64,
) -> QuoteTotals {
    let total_ht_eur = labor_hours * hourly_rate_eur + material_total_ht_eur;
    let total_ttc_eur = total_ht_eur * (1.0 + tax_rate_percent / 100.0);

    QuoteTotals {
        labor_hours,
        hourly_rate_eur,
        material_total_ht_eur,
        total_ht_eur,
        tax_rate_percent,
        total_ttc_eur,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_quote() {
        // 40h x 45€ + 1000€ materials, 20% VAT
        let totals = compute(40.0, 45.0, 1000.0, 20.0);
        assert!((totals.labor_total_ht_eur() - 1800.0).abs() < 1e-9);
        assert!((totals.total_ht_eur - 2800.0).abs() < 1e-9);
        assert!((totals.total_ttc_eur - 3360.0).abs() < 1e-9);
    }

    #[test]
    fn test_tax_amount_invariant() {
        let totals = compute(12.5, 52.0, 837.43, 10.0);
        let expected = totals.total_ht_eur * 0.10;
        assert!((totals.tax_amount_eur() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_tax() {
        let totals = compute(10.0, 50.0, 500.0, 0.0);
        assert!((totals.total_ttc_eur - totals.total_ht_eur).abs() < 1e-12);
    }

    #[test]
    fn test_materials_only() {
        let totals = compute(0.0, 0.0, 250.0, 20.0);
        assert!((totals.total_ht_eur - 250.0).abs() < 1e-12);
        assert!((totals.total_ttc_eur - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_workshop_rates() {
        let totals = QuoteTotals::default();
        assert_eq!(totals.labor_hours, 40.0);
        assert_eq!(totals.hourly_rate_eur, 45.0);
        assert_eq!(totals.tax_rate_percent, 20.0);
        assert!((totals.total_ht_eur - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let totals = compute(40.0, 45.0, 1000.0, 20.0);
        let json = serde_json::to_string(&totals).unwrap();
        let roundtrip: QuoteTotals = serde_json::from_str(&json).unwrap();
        assert_eq!(totals, roundtrip);
    }
}
