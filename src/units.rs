//! Square meters to Thai land units (Rai / Ngan / Square Wah)
//!
//! 1 Rai = 4 Ngan = 400 Square Wah = 1600 m²
//! 1 Ngan = 100 Square Wah = 400 m²
//! 1 Square Wah = 4 m²

use serde::{Deserialize, Serialize};

pub const SQ_METERS_PER_SQ_WAH: f64 = 4.0;
pub const SQ_WAH_PER_NGAN: f64 = 100.0;
pub const SQ_WAH_PER_RAI: f64 = 400.0;
pub const SQ_METERS_PER_NGAN: f64 = SQ_WAH_PER_NGAN * SQ_METERS_PER_SQ_WAH;
pub const SQ_METERS_PER_RAI: f64 = SQ_WAH_PER_RAI * SQ_METERS_PER_SQ_WAH;

/// Parcel area broken down into Thai units, plus the totals it was derived from.
///
/// Values keep full floating-point precision; rounding belongs to whoever
/// displays or exports them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThaiArea {
    pub rai: u64,
    /// Always in 0..=3
    pub ngan: u8,
    /// Always in [0, 100)
    pub sq_wah: f64,
    pub total_sq_wah: f64,
    pub total_sq_meters: f64,
}

impl ThaiArea {
    /// Whole area expressed as decimal Rai
    pub fn total_rai(&self) -> f64 {
        self.total_sq_wah / SQ_WAH_PER_RAI
    }

    /// "X ไร่ Y งาน Z ตารางวา" with two decimals on the Square Wah part
    pub fn thai_label(&self) -> String {
        format!(
            "{} ไร่ {} งาน {:.2} ตารางวา",
            self.rai, self.ngan, self.sq_wah
        )
    }

    pub fn is_empty(&self) -> bool {
        self.total_sq_meters <= 0.0
    }
}

/// Convert square meters into a Rai / Ngan / Square Wah breakdown.
///
/// This is a mixed-radix expansion of the total Square Wah (radices 400 and
/// 100) using only floor and remainder, with no rounding at any step.
/// `sq_meters` is expected to be non-negative.
pub fn convert_to_thai_units(sq_meters: f64) -> ThaiArea {
    let total_sq_wah = sq_meters / SQ_METERS_PER_SQ_WAH;

    let rai = (total_sq_wah / SQ_WAH_PER_RAI).floor();
    let remainder_after_rai = total_sq_wah % SQ_WAH_PER_RAI;

    // remainder < 400, but the division may still round up to exactly 4.0
    let ngan = (remainder_after_rai / SQ_WAH_PER_NGAN).floor().min(3.0);
    let sq_wah = remainder_after_rai % SQ_WAH_PER_NGAN;

    ThaiArea {
        rai: rai as u64,
        ngan: ngan as u8,
        sq_wah,
        total_sq_wah,
        total_sq_meters: sq_meters,
    }
}
