//! Vessel performance model.
//!
//! Converts a vessel's speed/consumption curve and hull characteristics into
//! the constant rates the route evaluator works with: fuel burned per
//! kilometre while cruising and fuel burned per hour while waiting in port.
//!
//! Missing or unusable vessel data is degraded input rather than an error;
//! every helper falls back to a documented default.

use serde::{Deserialize, Serialize};

use crate::geodesy::KM_PER_NAUTICAL_MILE;

/// Litres in one tonne of heavy fuel oil.
pub const LITERS_PER_TON: f64 = 1176.5;
/// Idle burn used when neither tonnage nor propulsion power is known.
pub const DEFAULT_IDLE_RATE_LPH: f64 = 150.0;
/// Lower clamp for the idle burn.
pub const MIN_IDLE_RATE_LPH: f64 = 20.0;
/// Upper clamp for the idle burn.
pub const MAX_IDLE_RATE_LPH: f64 = 2000.0;
/// Tonnes of CO2 emitted per tonne of HFO burned.
pub const DEFAULT_CO2_FACTOR: f64 = 3.114;
/// Operating speed assumed when the fuel curve is unusable.
pub const DEFAULT_CRUISING_SPEED_KNOTS: f64 = 14.0;
/// Cruising burn assumed when the fuel curve is unusable.
pub const DEFAULT_FUEL_LITERS_PER_KM: f64 = 0.25;

const POWER_LPH_PER_MW: f64 = 12.0;
const TONNAGE_SHARE: f64 = 0.8;

/// `(upper GT bound, rate at lower bound, rate at upper bound)` per band.
const TONNAGE_BANDS: [(f64, f64, f64); 4] = [
    (25_000.0, 20.0, 50.0),
    (100_000.0, 50.0, 200.0),
    (200_000.0, 200.0, 500.0),
    (400_000.0, 500.0, 1500.0),
];

/// One point on a vessel's fuel curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelCurveSample {
    /// Speed through water in knots.
    #[serde(alias = "speed")]
    pub speed_knots: f64,
    /// Fuel consumption at that speed in tonnes per hour.
    #[serde(alias = "consumption")]
    pub consumption_tph: f64,
}

impl FuelCurveSample {
    /// Construct a sample.
    #[must_use]
    pub const fn new(speed_knots: f64, consumption_tph: f64) -> Self {
        Self {
            speed_knots,
            consumption_tph,
        }
    }

    fn is_usable(&self) -> bool {
        self.speed_knots.is_finite()
            && self.speed_knots > 0.0
            && self.consumption_tph.is_finite()
            && self.consumption_tph >= 0.0
    }

    /// Tonnes of fuel burned per kilometre at this operating point.
    #[must_use]
    pub fn tons_per_km(&self) -> f64 {
        self.consumption_tph / (self.speed_knots * KM_PER_NAUTICAL_MILE)
    }
}

/// Read-only description of a vessel as supplied by the vessel catalogue.
///
/// # Examples
///
/// ```
/// use portwise_core::vessel::{FuelCurveSample, VesselProfile};
///
/// let vessel = VesselProfile::new("Feeder", vec![FuelCurveSample::new(20.0, 5.0)])
///     .with_cruising_speed(20.0)
///     .with_gross_tonnage(30_000.0);
/// assert_eq!(vessel.fuel_curve.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselProfile {
    /// Vessel name, used only for logging and display.
    #[serde(default)]
    pub name: String,
    /// Speed/consumption samples sorted by speed.
    #[serde(default)]
    pub fuel_curve: Vec<FuelCurveSample>,
    /// Gross tonnage in GT.
    #[serde(default, alias = "crossTonnage")]
    pub gross_tonnage: Option<f64>,
    /// Installed propulsion power in megawatts.
    #[serde(default)]
    pub propulsion_power_mw: Option<f64>,
    /// Declared service speed in knots.
    #[serde(default)]
    pub cruising_speed_knots: Option<f64>,
    /// Tonnes of CO2 per tonne of fuel.
    #[serde(default = "default_co2_factor")]
    pub co2_factor: f64,
}

const fn default_co2_factor() -> f64 {
    DEFAULT_CO2_FACTOR
}

impl VesselProfile {
    /// Build a profile from a name and fuel curve; the curve is sorted by speed.
    #[must_use]
    pub fn new(name: impl Into<String>, mut fuel_curve: Vec<FuelCurveSample>) -> Self {
        fuel_curve.sort_by(|lhs, rhs| lhs.speed_knots.total_cmp(&rhs.speed_knots));
        Self {
            name: name.into(),
            fuel_curve,
            gross_tonnage: None,
            propulsion_power_mw: None,
            cruising_speed_knots: None,
            co2_factor: DEFAULT_CO2_FACTOR,
        }
    }

    /// Set the declared cruising speed.
    #[must_use]
    pub const fn with_cruising_speed(mut self, knots: f64) -> Self {
        self.cruising_speed_knots = Some(knots);
        self
    }

    /// Set the gross tonnage.
    #[must_use]
    pub const fn with_gross_tonnage(mut self, gross_tonnage: f64) -> Self {
        self.gross_tonnage = Some(gross_tonnage);
        self
    }

    /// Set the propulsion power.
    #[must_use]
    pub const fn with_propulsion_power(mut self, megawatts: f64) -> Self {
        self.propulsion_power_mw = Some(megawatts);
        self
    }

    /// Set the CO2 emission factor.
    #[must_use]
    pub const fn with_co2_factor(mut self, factor: f64) -> Self {
        self.co2_factor = factor;
        self
    }
}

/// Constant-speed rates derived from a [`VesselProfile`].
///
/// Every leg is assumed to be sailed at the same operating point; speed
/// changes per leg are not modelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselPerformance {
    /// Speed used to convert distance into sailing time.
    pub speed_knots: f64,
    /// Litres burned per kilometre while cruising.
    pub fuel_liters_per_km: f64,
    /// Litres burned per hour while waiting in port.
    pub idle_rate_lph: f64,
    /// Tonnes of CO2 per tonne of fuel.
    pub co2_factor: f64,
}

impl VesselPerformance {
    /// Derive cruising and idle rates from a profile.
    ///
    /// The declared cruising speed drives sailing time when present; otherwise
    /// the speed of the selected curve sample does.
    #[must_use]
    pub fn from_profile(profile: &VesselProfile) -> Self {
        let declared_speed = profile
            .cruising_speed_knots
            .filter(|speed| speed.is_finite() && *speed > 0.0);
        let sample = operating_point(&profile.fuel_curve, declared_speed);
        let (speed_knots, fuel_liters_per_km) = match sample {
            Some(sample) => (
                declared_speed.unwrap_or(sample.speed_knots),
                sample.tons_per_km() * LITERS_PER_TON,
            ),
            None => {
                log::warn!(
                    "vessel {:?} has no usable fuel curve; assuming {DEFAULT_CRUISING_SPEED_KNOTS} kn and {DEFAULT_FUEL_LITERS_PER_KM} L/km",
                    profile.name
                );
                (
                    declared_speed.unwrap_or(DEFAULT_CRUISING_SPEED_KNOTS),
                    DEFAULT_FUEL_LITERS_PER_KM,
                )
            }
        };
        let co2_factor = if profile.co2_factor.is_finite() && profile.co2_factor >= 0.0 {
            profile.co2_factor
        } else {
            DEFAULT_CO2_FACTOR
        };
        Self {
            speed_knots,
            fuel_liters_per_km,
            idle_rate_lph: idle_rate_lph(profile.gross_tonnage, profile.propulsion_power_mw),
            co2_factor,
        }
    }

    /// Average speed over ground in km/h.
    #[must_use]
    pub fn average_speed_kmh(&self) -> f64 {
        self.speed_knots * KM_PER_NAUTICAL_MILE
    }

    /// Hours needed to sail `distance_km`.
    #[must_use]
    pub fn sailing_hours(&self, distance_km: f64) -> f64 {
        distance_km / self.average_speed_kmh()
    }

    /// Litres burned sailing `distance_km`.
    #[must_use]
    pub fn travel_fuel_liters(&self, distance_km: f64) -> f64 {
        distance_km * self.fuel_liters_per_km
    }

    /// Litres burned idling for `hours`.
    #[must_use]
    pub fn idle_fuel_liters(&self, hours: f64) -> f64 {
        hours * self.idle_rate_lph
    }

    /// Kilograms of CO2 emitted by burning `fuel_liters`.
    #[must_use]
    pub fn co2_kg(&self, fuel_liters: f64) -> f64 {
        co2_kg(fuel_liters, self.co2_factor)
    }
}

/// Pick the fuel-curve sample to cruise at.
///
/// With a declared speed, the sample whose speed is closest wins and the first
/// of equally close samples is kept. Without one, the middle sample of the
/// speed-sorted curve is used. Samples with non-positive speed or negative
/// consumption are ignored.
#[must_use]
pub fn operating_point(
    curve: &[FuelCurveSample],
    cruising_speed_knots: Option<f64>,
) -> Option<FuelCurveSample> {
    let mut usable: Vec<FuelCurveSample> = curve
        .iter()
        .copied()
        .filter(FuelCurveSample::is_usable)
        .collect();
    match cruising_speed_knots {
        Some(target) => usable.into_iter().fold(None, |best, sample| match best {
            Some(current)
                if (current.speed_knots - target).abs() <= (sample.speed_knots - target).abs() =>
            {
                Some(current)
            }
            _ => Some(sample),
        }),
        None => {
            usable.sort_by(|lhs, rhs| lhs.speed_knots.total_cmp(&rhs.speed_knots));
            let middle = usable.len() / 2;
            usable.get(middle).copied()
        }
    }
}

/// Idle burn in litres per hour for a vessel in port.
///
/// Gross tonnage is mapped through piecewise-linear bands and blended 80/20
/// with a power-based term (`MW x 12`). When only one of the two inputs is
/// known it is used alone; with neither, [`DEFAULT_IDLE_RATE_LPH`] applies.
/// The result is clamped to `[MIN_IDLE_RATE_LPH, MAX_IDLE_RATE_LPH]`.
///
/// # Examples
///
/// ```
/// use portwise_core::vessel::{idle_rate_lph, DEFAULT_IDLE_RATE_LPH};
///
/// assert_eq!(idle_rate_lph(None, None), DEFAULT_IDLE_RATE_LPH);
/// assert!((idle_rate_lph(Some(25_000.0), None) - 50.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn idle_rate_lph(gross_tonnage: Option<f64>, propulsion_power_mw: Option<f64>) -> f64 {
    let tonnage = gross_tonnage
        .filter(|gt| gt.is_finite() && *gt >= 0.0)
        .map(tonnage_idle_rate);
    let power = propulsion_power_mw
        .filter(|mw| mw.is_finite() && *mw >= 0.0)
        .map(|mw| mw * POWER_LPH_PER_MW);
    let raw = match (tonnage, power) {
        (Some(tonnage), Some(power)) => {
            tonnage * TONNAGE_SHARE + power * (1.0 - TONNAGE_SHARE)
        }
        (Some(tonnage), None) => tonnage,
        (None, Some(power)) => power,
        (None, None) => return DEFAULT_IDLE_RATE_LPH,
    };
    raw.clamp(MIN_IDLE_RATE_LPH, MAX_IDLE_RATE_LPH)
}

/// Tonnage-only idle burn, linearly interpolated within each band.
#[must_use]
pub fn tonnage_idle_rate(gross_tonnage: f64) -> f64 {
    let mut lower_bound = 0.0;
    for (upper_bound, low_rate, high_rate) in TONNAGE_BANDS {
        if gross_tonnage < upper_bound {
            let share = (gross_tonnage - lower_bound) / (upper_bound - lower_bound);
            return low_rate + share * (high_rate - low_rate);
        }
        lower_bound = upper_bound;
    }
    TONNAGE_BANDS
        .last()
        .map_or(DEFAULT_IDLE_RATE_LPH, |(_, _, high_rate)| *high_rate)
}

/// Convert litres of fuel into tonnes.
#[must_use]
pub fn liters_to_tons(liters: f64) -> f64 {
    liters / LITERS_PER_TON
}

/// Kilograms of CO2 for `fuel_liters` at `co2_factor` tonnes per tonne.
#[must_use]
pub fn co2_kg(fuel_liters: f64, co2_factor: f64) -> f64 {
    liters_to_tons(fuel_liters) * co2_factor * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn curve() -> Vec<FuelCurveSample> {
        vec![
            FuelCurveSample::new(12.0, 2.0),
            FuelCurveSample::new(16.0, 3.5),
            FuelCurveSample::new(20.0, 5.0),
        ]
    }

    #[rstest]
    #[case(Some(15.0), 16.0)]
    #[case(Some(30.0), 20.0)]
    #[case(None, 16.0)]
    fn operating_point_selection(#[case] speed: Option<f64>, #[case] expected: f64) {
        let sample = operating_point(&curve(), speed).expect("curve has samples");
        assert!((sample.speed_knots - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn equidistant_samples_keep_first_match() {
        let sample = operating_point(&curve(), Some(14.0)).expect("curve has samples");
        assert!((sample.speed_knots - 12.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn cruising_rate_divides_consumption_by_speed_in_kmh() {
        let profile = VesselProfile::new("Test", vec![FuelCurveSample::new(20.0, 5.0)])
            .with_cruising_speed(20.0);
        let performance = VesselPerformance::from_profile(&profile);
        let expected = 5.0 / (20.0 * 1.852) * LITERS_PER_TON;
        assert!((performance.fuel_liters_per_km - expected).abs() < 1e-9);
        assert!((performance.average_speed_kmh() - 37.04).abs() < 1e-9);
    }

    #[rstest]
    fn empty_curve_uses_defaults() {
        let performance = VesselPerformance::from_profile(&VesselProfile::new("Ghost", vec![]));
        assert!((performance.speed_knots - DEFAULT_CRUISING_SPEED_KNOTS).abs() < f64::EPSILON);
        assert!((performance.fuel_liters_per_km - DEFAULT_FUEL_LITERS_PER_KM).abs() < f64::EPSILON);
        assert!((performance.idle_rate_lph - DEFAULT_IDLE_RATE_LPH).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(0.0, 20.0)]
    #[case(12_500.0, 35.0)]
    #[case(25_000.0, 50.0)]
    #[case(100_000.0, 200.0)]
    #[case(200_000.0, 500.0)]
    #[case(400_000.0, 1500.0)]
    #[case(900_000.0, 1500.0)]
    fn tonnage_bands_interpolate(#[case] gross_tonnage: f64, #[case] expected: f64) {
        assert!((tonnage_idle_rate(gross_tonnage) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn blends_tonnage_and_power() {
        let rate = idle_rate_lph(Some(100_000.0), Some(50.0));
        assert!((rate - (200.0 * 0.8 + 600.0 * 0.2)).abs() < 1e-9);
    }

    #[rstest]
    fn profile_serializes_in_camel_case() {
        let profile = VesselProfile::new("Feeder", curve())
            .with_cruising_speed(16.0)
            .with_gross_tonnage(30_000.0);
        let json = serde_json::to_value(&profile).expect("serialize profile");
        assert_eq!(json["cruisingSpeedKnots"], 16.0);
        assert_eq!(json["grossTonnage"], 30_000.0);
        assert_eq!(json["fuelCurve"][0]["speedKnots"], 12.0);
        assert!(json.get("fuel_curve").is_none());

        let back: VesselProfile = serde_json::from_value(json).expect("deserialize profile");
        assert_eq!(back, profile);
    }

    #[rstest]
    fn co2_uses_hfo_density() {
        let kg = co2_kg(LITERS_PER_TON, 3.1);
        assert!((kg - 3100.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn idle_rate_is_monotonic_and_clamped(
            gt_a in 0.0_f64..600_000.0,
            gt_b in 0.0_f64..600_000.0,
            power in proptest::option::of(0.0_f64..300.0),
        ) {
            let (low, high) = if gt_a <= gt_b { (gt_a, gt_b) } else { (gt_b, gt_a) };
            let low_rate = idle_rate_lph(Some(low), power);
            let high_rate = idle_rate_lph(Some(high), power);
            prop_assert!(low_rate <= high_rate + 1e-9);
            prop_assert!((MIN_IDLE_RATE_LPH..=MAX_IDLE_RATE_LPH).contains(&low_rate));
            prop_assert!((MIN_IDLE_RATE_LPH..=MAX_IDLE_RATE_LPH).contains(&high_rate));
        }
    }
}
