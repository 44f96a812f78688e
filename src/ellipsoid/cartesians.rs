use super::*;
use crate::coordinate::Coor4D;
use std::f64::consts::FRAC_PI_2;

/// Upper bound on the number of latitude refinements in [`Ellipsoid::geographic`]
pub const MAX_ITERATIONS: usize = 10;

/// Latitude refinement stops when the update is smaller than this (radians)
pub const LATITUDE_TOLERANCE: f64 = 1e-12;

impl Ellipsoid {
    // ----- Cartesian <--> Geographic conversion ----------------------------------

    /// Geographic to cartesian conversion. The input is the internal coordinate
    /// representation: longitude and latitude in radians, followed by ellipsoidal
    /// height in meters. The fourth coordinate is passed through untouched.
    #[must_use]
    #[allow(non_snake_case)] // make it possible to mimic math notation
    pub fn cartesian(&self, geographic: &Coor4D) -> Coor4D {
        let lam = geographic[0];
        let phi = geographic[1];
        let h = geographic[2];
        let t = geographic[3];

        let N = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;

        Coor4D::raw(X, Y, Z, t)
    }

    /// Cartesian to geographic conversion.
    ///
    /// Fixed point iteration on the latitude, seeded by the geocentric
    /// latitude scaled by 1/(1 - e²). The iteration ends after
    /// [`MAX_ITERATIONS`] rounds, or as soon as the latitude update drops below
    /// [`LATITUDE_TOLERANCE`], whichever comes first. At terrestrial heights,
    /// convergence to below a nanoradian takes 3-4 rounds.
    ///
    /// The height is computed from Bowring's expression,
    /// *h = p·cos φ + Z·sin φ - a²/N*, which, unlike the textbook
    /// *h = p/cos φ - N*, stays well behaved towards the poles.
    ///
    /// The centre of the ellipsoid has no geographic representation,
    /// and maps to NaN.
    #[must_use]
    #[allow(non_snake_case)] // make it possible to mimic math notation
    pub fn geographic(&self, cartesian: &Coor4D) -> Coor4D {
        let X = cartesian[0];
        let Y = cartesian[1];
        let Z = cartesian[2];
        let t = cartesian[3];

        let a = self.semimajor_axis();
        let b = self.semiminor_axis();
        let es = self.eccentricity_squared();

        // The longitude is straightforward
        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis
        let p = X.hypot(Y);

        // Close to the Z-axis, the iteration breaks down, but there, the
        // latitude is necessarily close to one of the poles. So we force
        // it to the relevant pole, and compute the height as |Z| - b
        if p < a * 1e-16 {
            if Z == 0.0 {
                return Coor4D::raw(f64::NAN, f64::NAN, f64::NAN, t);
            }
            let phi = FRAC_PI_2.copysign(Z);
            let h = Z.abs() - b;
            return Coor4D::raw(lam, phi, h, t);
        }

        let mut phi = Z.atan2(p * (1.0 - es));
        for _ in 0..MAX_ITERATIONS {
            let sinphi = phi.sin();
            let N = a / (1.0 - es * sinphi * sinphi).sqrt();
            let next = (Z + es * N * sinphi).atan2(p);
            let delta = (next - phi).abs();
            phi = next;
            if delta < LATITUDE_TOLERANCE {
                break;
            }
        }

        let (sinphi, cosphi) = phi.sin_cos();
        let N = a / (1.0 - es * sinphi * sinphi).sqrt();
        let h = p * cosphi + Z * sinphi - a * a / N;

        Coor4D::raw(lam, phi, h, t)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::AngularUnits;

    #[test]
    fn geo_to_cart() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        // Roundtrip geographic <-> cartesian
        let geo = Coor4D::geo(55., 12., 100., 0.);
        let cart = ellps.cartesian(&geo);
        let geo2 = ellps.geographic(&cart);
        assert_eq!(geo[0], geo2[0]);
        assert!((geo[1] - geo2[1]).abs() < 1.0e-12);
        assert!((geo[2] - geo2[2]).abs() < 1.0e-9);
        Ok(())
    }

    // Spot check against the closed form, for a point in Sabah
    #[test]
    fn kota_kinabalu() {
        let ellps = Ellipsoid::WGS84;
        let geo = Coor4D::geo(5.573408816, 116.035751582, 48.502, 0.);
        let cart = ellps.cartesian(&geo);
        assert!((cart[0] + 2_786_442.185_052_005).abs() < 1e-6);
        assert!((cart[1] - 5_704_016.964_098_195).abs() < 1e-6);
        assert!((cart[2] - 615_328.344_367_045_8).abs() < 1e-6);
    }

    #[test]
    fn roundtrip_grid() {
        for ellps in [
            Ellipsoid::WGS84,
            Ellipsoid::GRS80,
            Ellipsoid::EVEREST_1830_MODIFIED,
        ] {
            for lat in [-75., -45., -10., 0., 4., 7.5, 30., 60., 85.] {
                for lon in [-170., -90., 0., 109.5, 115., 119.25, 179.] {
                    for h in [-100., 0., 48.502, 4095., 10_000.] {
                        let geo = Coor4D::geo(lat, lon, h, 0.);
                        let back = ellps.geographic(&ellps.cartesian(&geo)).to_geo();
                        assert!((back[0] - lat).abs() < 1e-9);
                        assert!((back[1] - lon).abs() < 1e-9);
                        assert!((back[2] - h).abs() < 1e-6);
                    }
                }
            }
        }
    }

    #[test]
    fn poles_and_centre() {
        let ellps = Ellipsoid::EVEREST_1830_MODIFIED;
        let b = ellps.semiminor_axis();

        let north = ellps.geographic(&Coor4D::raw(0., 0., b + 100., 0.));
        assert_eq!(north[1], FRAC_PI_2);
        assert!((north[2] - 100.).abs() < 1e-8);

        let south = ellps.geographic(&Coor4D::raw(0., 0., -b, 0.));
        assert_eq!(south[1], -FRAC_PI_2);
        assert!(south[2].abs() < 1e-8);

        // Forward at the pole is degenerate, but finite
        let cart = ellps.cartesian(&Coor4D::geo(90., 0., 0., 0.));
        assert!(cart[0].abs() < 1e-6);
        assert!((cart[2] - b).abs() < 1e-6);

        // The centre of the Earth has no latitude
        let centre = ellps.geographic(&Coor4D::origin());
        assert!(centre[0].is_nan() && centre[1].is_nan() && centre[2].is_nan());
    }
}
