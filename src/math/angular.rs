/// Simplistic transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. No sanity check: Sign taken from degree-component,
/// minutes forced to unsigned by u16 type, but passing a negative value for
/// seconds leads to undefined behaviour.
pub fn dms_to_dd(d: i32, m: u16, s: f64) -> f64 {
    d.signum() as f64 * (d.abs() as f64 + (m as f64 + s / 60.) / 60.)
}

/// Parse an angle given either in degrees-with-decimals, or in the
/// colon separated sexagesimal form `[-]DD:MM[:SS.sss]`, e.g. `53:18:56.9537`.
/// Returns `None` for anything else.
pub fn parse_sexagesimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(dd) = text.parse::<f64>() {
        return Some(dd);
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };

    let mut parts = Vec::new();
    for part in unsigned.split(':') {
        let value = part.parse::<f64>().ok()?;
        if value < 0. {
            return None;
        }
        parts.push(value);
    }
    if parts.len() < 2 || parts.len() > 3 || parts[1] >= 60. {
        return None;
    }
    let seconds = parts.get(2).copied().unwrap_or(0.);
    if seconds >= 60. {
        return None;
    }
    Some(sign * (parts[0] + (parts[1] + seconds / 60.) / 60.))
}

/// Format an angle in degrees-with-decimals as degrees, minutes and
/// seconds, e.g. `5° 34' 24.2717" N`. The sign is represented by
/// the hemisphere letter: N/S for latitudes, E/W for longitudes.
///
/// The seconds are rounded to 4 decimals *before* formatting, with
/// the rounding carried into the minutes and degrees, so a value just
/// below a whole degree is rendered as the whole degree, never as 60
/// minutes or 60 seconds.
///
/// # Examples
///
/// ```
/// use borneo_geodesy::decimal_to_dms;
/// assert_eq!(decimal_to_dms(5.573408816, true), "5° 34' 24.2717\" N");
/// assert_eq!(decimal_to_dms(-116.5, false), "116° 30' 0.0000\" W");
/// ```
pub fn decimal_to_dms(degrees: f64, is_latitude: bool) -> String {
    let hemisphere = match (is_latitude, degrees < 0.) {
        (true, false) => 'N',
        (true, true) => 'S',
        (false, false) => 'E',
        (false, true) => 'W',
    };

    let dd = degrees.abs();
    let mut d = dd.floor();
    let mut m = ((dd - d) * 60.).floor();
    let mut s = (dd - d - m / 60.) * 3600.;

    // Round to the displayed resolution, then carry
    s = (s * 1e4).round() / 1e4;
    if s >= 60. {
        s -= 60.;
        m += 1.;
    }
    if m >= 60. {
        m -= 60.;
        d += 1.;
    }

    format!("{}° {}' {:.4}\" {}", d as i64, m as i64, s, hemisphere)
}

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    use std::f64::consts::PI;
    let angle = (angle + PI) % (2.0 * PI);
    angle - PI * angle.signum()
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angular() {
        assert_eq!(dms_to_dd(55, 30, 36.), 55.51);
        assert_eq!(dms_to_dd(-55, 30, 36.), -55.51);

        assert_eq!(parse_sexagesimal("55.51"), Some(55.51));
        assert_eq!(parse_sexagesimal("55:30:36"), Some(55.51));
        assert_eq!(parse_sexagesimal("-55:30:36"), Some(-55.51));
        assert_eq!(parse_sexagesimal("55:30.6"), Some(55.51));
        let alpha = parse_sexagesimal("53:18:56.9537").unwrap_or_default();
        assert!((alpha - 53.315_820_472_222_22).abs() < 1e-12);

        assert_eq!(parse_sexagesimal("55:61:00"), None);
        assert_eq!(parse_sexagesimal("55:30:60"), None);
        assert_eq!(parse_sexagesimal("55"), Some(55.));
        assert_eq!(parse_sexagesimal("fiftyfive"), None);
        assert_eq!(parse_sexagesimal("1:2:3:4"), None);

        let pi = std::f64::consts::PI;
        assert!((normalize_symmetric(3. * pi / 2.) + pi / 2.).abs() < 1e-14);
        assert!((normalize_symmetric(-3. * pi / 2.) - pi / 2.).abs() < 1e-14);
        assert_eq!(normalize_symmetric(1.), 1.);
    }

    #[test]
    fn dms_formatting() {
        assert_eq!(decimal_to_dms(5.573408816, true), "5° 34' 24.2717\" N");
        assert_eq!(decimal_to_dms(116.035751582, false), "116° 2' 8.7057\" E");
        assert_eq!(decimal_to_dms(-5.573408816, true), "5° 34' 24.2717\" S");
        assert_eq!(decimal_to_dms(-0.5, false), "0° 30' 0.0000\" W");
        assert_eq!(decimal_to_dms(0., true), "0° 0' 0.0000\" N");

        // Just below a whole minute, but still above the rounding threshold
        assert_eq!(decimal_to_dms(5.9999999, true), "5° 59' 59.9996\" N");

        // Seconds rounding to 60 carry into minutes, and minutes into degrees
        assert_eq!(decimal_to_dms(5.99999999, true), "6° 0' 0.0000\" N");
        assert_eq!(decimal_to_dms(5.5 - 1e-9, true), "5° 30' 0.0000\" N");
    }
}
