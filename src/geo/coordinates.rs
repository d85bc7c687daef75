//! Text forms of coordinates found in flight plans: degrees/minutes
//! (`N5530.3`, `W02000.0`) and ARINC 424 short labels (`55N020W`, `N5520`).

use crate::geo::error::CoordinateParseError;

fn malformed(token: &str) -> CoordinateParseError {
    CoordinateParseError::Malformed {
        token: token.to_string(),
    }
}

fn invalid_number(token: &str) -> CoordinateParseError {
    CoordinateParseError::InvalidNumber {
        token: token.to_string(),
    }
}

fn slice<'a>(token: &'a str, from: usize, to: usize) -> Result<&'a str, CoordinateParseError> {
    token.get(from..to).ok_or_else(|| malformed(token))
}

fn parse_int(digits: &str, token: &str) -> Result<u32, CoordinateParseError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_number(token));
    }
    digits.parse().map_err(|_| invalid_number(token))
}

// Plain `ddd` or `ddd.d` text: no sign, exponent, `inf` or `NaN`.
fn is_decimal(text: &str) -> bool {
    let mut parts = text.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Converts a signed degrees/minutes value into decimal degrees.
///
/// `N5500.0` gives `55.0`, `W02000.0` gives `-20.0`. Latitudes carry two
/// degree digits, longitudes three.
pub fn dm_to_decimal(token: &str) -> Result<f64, CoordinateParseError> {
    if !token.is_ascii() || token.len() < 2 {
        return Err(malformed(token));
    }
    let (sign, offset) = match token.as_bytes()[0] {
        b'N' => (1.0, 3),
        b'S' => (-1.0, 3),
        b'E' => (1.0, 4),
        b'W' => (-1.0, 4),
        _ => {
            return Err(CoordinateParseError::InvalidHemisphere {
                token: token.to_string(),
            })
        }
    };
    let degrees = parse_int(slice(token, 1, offset)?, token)?;
    let minutes_text = slice(token, offset, token.len())?;
    if !is_decimal(minutes_text) {
        return Err(invalid_number(token));
    }
    let minutes: f64 = minutes_text.parse().map_err(|_| invalid_number(token))?;
    if minutes >= 60.0 {
        return Err(CoordinateParseError::OutOfRange {
            token: token.to_string(),
        });
    }
    let value = f64::from(degrees) + minutes / 60.0;
    let limit = if offset == 3 { 90.0 } else { 180.0 };
    if value > limit {
        return Err(CoordinateParseError::OutOfRange {
            token: token.to_string(),
        });
    }
    Ok(sign * value)
}

/// Parses a packed `N4038.4W07346.7` pair into `(latitude, longitude)`.
pub fn parse_degrees_minutes(text: &str) -> Result<(f64, f64), CoordinateParseError> {
    if !text.is_ascii() || text.len() < 8 {
        return Err(malformed(text));
    }
    let (latitude, longitude) = text.split_at(7);
    parse_degrees_minutes_pair(latitude, longitude)
}

/// Parses split `("N4038.4", "W07346.7")` values into `(latitude, longitude)`.
pub fn parse_degrees_minutes_pair(
    latitude: &str,
    longitude: &str,
) -> Result<(f64, f64), CoordinateParseError> {
    if !latitude.starts_with(['N', 'S']) {
        return Err(CoordinateParseError::InvalidHemisphere {
            token: latitude.to_string(),
        });
    }
    if !longitude.starts_with(['E', 'W']) {
        return Err(CoordinateParseError::InvalidHemisphere {
            token: longitude.to_string(),
        });
    }
    Ok((dm_to_decimal(latitude)?, dm_to_decimal(longitude)?))
}

// Half-degree labels (`N5520`, `5N520`) put the quadrant in the letter:
// N is NW, E is NE, S is SE, W is SW.
fn quadrant(
    letter: u8,
    latitude: f64,
    longitude: f64,
    token: &str,
) -> Result<(f64, f64), CoordinateParseError> {
    match letter {
        b'N' => Ok((latitude, -longitude)),
        b'E' => Ok((latitude, longitude)),
        b'S' => Ok((-latitude, longitude)),
        b'W' => Ok((-latitude, -longitude)),
        _ => Err(CoordinateParseError::InvalidHemisphere {
            token: token.to_string(),
        }),
    }
}

/// Parses an ARINC 424 coordinate label into `(latitude, longitude)`.
///
/// Supported layouts:
/// * `55N020W`: whole degrees.
/// * `5530N020W` and `5530N02030W`: degrees and minutes.
/// * `N5520`: half degree of latitude, longitude below 100.
/// * `5N520`: half degree of latitude, longitude of 100 and above.
pub fn parse_arinc_label(label: &str) -> Result<(f64, f64), CoordinateParseError> {
    if !label.is_ascii() || label.len() < 5 {
        return Err(malformed(label));
    }
    let bytes = label.as_bytes();
    let is_quadrant = |b: u8| matches!(b, b'N' | b'E' | b'S' | b'W');

    if is_quadrant(bytes[0]) {
        if label.len() != 5 {
            return Err(malformed(label));
        }
        let latitude = f64::from(parse_int(slice(label, 1, 3)?, label)?) + 0.5;
        let longitude = f64::from(parse_int(slice(label, 3, 5)?, label)?);
        return quadrant(bytes[0], latitude, longitude, label);
    }
    if is_quadrant(bytes[1]) {
        if label.len() != 5 {
            return Err(malformed(label));
        }
        let tens = slice(label, 0, 1)?;
        let units = slice(label, 2, 3)?;
        let latitude = f64::from(parse_int(&format!("{tens}{units}"), label)?) + 0.5;
        let longitude = 100.0 + f64::from(parse_int(slice(label, 3, 5)?, label)?);
        return quadrant(bytes[1], latitude, longitude, label);
    }

    let last = slice(label, label.len() - 1, label.len())?;
    if matches!(bytes[4], b'N' | b'S') {
        // 5530N020W or 5530N02030W
        let latitude =
            dm_to_decimal(&format!("{}{}.0", slice(label, 4, 5)?, slice(label, 0, 4)?))?;
        let raw_longitude = slice(label, 5, label.len() - 1)?;
        if raw_longitude.len() > 5 {
            return Err(malformed(label));
        }
        let longitude = dm_to_decimal(&format!("{last}{raw_longitude:0<5}.0"))?;
        return Ok((latitude, longitude));
    }
    // 55N020W
    let latitude =
        dm_to_decimal(&format!("{}{}00.0", slice(label, 2, 3)?, slice(label, 0, 2)?))?;
    let longitude =
        dm_to_decimal(&format!("{last}{}00.0", slice(label, 3, label.len() - 1)?))?;
    Ok((latitude, longitude))
}

struct DegreesMinutes {
    degrees: u32,
    minutes: u32,
    tenths: u32,
}

fn split_degrees(value: f64) -> DegreesMinutes {
    let value = value.abs();
    let degrees = value.floor();
    let rest = (value - degrees) * 60.0;
    let minutes = rest.floor();
    DegreesMinutes {
        degrees: degrees as u32,
        minutes: minutes as u32,
        tenths: ((rest - minutes) * 10.0).round() as u32,
    }
}

fn carry(mut dm: DegreesMinutes, round_up_above: u32) -> DegreesMinutes {
    if dm.tenths > round_up_above {
        dm.tenths = 0;
        dm.minutes += 1;
    }
    if dm.minutes >= 60 {
        dm.minutes = 0;
        dm.degrees += 1;
    }
    dm
}

// Zero longitude is written West, zero latitude North.
fn hemispheres(latitude: f64, longitude: f64) -> (char, char) {
    (
        if latitude >= 0.0 { 'N' } else { 'S' },
        if longitude > 0.0 { 'E' } else { 'W' },
    )
}

/// Degrees, minutes and tenths of minutes: `N4530.5E00118.0`.
pub fn format_dm(latitude: f64, longitude: f64) -> String {
    let (ns, ew) = hemispheres(latitude, longitude);
    let lat = carry(split_degrees(latitude), 9);
    let lon = carry(split_degrees(longitude), 9);
    format!(
        "{ns}{:02}{:02}.{}{ew}{:03}{:02}.{}",
        lat.degrees, lat.minutes, lat.tenths, lon.degrees, lon.minutes, lon.tenths
    )
}

/// Degrees and whole minutes: `N4530E00118`.
pub fn format_rounded_dm(latitude: f64, longitude: f64) -> String {
    let (ns, ew) = hemispheres(latitude, longitude);
    let lat = carry(split_degrees(latitude), 5);
    let lon = carry(split_degrees(longitude), 5);
    format!(
        "{ns}{:02}{:02}{ew}{:03}{:02}",
        lat.degrees, lat.minutes, lon.degrees, lon.minutes
    )
}
