use super::FunctionTable;
use crate::error::CalcError;
use safecalc_macros::calc_fn;

// 171! overflows f64.
const MAX_FACTORIAL: f64 = 170.0;

pub(super) fn register(table: &mut FunctionTable) {
    table.register("abs", abs);
    table.register("round", round);
    table.register("factorial", factorial);
}

#[calc_fn]
pub fn abs(x: f64) -> Result<f64, CalcError> {
    Ok(x.abs())
}

/// Rounds half to even. With `digits`, rounds to that many decimal places;
/// negative `digits` round to tens, hundreds and so on.
#[calc_fn]
pub fn round(x: f64, digits: Option<f64>) -> Result<f64, CalcError> {
    let Some(digits) = digits else {
        return Ok(x.round_ties_even());
    };
    if digits.fract() != 0.0 {
        return Err(CalcError::Domain(format!(
            "round() precision must be an integer, got {}",
            digits
        )));
    }
    if digits > f64::MAX_10_EXP as f64 {
        return Ok(x);
    }
    if digits < -(f64::MAX_10_EXP as f64) {
        return Ok(0.0);
    }

    let digits = digits as i32;
    if digits >= 0 {
        // Formatting rounds the exact binary value: 2.675 is stored just
        // below the half and stays 2.67.
        let rounded = format!("{:.*}", digits as usize, x);
        rounded.parse::<f64>().map_err(|e| {
            CalcError::Domain(format!("round() produced an invalid number '{}': {}", rounded, e))
        })
    } else {
        let factor = 10f64.powi(-digits);
        Ok((x / factor).round_ties_even() * factor)
    }
}

#[calc_fn]
pub fn factorial(n: f64) -> Result<f64, CalcError> {
    if n.fract() != 0.0 {
        return Err(CalcError::Domain(format!(
            "factorial() only accepts integral values, got {}",
            n
        )));
    }
    if n < 0.0 {
        return Err(CalcError::Domain(format!(
            "factorial() is not defined for negative values, got {}",
            n
        )));
    }
    if n > MAX_FACTORIAL {
        return Err(CalcError::Domain(format!(
            "factorial({}) is too large to represent",
            n
        )));
    }
    Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_abs() {
        assert_eq!(abs(&[-2.5]), Ok(2.5));
        assert_eq!(abs(&[3.0]), Ok(3.0));
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round(&[2.5]), Ok(2.0));
        assert_eq!(round(&[3.5]), Ok(4.0));
        assert_eq!(round(&[-2.5]), Ok(-2.0));
        assert_eq!(round(&[2.4]), Ok(2.0));
    }

    #[test]
    fn test_round_with_precision() {
        assert_eq!(round(&[3.14159, 2.0]), Ok(3.14));
        assert_eq!(round(&[1234.0, -2.0]), Ok(1200.0));
        assert_eq!(round(&[1.5, 400.0]), Ok(1.5));
        assert_eq!(round(&[1.5, -400.0]), Ok(0.0));
        assert_eq!(round(&[1e300, 5.0]), Ok(1e300));
        assert_eq!(
            round(&[1.0, 0.5]).map_err(|e| e.kind()),
            Err(ErrorKind::DomainError)
        );
    }

    #[test]
    fn test_round_uses_the_stored_value() {
        assert_eq!(round(&[2.675, 2.0]), Ok(2.67));
        assert_eq!(round(&[0.125, 2.0]), Ok(0.12));
        assert_eq!(round(&[0.375, 2.0]), Ok(0.38));
        assert_eq!(round(&[1.005, 2.0]), Ok(1.0));
        assert_eq!(round(&[-2.675, 2.0]), Ok(-2.67));
        assert_eq!(round(&[2.5, 0.0]), Ok(2.0));
    }

    #[test]
    fn test_round_arity() {
        assert_eq!(
            round(&[1.0, 2.0, 3.0]),
            Err(CalcError::Arity {
                function: "round".to_string(),
                min: 1,
                max: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(&[0.0]), Ok(1.0));
        assert_eq!(factorial(&[1.0]), Ok(1.0));
        assert_eq!(factorial(&[5.0]), Ok(120.0));
        assert_eq!(factorial(&[20.0]), Ok(2432902008176640000.0));
        assert!(factorial(&[170.0]).unwrap().is_finite());
    }

    #[test]
    fn test_factorial_domain() {
        for n in [-1.0, 2.5, -0.5, 171.0, 1e300] {
            assert_eq!(
                factorial(&[n]).map_err(|e| e.kind()),
                Err(ErrorKind::DomainError),
                "factorial({})",
                n
            );
        }
    }
}
