use super::FunctionTable;
use crate::error::CalcError;
use safecalc_macros::calc_fn;

pub(super) fn register(table: &mut FunctionTable) {
    table.register("sqrt", sqrt);
    table.register("log", log);
    table.register("log2", log2);
    table.register("log10", log10);
    table.register("exp", exp);
}

fn require_positive(function: &str, x: f64) -> Result<(), CalcError> {
    if x > 0.0 {
        Ok(())
    } else {
        Err(CalcError::Domain(format!(
            "{}() is only defined for positive values, got {}",
            function, x
        )))
    }
}

#[calc_fn]
pub fn sqrt(x: f64) -> Result<f64, CalcError> {
    if x < 0.0 {
        return Err(CalcError::Domain(format!(
            "sqrt() is not defined for negative values, got {}",
            x
        )));
    }
    Ok(x.sqrt())
}

/// Natural logarithm.
#[calc_fn]
pub fn log(x: f64) -> Result<f64, CalcError> {
    require_positive("log", x)?;
    Ok(x.ln())
}

#[calc_fn]
pub fn log2(x: f64) -> Result<f64, CalcError> {
    require_positive("log2", x)?;
    Ok(x.log2())
}

#[calc_fn]
pub fn log10(x: f64) -> Result<f64, CalcError> {
    require_positive("log10", x)?;
    Ok(x.log10())
}

#[calc_fn]
pub fn exp(x: f64) -> Result<f64, CalcError> {
    let value = x.exp();
    if value.is_infinite() {
        return Err(CalcError::Domain(format!(
            "exp({}) is too large to represent",
            x
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::E;

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(&[16.0]), Ok(4.0));
        assert_eq!(sqrt(&[0.0]), Ok(0.0));
        assert_eq!(sqrt(&[-1.0]).map_err(|e| e.kind()), Err(ErrorKind::DomainError));
    }

    #[test]
    fn test_logarithms() {
        assert_abs_diff_eq!(log(&[E]).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(log2(&[8.0]).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(log10(&[1000.0]).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_logarithms_reject_non_positive() {
        for function in [log, log2, log10] {
            assert_eq!(function(&[0.0]).map_err(|e| e.kind()), Err(ErrorKind::DomainError));
            assert_eq!(function(&[-3.0]).map_err(|e| e.kind()), Err(ErrorKind::DomainError));
        }
    }

    #[test]
    fn test_exp() {
        assert_eq!(exp(&[0.0]), Ok(1.0));
        assert_eq!(
            exp(&[1000.0]),
            Err(CalcError::Domain("exp(1000) is too large to represent".to_string()))
        );
        assert_eq!(exp(&[-1000.0]), Ok(0.0));
    }
}
