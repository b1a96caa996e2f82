use super::FunctionTable;
use crate::error::CalcError;
use safecalc_macros::calc_fn;

pub(super) fn register(table: &mut FunctionTable) {
    table.register("sin", sin);
    table.register("cos", cos);
    table.register("tan", tan);
}

// Angles are in radians.

#[calc_fn]
pub fn sin(x: f64) -> Result<f64, CalcError> {
    Ok(x.sin())
}

#[calc_fn]
pub fn cos(x: f64) -> Result<f64, CalcError> {
    Ok(x.cos())
}

#[calc_fn]
pub fn tan(x: f64) -> Result<f64, CalcError> {
    Ok(x.tan())
}
