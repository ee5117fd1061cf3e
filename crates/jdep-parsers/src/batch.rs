use jdep_core::types::ClassRecord;
use rayon::prelude::*;

use crate::classfile::{decode, DecodeError};
use crate::walker::ClassUnit;

/// Decode every unit in parallel. Results line up with `units`.
pub fn decode_all(units: &[ClassUnit]) -> Vec<Result<ClassRecord, DecodeError>> {
    units.par_iter().map(|unit| decode(&unit.bytes)).collect()
}
