use serde::Serializer;

/// Largest float that still converts to `i64` without loss.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Serialize a coordinate the way a JavaScript client would: integral values
/// without a fractional part, everything else as a float.
pub fn serialize_number<S>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
