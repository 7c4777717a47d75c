/// How decimal numbers that exceed native precision or magnitude are
/// materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BigDecLoad {
    /// Scanner heuristic: numbers that fit `i64`/`f64` precision stay
    /// native; anything bigger escalates to arbitrary precision.
    Auto,
    /// Force every decimal onto the arbitrary-precision path.
    BigDec,
    /// Decode even escalated decimals as native `f64`, trading precision
    /// for uniformity.
    FloatDec,
}

/// Parser configuration options.
///
/// Example: parse with a forced big-decimal mode and a tighter nesting cap.
///
/// ```rust
/// use jsox::{BigDecLoad, Options, Value};
///
/// let options = Options {
///     bigdec_load: BigDecLoad::BigDec,
///     ..Options::default()
/// };
///
/// let v: Value = jsox::from_str_with_options("1.5", &options).unwrap();
/// assert!(matches!(v, Value::BigDecimal(_)));
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    /// Rendering policy for decimals; see [`BigDecLoad`].
    pub bigdec_load: BigDecLoad,
    /// Maximum container nesting depth. The driver is a flat loop, so this
    /// bounds heap growth on pathological inputs, not the call stack.
    /// Use `usize::MAX` to disable.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bigdec_load: BigDecLoad::Auto,
            max_depth: 2_000,
        }
    }
}
