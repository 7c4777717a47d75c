//! Number scanner and materialization.
//!
//! The scanner does not allocate. It accumulates just enough state to pick
//! one of three materialization paths (native integer, native float,
//! arbitrary precision) and keeps the original digit slice so the big paths
//! can be constructed losslessly without re-lexing.
//!
//! Escalation to `big` is sticky: once precision, magnitude or exponent
//! limits are crossed mid-scan, the number stays on the arbitrary-precision
//! path no matter what the remaining digits look like.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::Error;
use crate::options::{BigDecLoad, Options};
use crate::reader::Reader;

/// Significant decimal digits (trailing zeros excluded) a native `f64`
/// conversion is trusted with.
const MAX_NATIVE_DIGITS: u32 = 14;
/// Decimal exponent bound beyond which native floats are no longer exact
/// enough.
const MAX_NATIVE_EXP: i32 = 1023;

/// Everything the scanner learned about one number literal.
///
/// Handlers receive this by reference and usually call
/// [`NumInfo::materialize`]; the accessors exist for handlers that build
/// their own numeric domain.
pub struct NumInfo<'a> {
    /// Original textual form, straight from the input window.
    text: &'a [u8],
    /// Integer-digit accumulator, valid while `big` is unset.
    i: u64,
    /// Fractional accumulator and its divisor, so `frac = num / div`.
    num: u64,
    div: u64,
    /// Signed decimal exponent.
    exp: i32,
    /// Significant digit count, trailing zeros excluded.
    dec_cnt: u32,
    big: bool,
    infinity: bool,
    nan: bool,
    neg: bool,
    /// Client preference: decode escalated decimals as native floats.
    no_big: bool,
}

/// A materialized numeric value.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    BigInt(BigInt),
    BigDec(BigDecimal),
}

impl<'a> NumInfo<'a> {
    /// A synthesized `NaN` literal, used by the driver's bare-word dispatch.
    /// The sign stays positive there; `-NaN` only arrives through the
    /// scanner's leading-sign path.
    pub(crate) fn nan(text: &'a [u8]) -> Self {
        NumInfo {
            text,
            i: 0,
            num: 0,
            div: 1,
            exp: 0,
            dec_cnt: 0,
            big: false,
            infinity: false,
            nan: true,
            neg: false,
            no_big: false,
        }
    }

    /// Original textual form of the literal.
    pub fn text(&self) -> &'a [u8] {
        self.text
    }

    /// True once the literal committed to the arbitrary-precision path.
    pub fn is_big(&self) -> bool {
        self.big
    }

    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    pub fn is_nan(&self) -> bool {
        self.nan
    }

    pub fn is_negative(&self) -> bool {
        self.neg
    }

    /// Map the scanned literal to a numeric value.
    ///
    /// - `Infinity`/`NaN` become the matching non-finite floats.
    /// - Whole numbers become `Int`, or `BigInt` after escalation.
    /// - Decimals become `Float`, or `BigDec` after escalation, unless the
    ///   client asked for floats, in which case the exact decimal is built
    ///   first and then coerced.
    pub fn materialize(&self) -> Number {
        if self.infinity {
            Number::Float(if self.neg {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            })
        } else if self.nan {
            Number::Float(f64::NAN)
        } else if self.div == 1 && self.exp == 0 {
            if self.big {
                Number::BigInt(parse_big_int(self.text))
            } else {
                let v = self.i as i64;
                Number::Int(if self.neg { -v } else { v })
            }
        } else if self.big {
            let dec = parse_big_dec(self.text);
            if self.no_big {
                let fallback = if self.neg {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                };
                Number::Float(dec.to_f64().unwrap_or(fallback))
            } else {
                Number::BigDec(dec)
            }
        } else {
            let mut d = self.i as f64 + self.num as f64 / self.div as f64;
            if self.neg {
                d = -d;
            }
            if self.exp != 0 {
                d *= 10f64.powi(self.exp);
            }
            Number::Float(d)
        }
    }
}

/// The scanner validated the digit shape, so these parses cannot fail; the
/// zero fallbacks keep the crate panic-free regardless.
fn parse_big_int(text: &[u8]) -> BigInt {
    // A lenient trailing dot ("1.") may reach the integer path.
    let digits = text.strip_suffix(b".").unwrap_or(text);
    BigInt::parse_bytes(digits, 10).unwrap_or_else(|| BigInt::from(0))
}

fn parse_big_dec(text: &[u8]) -> BigDecimal {
    std::str::from_utf8(text)
        .ok()
        .and_then(|s| BigDecimal::from_str(s).ok())
        .unwrap_or_else(|| BigDecimal::from(0))
}

/// Scan one number literal. The first byte (sign, digit, `I` or `N`) has
/// already been consumed by the driver's dispatch.
///
/// On return the reader is positioned so the byte after the literal is the
/// next to be read.
pub(crate) fn read_number<'a>(
    reader: &mut Reader<'a>,
    first: u8,
    options: &Options,
) -> Result<NumInfo<'a>, Error> {
    let start = reader.offset() - 1;
    let mut info = NumInfo {
        text: &[],
        i: 0,
        num: 0,
        div: 1,
        exp: 0,
        dec_cnt: 0,
        big: false,
        infinity: false,
        nan: false,
        neg: false,
        no_big: options.bigdec_load == BigDecLoad::FloatDec,
    };

    let mut b = first;
    match b {
        b'-' => {
            info.neg = true;
            b = reader.get();
        }
        b'+' => {
            b = reader.get();
        }
        _ => {}
    }

    if b == b'I' {
        if !reader.expect(b"nfinity") {
            return Err(Error::NotANumber {
                location: reader.location(),
            });
        }
        info.infinity = true;
    } else if b == b'N' || b == b'n' {
        // `NaN` with a lenient final letter: `NaN` or `Nan` (and the
        // lowercase leads only via the sign path).
        let a = reader.get();
        let last = reader.get();
        if a != b'a' || !(last == b'N' || last == b'n') {
            return Err(Error::NotANumber {
                location: reader.location(),
            });
        }
        info.nan = true;
    } else {
        let mut zero_cnt: u32 = 0;
        let mut any_digit = false;

        while b.is_ascii_digit() {
            any_digit = true;
            info.dec_cnt += 1;
            if !info.big {
                let d = (b - b'0') as u64;
                if d == 0 {
                    zero_cnt += 1;
                } else {
                    zero_cnt = 0;
                }
                match info.i.checked_mul(10).and_then(|v| v.checked_add(d)) {
                    Some(v) => {
                        info.i = v;
                        if info.i >= i64::MAX as u64
                            || info.dec_cnt - zero_cnt > MAX_NATIVE_DIGITS
                        {
                            info.big = true;
                        }
                    }
                    None => info.big = true,
                }
            }
            b = reader.get();
        }

        if b == b'.' {
            b = reader.get();
            while b.is_ascii_digit() {
                any_digit = true;
                info.dec_cnt += 1;
                if !info.big {
                    let d = (b - b'0') as u64;
                    if d == 0 {
                        zero_cnt += 1;
                    } else {
                        zero_cnt = 0;
                    }
                    let num = info.num.checked_mul(10).and_then(|v| v.checked_add(d));
                    let div = info.div.checked_mul(10);
                    match (num, div) {
                        (Some(num), Some(div)) => {
                            info.num = num;
                            info.div = div;
                            if info.num >= i64::MAX as u64
                                || info.dec_cnt - zero_cnt > MAX_NATIVE_DIGITS
                            {
                                info.big = true;
                            }
                        }
                        _ => info.big = true,
                    }
                }
                b = reader.get();
            }
        }

        if b == b'e' || b == b'E' {
            let mut exp_neg = false;
            b = reader.get();
            match b {
                b'-' => {
                    exp_neg = true;
                    b = reader.get();
                }
                b'+' => {
                    b = reader.get();
                }
                _ => {}
            }
            let mut any_exp = false;
            while b.is_ascii_digit() {
                any_exp = true;
                if !info.big {
                    info.exp = info.exp * 10 + (b - b'0') as i32;
                    if info.exp >= MAX_NATIVE_EXP {
                        info.big = true;
                    }
                }
                b = reader.get();
            }
            if !any_exp {
                return Err(Error::NotANumber {
                    location: reader.location(),
                });
            }
            if exp_neg {
                info.exp = -info.exp;
            }
        }

        if !any_digit {
            return Err(Error::NotANumber {
                location: reader.location(),
            });
        }
        info.dec_cnt -= zero_cnt;
        if b != 0 {
            reader.backup();
        }
    }

    info.text = reader.slice(start, reader.offset());
    if options.bigdec_load == BigDecLoad::BigDec {
        info.big = true;
    }
    Ok(info)
}
