//! Value parsers: the callbacks that turn a raw argument into a typed
//! destination.

use std::convert::TryFrom;
use std::str::FromStr;

/// What a value parser did with the argument it was offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    /// The argument was used; if it came from the next token, that token is
    /// consumed too.
    Consumed,
    /// The flag took effect without using any argument.
    ConsumedNoArg,
    /// A value is mandatory but none (or an empty one) was given.
    NeedArgument,
    /// The argument was present but could not be converted.
    InvalidArgument,
}

/// A destination that knows how to parse itself from the command line.
///
/// `seen` is true when the same flag already appeared earlier in this parse.
pub trait Value {
    fn set(&mut self, arg: Option<&str>, seen: bool) -> Parsed;

    /// Placeholder shown in the usage listing when the flag is registered
    /// without one. `None` means the flag takes no argument.
    fn arg_name(&self) -> Option<&'static str> {
        None
    }
}

/// Booleans flip away from their default the first time they are seen and
/// ignore any repetition.
impl<'a> Value for &'a mut bool {
    fn set(&mut self, _: Option<&str>, seen: bool) -> Parsed {
        if !seen {
            **self = !**self;
        }
        Parsed::ConsumedNoArg
    }
}

impl<'a> Value for &'a mut String {
    fn set(&mut self, arg: Option<&str>, _: bool) -> Parsed {
        match arg {
            Some(text) if !text.is_empty() => {
                **self = text.to_string();
                Parsed::Consumed
            }
            _ => Parsed::NeedArgument,
        }
    }

    fn arg_name(&self) -> Option<&'static str> {
        Some("string")
    }
}

macro_rules! integer_value {
    ($($ty:ty => $name:expr),* $(,)?) => {$(
        impl<'a> Value for &'a mut $ty {
            fn set(&mut self, arg: Option<&str>, _: bool) -> Parsed {
                let text = match arg {
                    Some(t) if !t.is_empty() => t,
                    _ => return Parsed::NeedArgument,
                };
                match parse_integer(text).and_then(|n| <$ty>::try_from(n).ok()) {
                    Some(n) => {
                        **self = n;
                        Parsed::Consumed
                    }
                    None => Parsed::InvalidArgument,
                }
            }

            fn arg_name(&self) -> Option<&'static str> {
                Some($name)
            }
        }
    )*};
}

integer_value! {
    i32 => "int",
    u32 => "uint",
    i64 => "int64",
    u64 => "uint64",
}

macro_rules! float_value {
    ($($ty:ty => $name:expr),* $(,)?) => {$(
        impl<'a> Value for &'a mut $ty {
            fn set(&mut self, arg: Option<&str>, _: bool) -> Parsed {
                let text = match arg {
                    Some(t) if !t.is_empty() => t,
                    _ => return Parsed::NeedArgument,
                };
                match <$ty>::from_str(text) {
                    Ok(n) => {
                        **self = n;
                        Parsed::Consumed
                    }
                    Err(_) => Parsed::InvalidArgument,
                }
            }

            fn arg_name(&self) -> Option<&'static str> {
                Some($name)
            }
        }
    )*};
}

float_value! {
    f32 => "float",
    f64 => "double",
}

/// Parses an integer the way C's `strtol` does with base 0: an optional
/// sign, then `0x`/`0X` for hexadecimal, a leading `0` for octal, decimal
/// otherwise. The whole text must be consumed.
pub fn parse_integer(text: &str) -> Option<i128> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    // from_str_radix accepts its own sign, which would allow "--5" or "0x-1"
    if digits.is_empty() || digits.starts_with(|c| c == '+' || c == '-') {
        return None;
    }

    let magnitude = u64::from_str_radix(digits, radix).ok()? as i128;
    Some(if negative { -magnitude } else { magnitude })
}

/// Any `FromStr` type, for destinations without a dedicated parser.
pub struct FromStrValue<'a, T>(pub &'a mut T);

impl<'a, T: FromStr> Value for FromStrValue<'a, T> {
    fn set(&mut self, arg: Option<&str>, _: bool) -> Parsed {
        let text = match arg {
            Some(t) if !t.is_empty() => t,
            _ => return Parsed::NeedArgument,
        };
        match T::from_str(text) {
            Ok(v) => {
                *self.0 = v;
                Parsed::Consumed
            }
            Err(_) => Parsed::InvalidArgument,
        }
    }

    fn arg_name(&self) -> Option<&'static str> {
        Some("value")
    }
}

/// A user callback with the same contract as [`Value::set`].
pub struct Func<F>(pub F);

impl<F> Value for Func<F>
where
    F: FnMut(Option<&str>, bool) -> Parsed,
{
    fn set(&mut self, arg: Option<&str>, seen: bool) -> Parsed {
        (self.0)(arg, seen)
    }
}

/// Placeholder behind the transient `-h`/`--help` flag. The parser stops on
/// it before the value is ever set.
pub(crate) struct HelpRequest;

impl Value for HelpRequest {
    fn set(&mut self, _: Option<&str>, _: bool) -> Parsed {
        Parsed::ConsumedNoArg
    }
}
