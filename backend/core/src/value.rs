use std::fmt;

/// A single positional argument for a log template.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    /// Anything else, already rendered through its `Display` impl.
    Display(String),
}

impl LogValue {
    pub fn display(value: &impl fmt::Display) -> Self {
        LogValue::Display(value.to_string())
    }

    /// Type name used in degraded output such as `%!d(string=abc)`.
    pub fn type_name(&self) -> &'static str {
        match self {
            LogValue::Str(_) => "string",
            LogValue::Int(_) => "int",
            LogValue::Uint(_) => "uint",
            LogValue::Float(_) => "float64",
            LogValue::Bool(_) => "bool",
            LogValue::Char(_) => "char",
            LogValue::Display(_) => "value",
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Str(s) | LogValue::Display(s) => f.write_str(s),
            LogValue::Int(n) => write!(f, "{n}"),
            LogValue::Uint(n) => write!(f, "{n}"),
            LogValue::Float(x) => write!(f, "{x}"),
            LogValue::Bool(b) => write!(f, "{b}"),
            LogValue::Char(c) => write!(f, "{c}"),
        }
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::Str(s.clone())
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<char> for LogValue {
    fn from(c: char) -> Self {
        LogValue::Char(c)
    }
}

impl From<f32> for LogValue {
    fn from(x: f32) -> Self {
        LogValue::Float(f64::from(x))
    }
}

impl From<f64> for LogValue {
    fn from(x: f64) -> Self {
        LogValue::Float(x)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for LogValue {
            fn from(n: $t) -> Self {
                LogValue::Int(n as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for LogValue {
            fn from(n: $t) -> Self {
                LogValue::Uint(n as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_variant() {
        assert_eq!(LogValue::from(-3i32), LogValue::Int(-3));
        assert_eq!(LogValue::from(7usize), LogValue::Uint(7));
        assert_eq!(LogValue::from("hi"), LogValue::Str("hi".into()));
        assert_eq!(LogValue::from(true), LogValue::Bool(true));
    }

    #[test]
    fn display_wraps_arbitrary_types() {
        let path = std::path::Path::new("/tmp/x.log");
        let v = LogValue::display(&path.display());
        assert_eq!(v.to_string(), "/tmp/x.log");
        assert_eq!(v.type_name(), "value");
    }
}
