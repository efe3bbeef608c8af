//! printf-style positional interpolation over [`LogValue`] arguments.
//!
//! The output never fails: a verb applied to the wrong kind of value, a missing
//! argument or a surplus argument is rendered inline as an error marker
//! (`%!d(string=abc)`, `%!d(MISSING)`, `%!(EXTRA int=1)`).

use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

use crate::value::LogValue;

/// Widths and precisions beyond this are clamped.
const MAX_WIDTH: usize = 4096;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    zero: bool,
    space: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Interpolate `args` into `template` positionally.
pub fn sprintf(template: &str, args: &[LogValue]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next_arg = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                '0' => spec.zero = true,
                ' ' => spec.space = true,
                '#' => spec.sharp = true,
                _ => break,
            }
            chars.next();
        }
        spec.width = read_number(&mut chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(read_number(&mut chars).unwrap_or(0));
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                out.push_str(&render(verb, spec, arg));
            }
            None => {
                let _ = write!(out, "%!{verb}(MISSING)");
            }
        }
    }

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next_arg..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={}", arg.type_name(), arg);
        }
        out.push(')');
    }
    out
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let v = value.unwrap_or(0);
        value = Some(v.saturating_mul(10).saturating_add(d as usize).min(MAX_WIDTH));
    }
    value
}

fn render(verb: char, spec: Spec, arg: &LogValue) -> String {
    use LogValue::*;

    match (verb, arg) {
        ('v', Str(s) | Display(s)) | ('s', Str(s) | Display(s)) => {
            pad_text(&truncate(s, spec.precision), spec)
        }
        ('v' | 's', Char(c)) | ('c', Char(c)) => pad_text(&c.to_string(), spec),
        ('v' | 't', Bool(b)) => pad_text(&b.to_string(), spec),
        ('v' | 'd' | 'i', Int(n)) => integer(*n < 0, n.unsigned_abs(), 10, false, spec),
        ('v' | 'd' | 'i', Uint(n)) => integer(false, *n, 10, false, spec),
        ('x' | 'X' | 'o' | 'b', Int(n)) => {
            integer(*n < 0, n.unsigned_abs(), radix(verb), verb == 'X', spec)
        }
        ('x' | 'X' | 'o' | 'b', Uint(n)) => integer(false, *n, radix(verb), verb == 'X', spec),
        ('x' | 'X', Str(s) | Display(s)) => pad_text(&hex_bytes(s, verb == 'X'), spec),
        ('c', Int(n)) => pad_text(&code_point(u32::try_from(*n).ok()), spec),
        ('c', Uint(n)) => pad_text(&code_point(u32::try_from(*n).ok()), spec),
        ('q', Str(s) | Display(s)) => pad_text(&format!("{s:?}"), spec),
        ('q', Char(c)) => pad_text(&format!("{c:?}"), spec),
        ('v', Float(x)) => float(*x, 'g', spec),
        ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Float(x)) => float(*x, verb, spec),
        _ => format!("%!{verb}({}={})", arg.type_name(), arg),
    }
}

fn radix(verb: char) -> u32 {
    match verb {
        'o' => 8,
        'b' => 2,
        _ => 16,
    }
}

fn code_point(n: Option<u32>) -> String {
    n.and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

fn hex_bytes(s: &str, upper: bool) -> String {
    s.bytes()
        .map(|b| {
            if upper {
                format!("{b:02X}")
            } else {
                format!("{b:02x}")
            }
        })
        .collect()
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    }
}

fn pad_text(s: &str, spec: Spec) -> String {
    let len = s.chars().count();
    let width = spec.width.unwrap_or(0);
    if len >= width {
        return s.to_string();
    }
    let fill = " ".repeat(width - len);
    if spec.minus {
        format!("{s}{fill}")
    } else {
        format!("{fill}{s}")
    }
}

/// Pad a number, placing zero fill between the sign/prefix and the digits.
fn pad_number(prefix: &str, digits: &str, spec: Spec, zero_ok: bool) -> String {
    let width = spec.width.unwrap_or(0);
    let len = prefix.chars().count() + digits.chars().count();
    if spec.zero && zero_ok && !spec.minus && len < width {
        return format!("{prefix}{}{digits}", "0".repeat(width - len));
    }
    pad_text(&format!("{prefix}{digits}"), spec)
}

fn sign(negative: bool, spec: Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn integer(negative: bool, magnitude: u64, radix: u32, upper: bool, spec: Spec) -> String {
    let mut digits = match (radix, upper) {
        (16, true) => format!("{magnitude:X}"),
        (16, false) => format!("{magnitude:x}"),
        (8, _) => format!("{magnitude:o}"),
        (2, _) => format!("{magnitude:b}"),
        _ => magnitude.to_string(),
    };
    if let Some(p) = spec.precision {
        if digits.len() < p {
            digits = format!("{}{digits}", "0".repeat(p - digits.len()));
        }
    }

    let mut prefix = sign(negative, spec).to_string();
    if spec.sharp {
        prefix.push_str(match (radix, upper) {
            (16, true) => "0X",
            (16, false) => "0x",
            (8, _) => "0",
            (2, _) => "0b",
            _ => "",
        });
    }
    pad_number(&prefix, &digits, spec, spec.precision.is_none())
}

fn float(x: f64, verb: char, spec: Spec) -> String {
    if x.is_nan() {
        return pad_text("NaN", spec);
    }
    if x.is_infinite() {
        let text = if x < 0.0 { "-Inf" } else { "+Inf" };
        return pad_text(text, spec);
    }

    let abs = x.abs();
    let upper = verb.is_ascii_uppercase();
    let body = match verb {
        'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), abs),
        'e' | 'E' => exponent(&format!("{:.*e}", spec.precision.unwrap_or(6), abs), upper),
        _ => general(abs, spec.precision, spec.sharp, upper),
    };
    pad_number(sign(x.is_sign_negative(), spec), &body, spec, true)
}

/// Shortest representation, switching to exponent form for very large or small values.
fn general(abs: f64, precision: Option<usize>, keep_zeros: bool, upper: bool) -> String {
    let Some(p) = precision else {
        if abs != 0.0 && !(1e-4..1e21).contains(&abs) {
            return exponent(&format!("{abs:e}"), upper);
        }
        return format!("{abs}");
    };

    let p = p.max(1);
    let exp = if abs == 0.0 {
        0
    } else {
        abs.log10().floor() as i64
    };
    let text = if exp < -4 || exp >= p as i64 {
        exponent(&format!("{:.*e}", p - 1, abs), upper)
    } else {
        let decimals = (p as i64 - 1 - exp).max(0) as usize;
        format!("{abs:.decimals$}")
    };
    if keep_zeros {
        text
    } else {
        trim_fraction(&text)
    }
}

fn trim_fraction(text: &str) -> String {
    let (mantissa, suffix) = match text.find(['e', 'E']) {
        Some(i) => text.split_at(i),
        None => (text, ""),
    };
    if !mantissa.contains('.') {
        return text.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{suffix}")
}

/// Rewrite Rust's `1.5e2` exponent form as `1.5e+02`.
fn exponent(rust_form: &str, upper: bool) -> String {
    let Some((mantissa, exp)) = rust_form.split_once('e') else {
        return rust_form.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(template: &str, args: &[LogValue]) -> String {
        sprintf(template, args)
    }

    #[test]
    fn plain_template_passes_through() {
        assert_eq!(fmt("six", &[]), "six");
        assert_eq!(fmt("grüße 100%%", &[]), "grüße 100%");
    }

    #[test]
    fn substitutes_positionally() {
        let out = fmt(
            "hello %s, count=%d ok=%t",
            &["three".into(), 42.into(), true.into()],
        );
        assert_eq!(out, "hello three, count=42 ok=true");
    }

    #[test]
    fn width_flags_and_sign() {
        assert_eq!(fmt("[%5d]", &[42.into()]), "[   42]");
        assert_eq!(fmt("[%-5s]", &["ab".into()]), "[ab   ]");
        assert_eq!(fmt("[%05d]", &[(-42).into()]), "[-0042]");
        assert_eq!(fmt("[%+d]", &[5.into()]), "[+5]");
        assert_eq!(fmt("[%.2s]", &["abcdef".into()]), "[ab]");
    }

    #[test]
    fn radix_verbs() {
        assert_eq!(fmt("%x", &[255u32.into()]), "ff");
        assert_eq!(fmt("%#X", &[255u32.into()]), "0XFF");
        assert_eq!(fmt("%x", &[(-255).into()]), "-ff");
        assert_eq!(fmt("%o %b", &[8.into(), 5.into()]), "10 101");
        assert_eq!(fmt("%x", &["hi".into()]), "6869");
    }

    #[test]
    fn float_verbs() {
        assert_eq!(fmt("%.2f", &[1.23456.into()]), "1.23");
        assert_eq!(fmt("%f", &[1.5.into()]), "1.500000");
        assert_eq!(fmt("%e", &[1500.0.into()]), "1.500000e+03");
        assert_eq!(fmt("%g", &[0.00001.into()]), "1e-05");
        assert_eq!(fmt("%v", &[2.5.into()]), "2.5");
        assert_eq!(fmt("%.3g", &[1.23456.into()]), "1.23");
        assert_eq!(fmt("%8.2f|", &[(-1.0).into()]), "   -1.00|");
    }

    #[test]
    fn char_and_quote_verbs() {
        assert_eq!(fmt("%c", &[65.into()]), "A");
        assert_eq!(fmt("%c", &['z'.into()]), "z");
        assert_eq!(fmt("%q", &["a\"b".into()]), "\"a\\\"b\"");
    }

    #[test]
    fn wrong_type_degrades_to_marker() {
        assert_eq!(fmt("n=%d", &["abc".into()]), "n=%!d(string=abc)");
        assert_eq!(fmt("%t", &[1.into()]), "%!t(int=1)");
        assert_eq!(fmt("%z", &[5.into()]), "%!z(int=5)");
    }

    #[test]
    fn missing_and_extra_arguments() {
        assert_eq!(fmt("%s and %d", &["a".into()]), "a and %!d(MISSING)");
        assert_eq!(
            fmt("x", &[1.into(), "y".into()]),
            "x%!(EXTRA int=1, string=y)"
        );
        assert_eq!(fmt("tail %", &[]), "tail %!(NOVERB)");
    }

    #[test]
    fn huge_width_is_clamped() {
        let out = fmt("%99999999999d", &[1.into()]);
        assert_eq!(out.len(), MAX_WIDTH);
    }
}
